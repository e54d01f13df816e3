use eframe::egui;

/// Builder for creating sliders with automatic change tracking
pub struct SliderBuilder<'a, T> {
    value: &'a mut T,
    range: std::ops::RangeInclusive<T>,
    text: String,
    suffix: Option<String>,
}

impl<'a, T> SliderBuilder<'a, T>
where
    T: egui::emath::Numeric,
{
    pub fn new(value: &'a mut T, range: std::ops::RangeInclusive<T>) -> Self {
        Self {
            value,
            range,
            text: String::new(),
            suffix: None,
        }
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    /// Returns the full response so callers can tell a drag from a release
    pub fn show(self, ui: &mut egui::Ui) -> egui::Response {
        let mut slider =
            egui::Slider::new(self.value, self.range).clamping(egui::SliderClamping::Always);

        if !self.text.is_empty() {
            slider = slider.text(self.text);
        }

        if let Some(suffix) = self.suffix {
            slider = slider.suffix(suffix);
        }

        ui.add(slider)
    }
}

/// Labeled drag value with range and suffix
pub fn labeled_drag_clamped<T>(
    ui: &mut egui::Ui,
    label: &str,
    value: &mut T,
    range: std::ops::RangeInclusive<T>,
    suffix: &str,
) -> bool
where
    T: egui::emath::Numeric,
{
    ui.horizontal(|ui| {
        ui.label(label);
        ui.add(
            egui::DragValue::new(value)
                .range(range)
                .suffix(suffix)
                .speed(0.1),
        )
        .changed()
    })
    .inner
}

/// Enum selector using ComboBox
pub fn enum_selector<T>(
    ui: &mut egui::Ui,
    id: &str,
    label: &str,
    value: &mut T,
    options: &[(T, String)],
) -> bool
where
    T: PartialEq + Clone,
{
    let mut changed = false;
    ui.horizontal(|ui| {
        ui.label(label);

        let current_text = options
            .iter()
            .find(|(v, _)| v == value)
            .map(|(_, text)| text.as_str())
            .unwrap_or("Custom");

        egui::ComboBox::from_id_salt(id)
            .selected_text(current_text)
            .show_ui(ui, |ui| {
                for (option_value, option_text) in options {
                    if ui
                        .selectable_value(value, option_value.clone(), option_text.as_str())
                        .changed()
                    {
                        changed = true;
                    }
                }
            });
    });
    changed
}

/// Horizontal button group for enum selection
pub fn button_group<T>(ui: &mut egui::Ui, value: &mut T, options: &[(T, &str)]) -> bool
where
    T: PartialEq + Clone,
{
    let mut changed = false;
    ui.horizontal(|ui| {
        for (option_value, option_text) in options {
            if ui
                .selectable_value(value, option_value.clone(), *option_text)
                .changed()
            {
                changed = true;
            }
        }
    });
    changed
}
