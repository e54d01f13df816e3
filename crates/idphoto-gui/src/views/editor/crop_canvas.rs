//! Crop selection over the rotated photo
//!
//! Drag inside the canvas to move the selection, scroll to resize it.

use eframe::egui;
use egui::{Color32, Rect, Sense, Stroke, StrokeKind, pos2, vec2};
use idphoto_sheet::{CropProvider, Session};

use super::state::EditorState;

const SHADE: Color32 = Color32::from_black_alpha(140);
const ZOOM_PER_SCROLL_POINT: f32 = 0.002;

pub fn show(ui: &mut egui::Ui, session: &mut Session, state: &mut EditorState) {
    let can_export = session.can_export();
    let Some(cropper) = session.cropper_mut() else {
        return;
    };
    state.sync_canvas(ui.ctx(), cropper);
    let Some(texture) = &state.canvas_texture else {
        return;
    };

    let (cw, ch) = cropper.canvas_size();
    if cw == 0 || ch == 0 {
        return;
    }
    let available = ui.available_size();
    let scale = (available.x / cw as f32)
        .min(available.y / ch as f32)
        .min(1.0);
    let (rect, response) = ui.allocate_exact_size(
        vec2(cw as f32 * scale, ch as f32 * scale),
        Sense::click_and_drag(),
    );

    let painter = ui.painter_at(rect);
    painter.image(
        texture.id(),
        rect,
        Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0)),
        Color32::WHITE,
    );

    let mut changed = false;
    if response.dragged() {
        let delta = response.drag_delta() / scale;
        cropper.move_selection(delta.x, delta.y);
        changed = true;
    }
    if response.hovered() {
        let scroll = ui.input(|i| i.smooth_scroll_delta.y);
        if scroll != 0.0 {
            cropper.zoom_selection((1.0 - scroll * ZOOM_PER_SCROLL_POINT).clamp(0.5, 2.0));
            changed = true;
        }
    }

    let selection = cropper.selection();
    let selected = Rect::from_min_size(
        rect.min + vec2(selection.x, selection.y) * scale,
        vec2(selection.width, selection.height) * scale,
    );

    // Shade everything outside the selection
    painter.rect_filled(
        Rect::from_min_max(rect.min, pos2(rect.max.x, selected.min.y)),
        0.0,
        SHADE,
    );
    painter.rect_filled(
        Rect::from_min_max(pos2(rect.min.x, selected.max.y), rect.max),
        0.0,
        SHADE,
    );
    painter.rect_filled(
        Rect::from_min_max(
            pos2(rect.min.x, selected.min.y),
            pos2(selected.min.x, selected.max.y),
        ),
        0.0,
        SHADE,
    );
    painter.rect_filled(
        Rect::from_min_max(
            pos2(selected.max.x, selected.min.y),
            pos2(rect.max.x, selected.max.y),
        ),
        0.0,
        SHADE,
    );
    painter.rect_stroke(
        selected,
        0.0,
        Stroke::new(2.0, Color32::WHITE),
        StrokeKind::Outside,
    );

    // Keep an existing preview in step with the crop once the gesture ends
    let gesture_done = response.drag_stopped() || (changed && !response.dragged());
    if can_export && gesture_done {
        let result = session.render_preview().map(|_| ());
        state.apply("Updating preview", result);
    }
}
