use eframe::egui;
use idphoto_sheet::{CropProvider, ImageCropper, Session};

/// UI-side state of the editor that the session does not own
#[derive(Default)]
pub struct EditorState {
    /// Rotated photo the crop selection is drawn over
    pub canvas_texture: Option<egui::TextureHandle>,
    /// Rotation the canvas texture was built for
    pub canvas_rotation: f32,
    /// Rendered sheet
    pub preview_texture: Option<egui::TextureHandle>,
    /// The session output changed since the preview texture was built
    pub preview_stale: bool,
    /// Slider value; applied to the session when the user lets go
    pub rotation: f32,
}

impl EditorState {
    /// Rebuild the canvas texture when the photo or its rotation changed
    pub fn sync_canvas(&mut self, ctx: &egui::Context, cropper: &ImageCropper) {
        if self.canvas_texture.is_some() && self.canvas_rotation == cropper.rotation() {
            return;
        }

        let canvas = cropper.canvas();
        let image = egui::ColorImage::from_rgba_unmultiplied(
            [canvas.width() as usize, canvas.height() as usize],
            canvas.as_raw(),
        );
        match &mut self.canvas_texture {
            Some(texture) => texture.set(image, egui::TextureOptions::LINEAR),
            None => {
                self.canvas_texture =
                    Some(ctx.load_texture("crop_canvas", image, egui::TextureOptions::LINEAR));
            }
        }
        self.canvas_rotation = cropper.rotation();
    }

    /// Upload the latest rendered sheet, or drop the texture if there is none
    pub fn sync_preview(&mut self, ctx: &egui::Context, session: &Session) {
        if !self.preview_stale {
            return;
        }
        self.preview_stale = false;

        let Some(output) = session.output() else {
            self.preview_texture = None;
            return;
        };
        let image = egui::ColorImage::from_rgb(
            [output.width() as usize, output.height() as usize],
            output.as_raw(),
        );
        match &mut self.preview_texture {
            Some(texture) => texture.set(image, egui::TextureOptions::LINEAR),
            None => {
                self.preview_texture =
                    Some(ctx.load_texture("sheet_preview", image, egui::TextureOptions::LINEAR));
            }
        }
    }

    /// Report a failed session call and mark the preview for refresh
    pub fn apply(&mut self, action: &str, result: idphoto_sheet::Result<()>) {
        if let Err(e) = result {
            log::error!("{action} failed: {e}");
        }
        self.preview_stale = true;
    }
}
