//! Editing session
//!
//! A session is either waiting for a photo (`Empty`) or editing one
//! (`Editing`). Uploads are two-phase: [`Session::begin_upload`] hands out a
//! ticket, decoding happens wherever the caller likes, and
//! [`Session::finish_upload`] applies the result. Only one upload may be in
//! flight at a time. A freshly loaded photo is rendered straight away, so the
//! sheet can be exported without an explicit [`Session::render_preview`].

use image::{DynamicImage, RgbImage};

use crate::crop::{CropProvider, ImageCropper};
use crate::decode::{Upload, is_supported_upload};
use crate::export::{ExportedSheet, encode_jpeg, sheet_file_name};
use crate::layout::{GridLayout, compute_layout_px};
use crate::options::SheetOptions;
use crate::render::{GuideStyle, render_sheet};
use crate::stats::statistics_for_layout;
use crate::types::*;

/// Which screen the user should be looking at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Upload,
    Editor,
}

/// Receipt for an upload that is being decoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTicket {
    id: u64,
    file_name: String,
}

impl UploadTicket {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }
}

/// State kept while a photo is being edited
#[derive(Debug)]
pub struct EditingState<C> {
    pub source_name: String,
    pub cropper: C,
    /// Last rendered sheet; reused between renders
    pub output: RgbImage,
    /// Layout of `output`, present once a preview has been rendered
    pub layout: Option<GridLayout>,
}

#[derive(Debug)]
pub enum SessionState<C> {
    Empty,
    Editing(EditingState<C>),
}

/// One user's work on a single print sheet
#[derive(Debug)]
pub struct Session<C: CropProvider = ImageCropper> {
    options: SheetOptions,
    state: SessionState<C>,
    in_flight: Option<UploadTicket>,
    next_ticket: u64,
}

impl<C: CropProvider> Default for Session<C> {
    fn default() -> Self {
        Self::new(SheetOptions::default())
    }
}

impl<C: CropProvider> Session<C> {
    pub fn new(options: SheetOptions) -> Self {
        Self {
            options,
            state: SessionState::Empty,
            in_flight: None,
            next_ticket: 0,
        }
    }

    pub fn options(&self) -> &SheetOptions {
        &self.options
    }

    pub fn state(&self) -> &SessionState<C> {
        &self.state
    }

    pub fn view(&self) -> View {
        match self.state {
            SessionState::Empty => View::Upload,
            SessionState::Editing(_) => View::Editor,
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.state, SessionState::Editing(_))
    }

    /// True while an upload is being decoded
    pub fn upload_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// True once a sheet has been rendered and can be exported
    pub fn can_export(&self) -> bool {
        self.editing().is_some_and(|editing| editing.layout.is_some())
    }

    pub fn editing(&self) -> Option<&EditingState<C>> {
        match &self.state {
            SessionState::Editing(editing) => Some(editing),
            SessionState::Empty => None,
        }
    }

    pub fn cropper(&self) -> Option<&C> {
        self.editing().map(|editing| &editing.cropper)
    }

    pub fn cropper_mut(&mut self) -> Option<&mut C> {
        match &mut self.state {
            SessionState::Editing(editing) => Some(&mut editing.cropper),
            SessionState::Empty => None,
        }
    }

    /// The rendered sheet, if a preview exists
    pub fn output(&self) -> Option<&RgbImage> {
        self.editing()
            .filter(|editing| editing.layout.is_some())
            .map(|editing| &editing.output)
    }

    /// Layout of the rendered sheet, if a preview exists
    pub fn layout(&self) -> Option<GridLayout> {
        self.editing().and_then(|editing| editing.layout)
    }

    /// Statistics for the current options
    pub fn statistics(&self) -> SheetStatistics {
        let page = self.options.page();
        let cell = self.options.cell();
        let layout = compute_layout_px(page, cell, self.options.margin_px(), self.options.gap_px());
        statistics_for_layout(page, cell, &layout)
    }

    /// True if `ticket` belongs to the upload currently being decoded
    pub fn is_pending(&self, ticket: &UploadTicket) -> bool {
        self.in_flight.as_ref() == Some(ticket)
    }

    /// Start an upload. Unsupported files and overlapping uploads are
    /// rejected without touching the current state.
    pub fn begin_upload(&mut self, upload: &Upload) -> Result<UploadTicket> {
        if !is_supported_upload(upload) {
            log::warn!("Rejected upload {}: not an image", upload.file_name);
            return Err(SheetError::UnsupportedUpload {
                file_name: upload.file_name.clone(),
            });
        }
        if self.in_flight.is_some() {
            return Err(SheetError::UploadInProgress);
        }

        self.next_ticket += 1;
        let ticket = UploadTicket {
            id: self.next_ticket,
            file_name: upload.file_name.clone(),
        };
        self.in_flight = Some(ticket.clone());
        log::debug!("Upload {} started ({})", ticket.id, ticket.file_name);
        Ok(ticket)
    }

    /// Apply the decoded result of an upload started with [`Self::begin_upload`].
    ///
    /// A ticket that is no longer current is ignored.
    pub fn finish_upload(
        &mut self,
        ticket: &UploadTicket,
        decoded: Result<DynamicImage>,
    ) -> Result<()> {
        if !self.is_pending(ticket) {
            log::debug!("Ignoring stale upload {}", ticket.id);
            return Ok(());
        }
        self.in_flight = None;

        let image = decoded.inspect_err(|e| {
            log::error!("Upload {} failed: {}", ticket.file_name, e);
        })?;
        self.start_editing(ticket.file_name.clone(), image)
    }

    /// Load an already decoded image, replacing any current photo
    pub fn load_image(&mut self, name: impl Into<String>, image: DynamicImage) -> Result<()> {
        if self.in_flight.is_some() {
            return Err(SheetError::UploadInProgress);
        }
        self.start_editing(name.into(), image)
    }

    fn start_editing(&mut self, source_name: String, image: DynamicImage) -> Result<()> {
        log::info!(
            "Editing {} ({}x{})",
            source_name,
            image.width(),
            image.height()
        );
        // Drop the previous crop session before building the next one
        self.state = SessionState::Empty;
        let cropper = C::from_image(image, self.options.photo_size.aspect_ratio());
        self.state = SessionState::Editing(EditingState {
            source_name,
            cropper,
            output: RgbImage::new(0, 0),
            layout: None,
        });
        self.render_preview().map(|_| ())
    }

    pub fn set_photo_size(&mut self, photo_size: PhotoSize) -> Result<()> {
        self.update_options(|options| options.photo_size = photo_size)?;
        if let Some(cropper) = self.cropper_mut() {
            cropper.set_aspect_ratio(photo_size.aspect_ratio());
        }
        self.refresh_preview()
    }

    pub fn set_page_size(&mut self, page_size: PageSize) -> Result<()> {
        self.update_options(|options| options.page_size = page_size)?;
        self.refresh_preview()
    }

    pub fn set_orientation(&mut self, orientation: Orientation) -> Result<()> {
        self.update_options(|options| options.orientation = orientation)?;
        self.refresh_preview()
    }

    pub fn set_spacing(&mut self, margin_mm: f32, gap_mm: f32) -> Result<()> {
        self.update_options(|options| {
            options.margin_mm = margin_mm;
            options.gap_mm = gap_mm;
        })?;
        self.refresh_preview()
    }

    /// Replace all options at once, e.g. after loading a config file
    pub fn set_options(&mut self, options: SheetOptions) -> Result<()> {
        options.validate()?;
        let aspect_ratio = options.photo_size.aspect_ratio();
        self.options = options;
        if let Some(cropper) = self.cropper_mut() {
            cropper.set_aspect_ratio(aspect_ratio);
        }
        self.refresh_preview()
    }

    fn update_options(&mut self, change: impl FnOnce(&mut SheetOptions)) -> Result<()> {
        let mut candidate = self.options.clone();
        change(&mut candidate);
        candidate.validate()?;
        self.options = candidate;
        Ok(())
    }

    fn refresh_preview(&mut self) -> Result<()> {
        if self.can_export() {
            self.render_preview()?;
        }
        Ok(())
    }

    /// Rotate the photo to an absolute angle in degrees
    pub fn rotate_to(&mut self, degrees: f32) -> Result<()> {
        let cropper = self.cropper_mut().ok_or(SheetError::NotEditing)?;
        cropper.rotate_to(degrees);
        Ok(())
    }

    /// Render the sheet from the current crop and options
    pub fn render_preview(&mut self) -> Result<GridLayout> {
        self.options.validate()?;
        let SessionState::Editing(editing) = &mut self.state else {
            return Err(SheetError::NotEditing);
        };

        let page = self.options.page();
        let cell = self.options.cell();
        let tile = editing
            .cropper
            .cropped_image(cell.width_px, cell.height_px)?;
        let layout = compute_layout_px(page, cell, self.options.margin_px(), self.options.gap_px());
        if layout.is_empty() {
            log::warn!(
                "{} photos do not fit on {} paper; the sheet will be blank",
                self.options.photo_size.label(),
                self.options.page_size.label()
            );
        }

        let guides = GuideStyle::from_options(&self.options.guides);
        render_sheet(&mut editing.output, page, cell, &layout, &tile, guides.as_ref());
        editing.layout = Some(layout);

        log::info!(
            "Rendered {}x{} sheet with {} photos",
            page.width_px,
            page.height_px,
            layout.cell_count()
        );
        Ok(layout)
    }

    /// Encode the rendered sheet as JPEG
    pub fn export(&self) -> Result<ExportedSheet> {
        let output = self.output().ok_or(SheetError::NothingToExport)?;
        let bytes = encode_jpeg(output, self.options.jpeg_quality)?;
        let file_name = sheet_file_name(self.options.photo_size, self.options.page_size);
        log::info!("Exported {} ({} bytes)", file_name, bytes.len());
        Ok(ExportedSheet { file_name, bytes })
    }

    /// Drop the photo and go back to the upload view.
    ///
    /// An upload still being decoded is abandoned; its ticket goes stale.
    pub fn reset(&mut self) {
        if self.is_editing() {
            log::info!("Session reset");
        }
        if let Some(ticket) = self.in_flight.take() {
            log::debug!("Abandoning upload {}", ticket.id);
        }
        self.state = SessionState::Empty;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn photo(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([90, 120, 200])))
    }

    fn png_upload(name: &str) -> Upload {
        Upload::new(name, Some("image/png".to_string()), Vec::new())
    }

    #[test]
    fn test_starts_empty() {
        let session: Session = Session::default();
        assert_eq!(session.view(), View::Upload);
        assert!(!session.can_export());
        assert!(session.output().is_none());
    }

    #[test]
    fn test_upload_enters_editor() {
        let mut session: Session = Session::default();
        let ticket = session.begin_upload(&png_upload("me.png")).unwrap();
        assert!(session.upload_in_flight());
        assert_eq!(session.view(), View::Upload);

        session.finish_upload(&ticket, Ok(photo(600, 800))).unwrap();
        assert!(!session.upload_in_flight());
        assert_eq!(session.view(), View::Editor);
        assert_eq!(session.cropper().unwrap().rotation(), 0.0);
        assert!(session.can_export());
        assert_eq!(session.layout().unwrap().cell_count(), 8);
        assert_eq!(session.output().unwrap().dimensions(), (1800, 1200));
    }

    #[test]
    fn test_second_upload_rejected_while_in_flight() {
        let mut session: Session = Session::default();
        let _ticket = session.begin_upload(&png_upload("a.png")).unwrap();
        let err = session.begin_upload(&png_upload("b.png")).unwrap_err();
        assert!(matches!(err, SheetError::UploadInProgress));
    }

    #[test]
    fn test_failed_decode_clears_flag_and_keeps_state() {
        let mut session: Session = Session::default();
        let ticket = session.begin_upload(&png_upload("bad.png")).unwrap();
        let result = session.finish_upload(&ticket, Err(SheetError::Decode("boom".into())));
        assert!(result.is_err());
        assert!(!session.upload_in_flight());
        assert_eq!(session.view(), View::Upload);
    }

    #[test]
    fn test_stale_ticket_ignored() {
        let mut session: Session = Session::default();
        let first = session.begin_upload(&png_upload("a.png")).unwrap();
        session.finish_upload(&first, Ok(photo(100, 100))).unwrap();

        // Replaying an old ticket changes nothing
        session.finish_upload(&first, Ok(photo(50, 50))).unwrap();
        assert_eq!(session.editing().unwrap().cropper.canvas_size(), (100, 100));
    }

    #[test]
    fn test_rotate_requires_photo() {
        let mut session: Session = Session::default();
        assert!(matches!(
            session.rotate_to(90.0),
            Err(SheetError::NotEditing)
        ));
    }

    #[test]
    fn test_photo_size_change_rerenders() {
        let mut session: Session = Session::default();
        session.load_image("me.png", photo(800, 1000)).unwrap();
        session.render_preview().unwrap();
        assert_eq!(session.layout().unwrap().cell_count(), 8);

        session.set_photo_size(PhotoSize::FiveBySeven).unwrap();
        let layout = session.layout().unwrap();
        assert_eq!(layout.cell_width_px, 591);
        let sel = session.cropper().unwrap().selection();
        assert!((sel.width / sel.height - PhotoSize::FiveBySeven.aspect_ratio()).abs() < 0.01);
    }

    #[test]
    fn test_invalid_spacing_leaves_options() {
        let mut session: Session = Session::default();
        assert!(session.set_spacing(-1.0, 2.0).is_err());
        assert_eq!(session.options().margin_mm, 2.0);
    }

    #[test]
    fn test_reset_abandons_pending_upload() {
        let mut session: Session = Session::default();
        let ticket = session.begin_upload(&png_upload("late.png")).unwrap();
        assert!(session.is_pending(&ticket));
        session.reset();
        assert!(!session.upload_in_flight());
        assert!(!session.is_pending(&ticket));

        session.finish_upload(&ticket, Ok(photo(300, 400))).unwrap();
        assert_eq!(session.view(), View::Upload);
        assert!(session.cropper().is_none());

        // A new upload gets a fresh ticket and is applied normally
        let next = session.begin_upload(&png_upload("next.png")).unwrap();
        assert_ne!(next.id(), ticket.id());
        session.finish_upload(&next, Ok(photo(300, 400))).unwrap();
        assert_eq!(session.editing().unwrap().source_name, "next.png");
    }

    #[test]
    fn test_reset_returns_to_upload() {
        let mut session: Session = Session::default();
        session.load_image("me.png", photo(400, 400)).unwrap();
        session.render_preview().unwrap();
        session.reset();
        assert_eq!(session.view(), View::Upload);
        assert!(matches!(session.export(), Err(SheetError::NothingToExport)));
    }
}
