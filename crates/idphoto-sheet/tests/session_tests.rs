use idphoto_sheet::*;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use std::io::Cursor;

fn portrait() -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(900, 1200, Rgb([180, 140, 120])))
}

fn png_upload(name: &str) -> Upload {
    let mut bytes = Vec::new();
    portrait()
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    Upload::new(name, Some("image/png".into()), bytes)
}

#[tokio::test]
async fn test_upload_preview_export_flow() {
    let mut session: Session = Session::default();
    assert_eq!(session.view(), View::Upload);

    let upload = png_upload("me.png");
    let ticket = session.begin_upload(&upload).unwrap();
    let decoded = decode_upload(upload).await;
    session.finish_upload(&ticket, decoded).unwrap();
    assert_eq!(session.view(), View::Editor);

    let layout = session.render_preview().unwrap();
    assert_eq!(layout.columns, 4);
    assert_eq!(layout.rows, 2);
    assert!(session.can_export());

    let sheet = session.export().unwrap();
    assert_eq!(sheet.file_name, "id_photo_3_5x4_5_on_4x6.jpg");
    let decoded = image::load_from_memory(&sheet.bytes).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (1800, 1200));
}

#[test]
fn test_unsupported_upload_keeps_editor() {
    let mut session: Session = Session::default();
    session.load_image("me.png", portrait()).unwrap();
    session.render_preview().unwrap();

    let pdf = Upload::new("scan.pdf", Some("application/pdf".into()), Vec::new());
    assert!(matches!(
        session.begin_upload(&pdf),
        Err(SheetError::UnsupportedUpload { .. })
    ));
    assert_eq!(session.view(), View::Editor);
    assert!(session.can_export());
}

#[test]
fn test_new_upload_replaces_photo_and_rerenders() {
    let mut session: Session = Session::default();
    session.load_image("first.png", portrait()).unwrap();
    session.rotate_to(90.0).unwrap();
    session.render_preview().unwrap();

    let ticket = session.begin_upload(&png_upload("second.png")).unwrap();
    session
        .finish_upload(&ticket, Ok(DynamicImage::new_rgb8(300, 300)))
        .unwrap();

    let editing = session.editing().unwrap();
    assert_eq!(editing.source_name, "second.png");
    assert_eq!(editing.cropper.rotation(), 0.0);
    assert!(session.can_export());
    assert_eq!(session.export().unwrap().file_name, "id_photo_3_5x4_5_on_4x6.jpg");
}

#[test]
fn test_upload_possible_after_failure() {
    let mut session: Session = Session::default();
    let ticket = session.begin_upload(&png_upload("a.png")).unwrap();
    let _ = session.finish_upload(&ticket, Err(SheetError::Decode("bad".into())));

    let ticket = session.begin_upload(&png_upload("b.png")).unwrap();
    session.finish_upload(&ticket, Ok(portrait())).unwrap();
    assert!(session.is_editing());
}

#[test]
fn test_render_requires_photo() {
    let mut session: Session = Session::default();
    assert!(matches!(
        session.render_preview(),
        Err(SheetError::NotEditing)
    ));
    assert!(matches!(session.export(), Err(SheetError::NothingToExport)));
}

#[test]
fn test_page_and_orientation_changes_rerender() {
    let mut session: Session = Session::default();
    session.load_image("me.png", portrait()).unwrap();
    session.render_preview().unwrap();

    session.set_page_size(PageSize::ThreeByFive).unwrap();
    assert_eq!(session.output().unwrap().dimensions(), (1500, 900));

    session.set_orientation(Orientation::Portrait).unwrap();
    assert_eq!(session.output().unwrap().dimensions(), (900, 1500));

    let sheet = session.export().unwrap();
    assert_eq!(sheet.file_name, "id_photo_3_5x4_5_on_3x5.jpg");
}

#[tokio::test]
async fn test_upload_renders_sheet_immediately() {
    let mut session: Session = Session::default();
    let upload = png_upload("me.png");
    let ticket = session.begin_upload(&upload).unwrap();
    let decoded = decode_upload(upload).await;
    session.finish_upload(&ticket, decoded).unwrap();

    assert!(session.can_export());
    assert_eq!(session.layout().unwrap().cell_count(), 8);
    assert_eq!(session.output().unwrap().dimensions(), (1800, 1200));
}

#[test]
fn test_settings_right_after_load_recompute_sheet() {
    let mut session: Session = Session::default();
    session.load_image("me.png", portrait()).unwrap();

    session.set_page_size(PageSize::ThreeByFive).unwrap();
    assert_eq!(session.output().unwrap().dimensions(), (1500, 900));
    assert_eq!(session.layout().unwrap().cell_count(), 3);

    session.set_spacing(5.0, 1.0).unwrap();
    assert_eq!(session.options().margin_mm, 5.0);
    assert!(session.can_export());
}

#[test]
fn test_start_over_while_decoding_stays_on_upload() {
    let mut session: Session = Session::default();
    session.load_image("first.png", portrait()).unwrap();

    let ticket = session.begin_upload(&png_upload("second.png")).unwrap();
    session.reset();
    session.finish_upload(&ticket, Ok(portrait())).unwrap();

    assert_eq!(session.view(), View::Upload);
    assert!(!session.upload_in_flight());
    assert!(matches!(session.export(), Err(SheetError::NothingToExport)));
}

#[test]
fn test_photo_that_does_not_fit_renders_blank() {
    let mut session: Session = Session::default();
    session.load_image("me.png", portrait()).unwrap();
    session
        .set_photo_size(PhotoSize::Custom {
            width_mm: 130.0,
            height_mm: 130.0,
        })
        .unwrap();

    let layout = session.render_preview().unwrap();
    assert!(layout.is_empty());
    assert_eq!(session.statistics().photos_per_sheet, 0);

    let output = session.output().unwrap();
    assert!(output.pixels().all(|p| *p == Rgb([255, 255, 255])));
    assert!(session.export().is_ok());
}

#[test]
fn test_rotation_changes_tile() {
    let mut session: Session = Session::default();
    session.load_image("me.png", portrait()).unwrap();
    session.rotate_to(15.0).unwrap();
    assert_eq!(session.cropper().unwrap().rotation(), 15.0);
    session.render_preview().unwrap();
    assert!(session.can_export());
}

#[test]
fn test_reset_then_upload_again() {
    let mut session: Session = Session::default();
    session.load_image("me.png", portrait()).unwrap();
    session.reset();
    assert_eq!(session.view(), View::Upload);
    assert!(session.cropper().is_none());

    session.load_image("again.png", portrait()).unwrap();
    assert_eq!(session.view(), View::Editor);
}
