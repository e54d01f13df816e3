use idphoto_sheet::render::{GuideStyle, render_sheet};
use idphoto_sheet::*;
use image::{Rgb, RgbImage};

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const PHOTO: Rgb<u8> = Rgb([40, 80, 160]);

fn photo_tile(options: &SheetOptions) -> RgbImage {
    let cell = options.cell();
    RgbImage::from_pixel(cell.width_px, cell.height_px, PHOTO)
}

#[test]
fn test_render_default_sheet() {
    let options = SheetOptions::default();
    let sheet = render_sheet_image(&photo_tile(&options), &options).unwrap();

    assert_eq!(sheet.image.dimensions(), (1800, 1200));
    assert_eq!(sheet.layout.cell_count(), 8);

    // Corner of the page is background
    assert_eq!(*sheet.image.get_pixel(0, 0), WHITE);
    // Center of the first cell is photo
    assert_eq!(*sheet.image.get_pixel(38 + 200, 57 + 260), PHOTO);
    // Center of the last cell is photo
    let x = 38 + 3 * (413 + 24) + 200;
    let y = 57 + (531 + 24) + 260;
    assert_eq!(*sheet.image.get_pixel(x, y), PHOTO);
}

#[test]
fn test_guides_drawn_just_outside_cells() {
    let options = SheetOptions::default();
    let sheet = render_sheet_image(&photo_tile(&options), &options).unwrap();
    let guide = Rgb(options.guides.color);

    // The dash pattern starts at the outer top-left corner of each cell
    assert_eq!(*sheet.image.get_pixel(37, 56), guide);
    // The cell's own top-left pixel is untouched
    assert_eq!(*sheet.image.get_pixel(38, 57), PHOTO);
}

#[test]
fn test_no_guides_when_disabled() {
    let mut options = SheetOptions::default();
    options.guides.enabled = false;
    let sheet = render_sheet_image(&photo_tile(&options), &options).unwrap();

    assert_eq!(*sheet.image.get_pixel(37, 56), WHITE);
    let guide = Rgb(options.guides.color);
    assert!(sheet.image.pixels().all(|p| *p != guide));
}

#[test]
fn test_source_resampled_to_cell() {
    let options = SheetOptions::default();
    let small = RgbImage::from_pixel(20, 30, PHOTO);
    let sheet = render_sheet_image(&small, &options).unwrap();
    assert_eq!(*sheet.image.get_pixel(38 + 200, 57 + 260), PHOTO);
}

#[test]
fn test_rerender_reuses_buffer_and_clears() {
    let options = SheetOptions::default();
    let page = options.page();
    let cell = options.cell();
    let tile = photo_tile(&options);

    let mut target = RgbImage::from_pixel(page.width_px, page.height_px, Rgb([0, 0, 0]));
    let layout = compute_layout_px(page, cell, 24, 24);
    render_sheet(&mut target, page, cell, &layout, &tile, None);
    assert_eq!(*target.get_pixel(0, 0), WHITE);

    // An empty layout leaves a blank page
    let empty = compute_layout_px(page, PhysicalSize::new(5000, 5000), 24, 24);
    render_sheet(&mut target, page, cell, &empty, &tile, Some(&GuideStyle::default()));
    assert!(target.pixels().all(|p| *p == WHITE));
}

#[test]
fn test_empty_source_rejected() {
    let options = SheetOptions::default();
    let result = render_sheet_image(&RgbImage::new(0, 0), &options);
    assert!(result.is_err());
}

#[tokio::test]
async fn test_generate_sheet_async() {
    let options = SheetOptions {
        page_size: PageSize::ThreeByFive,
        ..Default::default()
    };
    let sheet = generate_sheet(photo_tile(&options), &options).await.unwrap();
    assert_eq!(sheet.image.dimensions(), (1500, 900));
    assert_eq!(sheet.layout.columns, 3);
    assert_eq!(sheet.layout.rows, 1);
}

#[test]
fn test_rendering_is_deterministic() {
    let options = SheetOptions {
        photo_size: PhotoSize::ThreeByFour,
        ..Default::default()
    };
    let tile = RgbImage::from_fn(50, 70, |x, y| Rgb([(x * 5) as u8, (y * 3) as u8, 90]));

    let first = render_sheet_image(&tile, &options).unwrap();
    let second = render_sheet_image(&tile, &options).unwrap();
    assert_eq!(first.image, second.image);
    assert_eq!(first.layout, second.layout);
}
