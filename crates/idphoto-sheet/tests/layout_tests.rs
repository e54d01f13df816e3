use idphoto_sheet::layout::{GridPosition, cell_rect};
use idphoto_sheet::*;

#[test]
fn test_passport_on_landscape_4x6() {
    let page = PageSize::FourBySix.size_with_orientation(Orientation::Landscape);
    let cell = PhotoSize::Passport.cell_size();
    let layout = compute_layout_px(page, cell, 24, 24);

    assert_eq!((page.width_px, page.height_px), (1800, 1200));
    assert_eq!((cell.width_px, cell.height_px), (413, 531));
    assert_eq!(layout.columns, 4);
    assert_eq!(layout.rows, 2);
    assert_eq!(layout.total_width(), 1724);
    assert_eq!(layout.origin_x, 38.0);
    assert_eq!(layout.origin_y, 57.0);
}

#[test]
fn test_portrait_fits_fewer_passports() {
    let options = SheetOptions {
        orientation: Orientation::Portrait,
        ..Default::default()
    };
    let layout = compute_layout_px(options.page(), options.cell(), 24, 24);

    // 1200 wide: (1200 - 48) / 437 = 2 columns, 1800 high: (1800 - 48) / 555 = 3 rows
    assert_eq!(layout.columns, 2);
    assert_eq!(layout.rows, 3);
}

#[test]
fn test_grid_stays_inside_margins() {
    for page_size in PageSize::ALL {
        for orientation in [Orientation::Portrait, Orientation::Landscape] {
            for photo_size in PhotoSize::ALL {
                let page = page_size.size_with_orientation(orientation);
                let cell = photo_size.cell_size();
                let layout = compute_layout(page, cell, 2.0, 2.0);
                if layout.is_empty() {
                    continue;
                }

                let first = cell_rect(&layout, GridPosition::new(0, 0));
                let last = cell_rect(&layout, GridPosition::new(layout.rows - 1, layout.columns - 1));
                let margin = layout.margin_px as f32;
                assert!(first.x >= margin - 0.5, "{:?} on {:?}", photo_size, page_size);
                assert!(first.y >= margin - 0.5);
                assert!(last.right() <= page.width_px as f32 - margin + 0.5);
                assert!(last.bottom() <= page.height_px as f32 - margin + 0.5);

                // Centered: equal space on both sides
                let left = first.x;
                let right = page.width_px as f32 - last.right();
                assert!((left - right).abs() < 0.01);
            }
        }
    }
}

#[test]
fn test_five_by_seven_on_3x5_does_not_fit_landscape() {
    let page = PageSize::ThreeByFive.size_with_orientation(Orientation::Landscape);
    let cell = PhotoSize::FiveBySeven.cell_size();
    let layout = compute_layout(page, cell, 2.0, 2.0);

    // 827px tall cell on a 900px page with 24px margins: 852 available
    assert_eq!(layout.rows, 1);
    assert!(layout.columns >= 1);
}

#[test]
fn test_empty_layout_when_cell_too_large() {
    let page = PhysicalSize::new(300, 300);
    let cell = PhysicalSize::new(400, 100);
    let layout = compute_layout_px(page, cell, 0, 0);

    assert_eq!(layout.columns, 0);
    assert!(layout.is_empty());
    assert_eq!(layout.positions().count(), 0);
}
