use idphoto_sheet::*;

#[test]
fn test_page_catalog() {
    let four_by_six = PageSize::FourBySix.size_with_orientation(Orientation::Landscape);
    assert_eq!((four_by_six.width_px, four_by_six.height_px), (1800, 1200));

    let three_by_five = PageSize::ThreeByFive.size_with_orientation(Orientation::Landscape);
    assert_eq!((three_by_five.width_px, three_by_five.height_px), (1500, 900));

    let portrait = PageSize::FourBySix.size_with_orientation(Orientation::Portrait);
    assert_eq!((portrait.width_px, portrait.height_px), (1200, 1800));
}

#[test]
fn test_photo_catalog() {
    let expected = [
        (PhotoSize::Passport, "3.5x4.5", (413, 531)),
        (PhotoSize::ThreeByFour, "3x4", (354, 472)),
        (PhotoSize::Square, "5x5", (591, 591)),
        (PhotoSize::FiveBySeven, "5x7", (591, 827)),
    ];
    for (size, key, (w, h)) in expected {
        assert_eq!(size.key(), key);
        let cell = size.cell_size();
        assert_eq!((cell.width_px, cell.height_px), (w, h), "{}", key);
        assert_eq!(PhotoSize::from_key(key), Some(size));
    }
}

#[test]
fn test_keys_round_trip_for_pages() {
    for page in PageSize::ALL {
        assert_eq!(PageSize::from_key(&page.key()), Some(page));
    }
    assert_eq!(PageSize::from_key("A4"), None);
}

#[test]
fn test_custom_page_is_portrait_normalized() {
    let page = PageSize::Custom {
        width_mm: 150.0,
        height_mm: 100.0,
    };
    let portrait = page.portrait_size();
    assert!(portrait.width_px <= portrait.height_px);
    assert_eq!(page.key(), "150x100mm");
}

#[test]
fn test_unit_conversion() {
    assert_eq!(constants::mm_to_px(25.4), 300);
    assert_eq!(constants::inches_to_px(4.0), 1200);
    assert_eq!(constants::mm_to_px(-3.0), 0);
}

#[test]
fn test_aspect_ratio() {
    assert!((PhotoSize::Square.aspect_ratio() - 1.0).abs() < f32::EPSILON);
    assert!((PhotoSize::Passport.aspect_ratio() - 413.0 / 531.0).abs() < 1e-6);
    assert_eq!(PhysicalSize::new(10, 0).aspect_ratio(), 1.0);
}
