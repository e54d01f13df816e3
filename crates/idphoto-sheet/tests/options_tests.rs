use idphoto_sheet::*;

#[test]
fn test_default_options() {
    let options = SheetOptions::default();
    assert_eq!(options.page_size, PageSize::FourBySix);
    assert_eq!(options.orientation, Orientation::Landscape);
    assert_eq!(options.photo_size, PhotoSize::Passport);
    assert_eq!(options.margin_px(), 24);
    assert_eq!(options.gap_px(), 24);
    assert_eq!(options.jpeg_quality, 95);
    assert!(options.guides.enabled);
    assert!(options.validate().is_ok());
}

#[test]
fn test_validate_rejects_bad_values() {
    let bad = [
        SheetOptions {
            gap_mm: f32::NAN,
            ..Default::default()
        },
        SheetOptions {
            jpeg_quality: 0,
            ..Default::default()
        },
        SheetOptions {
            photo_size: PhotoSize::Custom {
                width_mm: 0.0,
                height_mm: 40.0,
            },
            ..Default::default()
        },
        SheetOptions {
            page_size: PageSize::Custom {
                width_mm: 100.0,
                height_mm: 0.0,
            },
            ..Default::default()
        },
    ];
    for options in bad {
        assert!(options.validate().is_err(), "{:?}", options);
    }
}

#[tokio::test]
async fn test_save_and_load_options() {
    use tempfile::NamedTempFile;

    let options = SheetOptions {
        page_size: PageSize::ThreeByFive,
        orientation: Orientation::Portrait,
        photo_size: PhotoSize::Square,
        margin_mm: 3.0,
        gap_mm: 1.5,
        jpeg_quality: 80,
        ..Default::default()
    };

    let temp_file = NamedTempFile::new().unwrap();
    let path = temp_file.path();

    options.save(path).await.unwrap();
    let loaded = SheetOptions::load(path).await.unwrap();
    assert_eq!(loaded, options);
}

#[tokio::test]
async fn test_partial_config_uses_defaults() {
    use tempfile::NamedTempFile;

    let temp_file = NamedTempFile::new().unwrap();
    tokio::fs::write(temp_file.path(), r#"{ "photo_size": "FiveBySeven" }"#)
        .await
        .unwrap();

    let loaded = SheetOptions::load(temp_file.path()).await.unwrap();
    assert_eq!(loaded.photo_size, PhotoSize::FiveBySeven);
    assert_eq!(loaded.page_size, PageSize::FourBySix);
}

#[tokio::test]
async fn test_invalid_config_rejected() {
    use tempfile::NamedTempFile;

    let temp_file = NamedTempFile::new().unwrap();
    tokio::fs::write(temp_file.path(), r#"{ "jpeg_quality": 0 }"#)
        .await
        .unwrap();
    assert!(SheetOptions::load(temp_file.path()).await.is_err());

    tokio::fs::write(temp_file.path(), "not json").await.unwrap();
    let err = SheetOptions::load(temp_file.path()).await.unwrap_err();
    assert!(matches!(err, SheetError::Config(_)));
}
