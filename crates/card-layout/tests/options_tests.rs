use card_layout::*;

#[test]
fn test_defaults_are_a4_and_id1() {
    let options = LayoutOptions::default();
    assert_eq!(options.page_width_mm, 210.0);
    assert_eq!(options.page_height_mm, 297.0);
    assert_eq!(options.card_width_mm, 85.6);
    assert_eq!(options.card_height_mm, 54.0);
    assert_eq!(options.gap_mm, 10.0);
    assert!(options.validate().is_ok());
}

#[test]
fn test_validation_rejects_non_positive_lengths() {
    let mut options = LayoutOptions::default();
    options.card_width_mm = 0.0;
    match options.validate() {
        Err(LayoutError::Config(msg)) => assert!(msg.contains("card width")),
        other => panic!("Expected Config error, got {:?}", other),
    }

    let mut options = LayoutOptions::default();
    options.page_height_mm = f32::NAN;
    assert!(options.validate().is_err());

    let mut options = LayoutOptions::default();
    options.gap_mm = -1.0;
    assert!(options.validate().is_err());
}

#[test]
fn test_validation_rejects_cards_that_do_not_fit() {
    let mut options = LayoutOptions::default();
    options.card_width_mm = 220.0;
    assert!(options.validate().is_err());

    // A 110mm tall page cannot hold two cards plus the gap
    let mut options = LayoutOptions::default();
    options.page_width_mm = 210.0;
    options.page_height_mm = 110.0;
    assert!(options.validate().is_err());

    options.gap_mm = 0.0;
    assert!(options.validate().is_ok());
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_save_and_load_options() {
    use tempfile::NamedTempFile;

    let mut options = LayoutOptions::default();
    options.gap_mm = 6.5;
    options.page_width_mm = 215.9;
    options.page_height_mm = 279.4;

    let temp_file = NamedTempFile::new().unwrap();
    let path = temp_file.path();

    options.save(path).await.unwrap();
    let loaded = LayoutOptions::load(path).await.unwrap();

    assert_eq!(options, loaded);
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_load_fills_missing_fields_with_defaults() {
    let temp_file = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(temp_file.path(), r#"{ "gap_mm": 4.0 }"#).unwrap();

    let loaded = LayoutOptions::load(temp_file.path()).await.unwrap();
    assert_eq!(loaded.gap_mm, 4.0);
    assert_eq!(loaded.card_width_mm, 85.6);
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_load_rejects_invalid_config() {
    let temp_file = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(temp_file.path(), r#"{ "card_height_mm": 200.0 }"#).unwrap();

    let result = LayoutOptions::load(temp_file.path()).await;
    assert!(matches!(result, Err(LayoutError::Config(_))));
}
