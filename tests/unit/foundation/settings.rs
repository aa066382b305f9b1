use super::*;

#[test]
fn defaults_validate() {
    let s = Settings::default();
    s.validate().unwrap();
    assert_eq!(s.font_size, 8.0);
    assert_eq!(s.branch, "contribution");
}

#[test]
fn partial_document_keeps_defaults() {
    let s: Settings = serde_json::from_str(r#"{ "branch": "art" }"#).unwrap();
    assert_eq!(s.branch, "art");
    assert_eq!(s.text_margin, Settings::default().text_margin);
}

#[test]
fn from_path_rejects_bad_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");

    std::fs::write(&path, r#"{ "font_size": 0 }"#).unwrap();
    assert!(matches!(
        Settings::from_path(&path),
        Err(ArtError::Validation(_))
    ));

    std::fs::write(&path, "not json").unwrap();
    assert!(matches!(Settings::from_path(&path), Err(ArtError::Serde(_))));

    std::fs::write(&path, r#"{ "quick_preview_weeks": 8 }"#).unwrap();
    assert_eq!(Settings::from_path(&path).unwrap().quick_preview_weeks, 8);
}

#[test]
fn text_margin_is_bounded_by_raster_limit() {
    let mut s = Settings {
        text_margin: MAX_RASTER_DIM / 2,
        ..Settings::default()
    };
    s.validate().unwrap();

    for margin in [MAX_RASTER_DIM / 2 + 1, 60_000, u32::MAX] {
        s.text_margin = margin;
        assert!(matches!(s.validate(), Err(ArtError::Validation(_))), "margin {margin}");
    }
}
