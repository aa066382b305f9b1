use super::*;
use crate::foundation::error::ArtError;

#[test]
fn only_templates_are_on_the_intensity_scale() {
    assert!(SourceDescriptor::Template("heart".into()).is_template());
    assert!(!SourceDescriptor::Text("hi".into()).is_template());
    assert!(!SourceDescriptor::Image(PathBuf::from("a.png")).is_template());
}

#[test]
fn describe_uses_file_name_only() {
    let d = SourceDescriptor::Image(PathBuf::from("some/dir/skull.png"));
    assert_eq!(d.describe(), "Image: skull.png");
    assert_eq!(
        SourceDescriptor::Text("HIRE ME".into()).describe(),
        "Text: 'HIRE ME'"
    );
    assert_eq!(
        SourceDescriptor::Template("heart".into()).describe(),
        "Template: heart"
    );
}

#[test]
fn template_source_uses_values_directly() {
    let reg = TemplateRegistry::builtin();
    let settings = Settings::default();
    let renderer = SourceRenderer::new(&reg, &settings);

    let grid = renderer
        .render(&SourceDescriptor::Template("heart".into()))
        .unwrap();
    assert_eq!((grid.width(), grid.height()), (7, 7));
    assert_eq!(grid.get(1, 1), Some(4));
    assert_eq!(grid.get(0, 0), Some(0));
}

#[test]
fn unknown_template_is_not_found() {
    let reg = TemplateRegistry::builtin();
    let settings = Settings::default();
    let renderer = SourceRenderer::new(&reg, &settings);
    let err = renderer
        .render(&SourceDescriptor::Template("nope".into()))
        .unwrap_err();
    assert!(matches!(err, ArtError::NotFound(_)));
}

#[test]
fn missing_image_is_input_error() {
    let reg = TemplateRegistry::new();
    let settings = Settings::default();
    let renderer = SourceRenderer::new(&reg, &settings);
    let err = renderer
        .render(&SourceDescriptor::Image(PathBuf::from("missing.png")))
        .unwrap_err();
    assert!(matches!(err, ArtError::Input(_)));
}

#[test]
fn text_without_any_font_is_render_error() {
    let reg = TemplateRegistry::new();
    let settings = Settings {
        font_paths: vec![PathBuf::from("missing/font.ttf")],
        allow_system_font_fallback: false,
        ..Settings::default()
    };
    let renderer = SourceRenderer::new(&reg, &settings);
    let err = renderer
        .render(&SourceDescriptor::Text("HI".into()))
        .unwrap_err();
    assert!(matches!(err, ArtError::Render(_)));
}

#[test]
fn empty_text_needs_no_font() {
    let reg = TemplateRegistry::new();
    let settings = Settings {
        font_paths: vec![],
        allow_system_font_fallback: false,
        ..Settings::default()
    };
    let renderer = SourceRenderer::new(&reg, &settings);
    let grid = renderer
        .render(&SourceDescriptor::Text(String::new()))
        .unwrap();
    assert_eq!((grid.width(), grid.height()), (4, 4));
    assert!(grid.as_slice().iter().all(|&v| v == 255));
}

#[test]
fn huge_margin_on_empty_text_is_render_error() {
    let reg = TemplateRegistry::new();
    let settings = Settings {
        text_margin: u32::MAX / 2 + 1,
        ..Settings::default()
    };
    let renderer = SourceRenderer::new(&reg, &settings);
    let err = renderer
        .render(&SourceDescriptor::Text(String::new()))
        .unwrap_err();
    assert!(matches!(err, ArtError::Render(_)));
}
