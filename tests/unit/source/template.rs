use super::*;

#[test]
fn builtin_registry_has_expected_names() {
    let reg = TemplateRegistry::builtin();
    let names: Vec<_> = reg.names().collect();
    assert_eq!(names, vec!["checkmark", "diamond", "heart", "skull", "smile"]);
    assert_eq!(reg.get("smile").unwrap().height(), 8);
    assert_eq!(reg.get("skull").unwrap().width(), 8);
}

#[test]
fn lookup_is_case_sensitive_and_lists_names() {
    let reg = TemplateRegistry::builtin();
    assert!(reg.lookup("heart").is_ok());

    let err = reg.lookup("Heart").unwrap_err();
    assert!(matches!(err, ArtError::NotFound(_)));
    let msg = err.to_string();
    for name in ["checkmark", "diamond", "heart", "skull", "smile"] {
        assert!(msg.contains(name), "missing '{name}' in: {msg}");
    }
}

#[test]
fn pattern_rejects_ragged_rows_and_out_of_range_values() {
    assert!(TemplatePattern::new(vec![vec![0, 1], vec![2]]).is_err());
    assert!(TemplatePattern::new(vec![vec![0, 5]]).is_err());
    let p = TemplatePattern::new(vec![vec![0, 4], vec![3, 1]]).unwrap();
    let raw = p.to_raw_grid().unwrap();
    assert_eq!(raw.get(0, 1), Some(3));
}

#[test]
fn import_merges_and_overwrites_by_name() {
    let mut reg = TemplateRegistry::builtin();
    let doc = r#"{ "heart": [[1, 1]], "bar": [[4, 4, 4]] }"#;
    let n = reg.import_reader(doc.as_bytes()).unwrap();
    assert_eq!(n, 2);
    assert_eq!(reg.len(), 6);
    assert_eq!(reg.get("heart").unwrap().rows(), &[vec![1u8, 1]]);
    assert_eq!(reg.get("bar").unwrap().rows(), &[vec![4u8, 4, 4]]);
    assert!(reg.get("skull").is_some());
}

#[test]
fn failed_import_leaves_registry_untouched() {
    let mut reg = TemplateRegistry::builtin();
    let before = reg.clone();

    // One valid entry followed by one invalid value: nothing may be merged.
    let doc = r#"{ "aaa": [[1]], "zzz": [[9]] }"#;
    assert!(matches!(
        reg.import_reader(doc.as_bytes()),
        Err(ArtError::Validation(_))
    ));
    assert_eq!(reg, before);

    let doc = r#"{ "neg": [[-1]] }"#;
    assert!(reg.import_reader(doc.as_bytes()).is_err());
    assert_eq!(reg, before);

    let doc = r#"[[1, 2]]"#;
    assert!(matches!(
        reg.import_reader(doc.as_bytes()),
        Err(ArtError::Serde(_))
    ));
    assert_eq!(reg, before);
}

#[test]
fn export_then_import_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("templates.json");

    let mut reg = TemplateRegistry::builtin();
    reg.insert(
        "stripe",
        TemplatePattern::new(vec![vec![1, 2, 3, 4]; 9]).unwrap(),
    );
    reg.export_json(&path).unwrap();

    let mut fresh = TemplateRegistry::new();
    assert_eq!(fresh.import_json(&path).unwrap(), reg.len());
    assert_eq!(fresh, reg);
}

#[test]
fn import_missing_file_is_input_error() {
    let mut reg = TemplateRegistry::new();
    let err = reg
        .import_json(Path::new("does/not/exist.json"))
        .unwrap_err();
    assert!(matches!(err, ArtError::Input(_)));
    assert!(reg.is_empty());
}
