//! Tests for loading combobox configuration from disk.

use std::io::Write;

use horizon_select::{ConfigError, OptionId, SelectConfig, SelectEvent, SelectOption};

const TEAM: &str = r#"
multiple = true
placeholder = "Assign people"
value = [1]

[[options]]
id = 1
name = "Alice"

[[options]]
id = 2
name = "Bob"

[[options]]
id = 3
name = "Carol"
status = "paused"
"#;

#[test]
fn test_load_and_build() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(TEAM.as_bytes()).unwrap();

    let config = SelectConfig::load(file.path()).unwrap();
    assert!(config.multiple);
    assert_eq!(config.value, vec![OptionId(1)]);

    let mut select = config.build().unwrap();
    assert!(select.is_multiple());
    assert_eq!(select.placeholder(), "Assign people");
    assert_eq!(select.chips().len(), 1);

    select.handle_event(SelectEvent::InputChanged("o".to_string()));
    assert_eq!(select.filtered().len(), 2);
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = SelectConfig::load(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn test_save_and_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("select.toml");

    let config = SelectConfig {
        options: vec![
            SelectOption::new(7, "Dana").with_detail("dana@example.com"),
            SelectOption::new(8, "Eve").paused(),
        ],
        value: vec![OptionId(7)],
        ..Default::default()
    };
    std::fs::write(&path, config.to_toml_string().unwrap()).unwrap();

    let reloaded = SelectConfig::load(&path).unwrap();
    assert_eq!(reloaded, config);

    let select = reloaded.build().unwrap();
    let single = select.as_single().unwrap();
    assert_eq!(single.input_text(), "Dana");
}

#[test]
fn test_invalid_config_rejected_on_build() {
    let config = SelectConfig::from_toml_str(
        r#"
        value = [4]

        [[options]]
        id = 1
        name = "Alice"
        "#,
    )
    .unwrap();
    assert!(matches!(
        config.build(),
        Err(ConfigError::UnknownValueId(OptionId(4)))
    ));
}
