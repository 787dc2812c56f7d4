use super::*;

#[test]
fn test_defaults() {
    let settings = Settings::default();
    assert_eq!(settings.theme, Theme::Light);
    assert!(settings.autosave_enabled);
    assert_eq!(settings.autosave_interval, 30);
}

#[test]
fn test_theme_toggle_and_parse() {
    assert_eq!(Theme::Light.toggled(), Theme::Dark);
    assert_eq!(Theme::Dark.toggled(), Theme::Light);
    assert_eq!(Theme::parse(" dark "), Some(Theme::Dark));
    assert_eq!(Theme::parse("light"), Some(Theme::Light));
    assert_eq!(Theme::parse("solarized"), None);
    assert_eq!(Theme::Dark.as_str(), "dark");
}

#[test]
fn test_deserialize_partial_uses_field_defaults() {
    let settings: Settings = serde_json::from_str(r#"{"theme":"dark"}"#).unwrap();
    assert_eq!(settings.theme, Theme::Dark);
    assert!(settings.autosave_enabled);
    assert_eq!(settings.autosave_interval, 30);
}

#[test]
fn test_serialize_is_camel_case() {
    let settings = Settings {
        theme: Theme::Dark,
        autosave_enabled: false,
        autosave_interval: 10,
    };
    let value = serde_json::to_value(&settings).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "theme": "dark",
            "autosaveEnabled": false,
            "autosaveInterval": 10
        })
    );
}

#[test]
fn test_normalized_clamps_interval() {
    let low = Settings {
        autosave_interval: 0,
        ..Settings::default()
    };
    assert_eq!(low.normalized().autosave_interval, 5);

    let high = Settings {
        autosave_interval: 10_000,
        ..Settings::default()
    };
    assert_eq!(high.normalized().autosave_interval, 300);
}
