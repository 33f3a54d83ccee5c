use redpen_settings::{ReviewSettings, SettingsStore};
use tempfile::tempdir;

#[test]
fn missing_file_loads_defaults_without_creating_it() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    let store = SettingsStore::load(&path).unwrap();
    assert_eq!(store.settings(), &ReviewSettings::default());
    assert!(!path.exists());
}

#[test]
fn update_persists_and_reloads() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("settings.json");

    let mut store = SettingsStore::load(&path).unwrap();
    store
        .update(|settings| {
            settings.highlight_suspicious = true;
            settings.font_size = 20;
        })
        .unwrap();

    let reloaded = SettingsStore::load(&path).unwrap();
    assert!(reloaded.settings().highlight_suspicious);
    assert_eq!(reloaded.settings().font_size, 20);
}

#[test]
fn load_sanitizes_out_of_range_values() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, r#"{"font_size": 500, "font_family": ""}"#).unwrap();

    let store = SettingsStore::load(&path).unwrap();
    assert_eq!(store.settings().font_size, 72);
    assert_eq!(store.settings().font_family, "monospace");
}

#[test]
fn corrupt_file_is_a_parse_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, "not json").unwrap();
    assert!(SettingsStore::load(&path).is_err());
}

#[test]
fn export_import_round_trip_with_backup() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    let exported = dir.path().join("exported.json");

    let mut store = SettingsStore::load(&path).unwrap();
    store
        .update(|settings| settings.highlight_suspicious = true)
        .unwrap();
    store.export_to(&exported).unwrap();

    store
        .update(|settings| settings.highlight_suspicious = false)
        .unwrap();
    store.import_from(&exported).unwrap();
    assert!(store.settings().highlight_suspicious);
    assert!(path.with_extension("bak").exists());
}
