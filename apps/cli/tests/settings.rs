use assert_cmd::Command;
use predicates::prelude::*;

fn cli() -> Command {
    Command::cargo_bin("redpen-cli").unwrap()
}

#[test]
fn show_prints_defaults_without_creating_a_file() {
    let dir = tempfile::tempdir().unwrap();

    cli()
        .arg("--workspace")
        .arg(dir.path())
        .args(["settings", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"font_size\": 16"))
        .stdout(predicate::str::contains("\"hide_clean\": true"));

    assert!(!dir.path().join(".redpen").join("settings.json").exists());
}

#[test]
fn export_then_import_round_trips_edited_settings() {
    let dir = tempfile::tempdir().unwrap();
    let exported = dir.path().join("settings-export.json");

    cli()
        .arg("--workspace")
        .arg(dir.path())
        .args(["settings", "export", "--output"])
        .arg(&exported)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported settings to"));

    let contents = std::fs::read_to_string(&exported).unwrap();
    let edited = contents
        .replace("\"font_size\": 16", "\"font_size\": 20")
        .replace("\"hide_clean\": true", "\"hide_clean\": false");
    std::fs::write(&exported, edited).unwrap();

    cli()
        .arg("--workspace")
        .arg(dir.path())
        .args(["settings", "import"])
        .arg(&exported)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported settings from"));

    cli()
        .arg("--workspace")
        .arg(dir.path())
        .args(["settings", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"font_size\": 20"))
        .stdout(predicate::str::contains("\"hide_clean\": false"));
}

#[test]
fn import_sanitizes_out_of_range_values() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("bad-settings.json");
    std::fs::write(&source, r#"{ "font_size": 500, "line_height_percent": 5 }"#).unwrap();

    cli()
        .arg("--workspace")
        .arg(dir.path())
        .args(["settings", "import"])
        .arg(&source)
        .assert()
        .success();

    cli()
        .arg("--workspace")
        .arg(dir.path())
        .args(["settings", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"font_size\": 72"))
        .stdout(predicate::str::contains("\"line_height_percent\": 100"));
}

#[test]
fn import_of_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();

    cli()
        .arg("--workspace")
        .arg(dir.path())
        .args(["settings", "import"])
        .arg(dir.path().join("missing.json"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn import_backs_up_an_existing_settings_file() {
    let dir = tempfile::tempdir().unwrap();
    let settings_dir = dir.path().join(".redpen");
    std::fs::create_dir_all(&settings_dir).unwrap();
    std::fs::write(
        settings_dir.join("settings.json"),
        r#"{ "font_size": 14 }"#,
    )
    .unwrap();

    let source = dir.path().join("incoming.json");
    std::fs::write(&source, r#"{ "font_size": 18 }"#).unwrap();

    cli()
        .arg("--workspace")
        .arg(dir.path())
        .args(["settings", "import"])
        .arg(&source)
        .assert()
        .success();

    assert!(settings_dir.join("settings.bak").exists());
    let saved = std::fs::read_to_string(settings_dir.join("settings.json")).unwrap();
    assert!(saved.contains("\"font_size\": 18"));
}
