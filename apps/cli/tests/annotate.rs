use assert_cmd::Command;
use predicates::prelude::*;

const MIXED: &str = "Он посмотрел на небо.\nSubscribe to our channel for updates\nНаступила тишина.\nподпишитесь на канал";

fn cli() -> Command {
    Command::cargo_bin("redpen-cli").unwrap()
}

#[test]
fn default_render_marks_suspicious_and_collapses_clean_lines() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("chapter.txt");
    std::fs::write(&file, MIXED).unwrap();

    cli()
        .arg("--workspace")
        .arg(dir.path())
        .arg("annotate")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "! [latin,source-spam] Subscribe to our channel for updates",
        ))
        .stdout(predicate::str::contains("! [target-spam] подпишитесь на канал"))
        .stdout(predicate::str::contains("clean lines hidden"))
        .stdout(predicate::str::contains("Он посмотрел на небо.").not());
}

#[test]
fn show_clean_prints_every_line() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("chapter.txt");
    std::fs::write(&file, MIXED).unwrap();

    cli()
        .arg("--workspace")
        .arg(dir.path())
        .arg("annotate")
        .arg("--show-clean")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Он посмотрел на небо."))
        .stdout(predicate::str::contains("clean lines hidden").not());
}

#[test]
fn no_highlight_renders_plain_text() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("chapter.txt");
    std::fs::write(&file, MIXED).unwrap();

    cli()
        .arg("--workspace")
        .arg(dir.path())
        .arg("annotate")
        .arg("--no-highlight")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("!").not())
        .stdout(predicate::str::contains("Subscribe to our channel for updates"))
        .stdout(predicate::str::contains("Он посмотрел на небо."));
}

#[test]
fn both_widget_models_render_identically() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("chapter.txt");
    std::fs::write(&file, MIXED).unwrap();

    let line = cli()
        .arg("--workspace")
        .arg(dir.path())
        .arg("annotate")
        .arg("--widget")
        .arg("line")
        .arg(&file)
        .output()
        .unwrap();
    let span = cli()
        .arg("--workspace")
        .arg(dir.path())
        .arg("annotate")
        .arg("--widget")
        .arg("span")
        .arg(&file)
        .output()
        .unwrap();

    assert!(line.status.success());
    assert!(span.status.success());
    assert_eq!(line.stdout, span.stdout);
}

#[test]
fn missing_file_reports_an_error() {
    let dir = tempfile::tempdir().unwrap();

    cli()
        .arg("--workspace")
        .arg(dir.path())
        .arg("annotate")
        .arg(dir.path().join("no-such-file.txt"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("failed to read"));
}
