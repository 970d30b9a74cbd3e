//! Extension writer tests
//!
//! Backup-on-overwrite, write order, and post-write validation against real
//! temporary directories.

use std::fs;

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use chrome_forge::output::DiffStatus;
use chrome_forge::{forge, ExtensionWriter};

fn writer_in(tmp: &TempDir) -> ExtensionWriter {
    ExtensionWriter::new(
        tmp.path().join("generated_extension"),
        tmp.path().join("generated_extension_backup"),
    )
}

#[test]
fn test_write_all_then_validate_clean() {
    let tmp = TempDir::new().unwrap();
    let writer = writer_in(&tmp);
    let out = forge("Block social media during work hours").unwrap();

    writer.prepare().unwrap();
    let report = writer.write_all(&out.manifest, &out.artifacts).unwrap();

    assert_eq!(
        report.written,
        vec!["manifest.json", "background.js", "rules.json"]
    );
    assert_eq!(writer.validate(), Vec::<String>::new());

    let on_disk = fs::read_to_string(writer.output_dir().join("manifest.json")).unwrap();
    assert_eq!(on_disk, out.manifest.to_json().unwrap());
}

#[test]
fn test_second_run_backs_up_first() {
    let tmp = TempDir::new().unwrap();
    let writer = writer_in(&tmp);

    let first = forge("Create an extension that shows a popup with today's date.").unwrap();
    writer.prepare().unwrap();
    writer.write_all(&first.manifest, &first.artifacts).unwrap();

    let second = forge("Extract all email addresses from the current webpage.").unwrap();
    let backup = writer.prepare().unwrap();
    assert_eq!(backup.as_deref(), Some(writer.backup_dir()));
    writer.write_all(&second.manifest, &second.artifacts).unwrap();

    assert!(writer.backup_dir().join("popup.html").exists());
    assert!(!writer.output_dir().join("popup.html").exists());
    assert!(writer.output_dir().join("content.js").exists());
    assert!(writer.validate().is_empty());
}

#[test]
fn test_clean_prepare_keeps_no_backup() {
    let tmp = TempDir::new().unwrap();
    let writer = writer_in(&tmp);
    fs::create_dir_all(writer.output_dir()).unwrap();
    fs::write(writer.output_dir().join("stale.js"), "// stale").unwrap();

    writer.prepare_clean().unwrap();

    assert!(writer.existing_files().is_empty());
    assert!(!writer.backup_dir().exists());
}

#[test]
fn test_deleted_artifact_is_reported() {
    let tmp = TempDir::new().unwrap();
    let writer = writer_in(&tmp);
    let out = forge("Make an extension that highlights all phone numbers on any website.").unwrap();

    writer.prepare().unwrap();
    writer.write_all(&out.manifest, &out.artifacts).unwrap();
    fs::remove_file(writer.output_dir().join("content.js")).unwrap();
    fs::remove_file(writer.output_dir().join("styles.css")).unwrap();

    assert_eq!(
        writer.validate(),
        vec![
            "Referenced content script not found: content.js".to_string(),
            "Referenced content stylesheet not found: styles.css".to_string(),
        ]
    );
}

#[test]
fn test_progress_callback_sees_every_file() {
    let tmp = TempDir::new().unwrap();
    let writer = writer_in(&tmp);
    let out = forge("Create an extension that shows a popup with today's date.").unwrap();

    let mut seen = Vec::new();
    writer
        .write_all_with(&out.manifest, &out.artifacts, |name| seen.push(name.to_string()))
        .unwrap();

    assert_eq!(
        seen,
        vec!["manifest.json", "popup.html", "popup.js", "styles.css"]
    );
}

#[test]
fn test_dry_run_preview_touches_nothing() {
    let tmp = TempDir::new().unwrap();
    let writer = writer_in(&tmp);
    let first = forge("Create an extension that shows a popup with today's date.").unwrap();
    writer.prepare().unwrap();
    writer.write_all(&first.manifest, &first.artifacts).unwrap();
    let before = writer.existing_files();

    let next = forge("Create a popup with the date and a refresh button.").unwrap();
    let diffs = writer.preview(&next.manifest, &next.artifacts).unwrap();

    assert_eq!(writer.existing_files(), before);
    let popup_js = diffs.iter().find(|d| d.name == "popup.js").unwrap();
    assert_eq!(popup_js.status, DiffStatus::Modified);
    assert!(popup_js.diff.contains("+  setInterval(updateDateTime, 1000);"));
}
