use std::fs;

use sheets_engine::{AtomicFileWriter, PersistError};
use tempfile::TempDir;

#[test]
fn creates_missing_output_dir() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("rendered").join("abc");
    assert!(!new_dir.exists());

    let written = AtomicFileWriter::new(new_dir.clone())
        .write("sheet-0.html", b"<!DOCTYPE html>")
        .unwrap();
    assert!(new_dir.is_dir());
    assert_eq!(written, new_dir.join("sheet-0.html"));
}

#[test]
fn rendered_sheet_replaces_previous_version() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());

    let first = writer.write("sheet-0.html", b"<!DOCTYPE html>\nold").unwrap();
    assert_eq!(first.file_name().unwrap(), "sheet-0.html");
    assert_eq!(fs::read(&first).unwrap(), b"<!DOCTYPE html>\nold");

    let second = writer.write("sheet-0.html", b"<!DOCTYPE html>\nnew").unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read(&second).unwrap(), b"<!DOCTYPE html>\nnew");
    // Only the target remains; the temp file was renamed onto it.
    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 1);
}

#[test]
fn file_in_place_of_directory_is_rejected() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let err = AtomicFileWriter::new(file_path.clone())
        .write("sheet.html", b"data")
        .unwrap_err();
    assert!(matches!(err, PersistError::NotADirectory(_)), "{err}");
    assert!(!file_path.with_file_name("sheet.html").exists());
}
