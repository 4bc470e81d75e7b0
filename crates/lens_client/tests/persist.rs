use std::fs;

use lens_client::{ensure_output_dir, AtomicFileWriter, PersistError};
use tempfile::TempDir;

#[test]
fn nested_report_dir_is_created_on_first_write() {
    let temp = TempDir::new().unwrap();
    let reports = temp.path().join("out").join("reports");

    let saved = AtomicFileWriter::new(reports.clone())
        .write("analysis.xlsx", &[0x50, 0x4b, 0x03, 0x04])
        .unwrap();

    assert_eq!(saved, reports.join("analysis.xlsx"));
    assert_eq!(fs::read(&saved).unwrap(), [0x50, 0x4b, 0x03, 0x04]);
}

#[test]
fn downloading_twice_keeps_only_the_latest_bytes() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());

    writer.write("analysis.xlsx", b"old report").unwrap();
    let saved = writer.write("analysis.xlsx", b"new").unwrap();

    assert_eq!(fs::read(&saved).unwrap(), b"new");
    let leftovers: Vec<_> = fs::read_dir(temp.path()).unwrap().collect();
    assert_eq!(leftovers.len(), 1, "temp files must not linger");
}

#[test]
fn a_file_in_place_of_the_dir_is_rejected() {
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("reports");
    fs::write(&blocker, "not a directory").unwrap();

    assert!(matches!(
        ensure_output_dir(&blocker),
        Err(PersistError::NotADirectory(_))
    ));
    let result = AtomicFileWriter::new(blocker.clone()).write("analysis.xlsx", b"data");
    assert!(result.is_err());
    assert_eq!(fs::read_to_string(&blocker).unwrap(), "not a directory");
}
