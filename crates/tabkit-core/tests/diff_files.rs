use std::fs;
use std::path::PathBuf;
use tabkit_core::{file_diff, file_diff_report, file_lines, Error, NO_DIFFERENCES};

fn write(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn identical_files() {
    let dir = tempfile::tempdir().unwrap();
    let a = write(&dir, "a.txt", "alpha\nbeta\n");
    let b = write(&dir, "b.txt", "alpha\nbeta\n");

    assert_eq!(file_diff(&a, &b).unwrap(), None);
    assert_eq!(file_diff_report(&a, &b).unwrap(), NO_DIFFERENCES);
}

#[test]
fn line_endings_do_not_count_as_differences() {
    let dir = tempfile::tempdir().unwrap();
    let a = write(&dir, "unix.txt", "one\ntwo\n");
    let b = write(&dir, "dos.txt", "one\r\ntwo\r\n");

    assert_eq!(file_lines(&b).unwrap(), vec!["one", "two"]);
    assert_eq!(file_diff_report(&a, &b).unwrap(), "No differences\n");
}

#[test]
fn bare_carriage_returns_end_lines() {
    let dir = tempfile::tempdir().unwrap();
    let a = write(&dir, "a.txt", "one\rtwo\r");
    let b = write(&dir, "b.txt", "one\rtwX\r");

    assert_eq!(file_lines(&a).unwrap(), vec!["one", "two"]);
    assert_eq!(file_diff(&a, &b).unwrap(), Some((1, 2)));
    assert_eq!(file_diff_report(&a, &b).unwrap(), "Line 1:\ntwo\n==^\ntwX\n");
}

#[test]
fn mixed_line_endings_compare_equal() {
    let dir = tempfile::tempdir().unwrap();
    let a = write(&dir, "mixed.txt", "one\rtwo\r\nthree\nfour");
    let b = write(&dir, "unix.txt", "one\ntwo\nthree\nfour\n");

    assert_eq!(file_lines(&a).unwrap(), vec!["one", "two", "three", "four"]);
    assert_eq!(file_diff_report(&a, &b).unwrap(), NO_DIFFERENCES);
}

#[test]
fn report_points_at_first_difference() {
    let dir = tempfile::tempdir().unwrap();
    let a = write(&dir, "a.txt", "same\nabcde\nlater\n");
    let b = write(&dir, "b.txt", "same\nabXde\nother\n");

    assert_eq!(file_diff(&a, &b).unwrap(), Some((1, 2)));
    assert_eq!(file_diff_report(&a, &b).unwrap(), "Line 1:\nabcde\n==^\nabXde\n");
}

#[test]
fn report_on_extra_trailing_line() {
    let dir = tempfile::tempdir().unwrap();
    let a = write(&dir, "a.txt", "x\n");
    let b = write(&dir, "b.txt", "x\ny\n");

    assert_eq!(file_diff(&a, &b).unwrap(), Some((1, 0)));
    assert_eq!(file_diff_report(&a, &b).unwrap(), "Line 1:\n\n^\ny\n");
}

#[test]
fn empty_file_against_non_empty() {
    let dir = tempfile::tempdir().unwrap();
    let a = write(&dir, "empty.txt", "");
    let b = write(&dir, "one.txt", "hello\n");

    assert_eq!(file_diff_report(&a, &b).unwrap(), "Line 0:\n\n^\nhello\n");
}

#[test]
fn unreadable_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let a = write(&dir, "a.txt", "x\n");

    let err = file_diff_report(&a, dir.path().join("missing.txt")).unwrap_err();
    assert!(matches!(err, Error::FileRead { .. }));
}
