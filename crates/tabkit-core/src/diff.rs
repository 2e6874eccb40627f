//! First-difference text diff
//!
//! Locates the first point where two lines, or two sequences of lines,
//! diverge and renders it as a short caret report. Positions are zero-based
//! and count characters, not bytes. `None` means the inputs are identical.

use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// Report returned by [`file_diff_report`] for identical files
pub const NO_DIFFERENCES: &str = "No differences\n";

/// Index of the first character where `a` and `b` differ.
///
/// When one string is a prefix of the other, the length of the shorter one
/// is returned. `None` when the strings are identical.
pub fn first_diff_index(a: &str, b: &str) -> Option<usize> {
    let mut a_chars = a.chars();
    let mut b_chars = b.chars();
    let mut idx = 0;

    loop {
        match (a_chars.next(), b_chars.next()) {
            (None, None) => return None,
            (Some(ca), Some(cb)) if ca == cb => idx += 1,
            _ => return Some(idx),
        }
    }
}

/// Three-line block showing `a`, a caret under column `idx`, and `b`.
///
/// Returns an empty string when either line contains `\n` or `\r`, or when
/// `idx` is past the end of the shorter line.
pub fn format_diff(a: &str, b: &str, idx: usize) -> String {
    if is_multiline(a) || is_multiline(b) {
        return String::new();
    }

    if idx > a.chars().count().min(b.chars().count()) {
        return String::new();
    }

    format!("{a}\n{}^\n{b}\n", "=".repeat(idx))
}

fn is_multiline(line: &str) -> bool {
    line.contains(['\n', '\r'])
}

/// `(line, char)` position of the first difference between two sequences of
/// lines.
///
/// If every shared line matches but one sequence is longer, the difference is
/// reported at `(shorter_len, 0)`. `None` when the sequences are identical.
pub fn first_diff_line<A, B>(lines_a: &[A], lines_b: &[B]) -> Option<(usize, usize)>
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    let common = lines_a
        .iter()
        .zip(lines_b)
        .enumerate()
        .find_map(|(line_idx, (a, b))| {
            first_diff_index(a.as_ref(), b.as_ref()).map(|char_idx| (line_idx, char_idx))
        });

    match common {
        Some(pos) => Some(pos),
        None if lines_a.len() != lines_b.len() => Some((lines_a.len().min(lines_b.len()), 0)),
        None => None,
    }
}

/// Read a file as lines. `\n`, `\r\n` and a bare `\r` all end a line and
/// none of them is kept; a final terminator does not start an extra line.
pub fn file_lines<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(split_lines(&content))
}

/// Split text on any line terminator
pub fn split_lines(text: &str) -> Vec<String> {
    text.replace("\r\n", "\n")
        .split_terminator(['\n', '\r'])
        .map(str::to_string)
        .collect()
}

/// Position of the first difference between two files, see [`first_diff_line`]
pub fn file_diff<P: AsRef<Path>, Q: AsRef<Path>>(path_a: P, path_b: Q) -> Result<Option<(usize, usize)>> {
    let lines_a = file_lines(path_a)?;
    let lines_b = file_lines(path_b)?;
    Ok(first_diff_line(&lines_a, &lines_b))
}

/// Human-readable report of the first difference between two files.
///
/// Either [`NO_DIFFERENCES`] or `"Line {n}:\n"` followed by the
/// [`format_diff`] block for the differing lines. A line missing from the
/// shorter file is shown as empty.
pub fn file_diff_report<P: AsRef<Path>, Q: AsRef<Path>>(path_a: P, path_b: Q) -> Result<String> {
    let lines_a = file_lines(path_a)?;
    let lines_b = file_lines(path_b)?;

    Ok(diff_report(&lines_a, &lines_b))
}

/// Report for two in-memory sequences of lines
pub fn diff_report<A: AsRef<str>, B: AsRef<str>>(lines_a: &[A], lines_b: &[B]) -> String {
    match first_diff_line(lines_a, lines_b) {
        None => NO_DIFFERENCES.to_string(),
        Some((line_idx, char_idx)) => {
            let a = lines_a.get(line_idx).map(|l| l.as_ref()).unwrap_or("");
            let b = lines_b.get(line_idx).map(|l| l.as_ref()).unwrap_or("");
            format!("Line {line_idx}:\n{}", format_diff(a, b, char_idx))
        }
    }
}
