//! Batch coordination: input collection, ordering, and skip checks.

use crate::constants::INPUT_EXTENSION;
use crate::error::{Error, Result};
use std::cmp::Ordering;
use std::ffi::OsStr;
use std::iter::Peekable;
use std::path::{Path, PathBuf};

/// Result of checking whether a file should be processed.
#[derive(Debug, PartialEq, Eq)]
pub enum ProcessCheck {
    /// File should be processed.
    Process,
    /// Skip - output file already exists.
    SkipExists,
}

/// Collect `*.mp3` files from a directory in natural sort order.
///
/// Natural ordering compares digit runs numerically, so `ep2.mp3` sorts
/// before `ep10.mp3`. The order is stable across runs.
pub fn collect_input_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(std::result::Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case(OsStr::new(INPUT_EXTENSION)))
        })
        .collect();

    if files.is_empty() {
        return Err(Error::NoInputFiles {
            dir: dir.to_path_buf(),
        });
    }

    files.sort_by(|a, b| natural_cmp(&a.to_string_lossy(), &b.to_string_lossy()));
    Ok(files)
}

/// Output path for a trimmed file: same basename, new directory.
pub fn output_path_for(input: &Path, output_dir: &Path) -> PathBuf {
    let name = input.file_name().map_or_else(
        || std::borrow::Cow::Borrowed("output"),
        |n| n.to_string_lossy(),
    );
    output_dir.join(name.as_ref())
}

/// Check whether an input should be processed or skipped.
///
/// Existing outputs are never overwritten; in dry-run mode nothing is
/// written, so nothing can collide.
pub fn should_process(input: &Path, output_dir: Option<&Path>, dry_run: bool) -> ProcessCheck {
    if dry_run {
        return ProcessCheck::Process;
    }
    match output_dir {
        Some(dir) if output_path_for(input, dir).exists() => ProcessCheck::SkipExists,
        _ => ProcessCheck::Process,
    }
}

/// Compare strings the way a human reads them: digit runs as numbers,
/// everything else character by character.
fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut ca = a.chars().peekable();
    let mut cb = b.chars().peekable();

    loop {
        match (ca.peek().copied(), cb.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) if x.is_ascii_digit() && y.is_ascii_digit() => {
                match take_number(&mut ca).cmp(&take_number(&mut cb)) {
                    Ordering::Equal => {}
                    ord => return ord,
                }
            }
            (Some(x), Some(y)) => match x.cmp(&y) {
                Ordering::Equal => {
                    ca.next();
                    cb.next();
                }
                ord => return ord,
            },
        }
    }
}

/// Consume a run of ASCII digits and return its numeric value.
fn take_number(chars: &mut Peekable<std::str::Chars<'_>>) -> u128 {
    let mut value: u128 = 0;
    while let Some(digit) = chars.peek().and_then(|c| c.to_digit(10)) {
        value = value
            .saturating_mul(10)
            .saturating_add(u128::from(digit));
        chars.next();
    }
    value
}
