/*
    SmartSave

    Copyright 2022-2025 Daniel Balsom

    Permission is hereby granted, free of charge, to any person obtaining a
    copy of this software and associated documentation files (the “Software”),
    to deal in the Software without restriction, including without limitation
    the rights to use, copy, modify, merge, publish, distribute, sublicense,
    and/or sell copies of the Software, and to permit persons to whom the
    Software is furnished to do so, subject to the following conditions:

    The above copyright notice and this permission notice shall be included in
    all copies or substantial portions of the Software.

    THE SOFTWARE IS PROVIDED “AS IS”, WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
    IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
    FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
    AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
    LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
    FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
    DEALINGS IN THE SOFTWARE.

    --------------------------------------------------------------------------

    smartsave_core::src/path.rs

    Filename and path routines used to version scene files.
*/

use std::path::{Component, Path, PathBuf};

/// Collect every ASCII digit in `s`, in order, and return them as a number.
/// Non-digit characters are skipped. A string without digits yields 0.
/// Digit runs too long to fit saturate at [u32::MAX].
pub fn extract_num(s: &str) -> u32 {
    s.chars()
        .filter(char::is_ascii_digit)
        .fold(0u32, |acc, c| {
            acc.saturating_mul(10)
                .saturating_add(c.to_digit(10).unwrap_or(0))
        })
}

/// Return the highest number found among the files in `file_names` that belong to `descriptor`.
///
/// Only the part of each name before the first '.' is considered. That part is split on '_', and
/// the file belongs to `descriptor` if it has at least two tokens and one of them is exactly
/// `descriptor`. Every token of a matching file is run through [extract_num], not just the version
/// token, so a descriptor that carries digits of its own (`v2ship`) takes part in the maximum.
///
/// Returns `None` if no file belongs to `descriptor`.
pub fn highest_version<I, S>(file_names: I, descriptor: &str) -> Option<u32>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut highest: Option<u32> = None;

    for name in file_names {
        let stem = name.as_ref().split('.').next().unwrap_or("");
        let tokens: Vec<&str> = stem.split('_').collect();

        if tokens.len() < 2 || !tokens.contains(&descriptor) {
            continue;
        }

        for token in tokens {
            let num = extract_num(token);
            highest = Some(highest.map_or(num, |h| h.max(num)));
        }
    }

    log::debug!("highest_version(): descriptor '{}' -> {:?}", descriptor, highest);
    highest
}

/// The version to use after the highest existing one. Starts at 1 when there is none.
pub fn next_version(highest: Option<u32>) -> u32 {
    match highest {
        Some(v) => v.saturating_add(1),
        None => 1,
    }
}

/// Lexically normalize a path: drop '.' components and fold '..' into the preceding component
/// where there is one. The filesystem is never consulted.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                // Can't climb above the root.
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Normalize `raw` and split it into its parent directory and its file name.
/// Either half may be empty.
pub fn split_path(raw: &str) -> (PathBuf, String) {
    let normalized = normalize_path(Path::new(raw));

    let file_name = normalized
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let parent = normalized.parent().map(Path::to_path_buf).unwrap_or_default();

    (parent, file_name)
}
