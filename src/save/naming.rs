//! Filename generation and sanitization.

use std::path::{Path, PathBuf};

/// Stem used when a title sanitizes down to nothing.
const FALLBACK_STEM: &str = "video";

/// Upper bound on `_N` suffixes tried when the target name is taken.
pub(crate) const MAX_UNIQUE_ATTEMPTS: u32 = 1000;

/// Byte budget for a whole file name, well under the common 255-byte limit.
const MAX_NAME_BYTES: usize = 200;

/// Room kept for the largest `_N` suffix (`_1000`).
const SUFFIX_RESERVE: usize = 5;

/// Build the suggested filename for a video: `"<title>.<extension>"`.
pub fn suggested_filename(title: &str, extension: &str) -> String {
    format!("{}.{}", title, extension)
}

/// Turn an arbitrary suggested filename into a single safe path component.
///
/// Everything after the last dot is the extension and is kept. The stem is
/// cleaned on its own: path separators, reserved and control characters
/// become `_`, it is cut to fit the name budget on a char boundary, trailing
/// dots are dropped, `..` runs are collapsed so the name cannot climb out of
/// its directory, and an empty stem is replaced with `video`.
pub fn sanitize_filename(name: &str) -> String {
    let (stem, extension) = match name.rfind('.') {
        Some(pos) => (&name[..pos], replace_reserved(&name[pos + 1..])),
        None => (name, String::new()),
    };
    let extension = extension.trim();

    let budget = MAX_NAME_BYTES.saturating_sub(extension.len() + 1 + SUFFIX_RESERVE);
    let replaced = replace_reserved(stem);

    // Windows drops trailing dots and spaces silently
    let mut cleaned = truncate_at_char_boundary(&replaced, budget)
        .trim()
        .trim_end_matches('.')
        .trim_end()
        .to_string();
    while cleaned.contains("..") {
        cleaned = cleaned.replace("..", "_");
    }

    let stem = if cleaned.is_empty() {
        FALLBACK_STEM
    } else {
        cleaned.as_str()
    };

    if extension.is_empty() {
        stem.to_string()
    } else {
        format!("{}.{}", stem, extension)
    }
}

fn replace_reserved(value: &str) -> String {
    value
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

fn truncate_at_char_boundary(value: &str, max_bytes: usize) -> &str {
    if value.len() <= max_bytes {
        return value;
    }

    let mut end = max_bytes;
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    &value[..end]
}

/// The `counter`-th candidate for `path`: the path itself for 0, otherwise
/// `stem_N.ext` next to it.
pub fn numbered_filename(path: &Path, counter: u32) -> PathBuf {
    if counter == 0 {
        return path.to_path_buf();
    }

    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let parent = path.parent().unwrap_or(Path::new("."));

    let new_name = if ext.is_empty() {
        format!("{}_{}", stem, counter)
    } else {
        format!("{}_{}.{}", stem, counter, ext)
    };

    parent.join(new_name)
}
