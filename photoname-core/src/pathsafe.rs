//! File name validation, sanitization and collision-free path generation.
//!
//! Everything here except the `unique_path*` helpers is pure string handling.
//! The rules are the union of what Windows, macOS and Linux reject, so a name
//! that passes [`validate`] can be created on any of them.

use std::path::{Path, PathBuf};

/// Characters rejected in file names on at least one supported platform.
const FORBIDDEN_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Windows device names. Matched against the stem, case-insensitively.
const RESERVED_NAMES: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Name substituted when sanitizing leaves nothing behind.
pub const PLACEHOLDER_NAME: &str = "unnamed";

/// Longest file name (in bytes) most filesystems accept.
pub const MAX_NAME_LEN: usize = 255;

const IMAGE_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "webp", "bmp", "tiff", "tif", "heic", "heif",
];

fn is_forbidden(c: char) -> bool {
    (c as u32) < 0x20 || FORBIDDEN_CHARS.contains(&c)
}

/// Split a file name into stem and extension (extension keeps its dot).
///
/// Leading dots belong to the stem, so `.hidden` has no extension.
pub fn split_extension(name: &str) -> (&str, &str) {
    let leading = name.len() - name.trim_start_matches('.').len();
    match name[leading..].rfind('.') {
        Some(pos) => name.split_at(leading + pos),
        None => (name, ""),
    }
}

fn is_reserved(name: &str) -> bool {
    let (stem, _) = split_extension(name);
    RESERVED_NAMES
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(stem))
}

/// Check whether `name` is usable as a file name on every supported platform.
pub fn validate(name: &str) -> bool {
    !name.chars().any(is_forbidden) && !is_reserved(name)
}

/// Sanitize with the default `_` replacement.
pub fn sanitize(name: &str) -> String {
    sanitize_with(name, '_')
}

/// Replace every forbidden character with `replacement`, trim surrounding
/// spaces and dots, and fall back to [`PLACEHOLDER_NAME`] if nothing is left.
///
/// Reserved device names are prefixed with `replacement` so the result
/// always passes [`validate`] (given a permitted replacement).
pub fn sanitize_with(name: &str, replacement: char) -> String {
    let replaced: String = name
        .chars()
        .map(|c| if is_forbidden(c) { replacement } else { c })
        .collect();

    let trimmed = replaced.trim_matches(|c| c == ' ' || c == '.');
    if trimmed.is_empty() {
        return PLACEHOLDER_NAME.to_string();
    }

    if is_reserved(trimmed) {
        format!("{replacement}{trimmed}")
    } else {
        trimmed.to_string()
    }
}

/// Shorten `name` to at most `max_len` bytes, keeping its extension and
/// marking the cut with `...`. Names that already fit are returned as-is.
pub fn truncate_name(name: &str, max_len: usize) -> String {
    if name.len() <= max_len {
        return name.to_string();
    }

    let (stem, ext) = split_extension(name);
    let budget = max_len.saturating_sub(ext.len() + 3);

    let mut end = 0;
    for (idx, c) in stem.char_indices() {
        if idx + c.len_utf8() > budget {
            break;
        }
        end = idx + c.len_utf8();
    }

    format!("{}...{}", &stem[..end], ext)
}

/// Return `candidate` if nothing exists there, otherwise the first free
/// `stem (n).ext` sibling.
pub fn unique_path(candidate: &Path) -> PathBuf {
    unique_path_by(candidate, Path::exists)
}

/// Like [`unique_path`], but with a caller-supplied notion of "taken".
pub fn unique_path_by<F>(candidate: &Path, mut is_taken: F) -> PathBuf
where
    F: FnMut(&Path) -> bool,
{
    if !is_taken(candidate) {
        return candidate.to_path_buf();
    }

    let name = candidate
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let (stem, ext) = split_extension(&name);
    let parent = candidate.parent().unwrap_or_else(|| Path::new(""));

    let mut counter: u64 = 1;
    loop {
        let next = parent.join(format!("{stem} ({counter}){ext}"));
        if !is_taken(&next) {
            return next;
        }
        counter += 1;
    }
}

/// Whether `path` has one of the recognised image extensions.
pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}
