//! Object key generation for uploads.
//!
//! Keys have the form `<unix-millis>-<sanitized file name>`. The sanitized
//! name keeps ASCII letters, digits, `.`, `_` and `-`; every other run of
//! characters becomes a single `_`.

use std::sync::LazyLock;

use chrono::Utc;
use regex::Regex;

use crate::error::StorageError;

/// Fallback name when nothing usable is left after sanitizing.
const FALLBACK_NAME: &str = "upload";

/// Longest file-name part kept in a key, in bytes.
const MAX_NAME_LEN: usize = 100;

static UNSAFE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9._-]+").expect("valid regex"));

/// Reduce a client-supplied file name to a safe key component.
pub fn sanitize_file_name(name: &str) -> String {
    // Drop any directory part the client sent.
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let cleaned = UNSAFE_CHARS.replace_all(base, "_");
    let trimmed = cleaned.trim_matches(['.', '_']);
    if trimmed.is_empty() {
        return FALLBACK_NAME.to_string();
    }
    let mut end = trimmed.len().min(MAX_NAME_LEN);
    while !trimmed.is_char_boundary(end) {
        end -= 1;
    }
    trimmed[..end].to_string()
}

/// Key for an upload named `file_name` at `unix_millis`.
pub fn object_key_at(file_name: &str, unix_millis: i64) -> String {
    format!("{unix_millis}-{}", sanitize_file_name(file_name))
}

/// Key for an upload named `file_name`, stamped with the current time.
pub fn object_key_for(file_name: &str) -> String {
    object_key_at(file_name, Utc::now().timestamp_millis())
}

/// Reject keys that could escape a flat namespace.
pub fn check_key(key: &str) -> Result<(), StorageError> {
    let bad = key.is_empty()
        || key.starts_with('.')
        || key.contains('/')
        || key.contains('\\');
    if bad {
        return Err(StorageError::InvalidKey(key.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_prefixes_timestamp() {
        assert_eq!(object_key_at("photo.jpg", 1_700_000_000_000), "1700000000000-photo.jpg");
    }

    #[test]
    fn unsafe_characters_are_collapsed() {
        assert_eq!(sanitize_file_name("my summer photo (1).JPG"), "my_summer_photo_1_.JPG");
        assert_eq!(sanitize_file_name("fútbol.png"), "f_tbol.png");
    }

    #[test]
    fn directory_parts_are_dropped() {
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name(r"C:\Users\me\pic.png"), "pic.png");
    }

    #[test]
    fn empty_names_fall_back() {
        assert_eq!(sanitize_file_name(""), "upload");
        assert_eq!(sanitize_file_name("..."), "upload");
        assert_eq!(sanitize_file_name("???"), "upload");
    }

    #[test]
    fn long_names_are_truncated() {
        let name = format!("{}.png", "a".repeat(300));
        assert_eq!(sanitize_file_name(&name).len(), MAX_NAME_LEN);
    }

    #[test]
    fn generated_keys_pass_the_key_check() {
        for name in ["a.png", "../x", "", "ü ö ä.gif"] {
            assert!(check_key(&object_key_for(name)).is_ok());
        }
        assert!(check_key("../secret").is_err());
        assert!(check_key("a/b").is_err());
        assert!(check_key(".hidden").is_err());
    }
}
