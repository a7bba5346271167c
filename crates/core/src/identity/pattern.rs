//! Identifier embedded in a file name as `[#<id>]` right before the extension.

use std::sync::LazyLock;

use regex::Regex;

use crate::store::ContentId;

static ID_SUFFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[#([0-9]+)\]$").expect("static regex"));

/// Split a file name into stem and extension, keeping the leading `.` on the
/// extension. Dotfiles such as `.profile` have no extension.
pub fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(i) if i > 0 => name.split_at(i),
        _ => (name, ""),
    }
}

/// Identifier embedded in `name`, if any.
///
/// Digits that do not fit an identifier are treated as no match.
pub fn id_from_file_name(name: &str) -> Option<ContentId> {
    let (stem, _) = split_extension(name);
    let caps = ID_SUFFIX.captures(stem)?;
    caps[1].parse().ok()
}

/// Whether `name` already carries an embedded identifier that
/// [`id_from_file_name`] can read back.
pub fn has_embedded_id(name: &str) -> bool {
    id_from_file_name(name).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_split_extension() {
        assert_eq!(split_extension("photo.jpg"), ("photo", ".jpg"));
        assert_eq!(split_extension("archive.tar.gz"), ("archive.tar", ".gz"));
        assert_eq!(split_extension("README"), ("README", ""));
        assert_eq!(split_extension(".profile"), (".profile", ""));
    }

    #[test]
    fn test_id_before_extension() {
        assert_eq!(id_from_file_name("photo_[#42].jpg"), Some(ContentId(42)));
        assert_eq!(id_from_file_name("notes_[#7]"), Some(ContentId(7)));
        assert_eq!(id_from_file_name("[#3].txt"), Some(ContentId(3)));
    }

    #[test]
    fn test_no_id() {
        assert_eq!(id_from_file_name("photo.jpg"), None);
        assert_eq!(id_from_file_name("photo_[#42]_edit.jpg"), None);
        assert_eq!(id_from_file_name("photo_[#].jpg"), None);
        assert_eq!(id_from_file_name("photo_[42].jpg"), None);
        assert_eq!(id_from_file_name("photo_[#99999999999999999999].jpg"), None);
    }

    #[test]
    fn test_has_embedded_id() {
        assert!(has_embedded_id("a_[#1].bin"));
        assert!(!has_embedded_id("a_[#1]x.bin"));
    }

    #[test]
    fn test_unreadable_tags_are_not_embedded_ids() {
        for name in ["song_[#\u{0663}].txt", "song_[#99999999999999999999].txt", "song_[#\u{0661}2].txt"] {
            assert_eq!(id_from_file_name(name), None, "{name}");
            assert!(!has_embedded_id(name), "{name}");
        }
    }

    proptest! {
        #[test]
        fn prop_has_embedded_id_agrees_with_reader(name in "[a-z_\\[\\]#0-9\u{0660}-\u{0669}.]{0,24}") {
            prop_assert_eq!(has_embedded_id(&name), id_from_file_name(&name).is_some());
        }
    }
}
