use crate::identity;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static TRACK_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*[\(\[]?(\d+)[\)\]]?[\s\-_:]*").expect("track number pattern")
});
static TITLE_AFTER_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\(\d+\)\s(.+)$").expect("title prefix pattern"));

/// One catalog entry. Immutable once built: reordering the catalog moves
/// whole entries around, it never rewrites them, so `id` stays a valid
/// name for this slot across sorts, inserts and removals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Song {
    number: usize,
    id: String,
    name: String,
    path: PathBuf,
}

impl Song {
    pub fn new(number: usize, name: &str, path: &Path) -> Self {
        let id = identity::generate(&format!("{number}{name}{}", path.display()));
        Self {
            number,
            id,
            name: name.to_string(),
            path: path.to_path_buf(),
        }
    }

    pub fn number(&self) -> usize {
        self.number
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Case-sensitive substring match on the display name.
    pub fn matches(&self, query: &str) -> bool {
        self.name.contains(query)
    }
}

/// Leading track number of a display name: optional bracket, digits,
/// optional bracket, trailing separators. `"(03) Track.mp3"` and
/// `"03 - Track.mp3"` both give 3; names without a leading numeral give 0.
pub fn track_number(name: &str) -> u32 {
    TRACK_NUMBER
        .captures(name)
        .and_then(|caps| caps[1].parse().ok())
        .unwrap_or(0)
}

/// Name-sort key: the remainder after a `"(NN) "` prefix, trimmed; the
/// whole trimmed name when no such prefix exists.
pub fn sort_title(name: &str) -> &str {
    TITLE_AFTER_PREFIX
        .captures(name)
        .and_then(|caps| caps.get(1))
        .map(|title| title.as_str().trim())
        .unwrap_or_else(|| name.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_is_deterministic_for_equal_tuples() {
        let a = Song::new(1, "01 Intro.mp3", Path::new("/music/01 Intro.mp3"));
        let b = Song::new(1, "01 Intro.mp3", Path::new("/music/01 Intro.mp3"));
        assert_eq!(a.id(), b.id());
    }

    #[test]
    fn identity_differs_when_any_field_differs() {
        let base = Song::new(1, "01 Intro.mp3", Path::new("/music/01 Intro.mp3"));
        let other_number = Song::new(2, "01 Intro.mp3", Path::new("/music/01 Intro.mp3"));
        let other_name = Song::new(1, "02 Intro.mp3", Path::new("/music/01 Intro.mp3"));
        let other_path = Song::new(1, "01 Intro.mp3", Path::new("/music/01 Intro(1).mp3"));
        assert_ne!(base.id(), other_number.id());
        assert_ne!(base.id(), other_name.id());
        assert_ne!(base.id(), other_path.id());
    }

    #[test]
    fn track_number_handles_common_shapes() {
        assert_eq!(track_number("(03) Track.mp3"), 3);
        assert_eq!(track_number("03 - Track.mp3"), 3);
        assert_eq!(track_number("[12] Track.mp3"), 12);
        assert_eq!(track_number("  7_Track.mp3"), 7);
        assert_eq!(track_number("9: Track.mp3"), 9);
    }

    #[test]
    fn track_number_defaults_to_zero() {
        assert_eq!(track_number("Track.mp3"), 0);
        assert_eq!(track_number(""), 0);
        assert_eq!(track_number("99999999999999999999 too big"), 0);
    }

    #[test]
    fn sort_title_strips_parenthesized_prefix() {
        assert_eq!(sort_title("(2) Beta.mp3"), "Beta.mp3");
        assert_eq!(sort_title("(10) Alpha.mp3"), "Alpha.mp3");
    }

    #[test]
    fn sort_title_keeps_unprefixed_names_trimmed() {
        assert_eq!(sort_title("  Gamma.mp3  "), "Gamma.mp3");
        assert_eq!(sort_title("[2] Beta.mp3"), "[2] Beta.mp3");
        assert_eq!(sort_title("(2)Beta.mp3"), "(2)Beta.mp3");
    }

    #[test]
    fn matches_is_case_sensitive_substring() {
        let song = Song::new(1, "01 Intro.mp3", Path::new("/music/01 Intro.mp3"));
        assert!(song.matches("Intro"));
        assert!(song.matches(""));
        assert!(!song.matches("intro"));
    }
}
