use crate::error::{Result, VmtError};
use regex::Regex;
use std::path::Path;

/// Compiled ignore patterns.
///
/// Each pattern is a regular expression anchored at the start of the
/// candidate's stem but not at its end, so `.*_bump` excludes both
/// `wall_bump` and `wall_bump_old`.
#[derive(Debug, Clone, Default)]
pub struct IgnoreMatcher {
    patterns: Vec<(String, Regex)>,
}

impl IgnoreMatcher {
    /// Compiles `patterns`, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns `VmtError::InvalidPattern` for the first pattern that doesn't compile.
    pub fn new<I, S>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|pattern| {
                let pattern = pattern.as_ref();
                Regex::new(&format!("^(?:{pattern})"))
                    .map(|regex| (pattern.to_string(), regex))
                    .map_err(|source| VmtError::InvalidPattern {
                        pattern: pattern.to_string(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    /// Returns the first pattern matching `stem`, if any
    #[must_use]
    pub fn matching_pattern(&self, stem: &Path) -> Option<&str> {
        let stem = stem.to_string_lossy();
        self.patterns
            .iter()
            .find(|(_, regex)| regex.is_match(&stem))
            .map(|(pattern, _)| pattern.as_str())
    }

    #[must_use]
    pub fn is_ignored(&self, stem: &Path) -> bool {
        self.matching_pattern(stem).is_some()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_matcher_ignores_nothing() {
        let matcher = IgnoreMatcher::new(Vec::<String>::new()).unwrap();
        assert!(matcher.is_empty());
        assert!(!matcher.is_ignored(Path::new("materials/wall")));
    }

    #[test]
    fn test_prefix_anchored_match() {
        let matcher = IgnoreMatcher::new([".*_bump"]).unwrap();
        assert!(matcher.is_ignored(Path::new("materials/wall_bump")));
        assert!(matcher.is_ignored(Path::new("materials/wall_bump_old")));
        assert!(!matcher.is_ignored(Path::new("materials/wall")));
    }

    #[test]
    fn test_match_must_start_at_beginning() {
        let matcher = IgnoreMatcher::new(["wall"]).unwrap();
        assert!(matcher.is_ignored(Path::new("wall_a")));
        assert!(!matcher.is_ignored(Path::new("materials/wall_a")));
    }

    #[test]
    fn test_alternation_stays_anchored() {
        let matcher = IgnoreMatcher::new(["a|b"]).unwrap();
        assert!(matcher.is_ignored(Path::new("b_texture")));
        assert!(!matcher.is_ignored(Path::new("xb_texture")));
    }

    #[test]
    fn test_union_of_patterns() {
        let matcher = IgnoreMatcher::new([".*_a", ".*_bump", ".*_bm", ".*_editor"]).unwrap();
        assert_eq!(
            matcher.matching_pattern(Path::new("disp/rock_bm")),
            Some(".*_bm")
        );
        assert!(matcher.is_ignored(Path::new("disp/rock_editor")));
        assert!(!matcher.is_ignored(Path::new("disp/rock")));
    }

    #[test]
    fn test_is_deterministic() {
        let matcher = IgnoreMatcher::new([".*_bump"]).unwrap();
        let path = Path::new("wall_bump");
        assert_eq!(matcher.is_ignored(path), matcher.is_ignored(path));
    }

    #[test]
    fn test_invalid_pattern_fails_fast() {
        let result = IgnoreMatcher::new([".*_ok", "(unclosed"]);
        match result {
            Err(VmtError::InvalidPattern { pattern, .. }) => assert_eq!(pattern, "(unclosed"),
            other => panic!("expected InvalidPattern, got {other:?}"),
        }
    }
}
