use crate::error::{Result, VmtError};
use crate::fs_utils::read_file_contents;
use std::fmt;
use std::path::PathBuf;

/// Placeholder bound to each candidate's stem
pub const FILENAME_KEYWORD: &str = "filename";

/// Immutable template text holding `<keyword>` placeholders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template(String);

impl Template {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Keyword to replacement mapping, applied in insertion order.
///
/// Keywords are stored without angle brackets. Inserting an existing
/// keyword replaces its value but keeps its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubstitutionMap {
    entries: Vec<(String, String)>,
}

impl SubstitutionMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, keyword: impl Into<String>, replacement: impl Into<String>) {
        let keyword = keyword.into();
        let replacement = replacement.into();
        match self.entries.iter_mut().find(|(k, _)| *k == keyword) {
            Some(entry) => entry.1 = replacement,
            None => self.entries.push((keyword, replacement)),
        }
    }

    #[must_use]
    pub fn get(&self, keyword: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == keyword)
            .map(|(_, v)| v.as_str())
    }

    /// Whether the reserved `filename` keyword was overridden.
    /// Allowed, but every descriptor in the batch will then be identical.
    #[must_use]
    pub fn overrides_filename(&self) -> bool {
        self.get(FILENAME_KEYWORD).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SubstitutionMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

/// Expands `template` for one candidate.
///
/// Every `<keyword>` from `substitutions` is replaced in map order, then
/// every `<filename>` is replaced with `filename`. Replacements may
/// themselves contain `<filename>` (e.g. `bumpmap:<filename>_bump`).
/// Unknown placeholders are left in the output untouched.
#[must_use]
pub fn expand(template: &Template, substitutions: &SubstitutionMap, filename: &str) -> String {
    let mut text = template.as_str().to_string();
    for (keyword, replacement) in substitutions.iter() {
        text = text.replace(&format!("<{keyword}>"), replacement);
    }
    text.replace(&format!("<{FILENAME_KEYWORD}>"), filename)
}

/// Parses a CLI `keyword:replacement` entry.
///
/// Exactly one `:` is required, so replacement text can't contain colons.
/// Angle brackets around the keyword are optional.
///
/// # Errors
///
/// Returns `VmtError::InvalidSubstitution` if the colon count is wrong or
/// the keyword is empty.
pub fn parse_substitution(entry: &str) -> Result<(String, String)> {
    let invalid = |reason: &str| VmtError::InvalidSubstitution {
        entry: entry.to_string(),
        reason: reason.to_string(),
    };

    let mut parts = entry.split(':');
    let (Some(keyword), Some(replacement), None) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(invalid("expected KEYWORD:REPLACEMENT with exactly one ':'"));
    };

    let keyword = keyword.trim_start_matches('<').trim_end_matches('>');
    if keyword.is_empty() {
        return Err(invalid("keyword is empty"));
    }

    Ok((keyword.to_string(), replacement.to_string()))
}

/// Where the template text comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    /// Template text given directly, for library use
    Literal(String),
    /// Template read from a file
    File(PathBuf),
}

impl TemplateSource {
    /// Builds a source from a string that is either a path or literal text
    pub fn from_parts(path_or_literal: impl Into<String>, is_path: bool) -> Self {
        let value = path_or_literal.into();
        if is_path {
            Self::File(PathBuf::from(value))
        } else {
            Self::Literal(value)
        }
    }

    /// Loads the template. Called once per batch, before any candidate.
    ///
    /// # Errors
    ///
    /// - `VmtError::FileNotFound` if the template file is missing.
    /// - `VmtError::Io` if the file can't be read as UTF-8 text.
    pub fn load(&self) -> Result<Template> {
        match self {
            Self::Literal(text) => Ok(Template::new(text.clone())),
            Self::File(path) => read_file_contents(path).map(Template::new),
        }
    }
}
