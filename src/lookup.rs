//! Identifier validation and output naming.
//!
//! Before encoding, an identifier can be checked against an external
//! catalogue that also supplies a display title. The title names the
//! output image. The crate ships two lookups that need no network.

use std::collections::HashMap;

use crate::codec::is_encodable;

/// Longest file stem derived from a title
pub const MAX_FILE_STEM: usize = 20;

/// Answer from a [`TitleLookup`]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LookupResult {
    /// Whether the identifier is known to the catalogue
    pub valid: bool,
    /// Display title, when the catalogue has one
    pub title: Option<String>,
}

impl LookupResult {
    /// Output file name for `id`: the sanitized title if present, else the id
    pub fn file_name(&self, id: &str) -> String {
        output_file_name(self.title.as_deref().unwrap_or(id))
    }
}

/// Catalogue consulted before encoding
pub trait TitleLookup {
    /// Validate `id` and fetch its title
    fn lookup(&self, id: &str) -> LookupResult;
}

/// Accepts any non-empty encodable identifier; never has a title.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineLookup;

impl TitleLookup for OfflineLookup {
    fn lookup(&self, id: &str) -> LookupResult {
        LookupResult {
            valid: !id.is_empty() && id.chars().all(is_encodable),
            title: None,
        }
    }
}

/// Fixed table of known identifiers and their titles
#[derive(Debug, Clone, Default)]
pub struct StaticLookup {
    titles: HashMap<String, String>,
}

impl StaticLookup {
    /// Empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry
    pub fn insert(&mut self, id: impl Into<String>, title: impl Into<String>) {
        self.titles.insert(id.into(), title.into());
    }
}

impl<I: Into<String>, T: Into<String>> FromIterator<(I, T)> for StaticLookup {
    fn from_iter<It: IntoIterator<Item = (I, T)>>(iter: It) -> Self {
        let mut lookup = Self::new();
        for (id, title) in iter {
            lookup.insert(id, title);
        }
        lookup
    }
}

impl TitleLookup for StaticLookup {
    fn lookup(&self, id: &str) -> LookupResult {
        match self.titles.get(id) {
            Some(title) => LookupResult {
                valid: true,
                title: Some(title.clone()),
            },
            None => LookupResult::default(),
        }
    }
}

/// `.png` file name from a title: every character outside `[A-Za-z0-9]`
/// becomes `_`, then the stem is cut to [`MAX_FILE_STEM`] characters.
pub fn output_file_name(title: &str) -> String {
    let stem: String = title
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .take(MAX_FILE_STEM)
        .collect();
    format!("{stem}.png")
}
