use std::fmt::{self, Display, Formatter};

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Section key reserved for free-form comment lines.
pub const COMMENT_SECTION: &str = "";

/// One RouterOS menu path and the command lines issued under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Menu path such as `/ip pool`, or `""` for top-level comments.
    pub key: String,
    /// Command lines in issue order.
    pub lines: Vec<String>,
}

impl Section {
    /// Create a section with no lines.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            lines: Vec::new(),
        }
    }
}

/// A section-keyed RouterOS configuration document.
///
/// Sections keep the order in which they were first introduced and a key
/// never appears twice: every mutation goes through a keyed accessor that
/// reuses an existing section before creating a new one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouterConfig {
    sections: Vec<Section>,
}

impl RouterConfig {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document from `(key, lines)` pairs.
    ///
    /// Repeated keys are folded into the first occurrence, so the result
    /// holds the same lines as pushing every pair in turn.
    pub fn from_sections<K, L, S>(sections: impl IntoIterator<Item = (K, L)>) -> Self
    where
        K: Into<String>,
        L: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut doc = Self::new();
        for (key, lines) in sections {
            doc.extend(key, lines);
        }
        doc
    }

    /// Number of sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// True when the document holds no sections at all.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Total number of lines across every section.
    pub fn line_count(&self) -> usize {
        self.sections.iter().map(|s| s.lines.len()).sum()
    }

    /// True when `key` is present (even with no lines).
    pub fn contains(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Lines of the section named `key`.
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.position(key)
            .map(|idx| self.sections[idx].lines.as_slice())
    }

    /// Section keys in document order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.key.as_str())
    }

    /// Sections in document order.
    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    /// Get or create the section named `key`, appending it when missing.
    pub fn ensure_section(&mut self, key: &str) -> &mut Vec<String> {
        let idx = match self.position(key) {
            Some(idx) => idx,
            None => {
                self.sections.push(Section::new(key));
                self.sections.len() - 1
            }
        };
        &mut self.sections[idx].lines
    }

    /// Append one line to `key`.
    pub fn push(&mut self, key: impl Into<String>, line: impl Into<String>) {
        let key = key.into();
        self.ensure_section(&key).push(line.into());
    }

    /// Append several lines to `key`, creating the section even when
    /// `lines` is empty.
    pub fn extend<S: Into<String>>(
        &mut self,
        key: impl Into<String>,
        lines: impl IntoIterator<Item = S>,
    ) {
        let key = key.into();
        self.ensure_section(&key)
            .extend(lines.into_iter().map(Into::into));
    }

    /// Prepend lines to `key`.
    ///
    /// A missing section is created at the front of the document so that
    /// header blocks render before everything else.
    pub fn unshift<S: Into<String>>(
        &mut self,
        key: impl Into<String>,
        lines: impl IntoIterator<Item = S>,
    ) {
        let key = key.into();
        let head: Vec<String> = lines.into_iter().map(Into::into).collect();
        match self.position(&key) {
            Some(idx) => {
                self.sections[idx].lines.splice(0..0, head);
            }
            None => self.sections.insert(
                0,
                Section {
                    key,
                    lines: head,
                },
            ),
        }
    }

    /// Apply `f` to the line list of every section, keeping keys and order.
    pub fn map_sections(mut self, mut f: impl FnMut(&str, Vec<String>) -> Vec<String>) -> Self {
        for section in &mut self.sections {
            let lines = std::mem::take(&mut section.lines);
            section.lines = f(&section.key, lines);
        }
        self
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.key == key)
    }
}

impl<'a> IntoIterator for &'a RouterConfig {
    type Item = &'a Section;
    type IntoIter = std::slice::Iter<'a, Section>;

    fn into_iter(self) -> Self::IntoIter {
        self.sections.iter()
    }
}

impl Serialize for RouterConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.sections.len()))?;
        for section in &self.sections {
            map.serialize_entry(&section.key, &section.lines)?;
        }
        map.end()
    }
}

impl Display for RouterConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::writer::render_script(self))
    }
}
