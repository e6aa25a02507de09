//! Paths from the archive root down to an entry.

use crate::name::{parse_name, NameError, ParsedName};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An ordered sequence of segment names. The empty path is the root
/// container.
///
/// Segments are opaque: only the terminal one is ever decoded, and the
/// client forwards paths to the store unmodified.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArchivePath(Vec<String>);

impl ArchivePath {
    /// The root container.
    #[must_use]
    pub const fn root() -> Self {
        Self(Vec::new())
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    #[must_use]
    pub fn into_segments(self) -> Vec<String> {
        self.0
    }

    /// Returns a new path addressing `segment` inside this one.
    #[must_use]
    pub fn join(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }

    /// The enclosing container, or `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        let (_, parent) = self.0.split_last()?;
        Some(Self(parent.to_vec()))
    }

    /// The segment naming the addressed entry, or `None` for the root.
    #[must_use]
    pub fn terminal(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// Decodes the terminal segment.
    pub fn terminal_name(&self) -> Option<std::result::Result<ParsedName, NameError>> {
        self.terminal().map(parse_name)
    }

    /// Whether this path names a container: the root always does, any other
    /// path does when its terminal segment decodes to kind container. The
    /// last component decides, so a bare `container` segment counts too.
    #[must_use]
    pub fn addresses_container(&self) -> bool {
        match self.terminal_name() {
            None => true,
            Some(Ok(name)) => name.is_container(),
            Some(Err(_)) => false,
        }
    }
}

impl From<Vec<String>> for ArchivePath {
    fn from(segments: Vec<String>) -> Self {
        Self(segments)
    }
}

impl From<&[&str]> for ArchivePath {
    fn from(segments: &[&str]) -> Self {
        segments.iter().copied().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for ArchivePath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for ArchivePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.0 {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}

impl FromStr for ArchivePath {
    type Err = Error;

    /// Parses the `/a.container/b.item` rendering. Empty components are
    /// skipped, so `""`, `"/"` and `"//"` all name the root.
    fn from_str(s: &str) -> Result<Self> {
        s.split('/')
            .filter(|segment| !segment.is_empty())
            .map(|segment| match segment {
                "." | ".." => Err(Error::InvalidPath(format!(
                    "relative segment '{segment}' in '{s}'"
                ))),
                _ => Ok(segment.to_string()),
            })
            .collect::<Result<Vec<_>>>()
            .map(Self)
    }
}
