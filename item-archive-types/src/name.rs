//! Segment name codec.
//!
//! Every entry is identified at its level of the tree by a flat name of the
//! form `<id>(.<tag>)*.<kind>`, e.g. `lamp.red.vintage.item`. The first
//! component is the id, the last one decides the kind and everything in
//! between is a tag.

use crate::sink::NotificationSink;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Reserved component separator.
pub const SEPARATOR: char = '.';

/// Character that separates segments in a rendered path.
const PATH_SEPARATOR: char = '/';

const ITEM: &str = "item";
const CONTAINER: &str = "container";

/// Whether an entry is a leaf or may own children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// A leaf entry with no children.
    Item,
    /// An entry that may own items and other containers.
    Container,
}

impl EntryKind {
    /// Returns the name suffix for this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Item => ITEM,
            Self::Container => CONTAINER,
        }
    }

    /// Decides the kind from the last component of a name.
    ///
    /// Only the literal `container` yields a container; anything else,
    /// including typos and the empty string, is an item.
    #[must_use]
    pub fn from_suffix(suffix: &str) -> Self {
        if suffix == CONTAINER {
            Self::Container
        } else {
            Self::Item
        }
    }

    #[must_use]
    pub const fn is_container(self) -> bool {
        matches!(self, Self::Container)
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// The structure decoded from a segment name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParsedName {
    pub id: String,
    /// Tags in the order they appear in the name. Duplicates are kept.
    pub tags: Vec<String>,
    pub kind: EntryKind,
}

impl ParsedName {
    pub fn new(id: impl Into<String>, tags: Vec<String>, kind: EntryKind) -> Self {
        Self {
            id: id.into(),
            tags,
            kind,
        }
    }

    /// Renders this back into a segment name, failing if a component would
    /// not survive a round trip through [`parse_name`].
    pub fn to_name(&self) -> Result<String, NameError> {
        format_name(&self.id, &self.tags, self.kind)
    }

    #[must_use]
    pub const fn is_container(&self) -> bool {
        self.kind.is_container()
    }

    fn fallback(name: &str) -> Self {
        Self::new(name, Vec::new(), EntryKind::Item)
    }
}

impl fmt::Display for ParsedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&join_components(&self.id, &self.tags, self.kind))
    }
}

impl FromStr for ParsedName {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_name(s)
    }
}

/// Errors produced by the name codec.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    /// The name split into zero components.
    #[error("invalid name: '{name}'")]
    Malformed { name: String },

    /// An id or tag that cannot be encoded: it is empty (ids only) or
    /// contains a `.` or `/`.
    #[error("invalid name component: '{component}'")]
    InvalidComponent { component: String },
}

impl NameError {
    /// The best-effort parse to use in place of a failed one: the whole
    /// name as id, no tags, kind item.
    #[must_use]
    pub fn fallback(&self) -> ParsedName {
        match self {
            Self::Malformed { name } => ParsedName::fallback(name),
            Self::InvalidComponent { component } => ParsedName::fallback(component),
        }
    }

    /// The text that failed to parse or encode.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Malformed { name } => name,
            Self::InvalidComponent { component } => component,
        }
    }
}

/// Parses a segment name into id, tags and kind.
///
/// A name without separators is a bare id of kind item, and the empty
/// string parses to an empty id. The error branch only triggers if the
/// split produces no components at all, which `str::split` never does.
pub fn parse_name(name: &str) -> Result<ParsedName, NameError> {
    let mut components = name.split(SEPARATOR);
    let Some(id) = components.next() else {
        return Err(NameError::Malformed {
            name: name.to_string(),
        });
    };

    let mut rest: Vec<&str> = components.collect();
    // The last component decides the kind even when it is also the id.
    let kind = EntryKind::from_suffix(rest.last().copied().unwrap_or(id));
    rest.pop();

    Ok(ParsedName {
        id: id.to_string(),
        tags: rest.into_iter().map(str::to_string).collect(),
        kind,
    })
}

/// Parses a segment name, reporting any fault to `sink` and substituting
/// [`NameError::fallback`] so the caller always gets a result.
pub fn parse_name_or_notify<S>(name: &str, sink: &S) -> ParsedName
where
    S: NotificationSink + ?Sized,
{
    match parse_name(name) {
        Ok(parsed) => parsed,
        Err(err) => {
            sink.notify(&err);
            err.fallback()
        }
    }
}

/// Builds a segment name from its parts.
///
/// The id must be non-empty and no id or tag may contain the separator or a
/// `/`, so the result always parses back to the same parts.
pub fn format_name<T: AsRef<str>>(
    id: &str,
    tags: &[T],
    kind: EntryKind,
) -> Result<String, NameError> {
    if id.is_empty() {
        return Err(NameError::InvalidComponent {
            component: String::new(),
        });
    }
    let components = std::iter::once(id).chain(tags.iter().map(|tag| tag.as_ref()));
    for component in components {
        if component.contains([SEPARATOR, PATH_SEPARATOR]) {
            return Err(NameError::InvalidComponent {
                component: component.to_string(),
            });
        }
    }
    Ok(join_components(id, tags, kind))
}

fn join_components<T: AsRef<str>>(id: &str, tags: &[T], kind: EntryKind) -> String {
    let mut name = String::from(id);
    for tag in tags {
        name.push(SEPARATOR);
        name.push_str(tag.as_ref());
    }
    name.push(SEPARATOR);
    name.push_str(kind.as_str());
    name
}
