//! Listing assembler: merges a container's children into a single view.

use crate::name::{parse_name_or_notify, ParsedName};
use crate::sink::NotificationSink;
use serde::{Deserialize, Serialize};

/// The direct children of a container, split by kind.
///
/// The store gives no ordering guarantee for either collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildrenView {
    #[serde(default, alias = "item_names")]
    pub item_names: Vec<String>,
    #[serde(default, alias = "container_names")]
    pub container_names: Vec<String>,
}

impl ChildrenView {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.item_names.is_empty() && self.container_names.is_empty()
    }

    /// Total number of children across both collections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.item_names.len() + self.container_names.len()
    }
}

/// One display-ready child row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryListRow {
    pub is_item: bool,
    pub name: String,
}

impl EntryListRow {
    /// Decodes the row's name, degrading through `sink` on failure.
    pub fn parsed<S>(&self, sink: &S) -> ParsedName
    where
        S: NotificationSink + ?Sized,
    {
        parse_name_or_notify(&self.name, sink)
    }
}

/// Flattens `children` into rows: every item in its given order, then every
/// container in its given order.
///
/// `None` (a non-container, or a container without a listing) yields no
/// rows. Names are not deduplicated across the two collections.
#[must_use]
pub fn assemble(children: Option<&ChildrenView>) -> Vec<EntryListRow> {
    let Some(children) = children else {
        return Vec::new();
    };

    let items = children.item_names.iter().map(|name| EntryListRow {
        is_item: true,
        name: name.clone(),
    });
    let containers = children.container_names.iter().map(|name| EntryListRow {
        is_item: false,
        name: name.clone(),
    });
    items.chain(containers).collect()
}
