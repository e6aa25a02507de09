use item_archive_types::{
    format_name, parse_name, parse_name_or_notify, EntryKind, NameError, ParsedName, TracingSink,
};
use pretty_assertions::assert_eq;
use std::cell::RefCell;
use std::error::Error;

fn tags(list: &[&str]) -> Vec<String> {
    list.iter().map(|t| t.to_string()).collect()
}

// ── parse_name ────────────────────────────────────────────────────

#[test]
fn parse_container_with_tags() {
    let parsed = parse_name("id.tag1.tag2.container").unwrap();
    assert_eq!(parsed, ParsedName::new("id", tags(&["tag1", "tag2"]), EntryKind::Container));
}

#[test]
fn parse_item_with_one_tag() {
    let parsed = parse_name("a.b.item").unwrap();
    assert_eq!(parsed.id, "a");
    assert_eq!(parsed.tags, tags(&["b"]));
    assert_eq!(parsed.kind, EntryKind::Item);
}

#[test]
fn parse_bare_id_is_item() {
    let parsed = parse_name("solo").unwrap();
    assert_eq!(parsed, ParsedName::new("solo", vec![], EntryKind::Item));
}

#[test]
fn parse_empty_string_is_empty_item() {
    let parsed = parse_name("").unwrap();
    assert_eq!(parsed.id, "");
    assert!(parsed.tags.is_empty());
    assert_eq!(parsed.kind, EntryKind::Item);
}

#[test]
fn parse_two_components_has_no_tags() {
    let parsed = parse_name("shelf.container").unwrap();
    assert_eq!(parsed.id, "shelf");
    assert!(parsed.tags.is_empty());
    assert!(parsed.is_container());
}

#[test]
fn parse_unknown_suffix_defaults_to_item() {
    let parsed = parse_name("lamp.red.thing").unwrap();
    assert_eq!(parsed.kind, EntryKind::Item);
    assert_eq!(parsed.tags, tags(&["red"]));
}

#[test]
fn parse_suffix_is_case_sensitive() {
    assert_eq!(parse_name("box.Container").unwrap().kind, EntryKind::Item);
    assert_eq!(parse_name("box.CONTAINER").unwrap().kind, EntryKind::Item);
}

#[test]
fn parse_only_last_component_decides_kind() {
    let parsed = parse_name("box.container.item").unwrap();
    assert_eq!(parsed.kind, EntryKind::Item);
    assert_eq!(parsed.tags, tags(&["container"]));
}

#[test]
fn parse_keeps_duplicate_tags_in_order() {
    let parsed = parse_name("x.b.a.b.item").unwrap();
    assert_eq!(parsed.tags, tags(&["b", "a", "b"]));
}

#[test]
fn parse_empty_components_are_preserved() {
    let parsed = parse_name(".red..container").unwrap();
    assert_eq!(parsed.id, "");
    assert_eq!(parsed.tags, tags(&["red", ""]));
    assert_eq!(parsed.kind, EntryKind::Container);
}

#[test]
fn parse_trailing_separator_is_item() {
    let parsed = parse_name("lamp.").unwrap();
    assert_eq!(parsed.id, "lamp");
    assert!(parsed.tags.is_empty());
    assert_eq!(parsed.kind, EntryKind::Item);
}

#[test]
fn parse_sole_container_component() {
    // The sole component is also the last one.
    let parsed = parse_name("container").unwrap();
    assert_eq!(parsed.id, "container");
    assert_eq!(parsed.kind, EntryKind::Container);
}

#[test]
fn parsed_name_from_str() {
    let parsed: ParsedName = "a.b.item".parse().unwrap();
    assert_eq!(parsed.id, "a");
}

// ── format_name ───────────────────────────────────────────────────

#[test]
fn format_item_with_tags() {
    assert_eq!(
        format_name("lamp", &["red", "vintage"], EntryKind::Item).unwrap(),
        "lamp.red.vintage.item"
    );
}

#[test]
fn format_container_without_tags() {
    let no_tags: [&str; 0] = [];
    assert_eq!(
        format_name("shelf", &no_tags, EntryKind::Container).unwrap(),
        "shelf.container"
    );
}

#[test]
fn format_rejects_separator_in_id() {
    let err = format_name("a.b", &["c"], EntryKind::Item).unwrap_err();
    assert_eq!(
        err,
        NameError::InvalidComponent {
            component: "a.b".to_string(),
        }
    );
}

#[test]
fn format_rejects_kind_smuggled_into_id() {
    let err = format_name::<&str>("lamp.container", &[], EntryKind::Item).unwrap_err();
    assert_eq!(err.name(), "lamp.container");
}

#[test]
fn format_rejects_slash_in_tag() {
    let err = format_name("a", &["ok", "c/d"], EntryKind::Item).unwrap_err();
    assert_eq!(err.name(), "c/d");
    assert_eq!(err.to_string(), "invalid name component: 'c/d'");
}

#[test]
fn format_rejects_empty_id() {
    let err = format_name("", &["t"], EntryKind::Container).unwrap_err();
    assert_eq!(
        err,
        NameError::InvalidComponent {
            component: String::new(),
        }
    );
}

#[test]
fn parsed_name_display_renders_name() {
    let parsed = ParsedName::new("id", tags(&["t"]), EntryKind::Container);
    assert_eq!(parsed.to_string(), "id.t.container");
    assert_eq!(parsed.to_name().unwrap(), "id.t.container");
}

#[test]
fn to_name_refuses_unencodable_parts() {
    let parsed = ParsedName::new("a/b", vec![], EntryKind::Item);
    assert!(parsed.to_name().is_err());
    assert_eq!(parsed.to_string(), "a/b.item");
}

// ── EntryKind ─────────────────────────────────────────────────────

#[test]
fn entry_kind_strings() {
    assert_eq!(EntryKind::Item.as_str(), "item");
    assert_eq!(EntryKind::Container.to_string(), "container");
    assert_eq!(EntryKind::from_suffix("container"), EntryKind::Container);
    assert_eq!(EntryKind::from_suffix("item"), EntryKind::Item);
    assert_eq!(EntryKind::from_suffix(""), EntryKind::Item);
}

#[test]
fn entry_kind_serde_lowercase() {
    let json = serde_json::to_string(&EntryKind::Container).unwrap();
    assert_eq!(json, "\"container\"");
    let kind: EntryKind = serde_json::from_str("\"item\"").unwrap();
    assert_eq!(kind, EntryKind::Item);
}

// ── Fallback and notification ─────────────────────────────────────

#[test]
fn malformed_error_falls_back_to_whole_name() {
    let err = NameError::Malformed {
        name: "weird".to_string(),
    };
    assert_eq!(err.name(), "weird");
    assert_eq!(err.fallback(), ParsedName::new("weird", vec![], EntryKind::Item));
    assert_eq!(err.to_string(), "invalid name: 'weird'");
}

#[test]
fn notify_not_called_for_valid_names() {
    let calls = RefCell::new(Vec::<String>::new());
    let sink = |e: &(dyn Error + 'static)| calls.borrow_mut().push(e.to_string());

    let parsed = parse_name_or_notify("a.b.item", &sink);
    assert_eq!(parsed.id, "a");

    let parsed = parse_name_or_notify("", &sink);
    assert_eq!(parsed.id, "");

    assert!(calls.borrow().is_empty());
}

#[test]
fn notify_with_tracing_sink() {
    let parsed = parse_name_or_notify("box.container", &TracingSink);
    assert!(parsed.is_container());
}

// ── Properties ────────────────────────────────────────────────────

mod properties {
    use super::*;
    use proptest::prelude::*;

    fn component() -> impl Strategy<Value = String> {
        prop::string::string_regex("[a-z0-9_-]{1,12}").unwrap()
    }

    proptest! {
        #[test]
        fn container_names_parse_to_parts(
            id in component(),
            tag_list in prop::collection::vec(component(), 0..6),
        ) {
            let name = format!("{}.container", std::iter::once(id.clone())
                .chain(tag_list.iter().cloned())
                .collect::<Vec<_>>()
                .join("."));
            let parsed = parse_name(&name).unwrap();
            prop_assert_eq!(parsed.id, id);
            prop_assert_eq!(parsed.tags, tag_list);
            prop_assert_eq!(parsed.kind, EntryKind::Container);
        }

        #[test]
        fn non_container_suffix_is_item(
            components in prop::collection::vec("[a-zA-Z0-9]{0,10}", 1..8),
        ) {
            prop_assume!(components.last().map(String::as_str) != Some("container"));
            let name = components.join(".");
            prop_assert_eq!(parse_name(&name).unwrap().kind, EntryKind::Item);
        }

        #[test]
        fn format_then_parse_recovers_parts(
            id in component(),
            tag_list in prop::collection::vec(component(), 0..6),
            is_container in any::<bool>(),
        ) {
            let kind = if is_container { EntryKind::Container } else { EntryKind::Item };
            let parsed = parse_name(&format_name(&id, &tag_list, kind).unwrap()).unwrap();
            prop_assert_eq!(parsed, ParsedName::new(id, tag_list, kind));
        }

        #[test]
        fn format_either_round_trips_or_refuses(
            id in "[a-z./]{0,6}",
            tag_list in prop::collection::vec("[a-z./]{0,4}", 0..4),
        ) {
            if let Ok(name) = format_name(&id, &tag_list, EntryKind::Item) {
                let parsed = parse_name(&name).unwrap();
                prop_assert_eq!(parsed, ParsedName::new(id, tag_list, EntryKind::Item));
            }
        }

        #[test]
        fn parse_never_fails(name in ".*") {
            prop_assert!(parse_name(&name).is_ok());
        }
    }
}
