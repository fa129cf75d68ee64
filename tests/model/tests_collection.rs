//! Tests for the equivalence policy of child collections.

use ncl::{ChildSlot, ElementKind};
use rstest::rstest;

use crate::helpers::{Script, all_of, build};

fn link_with_binds(binds: &[&[(&str, &str)]]) -> Script {
    let mut script = Script::document("d")
        .open("body", &[])
        .open("link", &[("xconnector", "c")]);
    for bind in binds {
        script = script.leaf("bind", bind);
    }
    script
}

#[rstest]
#[case::same_triple(&[("role", "start"), ("component", "m")], &[("role", "start"), ("component", "m")], 1)]
#[case::different_role(&[("role", "start"), ("component", "m")], &[("role", "stop"), ("component", "m")], 2)]
#[case::different_interface(
    &[("role", "start"), ("component", "m"), ("interface", "a1")],
    &[("role", "start"), ("component", "m"), ("interface", "a2")],
    2
)]
#[case::descriptor_not_part_of_key(
    &[("role", "start"), ("component", "m"), ("descriptor", "d1")],
    &[("role", "start"), ("component", "m"), ("descriptor", "d2")],
    1
)]
fn test_bind_equivalence(
    #[case] first: &[(&str, &str)],
    #[case] second: &[(&str, &str)],
    #[case] expected: usize,
) {
    let doc = build(link_with_binds(&[first, second]));
    let link = all_of(&doc, ElementKind::Link)[0];
    assert_eq!(doc.children_in(link, ChildSlot::Binds).count(), expected);
}

#[test]
fn test_replaced_bind_is_the_newer_one() {
    let doc = build(link_with_binds(&[
        &[("role", "start"), ("component", "m"), ("descriptor", "old")],
        &[("role", "stop"), ("component", "m")],
        &[("role", "start"), ("component", "m"), ("descriptor", "new")],
    ]));
    let link = all_of(&doc, ElementKind::Link)[0];
    let roles: Vec<_> = doc
        .children_in(link, ChildSlot::Binds)
        .map(|b| doc.attribute_text(b, "role").unwrap())
        .collect();
    assert_eq!(roles, vec!["stop", "start"]);
    let last = doc.children(link).last().unwrap();
    assert_eq!(doc.attribute_text(last, "descriptor").as_deref(), Some("new"));
}

#[test]
fn test_conditions_are_never_equal() {
    let doc = build(
        Script::document("d")
            .open("head", &[])
            .open("connectorBase", &[])
            .open("causalConnector", &[("id", "c")])
            .open("compoundCondition", &[("operator", "or")])
            .leaf("simpleCondition", &[("role", "onBegin")])
            .leaf("simpleCondition", &[("role", "onBegin")]),
    );
    let compound = all_of(&doc, ElementKind::CompoundCondition)[0];
    assert_eq!(doc.children(compound).count(), 2);
}

#[test]
fn test_singletons_replace_each_other() {
    let doc = build(
        Script::document("d")
            .open("head", &[])
            .open("ruleBase", &[("id", "first")])
            .leaf("rule", &[("id", "r"), ("var", "v"), ("comparator", "eq"), ("value", "1")])
            .close()
            .leaf("ruleBase", &[("id", "second")]),
    );
    let head = doc.head().unwrap();
    let bases: Vec<_> = doc.children_in(head, ChildSlot::RuleBase).collect();
    assert_eq!(bases.len(), 1);
    assert_eq!(doc[bases[0]].id(), Some("second"));
}

#[test]
fn test_anonymous_region_bases_coexist() {
    let doc = build(
        Script::document("d")
            .open("head", &[])
            .open("regionBase", &[("device", "systemScreen(1)")])
            .leaf("region", &[("id", "a")])
            .close()
            .open("regionBase", &[("device", "systemScreen(2)")])
            .leaf("region", &[("id", "a")]),
    );
    assert_eq!(all_of(&doc, ElementKind::RegionBase).len(), 2);
    assert_eq!(all_of(&doc, ElementKind::Region).len(), 2);
}

#[test]
fn test_meta_equal_by_name_and_content() {
    let doc = build(
        Script::document("d")
            .open("head", &[])
            .leaf("meta", &[("name", "author"), ("content", "a")])
            .leaf("meta", &[("name", "author"), ("content", "b")])
            .leaf("meta", &[("name", "author"), ("content", "a")]),
    );
    let head = doc.head().unwrap();
    let contents: Vec<_> = doc
        .children_in(head, ChildSlot::Meta)
        .map(|m| doc[m].text("content").unwrap().to_string())
        .collect();
    assert_eq!(contents, vec!["b", "a"]);
}

#[test]
fn test_slots_keep_identifiers_apart() {
    let doc = build(
        Script::document("d")
            .open("body", &[])
            .open("media", &[("id", "m")])
            .leaf("area", &[("id", "x")])
            .leaf("property", &[("name", "x")]),
    );
    let media = all_of(&doc, ElementKind::Media)[0];
    assert_eq!(doc.children(media).count(), 2);
    assert!(doc.find_child(media, ChildSlot::Areas, "x").is_some());
    assert!(doc.find_child(media, ChildSlot::Properties, "x").is_some());
    assert_eq!(doc.find_child(media, ChildSlot::Ports, "x"), None);
}
