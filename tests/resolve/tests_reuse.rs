//! Tests for `refer` resolution.

use ncl::base::codes;
use ncl::{BuildOptions, Builder, ElementKind, Resolver};

use crate::helpers::{Script, all_of, build, codes_of, find, fixtures, target};
use rstest::rstest;

fn body() -> Script {
    Script::document("reuse").open("body", &[])
}

#[test]
fn test_reuse_finds_nested_target() {
    let doc = build(
        body()
            .open("context", &[("id", "outer")])
            .open("context", &[("id", "inner")])
            .leaf("media", &[("id", "deep"), ("src", "a.png")])
            .close_to("context")
            .close()
            .leaf("media", &[("id", "copy"), ("refer", "deep")]),
    );
    let copy = find(&doc, ElementKind::Media, "copy");
    assert_eq!(target(&doc, copy, "refer"), Some(find(&doc, ElementKind::Media, "deep")));
    assert!(doc.warnings().is_empty());
}

#[test]
fn test_reuse_in_sample_resolves_switch() {
    let doc = build(fixtures::sample());
    let copy = find(&doc, ElementKind::Switch, "langCopy");
    assert_eq!(target(&doc, copy, "refer"), Some(find(&doc, ElementKind::Switch, "lang")));
}

#[test]
fn test_reuse_picks_first_in_document_order() {
    let doc = build(
        body()
            .open("context", &[("id", "a")])
            .leaf("media", &[("id", "shared")])
            .close()
            .open("context", &[("id", "b")])
            .leaf("media", &[("id", "shared")])
            .close()
            .leaf("media", &[("id", "copy"), ("refer", "shared")]),
    );
    let first = all_of(&doc, ElementKind::Media)[0];
    assert_eq!(doc[doc[first].parent().unwrap()].id(), Some("a"));

    let copy = find(&doc, ElementKind::Media, "copy");
    assert_eq!(target(&doc, copy, "refer"), Some(first));
}

#[test]
fn test_reuse_missing_target_warns() {
    let doc = build(body().leaf("media", &[("id", "copy"), ("refer", "nowhere")]));
    let copy = find(&doc, ElementKind::Media, "copy");
    assert_eq!(codes_of(doc[copy].warnings()), vec![codes::UNRESOLVED_REFERENCE]);
}

#[test]
fn test_reuse_requires_same_kind() {
    let doc = build(
        body()
            .leaf("context", &[("id", "ctx")])
            .leaf("media", &[("id", "copy"), ("refer", "ctx")]),
    );
    let copy = find(&doc, ElementKind::Media, "copy");
    assert_eq!(target(&doc, copy, "refer"), None);
    assert_eq!(codes_of(doc[copy].warnings()), vec![codes::UNRESOLVED_REFERENCE]);
}

#[rstest]
#[case::self_reference(&[("a", "a")])]
#[case::mutual(&[("a", "b"), ("b", "a")])]
#[case::three_way(&[("a", "b"), ("b", "c"), ("c", "a")])]
fn test_reuse_cycles_warn(#[case] media: &[(&str, &str)]) {
    let mut script = body();
    for &(id, refer) in media {
        script = script.leaf("media", &[("id", id), ("refer", refer)]);
    }
    let doc = build(script);

    for (id, _) in media {
        let element = find(&doc, ElementKind::Media, id);
        assert_eq!(codes_of(doc[element].warnings()), vec![codes::CYCLIC_REUSE], "media {id}");
        assert_eq!(target(&doc, element, "refer"), None);
    }
}

#[test]
fn test_reusing_an_enclosing_node_is_cyclic() {
    let doc = build(
        body()
            .open("context", &[("id", "outer")])
            .open("context", &[("id", "inner"), ("refer", "outer")])
            .leaf("media", &[("id", "m")]),
    );
    let inner = find(&doc, ElementKind::Context, "inner");
    assert_eq!(codes_of(doc[inner].warnings()), vec![codes::CYCLIC_REUSE]);
    assert_eq!(target(&doc, inner, "refer"), None);
}

#[test]
fn test_reusing_a_sibling_subtree_is_accepted() {
    let doc = build(
        body()
            .open("context", &[("id", "left")])
            .leaf("media", &[("id", "m")])
            .close()
            .open("context", &[("id", "right")])
            .leaf("context", &[("id", "copy"), ("refer", "left")]),
    );
    let copy = find(&doc, ElementKind::Context, "copy");
    assert_eq!(target(&doc, copy, "refer"), Some(find(&doc, ElementKind::Context, "left")));
    assert!(doc.warnings().is_empty());
}

#[test]
fn test_reuse_chain_is_accepted() {
    let doc = build(
        body()
            .leaf("media", &[("id", "a"), ("refer", "b")])
            .leaf("media", &[("id", "b"), ("refer", "c")])
            .leaf("media", &[("id", "c"), ("src", "c.png")]),
    );
    assert!(doc.warnings().is_empty());
    let a = find(&doc, ElementKind::Media, "a");
    let b = find(&doc, ElementKind::Media, "b");
    assert_eq!(target(&doc, a, "refer"), Some(b));
    assert_eq!(target(&doc, b, "refer"), Some(find(&doc, ElementKind::Media, "c")));
}

#[test]
fn test_cycle_counted_in_stats() {
    let mut doc = Builder::with_options(BuildOptions::construction_only())
        .build(
            body()
                .leaf("media", &[("id", "a"), ("refer", "b")])
                .leaf("media", &[("id", "b"), ("refer", "a")])
                .leaf("media", &[("id", "c"), ("refer", "d")])
                .leaf("media", &[("id", "d"), ("src", "d.png")])
                .events(),
        )
        .unwrap();
    assert!(doc.warnings().is_empty());

    let stats = Resolver::new().resolve(&mut doc);
    assert_eq!(stats.cyclic, 2);
    assert_eq!(stats.resolved, 1);
    assert_eq!(stats.failed(), 2);
}

#[test]
fn test_chain_into_a_loop_is_cyclic() {
    let doc = build(
        body()
            .leaf("media", &[("id", "a"), ("refer", "b")])
            .leaf("media", &[("id", "b"), ("refer", "a")])
            .leaf("media", &[("id", "c"), ("refer", "a")]),
    );
    let c = find(&doc, ElementKind::Media, "c");
    assert_eq!(codes_of(doc[c].warnings()), vec![codes::CYCLIC_REUSE]);
}
