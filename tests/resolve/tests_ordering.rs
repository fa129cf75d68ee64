//! Tests for resolution order independence.

use ncl::resolve::Phase;
use ncl::{Document, ElementId, ElementKind, RefKind, ResolveStats, Resolver};

use crate::helpers::{codes_of, target};

fn attached(doc: &mut Document, parent: ElementId, kind: ElementKind, attributes: &[(&str, &str)]) -> ElementId {
    let id = doc.create(kind);
    for (name, value) in attributes {
        doc.set_attribute(id, name, value).unwrap();
    }
    doc.attach(parent, id).unwrap();
    id
}

/// Body attached before head, link before the media it binds.
fn body_first() -> (Document, ElementId) {
    let mut doc = Document::new();
    let root = doc.root();
    doc.set_id(root, "reversed").unwrap();

    let body = attached(&mut doc, root, ElementKind::Body, &[]);
    let link = attached(&mut doc, body, ElementKind::Link, &[("xconnector", "onBeginStart")]);
    attached(&mut doc, link, ElementKind::Bind, &[("role", "onBegin"), ("component", "video"), ("interface", "credits")]);
    let bind = attached(&mut doc, link, ElementKind::Bind, &[("role", "start"), ("component", "icon")]);
    attached(&mut doc, bind, ElementKind::BindParam, &[("name", "when"), ("value", "$onBegin")]);
    let video = attached(&mut doc, body, ElementKind::Media, &[("id", "video")]);
    attached(&mut doc, video, ElementKind::Area, &[("id", "credits")]);
    attached(&mut doc, body, ElementKind::Media, &[("id", "icon")]);

    let head = attached(&mut doc, root, ElementKind::Head, &[]);
    let base = attached(&mut doc, head, ElementKind::ConnectorBase, &[]);
    let connector = attached(&mut doc, base, ElementKind::CausalConnector, &[("id", "onBeginStart")]);
    attached(&mut doc, connector, ElementKind::SimpleCondition, &[("role", "onBegin")]);
    attached(&mut doc, connector, ElementKind::SimpleAction, &[("role", "start")]);

    (doc, link)
}

#[test]
fn test_phases_cover_every_kind_in_order() {
    assert!(Phase::of(RefKind::Connector) < Phase::of(RefKind::Role));
    assert!(Phase::of(RefKind::Node) < Phase::of(RefKind::Interface));
    assert!(Phase::of(RefKind::Role) < Phase::of(RefKind::Parameter));
    assert_eq!(Phase::ORDER.len(), 3);
}

#[test]
fn test_body_before_head_resolves() {
    let (mut doc, link) = body_first();
    let stats = Resolver::new().resolve(&mut doc);
    assert_eq!(stats.failed(), 0);

    let binds: Vec<_> = doc.children(link).collect();
    for bind in &binds {
        let role = target(&doc, *bind, "role").expect("role resolves");
        assert_eq!(doc[role].parent().map(|p| doc[p].id()), Some(Some("onBeginStart")));
    }
    assert!(target(&doc, binds[0], "interface").is_some());

    let param = doc.children(binds[1]).next().unwrap();
    let role = target(&doc, param, "value").unwrap();
    assert_eq!(doc[role].kind(), ElementKind::SimpleCondition);
}

#[test]
fn test_resolution_is_stable_when_repeated() {
    let (mut doc, _) = body_first();
    let resolver = Resolver::new();
    let first = resolver.resolve(&mut doc);
    let second = resolver.resolve(&mut doc);

    assert_eq!(first.resolved, 7);
    // Nothing is pending the second time round.
    assert_eq!(second, ResolveStats::default());
}

#[test]
fn test_detached_subtree_is_skipped() {
    let (mut doc, link) = body_first();
    let body = doc[link].parent().unwrap();
    doc.detach(link);

    let stats = Resolver::new().resolve(&mut doc);
    assert_eq!(stats.failed(), 0);
    assert!(doc[link].reference("xconnector").is_some_and(|r| !r.is_resolved()));
    assert!(codes_of(doc[link].warnings()).is_empty());
    assert!(doc.children(body).all(|c| doc[c].kind() == ElementKind::Media));
}
