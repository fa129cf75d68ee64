//! Tests for building element trees from structural events.

use ncl::base::codes;
use ncl::{BuildError, BuildOptions, Builder, ChildSlot, ElementKind, ModelError, Reference};

use crate::helpers::{Script, all_of, build, codes_of, find, fixtures};

#[test]
fn test_sample_builds_without_messages() {
    let doc = build(fixtures::sample());
    assert!(doc.warnings().is_empty(), "{:?}", doc.warnings());
    assert!(doc.errors().is_empty(), "{:?}", doc.errors());

    let head = doc.head().unwrap();
    let body = doc.body().unwrap();
    assert_eq!(doc[head].parent(), Some(doc.root()));
    assert_eq!(doc[body].parent(), Some(doc.root()));
    assert_eq!(all_of(&doc, ElementKind::Link).len(), 2);
}

#[test]
fn test_children_keep_source_order() {
    let doc = build(
        Script::document("d")
            .open("body", &[])
            .leaf("media", &[("id", "c")])
            .leaf("media", &[("id", "a")])
            .leaf("property", &[("name", "b")])
            .leaf("media", &[("id", "b")]),
    );
    let body = doc.body().unwrap();
    let ids: Vec<_> = doc.children(body).map(|c| doc[c].id().unwrap()).collect();
    assert_eq!(ids, vec!["c", "a", "b", "b"]);
    assert_eq!(doc.children_in(body, ChildSlot::Nodes).count(), 3);
}

#[test]
fn test_every_element_has_one_parent() {
    let doc = build(fixtures::sample());
    for id in doc.descendants(doc.root()).skip(1) {
        let parent = doc[id].parent().expect("non-root element has a parent");
        assert!(doc.has_child(parent, id));
    }
    assert_eq!(doc[doc.root()].parent(), None);
}

#[test]
fn test_unknown_elements_and_attributes() {
    let doc = build(
        Script::document("d")
            .open("body", &[])
            .open("effect", &[("kind", "fade")])
            .leaf("media", &[("id", "swallowed")])
            .close()
            .leaf("media", &[("id", "kept"), ("customAttr", "x")])
            // Known tag in the wrong place.
            .leaf("region", &[("id", "misplaced")]),
    );
    let body = doc.body().unwrap();
    let children: Vec<_> = doc.children(body).collect();
    assert_eq!(children.len(), 1);
    assert_eq!(doc[children[0]].id(), Some("kept"));
    assert_eq!(doc[children[0]].text("customAttr"), Some("x"));
    assert!(doc.errors().is_empty());
}

#[test]
fn test_bind_rule_kind_depends_on_parent() {
    let doc = build(
        Script::document("d")
            .open("head", &[])
            .open("descriptorBase", &[])
            .open("descriptorSwitch", &[("id", "ds")])
            .leaf("bindRule", &[("constituent", "d1"), ("rule", "r")])
            .close_to("head")
            .open("body", &[])
            .open("switch", &[("id", "s")])
            .leaf("bindRule", &[("constituent", "m"), ("rule", "r")]),
    );
    assert_eq!(all_of(&doc, ElementKind::DescriptorBindRule).len(), 1);
    assert_eq!(all_of(&doc, ElementKind::BindRule).len(), 1);
}

#[test]
fn test_missing_required_attributes_are_errors_not_failures() {
    let doc = build(
        Script::document("d")
            .open("body", &[])
            .leaf("media", &[("src", "x.png")])
            .open("link", &[])
            .leaf("bind", &[("role", "start")]),
    );
    let errors = doc.errors();
    assert_eq!(codes_of(errors), vec![codes::MISSING_ATTRIBUTE; 3]);

    let link = all_of(&doc, ElementKind::Link)[0];
    assert_eq!(doc[link].errors().len(), 1);
    assert!(doc[link].errors()[0].message.contains("xconnector"));
}

#[test]
fn test_root_without_id_is_recorded() {
    let doc = build(Script::new().open("ncl", &[]).leaf("body", &[]));
    assert_eq!(codes_of(doc.errors()), vec![codes::MISSING_ATTRIBUTE]);
    assert_eq!(doc.errors()[0].element, Some(doc.root()));
}

#[test]
fn test_invalid_identifier_aborts_build() {
    let result = Builder::new().build(
        Script::document("d")
            .open("body", &[])
            .leaf("media", &[("id", "has space")])
            .events(),
    );
    assert_eq!(
        result.unwrap_err(),
        BuildError::Model(ModelError::invalid_identifier("has space"))
    );
}

#[test]
fn test_duplicate_identifier_last_wins() {
    let doc = build(
        Script::document("d")
            .open("body", &[])
            .leaf("media", &[("id", "m"), ("src", "first.png")])
            .leaf("media", &[("id", "other")])
            .leaf("media", &[("id", "m"), ("src", "second.png")]),
    );
    let body = doc.body().unwrap();
    let nodes: Vec<_> = doc.children(body).collect();
    assert_eq!(nodes.len(), 2);
    assert_eq!(doc[nodes[0]].id(), Some("other"));
    assert_eq!(doc[nodes[1]].text("src"), Some("second.png"));
    assert_eq!(doc.find_child(body, ChildSlot::Nodes, "m"), Some(nodes[1]));
    assert!(doc.warnings().is_empty());
}

#[test]
fn test_references_stay_pending_until_end() {
    let mut builder = Builder::new();
    for event in fixtures::sample().events() {
        if event == ncl::MarkupEvent::Ended {
            break;
        }
        builder.feed(event).unwrap();
    }
    let pending = builder.document();
    let link = find(pending, ElementKind::Link, "lStart");
    assert_eq!(
        pending[link].reference("xconnector"),
        Some(&Reference::pending(ncl::RefKind::Connector, "onBeginStart"))
    );

    let doc = builder.document_ended().unwrap();
    assert!(doc[link].reference("xconnector").unwrap().is_resolved());
}

#[test]
fn test_resolution_can_be_disabled() {
    let options = BuildOptions {
        resolve_on_end: false,
        ..BuildOptions::default()
    };
    let doc = Builder::with_options(options)
        .build(fixtures::sample().events())
        .unwrap();
    let link = find(&doc, ElementKind::Link, "lStart");
    assert!(!doc[link].reference("xconnector").unwrap().is_resolved());
    assert!(doc.variables().is_empty());
}

#[test]
fn test_gathering_can_be_disabled() {
    let options = BuildOptions {
        gather_diagnostics: false,
        ..BuildOptions::default()
    };
    let doc = Builder::with_options(options)
        .build(
            Script::document("d")
                .open("body", &[])
                .leaf("link", &[("xconnector", "missing")])
                .events(),
        )
        .unwrap();
    assert!(doc.warnings().is_empty());
    let link = all_of(&doc, ElementKind::Link)[0];
    assert_eq!(codes_of(doc[link].warnings()), vec![codes::UNRESOLVED_REFERENCE]);
}

#[test]
fn test_validation_on_end() {
    let options = BuildOptions {
        validate_on_end: true,
        ..BuildOptions::default()
    };
    let doc = Builder::with_options(options)
        .build(Script::document("d").leaf("body", &[]).events())
        .unwrap();
    assert_eq!(codes_of(doc.errors()), vec![codes::EMPTY_COMPOSITE]);
}

#[test]
fn test_builder_is_reusable() {
    let mut builder = Builder::new();
    for event in Script::document("first").leaf("body", &[]).events() {
        if let Some(doc) = builder.feed(event).unwrap() {
            assert_eq!(doc[doc.root()].id(), Some("first"));
        }
    }
    for event in Script::document("second").events() {
        if let Some(doc) = builder.feed(event).unwrap() {
            assert_eq!(doc[doc.root()].id(), Some("second"));
            assert_eq!(doc.body(), None);
        }
    }
}
