//! Element kinds and the static schema table.
//!
//! Every kind the builder can materialize has exactly one [`ElementSchema`]
//! entry. Construction, collection keys, reference extraction and validation
//! are all driven by this table rather than per-kind code.

use super::reference::RefKind;

// ============================================================================
// ELEMENT KINDS
// ============================================================================

/// The kind of an element in the document tree.
///
/// Maps one-to-one to NCL markup elements, except `bindRule`, which becomes
/// [`ElementKind::BindRule`] under a switch and
/// [`ElementKind::DescriptorBindRule`] under a descriptor switch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementKind {
    // Document structure
    Document,
    Head,
    Body,

    // Layout
    RegionBase,
    Region,

    // Presentation
    DescriptorBase,
    Descriptor,
    DescriptorParam,
    DescriptorSwitch,
    DescriptorBindRule,
    DefaultDescriptor,

    // Connectors
    ConnectorBase,
    CausalConnector,
    ConnectorParam,
    SimpleCondition,
    CompoundCondition,
    AssessmentStatement,
    AttributeAssessment,
    ValueAssessment,
    CompoundStatement,
    SimpleAction,
    CompoundAction,

    // Rules
    RuleBase,
    Rule,
    CompositeRule,

    // Annotations
    Meta,
    Metadata,

    // Body content
    Port,
    Property,
    Media,
    Area,
    Context,
    Switch,
    SwitchPort,
    Mapping,
    BindRule,
    DefaultComponent,
    Link,
    LinkParam,
    Bind,
    BindParam,
}

/// Child collection an element is filed under inside its parent.
///
/// Keys only collide within the same slot, so a property named `x` never
/// replaces an area with id `x`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChildSlot {
    Head,
    Body,
    RegionBases,
    DescriptorBase,
    ConnectorBase,
    RuleBase,
    Regions,
    Descriptors,
    Params,
    Connectors,
    Conditions,
    Statements,
    Assessments,
    Actions,
    Rules,
    Meta,
    Metadata,
    Ports,
    Properties,
    Nodes,
    Areas,
    Mappings,
    BindRules,
    Default,
    Links,
    Binds,
}

/// Which attribute (if any) carries the element's identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Identity {
    /// Not identifiable.
    None,
    /// Identified by `id`.
    Id { required: bool },
    /// Identified by `name` (always required).
    Name,
}

impl Identity {
    /// The markup attribute holding the identifier.
    pub fn attribute(&self) -> Option<&'static str> {
        match self {
            Identity::None => None,
            Identity::Id { .. } => Some("id"),
            Identity::Name => Some("name"),
        }
    }

    pub fn is_required(&self) -> bool {
        matches!(self, Identity::Id { required: true } | Identity::Name)
    }
}

/// When two entries of the same slot are considered equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Equivalence {
    /// Equal identifiers; elements without an identifier are never equal.
    Identifier,
    /// At most one per parent.
    Singleton,
    /// Equal values for all listed attributes.
    Attributes(&'static [&'static str]),
    /// Never equal to another entry.
    Never,
}

/// Static description of one element kind.
#[derive(Debug)]
pub struct ElementSchema {
    /// Markup tag.
    pub tag: &'static str,
    /// Collection slot inside the parent.
    pub slot: ChildSlot,
    /// Identifier attribute.
    pub identity: Identity,
    /// Equality rule used by the parent's collection.
    pub equivalence: Equivalence,
    /// Attributes that must be present (identity excluded).
    pub required: &'static [&'static str],
    /// Attributes holding symbolic references.
    pub references: &'static [(&'static str, RefKind)],
    /// Accepted child kinds, in schema order.
    pub children: &'static [ElementKind],
}

const NODES_AND_LINKS: &[ElementKind] = &[
    ElementKind::Port,
    ElementKind::Property,
    ElementKind::Media,
    ElementKind::Context,
    ElementKind::Switch,
    ElementKind::Link,
    ElementKind::Meta,
    ElementKind::Metadata,
];

const CONDITION_OPERANDS: &[ElementKind] = &[
    ElementKind::SimpleCondition,
    ElementKind::CompoundCondition,
    ElementKind::AssessmentStatement,
    ElementKind::CompoundStatement,
];

const RULE_OPERANDS: &[ElementKind] = &[ElementKind::Rule, ElementKind::CompositeRule];

impl ElementKind {
    /// Every kind, in declaration order.
    pub const ALL: &'static [ElementKind] = &[
        ElementKind::Document,
        ElementKind::Head,
        ElementKind::Body,
        ElementKind::RegionBase,
        ElementKind::Region,
        ElementKind::DescriptorBase,
        ElementKind::Descriptor,
        ElementKind::DescriptorParam,
        ElementKind::DescriptorSwitch,
        ElementKind::DescriptorBindRule,
        ElementKind::DefaultDescriptor,
        ElementKind::ConnectorBase,
        ElementKind::CausalConnector,
        ElementKind::ConnectorParam,
        ElementKind::SimpleCondition,
        ElementKind::CompoundCondition,
        ElementKind::AssessmentStatement,
        ElementKind::AttributeAssessment,
        ElementKind::ValueAssessment,
        ElementKind::CompoundStatement,
        ElementKind::SimpleAction,
        ElementKind::CompoundAction,
        ElementKind::RuleBase,
        ElementKind::Rule,
        ElementKind::CompositeRule,
        ElementKind::Meta,
        ElementKind::Metadata,
        ElementKind::Port,
        ElementKind::Property,
        ElementKind::Media,
        ElementKind::Area,
        ElementKind::Context,
        ElementKind::Switch,
        ElementKind::SwitchPort,
        ElementKind::Mapping,
        ElementKind::BindRule,
        ElementKind::DefaultComponent,
        ElementKind::Link,
        ElementKind::LinkParam,
        ElementKind::Bind,
        ElementKind::BindParam,
    ];

    /// The schema entry for this kind.
    pub fn schema(&self) -> &'static ElementSchema {
        use ElementKind as K;
        match self {
            K::Document => &ElementSchema {
                tag: "ncl",
                slot: ChildSlot::Body,
                identity: Identity::Id { required: true },
                equivalence: Equivalence::Never,
                required: &[],
                references: &[],
                children: &[K::Head, K::Body],
            },
            K::Head => &ElementSchema {
                tag: "head",
                slot: ChildSlot::Head,
                identity: Identity::None,
                equivalence: Equivalence::Singleton,
                required: &[],
                references: &[],
                children: &[
                    K::RegionBase,
                    K::DescriptorBase,
                    K::ConnectorBase,
                    K::RuleBase,
                    K::Meta,
                    K::Metadata,
                ],
            },
            K::Body => &ElementSchema {
                tag: "body",
                slot: ChildSlot::Body,
                identity: Identity::Id { required: false },
                equivalence: Equivalence::Singleton,
                required: &[],
                references: &[],
                children: NODES_AND_LINKS,
            },
            K::RegionBase => &ElementSchema {
                tag: "regionBase",
                slot: ChildSlot::RegionBases,
                identity: Identity::Id { required: false },
                equivalence: Equivalence::Identifier,
                required: &[],
                references: &[("region", RefKind::Region)],
                children: &[K::Region],
            },
            K::Region => &ElementSchema {
                tag: "region",
                slot: ChildSlot::Regions,
                identity: Identity::Id { required: true },
                equivalence: Equivalence::Identifier,
                required: &[],
                references: &[],
                children: &[K::Region],
            },
            K::DescriptorBase => &ElementSchema {
                tag: "descriptorBase",
                slot: ChildSlot::DescriptorBase,
                identity: Identity::Id { required: false },
                equivalence: Equivalence::Singleton,
                required: &[],
                references: &[],
                children: &[K::Descriptor, K::DescriptorSwitch],
            },
            K::Descriptor => &ElementSchema {
                tag: "descriptor",
                slot: ChildSlot::Descriptors,
                identity: Identity::Id { required: true },
                equivalence: Equivalence::Identifier,
                required: &[],
                references: &[("region", RefKind::Region)],
                children: &[K::DescriptorParam],
            },
            K::DescriptorParam => &ElementSchema {
                tag: "descriptorParam",
                slot: ChildSlot::Params,
                identity: Identity::Name,
                equivalence: Equivalence::Identifier,
                required: &["value"],
                references: &[],
                children: &[],
            },
            K::DescriptorSwitch => &ElementSchema {
                tag: "descriptorSwitch",
                slot: ChildSlot::Descriptors,
                identity: Identity::Id { required: true },
                equivalence: Equivalence::Identifier,
                required: &[],
                references: &[],
                children: &[K::Descriptor, K::DescriptorBindRule, K::DefaultDescriptor],
            },
            K::DescriptorBindRule => &ElementSchema {
                tag: "bindRule",
                slot: ChildSlot::BindRules,
                identity: Identity::None,
                equivalence: Equivalence::Attributes(&["constituent", "rule"]),
                required: &["constituent", "rule"],
                references: &[
                    ("constituent", RefKind::Descriptor),
                    ("rule", RefKind::Rule),
                ],
                children: &[],
            },
            K::DefaultDescriptor => &ElementSchema {
                tag: "defaultDescriptor",
                slot: ChildSlot::Default,
                identity: Identity::None,
                equivalence: Equivalence::Singleton,
                required: &["descriptor"],
                references: &[("descriptor", RefKind::Descriptor)],
                children: &[],
            },
            K::ConnectorBase => &ElementSchema {
                tag: "connectorBase",
                slot: ChildSlot::ConnectorBase,
                identity: Identity::Id { required: false },
                equivalence: Equivalence::Singleton,
                required: &[],
                references: &[],
                children: &[K::CausalConnector],
            },
            K::CausalConnector => &ElementSchema {
                tag: "causalConnector",
                slot: ChildSlot::Connectors,
                identity: Identity::Id { required: true },
                equivalence: Equivalence::Identifier,
                required: &[],
                references: &[],
                children: &[
                    K::ConnectorParam,
                    K::SimpleCondition,
                    K::CompoundCondition,
                    K::SimpleAction,
                    K::CompoundAction,
                ],
            },
            K::ConnectorParam => &ElementSchema {
                tag: "connectorParam",
                slot: ChildSlot::Params,
                identity: Identity::Name,
                equivalence: Equivalence::Identifier,
                required: &[],
                references: &[],
                children: &[],
            },
            K::SimpleCondition => &ElementSchema {
                tag: "simpleCondition",
                slot: ChildSlot::Conditions,
                identity: Identity::None,
                equivalence: Equivalence::Never,
                required: &["role"],
                references: &[],
                children: &[],
            },
            K::CompoundCondition => &ElementSchema {
                tag: "compoundCondition",
                slot: ChildSlot::Conditions,
                identity: Identity::None,
                equivalence: Equivalence::Never,
                required: &["operator"],
                references: &[],
                children: CONDITION_OPERANDS,
            },
            K::AssessmentStatement => &ElementSchema {
                tag: "assessmentStatement",
                slot: ChildSlot::Statements,
                identity: Identity::None,
                equivalence: Equivalence::Never,
                required: &["comparator"],
                references: &[],
                children: &[K::AttributeAssessment, K::ValueAssessment],
            },
            K::AttributeAssessment => &ElementSchema {
                tag: "attributeAssessment",
                slot: ChildSlot::Assessments,
                identity: Identity::None,
                equivalence: Equivalence::Never,
                required: &["role"],
                references: &[],
                children: &[],
            },
            K::ValueAssessment => &ElementSchema {
                tag: "valueAssessment",
                slot: ChildSlot::Assessments,
                identity: Identity::None,
                equivalence: Equivalence::Never,
                required: &["value"],
                references: &[],
                children: &[],
            },
            K::CompoundStatement => &ElementSchema {
                tag: "compoundStatement",
                slot: ChildSlot::Statements,
                identity: Identity::None,
                equivalence: Equivalence::Never,
                required: &["operator"],
                references: &[],
                children: &[K::AssessmentStatement, K::CompoundStatement],
            },
            K::SimpleAction => &ElementSchema {
                tag: "simpleAction",
                slot: ChildSlot::Actions,
                identity: Identity::None,
                equivalence: Equivalence::Never,
                required: &["role"],
                references: &[],
                children: &[],
            },
            K::CompoundAction => &ElementSchema {
                tag: "compoundAction",
                slot: ChildSlot::Actions,
                identity: Identity::None,
                equivalence: Equivalence::Never,
                required: &["operator"],
                references: &[],
                children: &[K::SimpleAction, K::CompoundAction],
            },
            K::RuleBase => &ElementSchema {
                tag: "ruleBase",
                slot: ChildSlot::RuleBase,
                identity: Identity::Id { required: false },
                equivalence: Equivalence::Singleton,
                required: &[],
                references: &[],
                children: RULE_OPERANDS,
            },
            K::Rule => &ElementSchema {
                tag: "rule",
                slot: ChildSlot::Rules,
                identity: Identity::Id { required: true },
                equivalence: Equivalence::Identifier,
                required: &["var", "comparator", "value"],
                references: &[("var", RefKind::Variable)],
                children: &[],
            },
            K::CompositeRule => &ElementSchema {
                tag: "compositeRule",
                slot: ChildSlot::Rules,
                identity: Identity::Id { required: true },
                equivalence: Equivalence::Identifier,
                required: &["operator"],
                references: &[],
                children: RULE_OPERANDS,
            },
            K::Meta => &ElementSchema {
                tag: "meta",
                slot: ChildSlot::Meta,
                identity: Identity::None,
                equivalence: Equivalence::Attributes(&["name", "content"]),
                required: &["name", "content"],
                references: &[],
                children: &[],
            },
            K::Metadata => &ElementSchema {
                tag: "metadata",
                slot: ChildSlot::Metadata,
                identity: Identity::None,
                equivalence: Equivalence::Never,
                required: &[],
                references: &[],
                children: &[],
            },
            K::Port => &ElementSchema {
                tag: "port",
                slot: ChildSlot::Ports,
                identity: Identity::Id { required: true },
                equivalence: Equivalence::Identifier,
                required: &["component"],
                references: &[
                    ("component", RefKind::Node),
                    ("interface", RefKind::Interface),
                ],
                children: &[],
            },
            K::Property => &ElementSchema {
                tag: "property",
                slot: ChildSlot::Properties,
                identity: Identity::Name,
                equivalence: Equivalence::Identifier,
                required: &[],
                references: &[],
                children: &[],
            },
            K::Media => &ElementSchema {
                tag: "media",
                slot: ChildSlot::Nodes,
                identity: Identity::Id { required: true },
                equivalence: Equivalence::Identifier,
                required: &[],
                references: &[
                    ("descriptor", RefKind::Descriptor),
                    ("refer", RefKind::Reuse),
                ],
                children: &[K::Area, K::Property],
            },
            K::Area => &ElementSchema {
                tag: "area",
                slot: ChildSlot::Areas,
                identity: Identity::Id { required: true },
                equivalence: Equivalence::Identifier,
                required: &[],
                references: &[],
                children: &[],
            },
            K::Context => &ElementSchema {
                tag: "context",
                slot: ChildSlot::Nodes,
                identity: Identity::Id { required: true },
                equivalence: Equivalence::Identifier,
                required: &[],
                references: &[("refer", RefKind::Reuse)],
                children: NODES_AND_LINKS,
            },
            K::Switch => &ElementSchema {
                tag: "switch",
                slot: ChildSlot::Nodes,
                identity: Identity::Id { required: true },
                equivalence: Equivalence::Identifier,
                required: &[],
                references: &[("refer", RefKind::Reuse)],
                children: &[
                    K::SwitchPort,
                    K::BindRule,
                    K::DefaultComponent,
                    K::Media,
                    K::Context,
                    K::Switch,
                ],
            },
            K::SwitchPort => &ElementSchema {
                tag: "switchPort",
                slot: ChildSlot::Ports,
                identity: Identity::Id { required: true },
                equivalence: Equivalence::Identifier,
                required: &[],
                references: &[],
                children: &[K::Mapping],
            },
            K::Mapping => &ElementSchema {
                tag: "mapping",
                slot: ChildSlot::Mappings,
                identity: Identity::None,
                equivalence: Equivalence::Attributes(&["component", "interface"]),
                required: &["component"],
                references: &[
                    ("component", RefKind::Node),
                    ("interface", RefKind::Interface),
                ],
                children: &[],
            },
            K::BindRule => &ElementSchema {
                tag: "bindRule",
                slot: ChildSlot::BindRules,
                identity: Identity::None,
                equivalence: Equivalence::Attributes(&["constituent", "rule"]),
                required: &["constituent", "rule"],
                references: &[("constituent", RefKind::Node), ("rule", RefKind::Rule)],
                children: &[],
            },
            K::DefaultComponent => &ElementSchema {
                tag: "defaultComponent",
                slot: ChildSlot::Default,
                identity: Identity::None,
                equivalence: Equivalence::Singleton,
                required: &["component"],
                references: &[("component", RefKind::Node)],
                children: &[],
            },
            K::Link => &ElementSchema {
                tag: "link",
                slot: ChildSlot::Links,
                identity: Identity::Id { required: false },
                equivalence: Equivalence::Identifier,
                required: &["xconnector"],
                references: &[("xconnector", RefKind::Connector)],
                children: &[K::LinkParam, K::Bind],
            },
            K::LinkParam => &ElementSchema {
                tag: "linkParam",
                slot: ChildSlot::Params,
                identity: Identity::Name,
                equivalence: Equivalence::Identifier,
                required: &["value"],
                references: &[("value", RefKind::Parameter)],
                children: &[],
            },
            K::Bind => &ElementSchema {
                tag: "bind",
                slot: ChildSlot::Binds,
                identity: Identity::None,
                equivalence: Equivalence::Attributes(&["role", "component", "interface"]),
                required: &["role", "component"],
                references: &[
                    ("role", RefKind::Role),
                    ("component", RefKind::Node),
                    ("interface", RefKind::Interface),
                    ("descriptor", RefKind::Descriptor),
                ],
                children: &[K::BindParam],
            },
            K::BindParam => &ElementSchema {
                tag: "bindParam",
                slot: ChildSlot::Params,
                identity: Identity::Name,
                equivalence: Equivalence::Identifier,
                required: &["value"],
                references: &[("value", RefKind::Parameter)],
                children: &[],
            },
        }
    }

    /// Markup tag for this kind.
    pub fn tag(&self) -> &'static str {
        self.schema().tag
    }

    /// Resolve a child tag against this kind's accepted children.
    ///
    /// Returns `None` for tags this parent does not know; the builder ignores
    /// those (and their subtrees).
    pub fn child_for_tag(&self, tag: &str) -> Option<ElementKind> {
        self.schema()
            .children
            .iter()
            .copied()
            .find(|child| child.tag() == tag)
    }

    /// Returns true if `child` may be attached under this kind.
    pub fn accepts(&self, child: ElementKind) -> bool {
        self.schema().children.contains(&child)
    }

    /// Reference kind stored under `attribute`, if that attribute is a reference.
    pub fn reference_kind(&self, attribute: &str) -> Option<RefKind> {
        self.schema()
            .references
            .iter()
            .find(|(name, _)| *name == attribute)
            .map(|(_, kind)| *kind)
    }

    /// Returns true for presentation nodes (media, context, switch).
    pub fn is_node(&self) -> bool {
        matches!(self, Self::Media | Self::Context | Self::Switch)
    }

    /// Returns true for elements whose children are nodes and links.
    pub fn is_composition(&self) -> bool {
        matches!(self, Self::Body | Self::Context)
    }

    /// Returns true for the leaves of a connector's expression tree that
    /// declare a role through their `role` attribute.
    pub fn declares_role(&self) -> bool {
        matches!(
            self,
            Self::SimpleCondition | Self::SimpleAction | Self::AttributeAssessment
        )
    }

    /// Returns true for the members of a connector's expression tree.
    ///
    /// Attribute values of these elements written as `$name` refer to the
    /// connector's parameters.
    pub fn is_connector_expression(&self) -> bool {
        matches!(
            self,
            Self::SimpleCondition
                | Self::CompoundCondition
                | Self::AssessmentStatement
                | Self::AttributeAssessment
                | Self::ValueAssessment
                | Self::CompoundStatement
                | Self::SimpleAction
                | Self::CompoundAction
        )
    }

    /// Returns true for condition operands (conditions and statements).
    pub fn is_condition(&self) -> bool {
        matches!(
            self,
            Self::SimpleCondition
                | Self::CompoundCondition
                | Self::AssessmentStatement
                | Self::CompoundStatement
        )
    }

    /// Returns true for action operands.
    pub fn is_action(&self) -> bool {
        matches!(self, Self::SimpleAction | Self::CompoundAction)
    }

    /// Returns true for the head's bases.
    pub fn is_base(&self) -> bool {
        matches!(
            self,
            Self::RegionBase | Self::DescriptorBase | Self::ConnectorBase | Self::RuleBase
        )
    }
}

impl std::fmt::Display for ElementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}
