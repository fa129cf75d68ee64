//! Operators and comparators used by the boolean trees.
//!
//! Only the vocabularies the structural trees depend on live here; the wider
//! NCL enumerations (colors, mime types, keys) are kept as plain text.

use super::ElementKind;

/// Boolean operator of compound conditions, compound statements and composite rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operator {
    And,
    Or,
}

impl Operator {
    pub fn parse(text: &str) -> Option<Self> {
        match text {
            "and" => Some(Self::And),
            "or" => Some(Self::Or),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Or => "or",
        }
    }
}

/// Scheduling operator of compound actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActionOperator {
    Par,
    Seq,
}

impl ActionOperator {
    pub fn parse(text: &str) -> Option<Self> {
        match text {
            "par" => Some(Self::Par),
            "seq" => Some(Self::Seq),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Par => "par",
            Self::Seq => "seq",
        }
    }
}

/// Comparator of rules and assessment statements.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Comparator {
    Eq,
    Ne,
    Gt,
    Lt,
    Gte,
    Lte,
}

impl Comparator {
    pub fn parse(text: &str) -> Option<Self> {
        match text {
            "eq" => Some(Self::Eq),
            "ne" => Some(Self::Ne),
            "gt" => Some(Self::Gt),
            "lt" => Some(Self::Lt),
            "gte" => Some(Self::Gte),
            "lte" => Some(Self::Lte),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Ne => "ne",
            Self::Gt => "gt",
            Self::Lt => "lt",
            Self::Gte => "gte",
            Self::Lte => "lte",
        }
    }
}

/// A closed vocabulary attached to one attribute of one kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Vocabulary {
    Operator,
    ActionOperator,
    Comparator,
}

impl Vocabulary {
    /// The vocabulary constraining `attribute` on `kind`, if any.
    pub fn of(kind: ElementKind, attribute: &str) -> Option<Self> {
        use ElementKind as K;
        match (kind, attribute) {
            (K::CompoundCondition | K::CompoundStatement | K::CompositeRule, "operator") => {
                Some(Self::Operator)
            }
            (K::CompoundAction, "operator") => Some(Self::ActionOperator),
            (K::Rule | K::AssessmentStatement, "comparator") => Some(Self::Comparator),
            _ => None,
        }
    }

    /// The attribute this vocabulary constrains.
    pub fn attribute(&self) -> &'static str {
        match self {
            Self::Operator | Self::ActionOperator => "operator",
            Self::Comparator => "comparator",
        }
    }

    pub fn accepts(&self, text: &str) -> bool {
        match self {
            Self::Operator => Operator::parse(text).is_some(),
            Self::ActionOperator => ActionOperator::parse(text).is_some(),
            Self::Comparator => Comparator::parse(text).is_some(),
        }
    }
}
