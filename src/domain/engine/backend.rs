//! Backend identifiers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A response source the engine can consult.
///
/// Ordered primary < secondary < rule-based, which is also the order
/// `BackendSet` iterates in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// Primary generative backend (OpenAI).
    Primary,
    /// Secondary generative backend (Gemini).
    Secondary,
    /// Deterministic pattern-table responder.
    RuleBased,
}

impl BackendKind {
    /// Returns the stable identifier used in logs and status reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::RuleBased => "rule_based",
        }
    }

    /// Returns the name of the service behind this backend.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Primary => "openai",
            Self::Secondary => "gemini",
            Self::RuleBased => "rule-based",
        }
    }

    /// Returns true for the remote generative backends.
    pub fn is_generative(&self) -> bool {
        !matches!(self, Self::RuleBased)
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The set of backends usable for the lifetime of an orchestrator.
///
/// Computed once from successful initialization; never shrinks when a
/// single call fails.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BackendSet(BTreeSet<BackendKind>);

impl BackendSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a backend.
    pub fn insert(&mut self, kind: BackendKind) {
        self.0.insert(kind);
    }

    /// Returns true if the backend is usable.
    pub fn contains(&self, kind: BackendKind) -> bool {
        self.0.contains(&kind)
    }

    /// Returns true if no backend is usable.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of usable backends.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates in primary, secondary, rule-based order.
    pub fn iter(&self) -> impl Iterator<Item = BackendKind> + '_ {
        self.0.iter().copied()
    }

    /// Comma-joined display names, e.g. `"openai, rule-based"`.
    pub fn describe(&self) -> String {
        self.iter()
            .map(|kind| kind.display_name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromIterator<BackendKind> for BackendSet {
    fn from_iter<I: IntoIterator<Item = BackendKind>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_iterates_in_priority_order() {
        let set: BackendSet = [BackendKind::RuleBased, BackendKind::Primary]
            .into_iter()
            .collect();
        let kinds: Vec<_> = set.iter().collect();
        assert_eq!(kinds, vec![BackendKind::Primary, BackendKind::RuleBased]);
    }

    #[test]
    fn describe_joins_display_names() {
        let set: BackendSet = [
            BackendKind::Secondary,
            BackendKind::Primary,
            BackendKind::RuleBased,
        ]
        .into_iter()
        .collect();
        assert_eq!(set.describe(), "openai, gemini, rule-based");
        assert_eq!(BackendSet::new().describe(), "");
    }

    #[test]
    fn generative_classification() {
        assert!(BackendKind::Primary.is_generative());
        assert!(BackendKind::Secondary.is_generative());
        assert!(!BackendKind::RuleBased.is_generative());
    }

    #[test]
    fn set_serializes_as_list() {
        let set: BackendSet = [BackendKind::RuleBased, BackendKind::Secondary]
            .into_iter()
            .collect();
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"["secondary","rule_based"]"#);
    }
}
