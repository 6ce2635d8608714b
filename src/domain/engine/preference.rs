//! Backend preference policy.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::backend::BackendKind;

/// Declared ordering policy for trying backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum Preference {
    /// Primary, then secondary, then rule-based.
    #[default]
    Auto,
    /// Primary first.
    PreferPrimary,
    /// Secondary first.
    PreferSecondary,
    /// Never consult a generative backend.
    RuleBasedOnly,
}

const PRIMARY_FIRST: &[BackendKind] = &[
    BackendKind::Primary,
    BackendKind::Secondary,
    BackendKind::RuleBased,
];

const SECONDARY_FIRST: &[BackendKind] = &[
    BackendKind::Secondary,
    BackendKind::Primary,
    BackendKind::RuleBased,
];

const RULES_ONLY: &[BackendKind] = &[BackendKind::RuleBased];

impl Preference {
    /// The fallback chain for this preference.
    ///
    /// Every chain ends with the rule-based path. A failed or unavailable
    /// generative candidate always falls through to the next entry.
    pub fn candidates(&self) -> &'static [BackendKind] {
        match self {
            Self::Auto | Self::PreferPrimary => PRIMARY_FIRST,
            Self::PreferSecondary => SECONDARY_FIRST,
            Self::RuleBasedOnly => RULES_ONLY,
        }
    }

    /// Picks a preference from the credentials present at startup.
    pub fn from_credentials(has_primary: bool, has_secondary: bool) -> Self {
        if has_primary {
            Self::PreferPrimary
        } else if has_secondary {
            Self::PreferSecondary
        } else {
            Self::RuleBasedOnly
        }
    }

    /// Returns the canonical identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::PreferPrimary => "prefer_primary",
            Self::PreferSecondary => "prefer_secondary",
            Self::RuleBasedOnly => "rule_based_only",
        }
    }
}

impl fmt::Display for Preference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognised preference name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown model preference '{0}' (expected auto, openai, gemini or rules)")]
pub struct ParsePreferenceError(pub String);

impl FromStr for Preference {
    type Err = ParsePreferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "auto" => Ok(Self::Auto),
            "primary" | "prefer_primary" | "openai" => Ok(Self::PreferPrimary),
            "secondary" | "prefer_secondary" | "gemini" => Ok(Self::PreferSecondary),
            "rule_based" | "rule_based_only" | "rules" | "nltk" => Ok(Self::RuleBasedOnly),
            _ => Err(ParsePreferenceError(s.to_string())),
        }
    }
}

impl TryFrom<String> for Preference {
    type Error = ParsePreferenceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
