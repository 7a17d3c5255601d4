//! Interaction rule models.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Severity classification of an interaction rule.
///
/// Only `red` and `yellow` carry special meaning; any other value is kept
/// verbatim and treated as informational.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RiskLevel {
    /// Severe: the combination should be avoided
    Red,
    /// Caution: the combination needs monitoring
    Yellow,
    /// Anything else found in the data
    Other(String),
}

impl RiskLevel {
    /// Rank used to pick the most severe rule. Higher is worse.
    pub fn severity(&self) -> u8 {
        match self {
            RiskLevel::Red => 2,
            RiskLevel::Yellow => 1,
            RiskLevel::Other(_) => 0,
        }
    }

    /// The level as written in the source data.
    pub fn as_str(&self) -> &str {
        match self {
            RiskLevel::Red => "red",
            RiskLevel::Yellow => "yellow",
            RiskLevel::Other(level) => level,
        }
    }
}

impl From<String> for RiskLevel {
    fn from(level: String) -> Self {
        match level.as_str() {
            "red" => RiskLevel::Red,
            "yellow" => RiskLevel::Yellow,
            _ => RiskLevel::Other(level),
        }
    }
}

impl From<&str> for RiskLevel {
    fn from(level: &str) -> Self {
        RiskLevel::from(level.to_string())
    }
}

impl From<RiskLevel> for String {
    fn from(level: RiskLevel) -> Self {
        match level {
            RiskLevel::Other(level) => level,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A known interaction: the minimal combination of drugs that triggers it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    /// Drug ids that must all be present. Duplicates in the source collapse.
    #[serde(rename = "drugs")]
    pub drug_ids: BTreeSet<String>,
    /// Severity
    pub risk_level: RiskLevel,
    /// Explanation shown to the user
    pub description: String,
}

impl Interaction {
    /// Create a new rule from any iterable of drug ids.
    pub fn new<I, S>(drug_ids: I, risk_level: RiskLevel, description: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            drug_ids: drug_ids.into_iter().map(Into::into).collect(),
            risk_level,
            description: description.into(),
        }
    }

    /// True when every drug of this rule is in `current_ids`.
    pub fn is_triggered_by(&self, current_ids: &BTreeSet<&str>) -> bool {
        self.drug_ids
            .iter()
            .all(|id| current_ids.contains(id.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_level_parsing() {
        assert_eq!(RiskLevel::from("red"), RiskLevel::Red);
        assert_eq!(RiskLevel::from("yellow"), RiskLevel::Yellow);
        assert_eq!(RiskLevel::from("green"), RiskLevel::Other("green".into()));
        // Case sensitive, like the data
        assert_eq!(RiskLevel::from("RED"), RiskLevel::Other("RED".into()));
    }

    #[test]
    fn test_risk_level_severity_order() {
        assert!(RiskLevel::Red.severity() > RiskLevel::Yellow.severity());
        assert!(RiskLevel::Yellow.severity() > RiskLevel::from("blue").severity());
    }

    #[test]
    fn test_risk_level_serializes_verbatim() {
        let json = serde_json::to_string(&RiskLevel::from("blue")).unwrap();
        assert_eq!(json, r#""blue""#);
        let json = serde_json::to_string(&RiskLevel::Red).unwrap();
        assert_eq!(json, r#""red""#);
    }

    #[test]
    fn test_duplicate_drug_ids_collapse() {
        let json = r#"{"drugs": ["A", "B", "A"], "risk_level": "red", "description": "x"}"#;
        let rule: Interaction = serde_json::from_str(json).unwrap();
        assert_eq!(rule.drug_ids.len(), 2);
    }

    #[test]
    fn test_is_triggered_by_subset() {
        let rule = Interaction::new(["A", "B"], RiskLevel::Red, "bleeding risk");

        let both: BTreeSet<&str> = ["A", "B", "C"].into_iter().collect();
        let missing_one: BTreeSet<&str> = ["A", "C"].into_iter().collect();

        assert!(rule.is_triggered_by(&both));
        assert!(!rule.is_triggered_by(&missing_one));
    }
}
