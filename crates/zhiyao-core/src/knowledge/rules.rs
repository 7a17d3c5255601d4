//! Interaction rule set.

use std::path::Path;

use super::{parse_records, read_records, LoadError, LoadResult};
use crate::models::Interaction;

/// Ordered, immutable collection of interaction rules.
///
/// Load order is preserved and is the order checks report in.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Interaction>,
}

impl RuleSet {
    /// Build a rule set, rejecting rules that name no drugs.
    pub fn from_rules(rules: Vec<Interaction>) -> LoadResult<Self> {
        if let Some(index) = rules.iter().position(|rule| rule.drug_ids.is_empty()) {
            return Err(LoadError::Invalid(format!(
                "interaction #{} lists no drugs",
                index + 1
            )));
        }
        Ok(Self { rules })
    }

    /// Load from a JSON file holding an array of interaction records.
    pub fn load<P: AsRef<Path>>(path: P) -> LoadResult<Self> {
        Self::from_rules(read_records(path.as_ref())?)
    }

    /// Parse from a JSON string holding an array of interaction records.
    pub fn from_json_str(json: &str) -> LoadResult<Self> {
        Self::from_rules(parse_records(json, "interaction rules")?)
    }

    /// Rules in load order.
    pub fn iter(&self) -> std::slice::Iter<'_, Interaction> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Interaction;
    type IntoIter = std::slice::Iter<'a, Interaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RiskLevel;

    #[test]
    fn test_from_json_str_preserves_order() {
        let rules = RuleSet::from_json_str(
            r#"[
                {"drugs": ["A", "B"], "risk_level": "yellow", "description": "first"},
                {"drugs": ["B", "C"], "risk_level": "red", "description": "second"}
            ]"#,
        )
        .unwrap();

        let descriptions: Vec<&str> = rules.iter().map(|r| r.description.as_str()).collect();
        assert_eq!(descriptions, vec!["first", "second"]);
        assert_eq!(rules.iter().nth(1).unwrap().risk_level, RiskLevel::Red);
    }

    #[test]
    fn test_rejects_missing_description() {
        let result = RuleSet::from_json_str(r#"[{"drugs": ["A", "B"], "risk_level": "red"}]"#);
        assert!(matches!(result, Err(LoadError::Malformed { .. })));
    }

    #[test]
    fn test_rejects_non_string_drug() {
        let result = RuleSet::from_json_str(
            r#"[{"drugs": ["A", 2], "risk_level": "red", "description": "x"}]"#,
        );
        assert!(matches!(result, Err(LoadError::Malformed { .. })));
    }

    #[test]
    fn test_rejects_empty_drug_list() {
        let result = RuleSet::from_json_str(
            r#"[
                {"drugs": ["A", "B"], "risk_level": "red", "description": "ok"},
                {"drugs": [], "risk_level": "red", "description": "empty"}
            ]"#,
        );
        match result {
            Err(LoadError::Invalid(msg)) => assert!(msg.contains("#2")),
            other => panic!("expected invalid data, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_risk_level_kept() {
        let rules = RuleSet::from_json_str(
            r#"[{"drugs": ["A", "B"], "risk_level": "info", "description": "x"}]"#,
        )
        .unwrap();
        assert_eq!(
            rules.iter().next().unwrap().risk_level,
            RiskLevel::Other("info".into())
        );
    }
}
