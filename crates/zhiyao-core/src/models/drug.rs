//! Drug models.

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// A medication known to the catalog.
///
/// Identity is the `id` alone: two drugs with the same id are the same entity,
/// whatever their other fields say.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Drug {
    /// Stable unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Free-text dosing instruction (e.g., "每日一次，餐后服用")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instruction: Option<String>,
    /// Known side effects
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub side_effects: Vec<String>,
}

impl Drug {
    /// Create a new drug with required fields.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            instruction: None,
            side_effects: Vec::new(),
        }
    }

    /// Attach a dosing instruction.
    pub fn with_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.instruction = Some(instruction.into());
        self
    }
}

impl PartialEq for Drug {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Drug {}

impl Hash for Drug {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_is_by_id() {
        let a = Drug::new("D001", "Aspirin");
        let renamed = Drug::new("D001", "Acetylsalicylic acid");
        let other = Drug::new("D002", "Aspirin");

        assert_eq!(a, renamed);
        assert_ne!(a, other);
    }

    #[test]
    fn test_optional_fields_default() {
        let drug: Drug = serde_json::from_str(r#"{"id": "D001", "name": "Aspirin"}"#).unwrap();
        assert_eq!(drug.instruction, None);
        assert!(drug.side_effects.is_empty());
    }

    #[test]
    fn test_missing_name_is_rejected() {
        let result: Result<Drug, _> = serde_json::from_str(r#"{"id": "D001"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_full_record() {
        let json = r#"{
            "id": "D003",
            "name": "Ibuprofen",
            "instruction": "每6-8小时一次",
            "side_effects": ["nausea", "heartburn"]
        }"#;
        let drug: Drug = serde_json::from_str(json).unwrap();
        assert_eq!(drug.instruction.as_deref(), Some("每6-8小时一次"));
        assert_eq!(drug.side_effects, vec!["nausea", "heartburn"]);
    }
}
