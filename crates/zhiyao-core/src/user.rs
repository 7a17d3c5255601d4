//! Users and their medication lists.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::models::Drug;

/// The set of drugs a user currently takes, keyed by drug id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MedicationList {
    drugs: BTreeMap<String, Drug>,
}

impl MedicationList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a drug. Returns `false` when a drug with this id is already
    /// listed; the stored entry is left untouched in that case.
    pub fn add(&mut self, drug: Drug) -> bool {
        if self.drugs.contains_key(&drug.id) {
            return false;
        }
        self.drugs.insert(drug.id.clone(), drug);
        true
    }

    /// Remove by id. `None` means nothing was listed under that id.
    pub fn remove(&mut self, drug_id: &str) -> Option<Drug> {
        self.drugs.remove(drug_id)
    }

    pub fn contains(&self, drug_id: &str) -> bool {
        self.drugs.contains_key(drug_id)
    }

    /// Current drugs, sorted by id.
    pub fn medications(&self) -> impl Iterator<Item = &Drug> + '_ {
        self.drugs.values()
    }

    /// Ids of the current drugs.
    pub fn ids(&self) -> BTreeSet<&str> {
        self.drugs.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.drugs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drugs.is_empty()
    }
}

impl<'a> IntoIterator for &'a MedicationList {
    type Item = &'a Drug;
    type IntoIter = std::collections::btree_map::Values<'a, String, Drug>;

    fn into_iter(self) -> Self::IntoIter {
        self.drugs.values()
    }
}

impl FromIterator<Drug> for MedicationList {
    fn from_iter<I: IntoIterator<Item = Drug>>(iter: I) -> Self {
        let mut list = Self::new();
        for drug in iter {
            list.add(drug);
        }
        list
    }
}

/// A user session's owner.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    /// Local UUID, generated per session
    pub id: String,
    /// Display name
    pub name: String,
    /// Drugs currently taken
    pub medications: MedicationList,
}

impl User {
    /// Create a user with an empty medication list.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            medications: MedicationList::new(),
        }
    }
}
