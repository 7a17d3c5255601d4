//! Drug catalog.

use std::collections::BTreeMap;
use std::path::Path;

use super::{parse_records, read_records, LoadResult};
use crate::models::Drug;

/// Immutable id → drug mapping.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    drugs: BTreeMap<String, Drug>,
}

impl Catalog {
    /// Build a catalog from drugs. A later drug with an id already seen
    /// replaces the earlier one.
    pub fn from_drugs<I: IntoIterator<Item = Drug>>(drugs: I) -> Self {
        let drugs = drugs
            .into_iter()
            .map(|drug| (drug.id.clone(), drug))
            .collect();
        Self { drugs }
    }

    /// Load from a JSON file holding an array of drug records.
    pub fn load<P: AsRef<Path>>(path: P) -> LoadResult<Self> {
        let records: Vec<Drug> = read_records(path.as_ref())?;
        Ok(Self::from_drugs(records))
    }

    /// Parse from a JSON string holding an array of drug records.
    pub fn from_json_str(json: &str) -> LoadResult<Self> {
        let records: Vec<Drug> = parse_records(json, "drug catalog")?;
        Ok(Self::from_drugs(records))
    }

    /// Exact-match lookup.
    pub fn find_by_id(&self, id: &str) -> Option<&Drug> {
        self.drugs.get(id)
    }

    /// All drugs, sorted by id.
    pub fn all(&self) -> impl Iterator<Item = &Drug> + '_ {
        self.drugs.values()
    }

    pub fn len(&self) -> usize {
        self.drugs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drugs.is_empty()
    }

    /// Drugs whose full display name appears verbatim in `text`, sorted by id.
    ///
    /// Used for prescription text (typed or OCR'd). Exact containment only.
    pub fn mentioned_in(&self, text: &str) -> Vec<&Drug> {
        self.drugs
            .values()
            .filter(|drug| !drug.name.is_empty() && text.contains(drug.name.as_str()))
            .collect()
    }
}
