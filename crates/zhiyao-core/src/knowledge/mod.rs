//! Knowledge base: the drug catalog and the interaction rule set.
//!
//! Both are loaded once, atomically, and are read-only afterwards. A failed
//! load never hands back a partially filled catalog or rule set.

mod catalog;
mod rules;

pub use catalog::*;
pub use rules::*;

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::checker::InteractionChecker;
use crate::db::DbError;

/// Knowledge loading errors.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed data in {origin}: {source}")]
    Malformed {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid data: {0}")]
    Invalid(String),

    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

pub type LoadResult<T> = Result<T, LoadError>;

/// Process-wide read-only knowledge: catalog plus rules.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    catalog: Catalog,
    rules: RuleSet,
}

impl KnowledgeBase {
    /// Assemble a knowledge base from already loaded parts.
    pub fn new(catalog: Catalog, rules: RuleSet) -> Self {
        Self { catalog, rules }
    }

    /// Load both JSON sources. Fails if either one fails.
    pub fn load<P, Q>(drugs_path: P, interactions_path: Q) -> LoadResult<Self>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let catalog = Catalog::load(drugs_path)?;
        let rules = RuleSet::load(interactions_path)?;
        Ok(Self::new(catalog, rules))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// A checker bound to this knowledge base's rules.
    pub fn checker(&self) -> InteractionChecker<'_> {
        InteractionChecker::new(&self.rules)
    }

    /// Drug ids referenced by some rule but missing from the catalog.
    ///
    /// Such rules can never trigger through catalog lookups. They are allowed,
    /// but worth reporting to whoever maintains the data.
    pub fn dangling_drug_ids(&self) -> BTreeSet<&str> {
        self.rules
            .iter()
            .flat_map(|rule| rule.drug_ids.iter())
            .map(String::as_str)
            .filter(|id| self.catalog.find_by_id(id).is_none())
            .collect()
    }
}

/// Read a file holding a JSON array of records.
fn read_records<T: DeserializeOwned>(path: &Path) -> LoadResult<Vec<T>> {
    let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_records(&content, &path.display().to_string())
}

/// Parse a JSON array of records. `origin` names the source in errors.
fn parse_records<T: DeserializeOwned>(json: &str, origin: &str) -> LoadResult<Vec<T>> {
    serde_json::from_str(json).map_err(|source| LoadError::Malformed {
        origin: origin.to_string(),
        source,
    })
}
