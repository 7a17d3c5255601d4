//! Thread-safe user session over a shared knowledge base.
//!
//! The knowledge base is read-only and shared through an `Arc`. The user's
//! medication list sits behind a per-session `Mutex`, and every check runs
//! under the same lock as add/remove.

use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::checker::most_severe;
use crate::knowledge::KnowledgeBase;
use crate::models::{Drug, Interaction};
use crate::schedule::DailyPlan;
use crate::user::User;

/// Session errors.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Drug not found: {0}")]
    NotFound(String),

    #[error("Lock poisoned: {0}")]
    LockPoisoned(String),
}

impl<T> From<std::sync::PoisonError<T>> for SessionError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        SessionError::LockPoisoned(e.to_string())
    }
}

pub type SessionResult<T> = Result<T, SessionError>;

/// Outcome of adding a drug by id.
#[derive(Debug, Clone, PartialEq)]
pub enum Added {
    /// The drug was added to the list
    New(Drug),
    /// The drug was already listed; nothing changed
    AlreadyListed(Drug),
}

impl Added {
    pub fn drug(&self) -> &Drug {
        match self {
            Added::New(drug) | Added::AlreadyListed(drug) => drug,
        }
    }
}

/// Snapshot of a user's medications and the rules they trigger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskReport {
    /// User display name
    pub user: String,
    /// Current drugs, sorted by id
    pub medications: Vec<Drug>,
    /// Triggered rules, in rule load order
    pub interactions: Vec<Interaction>,
}

impl RiskReport {
    /// The most severe triggered rule, if any.
    pub fn most_severe(&self) -> Option<&Interaction> {
        let triggered: Vec<&Interaction> = self.interactions.iter().collect();
        most_severe(&triggered)
    }

    pub fn is_clear(&self) -> bool {
        self.interactions.is_empty()
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// One user's session.
pub struct Session {
    knowledge: Arc<KnowledgeBase>,
    user: Mutex<User>,
}

impl Session {
    /// Start a session with an empty medication list.
    pub fn new(knowledge: Arc<KnowledgeBase>, user_name: impl Into<String>) -> Self {
        Self {
            knowledge,
            user: Mutex::new(User::new(user_name)),
        }
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    fn user(&self) -> SessionResult<MutexGuard<'_, User>> {
        Ok(self.user.lock()?)
    }

    /// Snapshot of the user.
    pub fn user_snapshot(&self) -> SessionResult<User> {
        Ok(self.user()?.clone())
    }

    /// Look up `drug_id` in the catalog and add it to the list.
    pub fn add_drug(&self, drug_id: &str) -> SessionResult<Added> {
        let drug = self
            .knowledge
            .catalog()
            .find_by_id(drug_id)
            .cloned()
            .ok_or_else(|| SessionError::NotFound(drug_id.to_string()))?;

        let mut user = self.user()?;
        if user.medications.add(drug.clone()) {
            Ok(Added::New(drug))
        } else {
            Ok(Added::AlreadyListed(drug))
        }
    }

    /// Remove by id. `Ok(None)` means nothing was listed under that id.
    pub fn remove_drug(&self, drug_id: &str) -> SessionResult<Option<Drug>> {
        Ok(self.user()?.medications.remove(drug_id))
    }

    /// Add every catalog drug whose name appears in `text` and is not
    /// already listed. Returns the drugs that were added.
    pub fn add_mentioned(&self, text: &str) -> SessionResult<Vec<Drug>> {
        let mentioned = self.knowledge.catalog().mentioned_in(text);
        let mut user = self.user()?;
        Ok(mentioned
            .into_iter()
            .filter(|drug| user.medications.add((*drug).clone()))
            .cloned()
            .collect())
    }

    /// Check the current list against the rule set.
    pub fn check(&self) -> SessionResult<RiskReport> {
        let user = self.user()?;
        let interactions = self
            .knowledge
            .checker()
            .check(&user.medications)
            .into_iter()
            .cloned()
            .collect();

        Ok(RiskReport {
            user: user.name.clone(),
            medications: user.medications.medications().cloned().collect(),
            interactions,
        })
    }

    /// Today's dosing plan for the current list.
    pub fn plan(&self) -> SessionResult<DailyPlan> {
        let user = self.user()?;
        Ok(DailyPlan::for_drugs(&user.medications))
    }
}
