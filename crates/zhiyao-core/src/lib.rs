//! Zhiyao Core Library
//!
//! Medication tracking with drug interaction warnings.
//!
//! # Architecture
//!
//! ```text
//!   drugs.json ─┐                     ┌─ SQLite knowledge store
//!               ├──► KnowledgeBase ◄──┘
//! interactions ─┘   (Catalog + RuleSet, read-only, shared via Arc)
//!                           │
//!          MedicationList ──┼──► InteractionChecker ──► triggered rules
//!          (per user)       │                           (load order)
//!                           └──► DailyPlan
//! ```
//!
//! # Core Principle
//!
//! A rule triggers iff all of its drugs are currently taken, and never for
//! fewer than two distinct drugs. The library never logs or prints: it hands
//! structured results to the caller.
//!
//! # Modules
//!
//! - [`models`]: Domain types (Drug, Interaction, RiskLevel)
//! - [`knowledge`]: Catalog and rule set loading
//! - [`checker`]: Interaction checking
//! - [`user`]: Users and medication lists
//! - [`schedule`]: Daily dosing plan from instructions
//! - [`session`]: Thread-safe per-user session
//! - [`db`]: SQLite knowledge store

pub mod checker;
pub mod db;
pub mod knowledge;
pub mod models;
pub mod schedule;
pub mod session;
pub mod user;

// Re-export commonly used types
pub use checker::{most_severe, InteractionChecker};
pub use db::{Database, DbError, KnowledgeStats};
pub use knowledge::{Catalog, KnowledgeBase, LoadError, RuleSet};
pub use models::{Drug, Interaction, RiskLevel};
pub use schedule::{DailyPlan, DoseFrequency, PlanEntry};
pub use session::{Added, RiskReport, Session, SessionError};
pub use user::{MedicationList, User};
