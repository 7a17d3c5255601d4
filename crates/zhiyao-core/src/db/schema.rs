//! SQLite schema definition.

/// Complete database schema for the knowledge store.
pub const SCHEMA: &str = r#"
-- Enable foreign keys
PRAGMA foreign_keys = ON;

-- ============================================================================
-- Drugs
-- ============================================================================

CREATE TABLE IF NOT EXISTS drugs (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    instruction TEXT,
    side_effects TEXT NOT NULL DEFAULT '[]'       -- JSON array of strings
);

-- ============================================================================
-- Interactions
-- ============================================================================

-- Row id order is load order
CREATE TABLE IF NOT EXISTS interactions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    description TEXT NOT NULL,
    risk_level TEXT NOT NULL
);

-- drug_id is not a foreign key: rules may name drugs missing from the catalog
CREATE TABLE IF NOT EXISTS interaction_drugs (
    interaction_id INTEGER NOT NULL REFERENCES interactions(id) ON DELETE CASCADE,
    drug_id TEXT NOT NULL,
    PRIMARY KEY (interaction_id, drug_id)
);

CREATE INDEX IF NOT EXISTS idx_interaction_drugs_drug ON interaction_drugs(drug_id);
"#;
