//! Knowledge base import and load.

use rusqlite::params;
use serde::{Deserialize, Serialize};

use super::{Database, DbError, DbResult};
use crate::knowledge::{Catalog, KnowledgeBase, LoadResult, RuleSet};
use crate::models::{Drug, Interaction, RiskLevel};

/// Row counts of the stored knowledge base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeStats {
    pub drugs: usize,
    pub interactions: usize,
}

impl Database {
    /// Replace the stored knowledge base with `kb`.
    ///
    /// Runs in one transaction: on error the previous content is kept.
    pub fn import_knowledge(&mut self, kb: &KnowledgeBase) -> DbResult<KnowledgeStats> {
        let tx = self.conn.transaction()?;

        tx.execute_batch(
            r#"
            DELETE FROM interaction_drugs;
            DELETE FROM interactions;
            DELETE FROM drugs;
            "#,
        )?;

        {
            let mut insert_drug = tx.prepare(
                "INSERT INTO drugs (id, name, instruction, side_effects) VALUES (?1, ?2, ?3, ?4)",
            )?;
            for drug in kb.catalog().all() {
                let side_effects_json = serde_json::to_string(&drug.side_effects)?;
                insert_drug.execute(params![
                    drug.id,
                    drug.name,
                    drug.instruction,
                    side_effects_json
                ])?;
            }

            let mut insert_rule =
                tx.prepare("INSERT INTO interactions (description, risk_level) VALUES (?1, ?2)")?;
            let mut insert_member = tx.prepare(
                "INSERT OR IGNORE INTO interaction_drugs (interaction_id, drug_id) VALUES (?1, ?2)",
            )?;
            for rule in kb.rules() {
                insert_rule.execute(params![rule.description, rule.risk_level.as_str()])?;
                let interaction_id = tx.last_insert_rowid();
                for drug_id in &rule.drug_ids {
                    insert_member.execute(params![interaction_id, drug_id])?;
                }
            }
        }

        tx.commit()?;

        Ok(KnowledgeStats {
            drugs: kb.catalog().len(),
            interactions: kb.rules().len(),
        })
    }

    /// Load the stored knowledge base. Rules come back in import order.
    pub fn load_knowledge(&self) -> LoadResult<KnowledgeBase> {
        let catalog = Catalog::from_drugs(self.list_drugs()?);
        let rules = RuleSet::from_rules(self.list_interactions()?)?;
        Ok(KnowledgeBase::new(catalog, rules))
    }

    /// Current row counts.
    pub fn knowledge_stats(&self) -> DbResult<KnowledgeStats> {
        let drugs: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM drugs", [], |row| row.get(0))?;
        let interactions: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM interactions", [], |row| row.get(0))?;
        Ok(KnowledgeStats {
            drugs: drugs as usize,
            interactions: interactions as usize,
        })
    }

    fn list_drugs(&self) -> DbResult<Vec<Drug>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, instruction, side_effects FROM drugs ORDER BY id")?;
        let rows = stmt.query_map([], |row| {
            Ok(DrugRow {
                id: row.get(0)?,
                name: row.get(1)?,
                instruction: row.get(2)?,
                side_effects: row.get(3)?,
            })
        })?;

        let mut drugs = Vec::new();
        for row in rows {
            drugs.push(row?.try_into()?);
        }
        Ok(drugs)
    }

    fn list_interactions(&self) -> DbResult<Vec<Interaction>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT i.id, i.description, i.risk_level, idr.drug_id
            FROM interactions i
            LEFT JOIN interaction_drugs idr ON idr.interaction_id = i.id
            ORDER BY i.id, idr.drug_id
            "#,
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, Option<String>>(3)?,
            ))
        })?;

        // Rows arrive grouped by interaction id
        let mut rules: Vec<(i64, Interaction)> = Vec::new();
        for row in rows {
            let (id, description, risk_level, drug_id) = row?;
            match rules.last_mut() {
                Some((last_id, rule)) if *last_id == id => {
                    rule.drug_ids.extend(drug_id);
                }
                _ => {
                    let rule =
                        Interaction::new(drug_id, RiskLevel::from(risk_level), description);
                    rules.push((id, rule));
                }
            }
        }
        Ok(rules.into_iter().map(|(_, rule)| rule).collect())
    }
}

/// Intermediate row struct for database mapping.
struct DrugRow {
    id: String,
    name: String,
    instruction: Option<String>,
    side_effects: String,
}

impl TryFrom<DrugRow> for Drug {
    type Error = DbError;

    fn try_from(row: DrugRow) -> Result<Self, Self::Error> {
        Ok(Drug {
            id: row.id,
            name: row.name,
            instruction: row.instruction,
            side_effects: serde_json::from_str(&row.side_effects)?,
        })
    }
}
