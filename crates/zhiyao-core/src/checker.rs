//! Interaction checker.
//!
//! A rule triggers when all of its drugs are in the current medication set.
//! Results come back in rule load order, not severity order.

use std::collections::BTreeSet;

use crate::knowledge::RuleSet;
use crate::models::{Drug, Interaction};
use crate::user::MedicationList;

/// Fewer distinct drugs than this never trigger anything.
pub const MIN_DRUGS_FOR_INTERACTION: usize = 2;

/// Checks medication sets against a rule set. Holds no state of its own.
#[derive(Debug, Clone, Copy)]
pub struct InteractionChecker<'a> {
    rules: &'a RuleSet,
}

impl<'a> InteractionChecker<'a> {
    pub fn new(rules: &'a RuleSet) -> Self {
        Self { rules }
    }

    /// Rules triggered by a user's medication list.
    pub fn check(&self, medications: &MedicationList) -> Vec<&'a Interaction> {
        self.check_ids(&medications.ids())
    }

    /// Rules triggered by an arbitrary collection of drugs. Duplicate ids
    /// count once.
    pub fn check_drugs<'d, I>(&self, drugs: I) -> Vec<&'a Interaction>
    where
        I: IntoIterator<Item = &'d Drug>,
    {
        let ids: BTreeSet<&str> = drugs.into_iter().map(|drug| drug.id.as_str()).collect();
        self.check_ids(&ids)
    }

    fn check_ids(&self, current_ids: &BTreeSet<&str>) -> Vec<&'a Interaction> {
        // Single-drug rules would otherwise fire for a lone drug
        if current_ids.len() < MIN_DRUGS_FOR_INTERACTION {
            return Vec::new();
        }

        self.rules
            .iter()
            .filter(|rule| rule.is_triggered_by(current_ids))
            .collect()
    }
}

/// The most severe of the triggered rules, earliest first on ties.
pub fn most_severe<'a>(triggered: &[&'a Interaction]) -> Option<&'a Interaction> {
    let mut best: Option<&'a Interaction> = None;
    for &rule in triggered {
        if best.map_or(true, |b| rule.risk_level.severity() > b.risk_level.severity()) {
            best = Some(rule);
        }
    }
    best
}
