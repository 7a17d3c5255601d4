//! Daily dosing plan derived from drug instructions.
//!
//! Instructions are free text. Recognized frequencies:
//! - once daily: 07:30 when taken before meals, otherwise 08:30
//! - twice daily: 08:30 and 18:30
//! - every 6-8 hours: 08:00, 15:00 and 22:00
//!
//! Anything else contributes nothing to the plan.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::models::Drug;

const ONCE_DAILY: &[&str] = &["每日一次", "once daily", "once a day"];
const BEFORE_MEAL: &[&str] = &["餐前", "before meal"];
const TWICE_DAILY: &[&str] = &["一日两次", "早晚各一次", "twice daily", "twice a day"];
const EVERY_6_TO_8_HOURS: &[&str] = &["每6-8小时", "every 6-8 hours"];

/// How often a drug is taken, as read from its instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DoseFrequency {
    OnceDaily { before_meal: bool },
    TwiceDaily,
    Every6To8Hours,
}

impl DoseFrequency {
    /// Parse an instruction. Matching is case-insensitive for Latin text.
    pub fn from_instruction(instruction: &str) -> Option<Self> {
        let lower = instruction.to_lowercase();
        let has = |keys: &[&str]| keys.iter().any(|k| lower.contains(k));

        if has(ONCE_DAILY) {
            Some(DoseFrequency::OnceDaily {
                before_meal: has(BEFORE_MEAL),
            })
        } else if has(TWICE_DAILY) {
            Some(DoseFrequency::TwiceDaily)
        } else if has(EVERY_6_TO_8_HOURS) {
            Some(DoseFrequency::Every6To8Hours)
        } else {
            None
        }
    }

    /// Times of day for this frequency.
    pub fn times(&self) -> Vec<NaiveTime> {
        let slots: &[(u32, u32)] = match self {
            DoseFrequency::OnceDaily { before_meal: true } => &[(7, 30)],
            DoseFrequency::OnceDaily { before_meal: false } => &[(8, 30)],
            DoseFrequency::TwiceDaily => &[(8, 30), (18, 30)],
            DoseFrequency::Every6To8Hours => &[(8, 0), (15, 0), (22, 0)],
        };
        slots
            .iter()
            .filter_map(|&(h, m)| NaiveTime::from_hms_opt(h, m, 0))
            .collect()
    }
}

/// A single dose in the plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanEntry {
    pub time: NaiveTime,
    pub drug_id: String,
    pub drug_name: String,
}

/// Today's doses, sorted by time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyPlan {
    pub entries: Vec<PlanEntry>,
}

impl DailyPlan {
    /// Build the plan for a set of drugs. Equal times keep input order.
    pub fn for_drugs<'a, I>(drugs: I) -> Self
    where
        I: IntoIterator<Item = &'a Drug>,
    {
        let mut entries: Vec<PlanEntry> = drugs
            .into_iter()
            .filter_map(|drug| {
                let frequency = DoseFrequency::from_instruction(drug.instruction.as_deref()?)?;
                Some((drug, frequency))
            })
            .flat_map(|(drug, frequency)| {
                frequency.times().into_iter().map(move |time| PlanEntry {
                    time,
                    drug_id: drug.id.clone(),
                    drug_name: drug.name.clone(),
                })
            })
            .collect();

        entries.sort_by_key(|entry| entry.time);
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
