//! Text rendering of catalog listings, risk reports and plans.

use colored::Colorize;
use zhiyao_core::{Catalog, DailyPlan, Interaction, RiskLevel, RiskReport};

const RULE: &str = "---------------------";

/// Every catalog drug, one per line.
pub fn drug_list(catalog: &Catalog) -> String {
    let mut out = String::from("\n--- All available drugs ---\n");
    if catalog.is_empty() {
        out.push_str("The catalog is empty.\n");
    }
    for drug in catalog.all() {
        out.push_str(&format!("ID: {}, Name: {}\n", drug.id, drug.name));
    }
    out.push_str(RULE);
    out.push('\n');
    out
}

/// A single triggered rule. Red and yellow get a styled header line.
pub fn interaction(rule: &Interaction) -> String {
    let header = match rule.risk_level {
        RiskLevel::Red => Some(format!("🔴 {}", "SEVERE WARNING!".red().bold())),
        RiskLevel::Yellow => Some(format!("🟡 {}", "CAUTION!".yellow().bold())),
        RiskLevel::Other(_) => None,
    };
    match header {
        Some(header) => format!("{}\n{}\n", header, rule.description),
        None => format!("{}\n", rule.description),
    }
}

/// Medication list followed by the risk check result.
pub fn report(report: &RiskReport) -> String {
    let mut out = format!("\n--- {}'s current medications ---\n", report.user);
    if report.medications.is_empty() {
        out.push_str("No medications recorded.\n");
    }
    for drug in &report.medications {
        out.push_str(&format!("- {} ({})\n", drug.name, drug.id));
    }

    out.push_str("\n--- Risk check ---\n");
    if report.is_clear() {
        out.push_str(&format!(
            "{}\n",
            "✅ No known drug interactions found.".green()
        ));
    }
    for rule in &report.interactions {
        out.push_str(&interaction(rule));
    }
    out.push_str(RULE);
    out.push('\n');
    out
}

/// Today's plan as a timetable.
pub fn plan(plan: &DailyPlan) -> String {
    let mut out = String::from("\n--- Today's medication plan ---\n");
    if plan.is_empty() {
        out.push_str("No scheduled doses. Add drugs with a dosing instruction.\n");
    }
    for entry in &plan.entries {
        out.push_str(&format!(
            "{}  Take {} ({})\n",
            entry.time.format("%H:%M"),
            entry.drug_name,
            entry.drug_id
        ));
    }
    out.push_str(RULE);
    out.push('\n');
    out
}
