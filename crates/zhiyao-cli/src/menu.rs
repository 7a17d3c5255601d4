//! Interactive numbered menu.

use std::io::{BufRead, Write};

use anyhow::Result;
use tracing::debug;
use zhiyao_core::{Added, Session, SessionError};

use crate::render;

const MENU: &str = r#"
Choose an action:
  1. List all available drugs
  2. Add a drug
  3. Show current medications and check risks
  4. Remove a drug
  5. Show today's medication plan
  6. Scan prescription text for drugs
  0. Quit
Enter choice: "#;

/// Menu entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Choice {
    ListDrugs,
    AddDrug,
    CheckRisks,
    RemoveDrug,
    ShowPlan,
    ScanText,
    Quit,
}

impl Choice {
    fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Choice::ListDrugs),
            "2" => Some(Choice::AddDrug),
            "3" => Some(Choice::CheckRisks),
            "4" => Some(Choice::RemoveDrug),
            "5" => Some(Choice::ShowPlan),
            "6" => Some(Choice::ScanText),
            "0" => Some(Choice::Quit),
            _ => None,
        }
    }
}

/// Menu loop over any line-based input and output.
pub struct Menu<'a, R, W> {
    session: &'a Session,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(session: &'a Session, input: R, output: W) -> Self {
        Self {
            session,
            input,
            output,
        }
    }

    /// Run until the user quits or input ends.
    pub fn run(&mut self) -> Result<()> {
        self.write(WELCOME)?;
        loop {
            self.write(MENU)?;
            let Some(line) = self.read_line()? else {
                break;
            };

            match Choice::parse(&line) {
                Some(Choice::ListDrugs) => {
                    let text = render::drug_list(self.session.knowledge().catalog());
                    self.write(&text)?;
                }
                Some(Choice::AddDrug) => self.add_drug()?,
                Some(Choice::CheckRisks) => self.check_risks()?,
                Some(Choice::RemoveDrug) => self.remove_drug()?,
                Some(Choice::ShowPlan) => {
                    let text = render::plan(&self.session.plan()?);
                    self.write(&text)?;
                }
                Some(Choice::ScanText) => self.scan_text()?,
                Some(Choice::Quit) => {
                    self.write("Thank you for using Zhiyao. Goodbye!\n")?;
                    break;
                }
                None => self.write("Invalid choice, please try again.\n")?,
            }
        }
        Ok(())
    }

    fn add_drug(&mut self) -> Result<()> {
        let Some(id) = self.prompt("Enter the drug ID to add: ")? else {
            return Ok(());
        };

        match self.session.add_drug(&id) {
            Ok(Added::New(drug)) => {
                debug!(drug_id = %drug.id, "added drug");
                self.write(&format!("Added: {}\n", drug.name))?;
            }
            Ok(Added::AlreadyListed(drug)) => {
                self.write(&format!("{} is already in your list.\n", drug.name))?;
            }
            Err(SessionError::NotFound(_)) => {
                self.write("No drug with that ID was found.\n")?;
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        }
        self.check_risks()
    }

    fn remove_drug(&mut self) -> Result<()> {
        let Some(id) = self.prompt("Enter the drug ID to remove: ")? else {
            return Ok(());
        };

        match self.session.remove_drug(&id)? {
            Some(drug) => {
                debug!(drug_id = %drug.id, "removed drug");
                self.write(&format!("Removed: {}\n", drug.name))?;
            }
            None => self.write(&format!("{id} is not in your list; nothing removed.\n"))?,
        }
        self.check_risks()
    }

    fn scan_text(&mut self) -> Result<()> {
        let Some(text) = self.prompt("Paste the prescription text (one line): ")? else {
            return Ok(());
        };

        let added = self.session.add_mentioned(&text)?;
        if added.is_empty() {
            self.write("No new catalog drugs were found in the text.\n")?;
            return Ok(());
        }
        let names: Vec<&str> = added.iter().map(|d| d.name.as_str()).collect();
        debug!(count = added.len(), "added drugs from text");
        self.write(&format!(
            "Found and added {} drug(s): {}\n",
            added.len(),
            names.join(", ")
        ))?;
        self.check_risks()
    }

    fn check_risks(&mut self) -> Result<()> {
        let report = self.session.check()?;
        debug!(
            medications = report.medications.len(),
            interactions = report.interactions.len(),
            "risk check"
        );
        self.write(&render::report(&report))
    }

    fn prompt(&mut self, question: &str) -> Result<Option<String>> {
        self.write(question)?;
        Ok(self.read_line()?.filter(|line| !line.is_empty()))
    }

    /// Next trimmed line, or `None` at end of input.
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn write(&mut self, text: &str) -> Result<()> {
        self.output.write_all(text.as_bytes())?;
        self.output.flush()?;
        Ok(())
    }
}

const WELCOME: &str = "\
========================================
  Zhiyao - Medication Manager & Risk Alerts
========================================
";
