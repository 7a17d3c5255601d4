//! Subcommand dispatch.

use std::io::{BufRead, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use thiserror::Error;
use tracing::{info, warn};
use zhiyao_core::{Database, KnowledgeBase, Session, SessionError};

use crate::cli::{Cli, Command};
use crate::menu::Menu;
use crate::render;

/// Errors from one-shot commands.
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Unknown drug id: {0}")]
    UnknownDrug(String),
}

/// Load the knowledge base and run the selected command.
pub fn run<R: BufRead, W: Write>(cli: &Cli, input: R, output: &mut W) -> Result<()> {
    let source = cli.knowledge_source();
    let knowledge = source
        .load()
        .with_context(|| format!("failed to load knowledge base from {source}"))?;
    info!(
        source = %source,
        drugs = knowledge.catalog().len(),
        interactions = knowledge.rules().len(),
        "knowledge base loaded"
    );
    for id in knowledge.dangling_drug_ids() {
        warn!(drug_id = id, "interaction rule references a drug missing from the catalog");
    }

    let knowledge = Arc::new(knowledge);
    match cli.command() {
        Command::Menu => {
            let session = Session::new(knowledge, cli.user.clone());
            Menu::new(&session, input, output).run()?;
            Ok(())
        }
        Command::Drugs => {
            write!(output, "{}", render::drug_list(knowledge.catalog()))?;
            Ok(())
        }
        Command::Check { ids, json } => {
            let session = session_with(knowledge, &cli.user, &ids)?;
            let report = session.check()?;
            if json {
                writeln!(output, "{}", report.to_json()?)?;
            } else {
                write!(output, "{}", render::report(&report))?;
            }
            Ok(())
        }
        Command::Plan { ids } => {
            let session = session_with(knowledge, &cli.user, &ids)?;
            write!(output, "{}", render::plan(&session.plan()?))?;
            Ok(())
        }
        Command::Import { db_path } => import(&knowledge, &db_path, output),
    }
}

/// A session preloaded with `ids`. Any unknown id is an error.
fn session_with(knowledge: Arc<KnowledgeBase>, user: &str, ids: &[String]) -> Result<Session> {
    let session = Session::new(knowledge, user);
    for id in ids {
        match session.add_drug(id) {
            Ok(_) => {}
            Err(SessionError::NotFound(id)) => return Err(CommandError::UnknownDrug(id).into()),
            Err(e) => return Err(e.into()),
        }
    }
    Ok(session)
}

fn import<W: Write>(knowledge: &KnowledgeBase, db_path: &std::path::Path, output: &mut W) -> Result<()> {
    let mut db = Database::open(db_path)
        .with_context(|| format!("failed to open database {}", db_path.display()))?;
    let stats = db
        .import_knowledge(knowledge)
        .context("failed to import knowledge base")?;
    info!(drugs = stats.drugs, interactions = stats.interactions, "import complete");
    writeln!(
        output,
        "Imported {} drugs and {} interactions into {}",
        stats.drugs,
        stats.interactions,
        db_path.display()
    )?;
    Ok(())
}
