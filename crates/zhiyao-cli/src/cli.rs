//! CLI command definitions

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use zhiyao_core::{Database, KnowledgeBase, LoadError};

/// CLI arguments for zhiyao
#[derive(Parser, Debug)]
#[command(name = "zhiyao")]
#[command(author, version, about = "Track your medications and get warned about drug interactions")]
#[command(long_about = r#"
Zhiyao keeps a list of the medications you take and checks it against a
knowledge base of known drug interactions.

The knowledge base is read from two JSON files (drugs and interactions), or
from a SQLite database created with `zhiyao import`.

Example:
  zhiyao                                  Interactive menu
  zhiyao check D001 D002                  One-shot risk check
  zhiyao check D001 D002 --json           Same, as JSON
  zhiyao plan D001 D003                   Today's dosing plan
  zhiyao import zhiyao.db                 Copy the JSON data into SQLite
  zhiyao --database zhiyao.db drugs       List drugs from the database
"#)]
pub struct Cli {
    /// Drug catalog (JSON array of {id, name})
    #[arg(long, env = "ZHIYAO_DRUGS", value_name = "PATH", default_value = "data/drugs.json")]
    pub drugs: PathBuf,

    /// Interaction rules (JSON array of {drugs, risk_level, description})
    #[arg(
        long,
        env = "ZHIYAO_INTERACTIONS",
        value_name = "PATH",
        default_value = "data/interactions.json"
    )]
    pub interactions: PathBuf,

    /// Load the knowledge base from this SQLite database instead of JSON
    #[arg(long, env = "ZHIYAO_DATABASE", value_name = "PATH")]
    pub database: Option<PathBuf>,

    /// Name shown in reports
    #[arg(short, long, default_value = "guest")]
    pub user: String,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Interactive menu (default)
    Menu,

    /// Check a set of drug ids for interactions
    Check {
        /// Drug ids
        #[arg(required = true, value_name = "ID")]
        ids: Vec<String>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// List every drug in the catalog
    Drugs,

    /// Show today's dosing plan for a set of drug ids
    Plan {
        /// Drug ids
        #[arg(required = true, value_name = "ID")]
        ids: Vec<String>,
    },

    /// Import the JSON knowledge base into a SQLite database
    Import {
        /// Database file to create or replace content in
        #[arg(value_name = "DB_PATH")]
        db_path: PathBuf,
    },
}

/// Where the knowledge base comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum KnowledgeSource {
    Json {
        drugs: PathBuf,
        interactions: PathBuf,
    },
    Sqlite(PathBuf),
}

impl KnowledgeSource {
    /// Load the knowledge base. Nothing partial is returned on failure.
    pub fn load(&self) -> Result<KnowledgeBase, LoadError> {
        match self {
            KnowledgeSource::Json {
                drugs,
                interactions,
            } => KnowledgeBase::load(drugs, interactions),
            KnowledgeSource::Sqlite(path) => Database::open_existing(path)?.load_knowledge(),
        }
    }
}

impl std::fmt::Display for KnowledgeSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KnowledgeSource::Json {
                drugs,
                interactions,
            } => write!(f, "{} + {}", drugs.display(), interactions.display()),
            KnowledgeSource::Sqlite(path) => write!(f, "sqlite:{}", path.display()),
        }
    }
}

impl Cli {
    /// The knowledge source selected by flags and environment.
    ///
    /// `import` always reads JSON, since it is what fills the database.
    pub fn knowledge_source(&self) -> KnowledgeSource {
        match (&self.database, &self.command) {
            (Some(path), command) if !matches!(command, Some(Command::Import { .. })) => {
                KnowledgeSource::Sqlite(path.clone())
            }
            _ => KnowledgeSource::Json {
                drugs: self.drugs.clone(),
                interactions: self.interactions.clone(),
            },
        }
    }

    /// Subcommand, defaulting to the interactive menu.
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Menu)
    }
}
