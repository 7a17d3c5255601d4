//! CLI entrypoint for zhiyao
//!
//! Loads the knowledge base once, then hands it to the selected command.

use std::io;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use zhiyao_cli::{logging, Cli};

fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose);
    if cli.no_color {
        colored::control::set_override(false);
    }

    info!("Starting zhiyao");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    zhiyao_cli::run(&cli, stdin.lock(), &mut stdout)
}
