//! Command-line front end for zhiyao.
//!
//! Argument parsing, logging setup, the interactive menu and text rendering.
//! All medication logic lives in `zhiyao_core`.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod menu;
pub mod render;

pub use cli::{Cli, Command, KnowledgeSource};
pub use commands::{run, CommandError};
pub use menu::Menu;
