//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod coldstart;
mod document;
mod sensitivity;

pub use coldstart::ColdstartCommands;
pub use document::DocumentCommands;
pub use sensitivity::SensitivityCommands;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Stub document creation and retrieval
    Document {
        #[command(subcommand)]
        command: DocumentCommands,
    },
    /// Bulk sensitivity flagging of catalog set attributes
    Sensitivity {
        #[command(subcommand)]
        command: SensitivityCommands,
    },
    /// Data product cold start submission and tracking
    Coldstart {
        #[command(subcommand)]
        command: ColdstartCommands,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Document { command } => document::handle_document_command(command, config).await,
        Commands::Sensitivity { command } => {
            sensitivity::handle_sensitivity_command(command, config).await
        }
        Commands::Coldstart { command } => {
            coldstart::handle_coldstart_command(command, config).await
        }
    }
}
