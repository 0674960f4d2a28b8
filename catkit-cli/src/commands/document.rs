//! Document command handlers
//!
//! Creates batches of stub documents (tracking the resulting bulk metadata
//! job to completion) and fetches document metadata by ID.

use anyhow::{Context, Result, bail};
use catkit_client::CatalogClient;
use catkit_core::domain::document::StubBatch;
use catkit_core::poll::{PollResult, PollSchedule};
use clap::Subcommand;
use colored::*;
use std::time::Duration;

use crate::config::Config;
use crate::render;

/// Document subcommands
#[derive(Subcommand)]
pub enum DocumentCommands {
    /// Create a batch of stub documents and wait for the bulk job
    CreateStubs {
        /// Document hub the stubs belong to
        #[arg(long)]
        hub_id: u64,

        /// Template applied to each stub
        #[arg(long)]
        template_id: u64,

        /// Folder the stubs are created under
        #[arg(long)]
        parent_folder_id: u64,

        /// Navigation folder IDs, comma-separated (non-numeric entries are skipped)
        #[arg(long, default_value = "")]
        nav_folder_ids: String,

        /// Number of stub documents to create
        #[arg(long, default_value_t = 3)]
        count: u32,

        /// Maximum status checks before giving up
        #[arg(long, default_value_t = 100)]
        max_retries: u32,

        /// Seconds between status checks
        #[arg(long, default_value_t = 10)]
        interval: u64,
    },
    /// Fetch document metadata by ID
    Get {
        /// Document ID
        id: u64,
    },
}

/// Handle document commands
pub async fn handle_document_command(command: DocumentCommands, config: &Config) -> Result<()> {
    let client = CatalogClient::new(&config.base_url, config.token()?);

    match command {
        DocumentCommands::CreateStubs {
            hub_id,
            template_id,
            parent_folder_id,
            nav_folder_ids,
            count,
            max_retries,
            interval,
        } => {
            let batch = StubBatch {
                document_hub_id: hub_id,
                template_id,
                parent_folder_id,
                nav_link_folder_ids: parse_id_list(&nav_folder_ids),
                count,
            };
            let schedule = PollSchedule::bounded(max_retries, Duration::from_secs(interval));
            create_stubs(&client, &batch, &schedule).await
        }
        DocumentCommands::Get { id } => get_document(&client, id).await,
    }
}

/// Create stub documents and poll the bulk job until terminal
async fn create_stubs(
    client: &CatalogClient,
    batch: &StubBatch,
    schedule: &PollSchedule,
) -> Result<()> {
    let submitted = client
        .create_stub_documents(batch)
        .await
        .context("Failed to create stub documents")?;

    println!(
        "{}",
        format!(
            "✓ Submitted {} stub document(s). Job ID: {}",
            batch.count, submitted.job_id
        )
        .green()
    );

    let result = client
        .wait_for_job(&submitted.job_id, schedule, |update| {
            if let PollResult::Running { attempt } = update {
                render::print_running(*attempt, schedule.max_attempts);
            }
        })
        .await;

    if let PollResult::TransportError { detail } = &result {
        bail!("Error checking job status: {detail}");
    }

    let monitor_url = format!("{}/monitor/active_tasks/", client.base_url());
    render::print_outcome(&result, &monitor_url);
    Ok(())
}

/// Fetch and display a single document
async fn get_document(client: &CatalogClient, doc_id: u64) -> Result<()> {
    let doc = client
        .get_document(doc_id)
        .await
        .with_context(|| format!("Failed to fetch document {doc_id}"))?;

    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}

/// Parse a comma-separated ID list, keeping only numeric entries
fn parse_id_list(input: &str) -> Vec<u64> {
    input
        .split(',')
        .filter_map(|part| part.trim().parse().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id_list() {
        assert_eq!(parse_id_list("58, 59"), vec![58, 59]);
        assert_eq!(parse_id_list(""), Vec::<u64>::new());
        assert_eq!(parse_id_list("1,abc, 2 ,"), vec![1, 2]);
    }
}
