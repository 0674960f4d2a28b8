//! Sensitivity command handlers
//!
//! Lists the attribute members of a catalog set and bulk-toggles their
//! sensitivity flag, collecting per-attribute failures instead of aborting
//! the batch.

use anyhow::{Context, Result};
use catkit_client::CatalogClient;
use catkit_core::domain::catalog_set::{CatalogSetMember, SensitivityAction, SensitivityReport};
use clap::Subcommand;
use colored::*;

use crate::config::Config;

/// Sensitivity subcommands
#[derive(Subcommand)]
pub enum SensitivityCommands {
    /// List the members of a catalog set
    List {
        /// Catalog set ID
        catalog_set_id: u64,
    },
    /// Mark every attribute in a catalog set as sensitive
    Set {
        /// Catalog set ID
        catalog_set_id: u64,

        /// Maximum concurrent flag updates (1 = strictly sequential)
        #[arg(long, default_value_t = 1)]
        max_in_flight: usize,
    },
    /// Clear the sensitivity flag on every attribute in a catalog set
    Unset {
        /// Catalog set ID
        catalog_set_id: u64,

        /// Maximum concurrent flag updates (1 = strictly sequential)
        #[arg(long, default_value_t = 1)]
        max_in_flight: usize,
    },
}

/// Handle sensitivity commands
pub async fn handle_sensitivity_command(
    command: SensitivityCommands,
    config: &Config,
) -> Result<()> {
    let client = CatalogClient::new(&config.base_url, config.token()?);

    match command {
        SensitivityCommands::List { catalog_set_id } => {
            list_members(&client, catalog_set_id).await
        }
        SensitivityCommands::Set {
            catalog_set_id,
            max_in_flight,
        } => toggle_flag(&client, catalog_set_id, SensitivityAction::Set, max_in_flight).await,
        SensitivityCommands::Unset {
            catalog_set_id,
            max_in_flight,
        } => {
            toggle_flag(
                &client,
                catalog_set_id,
                SensitivityAction::Unset,
                max_in_flight,
            )
            .await
        }
    }
}

/// List catalog set members, highlighting eligible attributes
async fn list_members(client: &CatalogClient, catalog_set_id: u64) -> Result<()> {
    let members = fetch_members(client, catalog_set_id).await?;
    let attributes: Vec<_> = members.iter().filter(|m| m.is_attribute()).collect();

    println!("Total members returned: {}", members.len());
    println!(
        "Attributes eligible for sensitivity: {}",
        attributes.len()
    );

    if attributes.is_empty() {
        println!("{}", "No attributes found in this catalog set.".yellow());
        return Ok(());
    }

    println!();
    for attr in attributes {
        print_attribute(attr);
    }

    Ok(())
}

/// Toggle the sensitivity flag across every attribute in the set
async fn toggle_flag(
    client: &CatalogClient,
    catalog_set_id: u64,
    action: SensitivityAction,
    max_in_flight: usize,
) -> Result<()> {
    let members = fetch_members(client, catalog_set_id).await?;
    let attr_ids: Vec<u64> = members
        .iter()
        .filter(|m| m.is_attribute())
        .map(|m| m.id)
        .collect();

    if attr_ids.is_empty() {
        println!("{}", "No attributes found in this catalog set.".yellow());
        return Ok(());
    }

    println!("Updating {} attribute(s)...", attr_ids.len());

    let report = client
        .set_sensitivity_bulk(&attr_ids, action, max_in_flight, |done, total| {
            println!("{}", format!("  {done}/{total}").dimmed());
        })
        .await;

    print_report(&report, action);
    Ok(())
}

async fn fetch_members(
    client: &CatalogClient,
    catalog_set_id: u64,
) -> Result<Vec<CatalogSetMember>> {
    client
        .list_catalog_set_members(catalog_set_id)
        .await
        .with_context(|| format!("Failed to list members of catalog set {catalog_set_id}"))
}

/// Print one attribute row with its parent object titles
fn print_attribute(attr: &CatalogSetMember) {
    let title = attr.title.as_deref().unwrap_or("<untitled>");
    let parent = |named: &Option<catkit_core::domain::catalog_set::NamedRef>| {
        named
            .as_ref()
            .and_then(|r| r.title.clone())
            .unwrap_or_else(|| "-".to_string())
    };

    println!(
        "  {} {} {}",
        format!("{}", attr.id).cyan(),
        title,
        format!(
            "({} / {} / {})",
            parent(&attr.ds),
            parent(&attr.schema),
            parent(&attr.table)
        )
        .dimmed()
    );
}

/// Print the aggregate result of a bulk toggle
fn print_report(report: &SensitivityReport, action: SensitivityAction) {
    let verb = match action {
        SensitivityAction::Set => "set",
        SensitivityAction::Unset => "unset",
    };

    if report.is_clean() {
        println!(
            "{}",
            format!("✓ Sensitivity flag {verb} for all {} attribute(s).", report.updated).green()
        );
    } else {
        println!(
            "{}",
            format!(
                "✗ {verb} completed with {} failure(s) out of {}.",
                report.failures.len(),
                report.total()
            )
            .red()
        );
        for failure in &report.failures {
            println!(
                "  {} {}",
                format!("attribute {}:", failure.attr_id).red(),
                failure.detail
            );
        }
    }
}
