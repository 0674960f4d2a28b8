//! Cold start command handlers
//!
//! Submits a data product cold start and tracks the resulting task until it
//! reaches a terminal status.

use anyhow::{Context, Result, bail};
use catkit_client::DataProductClient;
use catkit_core::domain::task::{ColdStartRequest, IfExists, TaskStatus};
use catkit_core::poll::{JobHandle, PollResult, PollSchedule};
use clap::{Args, Subcommand, ValueEnum};
use colored::*;

use crate::config::Config;
use crate::render;

/// Credentials and scope shared by every cold start subcommand
#[derive(Args)]
pub struct ColdstartAuth {
    /// Tenant the data product belongs to
    #[arg(long, env = "CATKIT_TENANT_ID")]
    tenant_id: String,

    /// Value for the alation-user-id header
    #[arg(long, env = "CATKIT_USER_ID")]
    user_id: String,

    /// API key for the AlationAPIKey authorization scheme
    #[arg(long, env = "CATKIT_NSAPI_KEY", hide_env_values = true)]
    api_key: String,
}

/// Strategy when the result cache target already exists
#[derive(Clone, Copy, ValueEnum)]
pub enum IfExistsArg {
    Error,
    Archive,
    Delete,
}

impl From<IfExistsArg> for IfExists {
    fn from(arg: IfExistsArg) -> Self {
        match arg {
            IfExistsArg::Error => IfExists::Error,
            IfExistsArg::Archive => IfExists::Archive,
            IfExistsArg::Delete => IfExists::Delete,
        }
    }
}

/// Cold start subcommands
#[derive(Subcommand)]
pub enum ColdstartCommands {
    /// Submit a cold start and poll its task until terminal
    Run {
        #[command(flatten)]
        auth: ColdstartAuth,

        /// Data product to cold start
        #[arg(long)]
        data_product_id: String,

        /// Result cache database
        #[arg(long)]
        database: String,

        /// Result cache schema
        #[arg(long)]
        schema: String,

        /// Strategy when the result cache target already exists
        #[arg(long, value_enum, default_value = "error")]
        if_exists: IfExistsArg,

        /// Seconds between task status checks
        #[arg(long, default_value_t = 5)]
        interval: u64,

        /// Print the equivalent cURL command instead of calling the API
        #[arg(long)]
        preview: bool,

        /// Submit without waiting for the task to finish
        #[arg(long)]
        no_wait: bool,
    },
    /// Show the current status of a cold start task
    Status {
        #[command(flatten)]
        auth: ColdstartAuth,

        /// Task ID returned at submission time
        task_id: String,
    },
}

/// Handle cold start commands
pub async fn handle_coldstart_command(command: ColdstartCommands, config: &Config) -> Result<()> {
    match command {
        ColdstartCommands::Run {
            auth,
            data_product_id,
            database,
            schema,
            if_exists,
            interval,
            preview,
            no_wait,
        } => {
            let client = client_for(&auth, config);
            let request = ColdStartRequest {
                data_product_id,
                result_cache_database: database,
                result_cache_schema: schema,
                if_exists: if_exists.into(),
            };

            if preview {
                println!("{}", client.curl_preview(&request));
                return Ok(());
            }

            run_cold_start(&client, &request, interval, no_wait).await
        }
        ColdstartCommands::Status { auth, task_id } => {
            let client = client_for(&auth, config);
            show_task_status(&client, &JobHandle::new(task_id)).await
        }
    }
}

fn client_for(auth: &ColdstartAuth, config: &Config) -> DataProductClient {
    DataProductClient::new(
        &config.base_url,
        &auth.tenant_id,
        &auth.user_id,
        &auth.api_key,
    )
}

/// Submit a cold start and, unless told otherwise, poll its task to the end
async fn run_cold_start(
    client: &DataProductClient,
    request: &ColdStartRequest,
    interval: u64,
    no_wait: bool,
) -> Result<()> {
    let submitted = client
        .cold_start(request)
        .await
        .context("Cold start submission failed")?;

    println!(
        "{}",
        format!("✓ Cold start submitted. Task ID: {}", submitted.job_id).green()
    );

    if no_wait {
        println!(
            "{}",
            format!("Check later with: catkit coldstart status {}", submitted.job_id).dimmed()
        );
        return Ok(());
    }

    let schedule = PollSchedule::unbounded(std::time::Duration::from_secs(interval));
    let result = client
        .wait_for_task(&submitted.job_id, &schedule, |update| {
            if let PollResult::Running { attempt } = update {
                render::print_running(*attempt, None);
            }
        })
        .await;

    if let PollResult::TransportError { detail } = &result {
        bail!("Error checking task status: {detail}");
    }

    let monitor_url = format!("{}/monitor/active_tasks/", client.base_url());
    render::print_outcome(&result, &monitor_url);

    if !result.is_success() {
        bail!("cold start task did not succeed");
    }
    Ok(())
}

/// Fetch and display the typed status record for a task
async fn show_task_status(client: &DataProductClient, task_id: &JobHandle) -> Result<()> {
    let task = client
        .get_task(task_id)
        .await
        .with_context(|| format!("Failed to fetch task {task_id}"))?;

    print_task(task_id, &task);
    Ok(())
}

fn print_task(task_id: &JobHandle, task: &TaskStatus) {
    let status = task.status.as_str();
    let status_colored = match status {
        "SUCCESS" => status.green(),
        "FAILURE" | "CANCELLED" | "ERROR" => status.red(),
        _ => status.cyan(),
    };

    println!("{}", "Task Details:".bold());
    println!("  ID:        {}", task_id.to_string().cyan());
    println!("  Status:    {}", status_colored);
    println!(
        "  Created:   {}",
        task.created_at.format("%Y-%m-%d %H:%M:%S")
    );

    if let Some(completed) = task.completed_at {
        println!("  Completed: {}", completed.format("%Y-%m-%d %H:%M:%S"));
    }

    if let Some(duration_ms) = task.duration_ms {
        println!("  Duration:  {:.1}s", duration_ms as f64 / 1000.0);
    }
}
