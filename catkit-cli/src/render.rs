//! Terminal rendering of poll outcomes
//!
//! The poll loop itself never prints; these helpers turn each
//! [`PollResult`] variant into a distinct banner so the commands share one
//! rendering path.

use catkit_core::poll::{PollResult, TaskOutcome};
use colored::*;

/// Progress line for a non-terminal check
pub fn print_running(attempt: u32, max_attempts: Option<u32>) {
    let line = match max_attempts {
        Some(max) => format!("⏳ Still running... (attempt {attempt}/{max})"),
        None => format!("⏳ Still running... (check {attempt})"),
    };
    println!("{}", line.dimmed());
}

/// Final banner for a finished poll
///
/// `monitor_url` is surfaced when the retry budget ran out so the user can
/// keep watching the job on the server side.
pub fn print_outcome(result: &PollResult, monitor_url: &str) {
    match result {
        PollResult::Running { attempt } => print_running(*attempt, None),
        PollResult::Completed {
            status,
            payload,
            outcome,
        } => {
            let banner = match outcome {
                Some(TaskOutcome::Failure) => {
                    format!("✗ Finished with status: {status}").red()
                }
                _ => format!("✓ Completed with status: {status}").green(),
            };
            println!("{banner}");

            if let Ok(pretty) = serde_json::to_string_pretty(payload) {
                println!("{pretty}");
            }
        }
        PollResult::Exhausted { attempts } => {
            println!(
                "{}",
                format!(
                    "⚠ Did not complete within {attempts} attempts. \
                     You may continue to monitor at {monitor_url}."
                )
                .yellow()
            );
        }
        PollResult::TransportError { detail } => {
            println!("{}", format!("✗ Error checking status: {detail}").red());
        }
    }
}
