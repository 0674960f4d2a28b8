//! Status-polling state machine
//!
//! Both asynchronous operations in the catalog API (bulk document jobs and
//! cold start tasks) hand back an opaque handle and expose a status endpoint.
//! The two differ only in how a status string is classified as terminal and
//! in how long the caller is willing to keep checking. This module captures
//! exactly that: a pure [`StatusPolicy::classify`] step plus a
//! [`PollSchedule`] budget. The loop that drives network calls lives in the
//! client crate; nothing here performs I/O.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Opaque identifier for a server-side asynchronous job or task.
///
/// The API is inconsistent about handle representation: bulk metadata jobs
/// return an integer, cold start tasks a string. Both deserialize into the
/// same string-backed handle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct JobHandle(String);

impl JobHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for JobHandle {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Num(i64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Num(n) => Ok(JobHandle(n.to_string())),
            Raw::Text(s) if !s.is_empty() => Ok(JobHandle(s)),
            Raw::Text(_) => Err(serde::de::Error::custom("job handle cannot be empty")),
        }
    }
}

/// One observed response from a status endpoint.
///
/// Keeps the raw payload alongside the extracted status string so terminal
/// results can be surfaced to the caller verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusSnapshot {
    pub status: String,
    pub payload: serde_json::Value,
}

impl StatusSnapshot {
    /// Builds a snapshot from a raw status-endpoint payload.
    ///
    /// A payload without a string `status` field snapshots as `"unknown"`,
    /// which the bounded policy treats as terminal.
    pub fn from_payload(payload: serde_json::Value) -> Self {
        let status = payload
            .get("status")
            .and_then(serde_json::Value::as_str)
            .unwrap_or("unknown")
            .to_string();
        Self { status, payload }
    }
}

/// Secondary success/failure classification for terminal task statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOutcome {
    Success,
    Failure,
}

/// Output of one classification step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Not yet terminal; keep polling.
    Running,
    /// No further transitions will occur. `outcome` is only populated by
    /// policies that know how to grade the terminal status.
    Terminal { outcome: Option<TaskOutcome> },
}

/// Cold start task statuses after which no further transition occurs.
const TERMINAL_TASK_STATUSES: [&str; 4] = ["SUCCESS", "FAILURE", "CANCELLED", "ERROR"];

/// How a status string is mapped to running/terminal.
///
/// Pure and stateless: classifying the same status twice always yields the
/// same result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusPolicy {
    /// Bulk metadata jobs: the job is in flight exactly while the endpoint
    /// reports `"running"`. Any other label is terminal and passed through
    /// ungraded, matching the endpoint's loose status vocabulary.
    RunningLabel,
    /// Cold start tasks: in flight until the status joins the fixed terminal
    /// set, then graded `Success` for `SUCCESS` and `Failure` otherwise.
    TerminalSet,
}

impl StatusPolicy {
    pub fn classify(&self, status: &str) -> Classification {
        match self {
            StatusPolicy::RunningLabel => {
                if status == "running" {
                    Classification::Running
                } else {
                    Classification::Terminal { outcome: None }
                }
            }
            StatusPolicy::TerminalSet => {
                if !TERMINAL_TASK_STATUSES.contains(&status) {
                    Classification::Running
                } else if status == "SUCCESS" {
                    Classification::Terminal {
                        outcome: Some(TaskOutcome::Success),
                    }
                } else {
                    Classification::Terminal {
                        outcome: Some(TaskOutcome::Failure),
                    }
                }
            }
        }
    }
}

/// Retry budget and pacing for a polling loop.
///
/// No backoff and no jitter: the interval between checks is fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSchedule {
    /// `None` polls until terminal or transport failure.
    pub max_attempts: Option<u32>,
    pub interval: Duration,
}

impl PollSchedule {
    pub fn bounded(max_attempts: u32, interval: Duration) -> Self {
        Self {
            max_attempts: Some(max_attempts.max(1)),
            interval,
        }
    }

    pub fn unbounded(interval: Duration) -> Self {
        Self {
            max_attempts: None,
            interval,
        }
    }

    /// Default budget for bulk metadata jobs: 100 checks, 10s apart.
    pub fn for_bulk_job() -> Self {
        Self::bounded(100, Duration::from_secs(10))
    }

    /// Default pacing for cold start tasks: every 5s until terminal.
    pub fn for_task() -> Self {
        Self::unbounded(Duration::from_secs(5))
    }
}

/// Outcome of a polling operation.
///
/// Exactly one of `Completed`, `Exhausted`, or `TransportError` is returned
/// per poll invocation; `Running` values are emitted to observers while the
/// loop is in flight.
#[derive(Debug, Clone, PartialEq)]
pub enum PollResult {
    /// Job not yet terminal as of the given attempt.
    Running { attempt: u32 },
    /// Terminal status reached; payload is the final response verbatim.
    Completed {
        status: String,
        payload: serde_json::Value,
        outcome: Option<TaskOutcome>,
    },
    /// Bounded budget consumed while the job was still running. Advisory,
    /// not an error: the job is presumably still making progress.
    Exhausted { attempts: u32 },
    /// The status check itself failed. Fatal to the poll operation and
    /// distinct from a job that completed with a failure-label status.
    TransportError { detail: String },
}

impl PollResult {
    /// True when the job reached a terminal status that is not graded as a
    /// failure. A `Completed` with no outcome counts as success, preserving
    /// the bulk job endpoint's pass-through behavior.
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            PollResult::Completed {
                outcome: None | Some(TaskOutcome::Success),
                ..
            }
        )
    }
}
