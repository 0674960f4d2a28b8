//! Poll driver
//!
//! Drives the status-check loop for an asynchronous job or task until its
//! classification turns terminal or the schedule's budget runs out. The loop
//! holds no state besides the attempt counter; classification itself lives
//! in [`catkit_core::poll::StatusPolicy`] and stays pure.

use catkit_core::poll::{Classification, PollResult, PollSchedule, StatusPolicy, StatusSnapshot};
use std::future::Future;
use tracing::{debug, info, warn};

use crate::error::Result;

/// Polls a status endpoint until terminal, exhausted, or transport failure.
///
/// # Arguments
/// * `schedule` - Retry budget and fixed interval between checks
/// * `policy` - Pure running/terminal classification of status strings
/// * `fetch_status` - Performs exactly one status check per call; must not
///   retry internally
/// * `observe` - Receives a [`PollResult::Running`] after each non-terminal
///   observation, so rendering stays out of the loop body
///
/// # Returns
/// Exactly one of `Completed`, `Exhausted`, or `TransportError`.
///
/// A transport failure aborts immediately: the failing call is not retried
/// and no sleep follows it. Each iteration performs one network call and,
/// while still running, one sleep; the caller is blocked for the duration.
pub async fn poll_until_terminal<F, Fut, O>(
    schedule: &PollSchedule,
    policy: &StatusPolicy,
    mut fetch_status: F,
    mut observe: O,
) -> PollResult
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<StatusSnapshot>>,
    O: FnMut(&PollResult),
{
    let mut attempt: u32 = 0;

    loop {
        let snapshot = match fetch_status().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!("status check failed: {e}");
                return PollResult::TransportError {
                    detail: e.to_string(),
                };
            }
        };

        match policy.classify(&snapshot.status) {
            Classification::Terminal { outcome } => {
                info!(status = %snapshot.status, "reached terminal status");
                return PollResult::Completed {
                    status: snapshot.status,
                    payload: snapshot.payload,
                    outcome,
                };
            }
            Classification::Running => {
                attempt += 1;
                debug!(attempt, status = %snapshot.status, "still running");
                observe(&PollResult::Running { attempt });

                if let Some(max) = schedule.max_attempts {
                    if attempt >= max {
                        return PollResult::Exhausted { attempts: attempt };
                    }
                }

                tokio::time::sleep(schedule.interval).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use catkit_core::poll::TaskOutcome;
    use serde_json::json;
    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;
    use std::time::Duration;

    fn zero_interval(max_attempts: Option<u32>) -> PollSchedule {
        match max_attempts {
            Some(max) => PollSchedule::bounded(max, Duration::ZERO),
            None => PollSchedule::unbounded(Duration::ZERO),
        }
    }

    /// Scripted status source: pops one canned response per call and counts
    /// how many calls were made.
    struct Script {
        responses: RefCell<VecDeque<Result<StatusSnapshot>>>,
        calls: Cell<u32>,
    }

    impl Script {
        fn new(responses: Vec<Result<StatusSnapshot>>) -> Self {
            Self {
                responses: RefCell::new(responses.into()),
                calls: Cell::new(0),
            }
        }

        fn status(label: &str) -> Result<StatusSnapshot> {
            Ok(StatusSnapshot::from_payload(json!({ "status": label })))
        }

        fn next(&self) -> impl Future<Output = Result<StatusSnapshot>> {
            self.calls.set(self.calls.get() + 1);
            let response = self
                .responses
                .borrow_mut()
                .pop_front()
                .expect("script ran out of responses");
            std::future::ready(response)
        }
    }

    #[tokio::test]
    async fn test_bounded_reaches_terminal() {
        let script = Script::new(vec![
            Script::status("running"),
            Script::status("running"),
            Script::status("done"),
        ]);
        let schedule = zero_interval(Some(3));

        let result = poll_until_terminal(
            &schedule,
            &StatusPolicy::RunningLabel,
            || script.next(),
            |_| {},
        )
        .await;

        assert_eq!(script.calls.get(), 3);
        match result {
            PollResult::Completed {
                status,
                payload,
                outcome,
            } => {
                assert_eq!(status, "done");
                assert_eq!(payload, json!({"status": "done"}));
                assert_eq!(outcome, None);
            }
            other => panic!("expected Completed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_bounded_exhausts_budget() {
        let script = Script::new(vec![
            Script::status("running"),
            Script::status("running"),
            Script::status("running"),
        ]);
        let schedule = zero_interval(Some(2));

        let result = poll_until_terminal(
            &schedule,
            &StatusPolicy::RunningLabel,
            || script.next(),
            |_| {},
        )
        .await;

        // Exactly max_attempts calls, third response never consumed.
        assert_eq!(script.calls.get(), 2);
        assert_eq!(result, PollResult::Exhausted { attempts: 2 });
    }

    #[tokio::test]
    async fn test_terminal_set_success() {
        let script = Script::new(vec![
            Script::status("PENDING"),
            Script::status("RUNNING"),
            Script::status("SUCCESS"),
        ]);
        let schedule = zero_interval(None);

        let result = poll_until_terminal(
            &schedule,
            &StatusPolicy::TerminalSet,
            || script.next(),
            |_| {},
        )
        .await;

        assert_eq!(script.calls.get(), 3);
        match result {
            PollResult::Completed {
                status, outcome, ..
            } => {
                assert_eq!(status, "SUCCESS");
                assert_eq!(outcome, Some(TaskOutcome::Success));
            }
            other => panic!("expected Completed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_terminal_set_failure() {
        let script = Script::new(vec![Script::status("PENDING"), Script::status("ERROR")]);
        let schedule = zero_interval(None);

        let result = poll_until_terminal(
            &schedule,
            &StatusPolicy::TerminalSet,
            || script.next(),
            |_| {},
        )
        .await;

        assert_eq!(script.calls.get(), 2);
        match result {
            PollResult::Completed {
                status, outcome, ..
            } => {
                assert_eq!(status, "ERROR");
                assert_eq!(outcome, Some(TaskOutcome::Failure));
            }
            other => panic!("expected Completed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_transport_error_aborts_without_retry() {
        let script = Script::new(vec![Err(ClientError::api_error(503, "unavailable"))]);
        let schedule = zero_interval(Some(10));

        let result = poll_until_terminal(
            &schedule,
            &StatusPolicy::RunningLabel,
            || script.next(),
            |_| {},
        )
        .await;

        assert_eq!(script.calls.get(), 1);
        match result {
            PollResult::TransportError { detail } => {
                assert!(detail.contains("503"), "detail was: {detail}");
            }
            other => panic!("expected TransportError, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_sleep_after_failing_status_check() {
        let script = Script::new(vec![
            Script::status("running"),
            Err(ClientError::api_error(502, "bad gateway")),
        ]);
        let schedule = PollSchedule::bounded(10, Duration::from_secs(60));
        let started = tokio::time::Instant::now();

        let result = poll_until_terminal(
            &schedule,
            &StatusPolicy::RunningLabel,
            || script.next(),
            |_| {},
        )
        .await;

        assert!(matches!(result, PollResult::TransportError { .. }));
        assert_eq!(script.calls.get(), 2);
        // One interval between the two checks, none after the failure.
        assert_eq!(started.elapsed(), Duration::from_secs(60));
    }

    #[tokio::test]
    async fn test_transport_error_mid_poll() {
        let script = Script::new(vec![
            Script::status("running"),
            Err(ClientError::ParseError("connection reset".to_string())),
        ]);
        let schedule = zero_interval(Some(10));

        let result = poll_until_terminal(
            &schedule,
            &StatusPolicy::RunningLabel,
            || script.next(),
            |_| {},
        )
        .await;

        assert_eq!(script.calls.get(), 2);
        assert!(matches!(result, PollResult::TransportError { .. }));
    }

    #[tokio::test]
    async fn test_observer_sees_each_running_attempt() {
        let script = Script::new(vec![
            Script::status("running"),
            Script::status("running"),
            Script::status("done"),
        ]);
        let schedule = zero_interval(Some(100));
        let seen = RefCell::new(Vec::new());

        let _ = poll_until_terminal(
            &schedule,
            &StatusPolicy::RunningLabel,
            || script.next(),
            |update| {
                if let PollResult::Running { attempt } = update {
                    seen.borrow_mut().push(*attempt);
                }
            },
        )
        .await;

        assert_eq!(*seen.borrow(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_first_response_terminal() {
        let script = Script::new(vec![Script::status("successful")]);
        let schedule = zero_interval(Some(100));

        let result = poll_until_terminal(
            &schedule,
            &StatusPolicy::RunningLabel,
            || script.next(),
            |_| {},
        )
        .await;

        assert_eq!(script.calls.get(), 1);
        assert!(result.is_success());
    }
}
