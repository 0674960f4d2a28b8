//! Catalog set and sensitivity flag endpoints

use crate::error::Result;
use crate::{CatalogClient, handle_empty_response, handle_response};
use catkit_core::domain::catalog_set::{CatalogSetMember, SensitivityAction, SensitivityReport};
use catkit_core::dto::catalog_set::PageCursor;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{debug, warn};

impl CatalogClient {
    /// Fetch every member of a catalog set
    ///
    /// Walks the paginated members endpoint page by page and stops on the
    /// first empty batch; the endpoint exposes no next-page token.
    pub async fn list_catalog_set_members(&self, set_id: u64) -> Result<Vec<CatalogSetMember>> {
        let url = format!("{}/api/v1/catalog_set/{}/members/", self.base_url(), set_id);
        let mut cursor = PageCursor::first();
        let mut members = Vec::new();

        loop {
            let response = self
                .http()
                .get(&url)
                .header("Token", self.token())
                .query(&[
                    ("limit", cursor.limit.to_string()),
                    ("skip", cursor.skip.to_string()),
                    ("enable_server_count", "true".to_string()),
                    ("search", String::new()),
                ])
                .send()
                .await?;

            let batch: Vec<CatalogSetMember> = handle_response(response).await?;
            if batch.is_empty() {
                break;
            }

            debug!(skip = cursor.skip, fetched = batch.len(), "fetched member page");
            members.extend(batch);
            cursor.advance();
        }

        Ok(members)
    }

    /// Toggle the sensitivity flag on a single attribute
    pub async fn set_attr_sensitivity(
        &self,
        attr_id: u64,
        action: SensitivityAction,
    ) -> Result<()> {
        let url = format!("{}/ajax/set_attr_sensitivity/{}/", self.base_url(), attr_id);
        let response = self
            .http()
            .post(&url)
            .header("Token", self.token())
            .header("Connection", "close")
            .form(&[("action", action.wire_label())])
            .send()
            .await?;

        handle_empty_response(response).await
    }

    /// Toggle the sensitivity flag across a batch of attributes
    ///
    /// Each attribute is an independent call; a failure is recorded and the
    /// batch continues rather than aborting. In-flight requests are bounded
    /// by `max_in_flight` (1 keeps the batch strictly sequential).
    ///
    /// # Arguments
    /// * `attr_ids` - Attribute IDs to update
    /// * `action` - Set or unset
    /// * `max_in_flight` - Concurrency bound, clamped to at least 1
    /// * `on_progress` - Called with (completed, total) as each attribute
    ///   finishes, in submission order
    pub async fn set_sensitivity_bulk(
        &self,
        attr_ids: &[u64],
        action: SensitivityAction,
        max_in_flight: usize,
        on_progress: impl FnMut(usize, usize),
    ) -> SensitivityReport {
        fan_out(
            attr_ids,
            max_in_flight,
            |attr_id| {
                let client = self.clone();
                async move { client.set_attr_sensitivity(attr_id, action).await }
            },
            on_progress,
        )
        .await
    }
}

/// Spawns one task per attribute and joins them in submission order,
/// reporting each completion as it arrives. Every task is spawned up front
/// and acquires its semaphore permit inside the task, so joining starts
/// immediately and progress is never deferred to the end of the batch. The
/// semaphore grants permits in request order, keeping `max_in_flight = 1`
/// strictly sequential.
async fn fan_out<F, Fut>(
    attr_ids: &[u64],
    max_in_flight: usize,
    op: F,
    mut on_progress: impl FnMut(usize, usize),
) -> SensitivityReport
where
    F: Fn(u64) -> Fut,
    Fut: Future<Output = Result<()>> + Send + 'static,
{
    let total = attr_ids.len();
    let semaphore = Arc::new(Semaphore::new(max_in_flight.max(1)));
    let mut handles = Vec::with_capacity(total);

    for &attr_id in attr_ids {
        let semaphore = Arc::clone(&semaphore);
        // The op future does nothing until polled inside the task.
        let fut = op(attr_id);
        handles.push((
            attr_id,
            tokio::spawn(async move {
                let _permit = semaphore.acquire_owned().await.ok();
                fut.await
            }),
        ));
    }

    let mut report = SensitivityReport::default();
    for (done, (attr_id, handle)) in handles.into_iter().enumerate() {
        match handle.await {
            Ok(Ok(())) => report.record_success(),
            Ok(Err(e)) => {
                warn!(attr_id, "sensitivity update failed: {e}");
                report.record_failure(attr_id, e.to_string());
            }
            Err(e) => {
                warn!(attr_id, "sensitivity task panicked: {e}");
                report.record_failure(attr_id, format!("task failed: {e}"));
            }
        }
        on_progress(done + 1, total);
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use std::cell::RefCell;
    use std::time::Duration;

    #[tokio::test]
    async fn test_bulk_with_no_attributes_is_clean() {
        let client = CatalogClient::new("https://catalog.example.com", "t");
        let mut progress_calls = 0;

        let report = client
            .set_sensitivity_bulk(&[], SensitivityAction::Set, 1, |_, _| progress_calls += 1)
            .await;

        assert!(report.is_clean());
        assert_eq!(report.total(), 0);
        assert_eq!(progress_calls, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_progress_reported_per_completion() {
        let ids = [1u64, 2, 3];
        let progress = RefCell::new(Vec::new());
        let started = tokio::time::Instant::now();

        let report = fan_out(
            &ids,
            1,
            |_id| async move {
                tokio::time::sleep(Duration::from_secs(10)).await;
                Ok(())
            },
            |done, total| {
                progress.borrow_mut().push((done, total, started.elapsed()));
            },
        )
        .await;

        assert!(report.is_clean());
        assert_eq!(report.updated, 3);
        // One progress call per completion, as each finishes, not a burst
        // once the whole batch is done.
        assert_eq!(
            *progress.borrow(),
            vec![
                (1, 3, Duration::from_secs(10)),
                (2, 3, Duration::from_secs(20)),
                (3, 3, Duration::from_secs(30)),
            ]
        );
    }

    #[tokio::test]
    async fn test_fan_out_collects_partial_failures() {
        let ids = [10u64, 20, 30];

        let report = fan_out(
            &ids,
            2,
            |id| async move {
                if id == 20 {
                    Err(ClientError::api_error(500, "boom"))
                } else {
                    Ok(())
                }
            },
            |_, _| {},
        )
        .await;

        assert_eq!(report.updated, 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].attr_id, 20);
        assert!(report.failures[0].detail.contains("500"));
    }
}
