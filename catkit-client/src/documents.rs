//! Document and bulk metadata job endpoints

use crate::error::Result;
use crate::{CatalogClient, handle_response, poll_until_terminal};
use catkit_core::domain::document::StubBatch;
use catkit_core::dto::job::JobSubmitted;
use catkit_core::poll::{JobHandle, PollResult, PollSchedule, StatusPolicy, StatusSnapshot};

impl CatalogClient {
    // =============================================================================
    // Documents
    // =============================================================================

    /// Submit a batch of stub documents for creation
    ///
    /// The server creates the documents asynchronously; the returned handle
    /// is tracked with [`CatalogClient::wait_for_job`].
    ///
    /// # Arguments
    /// * `batch` - The stub batch to expand into a bulk creation payload
    pub async fn create_stub_documents(&self, batch: &StubBatch) -> Result<JobSubmitted> {
        let url = format!("{}/integration/v2/document/", self.base_url());
        let response = self
            .http()
            .post(&url)
            .header("Token", self.token())
            .json(&batch.to_documents())
            .send()
            .await?;

        handle_response(response).await
    }

    /// Fetch document metadata by ID
    ///
    /// The payload is passed through verbatim; callers render it directly.
    pub async fn get_document(&self, doc_id: u64) -> Result<serde_json::Value> {
        let url = format!("{}/integration/v2/document/", self.base_url());
        let response = self
            .http()
            .get(&url)
            .header("Token", self.token())
            .query(&[("id", doc_id)])
            .send()
            .await?;

        handle_response(response).await
    }

    // =============================================================================
    // Bulk Metadata Jobs
    // =============================================================================

    /// Perform one status check for a bulk metadata job
    ///
    /// Never retries; the poll driver owns retry semantics.
    pub async fn job_status(&self, handle: &JobHandle) -> Result<StatusSnapshot> {
        let url = format!("{}/api/v1/bulk_metadata/job/", self.base_url());
        let response = self
            .http()
            .get(&url)
            .header("Token", self.token())
            .query(&[("id", handle.as_str())])
            .send()
            .await?;

        let payload: serde_json::Value = handle_response(response).await?;
        Ok(StatusSnapshot::from_payload(payload))
    }

    /// Poll a bulk metadata job until it leaves the `"running"` status
    ///
    /// Any other status label is terminal and passed through ungraded.
    ///
    /// # Arguments
    /// * `handle` - The job handle from [`CatalogClient::create_stub_documents`]
    /// * `schedule` - Retry budget; [`PollSchedule::for_bulk_job`] for the default
    /// * `observe` - Receives a `Running` update per non-terminal check
    pub async fn wait_for_job(
        &self,
        handle: &JobHandle,
        schedule: &PollSchedule,
        observe: impl FnMut(&PollResult),
    ) -> PollResult {
        poll_until_terminal(
            schedule,
            &StatusPolicy::RunningLabel,
            || self.job_status(handle),
            observe,
        )
        .await
    }
}
