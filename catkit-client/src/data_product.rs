//! Data product endpoints (cold start submission and task tracking)

use crate::error::Result;
use crate::{default_http_client, handle_response, poll_until_terminal};
use catkit_core::domain::task::{ColdStartRequest, TaskStatus};
use catkit_core::dto::job::JobSubmitted;
use catkit_core::poll::{JobHandle, PollResult, PollSchedule, StatusPolicy, StatusSnapshot};
use reqwest::{Client, RequestBuilder};

/// HTTP client for the API-key-authenticated data product surface
///
/// Unlike [`crate::CatalogClient`], requests here carry an `alation-user-id`
/// header and an `AlationAPIKey` authorization scheme, and are scoped to a
/// tenant.
#[derive(Debug, Clone)]
pub struct DataProductClient {
    base_url: String,
    tenant_id: String,
    user_id: String,
    api_key: String,
    client: Client,
}

impl DataProductClient {
    /// Create a new data product client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the catalog instance
    /// * `tenant_id` - Tenant the data products belong to
    /// * `user_id` - Value for the `alation-user-id` header
    /// * `api_key` - API key for the `AlationAPIKey` authorization scheme
    pub fn new(
        base_url: impl Into<String>,
        tenant_id: impl Into<String>,
        user_id: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            tenant_id: tenant_id.into(),
            user_id: user_id.into(),
            api_key: api_key.into(),
            client: default_http_client(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn cold_start_url(&self) -> String {
        format!(
            "{}/nsapi/api/v3/orgs/{}/data_product/cold_start_from_data_product_id",
            self.base_url, self.tenant_id
        )
    }

    fn task_url(&self, task_id: &JobHandle) -> String {
        format!(
            "{}/nsapi/api/v1/accounts/{}/tasks/{}",
            self.base_url, self.tenant_id, task_id
        )
    }

    /// Attach the headers required by every data product request
    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("accept", "application/json")
            .header("alation-user-id", &self.user_id)
            .header("Authorization", format!("AlationAPIKey {}", self.api_key))
    }

    // =============================================================================
    // Cold Start
    // =============================================================================

    /// Submit a cold start for a data product
    ///
    /// The server materializes the data product asynchronously; the returned
    /// handle is tracked with [`DataProductClient::wait_for_task`].
    pub async fn cold_start(&self, req: &ColdStartRequest) -> Result<JobSubmitted> {
        let response = self
            .authed(self.client.post(self.cold_start_url()))
            .query(req)
            .send()
            .await?;

        handle_response(response).await
    }

    /// Render the cold start request as a copy-pasteable cURL command
    pub fn curl_preview(&self, req: &ColdStartRequest) -> String {
        let url = format!(
            "{}?data_product_id={}&result_cache_database={}&result_cache_schema={}&if_exists={}",
            self.cold_start_url(),
            req.data_product_id,
            req.result_cache_database,
            req.result_cache_schema,
            req.if_exists
        );

        [
            "curl".to_string(),
            "-X".to_string(),
            "POST".to_string(),
            shell_words::quote(&url).into_owned(),
            "-H".to_string(),
            shell_words::quote("accept: application/json").into_owned(),
            "-H".to_string(),
            shell_words::quote(&format!("alation-user-id: {}", self.user_id)).into_owned(),
            "-H".to_string(),
            shell_words::quote(&format!("Authorization: AlationAPIKey {}", self.api_key))
                .into_owned(),
        ]
        .join(" ")
    }

    // =============================================================================
    // Task Tracking
    // =============================================================================

    /// Perform one status check for a cold start task
    pub async fn task_status(&self, task_id: &JobHandle) -> Result<StatusSnapshot> {
        let response = self
            .authed(self.client.get(self.task_url(task_id)))
            .send()
            .await?;

        let payload: serde_json::Value = handle_response(response).await?;
        Ok(StatusSnapshot::from_payload(payload))
    }

    /// Fetch the typed status record for a cold start task
    pub async fn get_task(&self, task_id: &JobHandle) -> Result<TaskStatus> {
        let response = self
            .authed(self.client.get(self.task_url(task_id)))
            .send()
            .await?;

        handle_response(response).await
    }

    /// Poll a cold start task until its status joins the terminal set
    ///
    /// Terminal statuses carry a success/failure grade; everything else is
    /// treated as in progress. There is no retry budget, only the schedule's
    /// interval: the loop runs until terminal or transport failure.
    pub async fn wait_for_task(
        &self,
        task_id: &JobHandle,
        schedule: &PollSchedule,
        observe: impl FnMut(&PollResult),
    ) -> PollResult {
        poll_until_terminal(
            schedule,
            &StatusPolicy::TerminalSet,
            || self.task_status(task_id),
            observe,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catkit_core::domain::task::IfExists;

    fn client() -> DataProductClient {
        DataProductClient::new("https://catalog.example.com/", "tenant-1", "5", "k3y")
    }

    fn request() -> ColdStartRequest {
        ColdStartRequest {
            data_product_id: "my-data-product".to_string(),
            result_cache_database: "PROD_DB".to_string(),
            result_cache_schema: "ANALYTICS".to_string(),
            if_exists: IfExists::Error,
        }
    }

    #[test]
    fn test_trims_trailing_slash() {
        assert_eq!(client().base_url(), "https://catalog.example.com");
    }

    #[test]
    fn test_task_url_is_tenant_scoped() {
        let url = client().task_url(&JobHandle::new("task-7"));
        assert_eq!(
            url,
            "https://catalog.example.com/nsapi/api/v1/accounts/tenant-1/tasks/task-7"
        );
    }

    #[test]
    fn test_curl_preview_quotes_credentials() {
        let client =
            DataProductClient::new("https://catalog.example.com", "tenant-1", "5", "k'3y");
        let preview = client.curl_preview(&request());

        // Single quotes in the key are escaped shell-style, not pasted raw.
        assert!(preview.contains(r"k'\''3y"), "preview was: {preview}");
        assert!(!preview.contains("AlationAPIKey k'3y'"));
    }

    #[test]
    fn test_curl_preview() {
        let preview = client().curl_preview(&request());
        assert!(preview.starts_with("curl -X POST "));
        assert!(preview.contains("cold_start_from_data_product_id"));
        assert!(preview.contains("data_product_id=my-data-product"));
        assert!(preview.contains("if_exists=error"));
        assert!(preview.contains("'alation-user-id: 5'"));
        assert!(preview.contains("'Authorization: AlationAPIKey k3y'"));
    }
}
