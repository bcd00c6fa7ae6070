//! HTTP client for the REST endpoints.

use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use trigger_core::{empty_payload, RunEntry, RunId, Schedule, TaskId};

use crate::api::{TaskApi, TriggeredRun};
use crate::error::ClientError;
use crate::types::{ApiRun, ApiSchedule, ListResponse, TriggerRequest, TriggerResponse};

/// Default API host.
pub const DEFAULT_BASE_URL: &str = "https://api.trigger.dev";

/// HTTP client for the REST API.
///
/// Every request carries the secret key as a bearer token.
pub struct HttpClient {
    inner: reqwest::Client,
    base_url: String,
    secret_key: String,
}

impl HttpClient {
    /// Create a new HTTP client.
    pub fn new(base_url: &str, secret_key: impl Into<String>) -> Self {
        Self {
            inner: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            secret_key: secret_key.into(),
        }
    }

    /// Endpoint URL under the base URL. Each segment is percent-encoded, so
    /// ids containing `/`, `?` or `#` stay a single segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url =
            Url::parse(&self.base_url).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Send a request and fail on any non-success status.
    async fn send(&self, request: RequestBuilder) -> Result<Response, ClientError> {
        let response = request.bearer_auth(&self.secret_key).send().await?;

        let status = response.status();
        if !status.is_success() {
            debug!(status = status.as_u16(), "Request failed");
            return Err(ClientError::Api {
                status: status.as_u16(),
            });
        }

        Ok(response)
    }

    /// Get JSON from an endpoint.
    async fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<T, ClientError> {
        let url = self.endpoint(segments)?;
        debug!(url = %url, "GET request");

        let response = self.send(self.inner.get(url).query(query)).await?;

        response
            .json()
            .await
            .map_err(|e| ClientError::Serialization(e.to_string()))
    }
}

#[async_trait]
impl TaskApi for HttpClient {
    async fn list_runs(&self, page_size: u32) -> Result<Vec<RunEntry>, ClientError> {
        let list: ListResponse<ApiRun> = self
            .get_json(
                &["api", "v1", "runs"],
                &[("page[size]", page_size.to_string())],
            )
            .await?;
        debug!(count = list.data.len(), "Fetched runs");
        Ok(list.data.into_iter().map(RunEntry::from).collect())
    }

    async fn list_schedules(&self) -> Result<Vec<Schedule>, ClientError> {
        let list: ListResponse<ApiSchedule> = self
            .get_json(&["api", "v1", "schedules"], &[])
            .await?;
        debug!(count = list.data.len(), "Fetched schedules");
        Ok(list.data.into_iter().map(Schedule::from).collect())
    }

    async fn trigger_task(
        &self,
        task_id: &TaskId,
        payload: Option<Value>,
    ) -> Result<TriggeredRun, ClientError> {
        let url = self.endpoint(&["api", "v1", "tasks", task_id.as_str(), "trigger"])?;
        debug!(url = %url, task_id = %task_id, "POST trigger");

        let payload = payload.unwrap_or_else(empty_payload);
        let body = TriggerRequest { payload: &payload };
        let response = self.send(self.inner.post(url).json(&body)).await?;

        let triggered: TriggerResponse = response
            .json()
            .await
            .map_err(|e| ClientError::Serialization(e.to_string()))?;

        Ok(TriggeredRun {
            run_id: triggered.id.map(RunId::from),
        })
    }

    async fn cancel_run(&self, run_id: &RunId) -> Result<(), ClientError> {
        let url = self.endpoint(&["api", "v2", "runs", run_id.as_str(), "cancel"])?;
        debug!(url = %url, run_id = %run_id, "POST cancel");

        self.send(self.inner.post(url)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use trigger_core::RunStatus;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const KEY: &str = "tr_dev_test";

    #[tokio::test]
    async fn test_list_runs_sends_auth_and_page_size() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/runs"))
            .and(query_param("page[size]", "50"))
            .and(header("Authorization", "Bearer tr_dev_test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [
                    {"id": "run_2", "taskIdentifier": "sendSms", "status": "EXECUTING"},
                    {"id": "run_1", "taskIdentifier": "sendEmail", "status": "COMPLETED"}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpClient::new(&server.uri(), KEY);
        let runs = client.list_runs(50).await.unwrap();

        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].run_id.as_str(), "run_2");
        assert_eq!(runs[0].status, RunStatus::Executing);
        assert_eq!(runs[1].task_id.as_str(), "sendEmail");
    }

    #[tokio::test]
    async fn test_non_success_status_is_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/schedules"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let client = HttpClient::new(&server.uri(), KEY);
        let err = client.list_schedules().await.unwrap_err();

        assert!(matches!(err, ClientError::Api { status: 401 }));
        assert_eq!(err.to_string(), "API error: 401");
    }

    #[tokio::test]
    async fn test_list_schedules() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/schedules"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{
                    "id": "sched_1",
                    "task": "weekly-report",
                    "active": false,
                    "generator": {"expression": "0 9 * * 1"}
                }]
            })))
            .mount(&server)
            .await;

        let client = HttpClient::new(&server.uri(), KEY);
        let schedules = client.list_schedules().await.unwrap();

        assert_eq!(schedules.len(), 1);
        assert_eq!(schedules[0].task_id.as_str(), "weekly-report");
        assert!(!schedules[0].active);
    }

    #[tokio::test]
    async fn test_trigger_defaults_to_empty_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/tasks/sendEmail/trigger"))
            .and(header("Authorization", "Bearer tr_dev_test"))
            .and(body_json(json!({"payload": {}})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "run_new"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpClient::new(&server.uri(), KEY);
        let triggered = client
            .trigger_task(&TaskId::new("sendEmail"), None)
            .await
            .unwrap();

        assert_eq!(triggered.run_id, Some(RunId::new("run_new")));
    }

    #[tokio::test]
    async fn test_trigger_sends_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/tasks/sendEmail/trigger"))
            .and(body_json(json!({"payload": {"to": "a@example.com"}})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "run_new"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpClient::new(&server.uri(), KEY);
        client
            .trigger_task(
                &TaskId::new("sendEmail"),
                Some(json!({"to": "a@example.com"})),
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_ids_are_encoded_as_one_segment() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/tasks/reports%2Fweekly%3Fx%23y/trigger"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "run_new"})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/v2/runs/run%2F..%2F1/cancel"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpClient::new(&server.uri(), KEY);
        client
            .trigger_task(&TaskId::new("reports/weekly?x#y"), None)
            .await
            .unwrap();
        client.cancel_run(&RunId::new("run/../1")).await.unwrap();
    }

    #[tokio::test]
    async fn test_base_url_with_prefix() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/trigger/api/v1/schedules"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpClient::new(&format!("{}/trigger/", server.uri()), KEY);
        assert!(client.list_schedules().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_base_url() {
        let client = HttpClient::new("not a url", KEY);
        let err = client.list_runs(50).await.unwrap_err();
        assert!(matches!(err, ClientError::InvalidUrl(_)));
    }

    #[tokio::test]
    async fn test_cancel_uses_v2_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v2/runs/run_123/cancel"))
            .and(header("Authorization", "Bearer tr_dev_test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "run_123"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpClient::new(&format!("{}/", server.uri()), KEY);
        client.cancel_run(&RunId::new("run_123")).await.unwrap();
    }

    #[tokio::test]
    async fn test_cancel_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v2/runs/run_missing/cancel"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = HttpClient::new(&server.uri(), KEY);
        let err = client.cancel_run(&RunId::new("run_missing")).await.unwrap_err();
        assert!(matches!(err, ClientError::Api { status: 404 }));
    }
}
