//! HTTP plumbing shared by all backend endpoints.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use reqwest::StatusCode;
use serde_json::Value;

use crate::config::BackendConfig;

use super::BackendError;

/// The phrase the workflow service puts in `detalle` when a confirmation
/// raced an already-completed transition. Matching on it is inherited from
/// the backend's error contract and is the single place that knows it.
const ALREADY_PROCESSED_MARKER: &str = "Task Timed Out";

/// Client for the restaurant backend APIs.
pub struct BackendClient {
    http: reqwest::Client,
    config: BackendConfig,
    /// Order uuids with a workflow start currently in flight.
    workflow_starts: Mutex<HashSet<String>>,
}

impl BackendClient {
    /// Create a new backend client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            http,
            config: config.clone(),
            workflow_starts: Mutex::new(HashSet::new()),
        })
    }

    pub(super) const fn config(&self) -> &BackendConfig {
        &self.config
    }

    pub(super) async fn get_json(&self, url: &str) -> Result<Value, BackendError> {
        tracing::debug!(url, "backend GET");
        let response = self.http.get(url).send().await?;
        Self::into_json(response).await
    }

    pub(super) async fn post_json(&self, url: &str, body: &Value) -> Result<Value, BackendError> {
        tracing::debug!(url, "backend POST");
        let response = self.http.post(url).json(body).send().await?;
        Self::into_json(response).await
    }

    pub(super) async fn put_json(&self, url: &str, body: &Value) -> Result<Value, BackendError> {
        tracing::debug!(url, "backend PUT");
        let response = self.http.put(url).json(body).send().await?;
        Self::into_json(response).await
    }

    async fn into_json(response: reqwest::Response) -> Result<Value, BackendError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(api_error(status, &body));
        }
        response.json().await.map_err(Into::into)
    }

    /// Reserve the in-flight slot for a workflow start on the given order.
    ///
    /// The slot is keyed by order uuid and released when the returned guard
    /// drops, so starts for different orders never block each other.
    pub(super) fn begin_workflow_start(
        &self,
        uuid: &str,
    ) -> Result<WorkflowStartGuard<'_>, BackendError> {
        let mut inflight = self
            .workflow_starts
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if !inflight.insert(uuid.to_owned()) {
            return Err(BackendError::WorkflowInProgress);
        }
        Ok(WorkflowStartGuard {
            inflight: &self.workflow_starts,
            uuid: uuid.to_owned(),
        })
    }
}

/// Releases an order's workflow-start slot on drop.
pub(super) struct WorkflowStartGuard<'a> {
    inflight: &'a Mutex<HashSet<String>>,
    uuid: String,
}

impl Drop for WorkflowStartGuard<'_> {
    fn drop(&mut self) {
        self.inflight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.uuid);
    }
}

/// Translate an error response body into a `BackendError`.
///
/// The body is usually JSON with one of several message keys; a `detalle`
/// mentioning a timed-out task means the transition was already processed.
fn api_error(status: StatusCode, body: &str) -> BackendError {
    if let Ok(payload) = serde_json::from_str::<Value>(body) {
        if payload
            .get("detalle")
            .and_then(Value::as_str)
            .is_some_and(|detail| detail.contains(ALREADY_PROCESSED_MARKER))
        {
            return BackendError::AlreadyProcessed;
        }

        for key in ["mensaje", "message", "error"] {
            if let Some(message) = payload.get(key).and_then(Value::as_str) {
                return BackendError::Api {
                    status: status.as_u16(),
                    message: message.to_owned(),
                };
            }
        }
    }

    let message = if body.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("error desconocido")
            .to_owned()
    } else {
        body.to_owned()
    };

    BackendError::Api {
        status: status.as_u16(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> BackendClient {
        let config = BackendConfig {
            orders_url: "https://orders.test".to_owned(),
            order_detail_url: "https://detail.test".to_owned(),
            workflow_url: "https://orders.test".to_owned(),
            employees_url: "https://employees.test/dev/empleados".to_owned(),
            default_tenant: "restaurante_central_01".to_owned(),
        };
        BackendClient::new(&config).expect("client builds")
    }

    #[test]
    fn test_second_start_for_same_order_fails() {
        let client = test_client();
        let _guard = client.begin_workflow_start("uuid-1").expect("first start");
        assert!(matches!(
            client.begin_workflow_start("uuid-1"),
            Err(BackendError::WorkflowInProgress)
        ));
    }

    #[test]
    fn test_starts_for_different_orders_are_independent() {
        let client = test_client();
        let _a = client.begin_workflow_start("uuid-1").expect("first order");
        let _b = client.begin_workflow_start("uuid-2").expect("second order");
    }

    #[test]
    fn test_slot_released_when_guard_drops() {
        let client = test_client();
        drop(client.begin_workflow_start("uuid-1").expect("first start"));
        assert!(client.begin_workflow_start("uuid-1").is_ok());
    }

    #[test]
    fn test_api_error_prefers_known_message_keys() {
        let err = api_error(
            StatusCode::BAD_REQUEST,
            r#"{"mensaje": "pedido invalido", "message": "ignored"}"#,
        );
        match err {
            BackendError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "pedido invalido");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_api_error_detects_already_processed() {
        let err = api_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"detalle": "Lambda: Task Timed Out after 30s"}"#,
        );
        assert!(matches!(err, BackendError::AlreadyProcessed));
    }

    #[test]
    fn test_api_error_falls_back_to_raw_body() {
        let err = api_error(StatusCode::BAD_GATEWAY, "upstream exploded");
        match err {
            BackendError::Api { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, "upstream exploded");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_api_error_empty_body_uses_status_reason() {
        let err = api_error(StatusCode::SERVICE_UNAVAILABLE, "");
        match err {
            BackendError::Api { message, .. } => {
                assert_eq!(message, "Service Unavailable");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
