//! HTTP adapter for the timetable backend
//!
//! Implements `RawApiPort` with reqwest. Paths handed in by services are
//! relative (`/api/...`) and joined onto the configured base URL.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde_json::Value;
use std::time::Duration;

use crate::ports::outbound::{ApiError, RawApiPort};

#[derive(Clone)]
pub struct HttpApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Send `Authorization: Bearer <token>` on every request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn send(&self, path: &str, request: RequestBuilder) -> Result<Response, ApiError> {
        let request = match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(path.to_string()));
        }

        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        tracing::debug!(path, status = status.as_u16(), "Backend returned an error status");
        Err(ApiError::HttpError {
            status: status.as_u16(),
            message,
        })
    }

    /// Read a JSON body, treating an empty body as `null`.
    async fn json_body(response: Response) -> Result<Value, ApiError> {
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| ApiError::ParseError(e.to_string()))
    }
}

#[async_trait]
impl RawApiPort for HttpApiClient {
    async fn get_json(&self, path: &str) -> Result<Value, ApiError> {
        let response = self.send(path, self.client.get(self.url(path))).await?;
        Self::json_body(response).await
    }

    async fn post_json(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        let response = self
            .send(path, self.client.post(self.url(path)).json(body))
            .await?;
        Self::json_body(response).await
    }

    async fn put_json(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        let response = self
            .send(path, self.client.put(self.url(path)).json(body))
            .await?;
        Self::json_body(response).await
    }

    async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.send(path, self.client.delete(self.url(path))).await?;
        Ok(())
    }
}
