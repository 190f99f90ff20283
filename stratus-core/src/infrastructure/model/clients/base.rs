//! Base HTTP client with shared logic

use crate::infrastructure::model::types::ModelError;
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Base HTTP client with shared functionality
#[derive(Clone)]
pub struct HttpClientBase {
    pub id: String,
    pub endpoint: String,
    pub api_key: Option<String>,
    pub http: Client,
}

impl HttpClientBase {
    pub fn new(id: String, endpoint: String, api_key: Option<String>) -> Self {
        Self {
            id,
            endpoint,
            api_key,
            http: Client::new(),
        }
    }

    /// Build URL from endpoint and path
    pub fn build_url(&self, path: &str) -> String {
        let base = self.endpoint.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }

    /// Post JSON with the key in a named header (Anthropic's `x-api-key`)
    pub async fn post_with_key_header<Req, Res>(
        &self,
        url: &str,
        header: &str,
        extra_headers: &[(&str, &str)],
        body: &Req,
    ) -> Result<Res, ModelError>
    where
        Req: Serialize,
        Res: DeserializeOwned,
    {
        let api_key = self.require_api_key()?;
        let mut request = self.http.post(url).header(header, api_key);
        for (name, value) in extra_headers {
            request = request.header(*name, *value);
        }
        self.send(request.json(body)).await
    }

    /// Post JSON with bearer auth when a key is configured, without auth otherwise
    pub async fn post_with_optional_bearer<Req, Res>(
        &self,
        url: &str,
        body: &Req,
    ) -> Result<Res, ModelError>
    where
        Req: Serialize,
        Res: DeserializeOwned,
    {
        let mut request = self.http.post(url);
        if let Some(api_key) = self.api_key.as_deref().filter(|k| !k.trim().is_empty()) {
            request = request.header("Authorization", format!("Bearer {api_key}"));
        }
        self.send(request.json(body)).await
    }

    async fn send<Res>(&self, request: RequestBuilder) -> Result<Res, ModelError>
    where
        Res: DeserializeOwned,
    {
        let response = request
            .send()
            .await
            .map_err(|e| ModelError::network(&self.id, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ModelError::status(&self.id, status, error_message(&body)));
        }

        response
            .json()
            .await
            .map_err(|e| ModelError::network(&self.id, e))
    }

    fn require_api_key(&self) -> Result<&str, ModelError> {
        self.api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| ModelError::missing_api_key(&self.id))
    }
}

/// Pull `error.message` out of a provider error body, falling back to the raw text.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("error")
                .and_then(|error| error.get("message").or(Some(error)))
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.trim().to_string())
}
