use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};

use crate::{api::types::*, config};

pub const AUTH_PREFIX: &str = "/api/v1/auth";

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Option<String>,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: None,
        }
    }

    pub fn new_with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: Some(base_url.into()),
        }
    }

    pub(crate) async fn resolved_base_url(&self) -> String {
        if let Some(base) = &self.base_url {
            base.clone()
        } else {
            config::await_api_base_url().await
        }
    }

    pub(crate) async fn endpoint(&self, path: &str) -> String {
        let base_url = self.resolved_base_url().await;
        format!("{}{}{}", base_url.trim_end_matches('/'), AUTH_PREFIX, path)
    }

    /// POSTs `body` as JSON and decodes a JSON success body.
    ///
    /// `fallback` is used when the server rejects the request without a
    /// readable `{message}`.
    pub(crate) async fn post_json<B, R>(
        &self,
        path: &str,
        body: &B,
        fallback: &str,
    ) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.endpoint(path).await;
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::request_failed(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            response.json::<R>().await.map_err(|e| {
                log::warn!("failed to parse response from {}: {}", path, e);
                ApiError::parse()
            })
        } else {
            let body = response
                .json::<ServerErrorBody>()
                .await
                .unwrap_or_default();
            log::debug!("{} rejected with status {}", path, status.as_u16());
            Err(ApiError::server(server_message(body, fallback)))
        }
    }
}

fn server_message(body: ServerErrorBody, fallback: &str) -> String {
    body.message
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string())
}
