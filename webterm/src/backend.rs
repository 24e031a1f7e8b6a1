use std::time::Duration;

use crate::error::TransportError;
use crate::protocol::{ExecuteReply, ExecuteRequest, SystemInfo};
use crate::session::SessionId;

/// The execution service behind the client. All interpretation and execution happen
/// on the other side of this trait.
#[async_trait::async_trait]
pub trait Backend: Send + Sync + 'static {
    async fn execute(&self, request: &ExecuteRequest) -> Result<ExecuteReply, TransportError>;

    /// Current prompt for `session_id`. `Ok(None)` when the backend reports none.
    async fn fetch_prompt(&self, session_id: &SessionId) -> Result<Option<String>, TransportError>;
}

/// JSON-over-HTTP backend (`POST /execute`, `GET /system_info`).
pub struct HttpBackend {
    base_url: String,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Bounds only connection setup; a request that is accepted may take as long as it needs.
    pub fn with_connect_timeout(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, TransportError> {
        Ok(Self {
            base_url: base_url.into(),
            client: reqwest::Client::builder().connect_timeout(timeout).build()?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }
}

#[async_trait::async_trait]
impl Backend for HttpBackend {
    async fn execute(&self, request: &ExecuteRequest) -> Result<ExecuteReply, TransportError> {
        let resp = self
            .client
            .post(self.url("execute"))
            .json(request)
            .send()
            .await?;

        // Error statuses still carry a JSON body ({"error": ...}); decode it either way.
        let status = resp.status();
        let body = resp.text().await?;
        tracing::debug!(%status, bytes = body.len(), "execute reply");
        Ok(serde_json::from_str(&body)?)
    }

    async fn fetch_prompt(&self, session_id: &SessionId) -> Result<Option<String>, TransportError> {
        let resp = self
            .client
            .get(self.url("system_info"))
            .query(&[("session_id", session_id.as_str())])
            .send()
            .await?;

        let body = resp.text().await?;
        let info: SystemInfo = serde_json::from_str(&body)?;
        if let Some(err) = &info.error {
            tracing::warn!(error = %err, "system_info reported an error");
        }
        Ok(info.prompt.filter(|p| !p.is_empty()))
    }
}
