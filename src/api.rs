/// HTTP client for the checker backend

use crate::check_data::{ApiKey, ApiKeyList, CheckAccepted, CheckRequest, ErrorBody, ProgressSnapshot};
use crate::config::AppConfig;
use crate::error::CheckError;
use gloo_net::http::{Request, Response};
use gloo_timers::callback::Timeout;
use serde::Serialize;
use web_sys::{AbortController, AbortSignal};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(#[from] gloo_net::Error),

    #[error("Request aborted: {0}")]
    Abort(String),

    #[error("HTTP {status}")]
    Rejected { status: u16, message: Option<String> },
}

impl ApiError {
    /// Server-provided message, if the backend sent one
    pub fn server_message(&self) -> Option<String> {
        match self {
            ApiError::Rejected { message, .. } => message.clone(),
            _ => None,
        }
    }
}

impl From<ApiError> for CheckError {
    fn from(e: ApiError) -> Self {
        match e {
            ApiError::Rejected {
                message: Some(message),
                ..
            } => CheckError::Request(message),
            other => CheckError::Request(other.to_string()),
        }
    }
}

#[derive(Serialize)]
struct NewKey<'a> {
    key: &'a str,
}

#[derive(Clone, PartialEq)]
pub struct ApiClient {
    config: AppConfig,
}

impl ApiClient {
    pub fn new(config: AppConfig) -> Self {
        ApiClient { config }
    }

    /// `POST /check`
    pub async fn start_check(&self, request: &CheckRequest) -> Result<CheckAccepted, ApiError> {
        let response = Request::post(&self.config.endpoint("/check"))
            .json(request)?
            .send()
            .await?;
        let response = ensure_ok(response).await?;
        Ok(response.json::<CheckAccepted>().await.unwrap_or_default())
    }

    /// `GET /progress`, aborted after the configured timeout
    pub async fn fetch_progress(&self) -> Result<ProgressSnapshot, ApiError> {
        let deadline = Deadline::arm(self.config.request_timeout_ms)?;
        let response = Request::get(&self.config.endpoint("/progress"))
            .abort_signal(Some(deadline.signal()))
            .send()
            .await?;
        let response = ensure_ok(response).await?;
        let snapshot = response.json::<ProgressSnapshot>().await?;

        // The body read is covered too, so the deadline lives until here
        drop(deadline);
        Ok(snapshot)
    }

    /// `GET /api/keys`
    pub async fn list_keys(&self) -> Result<Vec<ApiKey>, ApiError> {
        let response = Request::get(&self.config.endpoint("/api/keys")).send().await?;
        let response = ensure_ok(response).await?;
        Ok(response.json::<ApiKeyList>().await?.keys)
    }

    /// `POST /api/keys`
    pub async fn add_key(&self, key: &str) -> Result<(), ApiError> {
        let response = Request::post(&self.config.endpoint("/api/keys"))
            .json(&NewKey { key })?
            .send()
            .await?;
        ensure_ok(response).await.map(|_| ())
    }

    /// `DELETE /api/keys/<key>`
    pub async fn delete_key(&self, key: &str) -> Result<(), ApiError> {
        let url = self
            .config
            .endpoint(&format!("/api/keys/{}", urlencoding::encode(key)));
        let response = Request::delete(&url).send().await?;
        ensure_ok(response).await.map(|_| ())
    }
}

/// Aborts its signal when the timer fires; dropping it disarms the timer
pub struct Deadline {
    signal: AbortSignal,
    _timer: Timeout,
}

impl Deadline {
    pub fn arm(timeout_ms: u32) -> Result<Self, ApiError> {
        let controller = AbortController::new().map_err(|e| ApiError::Abort(format!("{:?}", e)))?;
        let signal = controller.signal();
        let timer = Timeout::new(timeout_ms, move || controller.abort());
        Ok(Deadline {
            signal,
            _timer: timer,
        })
    }

    pub fn signal(&self) -> &AbortSignal {
        &self.signal
    }
}

async fn ensure_ok(response: Response) -> Result<Response, ApiError> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let message = response.json::<ErrorBody>().await.ok().map(|body| body.error);
    Err(ApiError::Rejected { status, message })
}
