/// Data structures exchanged with the checker backend
use serde::{Deserialize, Serialize};

/// A domain the checker found in the search index
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DomainRecord {
    pub domain: String,
    #[serde(rename = "count", default)]
    pub result_count: u32,
}

impl DomainRecord {
    pub fn new(domain: impl Into<String>, result_count: u32) -> DomainRecord {
        DomainRecord {
            domain: domain.into(),
            result_count,
        }
    }
}

/// A domain whose check failed on the backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorRecord {
    pub domain: String,
    pub error: String,
}

/// One full status payload from `GET /progress`
///
/// Each snapshot replaces the previous one wholesale.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ProgressSnapshot {
    pub total: u32,
    pub completed: u32,
    pub indexed: Vec<DomainRecord>,
    pub not_indexed: Vec<String>,
    pub errors: Vec<ErrorRecord>,
    pub in_progress: bool,
}

impl ProgressSnapshot {
    /// The job has finished once it is no longer running and did some work
    pub fn is_terminal(&self) -> bool {
        !self.in_progress && self.completed > 0
    }

    /// Completion percentage, rounded and clamped to 0..=100
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        let ratio = f64::from(self.completed) / f64::from(self.total);
        (ratio * 100.0).round().clamp(0.0, 100.0) as u8
    }
}

/// Body of `POST /check`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckRequest {
    pub domains: String,
    pub max_workers: u32,
}

/// Success body of `POST /check`; informational only
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CheckAccepted {
    pub message: Option<String>,
    pub total: Option<u32>,
}

/// Failure body returned by every backend route
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
}

/// A stored API key as listed by `GET /api/keys`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiKey {
    pub key: String,
    pub masked: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ApiKeyList {
    pub keys: Vec<ApiKey>,
}
