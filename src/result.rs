//! Results of completed jobs.
//!
//! A [`JobResult`] pairs the raw transport evidence returned by the service
//! with the decoded numeric output. The transport mapping is stored exactly
//! as received; callers that only care about `job_id` and `data` must never
//! be rejected because the mapping lacks a conventional key.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::job::JobId;

/// Output of a completed job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobResult {
    job_id: JobId,
    http_response: Map<String, Value>,
    data: Vec<f64>,
}

impl JobResult {
    /// Create a result. All three parts are stored verbatim.
    pub fn new(job_id: JobId, http_response: Map<String, Value>, data: Vec<f64>) -> Self {
        Self {
            job_id,
            http_response,
            data,
        }
    }

    pub fn job_id(&self) -> JobId {
        self.job_id
    }

    /// Transport metadata (status code, raw body, ...) as received.
    pub fn http_response(&self) -> &Map<String, Value> {
        &self.http_response
    }

    /// Decoded numeric output, in execution order.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// The `"code"` entry of the transport mapping, when present and numeric.
    ///
    /// Accepts both `201` and `"201"`.
    pub fn status_code(&self) -> Option<u16> {
        match self.http_response.get("code")? {
            Value::Number(n) => n.as_u64().and_then(|n| u16::try_from(n).ok()),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Consume the result, returning its parts.
    pub fn into_parts(self) -> (JobId, Map<String, Value>, Vec<f64>) {
        (self.job_id, self.http_response, self.data)
    }
}
