//! Job records and status lifecycle.
//!
//! The service-side state machine, observed (never driven) by this crate:
//!
//! ```text
//!   not sent ──→ pending ──→ running ──→ completed
//!                                │
//!                                └─────→ error
//! ```
//!
//! **Invariants:**
//! - Status tokens on the wire are exactly `"not sent"`, `"pending"`,
//!   `"running"`, `"completed"` and `"error"`.
//! - `completed` and `error` are terminal.
//! - `queue_position` is only meaningful while the job is pending or running.
//! - Records perform no cross-field validation; consistency between
//!   `status` and `queue_position` is the server's responsibility.

use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ClientError, ClientResult};

/// Server-assigned job identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub i64);

impl JobId {
    /// Create a new job ID.
    pub fn new(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for JobId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Lifecycle state of a submitted job, as reported by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    /// Built locally, not yet accepted by the service.
    #[serde(rename = "not sent")]
    NotSent,
    /// Waiting in the device queue.
    Pending,
    /// Executing on the device.
    Running,
    /// Finished successfully.
    Completed,
    /// Finished with an error.
    Error,
}

impl JobStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [JobStatus; 5] = [
        JobStatus::NotSent,
        JobStatus::Pending,
        JobStatus::Running,
        JobStatus::Completed,
        JobStatus::Error,
    ];

    /// The exact wire token for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::NotSent => "not sent",
            JobStatus::Pending => "pending",
            JobStatus::Running => "running",
            JobStatus::Completed => "completed",
            JobStatus::Error => "error",
        }
    }

    /// Check if this is a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Error)
    }

    /// Check if the job sits in the service (queued or running).
    pub fn is_pending(&self) -> bool {
        matches!(self, JobStatus::Pending | JobStatus::Running)
    }

    /// Check if the job completed successfully.
    pub fn is_success(&self) -> bool {
        matches!(self, JobStatus::Completed)
    }
}

/// Free-standing form of [`JobStatus::is_terminal`], handy as a predicate.
pub fn is_terminal(status: &JobStatus) -> bool {
    status.is_terminal()
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobStatus {
    type Err = ClientError;

    fn from_str(s: &str) -> ClientResult<Self> {
        JobStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ClientError::UnknownStatus(s.to_string()))
    }
}

impl PartialEq<str> for JobStatus {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for JobStatus {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl PartialEq<JobStatus> for str {
    fn eq(&self, other: &JobStatus) -> bool {
        self == other.as_str()
    }
}

impl PartialEq<JobStatus> for &str {
    fn eq(&self, other: &JobStatus) -> bool {
        *self == other.as_str()
    }
}

/// A status field that may carry either a canonical [`JobStatus`] or any
/// other text the service chose to send.
///
/// Canonical tokens deserialize as `Enumerated`; everything else is kept
/// verbatim as `Raw`. Equality compares the text of both sides, so
/// `Raw("pending")` equals `Enumerated(JobStatus::Pending)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatusLabel {
    Enumerated(JobStatus),
    Raw(String),
}

impl StatusLabel {
    /// Text form as sent on the wire.
    pub fn as_str(&self) -> &str {
        match self {
            StatusLabel::Enumerated(status) => status.as_str(),
            StatusLabel::Raw(text) => text,
        }
    }

    /// The canonical status, if the text is one of the five tokens.
    pub fn status(&self) -> Option<JobStatus> {
        match self {
            StatusLabel::Enumerated(status) => Some(*status),
            StatusLabel::Raw(text) => text.parse().ok(),
        }
    }

    /// Terminal according to the canonical status; unknown labels are not terminal.
    pub fn is_terminal(&self) -> bool {
        self.status().is_some_and(|status| status.is_terminal())
    }
}

impl fmt::Display for StatusLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<JobStatus> for StatusLabel {
    fn from(status: JobStatus) -> Self {
        StatusLabel::Enumerated(status)
    }
}

impl From<String> for StatusLabel {
    fn from(text: String) -> Self {
        match text.parse() {
            Ok(status) => StatusLabel::Enumerated(status),
            Err(_) => StatusLabel::Raw(text),
        }
    }
}

impl From<&str> for StatusLabel {
    fn from(text: &str) -> Self {
        text.to_string().into()
    }
}

impl PartialEq for StatusLabel {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for StatusLabel {}

impl PartialEq<JobStatus> for StatusLabel {
    fn eq(&self, other: &JobStatus) -> bool {
        self.as_str() == other.as_str()
    }
}

impl PartialEq<StatusLabel> for JobStatus {
    fn eq(&self, other: &StatusLabel) -> bool {
        self.as_str() == other.as_str()
    }
}

impl PartialEq<str> for StatusLabel {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for StatusLabel {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

/// Parameters of a job, as built by the caller before submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRequest {
    /// Submitting user.
    pub user_id: i64,
    /// Target device.
    pub device_id: i64,
    /// Free-form description.
    pub description: String,
}

impl JobRequest {
    pub fn new(user_id: i64, device_id: i64, description: impl Into<String>) -> Self {
        Self {
            user_id,
            device_id,
            description: description.into(),
        }
    }
}

/// The server's answer to a submission or status query.
///
/// Carries the request fields flattened alongside the server-assigned ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobResponse {
    #[serde(flatten)]
    pub request: JobRequest,
    pub job_id: JobId,
    pub queue_position: u32,
    pub status: StatusLabel,
    pub result: String,
}

impl JobResponse {
    pub fn new(
        request: JobRequest,
        job_id: JobId,
        queue_position: u32,
        status: impl Into<StatusLabel>,
        result: impl Into<String>,
    ) -> Self {
        Self {
            request,
            job_id,
            queue_position,
            status: status.into(),
            result: result.into(),
        }
    }

    /// Queue position, only while the job is still pending or running.
    pub fn live_queue_position(&self) -> Option<u32> {
        self.status
            .status()
            .filter(JobStatus::is_pending)
            .map(|_| self.queue_position)
    }
}

/// Read-only snapshot returned by the job listing endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobFullData {
    pub queue_position: u32,
    pub status: StatusLabel,
    /// Absent for anonymized or system jobs.
    #[serde(default)]
    pub user_id: Option<i64>,
    pub device_id: i64,
    pub job_id: JobId,
    pub job_type: String,
    pub number_shots: NonZeroU32,
    pub result: serde_json::Value,
}

impl JobFullData {
    /// Build a snapshot; fails only when `number_shots` is zero.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        queue_position: u32,
        status: impl Into<StatusLabel>,
        user_id: Option<i64>,
        device_id: i64,
        job_id: JobId,
        job_type: impl Into<String>,
        number_shots: u32,
        result: serde_json::Value,
    ) -> ClientResult<Self> {
        let number_shots =
            NonZeroU32::new(number_shots).ok_or(ClientError::InvalidShots(number_shots))?;
        Ok(Self {
            queue_position,
            status: status.into(),
            user_id,
            device_id,
            job_id,
            job_type: job_type.into(),
            number_shots,
            result,
        })
    }
}
