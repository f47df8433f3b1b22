//! Client error types.
//!
//! Errors are categorized by recoverability:
//!
//! | Category | Variants | Recovery |
//! |----------|----------|----------|
//! | **Transient** | `ServiceUnavailable`, `Timeout` | Poll again later |
//! | **Shape** | `Decode`, `UnknownStatus`, `InvalidShots` | Fix input or payload |
//! | **Job-level** | `SubmissionFailed`, `JobFailed`, `JobNotFound` | Resubmit or abort |
//! | **Auth** | `AuthenticationFailed` | Re-authenticate |
//! | **Config** | `Configuration` | Fix configuration |
//! | **Transport** | `Http` | Inspect the server response |

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::job::JobId;

/// Errors that can occur while building records or talking to the service.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ClientError {
    // ── Transient errors ─────────────────────────────────────────────
    /// The execution service is not reachable right now.
    #[error("Service not available: {0}")]
    ServiceUnavailable(String),

    /// Gave up waiting for a job to reach a terminal status.
    #[error("Timeout waiting for job {0}")]
    Timeout(JobId),

    // ── Shape errors (fail at construction) ──────────────────────────
    /// A payload did not match the expected record shape.
    #[error("Malformed payload: {0}")]
    Decode(#[from] serde_json::Error),

    /// Text that is not one of the five canonical status tokens.
    #[error("Unknown job status: {0:?}")]
    UnknownStatus(String),

    /// Shot count must be positive.
    #[error("Invalid number of shots: {0}")]
    InvalidShots(u32),

    // ── Job-level errors ─────────────────────────────────────────────
    /// The service refused the submission.
    #[error("Job submission failed: {0}")]
    SubmissionFailed(String),

    /// The job finished with status `error`.
    #[error("Job {0} failed")]
    JobFailed(JobId),

    /// No job with this identifier exists for the user.
    #[error("Job not found: {0}")]
    JobNotFound(JobId),

    // ── Auth errors ──────────────────────────────────────────────────
    /// Credentials were rejected (re-authenticate).
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    // ── Config errors ────────────────────────────────────────────────
    /// Client-side settings are unusable (fix configuration).
    #[error("Configuration error: {0}")]
    Configuration(String),

    // ── Transport errors ─────────────────────────────────────────────
    /// Non-success HTTP answer surfaced by an `Api` implementation.
    #[error("HTTP error with status {status}: {message}")]
    Http { status: u16, message: String },
}

impl ClientError {
    /// Returns `true` if this error is transient and the operation may succeed later.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::ServiceUnavailable(_) | Self::Timeout(_))
    }
}

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Decode a raw server payload into one of the crate's records.
///
/// Missing required fields and wrong primitive types fail here, locally,
/// instead of being coerced.
pub fn decode<T: DeserializeOwned>(payload: serde_json::Value) -> ClientResult<T> {
    Ok(serde_json::from_value(payload)?)
}
