//! QPU Client — data model for a remote quantum execution service
//!
//! This crate provides the records a client exchanges with a remote service
//! that queues and runs quantum jobs: the authenticated [`User`], the
//! [`JobRequest`] a caller builds, the [`JobResponse`] / [`JobFullData`]
//! snapshots the service returns, and the [`JobResult`] of a finished job.
//! The transport itself sits behind the [`Api`] trait and is not part of
//! this crate.
//!
//! # Overview
//!
//! - [`User`] / [`UserView`] for authenticated identity
//! - [`JobStatus`] / [`StatusLabel`] for the job lifecycle
//! - [`JobRequest`], [`JobResponse`], [`JobFullData`] for job records
//! - [`JobResult`] for completed-job output
//! - [`Api`] as the service collaborator, with a provided polling [`Api::wait`]
//! - [`ClientError`] with errors grouped by recoverability
//!
//! All records are plain values: immutable after construction and safe to
//! share across threads without synchronization.
//!
//! # Decoding server payloads
//!
//! ```
//! use qpu_client::{JobFullData, JobStatus, decode};
//! use serde_json::json;
//!
//! let snapshot: JobFullData = decode(json!({
//!     "queue_position": 2,
//!     "status": "pending",
//!     "user_id": null,
//!     "device_id": 3,
//!     "job_id": 4,
//!     "job_type": "sampling",
//!     "number_shots": 1000,
//!     "result": {}
//! }))?;
//!
//! assert_eq!(snapshot.status, JobStatus::Pending);
//! assert!(snapshot.user_id.is_none());
//! # Ok::<(), qpu_client::ClientError>(())
//! ```
//!
//! # Lifecycle
//!
//! ```text
//!   not sent ──→ pending ──→ running ──→ completed | error
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod job;
pub mod result;
pub mod user;

pub use api::Api;
pub use config::WaitConfig;
pub use error::{ClientError, ClientResult, decode};
pub use job::{JobFullData, JobId, JobRequest, JobResponse, JobStatus, StatusLabel, is_terminal};
pub use result::JobResult;
pub use user::{User, UserView};
