//! The execution-service collaborator.
//!
//! [`Api`] is the seam between this crate's records and whatever transport
//! talks to the remote service. The crate ships no implementation of it;
//! HTTP, authentication flow and queueing live on the other side.
//!
//! ```text
//!   authenticate() ──→ submit() ──→ job() ──→ result()
//!                                    ↺ wait() polls until terminal
//! ```
//!
//! ## Method table
//!
//! | Method | Required | Returns |
//! |--------|----------|---------|
//! | `authenticate()` | yes | `ClientResult<User>` |
//! | `submit()` | yes | `ClientResult<JobResponse>` |
//! | `job()` | yes | `ClientResult<JobResponse>` |
//! | `job_full_data()` | yes | `ClientResult<JobFullData>` |
//! | `list_jobs()` | yes | `ClientResult<Vec<JobFullData>>` |
//! | `result()` | yes | `ClientResult<JobResult>` |
//! | `wait_config()` | provided | `WaitConfig` |
//! | `wait()` | provided | `ClientResult<JobResult>` |

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::config::WaitConfig;
use crate::error::{ClientError, ClientResult};
use crate::job::{JobFullData, JobId, JobRequest, JobResponse, JobStatus};
use crate::result::JobResult;
use crate::user::User;

/// Client facade for the remote execution service.
///
/// Generic over `C`, the circuit payload, which this crate treats as opaque.
#[async_trait]
pub trait Api<C>: Send + Sync {
    /// Exchange credentials for an authenticated [`User`].
    async fn authenticate(&self, username: &str, password: &str) -> ClientResult<User>;

    /// Submit a circuit. The response carries the server-assigned job ID.
    async fn submit(
        &self,
        user: &User,
        request: &JobRequest,
        circuit: &C,
    ) -> ClientResult<JobResponse>;

    /// Current state of a job.
    async fn job(&self, user: &User, job_id: JobId) -> ClientResult<JobResponse>;

    /// Extended snapshot of a job.
    async fn job_full_data(&self, user: &User, job_id: JobId) -> ClientResult<JobFullData>;

    /// Snapshots of every job visible to `user`.
    async fn list_jobs(&self, user: &User) -> ClientResult<Vec<JobFullData>>;

    /// Output of a completed job.
    async fn result(&self, user: &User, job_id: JobId) -> ClientResult<JobResult>;

    /// Polling cadence used by [`Api::wait`].
    fn wait_config(&self) -> WaitConfig {
        WaitConfig::default()
    }

    /// Poll `job()` until the job is terminal, then fetch its result.
    ///
    /// Fails with `Configuration` before polling if [`Api::wait_config`] is
    /// unusable. Errors from `job()` are returned immediately. Labels outside
    /// the five canonical statuses are treated as still in progress. No pause
    /// follows the last poll.
    async fn wait(&self, user: &User, job_id: JobId) -> ClientResult<JobResult> {
        use tokio::time::sleep;

        let config = self.wait_config();
        config.validate()?;

        for attempt in 1..=config.max_polls {
            let response = self.job(user, job_id).await?;
            debug!(
                %job_id,
                attempt,
                status = %response.status,
                queue_position = response.queue_position,
                "polled job"
            );

            match response.status.status() {
                Some(JobStatus::Completed) => return self.result(user, job_id).await,
                Some(JobStatus::Error) => return Err(ClientError::JobFailed(job_id)),
                _ if attempt < config.max_polls => sleep(config.poll_interval()).await,
                _ => {}
            }
        }

        warn!(%job_id, max_polls = config.max_polls, "gave up waiting for job");
        Err(ClientError::Timeout(job_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::StatusLabel;
    use serde_json::{Map, json};
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    /// Replays a fixed sequence of statuses; the last one repeats forever.
    struct ScriptedApi {
        statuses: Mutex<VecDeque<Result<StatusLabel, ClientError>>>,
        polls: AtomicU32,
        config: WaitConfig,
    }

    impl ScriptedApi {
        fn new(statuses: Vec<Result<StatusLabel, ClientError>>) -> Self {
            Self {
                statuses: Mutex::new(statuses.into()),
                polls: AtomicU32::new(0),
                config: WaitConfig::default().with_max_polls(5),
            }
        }

        fn with_config(mut self, config: WaitConfig) -> Self {
            self.config = config;
            self
        }

        fn polls(&self) -> u32 {
            self.polls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Api<String> for ScriptedApi {
        async fn authenticate(&self, username: &str, _password: &str) -> ClientResult<User> {
            Ok(User::new(1, username, "key"))
        }

        async fn submit(
            &self,
            user: &User,
            request: &JobRequest,
            _circuit: &String,
        ) -> ClientResult<JobResponse> {
            assert_eq!(request.user_id, user.user_id());
            Ok(JobResponse::new(
                request.clone(),
                JobId(1),
                0,
                JobStatus::Pending,
                "",
            ))
        }

        async fn job(&self, user: &User, job_id: JobId) -> ClientResult<JobResponse> {
            self.polls.fetch_add(1, Ordering::SeqCst);
            let mut statuses = self.statuses.lock().unwrap();
            let next = if statuses.len() > 1 {
                statuses.pop_front()
            } else {
                statuses.front().map(|status| match status {
                    Ok(label) => Ok(label.clone()),
                    Err(_) => Err(ClientError::ServiceUnavailable("down".into())),
                })
            };
            let status = next.ok_or(ClientError::JobNotFound(job_id))??;
            Ok(JobResponse::new(
                JobRequest::new(user.user_id(), 3, "scripted"),
                job_id,
                1,
                status,
                "",
            ))
        }

        async fn job_full_data(&self, _user: &User, job_id: JobId) -> ClientResult<JobFullData> {
            Err(ClientError::JobNotFound(job_id))
        }

        async fn list_jobs(&self, _user: &User) -> ClientResult<Vec<JobFullData>> {
            Ok(vec![])
        }

        async fn result(&self, _user: &User, job_id: JobId) -> ClientResult<JobResult> {
            let mut http_response = Map::new();
            http_response.insert("code".into(), json!("200"));
            Ok(JobResult::new(job_id, http_response, vec![0.5, 0.5]))
        }

        fn wait_config(&self) -> WaitConfig {
            self.config
        }
    }

    fn user() -> User {
        User::new(1, "test-user", "000-3333")
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_returns_result_on_completion() {
        let api = ScriptedApi::new(vec![
            Ok(JobStatus::Pending.into()),
            Ok(JobStatus::Running.into()),
            Ok(JobStatus::Completed.into()),
        ]);

        let start = tokio::time::Instant::now();
        let result = api.wait(&user(), JobId(7)).await.unwrap();

        assert_eq!(result.job_id(), JobId(7));
        assert_eq!(result.data(), &[0.5, 0.5]);
        assert_eq!(api.polls(), 3);
        assert!(start.elapsed() >= Duration::from_millis(1000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_reports_job_error() {
        let api = ScriptedApi::new(vec![
            Ok(JobStatus::Pending.into()),
            Ok(JobStatus::Error.into()),
        ]);

        let err = api.wait(&user(), JobId(7)).await.unwrap_err();
        assert!(matches!(err, ClientError::JobFailed(JobId(7))));
        assert_eq!(api.polls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_keeps_polling_unknown_labels() {
        let api = ScriptedApi::new(vec![
            Ok("89".into()),
            Ok(StatusLabel::Raw("completed".into())),
        ]);

        let result = api.wait(&user(), JobId(2)).await.unwrap();
        assert_eq!(result.status_code(), Some(200));
        assert_eq!(api.polls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_times_out() {
        let api = ScriptedApi::new(vec![Ok(JobStatus::Running.into())]);

        let start = tokio::time::Instant::now();
        let err = api.wait(&user(), JobId(7)).await.unwrap_err();
        assert!(matches!(err, ClientError::Timeout(JobId(7))));
        assert!(err.is_transient());
        assert_eq!(api.polls(), 5);
        // Four pauses between five polls, none after the last one.
        assert!(start.elapsed() >= Duration::from_millis(2000));
        assert!(start.elapsed() < Duration::from_millis(2500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_rejects_unusable_config() {
        let api = ScriptedApi::new(vec![Ok(JobStatus::Completed.into())])
            .with_config(WaitConfig::default().with_max_polls(0));

        let err = api.wait(&user(), JobId(7)).await.unwrap_err();
        assert!(matches!(err, ClientError::Configuration(_)));
        assert_eq!(api.polls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_propagates_poll_errors() {
        let api = ScriptedApi::new(vec![Err(ClientError::ServiceUnavailable("down".into()))]);

        let err = api.wait(&user(), JobId(7)).await.unwrap_err();
        assert!(matches!(err, ClientError::ServiceUnavailable(_)));
        assert_eq!(api.polls(), 1);
    }

    #[tokio::test]
    async fn test_submit_and_authenticate() {
        let api = ScriptedApi::new(vec![]);
        let user = api.authenticate("test-user", "secret").await.unwrap();
        let request = JobRequest::new(user.user_id(), 3, "bell pair");

        let response = api
            .submit(&user, &request, &"OPENQASM 3;".to_string())
            .await
            .unwrap();
        assert_eq!(response.request, request);
        assert_eq!(response.status, "pending");

        let err = api.job(&user, JobId(9)).await.unwrap_err();
        assert!(matches!(err, ClientError::JobNotFound(JobId(9))));
    }
}
