//! Minimal in-memory execution service implementing the `Api` trait.
//!
//! Every status query moves a job one step along
//! `pending → running → completed`, so `wait()` has something to poll.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use qpu_client::{
    Api, ClientError, ClientResult, JobFullData, JobId, JobRequest, JobResponse, JobResult,
    JobStatus, User, WaitConfig,
};
use serde_json::{Map, json};
use tracing::info;

/// A simple circuit type for demonstration.
struct SimpleCircuit {
    num_qubits: u32,
    shots: u32,
}

struct MockJob {
    response: JobResponse,
    job_type: String,
    shots: u32,
    probabilities: Vec<f64>,
}

/// In-memory mock service.
struct MockApi {
    jobs: Mutex<HashMap<JobId, MockJob>>,
    next_id: Mutex<i64>,
}

impl MockApi {
    fn new() -> Self {
        Self {
            jobs: Mutex::new(HashMap::new()),
            next_id: Mutex::new(0),
        }
    }

    fn jobs(&self) -> ClientResult<MutexGuard<'_, HashMap<JobId, MockJob>>> {
        self.jobs
            .lock()
            .map_err(|_| ClientError::ServiceUnavailable("job table poisoned".into()))
    }

    fn owned_job<'a>(
        jobs: &'a mut HashMap<JobId, MockJob>,
        user: &User,
        job_id: JobId,
    ) -> ClientResult<&'a mut MockJob> {
        jobs.get_mut(&job_id)
            .filter(|job| job.response.request.user_id == user.user_id())
            .ok_or(ClientError::JobNotFound(job_id))
    }

    fn full_data(job: &MockJob) -> ClientResult<JobFullData> {
        let response = &job.response;
        JobFullData::new(
            response.queue_position,
            response.status.clone(),
            Some(response.request.user_id),
            response.request.device_id,
            response.job_id,
            job.job_type.clone(),
            job.shots,
            json!({ "probabilities": job.probabilities }),
        )
    }
}

#[async_trait]
impl Api<SimpleCircuit> for MockApi {
    async fn authenticate(&self, username: &str, password: &str) -> ClientResult<User> {
        if password.is_empty() {
            return Err(ClientError::AuthenticationFailed("empty password".into()));
        }
        Ok(User::new(1, username, format!("key-{username}")))
    }

    async fn submit(
        &self,
        user: &User,
        request: &JobRequest,
        circuit: &SimpleCircuit,
    ) -> ClientResult<JobResponse> {
        if request.user_id != user.user_id() {
            return Err(ClientError::SubmissionFailed(
                "request user does not match credentials".into(),
            ));
        }
        if circuit.shots == 0 {
            return Err(ClientError::InvalidShots(0));
        }

        let job_id = {
            let mut next = self
                .next_id
                .lock()
                .map_err(|_| ClientError::ServiceUnavailable("id counter poisoned".into()))?;
            *next += 1;
            JobId(*next)
        };

        let outcomes = 1usize << circuit.num_qubits.min(4);
        let mut jobs = self.jobs()?;
        let queue_position = u32::try_from(jobs.len()).unwrap_or(u32::MAX);
        let response = JobResponse::new(
            request.clone(),
            job_id,
            queue_position,
            JobStatus::Pending,
            "",
        );
        jobs.insert(
            job_id,
            MockJob {
                response: response.clone(),
                job_type: "sampling".into(),
                shots: circuit.shots,
                probabilities: vec![1.0 / outcomes as f64; outcomes],
            },
        );
        Ok(response)
    }

    async fn job(&self, user: &User, job_id: JobId) -> ClientResult<JobResponse> {
        let mut jobs = self.jobs()?;
        let job = Self::owned_job(&mut jobs, user, job_id)?;
        let response = job.response.clone();

        let next = match response.status.status() {
            Some(JobStatus::Pending) => JobStatus::Running,
            Some(JobStatus::Running) => JobStatus::Completed,
            Some(status) => status,
            None => JobStatus::Error,
        };
        job.response.status = next.into();
        job.response.queue_position = 0;

        Ok(response)
    }

    async fn job_full_data(&self, user: &User, job_id: JobId) -> ClientResult<JobFullData> {
        let mut jobs = self.jobs()?;
        Self::full_data(Self::owned_job(&mut jobs, user, job_id)?)
    }

    async fn list_jobs(&self, user: &User) -> ClientResult<Vec<JobFullData>> {
        let jobs = self.jobs()?;
        let mut listed = jobs
            .values()
            .filter(|job| job.response.request.user_id == user.user_id())
            .map(Self::full_data)
            .collect::<ClientResult<Vec<_>>>()?;
        listed.sort_by_key(|data| data.job_id);
        Ok(listed)
    }

    async fn result(&self, user: &User, job_id: JobId) -> ClientResult<JobResult> {
        let mut jobs = self.jobs()?;
        let job = Self::owned_job(&mut jobs, user, job_id)?;
        if !job.response.status.is_terminal() {
            return Err(ClientError::Http {
                status: 409,
                message: format!("job {job_id} is {}", job.response.status),
            });
        }

        let mut http_response = Map::new();
        http_response.insert("code".into(), json!("200"));
        http_response.insert("response".into(), json!("ok"));
        Ok(JobResult::new(job_id, http_response, job.probabilities.clone()))
    }

    fn wait_config(&self) -> WaitConfig {
        WaitConfig::default().with_poll_interval_ms(50).with_max_polls(20)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let api = MockApi::new();
    let user = api.authenticate("test-user", "secret").await?;
    info!(user = ?user, "authenticated");

    let circuit = SimpleCircuit {
        num_qubits: 2,
        shots: 1000,
    };
    let request = JobRequest::new(user.user_id(), 3, "bell pair");

    let submitted = api.submit(&user, &request, &circuit).await?;
    println!("Job ID:   {}", submitted.job_id);
    println!("Status:   {}", submitted.status);
    println!("Position: {:?}", submitted.live_queue_position());
    println!();

    let result = api.wait(&user, submitted.job_id).await?;
    println!("HTTP code: {:?}", result.status_code());
    println!("Results:");
    for (index, value) in result.data().iter().enumerate() {
        println!("  {index:02b}: {value:.3}");
    }
    println!();

    for snapshot in api.list_jobs(&user).await? {
        println!(
            "Job {} [{}] {} shots on device {}",
            snapshot.job_id, snapshot.status, snapshot.number_shots, snapshot.device_id
        );
    }

    Ok(())
}
