//! Polling configuration for [`Api::wait`](crate::Api::wait).

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ClientError, ClientResult};

/// How often, and how many times, to ask the service about a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitConfig {
    /// Delay between two status queries, in milliseconds.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Status queries before giving up with a timeout.
    #[serde(default = "default_max_polls")]
    pub max_polls: u32,
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            max_polls: default_max_polls(),
        }
    }
}

impl WaitConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn with_poll_interval_ms(mut self, poll_interval_ms: u64) -> Self {
        self.poll_interval_ms = poll_interval_ms;
        self
    }

    pub fn with_max_polls(mut self, max_polls: u32) -> Self {
        self.max_polls = max_polls;
        self
    }

    /// Reject settings that would never poll or would poll without pause.
    pub fn validate(&self) -> ClientResult<()> {
        if self.max_polls == 0 {
            return Err(ClientError::Configuration("max_polls must be positive".into()));
        }
        if self.poll_interval_ms == 0 {
            return Err(ClientError::Configuration("poll_interval_ms must be positive".into()));
        }
        Ok(())
    }
}

fn default_poll_interval_ms() -> u64 {
    500
}

// 5 minutes at the default interval
fn default_max_polls() -> u32 {
    600
}
