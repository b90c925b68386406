use async_trait::async_trait;
use shared_types::AppointmentRequest;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error("Submission rejected: {0}")]
    Rejected(String),
}

/// Hands a validated request to whatever receives appointment requests.
///
/// Success carries no payload beyond the acknowledgement.
#[async_trait]
pub trait Submitter: Send + Sync {
    async fn submit(&self, request: &AppointmentRequest) -> Result<(), SubmitError>;
}

/// Stands in for the network call: waits a fixed delay, then settles
#[derive(Debug, Clone)]
pub struct SimulatedSubmitter {
    delay: Duration,
    rejection: Option<String>,
}

impl SimulatedSubmitter {
    /// Always resolves after `delay`
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            rejection: None,
        }
    }

    /// Always rejects with `reason` after `delay`
    pub fn failing(delay: Duration, reason: impl Into<String>) -> Self {
        Self {
            delay,
            rejection: Some(reason.into()),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[async_trait]
impl Submitter for SimulatedSubmitter {
    async fn submit(&self, request: &AppointmentRequest) -> Result<(), SubmitError> {
        tracing::debug!(
            "Simulating submission for {} ({}) with {:?} delay",
            request.email,
            request.service_type,
            self.delay
        );

        tokio::time::sleep(self.delay).await;

        match &self.rejection {
            Some(reason) => Err(SubmitError::Rejected(reason.clone())),
            None => Ok(()),
        }
    }
}
