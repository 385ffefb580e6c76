use std::time::Duration;

use tokio::time::{Instant, sleep_until};

/// The single pending commit of the dashboard inputs. Scheduling again
/// replaces the previous deadline; dropping the timer cancels it.
#[derive(Debug)]
pub struct CommitTimer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl CommitTimer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    pub fn schedule(&mut self) {
        self.deadline = Some(Instant::now() + self.delay);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Resolves once the current deadline passes and disarms the timer.
    /// Pends forever while disarmed. Safe to drop mid-wait: the deadline
    /// stays until it fires or is cancelled.
    pub async fn fired(&mut self) {
        match self.deadline {
            Some(deadline) => {
                sleep_until(deadline).await;
                self.deadline = None;
            }
            None => std::future::pending::<()>().await,
        }
    }
}
