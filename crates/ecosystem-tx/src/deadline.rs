use std::{future::Future, time::Duration};
use tokio::time::{timeout_at, Instant};

/// Single wall-clock bound shared by every step of one submit call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Deadline {
    at: Option<Instant>,
}

impl Deadline {
    pub fn none() -> Self {
        Self { at: None }
    }

    /// Starts counting now.
    pub fn after(limit: Option<Duration>) -> Self {
        Self {
            at: limit.map(|limit| Instant::now() + limit),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.at.is_some_and(|at| Instant::now() >= at)
    }

    pub fn remaining(&self) -> Option<Duration> {
        self.at
            .map(|at| at.saturating_duration_since(Instant::now()))
    }

    /// Drive `future` to completion unless the deadline passes first.
    pub async fn run<F: Future>(&self, future: F) -> Option<F::Output> {
        match self.at {
            None => Some(future.await),
            Some(at) => timeout_at(at, future).await.ok(),
        }
    }

    /// Sleep for `delay`, returning `false` if the deadline cut it short.
    pub async fn sleep(&self, delay: Duration) -> bool {
        self.run(tokio::time::sleep(delay)).await.is_some()
    }
}
