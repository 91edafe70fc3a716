// Copyright (c) 2025 - Cowboy AI, Inc.
//! Per-call cancellation and deadline
//!
//! Every instance query takes a [`CallContext`]. The resolver races each
//! inventory call against the context's shutdown signal and deadline, so a
//! cancelled or slow call fails immediately instead of hanging. Nothing is
//! retried.

use std::future::Future;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::Instant;

/// Why an in-flight call was abandoned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interrupted {
    Cancelled,
    DeadlineExceeded(Duration),
}

#[derive(Debug, Clone, Copy)]
struct Deadline {
    at: Instant,
    timeout: Duration,
}

/// Cancellation signal and optional deadline for one instance query
///
/// The cancellation signal is a `watch::Receiver<bool>`; sending `true`
/// cancels every call holding a clone of the receiver.
#[derive(Debug, Clone, Default)]
pub struct CallContext {
    cancel: Option<watch::Receiver<bool>>,
    deadline: Option<Deadline>,
}

impl CallContext {
    /// Context that never cancels and has no deadline
    pub fn background() -> Self {
        Self::default()
    }

    pub fn with_cancellation(mut self, cancel: watch::Receiver<bool>) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Deadline `timeout` from now
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.deadline = Some(Deadline {
            at: Instant::now() + timeout,
            timeout,
        });
        self
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(|rx| *rx.borrow())
    }

    /// Drive `fut` to completion unless the context is cancelled or its
    /// deadline passes first
    pub async fn run<F: Future>(&self, fut: F) -> Result<F::Output, Interrupted> {
        if self.is_cancelled() {
            return Err(Interrupted::Cancelled);
        }

        let mut cancel = self.cancel.clone();
        let cancelled = async move {
            let Some(rx) = cancel.as_mut() else {
                return std::future::pending::<()>().await;
            };
            loop {
                if *rx.borrow_and_update() {
                    return;
                }
                // Sender dropped: nobody can cancel any more
                if rx.changed().await.is_err() {
                    return std::future::pending::<()>().await;
                }
            }
        };

        let deadline = self.deadline;
        let expired = async move {
            match deadline {
                Some(deadline) => tokio::time::sleep_until(deadline.at).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            _ = cancelled => Err(Interrupted::Cancelled),
            _ = expired => Err(Interrupted::DeadlineExceeded(
                deadline.map(|d| d.timeout).unwrap_or_default(),
            )),
            output = fut => Ok(output),
        }
    }
}
