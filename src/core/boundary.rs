//! Request failure boundary
//!
//! Runs a fallible request future under a time budget and catches panics, so
//! the caller can always substitute a degraded result.

use crate::domain::{DebtwatchError, Result};
use futures::FutureExt;
use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::time::Duration;
use thiserror::Error;

/// Why a guarded future produced no value
#[derive(Debug, Error)]
pub enum BoundaryFailure {
    #[error("{0}")]
    Failed(DebtwatchError),

    #[error("panicked: {0}")]
    Panicked(String),

    #[error("request budget of {0:?} exceeded")]
    TimedOut(Duration),
}

/// Await `future` for at most `budget`, catching errors and panics
pub async fn guarded<F, T>(budget: Duration, future: F) -> std::result::Result<T, BoundaryFailure>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(budget, AssertUnwindSafe(future).catch_unwind()).await {
        Ok(Ok(Ok(value))) => Ok(value),
        Ok(Ok(Err(e))) => Err(BoundaryFailure::Failed(e)),
        Ok(Err(payload)) => Err(BoundaryFailure::Panicked(panic_message(payload.as_ref()))),
        Err(_) => Err(BoundaryFailure::TimedOut(budget)),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
