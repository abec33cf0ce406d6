// src/engine/pool.rs

//! Fixed-size worker pool.
//!
//! The pool is scoped: [`WorkerPool::scope`] spawns one Tokio task per job,
//! gates them with a semaphore holding `size` permits, and joins every task
//! before returning. If the scope future is dropped or returns early, the
//! owned `JoinSet` aborts whatever is still running.

use std::future::Future;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::debug;

use crate::errors::Result;

/// Worker count for a host with `parallelism` hardware threads.
///
/// One thread is left for the launcher itself, but there is always at least
/// one worker.
pub fn pool_size(parallelism: usize) -> usize {
    parallelism.saturating_sub(1).max(1)
}

/// Available hardware parallelism, or `1` if it cannot be determined.
pub fn detect_parallelism() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

/// Shared flag telling the pool to stop handing out jobs.
///
/// Jobs that already hold a worker run to completion.
#[derive(Debug, Clone, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone)]
pub struct WorkerPool {
    size: usize,
    stop: StopSignal,
}

impl WorkerPool {
    /// Pool with `size` workers (clamped to at least one).
    pub fn new(size: usize) -> Self {
        Self {
            size: size.max(1),
            stop: StopSignal::default(),
        }
    }

    /// Pool sized from the host: `max(1, parallelism - 1)`.
    pub fn for_host() -> Self {
        Self::new(pool_size(detect_parallelism()))
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Handle that jobs can use to stop further dispatch.
    pub fn stop_signal(&self) -> StopSignal {
        self.stop.clone()
    }

    /// Run `f` for every job with at most `size` jobs in flight.
    ///
    /// Jobs are handed out in input order. Returns one slot per job, in input
    /// order; a slot is `None` when the job was never started because the
    /// stop signal was raised before a worker became free.
    ///
    /// A panicking job is a pool failure: the remaining jobs are aborted and
    /// the error is returned.
    pub async fn scope<J, T, F, Fut>(&self, jobs: Vec<J>, f: F) -> Result<Vec<Option<T>>>
    where
        J: Send + 'static,
        T: Send + 'static,
        F: Fn(J) -> Fut,
        Fut: Future<Output = T> + Send + 'static,
    {
        let semaphore = Arc::new(Semaphore::new(self.size));
        let mut set = JoinSet::new();
        let mut results: Vec<Option<T>> = jobs.iter().map(|_| None).collect();

        for (index, job) in jobs.into_iter().enumerate() {
            // Waiting here keeps dispatch in input order.
            let Ok(permit) = Arc::clone(&semaphore).acquire_owned().await else {
                break;
            };

            if self.stop.is_stopped() {
                debug!(job = index, "stop signal raised; not dispatching remaining jobs");
                break;
            }

            let fut = f(job);
            set.spawn(async move {
                let out = fut.await;
                drop(permit);
                (index, out)
            });
        }

        while let Some(joined) = set.join_next().await {
            let (index, out) = joined?;
            results[index] = Some(out);
        }

        Ok(results)
    }
}
