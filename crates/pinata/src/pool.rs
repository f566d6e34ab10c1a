//! Bounded worker pool for batch operations
//!
//! A batch of N jobs is drained by `min(N, MAX_WORKERS)` tokio tasks pulling
//! from one shared, pre-loaded queue. Each job produces exactly one outcome
//! on the result channel; arrival order is unspecified.

use crate::error::{PinataError, PinataResult};
use std::collections::VecDeque;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tracing::trace;

/// Ceiling on concurrently running jobs
pub const MAX_WORKERS: usize = 5;

/// Number of workers started for a batch of `items` jobs
#[must_use]
pub fn worker_count(items: usize) -> usize {
    items.min(MAX_WORKERS)
}

/// Receiving side of a running batch
pub(crate) struct WorkerPool<T> {
    outcomes: mpsc::Receiver<T>,
    pending: usize,
}

impl<T: Send + 'static> WorkerPool<T> {
    /// Start workers for `jobs`, running `handler` once per job.
    ///
    /// Workers keep draining the queue even if the pool is dropped, so every
    /// dispatched job runs to completion.
    pub(crate) fn spawn<J, F, Fut>(jobs: Vec<J>, handler: F) -> Self
    where
        J: Send + 'static,
        F: Fn(J) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = T> + Send + 'static,
    {
        let total = jobs.len();
        let queue = Arc::new(Mutex::new(VecDeque::from(jobs)));
        let handler = Arc::new(handler);
        let (tx, rx) = mpsc::channel(total.max(1));

        for worker in 0..worker_count(total) {
            let queue = Arc::clone(&queue);
            let handler = Arc::clone(&handler);
            let tx = tx.clone();

            tokio::spawn(async move {
                loop {
                    let Some(job) = queue.lock().await.pop_front() else {
                        break;
                    };
                    let outcome = handler(job).await;
                    // Receiver may be gone after a fail-fast return
                    let _ = tx.send(outcome).await;
                }
                trace!(worker, "Worker finished");
            });
        }

        Self {
            outcomes: rx,
            pending: total,
        }
    }

    /// Wait for the next outcome; `Ok(None)` once every job has reported.
    ///
    /// # Errors
    ///
    /// [`PinataError::WorkerPool`] if the workers stopped before reporting
    /// every job (a handler panicked).
    pub(crate) async fn next(&mut self) -> PinataResult<Option<T>> {
        if self.pending == 0 {
            return Ok(None);
        }

        match self.outcomes.recv().await {
            Some(outcome) => {
                self.pending -= 1;
                Ok(Some(outcome))
            }
            None => Err(PinataError::WorkerPool(format!(
                "workers stopped with {} job(s) unreported",
                self.pending
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Run `items` jobs and return the highest number seen in flight at once
    async fn max_in_flight(items: usize) -> (usize, usize) {
        let in_flight = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let mut pool = {
            let in_flight = Arc::clone(&in_flight);
            let peak = Arc::clone(&peak);
            WorkerPool::spawn((0..items).collect(), move |job: usize| {
                let in_flight = Arc::clone(&in_flight);
                let peak = Arc::clone(&peak);
                async move {
                    let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                    peak.fetch_max(now, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(10)).await;
                    in_flight.fetch_sub(1, Ordering::SeqCst);
                    job
                }
            })
        };

        let mut collected = 0;
        while pool.next().await.unwrap().is_some() {
            collected += 1;
        }

        (peak.load(Ordering::SeqCst), collected)
    }

    #[test]
    fn test_worker_count() {
        assert_eq!(worker_count(0), 0);
        assert_eq!(worker_count(3), 3);
        assert_eq!(worker_count(5), 5);
        assert_eq!(worker_count(100), 5);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_large_batch_uses_five_workers() {
        let (peak, collected) = max_in_flight(100).await;
        assert_eq!(peak, 5);
        assert_eq!(collected, 100);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_small_batch_uses_at_most_item_count() {
        let (peak, collected) = max_in_flight(3).await;
        assert!(peak <= 3);
        assert!(peak >= 1);
        assert_eq!(collected, 3);
    }

    #[tokio::test]
    async fn test_empty_batch_reports_nothing() {
        let mut pool = WorkerPool::spawn(Vec::<u8>::new(), |job| async move { job });
        assert!(pool.next().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_every_job_reports_once() {
        let mut pool = WorkerPool::spawn(vec!["a", "b", "c"], |job| async move {
            job.to_uppercase()
        });

        let mut seen = Vec::new();
        while let Some(outcome) = pool.next().await.unwrap() {
            seen.push(outcome);
        }
        seen.sort();

        assert_eq!(seen, vec!["A", "B", "C"]);
    }

    #[tokio::test]
    async fn test_jobs_finish_after_pool_is_dropped() {
        let done = Arc::new(AtomicUsize::new(0));
        let pool = {
            let done = Arc::clone(&done);
            WorkerPool::spawn((0..10).collect::<Vec<u32>>(), move |_| {
                let done = Arc::clone(&done);
                async move {
                    tokio::time::sleep(Duration::from_millis(1)).await;
                    done.fetch_add(1, Ordering::SeqCst);
                }
            })
        };
        drop(pool);

        for _ in 0..200 {
            if done.load(Ordering::SeqCst) == 10 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        assert_eq!(done.load(Ordering::SeqCst), 10);
    }
}
