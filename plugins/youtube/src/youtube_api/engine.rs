//! The shared execution engine: one worker thread driving every request the client makes.
//!
//! Callers never block on submission. Each call gets a [`PendingResult`] back immediately and
//! the worker fulfils it at most once. Dropping the [`Engine`] stops the worker and drops every
//! in-flight request, so no handler runs after teardown begins.

use crate::youtube_api::error::Error;
use eyre::Context;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::task::{Context as TaskContext, Poll};
use tokio::sync::{mpsc, oneshot};

type Job = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// What a progress check tells the engine to do with the transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    Continue,
    Abort,
}

impl Progress {
    /// Reads a client's cancellation flag.
    pub fn report(cancelled: &AtomicBool) -> Self {
        if cancelled.load(Ordering::SeqCst) {
            Self::Abort
        } else {
            Self::Continue
        }
    }
}

/// The single-use result handle of one in-flight call.
///
/// Await it from async code, or call [`PendingResult::wait`] from a plain thread. If the client
/// is dropped before the call completes, it resolves to [`Error::Abandoned`].
#[derive(Debug)]
#[must_use = "a pending result does nothing unless observed"]
pub struct PendingResult<T> {
    rx: oneshot::Receiver<Result<T, Error>>,
}

impl<T> PendingResult<T> {
    pub(crate) fn channel() -> (oneshot::Sender<Result<T, Error>>, Self) {
        let (tx, rx) = oneshot::channel();
        (tx, Self { rx })
    }

    /// A result that is already settled, for failures detected before submission.
    pub(crate) fn ready(result: Result<T, Error>) -> Self {
        let (tx, pending) = Self::channel();
        // the receiver is alive in `pending`, so this cannot fail
        let _ = tx.send(result);
        pending
    }

    /// Blocks the current thread until the call completes.
    ///
    /// # Panics
    ///
    /// Panics if called from within an asynchronous execution context; await the result there
    /// instead.
    pub fn wait(self) -> Result<T, Error> {
        self.rx.blocking_recv().unwrap_or(Err(Error::Abandoned))
    }
}

impl<T> Future for PendingResult<T> {
    type Output = Result<T, Error>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut TaskContext<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|received| received.unwrap_or(Err(Error::Abandoned)))
    }
}

/// Owns the worker thread and the runtime it drives.
#[derive(Debug)]
pub struct Engine {
    jobs: Option<mpsc::UnboundedSender<Job>>,
    worker: Option<std::thread::JoinHandle<()>>,
}

impl Engine {
    pub fn start() -> eyre::Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("build YouTube client runtime")?;
        let (jobs, mut incoming) = mpsc::unbounded_channel::<Job>();

        let worker = std::thread::Builder::new()
            .name("youtube-api".to_string())
            .spawn(move || {
                runtime.block_on(async move {
                    while let Some(job) = incoming.recv().await {
                        tokio::spawn(job);
                    }
                });
                tracing::debug!("YouTube client engine stopped");
                // in-flight jobs are dropped along with the runtime here
                drop(runtime);
            })
            .context("spawn YouTube client worker thread")?;

        Ok(Self {
            jobs: Some(jobs),
            worker: Some(worker),
        })
    }

    /// Hands a job to the worker thread and returns immediately.
    pub fn submit(&self, job: impl Future<Output = ()> + Send + 'static) {
        let Some(jobs) = &self.jobs else {
            return;
        };
        if jobs.send(Box::pin(job)).is_err() {
            // the worker is gone; the job's result sender is dropped with it
            tracing::warn!("YouTube client worker is not running, dropping request");
        }
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        drop(self.jobs.take());
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                tracing::error!("YouTube client worker thread panicked");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    #[test]
    fn progress_follows_the_flag() {
        let cancelled = AtomicBool::new(false);
        assert_eq!(Progress::report(&cancelled), Progress::Continue);
        cancelled.store(true, Ordering::SeqCst);
        assert_eq!(Progress::report(&cancelled), Progress::Abort);
        cancelled.store(false, Ordering::SeqCst);
        assert_eq!(Progress::report(&cancelled), Progress::Continue);
    }

    #[test]
    fn jobs_run_on_the_worker_thread() {
        let engine = Engine::start().unwrap();
        let (tx, pending) = PendingResult::channel();
        engine.submit(async move {
            let name = std::thread::current().name().map(str::to_string);
            let _ = tx.send(Ok(name));
        });
        assert_eq!(pending.wait().unwrap().as_deref(), Some("youtube-api"));
    }

    #[test]
    fn many_jobs_are_multiplexed() {
        let engine = Engine::start().unwrap();
        let pending: Vec<_> = (0..32u32)
            .map(|i| {
                let (tx, pending) = PendingResult::channel();
                engine.submit(async move {
                    tokio::time::sleep(Duration::from_millis(10)).await;
                    let _ = tx.send(Ok(i));
                });
                pending
            })
            .collect();
        let results: Vec<u32> = pending.into_iter().map(|p| p.wait().unwrap()).collect();
        assert_eq!(results, (0..32).collect::<Vec<u32>>());
    }

    #[test]
    fn dropping_the_engine_abandons_pending_jobs() {
        let ran = Arc::new(AtomicUsize::new(0));
        let engine = Engine::start().unwrap();
        let (tx, pending) = PendingResult::<()>::channel();
        let counter = Arc::clone(&ran);
        engine.submit(async move {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            counter.fetch_add(1, Ordering::SeqCst);
            let _ = tx.send(Ok(()));
        });
        drop(engine);

        assert!(matches!(pending.wait(), Err(Error::Abandoned)));
        assert_eq!(ran.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn ready_results_resolve_immediately() {
        let pending = PendingResult::ready(Ok(7));
        assert_eq!(pending.wait().unwrap(), 7);
    }
}
