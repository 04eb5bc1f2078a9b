//! Fixed-size worker pool with task submission and result handles.
//!
//! `WorkerPool` owns a set of named threads that pull boxed jobs from a
//! shared crossbeam channel. `submit` returns a `TaskHandle` whose `wait`
//! blocks for that task's result. Panics inside a task are caught on the
//! worker and delivered through the handle, so a worker thread never dies
//! early. The pool is shut down (queue closed, every worker joined) by
//! `shutdown` or on drop, whichever comes first.

use std::mem;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender};
use parking_lot::Mutex;
use tracing::debug;

use crate::lifecycle::{Invocation, Phase};
use crate::workload::{catch_worker_panic, ComputeError};

type Job = Box<dyn FnOnce() + Send + 'static>;

/// A fixed set of worker threads fed from one task queue.
pub struct WorkerPool {
    sender: Mutex<Option<Sender<Job>>>,
    workers: Mutex<Vec<JoinHandle<()>>>,
    size: usize,
}

impl WorkerPool {
    /// Start `size` workers (at least one).
    ///
    /// If a worker cannot be spawned, the workers already started are shut
    /// down before the error is returned.
    pub fn new(size: usize) -> Result<Self, ComputeError> {
        let size = size.max(1);
        let (sender, receiver) = crossbeam_channel::unbounded::<Job>();
        let pool = Self {
            sender: Mutex::new(Some(sender)),
            workers: Mutex::new(Vec::with_capacity(size)),
            size,
        };
        for index in 0..size {
            let spawned = thread::Builder::new()
                .name(format!("chunkbench-pool-{index}"))
                .spawn({
                    let receiver = receiver.clone();
                    move || worker_loop(&receiver)
                });
            match spawned {
                Ok(handle) => pool.workers.lock().push(handle),
                Err(e) => {
                    pool.shutdown();
                    return Err(ComputeError::Spawn(e.to_string()));
                }
            }
        }
        debug!(workers = size, "worker pool started");
        Ok(pool)
    }

    /// Number of worker threads.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Queue `task` and return a handle to its result.
    pub fn submit<R, F>(&self, task: F) -> Result<TaskHandle<R>, ComputeError>
    where
        R: Send + 'static,
        F: FnOnce() -> R + Send + 'static,
    {
        let (result_tx, result_rx) = crossbeam_channel::bounded(1);
        let job: Job = Box::new(move || {
            // The handle may already be gone; the result is simply dropped.
            let _ = result_tx.send(catch_worker_panic(task));
        });

        let sender = self.sender.lock();
        sender
            .as_ref()
            .ok_or_else(|| ComputeError::Interrupted("worker pool is shut down".into()))?
            .send(job)
            .map_err(|_| ComputeError::Interrupted("worker pool queue closed".into()))?;
        Ok(TaskHandle {
            receiver: result_rx,
        })
    }

    /// Close the queue and join every worker. Queued tasks still run.
    /// Calling this more than once is harmless.
    pub fn shutdown(&self) {
        drop(self.sender.lock().take());
        let workers = mem::take(&mut *self.workers.lock());
        if workers.is_empty() {
            return;
        }
        let count = workers.len();
        for worker in workers {
            // Jobs catch their own panics, so a worker only exits by
            // draining the closed queue.
            let _ = worker.join();
        }
        debug!(workers = count, "worker pool shut down");
    }

    /// Whether `shutdown` has run.
    #[must_use]
    pub fn is_shut_down(&self) -> bool {
        self.sender.lock().is_none()
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn worker_loop(jobs: &Receiver<Job>) {
    for job in jobs {
        job();
    }
}

/// Pending result of a submitted task.
pub struct TaskHandle<R> {
    receiver: Receiver<Result<R, ComputeError>>,
}

impl<R> TaskHandle<R> {
    /// Block until the task finishes.
    pub fn wait(self) -> Result<R, ComputeError> {
        self.receiver.recv().map_err(|_| {
            ComputeError::Interrupted("task dropped before delivering its result".into())
        })?
    }
}

/// Run every task on a pool of `min(workers, tasks)` threads and collect the
/// results in submission order.
///
/// Every handle is awaited and the pool is shut down before the first
/// failure is returned.
pub fn run_tasks<R, F>(
    workers: usize,
    tasks: Vec<F>,
    invocation: &mut Invocation<'_>,
) -> Result<Vec<R>, ComputeError>
where
    R: Send + 'static,
    F: FnOnce() -> R + Send + 'static,
{
    let pool = WorkerPool::new(workers.min(tasks.len()))?;
    invocation.advance(Phase::Dispatched);

    let mut handles = Vec::with_capacity(tasks.len());
    let mut first_error = None;
    for task in tasks {
        match pool.submit(task) {
            Ok(handle) => handles.push(handle),
            Err(e) => {
                first_error = Some(e);
                break;
            }
        }
    }
    if first_error.is_none() {
        invocation.advance(Phase::Running);
    }

    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        match handle.wait() {
            Ok(value) => results.push(value),
            Err(e) => {
                first_error.get_or_insert(e);
            }
        }
    }
    pool.shutdown();

    match first_error {
        Some(err) => Err(err),
        None => {
            invocation.advance(Phase::Joined);
            Ok(results)
        }
    }
}
