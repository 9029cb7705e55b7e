use super::task::{Completion, Outcome};
use super::worker::{Worker, WorkerId};
use crate::config::Config;
use crate::error::{Error, Result};
use crossbeam_channel::{bounded, Receiver, Sender};
use std::thread::{self, Scope, ScopedJoinHandle};

/// A fixed set of worker threads living inside a thread scope.
///
/// Both channels are rendezvous channels: a dispatch only completes when a
/// worker is blocked waiting for input, so at most `num_workers` tasks are
/// ever running. The pool keeps no result sender of its own, so the result
/// channel disconnects exactly when the last worker has exited.
pub(crate) struct WorkerPool<'scope, I, O, E> {
    dispatch: Sender<I>,
    results: Receiver<Completion<I, O, E>>,
    workers: Vec<WorkerHandle<'scope>>,
}

struct WorkerHandle<'scope> {
    id: WorkerId,
    thread: ScopedJoinHandle<'scope, ()>,
}

/// What shutdown found still in flight.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DrainReport {
    pub drained: usize,
    pub faults_discarded: usize,
}

impl<'scope, I, O, E> WorkerPool<'scope, I, O, E>
where
    I: Send + 'scope,
    O: Send + 'scope,
    E: Send + 'scope,
{
    pub fn spawn<'env, T>(
        scope: &'scope Scope<'scope, 'env>,
        config: &Config,
        task: &'scope T,
    ) -> Result<Self>
    where
        T: Fn(&I) -> std::result::Result<O, E> + Sync,
    {
        let num_workers = config.worker_threads();
        if num_workers == 0 {
            return Err(Error::config("need at least 1 worker"));
        }

        let (dispatch, inputs) = bounded(0);
        let (results_tx, results) = bounded(0);

        tracing::debug!(workers = num_workers, "spawning worker pool");

        let mut workers = Vec::with_capacity(num_workers);
        for id in 0..num_workers {
            let worker = Worker::new(id, inputs.clone(), results_tx.clone());
            let name = format!("{}-{}", config.thread_name_prefix, id);

            let mut builder = thread::Builder::new().name(name);
            if let Some(stack_size) = config.stack_size {
                builder = builder.stack_size(stack_size);
            }

            // on failure the partially built pool drops here, which closes
            // dispatch and lets the workers spawned so far exit
            let thread = builder
                .spawn_scoped(scope, move || worker.run(task))
                .map_err(Error::Spawn)?;

            workers.push(WorkerHandle { id, thread });
        }

        Ok(Self {
            dispatch,
            results,
            workers,
        })
    }
}

impl<'scope, I, O, E> WorkerPool<'scope, I, O, E> {
    pub fn num_workers(&self) -> usize {
        self.workers.len()
    }

    pub fn dispatch(&self) -> &Sender<I> {
        &self.dispatch
    }

    pub fn results(&self) -> &Receiver<Completion<I, O, E>> {
        &self.results
    }

    /// Close dispatch, discard every remaining result, and join all workers.
    pub fn shutdown(self) -> DrainReport {
        let WorkerPool {
            dispatch,
            results,
            workers,
        } = self;

        drop(dispatch);

        let mut report = DrainReport::default();
        for completion in results.iter() {
            report.drained += 1;
            if let Outcome::Fault(fault) = completion.outcome {
                report.faults_discarded += 1;
                tracing::warn!(
                    worker = fault.worker(),
                    panic = fault.message(),
                    "discarding fault received during shutdown"
                );
            }
        }

        for handle in workers {
            if handle.thread.join().is_err() {
                tracing::warn!(worker = handle.id, "worker thread terminated abnormally");
            }
        }

        tracing::debug!(
            drained = report.drained,
            faults_discarded = report.faults_discarded,
            "worker pool shut down"
        );

        report
    }
}
