use super::verdict::Verdict;
use crate::error::{Error, Result};
use crate::executor::pool::WorkerPool;
use crate::executor::Fault;
use crate::queue::{QueueOrder, WorkQueue};
use crate::telemetry::RunStats;
use crossbeam_channel::Select;

/// Why the control loop stopped.
#[derive(Debug)]
pub(crate) enum Exit {
    /// Queue empty and nothing in flight.
    Exhausted,
    /// The controller returned [`Verdict::Halt`].
    Halted,
    /// A task panicked.
    Faulted(Fault),
}

/// Serial control loop. Owns the queue and the in-flight count; never
/// leaves the thread that created it.
pub(crate) struct Dispatcher<I> {
    queue: WorkQueue<I>,
    order: QueueOrder,
    inflight: usize,
    stats: RunStats,
}

impl<I> Dispatcher<I> {
    pub fn new<It>(order: QueueOrder, initial: It) -> Self
    where
        It: IntoIterator<Item = I>,
    {
        Self {
            queue: initial.into_iter().collect(),
            order,
            inflight: 0,
            stats: RunStats::default(),
        }
    }

    #[cfg(test)]
    pub fn inflight(&self) -> usize {
        self.inflight
    }

    #[cfg(test)]
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    /// Interleave dispatching queued inputs with consuming results until
    /// the work runs out, the controller halts, or a task panics.
    pub fn run<O, E, C>(
        &mut self,
        pool: &WorkerPool<'_, I, O, E>,
        controller: &mut C,
    ) -> Result<Exit>
    where
        C: FnMut(I, std::result::Result<O, E>) -> Verdict<I>,
    {
        self.stats.workers = pool.num_workers();

        while self.inflight > 0 || !self.queue.is_empty() {
            // the candidate goes back to its end of the queue unless the
            // send wins the race
            let candidate = self.queue.take(self.order);

            let mut sel = Select::new();
            let send_op = candidate.as_ref().map(|_| sel.send(pool.dispatch()));
            let recv_op = sel.recv(pool.results());
            let oper = sel.select();
            let index = oper.index();

            match candidate {
                Some(input) if Some(index) == send_op => {
                    oper.send(pool.dispatch(), input)
                        .map_err(|_| Error::Disconnected)?;
                    self.inflight += 1;
                    self.stats.on_dispatch(self.inflight);
                    tracing::trace!(
                        inflight = self.inflight,
                        queued = self.queue.len(),
                        "dispatched"
                    );
                }
                candidate => {
                    debug_assert_eq!(index, recv_op);
                    let received = oper.recv(pool.results());
                    if let Some(input) = candidate {
                        self.queue.restore(self.order, input);
                    }

                    let completion = received.map_err(|_| Error::Disconnected)?;
                    self.inflight -= 1;
                    tracing::trace!(
                        worker = completion.worker,
                        inflight = self.inflight,
                        "received"
                    );

                    let result = match completion.outcome.into_result() {
                        Ok(result) => result,
                        Err(fault) => {
                            self.stats.faulted = true;
                            return Ok(Exit::Faulted(fault));
                        }
                    };

                    self.stats.completed += 1;
                    match controller(completion.input, result) {
                        Verdict::Continue(inputs) => {
                            self.stats.discovered += inputs.len();
                            self.queue.extend(inputs);
                        }
                        Verdict::Halt => {
                            self.stats.halted = true;
                            return Ok(Exit::Halted);
                        }
                    }
                }
            }
        }

        Ok(Exit::Exhausted)
    }

    pub fn into_stats(self) -> RunStats {
        let mut stats = self.stats;
        stats.abandoned = self.queue.len();
        stats
    }
}
