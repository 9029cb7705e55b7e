//! Counters collected by the control loop over one run.

use serde::Serialize;
use std::time::Duration;

/// Summary of a finished run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    /// Size of the worker pool.
    pub workers: usize,
    /// Inputs handed to a worker.
    pub dispatched: usize,
    /// Results passed to the controller.
    pub completed: usize,
    /// Inputs the controller added to the queue.
    pub discovered: usize,
    /// Highest number of tasks in flight at once.
    pub max_inflight: usize,
    /// Inputs still queued when the loop exited.
    pub abandoned: usize,
    /// The controller stopped the run.
    pub halted: bool,
    /// A task panicked and the run was aborted.
    pub faulted: bool,
    /// Results received and discarded during shutdown.
    pub drained: usize,
    /// Panics among the drained results, dropped after the first fault.
    pub faults_discarded: usize,
    pub elapsed: Duration,
}

impl RunStats {
    /// True when the run ended because there was no work left.
    pub fn exhausted(&self) -> bool {
        !self.halted && !self.faulted
    }

    pub(crate) fn on_dispatch(&mut self, inflight: usize) {
        self.dispatched += 1;
        self.max_inflight = self.max_inflight.max(inflight);
    }
}
