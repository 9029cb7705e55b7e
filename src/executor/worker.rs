// worker thread loop
use super::panic_handler::PanicHandler;
use super::task::{Completion, Outcome};
use crossbeam_channel::{Receiver, Sender};

pub type WorkerId = usize;

pub(crate) struct Worker<I, O, E> {
    pub id: WorkerId,
    inputs: Receiver<I>,
    results: Sender<Completion<I, O, E>>,
    panics: PanicHandler,
}

impl<I, O, E> Worker<I, O, E> {
    pub fn new(id: WorkerId, inputs: Receiver<I>, results: Sender<Completion<I, O, E>>) -> Self {
        Self {
            id,
            inputs,
            results,
            panics: PanicHandler::new(id),
        }
    }

    // main loop: runs until the dispatch side closes or nobody is
    // listening for results any more
    pub fn run<T>(self, task: &T)
    where
        T: Fn(&I) -> Result<O, E>,
    {
        tracing::debug!(worker = self.id, "worker starting");
        let mut executed = 0u64;

        while let Ok(input) = self.inputs.recv() {
            let outcome = match self.panics.execute(|| task(&input)) {
                Ok(result) => Outcome::from_result(result),
                Err(fault) => Outcome::Fault(fault),
            };
            executed += 1;

            let completion = Completion {
                input,
                outcome,
                worker: self.id,
            };
            if self.results.send(completion).is_err() {
                break;
            }
        }

        tracing::debug!(
            worker = self.id,
            executed,
            panicked = self.panics.panic_count(),
            "worker exiting"
        );
    }
}
