//! Per-task outcome records passed from workers to the control loop.

use super::panic_handler::Fault;
use super::worker::WorkerId;

/// How a single task invocation ended.
#[derive(Debug)]
pub enum Outcome<O, E> {
    /// The task returned `Ok`.
    Success(O),
    /// The task returned an ordinary error.
    Failure(E),
    /// The task panicked.
    Fault(Fault),
}

impl<O, E> Outcome<O, E> {
    pub(crate) fn from_result(result: Result<O, E>) -> Self {
        match result {
            Ok(out) => Outcome::Success(out),
            Err(err) => Outcome::Failure(err),
        }
    }

    pub fn is_fault(&self) -> bool {
        matches!(self, Outcome::Fault(_))
    }

    /// Split into the controller-facing result, or the captured fault.
    pub fn into_result(self) -> Result<Result<O, E>, Fault> {
        match self {
            Outcome::Success(out) => Ok(Ok(out)),
            Outcome::Failure(err) => Ok(Err(err)),
            Outcome::Fault(fault) => Err(fault),
        }
    }
}

/// The result of running one dispatched input.
#[derive(Debug)]
pub struct Completion<I, O, E> {
    pub input: I,
    pub outcome: Outcome<O, E>,
    pub worker: WorkerId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_from_result() {
        let ok: Outcome<i32, String> = Outcome::from_result(Ok(1));
        assert!(matches!(ok, Outcome::Success(1)));
        assert!(!ok.is_fault());

        let err: Outcome<i32, String> = Outcome::from_result(Err("nope".into()));
        match err.into_result() {
            Ok(Err(e)) => assert_eq!(e, "nope"),
            other => panic!("unexpected {:?}", other),
        }
    }
}
