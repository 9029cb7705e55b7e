//! The serial control loop and the controller's verdict type.
//!
//! A controller is any `FnMut(I, Result<O, E>) -> Verdict<I>`. It runs on
//! the thread that started the run, one call at a time, so it can mutate
//! whatever it closes over without synchronization.

mod dispatcher;
mod verdict;

pub(crate) use dispatcher::{Dispatcher, Exit};
pub use verdict::Verdict;
