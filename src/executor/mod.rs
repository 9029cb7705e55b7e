//! Task execution infrastructure.
//!
//! This module provides the worker threads, the pool that owns them, and
//! the records that carry each task's outcome back to the control loop.

pub mod panic_handler;
pub(crate) mod pool;
pub mod task;
pub mod worker;

pub use panic_handler::{Fault, PanicHandler};
pub use task::{Completion, Outcome};
pub use worker::WorkerId;
