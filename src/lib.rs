//! veda-flow - bounded-concurrency task engine
//!
//! A fixed pool of worker threads runs a task function concurrently, while
//! a single controller on the calling thread inspects every result, decides
//! which new inputs to enqueue, and decides when to stop. This suits work
//! whose full extent is only discovered as it runs (walking an implicit
//! tree or graph, crawling, incremental discovery) but which must stay
//! within a fixed degree of parallelism.
//!
//! # Quick Start
//!
//! ```
//! use veda_flow::prelude::*;
//!
//! // count down from 3; every result seeds the next input
//! let mut seen = Vec::new();
//! run_depth_first(
//!     0, // one worker per CPU
//!     |n: &u32| Ok::<_, ()>(*n - 1),
//!     |n, next| {
//!         seen.push(n);
//!         match next {
//!             Ok(m) if m > 0 => Verdict::expand([m]),
//!             _ => Verdict::done(),
//!         }
//!     },
//!     [3],
//! )
//! .unwrap();
//!
//! assert_eq!(seen, vec![3, 2, 1]);
//! ```
//!
//! # Model
//!
//! - **Bounded parallelism**: inputs are handed to workers over a
//!   rendezvous channel, so at most N tasks ever run at once.
//! - **Serial control**: the controller never runs concurrently with
//!   itself and may freely mutate captured state.
//! - **Ordering**: [`run_breadth_first`] takes the oldest queued input,
//!   [`run_depth_first`] the newest. Results still arrive in completion
//!   order.
//! - **Ordinary errors** go to the controller untouched; retrying,
//!   skipping or halting is its call.
//! - **Panics** inside a task abort the run. The pool is drained and
//!   joined, then the first panic is resumed on the calling thread (or
//!   returned, with [`Engine::try_run`]).

// Lint configuration
#![warn(missing_debug_implementations)]

pub mod config;
pub mod error;
pub mod executor;
pub mod prelude;
pub mod queue;
pub mod runtime;
pub mod scheduler;
pub mod telemetry;

// Re-export key types at crate root
pub use config::{Config, ConfigBuilder};
pub use error::{Error, Result};
pub use executor::{Fault, Outcome};
pub use queue::{QueueOrder, WorkQueue};
pub use runtime::{run_breadth_first, run_depth_first, Engine};
pub use scheduler::Verdict;
pub use telemetry::RunStats;
