pub use crate::config::{Config, ConfigBuilder};
pub use crate::error::{Error, Result};
pub use crate::executor::Fault;
pub use crate::queue::QueueOrder;
pub use crate::runtime::{run_breadth_first, run_depth_first, Engine};
pub use crate::scheduler::Verdict;
pub use crate::telemetry::RunStats;
