use crate::error::{Error, Result};
use crate::queue::QueueOrder;

#[derive(Debug, Clone)]
pub struct Config {
    /// Worker count; `None` means one worker per available CPU.
    pub num_workers: Option<usize>,
    pub order: QueueOrder,
    pub thread_name_prefix: String,
    pub stack_size: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            num_workers: None,
            order: QueueOrder::default(),
            thread_name_prefix: "veda-flow-worker".to_string(),
            stack_size: Some(2 * 1024 * 1024),
        }
    }
}

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    pub fn validate(&self) -> Result<()> {
        if self.stack_size == Some(0) {
            return Err(Error::config("stack_size must be > 0"));
        }

        Ok(())
    }

    pub fn worker_threads(&self) -> usize {
        match self.num_workers {
            Some(n) if n > 0 => n,
            _ => num_cpus::get(),
        }
    }
}

#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Zero selects the platform's available parallelism.
    pub fn num_workers(mut self, n: usize) -> Self {
        self.config.num_workers = if n == 0 { None } else { Some(n) };
        self
    }

    pub fn order(mut self, order: QueueOrder) -> Self {
        self.config.order = order;
        self
    }

    pub fn breadth_first(self) -> Self {
        self.order(QueueOrder::Fifo)
    }

    pub fn depth_first(self) -> Self {
        self.order(QueueOrder::Lifo)
    }

    pub fn stack_size(mut self, size: usize) -> Self {
        self.config.stack_size = Some(size);
        self
    }

    pub fn thread_name_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.config.thread_name_prefix = prefix.into();
        self
    }

    pub fn build(self) -> Result<Config> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.order, QueueOrder::Fifo);
        assert_eq!(config.worker_threads(), num_cpus::get());
    }

    #[test]
    fn test_zero_workers_means_parallelism() {
        let config = Config::builder().num_workers(0).build().unwrap();
        assert_eq!(config.num_workers, None);
        assert_eq!(config.worker_threads(), num_cpus::get());

        // a hand-built Some(0) resolves the same way
        let config = Config {
            num_workers: Some(0),
            ..Default::default()
        };
        assert_eq!(config.worker_threads(), num_cpus::get());
    }

    #[test]
    fn test_builder_overrides() {
        let config = Config::builder()
            .num_workers(3)
            .depth_first()
            .thread_name_prefix("walker")
            .stack_size(64 * 1024)
            .build()
            .unwrap();

        assert_eq!(config.worker_threads(), 3);
        assert_eq!(config.order, QueueOrder::Lifo);
        assert_eq!(config.thread_name_prefix, "walker");
        assert_eq!(config.stack_size, Some(64 * 1024));
    }

    #[test]
    fn test_validation_rejects_zero_stack() {
        assert!(matches!(
            Config::builder().stack_size(0).build(),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_large_pools_are_accepted() {
        let config = Config::builder().num_workers(4096).build().unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.worker_threads(), 4096);
    }
}
