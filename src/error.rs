use crate::executor::Fault;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("failed to spawn worker thread: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("task panicked: {0}")]
    TaskPanicked(Fault),

    #[error("all workers exited while work was outstanding")]
    Disconnected,
}

impl Error {
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    /// The captured fault, if this error carries one.
    pub fn into_fault(self) -> Option<Fault> {
        match self {
            Error::TaskPanicked(fault) => Some(fault),
            _ => None,
        }
    }
}
