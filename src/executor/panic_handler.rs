use super::worker::WorkerId;
use std::any::Any;
use std::cell::Cell;
use std::fmt;
use std::panic::{catch_unwind, resume_unwind, AssertUnwindSafe};

/// Catches panics raised on a worker thread. Owned by a single worker.
#[derive(Debug)]
pub struct PanicHandler {
    worker: WorkerId,
    panic_count: Cell<usize>,
}

impl PanicHandler {
    pub fn new(worker: WorkerId) -> Self {
        Self {
            worker,
            panic_count: Cell::new(0),
        }
    }

    pub fn execute<F, R>(&self, f: F) -> Result<R, Fault>
    where
        F: FnOnce() -> R,
    {
        match catch_unwind(AssertUnwindSafe(f)) {
            Ok(result) => Ok(result),
            Err(payload) => {
                self.panic_count.set(self.panic_count.get() + 1);

                let fault = Fault::from_payload(payload, self.worker);
                tracing::warn!(
                    worker = self.worker,
                    panic = %fault.message,
                    "task panicked"
                );

                Err(fault)
            }
        }
    }

    pub fn panic_count(&self) -> usize {
        self.panic_count.get()
    }
}

/// A panic captured inside a task, carried back to the control thread.
///
/// The original payload is kept intact so it can be re-raised with
/// [`Fault::resume`] and downcast by whoever catches it.
pub struct Fault {
    payload: Box<dyn Any + Send + 'static>,
    message: String,
    worker: WorkerId,
}

impl Fault {
    fn from_payload(payload: Box<dyn Any + Send + 'static>, worker: WorkerId) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic".to_string()
        };

        Self {
            payload,
            message,
            worker,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn worker(&self) -> WorkerId {
        self.worker
    }

    pub fn payload(&self) -> &(dyn Any + Send + 'static) {
        &*self.payload
    }

    pub fn into_payload(self) -> Box<dyn Any + Send + 'static> {
        self.payload
    }

    /// Re-raise the original panic on the current thread.
    pub fn resume(self) -> ! {
        resume_unwind(self.payload)
    }
}

impl fmt::Debug for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fault")
            .field("message", &self.message)
            .field("worker", &self.worker)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (worker {})", self.message, self.worker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panic_handler_captures() {
        let handler = PanicHandler::new(3);

        let fault = handler
            .execute(|| -> i32 { panic!("test panic") })
            .unwrap_err();

        assert_eq!(fault.message(), "test panic");
        assert_eq!(fault.worker(), 3);
        assert_eq!(handler.panic_count(), 1);
    }

    #[test]
    fn test_panic_handler_success() {
        let handler = PanicHandler::new(0);

        let result = handler.execute(|| 42);

        assert_eq!(result.unwrap(), 42);
        assert_eq!(handler.panic_count(), 0);
    }

    #[test]
    fn test_formatted_message() {
        let handler = PanicHandler::new(0);
        let n = 7;

        let fault = handler.execute(|| panic!("bad value {}", n)).unwrap_err();
        assert_eq!(fault.message(), "bad value 7");
        assert!(fault.payload().downcast_ref::<String>().is_some());
    }

    #[test]
    fn test_custom_payload_survives_resume() {
        #[derive(Debug, PartialEq)]
        struct Invariant(u32);

        let handler = PanicHandler::new(1);
        let fault = handler
            .execute(|| std::panic::panic_any(Invariant(9)))
            .unwrap_err();
        assert_eq!(fault.message(), "unknown panic");

        let payload = catch_unwind(AssertUnwindSafe(|| fault.resume())).unwrap_err();
        assert_eq!(payload.downcast_ref::<Invariant>(), Some(&Invariant(9)));
    }

    #[test]
    fn test_panic_counter() {
        let handler = PanicHandler::new(0);

        for _ in 0..5 {
            let _ = handler.execute(|| {
                panic!("test");
            });
        }

        assert_eq!(handler.panic_count(), 5);
    }
}
