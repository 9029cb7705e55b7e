use crate::config::Config;
use crate::error::{Error, Result};
use crate::executor::pool::WorkerPool;
use crate::queue::QueueOrder;
use crate::scheduler::{Dispatcher, Exit, Verdict};
use crate::telemetry::RunStats;
use std::thread;
use std::time::Instant;

/// A validated configuration that runs task/controller pairs.
///
/// Every run gets its own pool; all of its threads have been joined by the
/// time `run` or `try_run` returns.
#[derive(Debug, Clone)]
pub struct Engine {
    config: Config,
}

impl Engine {
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run to completion, re-raising the first task panic on this thread.
    ///
    /// `task` runs concurrently on the pool's workers. `controller` runs on
    /// the calling thread, once per result, and decides what to enqueue
    /// next and whether to keep going.
    pub fn run<I, O, E, T, C, It>(&self, task: T, controller: C, initial: It) -> Result<RunStats>
    where
        I: Send,
        O: Send,
        E: Send,
        T: Fn(&I) -> std::result::Result<O, E> + Sync,
        C: FnMut(I, std::result::Result<O, E>) -> Verdict<I>,
        It: IntoIterator<Item = I>,
    {
        match self.try_run(task, controller, initial) {
            Err(Error::TaskPanicked(fault)) => fault.resume(),
            other => other,
        }
    }

    /// Like [`Engine::run`], but a task panic comes back as
    /// [`Error::TaskPanicked`] instead of unwinding.
    pub fn try_run<I, O, E, T, C, It>(
        &self,
        task: T,
        mut controller: C,
        initial: It,
    ) -> Result<RunStats>
    where
        I: Send,
        O: Send,
        E: Send,
        T: Fn(&I) -> std::result::Result<O, E> + Sync,
        C: FnMut(I, std::result::Result<O, E>) -> Verdict<I>,
        It: IntoIterator<Item = I>,
    {
        let start = Instant::now();
        let task = &task;

        let (exit, mut stats) = thread::scope(|scope| -> Result<(Exit, RunStats)> {
            let pool = WorkerPool::spawn(scope, &self.config, task)?;
            let mut dispatcher = Dispatcher::new(self.config.order, initial);

            let exit = dispatcher.run(&pool, &mut controller);
            let report = pool.shutdown();

            let mut stats = dispatcher.into_stats();
            stats.drained = report.drained;
            stats.faults_discarded = report.faults_discarded;
            Ok((exit?, stats))
        })?;

        stats.elapsed = start.elapsed();
        tracing::debug!(
            workers = stats.workers,
            dispatched = stats.dispatched,
            completed = stats.completed,
            max_inflight = stats.max_inflight,
            halted = stats.halted,
            faulted = stats.faulted,
            elapsed = ?stats.elapsed,
            "run finished"
        );

        match exit {
            Exit::Faulted(fault) => Err(Error::TaskPanicked(fault)),
            Exit::Exhausted | Exit::Halted => Ok(stats),
        }
    }
}

fn run_with_order<I, O, E, T, C, It>(
    order: QueueOrder,
    workers: usize,
    task: T,
    controller: C,
    initial: It,
) -> Result<RunStats>
where
    I: Send,
    O: Send,
    E: Send,
    T: Fn(&I) -> std::result::Result<O, E> + Sync,
    C: FnMut(I, std::result::Result<O, E>) -> Verdict<I>,
    It: IntoIterator<Item = I>,
{
    let config = Config::builder().num_workers(workers).order(order).build()?;
    Engine::new(config)?.run(task, controller, initial)
}

/// Run with `workers` threads (0 = one per CPU), dispatching queued inputs
/// oldest first. Work discovered by the controller expands breadth-first.
///
/// A panic inside `task` stops the run; once every worker has been joined
/// the original panic is resumed on the calling thread.
///
/// ```
/// use veda_flow::{run_breadth_first, Verdict};
///
/// let mut visited = Vec::new();
/// run_breadth_first(
///     2,
///     |n: &u32| Ok::<_, ()>(n.saturating_sub(1)),
///     |n, next| {
///         visited.push(n);
///         match next {
///             Ok(child) if child > 0 => Verdict::expand([child]),
///             _ => Verdict::done(),
///         }
///     },
///     [3],
/// )
/// .unwrap();
///
/// assert_eq!(visited, vec![3, 2, 1]);
/// ```
pub fn run_breadth_first<I, O, E, T, C, It>(
    workers: usize,
    task: T,
    controller: C,
    initial: It,
) -> Result<RunStats>
where
    I: Send,
    O: Send,
    E: Send,
    T: Fn(&I) -> std::result::Result<O, E> + Sync,
    C: FnMut(I, std::result::Result<O, E>) -> Verdict<I>,
    It: IntoIterator<Item = I>,
{
    run_with_order(QueueOrder::Fifo, workers, task, controller, initial)
}

/// Same as [`run_breadth_first`], but the most recently queued input is
/// dispatched next, so discovered work expands depth-first.
pub fn run_depth_first<I, O, E, T, C, It>(
    workers: usize,
    task: T,
    controller: C,
    initial: It,
) -> Result<RunStats>
where
    I: Send,
    O: Send,
    E: Send,
    T: Fn(&I) -> std::result::Result<O, E> + Sync,
    C: FnMut(I, std::result::Result<O, E>) -> Verdict<I>,
    It: IntoIterator<Item = I>,
{
    run_with_order(QueueOrder::Lifo, workers, task, controller, initial)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{catch_unwind, AssertUnwindSafe};

    #[test]
    fn test_engine_rejects_invalid_config() {
        let config = Config {
            stack_size: Some(0),
            ..Default::default()
        };
        assert!(matches!(Engine::new(config), Err(Error::Config(_))));
    }

    #[test]
    fn test_countdown_stats() {
        let engine = Engine::new(Config::builder().num_workers(2).build().unwrap()).unwrap();

        let stats = engine
            .run(
                |n: &u32| Ok::<_, ()>(n - 1),
                |_n, next| match next {
                    Ok(child) if child > 0 => Verdict::expand([child]),
                    _ => Verdict::done(),
                },
                [3u32],
            )
            .unwrap();

        assert_eq!(stats.workers, 2);
        assert_eq!(stats.dispatched, 3);
        assert_eq!(stats.completed, 3);
        assert_eq!(stats.discovered, 2);
        assert_eq!(stats.max_inflight, 1);
        assert!(stats.exhausted());
        assert_eq!(stats.drained, 0);
    }

    #[test]
    fn test_elapsed_covers_task_time() {
        let engine = Engine::new(Config::builder().num_workers(1).build().unwrap()).unwrap();

        let stats = engine
            .run(
                |_n: &u32| {
                    std::thread::sleep(std::time::Duration::from_millis(10));
                    Ok::<_, ()>(())
                },
                |_n, _r| Verdict::done(),
                [0u32],
            )
            .unwrap();

        assert!(stats.elapsed >= std::time::Duration::from_millis(10));
    }

    #[test]
    fn test_try_run_returns_fault() {
        let engine = Engine::new(Config::builder().num_workers(2).build().unwrap()).unwrap();

        let err = engine
            .try_run(
                |n: &i32| -> std::result::Result<i32, ()> {
                    assert!(*n >= 0, "negative input");
                    Ok(*n)
                },
                |_n, _r| Verdict::done(),
                [1, -1, 2],
            )
            .unwrap_err();

        let fault = err.into_fault().expect("fault");
        assert_eq!(fault.message(), "negative input");
    }

    #[test]
    fn test_run_resumes_original_payload() {
        #[derive(Debug, PartialEq)]
        struct Corrupt(u8);

        let payload = catch_unwind(AssertUnwindSafe(|| {
            run_depth_first(
                1,
                |_: &u8| -> std::result::Result<(), ()> { std::panic::panic_any(Corrupt(7)) },
                |_n, _r| Verdict::done(),
                [0u8],
            )
        }))
        .unwrap_err();

        assert_eq!(payload.downcast_ref::<Corrupt>(), Some(&Corrupt(7)));
    }

    #[test]
    fn test_task_can_borrow_caller_data() {
        let weights = vec![10u64, 20, 30];
        let mut total = 0;

        run_breadth_first(
            2,
            |i: &usize| Ok::<_, ()>(weights[*i]),
            |_i, w| {
                total += w.unwrap_or(0);
                Verdict::done()
            },
            0..weights.len(),
        )
        .unwrap();

        assert_eq!(total, 60);
    }
}
