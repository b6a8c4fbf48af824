//! # Main Queue
//!
//! The single UI-affine serialization domain. Everything in the coordinator
//! graph runs on one thread; work that must not run re-entrantly (finalization
//! notifications) is posted here and delivered on the next *turn*.
//!
//! ```text
//!   drop(coordinator) ──post──▶ [ job, job, ... ] ──run_turn()──▶ parent.on_child_finalized()
//! ```
//!
//! The queue is thread-local. A turn only runs the jobs that were queued when
//! it began; jobs posted while a turn is running wait for the following turn.
//! The embedding event loop calls [`run_turn`] once per tick; tests call it (or
//! [`yield_turn`]) before asserting on finalization.

use std::cell::RefCell;
use std::collections::VecDeque;

use log::{debug, warn};

type Job = Box<dyn FnOnce()>;

thread_local! {
    static QUEUE: RefCell<VecDeque<Job>> = RefCell::new(VecDeque::new());
}

/// Queue `job` for the next turn of the main queue.
///
/// Safe to call from `Drop` impls. During thread teardown the queue may
/// already be gone, in which case the job is discarded.
pub fn post(job: impl FnOnce() + 'static) {
    let posted = QUEUE.try_with(|queue| queue.borrow_mut().push_back(Box::new(job)));
    if posted.is_err() {
        warn!("Main queue unavailable (thread shutting down), dropping job");
    }
}

/// Run one turn: every job queued before this call, in FIFO order.
///
/// Returns the number of jobs executed.
pub fn run_turn() -> usize {
    let batch: Vec<Job> = QUEUE
        .try_with(|queue| queue.borrow_mut().drain(..).collect())
        .unwrap_or_default();

    let count = batch.len();
    // The borrow is released before running, so jobs may post follow-ups.
    for job in batch {
        job();
    }
    if count > 0 {
        debug!("Main queue turn ran {} job(s)", count);
    }
    count
}

/// Run turns until the queue is empty or `max_turns` is reached.
///
/// Returns the number of turns that executed at least one job.
pub fn run_until_idle(max_turns: usize) -> usize {
    let mut turns = 0;
    while turns < max_turns && run_turn() > 0 {
        turns += 1;
    }
    turns
}

/// Number of jobs waiting for the next turn.
pub fn pending() -> usize {
    QUEUE.try_with(|queue| queue.borrow().len()).unwrap_or(0)
}

/// Yield to the async executor, then run one turn.
///
/// Inside async code (tests, `LocalSet` tasks) this is the "let one scheduling
/// turn elapse" primitive.
pub async fn yield_turn() -> usize {
    tokio::task::yield_now().await;
    run_turn()
}
