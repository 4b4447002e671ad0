//! Task runner - drives one task spec to a terminal result
//!
//! State machine per task: Attempting -> Succeeded | TimedOut | Exhausted.
//! Success and timeout are immediately terminal; any other failure backs
//! off and retries until attempts run out.

use crate::gate::ConcurrencyGate;
use crate::report::TaskResult;
use crate::retry::{BackoffPolicy, BackoffSchedule};
use crate::task::TaskSpec;
use futures::FutureExt;
use serde_json::Value;
use std::panic::AssertUnwindSafe;
use std::time::Duration;
use tokio::time::{sleep, timeout, Instant};
use tracing::{debug, warn};

/// Error text recorded when an attempt overruns its timeout
pub(crate) const TIMEOUT_ERROR: &str = "Timeout";

enum AttemptOutcome {
    Completed(Value),
    TimedOut,
    Failed(String),
}

/// Drive one task through its attempt/timeout/backoff loop
///
/// Every failure mode, panics included, ends up as data on the returned
/// result; nothing escapes as control flow. The gate permit is held for
/// the whole loop (backoff sleeps included) unless the policy says
/// otherwise, and releases by RAII on every path.
pub(crate) async fn run_task(
    mut spec: TaskSpec,
    gate: ConcurrencyGate,
    policy: BackoffPolicy,
) -> TaskResult {
    let name = spec.name.clone();

    let mut permit = match gate.acquire().await {
        Ok(permit) => Some(permit),
        Err(e) => {
            return TaskResult::failed(spec.id, name, e.to_string(), Duration::ZERO, 0);
        }
    };

    // Elapsed time starts once the slot is held; queueing is excluded
    let started = Instant::now();
    let schedule = BackoffSchedule::new(spec.backoff_base);
    let mut last_error = String::new();

    for attempt in 1..=spec.max_attempts {
        match run_attempt(&mut spec).await {
            AttemptOutcome::Completed(value) => {
                debug!(task = %name, attempt, "task succeeded");
                return TaskResult::succeeded(spec.id, name, value, started.elapsed(), attempt);
            }
            AttemptOutcome::TimedOut => {
                // Timeouts are terminal, remaining attempts notwithstanding
                warn!(task = %name, attempt, budget = ?spec.timeout, "attempt timed out");
                return TaskResult::failed(
                    spec.id,
                    name,
                    TIMEOUT_ERROR,
                    started.elapsed(),
                    attempt,
                );
            }
            AttemptOutcome::Failed(message) => {
                last_error = message;
                if attempt < spec.max_attempts {
                    let delay = schedule.delay_for_attempt(attempt);
                    warn!(
                        task = %name,
                        attempt,
                        ?delay,
                        error = %last_error,
                        "attempt failed, backing off"
                    );
                    match policy {
                        BackoffPolicy::HoldSlot => sleep(delay).await,
                        BackoffPolicy::ReleaseSlot => {
                            drop(permit.take());
                            sleep(delay).await;
                            permit = match gate.acquire().await {
                                Ok(p) => Some(p),
                                Err(e) => {
                                    return TaskResult::failed(
                                        spec.id,
                                        name,
                                        e.to_string(),
                                        started.elapsed(),
                                        attempt,
                                    );
                                }
                            };
                        }
                    }
                }
            }
        }
    }

    warn!(
        task = %name,
        attempts = spec.max_attempts,
        error = %last_error,
        "task exhausted its attempts"
    );
    let result = TaskResult::failed(
        spec.id,
        name,
        last_error,
        started.elapsed(),
        spec.max_attempts,
    );
    drop(permit);
    result
}

/// One attempt: the work future under its timeout, panics contained
async fn run_attempt(spec: &mut TaskSpec) -> AttemptOutcome {
    let budget = spec.timeout;
    let work = &mut spec.work;
    let attempt = AssertUnwindSafe(async move { work().await }).catch_unwind();

    match timeout(budget, attempt).await {
        Err(_) => AttemptOutcome::TimedOut,
        Ok(Ok(Ok(value))) => AttemptOutcome::Completed(value),
        Ok(Ok(Err(e))) => AttemptOutcome::Failed(e.to_string()),
        Ok(Err(payload)) => AttemptOutcome::Failed(panic_message(payload)),
    }
}

fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("panic: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("panic: {s}")
    } else {
        "panic: unknown payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panic_message_downcasts() {
        assert_eq!(panic_message(Box::new("bang")), "panic: bang");
        assert_eq!(panic_message(Box::new("bang".to_string())), "panic: bang");
        assert_eq!(panic_message(Box::new(42u32)), "panic: unknown payload");
    }
}
