//! Executor - runs batches of tasks under the concurrency gate

use crate::gate::ConcurrencyGate;
use crate::report::{ExecutionReport, TaskResult};
use crate::retry::BackoffPolicy;
use crate::runner;
use crate::task::TaskSpec;
use drover_foundation::Result;
use std::time::Duration;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Bounded-concurrency task executor
///
/// Starts one runner per spec, each admitted by the shared gate, and
/// reports results in submission order regardless of completion order.
#[derive(Debug, Clone)]
pub struct Executor {
    gate: ConcurrencyGate,
    backoff_policy: BackoffPolicy,
}

impl Executor {
    /// Create an executor allowing at most `max_concurrent` task bodies
    /// mid-execution at once
    pub fn new(max_concurrent: usize) -> Result<Self> {
        Ok(Self {
            gate: ConcurrencyGate::new(max_concurrent)?,
            backoff_policy: BackoffPolicy::default(),
        })
    }

    /// Override what runners do with their gate slot during backoff
    pub fn with_backoff_policy(mut self, policy: BackoffPolicy) -> Self {
        self.backoff_policy = policy;
        self
    }

    /// The concurrency ceiling this executor enforces
    pub fn max_concurrent(&self) -> usize {
        self.gate.capacity()
    }

    /// Run every spec to a terminal result and report in submission order
    ///
    /// Fails only for invalid specs, detected before any task starts.
    /// Individual task failures are data on the report, never an `Err`.
    /// Dropping the returned future aborts all outstanding runners and
    /// their gate slots release on unwind; no work outlives the call.
    pub async fn run(&self, specs: Vec<TaskSpec>) -> Result<ExecutionReport> {
        if specs.is_empty() {
            return Ok(ExecutionReport::from_results(Vec::new()));
        }

        for spec in &specs {
            spec.validate()?;
        }

        info!(
            total = specs.len(),
            max_concurrent = self.gate.capacity(),
            "starting task batch"
        );

        let identities: Vec<_> = specs.iter().map(|s| (s.id, s.name.clone())).collect();

        let mut set = JoinSet::new();
        for (index, spec) in specs.into_iter().enumerate() {
            let gate = self.gate.clone();
            let policy = self.backoff_policy;
            set.spawn(async move { (index, runner::run_task(spec, gate, policy).await) });
        }

        let mut slots: Vec<Option<TaskResult>> = identities.iter().map(|_| None).collect();
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok((index, result)) => {
                    debug!(index, success = result.success, "task runner finished");
                    slots[index] = Some(result);
                }
                Err(e) => warn!("task runner aborted: {e}"),
            }
        }

        // A lost runner still gets a row so the report stays complete
        let results: Vec<TaskResult> = slots
            .into_iter()
            .zip(identities)
            .map(|(slot, (id, name))| {
                slot.unwrap_or_else(|| {
                    TaskResult::failed(id, name, "runner aborted", Duration::ZERO, 0)
                })
            })
            .collect();

        let report = ExecutionReport::from_results(results);
        info!(
            succeeded = report.succeeded_count,
            failed = report.failed_count,
            "task batch finished"
        );
        Ok(report)
    }
}
