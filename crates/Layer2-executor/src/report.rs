//! Task results and the execution report

use crate::task::TaskId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// Terminal, immutable outcome of one task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskResult {
    /// Identifier of the task this result belongs to
    pub task_id: TaskId,

    /// Task name, carried over from the `TaskSpec`
    pub name: String,

    /// Whether the task ultimately succeeded
    pub success: bool,

    /// Output value, present iff `success`
    pub value: Option<Value>,

    /// Failure description, present iff not `success`
    pub error: Option<String>,

    /// Wall-clock time from first attempt start to terminal resolution,
    /// backoff sleeps included. The clock starts after the gate slot is
    /// acquired, so queueing delay is excluded.
    pub elapsed: Duration,

    /// Attempts actually made, starting at 1
    pub attempt_count: u32,
}

impl TaskResult {
    pub(crate) fn succeeded(
        task_id: TaskId,
        name: impl Into<String>,
        value: Value,
        elapsed: Duration,
        attempt_count: u32,
    ) -> Self {
        Self {
            task_id,
            name: name.into(),
            success: true,
            value: Some(value),
            error: None,
            elapsed,
            attempt_count,
        }
    }

    pub(crate) fn failed(
        task_id: TaskId,
        name: impl Into<String>,
        error: impl Into<String>,
        elapsed: Duration,
        attempt_count: u32,
    ) -> Self {
        Self {
            task_id,
            name: name.into(),
            success: false,
            value: None,
            error: Some(error.into()),
            elapsed,
            attempt_count,
        }
    }
}

/// Aggregate outcome of one `Executor::run` call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionReport {
    /// Number of tasks submitted
    pub total: usize,

    /// Tasks that reached a success result
    pub succeeded_count: usize,

    /// Tasks that reached a failure result
    pub failed_count: usize,

    /// Results in submission order, not completion order
    pub results: Vec<TaskResult>,
}

impl ExecutionReport {
    /// Fold individual results into the aggregate counts
    pub fn from_results(results: Vec<TaskResult>) -> Self {
        let succeeded_count = results.iter().filter(|r| r.success).count();
        let failed_count = results.len() - succeeded_count;
        Self {
            total: results.len(),
            succeeded_count,
            failed_count,
            results,
        }
    }

    /// Success percentage; 0 for an empty report
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.succeeded_count as f64 / self.total as f64 * 100.0
    }

    /// Human-readable digest of the run
    pub fn summary(&self) -> String {
        format!(
            "Execution Report:\n\
             Total Tasks: {}\n\
             Successful: {}\n\
             Failed: {}\n\
             Success Rate: {:.2}%",
            self.total,
            self.succeeded_count,
            self.failed_count,
            self.success_rate()
        )
    }
}
