//! Task definition and types

use drover_foundation::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use uuid::Uuid;

/// Boxed future produced by one invocation of a task's unit of work
pub type WorkFuture = Pin<Box<dyn Future<Output = anyhow::Result<Value>> + Send>>;

/// A unit of work: zero-argument, invoked once per attempt
///
/// Callers bind arguments by closure capture. Stateful behavior (call
/// counters for flaky simulations, cached handles) lives inside the
/// closure, never in process-wide state.
pub type WorkFn = Box<dyn FnMut() -> WorkFuture + Send>;

/// Unique identifier for a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskId(pub Uuid);

impl TaskId {
    /// Generate a new random TaskId
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// Immutable description of one unit of work and its execution policy
///
/// Built once by the caller, consumed by the executor. The policy fields
/// default to the values most batches want: 3 s per attempt, 3 attempts,
/// 500 ms backoff base.
pub struct TaskSpec {
    /// Unique task identifier
    pub id: TaskId,

    /// Human-readable name, used in logs and results
    pub name: String,

    /// The unit of work, re-invoked for each attempt
    pub(crate) work: WorkFn,

    /// Time allowed per attempt; must be greater than zero
    pub timeout: Duration,

    /// Maximum attempts including the first; must be at least 1
    pub max_attempts: u32,

    /// Base delay for exponential backoff between attempts
    pub backoff_base: Duration,
}

impl TaskSpec {
    /// Create a task from any suitable closure
    pub fn new<F, Fut>(name: impl Into<String>, mut work: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = anyhow::Result<Value>> + Send + 'static,
    {
        Self::from_boxed(name, Box::new(move || Box::pin(work()) as WorkFuture))
    }

    /// Create a task from an already-boxed unit of work
    pub fn from_boxed(name: impl Into<String>, work: WorkFn) -> Self {
        Self {
            id: TaskId::new(),
            name: name.into(),
            work,
            timeout: Duration::from_secs(3),
            max_attempts: 3,
            backoff_base: Duration::from_millis(500),
        }
    }

    /// Set the per-attempt timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the maximum number of attempts, including the first
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Set the base delay for exponential backoff
    pub fn with_backoff_base(mut self, backoff_base: Duration) -> Self {
        self.backoff_base = backoff_base;
        self
    }

    /// Check the execution policy before any attempt is made
    pub fn validate(&self) -> Result<()> {
        if self.timeout.is_zero() {
            return Err(Error::Validation(format!(
                "task '{}': timeout must be greater than zero",
                self.name
            )));
        }
        if self.max_attempts == 0 {
            return Err(Error::Validation(format!(
                "task '{}': max_attempts must be at least 1",
                self.name
            )));
        }
        Ok(())
    }
}

impl fmt::Debug for TaskSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskSpec")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("timeout", &self.timeout)
            .field("max_attempts", &self.max_attempts)
            .field("backoff_base", &self.backoff_base)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn noop_spec() -> TaskSpec {
        TaskSpec::new("noop", || async { Ok(json!(null)) })
    }

    #[test]
    fn test_defaults() {
        let spec = noop_spec();
        assert_eq!(spec.timeout, Duration::from_secs(3));
        assert_eq!(spec.max_attempts, 3);
        assert_eq!(spec.backoff_base, Duration::from_millis(500));
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let spec = noop_spec()
            .with_timeout(Duration::from_secs(10))
            .with_max_attempts(5)
            .with_backoff_base(Duration::from_secs(1));
        assert_eq!(spec.timeout, Duration::from_secs(10));
        assert_eq!(spec.max_attempts, 5);
        assert_eq!(spec.backoff_base, Duration::from_secs(1));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let spec = noop_spec().with_timeout(Duration::ZERO);
        assert!(spec.validate().is_err());
    }

    #[test]
    fn test_zero_attempts_rejected() {
        let spec = noop_spec().with_max_attempts(0);
        assert!(spec.validate().is_err());
    }

    #[test]
    fn test_task_id_display() {
        let id = TaskId::new();
        assert_eq!(id.to_string().len(), 8);
    }
}
