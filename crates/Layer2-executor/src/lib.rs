//! # drover-executor
//!
//! Bounded-concurrency task execution engine for Drover.
//! Runs independent units of work under a configurable concurrency ceiling
//! with per-attempt timeouts, exponential-backoff retries, absolute failure
//! isolation, and an order-preserving execution report.
//!
//! ## Features
//!
//! - Concurrency gate bounding simultaneously executing task bodies
//! - Per-attempt timeout enforcement (timeouts are terminal, never retried)
//! - Exponential backoff between failed attempts
//! - Panic-safe runners: every failure surfaces as result data
//! - Report order always matches submission order

pub mod executor;
pub mod gate;
pub mod report;
pub mod retry;
pub mod task;

mod runner;

// Executor
pub use executor::Executor;

// Concurrency gate
pub use gate::{ConcurrencyGate, GatePermit};

// Retry policy
pub use retry::{BackoffPolicy, BackoffSchedule};

// Task model
pub use task::{TaskId, TaskSpec, WorkFn, WorkFuture};

// Results
pub use report::{ExecutionReport, TaskResult};
