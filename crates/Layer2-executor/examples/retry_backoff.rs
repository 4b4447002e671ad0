//! Demonstrates retries with exponential backoff and the slot policy.
//!
//! The flaky task keeps its call counter inside the closure, so every
//! instance is independent and there is no shared state between runs.
//!
//! ```sh
//! RUST_LOG=debug cargo run --example retry_backoff
//! ```

use anyhow::anyhow;
use drover_executor::{BackoffPolicy, Executor, TaskSpec};
use serde_json::json;
use std::time::Duration;
use tokio::time::sleep;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn flaky_service(name: &str, succeed_on: u32) -> TaskSpec {
    let mut calls = 0u32;
    TaskSpec::new(name, move || {
        calls += 1;
        let call = calls;
        async move {
            sleep(Duration::from_millis(100)).await;
            if call < succeed_on {
                Err(anyhow!("connection reset (call {call})"))
            } else {
                Ok(json!({ "recovered_on_call": call }))
            }
        }
    })
    .with_max_attempts(4)
    .with_backoff_base(Duration::from_millis(250))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // ReleaseSlot lets other tasks use the gate while a retry is backing
    // off; the default HoldSlot keeps the slot for the whole loop
    let executor = Executor::new(2)?.with_backoff_policy(BackoffPolicy::ReleaseSlot);

    let specs = vec![
        flaky_service("payments", 3),
        flaky_service("inventory", 2),
        flaky_service("shipping", 1),
    ];

    let report = executor.run(specs).await?;

    println!("{}", report.summary());
    for result in &report.results {
        println!(
            "  {}: success={} attempts={} elapsed={:.3}s",
            result.name,
            result.success,
            result.attempt_count,
            result.elapsed.as_secs_f64()
        );
    }

    Ok(())
}
