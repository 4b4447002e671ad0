//! Run a mixed batch of simulated API calls and print the report.
//!
//! ```sh
//! cargo run --example basic_usage
//! ```

use anyhow::anyhow;
use drover_executor::{Executor, TaskSpec};
use serde_json::{json, Value};
use std::time::Duration;
use tokio::time::sleep;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn fetch_user(user_id: u32) -> TaskSpec {
    TaskSpec::new(format!("fetch-user-{user_id}"), move || async move {
        sleep(Duration::from_millis(150)).await;
        Ok(json!({ "user_id": user_id, "name": format!("user-{user_id}") }))
    })
}

fn fetch_broken_endpoint() -> TaskSpec {
    TaskSpec::new("broken-endpoint", || async {
        sleep(Duration::from_millis(100)).await;
        Err::<Value, _>(anyhow!("503 Service Unavailable"))
    })
    .with_max_attempts(2)
    .with_backoff_base(Duration::from_millis(200))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let mut specs: Vec<TaskSpec> = (1..=5).map(fetch_user).collect();
    specs.push(fetch_broken_endpoint());

    let executor = Executor::new(3)?;
    let report = executor.run(specs).await?;

    println!("{}", report.summary());
    println!();
    for result in &report.results {
        match &result.error {
            None => println!(
                "  {} ok in {:.3}s: {}",
                result.name,
                result.elapsed.as_secs_f64(),
                result.value.as_ref().unwrap_or(&Value::Null)
            ),
            Some(error) => println!(
                "  {} failed after {} attempts: {error}",
                result.name, result.attempt_count
            ),
        }
    }

    Ok(())
}
