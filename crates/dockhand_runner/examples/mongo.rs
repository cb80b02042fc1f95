//! Example: Running MongoDB for a few seconds
//!
//! Starts `mongo` on 127.0.0.1:27017, waits, then stops and removes it.
//! Requires a local Docker engine.
//!
//! Run with: cargo run --example mongo

use std::time::Duration;

use dockhand_runner::{ContainerRunner, RunnerError};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut runner = ContainerRunner::new()
        .with_name("mongo")
        .with_image("mongo")
        .with_ports([27017])
        .with_environment_variable("MONGO_INITDB_DATABASE", "example");

    if let Err(e) = runner.start().await {
        println!("Start failed at '{}': {}", e.stage(), e);
        // a created-but-not-started container still needs cleaning up
        match runner.stop().await {
            Ok(()) | Err(RunnerError::NoContainerId) => {}
            Err(cleanup) => println!("Cleanup failed: {}", cleanup),
        }
        return Err(e.into());
    }

    println!(
        "Container {} running, state: {}",
        runner.container_id().unwrap_or_default(),
        runner.state()
    );

    tokio::time::sleep(Duration::from_secs(5)).await;

    runner.stop().await?;
    println!("Final state: {}", runner.state());

    Ok(())
}
