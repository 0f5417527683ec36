//! Runs the default endpoint checks against a Resume Optimizer instance and
//! prints a pass/fail report. Exits non-zero when any check did not pass.

use std::time::Duration;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use qa::config::Config;
use qa::harness::{default_checks, report, CheckRunner, CheckSet};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut checks = CheckSet::new();
    for check in default_checks() {
        checks.register(check)?;
    }

    let runner = CheckRunner::new(
        config.api_base.clone(),
        Duration::from_secs(config.request_timeout_secs),
    );
    let summary = runner.run_all(&checks).await;

    for result in summary.results() {
        if let Some(metric) = &result.metric {
            info!("{}: {} = {}", result.name, metric.label, metric.value);
        }
    }

    print!("{}", report(&summary));

    if !summary.all_passed() {
        std::process::exit(1);
    }
    Ok(())
}
