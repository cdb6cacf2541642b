//! alarmkit CLI
//!
//! Run with: cargo run -- stack.json
//!
//! Reads a stack definition, attaches every declared alarm and prints the
//! resulting alarm template as JSON on stdout.
//!
//! Environment variables:
//! - ALARMKIT_STACK: Stack file path when no argument is given
//! - ALARMKIT_EVALUATION_PERIODS: Default evaluation periods (default: 3)
//! - ALARMKIT_DEFAULT_PERIOD_SECS: Period for metrics without a built-in default (default: 300)
//! - ALARMKIT_COMPARISON: Default comparison operator (default: GreaterThanThreshold)
//! - RUST_LOG: Log level (default: alarmkit=info)

use alarmkit::settings::MonitoringSettings;
use alarmkit::stack::{synthesize, StackConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "alarmkit=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("ALARMKIT_STACK").ok())
        .ok_or("usage: alarmkit <stack.json> (or set ALARMKIT_STACK)")?;

    let settings = MonitoringSettings::from_env();
    tracing::info!("alarmkit configuration:");
    tracing::info!("  Stack file: {}", path);
    tracing::info!("  Evaluation periods: {}", settings.evaluation_periods);
    tracing::info!(
        "  Default period: {} seconds",
        settings.default_period.as_secs()
    );
    tracing::info!("  Comparison: {:?}", settings.comparison_operator);

    let stack = StackConfig::load(&path)?;
    let template = synthesize(&stack, &settings)?;

    println!("{}", template.to_json()?);
    Ok(())
}
