//! Stack definitions: JSON files describing resources and their alarms

pub mod config;
pub mod synth;

pub use config::{
    DurationMonitor, InvocationsMonitor, Notification, PresetMonitors, RateMonitor,
    ResourceConfig, ResourceKind, StackConfig,
};
pub use synth::synthesize;

use crate::error::MonitorError;

/// Stack loading and synthesis errors
#[derive(Debug, thiserror::Error)]
pub enum StackError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid stack definition: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Resource {resource}: {source}")]
    Resource {
        resource: String,
        #[source]
        source: MonitorError,
    },
}
