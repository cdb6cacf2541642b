//! Stack definition file format

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::alarms::{ActionTarget, AlarmDeclarations, AlarmState};
use crate::profile::MonitorOptions;
use crate::resources::{ApiProps, FunctionProps};

use super::StackError;

/// A stack: a named scope holding monitored resources
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackConfig {
    /// Stack name, the root of every node path
    pub name: String,
    /// Resources in definition order; names must be unique
    #[serde(default)]
    pub resources: Vec<ResourceConfig>,
}

impl StackConfig {
    /// Load a stack definition from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StackError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| StackError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&raw)
    }

    /// Parse a stack definition from a JSON string
    pub fn from_json(raw: &str) -> Result<Self, StackError> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// Resource kinds and their construction properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ResourceKind {
    Function(FunctionProps),
    Queue,
    Table,
    Api(ApiProps),
}

/// One resource and its monitoring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceConfig {
    /// Resource name, unique within the stack
    pub name: String,
    #[serde(flatten)]
    pub kind: ResourceKind,
    /// Declared alarms, keyed by metric name
    #[serde(default)]
    pub alarms: Option<AlarmDeclarations>,
    #[serde(default)]
    pub monitors: PresetMonitors,
    /// Targets broadcast to every alarm after presets are applied
    #[serde(default)]
    pub notify: Vec<Notification>,
}

/// Preset monitors to apply after the declared alarms
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetMonitors {
    #[serde(default)]
    pub errors: Option<RateMonitor>,
    #[serde(default)]
    pub throttles: Option<RateMonitor>,
    #[serde(default)]
    pub duration: Option<DurationMonitor>,
    #[serde(default)]
    pub invocations: Option<InvocationsMonitor>,
}

/// Errors or throttles preset
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateMonitor {
    /// Defaults to 0
    #[serde(default)]
    pub per_minute: Option<f64>,
    #[serde(flatten)]
    pub options: MonitorOptions,
}

/// Latency preset, relative to the resource's timeout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DurationMonitor {
    pub percent_of_timeout: f64,
    #[serde(flatten)]
    pub options: MonitorOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationsMonitor {
    pub per_minute: f64,
    #[serde(flatten)]
    pub options: MonitorOptions,
}

/// Bulk routing of targets to one alarm state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub state: AlarmState,
    pub targets: Vec<ActionTarget>,
}
