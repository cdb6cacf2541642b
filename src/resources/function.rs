//! Function resource

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{node_path, MonitoredResource};
use crate::error::CollaboratorError;
use crate::metrics::{native_unit, Aggregation, Metric, MetricSource};

const NAMESPACE: &str = "AWS/Lambda";
const DIMENSION: &str = "FunctionName";

/// Construction properties for a function
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionProps {
    /// Maximum execution time of one invocation
    #[serde(default, with = "crate::metrics::metric::duration_secs::option")]
    pub timeout: Option<Duration>,
    /// Queue that receives failed asynchronous events
    #[serde(default)]
    pub dead_letter_queue: Option<String>,
}

impl FunctionProps {
    /// Set the execution timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the dead-letter queue
    pub fn with_dead_letter_queue(mut self, queue: impl Into<String>) -> Self {
        self.dead_letter_queue = Some(queue.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionResource {
    path: String,
    name: String,
    props: FunctionProps,
}

impl FunctionResource {
    /// Define a function under `scope`.
    ///
    /// A function without a dead-letter queue is allowed; failed async events
    /// are then dropped, so a warning is logged.
    pub fn define(scope: &str, name: impl Into<String>, props: FunctionProps) -> Self {
        let name = name.into();
        let path = node_path(scope, &name);

        if props.dead_letter_queue.is_none() {
            tracing::warn!(
                function = %path,
                "Function has no dead-letter queue; failed async events will be dropped"
            );
        }

        Self { path, name, props }
    }
}

impl MetricSource for FunctionResource {
    fn metric(&self, name: &str, aggregation: Aggregation) -> Result<Metric, CollaboratorError> {
        Ok(Metric::new(NAMESPACE, name, aggregation)
            .with_dimension(DIMENSION, &self.name)
            .with_unit(native_unit(name)))
    }
}

impl MonitoredResource for FunctionResource {
    fn node_path(&self) -> &str {
        &self.path
    }

    fn timeout(&self) -> Option<Duration> {
        self.props.timeout
    }

    fn latency_metric(&self) -> Option<&'static str> {
        Some("Duration")
    }
}
