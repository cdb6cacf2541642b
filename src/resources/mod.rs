//! Metric-producing resources.
//!
//! These are thin stand-ins for provisioned components: each knows its node
//! path, its metric namespace and the dimension that identifies it.

pub mod api;
pub mod function;
pub mod queue;
pub mod table;

use std::time::Duration;

use crate::metrics::MetricSource;

pub use api::{ApiProps, ApiResource};
pub use function::{FunctionProps, FunctionResource};
pub use queue::QueueResource;
pub use table::TableResource;

/// A resource alarms can be attached to
pub trait MonitoredResource: MetricSource {
    /// Scope path of the resource, e.g. `shop/checkout`
    fn node_path(&self) -> &str;

    /// Fixed execution timeout, if the resource declares one
    fn timeout(&self) -> Option<Duration> {
        None
    }

    /// Metric that reports how long one unit of work took, if any
    fn latency_metric(&self) -> Option<&'static str> {
        None
    }
}

/// Join a parent scope and a child name into a node path
pub fn node_path(scope: &str, name: &str) -> String {
    if scope.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", scope, name)
    }
}
