//! Message queue resource

use super::{node_path, MonitoredResource};
use crate::error::CollaboratorError;
use crate::metrics::{native_unit, Aggregation, Metric, MetricSource};

const NAMESPACE: &str = "AWS/SQS";
const DIMENSION: &str = "QueueName";

#[derive(Debug, Clone, PartialEq)]
pub struct QueueResource {
    path: String,
    name: String,
}

impl QueueResource {
    pub fn define(scope: &str, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            path: node_path(scope, &name),
            name,
        }
    }
}

impl MetricSource for QueueResource {
    fn metric(&self, name: &str, aggregation: Aggregation) -> Result<Metric, CollaboratorError> {
        Ok(Metric::new(NAMESPACE, name, aggregation)
            .with_dimension(DIMENSION, &self.name)
            .with_unit(native_unit(name)))
    }
}

impl MonitoredResource for QueueResource {
    fn node_path(&self) -> &str {
        &self.path
    }
}
