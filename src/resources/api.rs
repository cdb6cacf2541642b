//! HTTP API resource

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{node_path, MonitoredResource};
use crate::error::CollaboratorError;
use crate::metrics::{native_unit, Aggregation, Metric, MetricSource};

const NAMESPACE: &str = "AWS/ApiGateway";
const DIMENSION: &str = "ApiName";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiProps {
    /// Integration timeout
    #[serde(default, with = "crate::metrics::metric::duration_secs::option")]
    pub timeout: Option<Duration>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResource {
    path: String,
    name: String,
    props: ApiProps,
}

impl ApiResource {
    pub fn define(scope: &str, name: impl Into<String>, props: ApiProps) -> Self {
        let name = name.into();
        Self {
            path: node_path(scope, &name),
            name,
            props,
        }
    }
}

impl MetricSource for ApiResource {
    fn metric(&self, name: &str, aggregation: Aggregation) -> Result<Metric, CollaboratorError> {
        Ok(Metric::new(NAMESPACE, name, aggregation)
            .with_dimension(DIMENSION, &self.name)
            .with_unit(native_unit(name)))
    }
}

impl MonitoredResource for ApiResource {
    fn node_path(&self) -> &str {
        &self.path
    }

    fn timeout(&self) -> Option<Duration> {
        self.props.timeout
    }

    fn latency_metric(&self) -> Option<&'static str> {
        Some("IntegrationLatency")
    }
}
