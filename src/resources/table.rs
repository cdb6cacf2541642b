//! Storage table resource

use super::{node_path, MonitoredResource};
use crate::error::CollaboratorError;
use crate::metrics::{native_unit, Aggregation, Metric, MetricSource};

const NAMESPACE: &str = "AWS/DynamoDB";
const DIMENSION: &str = "TableName";

#[derive(Debug, Clone, PartialEq)]
pub struct TableResource {
    path: String,
    name: String,
}

impl TableResource {
    pub fn define(scope: &str, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            path: node_path(scope, &name),
            name,
        }
    }
}

impl MetricSource for TableResource {
    fn metric(&self, name: &str, aggregation: Aggregation) -> Result<Metric, CollaboratorError> {
        Ok(Metric::new(NAMESPACE, name, aggregation)
            .with_dimension(DIMENSION, &self.name)
            .with_unit(native_unit(name)))
    }
}

impl MonitoredResource for TableResource {
    fn node_path(&self) -> &str {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{MetricUnit, Statistic};
    use std::time::Duration;

    #[test]
    fn test_table_metric() {
        let table = TableResource::define("shop", "inventory");
        assert_eq!(table.node_path(), "shop/inventory");
        assert_eq!(table.timeout(), None);
        assert_eq!(table.latency_metric(), None);

        let metric = table
            .metric("ThrottledRequests", Aggregation::sum_per_minute())
            .unwrap();
        assert_eq!(metric.namespace, "AWS/DynamoDB");
        assert_eq!(metric.dimensions.get("TableName").map(String::as_str), Some("inventory"));
        assert_eq!(metric.statistic, Statistic::Sum);
        assert_eq!(metric.unit, MetricUnit::Count);

        let latency = table
            .metric(
                "SuccessfulRequestLatency",
                Aggregation::new(Statistic::Average, Duration::from_secs(300)),
            )
            .unwrap();
        assert_eq!(latency.unit, MetricUnit::Milliseconds);
    }
}
