//! Metrics produced by monitored resources

pub mod defaults;
pub mod metric;

pub use defaults::{metric_defaults, native_unit, MetricDefaults};
pub use metric::{
    humanize_period, Aggregation, Metric, MetricOptions, MetricSource, MetricUnit,
    Statistic,
};
