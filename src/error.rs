//! Error types shared by the attacher, profiles and collaborators

/// Invalid or conflicting alarm configuration. Always fatal to the current
/// definition pass.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("Metric name must not be empty")]
    EmptyMetricName,

    #[error("Invalid metric name: {0}")]
    InvalidMetricName(String),

    #[error("No threshold could be resolved for metric {0}")]
    MissingThreshold(String),

    #[error("Threshold for metric {metric} is not a finite number: {value}")]
    InvalidThreshold { metric: String, value: f64 },

    #[error("Evaluation periods for metric {0} must be at least 1")]
    InvalidEvaluationPeriods(String),

    #[error("Sampling period for metric {0} must be at least 1 second")]
    InvalidPeriod(String),

    #[error("Alarm {alarm_id} already exists on {owner}")]
    DuplicateAlarm { owner: String, alarm_id: String },

    #[error("Resource {0} is defined more than once")]
    DuplicateResource(String),

    #[error("Resource {0} has no timeout configured")]
    MissingTimeout(String),

    #[error("Resource {0} publishes no latency metric")]
    MissingLatencyMetric(String),

    #[error("Percent of timeout must be a positive number, got {0}")]
    InvalidTimeoutPercent(f64),
}

/// Failure reported by a metric source or alarm sink. Propagated unchanged.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CollaboratorError {
    #[error("Metric source error: {0}")]
    MetricSource(String),

    #[error("Alarm sink error: {0}")]
    Sink(String),
}

/// Errors raised while attaching alarms to a resource
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MonitorError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Collaborator error: {0}")]
    Collaborator(#[from] CollaboratorError),
}

impl MonitorError {
    /// Whether this error is a configuration problem
    pub fn is_configuration(&self) -> bool {
        matches!(self, MonitorError::Configuration(_))
    }
}
