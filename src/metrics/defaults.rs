//! Built-in statistical defaults per well-known metric name

use std::time::Duration;

use super::metric::{Aggregation, MetricUnit, Statistic};

const ONE_MINUTE: Duration = Duration::from_secs(60);

/// Static defaults for one metric name
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricDefaults {
    pub aggregation: Aggregation,
    /// Threshold used when neither the declaration nor a computed default supplies one
    pub threshold: Option<f64>,
}

impl MetricDefaults {
    fn new(statistic: Statistic, period: Duration) -> Self {
        Self {
            aggregation: Aggregation::new(statistic, period),
            threshold: None,
        }
    }

    fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = Some(threshold);
        self
    }
}

/// Look up the static defaults for a metric.
///
/// Unknown metrics fall back to `Average` over `fallback_period`.
pub fn metric_defaults(metric_name: &str, fallback_period: Duration) -> MetricDefaults {
    use Statistic::*;

    match metric_name {
        // Zero tolerance unless the declaration says otherwise
        "Errors" | "Throttles" => MetricDefaults::new(Sum, ONE_MINUTE).with_threshold(0.0),

        "Invocations" | "NumberOfMessagesSent" | "NumberOfMessagesReceived" | "Count"
        | "4XXError" | "5XXError" | "ThrottledRequests" | "UserErrors" | "SystemErrors" => {
            MetricDefaults::new(Sum, ONE_MINUTE)
        }

        "Duration" | "Latency" | "IntegrationLatency" | "SuccessfulRequestLatency" => {
            MetricDefaults::new(Percentile(99.0), ONE_MINUTE)
        }

        "ConcurrentExecutions" | "ApproximateAgeOfOldestMessage"
        | "ApproximateNumberOfMessagesVisible" => MetricDefaults::new(Maximum, ONE_MINUTE),

        _ => MetricDefaults::new(Average, fallback_period),
    }
}

/// Unit a well-known metric is published in. Anything unlisted is a count.
pub fn native_unit(metric_name: &str) -> MetricUnit {
    match metric_name {
        "Duration" | "Latency" | "IntegrationLatency" | "SuccessfulRequestLatency" => {
            MetricUnit::Milliseconds
        }
        "ApproximateAgeOfOldestMessage" => MetricUnit::Seconds,
        _ => MetricUnit::Count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIVE_MINUTES: Duration = Duration::from_secs(300);

    #[test]
    fn test_errors_and_throttles_sum_per_minute() {
        for name in ["Errors", "Throttles"] {
            let d = metric_defaults(name, FIVE_MINUTES);
            assert_eq!(d.aggregation, Aggregation::sum_per_minute());
            assert_eq!(d.threshold, Some(0.0));
        }
    }

    #[test]
    fn test_duration_p99() {
        let d = metric_defaults("Duration", FIVE_MINUTES);
        assert_eq!(d.aggregation.statistic, Statistic::Percentile(99.0));
        assert_eq!(d.threshold, None);
    }

    #[test]
    fn test_native_unit() {
        assert_eq!(native_unit("Duration"), MetricUnit::Milliseconds);
        assert_eq!(native_unit("IntegrationLatency"), MetricUnit::Milliseconds);
        assert_eq!(native_unit("ApproximateAgeOfOldestMessage"), MetricUnit::Seconds);
        assert_eq!(native_unit("Errors"), MetricUnit::Count);
    }

    #[test]
    fn test_unknown_metric_fallback() {
        let d = metric_defaults("CustomSignal", FIVE_MINUTES);
        assert_eq!(d.aggregation.statistic, Statistic::Average);
        assert_eq!(d.aggregation.period, FIVE_MINUTES);
        assert_eq!(d.threshold, None);
    }
}
