//! Crate-wide defaults applied when a declaration leaves a field unset

use std::time::Duration;

use crate::alarms::ComparisonOperator;

/// Defaults for alarm resolution
#[derive(Debug, Clone, PartialEq)]
pub struct MonitoringSettings {
    /// Evaluation periods when none is declared (default: 3)
    pub evaluation_periods: u32,
    /// Period for metrics without a built-in default (default: 5 minutes)
    pub default_period: Duration,
    /// Comparison when none is declared (default: greater than threshold)
    pub comparison_operator: ComparisonOperator,
}

impl Default for MonitoringSettings {
    fn default() -> Self {
        Self {
            evaluation_periods: 3,
            default_period: Duration::from_secs(300),
            comparison_operator: ComparisonOperator::GreaterThanThreshold,
        }
    }
}

impl MonitoringSettings {
    /// Read settings from environment variables, falling back to defaults
    /// ALARMKIT_EVALUATION_PERIODS=3
    /// ALARMKIT_DEFAULT_PERIOD_SECS=300
    /// ALARMKIT_COMPARISON=GreaterThanThreshold
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let evaluation_periods = std::env::var("ALARMKIT_EVALUATION_PERIODS")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .filter(|v| *v >= 1)
            .unwrap_or(defaults.evaluation_periods);
        let default_period = std::env::var("ALARMKIT_DEFAULT_PERIOD_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|v| *v > 0)
            .map(Duration::from_secs)
            .unwrap_or(defaults.default_period);
        let comparison_operator = std::env::var("ALARMKIT_COMPARISON")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.comparison_operator);

        Self {
            evaluation_periods,
            default_period,
            comparison_operator,
        }
    }

    /// Set default evaluation periods
    pub fn with_evaluation_periods(mut self, periods: u32) -> Self {
        self.evaluation_periods = periods;
        self
    }

    /// Set fallback period
    pub fn with_default_period(mut self, period: Duration) -> Self {
        self.default_period = period;
        self
    }
}
