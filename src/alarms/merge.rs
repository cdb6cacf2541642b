//! Resolution of partial alarm options against defaults.
//!
//! Every field follows the same precedence:
//! explicit declaration > computed default > static per-metric default.

use crate::error::ConfigurationError;
use crate::metrics::{humanize_period, Aggregation, MetricDefaults};
use crate::settings::MonitoringSettings;

use super::config::{AlarmOptions, ComparisonOperator, TreatMissingData};

/// Defaults computed from the resource at attachment time (e.g. a
/// threshold derived from a timeout)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ComputedDefaults {
    /// Threshold used when the declaration gives none
    pub threshold: Option<f64>,
}

impl ComputedDefaults {
    pub fn threshold(threshold: f64) -> Self {
        Self {
            threshold: Some(threshold),
        }
    }
}

/// Alarm options with every field resolved
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedAlarmOptions {
    pub threshold: f64,
    pub evaluation_periods: u32,
    pub alarm_description: String,
    pub comparison_operator: ComparisonOperator,
    pub treat_missing_data: TreatMissingData,
}

/// Pick the first value present in precedence order
pub fn resolve<T>(explicit: Option<T>, computed: Option<T>, fallback: Option<T>) -> Option<T> {
    explicit.or(computed).or(fallback)
}

/// Resolve alarm options for `metric_name`.
///
/// `aggregation` is the already merged statistic and period; a period under
/// one second is rejected.
pub fn resolve_alarm_options(
    metric_name: &str,
    options: &AlarmOptions,
    computed: ComputedDefaults,
    defaults: &MetricDefaults,
    aggregation: Aggregation,
    settings: &MonitoringSettings,
) -> Result<ResolvedAlarmOptions, ConfigurationError> {
    if aggregation.period.as_secs() == 0 {
        return Err(ConfigurationError::InvalidPeriod(metric_name.to_string()));
    }

    let threshold = resolve(options.threshold, computed.threshold, defaults.threshold)
        .ok_or_else(|| ConfigurationError::MissingThreshold(metric_name.to_string()))?;
    if !threshold.is_finite() {
        return Err(ConfigurationError::InvalidThreshold {
            metric: metric_name.to_string(),
            value: threshold,
        });
    }

    let evaluation_periods = options
        .evaluation_periods
        .unwrap_or(settings.evaluation_periods);
    if evaluation_periods == 0 {
        return Err(ConfigurationError::InvalidEvaluationPeriods(
            metric_name.to_string(),
        ));
    }

    let comparison_operator = options
        .comparison_operator
        .unwrap_or(settings.comparison_operator);

    let alarm_description = options.alarm_description.clone().unwrap_or_else(|| {
        format!(
            "{} {} {} per {}",
            comparison_operator.describe(),
            threshold,
            metric_name,
            humanize_period(aggregation.period)
        )
    });

    Ok(ResolvedAlarmOptions {
        threshold,
        evaluation_periods,
        alarm_description,
        comparison_operator,
        treat_missing_data: options.treat_missing_data.unwrap_or_default(),
    })
}
