//! Convenience monitors with statistical defaults for common signals

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::alarms::{
    ActionMap, AlarmDefinition, AlarmOptions, AlarmSink, AttachRequest, ComputedDefaults,
};
use crate::error::{ConfigurationError, MonitorError};
use crate::metrics::{Aggregation, MetricOptions, Statistic};
use crate::resources::MonitoredResource;

use super::MonitoringProfile;

const ONE_MINUTE: Duration = Duration::from_secs(60);

/// Options shared by every preset monitor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorOptions {
    /// Consecutive breaching periods before the alarm fires
    #[serde(default)]
    pub evaluation_periods: Option<u32>,
    /// Targets to route on creation
    #[serde(default)]
    pub actions: Option<ActionMap>,
}

impl MonitorOptions {
    /// Set evaluation periods
    pub fn with_evaluation_periods(mut self, periods: u32) -> Self {
        self.evaluation_periods = Some(periods);
        self
    }

    /// Set actions routed on creation
    pub fn with_actions(mut self, actions: ActionMap) -> Self {
        self.actions = Some(actions);
        self
    }

    fn into_definition(self, aggregation: Aggregation, threshold: Option<f64>) -> AlarmDefinition {
        AlarmDefinition {
            metric_options: MetricOptions::default()
                .with_statistic(aggregation.statistic)
                .with_period(aggregation.period),
            alarm_options: AlarmOptions {
                threshold,
                evaluation_periods: self.evaluation_periods,
                ..Default::default()
            },
            actions: self.actions,
        }
    }
}

impl<R, S> MonitoringProfile<R, S>
where
    R: MonitoredResource,
    S: AlarmSink,
{
    /// Alarm when errors exceed `errors_per_minute` (default 0)
    pub fn monitor_errors(
        &mut self,
        errors_per_minute: Option<f64>,
        options: MonitorOptions,
    ) -> Result<&S::Handle, MonitorError> {
        let definition = options.into_definition(Aggregation::sum_per_minute(), errors_per_minute);
        self.attach("Errors", &definition)
    }

    /// Alarm when throttles exceed `throttles_per_minute` (default 0)
    pub fn monitor_throttles(
        &mut self,
        throttles_per_minute: Option<f64>,
        options: MonitorOptions,
    ) -> Result<&S::Handle, MonitorError> {
        let definition =
            options.into_definition(Aggregation::sum_per_minute(), throttles_per_minute);
        self.attach("Throttles", &definition)
    }

    /// Alarm when the p99 of the resource's latency metric exceeds
    /// `percent_of_timeout` percent of its timeout. The threshold is in
    /// seconds; the sink scales it to the metric's unit.
    pub fn monitor_duration(
        &mut self,
        percent_of_timeout: f64,
        options: MonitorOptions,
    ) -> Result<&S::Handle, MonitorError> {
        let threshold = duration_threshold(&self.resource, percent_of_timeout)?;
        let metric_name = self.resource.latency_metric().ok_or_else(|| {
            ConfigurationError::MissingLatencyMetric(self.resource.node_path().to_string())
        })?;
        let definition = options.into_definition(
            Aggregation::new(Statistic::Percentile(99.0), ONE_MINUTE),
            None,
        );
        self.attach_request(
            AttachRequest::new(metric_name, &definition)
                .with_computed(ComputedDefaults::threshold(threshold)),
        )
    }

    /// Alarm when invocations exceed `invocations_per_minute`
    pub fn monitor_invocations(
        &mut self,
        invocations_per_minute: f64,
        options: MonitorOptions,
    ) -> Result<&S::Handle, MonitorError> {
        let definition =
            options.into_definition(Aggregation::sum_per_minute(), Some(invocations_per_minute));
        self.attach("Invocations", &definition)
    }
}

/// `percent`% of the resource's timeout, in seconds
pub fn duration_threshold<R>(resource: &R, percent: f64) -> Result<f64, ConfigurationError>
where
    R: MonitoredResource + ?Sized,
{
    let timeout = resource
        .timeout()
        .ok_or_else(|| ConfigurationError::MissingTimeout(resource.node_path().to_string()))?;
    if !percent.is_finite() || percent <= 0.0 {
        return Err(ConfigurationError::InvalidTimeoutPercent(percent));
    }
    Ok(percent * timeout.as_secs_f64() / 100.0)
}
