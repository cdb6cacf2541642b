//! Attach one alarm to one metric of a resource

use crate::error::{ConfigurationError, MonitorError};
use crate::metrics::{metric_defaults, MetricSource};
use crate::settings::MonitoringSettings;

use super::config::{ActionMap, AlarmDefinition};
use super::merge::{resolve_alarm_options, ComputedDefaults};
use super::registry::AlarmRegistry;
use super::sink::{AlarmCreateOptions, AlarmHandle, AlarmSink};

const MAX_METRIC_NAME_LEN: usize = 255;

/// One alarm to attach
#[derive(Debug, Clone, Copy)]
pub struct AttachRequest<'a> {
    /// Metric the alarm watches; also names the alarm
    pub metric_name: &'a str,
    pub definition: &'a AlarmDefinition,
    /// Defaults derived from the resource, e.g. a timeout-based threshold
    pub computed: ComputedDefaults,
}

impl<'a> AttachRequest<'a> {
    pub fn new(metric_name: &'a str, definition: &'a AlarmDefinition) -> Self {
        Self {
            metric_name,
            definition,
            computed: ComputedDefaults::default(),
        }
    }

    pub fn with_computed(mut self, computed: ComputedDefaults) -> Self {
        self.computed = computed;
        self
    }
}

/// Deterministic alarm id for a metric
pub fn alarm_id(metric_name: &str) -> String {
    format!("{}Alarm", metric_name)
}

/// Check that a metric name is usable as an alarm identity
pub fn validate_metric_name(metric_name: &str) -> Result<(), ConfigurationError> {
    if metric_name.is_empty() {
        return Err(ConfigurationError::EmptyMetricName);
    }

    let valid = regex::Regex::new(r"^[A-Za-z0-9._\-/#:]+$")
        .map(|re| re.is_match(metric_name))
        .unwrap_or(false);
    if !valid || metric_name.len() > MAX_METRIC_NAME_LEN {
        return Err(ConfigurationError::InvalidMetricName(metric_name.to_string()));
    }

    Ok(())
}

/// Create one alarm for `request.metric_name`, route its declared actions and
/// add it to `registry`.
///
/// Configuration is fully resolved before any collaborator is called, so a
/// configuration error leaves both the sink and the registry untouched.
pub fn attach_alarm<'r, M, S>(
    source: &M,
    sink: &mut S,
    registry: &'r mut AlarmRegistry<S::Handle>,
    settings: &MonitoringSettings,
    request: AttachRequest<'_>,
) -> Result<&'r S::Handle, MonitorError>
where
    M: MetricSource + ?Sized,
    S: AlarmSink,
{
    let metric_name = request.metric_name;
    validate_metric_name(metric_name)?;

    let id = alarm_id(metric_name);
    if registry.contains(&id) {
        return Err(ConfigurationError::DuplicateAlarm {
            owner: registry.owner().to_string(),
            alarm_id: id,
        }
        .into());
    }

    let defaults = metric_defaults(metric_name, settings.default_period);
    let aggregation = request
        .definition
        .metric_options
        .merge_over(defaults.aggregation);
    let resolved = resolve_alarm_options(
        metric_name,
        &request.definition.alarm_options,
        request.computed,
        &defaults,
        aggregation,
        settings,
    )?;

    let metric = source.metric(metric_name, aggregation)?;
    let options = AlarmCreateOptions {
        metric,
        threshold: resolved.threshold,
        evaluation_periods: resolved.evaluation_periods,
        alarm_description: Some(resolved.alarm_description),
        comparison_operator: resolved.comparison_operator,
        treat_missing_data: resolved.treat_missing_data,
    };

    let mut handle = sink.create_alarm(registry.owner(), &id, options)?;
    tracing::debug!(
        owner = %registry.owner(),
        alarm_id = %id,
        metric = %metric_name,
        statistic = %aggregation.statistic,
        threshold = resolved.threshold,
        evaluation_periods = resolved.evaluation_periods,
        "Created alarm"
    );

    if let Some(actions) = &request.definition.actions {
        let routed = route_actions(&mut handle, actions)?;
        tracing::debug!(alarm_id = %id, routed, "Routed declared actions");
    }

    Ok(registry.insert(handle)?)
}

/// Dispatch each declared action to its state's routing call
pub fn route_actions<H: AlarmHandle>(
    handle: &mut H,
    actions: &ActionMap,
) -> Result<usize, MonitorError> {
    let mut routed = 0;
    for (state, target) in actions.routes() {
        handle.add_action_for_state(state, target)?;
        tracing::debug!(
            alarm_id = %handle.alarm_id(),
            state = %state,
            target = %target,
            "Routed alarm action"
        );
        routed += 1;
    }
    Ok(routed)
}
