//! Declarative alarm configuration types

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::metrics::MetricOptions;

/// Alarm state an action can be routed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AlarmState {
    Alarm,
    Ok,
    InsufficientData,
}

impl AlarmState {
    pub const ALL: [AlarmState; 3] = [AlarmState::Alarm, AlarmState::Ok, AlarmState::InsufficientData];
}

impl fmt::Display for AlarmState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlarmState::Alarm => write!(f, "ALARM"),
            AlarmState::Ok => write!(f, "OK"),
            AlarmState::InsufficientData => write!(f, "INSUFFICIENT_DATA"),
        }
    }
}

/// Opaque notification target (topic ARN, webhook id, ...), passed through unmodified
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionTarget(String);

impl ActionTarget {
    pub fn new(target: impl Into<String>) -> Self {
        Self(target.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Action targets keyed by alarm state.
///
/// Keys other than `Alarm`, `Ok` and `InsufficientData` are ignored when
/// deserializing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionMap {
    /// Notified when the alarm fires
    #[serde(rename = "Alarm", default, skip_serializing_if = "Vec::is_empty")]
    pub alarm: Vec<ActionTarget>,
    /// Notified when the alarm recovers
    #[serde(rename = "Ok", default, skip_serializing_if = "Vec::is_empty")]
    pub ok: Vec<ActionTarget>,
    /// Notified when there is not enough data to evaluate
    #[serde(rename = "InsufficientData", default, skip_serializing_if = "Vec::is_empty")]
    pub insufficient_data: Vec<ActionTarget>,
}

impl ActionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a target for a state
    pub fn with(mut self, state: AlarmState, target: ActionTarget) -> Self {
        self.targets_mut(state).push(target);
        self
    }

    /// Targets for one state
    pub fn targets(&self, state: AlarmState) -> &[ActionTarget] {
        match state {
            AlarmState::Alarm => &self.alarm,
            AlarmState::Ok => &self.ok,
            AlarmState::InsufficientData => &self.insufficient_data,
        }
    }

    fn targets_mut(&mut self, state: AlarmState) -> &mut Vec<ActionTarget> {
        match state {
            AlarmState::Alarm => &mut self.alarm,
            AlarmState::Ok => &mut self.ok,
            AlarmState::InsufficientData => &mut self.insufficient_data,
        }
    }

    /// Every (state, target) pair in state order
    pub fn routes(&self) -> impl Iterator<Item = (AlarmState, &ActionTarget)> + '_ {
        AlarmState::ALL
            .into_iter()
            .flat_map(move |state| self.targets(state).iter().map(move |t| (state, t)))
    }

    pub fn is_empty(&self) -> bool {
        self.alarm.is_empty() && self.ok.is_empty() && self.insufficient_data.is_empty()
    }
}

/// Comparison between the metric and the threshold
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComparisonOperator {
    #[default]
    GreaterThanThreshold,
    GreaterThanOrEqualToThreshold,
    LessThanThreshold,
    LessThanOrEqualToThreshold,
}

impl ComparisonOperator {
    /// Word used in generated descriptions
    pub fn describe(&self) -> &'static str {
        match self {
            ComparisonOperator::GreaterThanThreshold => "Over",
            ComparisonOperator::GreaterThanOrEqualToThreshold => "At least",
            ComparisonOperator::LessThanThreshold => "Under",
            ComparisonOperator::LessThanOrEqualToThreshold => "At most",
        }
    }
}

impl std::str::FromStr for ComparisonOperator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GreaterThanThreshold" | ">" => Ok(ComparisonOperator::GreaterThanThreshold),
            "GreaterThanOrEqualToThreshold" | ">=" => {
                Ok(ComparisonOperator::GreaterThanOrEqualToThreshold)
            }
            "LessThanThreshold" | "<" => Ok(ComparisonOperator::LessThanThreshold),
            "LessThanOrEqualToThreshold" | "<=" => Ok(ComparisonOperator::LessThanOrEqualToThreshold),
            other => Err(format!("unknown comparison operator: {}", other)),
        }
    }
}

/// How periods with no datapoints are evaluated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TreatMissingData {
    Breaching,
    NotBreaching,
    Ignore,
    #[default]
    Missing,
}

/// Partial alarm options; unset fields are filled from computed or static defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlarmOptions {
    /// Value the metric is compared against; seconds for time-valued metrics
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
    /// Consecutive breaching periods before the alarm fires
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluation_periods: Option<u32>,
    /// Free text; generated from the operator, threshold and period when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alarm_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparison_operator: Option<ComparisonOperator>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub treat_missing_data: Option<TreatMissingData>,
}

impl AlarmOptions {
    /// Set threshold
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = Some(threshold);
        self
    }

    /// Set evaluation periods
    pub fn with_evaluation_periods(mut self, periods: u32) -> Self {
        self.evaluation_periods = Some(periods);
        self
    }

    /// Set description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.alarm_description = Some(description.into());
        self
    }

    /// Set comparison operator
    pub fn with_comparison(mut self, operator: ComparisonOperator) -> Self {
        self.comparison_operator = Some(operator);
        self
    }
}

/// Declarative intent for one alarm
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlarmDefinition {
    /// Statistic and period overrides
    #[serde(default)]
    pub metric_options: MetricOptions,
    /// Threshold and evaluation overrides
    #[serde(default)]
    pub alarm_options: AlarmOptions,
    /// `None` means no routing; the alarm is still created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actions: Option<ActionMap>,
}

impl AlarmDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set metric options
    pub fn with_metric_options(mut self, options: MetricOptions) -> Self {
        self.metric_options = options;
        self
    }

    /// Set alarm options
    pub fn with_alarm_options(mut self, options: AlarmOptions) -> Self {
        self.alarm_options = options;
        self
    }

    /// Set actions
    pub fn with_actions(mut self, actions: ActionMap) -> Self {
        self.actions = Some(actions);
        self
    }
}

/// Alarm definitions for one resource, keyed by metric name
pub type AlarmDeclarations = BTreeMap<String, AlarmDefinition>;
