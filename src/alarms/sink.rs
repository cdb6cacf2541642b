//! Alarm sink capability: where materialized alarms are registered

use crate::error::CollaboratorError;
use crate::metrics::Metric;

use super::config::{ActionTarget, AlarmState, ComparisonOperator, TreatMissingData};

/// Everything needed to create one alarm
#[derive(Debug, Clone, PartialEq)]
pub struct AlarmCreateOptions {
    pub metric: Metric,
    pub threshold: f64,
    pub evaluation_periods: u32,
    pub alarm_description: Option<String>,
    pub comparison_operator: ComparisonOperator,
    pub treat_missing_data: TreatMissingData,
}

/// A created alarm that can receive routed actions
pub trait AlarmHandle {
    /// Deterministic id, e.g. `ErrorsAlarm`
    fn alarm_id(&self) -> &str;

    /// Route `target` to transitions into `state`. Additive.
    fn add_action_for_state(
        &mut self,
        state: AlarmState,
        target: &ActionTarget,
    ) -> Result<(), CollaboratorError>;
}

/// Registers alarms with the owning scope
pub trait AlarmSink {
    type Handle: AlarmHandle;

    fn create_alarm(
        &mut self,
        owner: &str,
        id: &str,
        options: AlarmCreateOptions,
    ) -> Result<Self::Handle, CollaboratorError>;
}
