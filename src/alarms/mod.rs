//! Alarm attachment: declarations, default resolution, sinks and the
//! per-resource registry

pub mod attacher;
pub mod config;
pub mod merge;
pub mod registry;
pub mod sink;

#[cfg(test)]
pub(crate) mod testing;

pub use attacher::{alarm_id, attach_alarm, route_actions, validate_metric_name, AttachRequest};
pub use config::{
    ActionMap, ActionTarget, AlarmDeclarations, AlarmDefinition, AlarmOptions, AlarmState,
    ComparisonOperator, TreatMissingData,
};
pub use merge::{resolve, resolve_alarm_options, ComputedDefaults, ResolvedAlarmOptions};
pub use registry::AlarmRegistry;
pub use sink::{AlarmCreateOptions, AlarmHandle, AlarmSink};
