//! Per-resource monitoring profiles.
//!
//! A [`MonitoringProfile`] owns a resource together with the alarms declared
//! for it. Every declaration is attached when the profile is built; afterwards
//! the registry only grows through explicit `attach`/preset calls, and
//! actions can be broadcast to every alarm already created.

pub mod presets;

use crate::alarms::{
    attach_alarm, ActionTarget, AlarmDeclarations, AlarmDefinition, AlarmRegistry, AlarmSink,
    AlarmState, AttachRequest,
};
use crate::error::MonitorError;
use crate::resources::MonitoredResource;
use crate::settings::MonitoringSettings;

pub use presets::MonitorOptions;

/// A resource and the alarms attached to it
pub struct MonitoringProfile<R, S: AlarmSink> {
    resource: R,
    sink: S,
    settings: MonitoringSettings,
    registry: AlarmRegistry<S::Handle>,
}

impl<R, S> MonitoringProfile<R, S>
where
    R: MonitoredResource,
    S: AlarmSink,
{
    /// Build a profile and attach every declared alarm with default settings
    pub fn new(
        resource: R,
        sink: S,
        declarations: Option<&AlarmDeclarations>,
    ) -> Result<Self, MonitorError> {
        Self::with_settings(resource, sink, declarations, MonitoringSettings::default())
    }

    /// Build a profile and attach every declared alarm.
    ///
    /// Fails on the first declaration that cannot be attached; nothing of
    /// the profile survives the failure.
    pub fn with_settings(
        resource: R,
        sink: S,
        declarations: Option<&AlarmDeclarations>,
        settings: MonitoringSettings,
    ) -> Result<Self, MonitorError> {
        let registry = AlarmRegistry::new(resource.node_path());
        let mut profile = Self {
            resource,
            sink,
            settings,
            registry,
        };

        // Each entry is attached independently; an entry without actions
        // only skips routing for itself.
        for (metric_name, definition) in declarations.into_iter().flatten() {
            profile.attach(metric_name, definition)?;
        }

        tracing::info!(
            owner = %profile.registry.owner(),
            alarms = profile.registry.len(),
            "Monitoring profile populated"
        );

        Ok(profile)
    }

    /// Attach one more alarm. A metric that already has an alarm on this
    /// resource is a configuration error.
    pub fn attach(
        &mut self,
        metric_name: &str,
        definition: &AlarmDefinition,
    ) -> Result<&S::Handle, MonitorError> {
        self.attach_request(AttachRequest::new(metric_name, definition))
    }

    pub(crate) fn attach_request(
        &mut self,
        request: AttachRequest<'_>,
    ) -> Result<&S::Handle, MonitorError> {
        attach_alarm(
            &self.resource,
            &mut self.sink,
            &mut self.registry,
            &self.settings,
            request,
        )
    }

    /// Route `targets` to `state` on every alarm created so far.
    ///
    /// Additive: earlier routes are kept and membership never changes.
    pub fn attach_actions_to_all(
        &mut self,
        targets: &[ActionTarget],
        state: AlarmState,
    ) -> Result<usize, MonitorError> {
        Ok(self.registry.broadcast(targets, state)?)
    }

    pub fn alarms(&self) -> &AlarmRegistry<S::Handle> {
        &self.registry
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }
}
