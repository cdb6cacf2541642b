//! Test doubles for the metric source and alarm sink capabilities

use crate::error::CollaboratorError;
use crate::metrics::{Aggregation, Metric, MetricSource};

use super::config::{ActionTarget, AlarmState};
use super::sink::{AlarmCreateOptions, AlarmHandle, AlarmSink};

#[derive(Debug, Clone)]
pub struct RecordingHandle {
    pub id: String,
    pub options: Option<AlarmCreateOptions>,
    pub routes: Vec<(AlarmState, ActionTarget)>,
}

impl RecordingHandle {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            options: None,
            routes: Vec::new(),
        }
    }

    pub fn targets(&self, state: AlarmState) -> Vec<ActionTarget> {
        self.routes
            .iter()
            .filter(|(s, _)| *s == state)
            .map(|(_, t)| t.clone())
            .collect()
    }
}

impl AlarmHandle for RecordingHandle {
    fn alarm_id(&self) -> &str {
        &self.id
    }

    fn add_action_for_state(
        &mut self,
        state: AlarmState,
        target: &ActionTarget,
    ) -> Result<(), CollaboratorError> {
        self.routes.push((state, target.clone()));
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct RecordingSink {
    pub created: Vec<String>,
    pub fail: bool,
}

impl AlarmSink for RecordingSink {
    type Handle = RecordingHandle;

    fn create_alarm(
        &mut self,
        owner: &str,
        id: &str,
        options: AlarmCreateOptions,
    ) -> Result<RecordingHandle, CollaboratorError> {
        if self.fail {
            return Err(CollaboratorError::Sink("sink unavailable".to_string()));
        }
        self.created.push(format!("{}/{}", owner, id));
        let mut handle = RecordingHandle::new(id);
        handle.options = Some(options);
        Ok(handle)
    }
}

#[derive(Debug, Default)]
pub struct StaticSource {
    pub fail: bool,
}

impl MetricSource for StaticSource {
    fn metric(&self, name: &str, aggregation: Aggregation) -> Result<Metric, CollaboratorError> {
        if self.fail {
            return Err(CollaboratorError::MetricSource(format!("no metric {}", name)));
        }
        Ok(Metric::new("Test", name, aggregation).with_dimension("Resource", "fn"))
    }
}
