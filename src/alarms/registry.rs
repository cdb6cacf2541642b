//! Append-only registry of the alarms created for one resource

use std::collections::btree_map::{BTreeMap, Entry};

use crate::error::{CollaboratorError, ConfigurationError};

use super::config::{ActionTarget, AlarmState};
use super::sink::AlarmHandle;

/// Alarms owned by one resource, keyed by alarm id.
///
/// Entries are never removed or replaced.
#[derive(Debug)]
pub struct AlarmRegistry<H> {
    owner: String,
    alarms: BTreeMap<String, H>,
}

impl<H: AlarmHandle> AlarmRegistry<H> {
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            alarms: BTreeMap::new(),
        }
    }

    /// Path of the owning resource
    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn contains(&self, alarm_id: &str) -> bool {
        self.alarms.contains_key(alarm_id)
    }

    pub fn get(&self, alarm_id: &str) -> Option<&H> {
        self.alarms.get(alarm_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &H> {
        self.alarms.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.alarms.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.alarms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alarms.is_empty()
    }

    /// Add a newly created alarm
    pub(crate) fn insert(&mut self, handle: H) -> Result<&H, ConfigurationError> {
        match self.alarms.entry(handle.alarm_id().to_string()) {
            Entry::Occupied(e) => Err(ConfigurationError::DuplicateAlarm {
                owner: self.owner.clone(),
                alarm_id: e.key().clone(),
            }),
            Entry::Vacant(e) => Ok(e.insert(handle)),
        }
    }

    /// Route every target to `state` on every registered alarm.
    ///
    /// Returns the number of routing calls made.
    pub fn broadcast(
        &mut self,
        targets: &[ActionTarget],
        state: AlarmState,
    ) -> Result<usize, CollaboratorError> {
        let mut routed = 0;
        for handle in self.alarms.values_mut() {
            for target in targets {
                handle.add_action_for_state(state, target)?;
                routed += 1;
            }
        }

        tracing::debug!(
            owner = %self.owner,
            state = %state,
            alarms = self.alarms.len(),
            routed,
            "Broadcast actions to registered alarms"
        );

        Ok(routed)
    }
}
