//! alarmkit: declarative health-monitoring alarms for infrastructure resources
//!
//! Alarms are attached to a resource at the moment it is defined, from a
//! plain declarative map of metric name to alarm definition. Each declaration
//! becomes exactly one alarm bound to the resource's metric, with thresholds,
//! evaluation windows and notification routing resolved up front.
//!
//! # Features
//!
//! - **Declarative alarms**: partial metric/alarm options merged over per-metric defaults
//! - **Derived thresholds**: duration alarms computed from a resource's timeout
//! - **Action routing**: per-state targets for `Alarm`, `Ok` and `InsufficientData`
//! - **Alarm registry**: append-only per resource, with bulk action broadcast
//! - **Templates**: CloudFormation-style JSON output of every created alarm
//!
//! # Example
//!
//! ```no_run
//! use alarmkit::alarms::{ActionTarget, AlarmDeclarations, AlarmDefinition, AlarmOptions, AlarmState};
//! use alarmkit::profile::{MonitorOptions, MonitoringProfile};
//! use alarmkit::resources::{FunctionProps, FunctionResource};
//! use alarmkit::template::AlarmTemplate;
//! use std::time::Duration;
//!
//! let function = FunctionResource::define(
//!     "shop",
//!     "checkout",
//!     FunctionProps::default().with_timeout(Duration::from_secs(5)),
//! );
//!
//! let mut declarations = AlarmDeclarations::new();
//! declarations.insert(
//!     "Errors".to_string(),
//!     AlarmDefinition::new().with_alarm_options(AlarmOptions::default().with_threshold(5.0)),
//! );
//!
//! let template = AlarmTemplate::new();
//! let mut profile = MonitoringProfile::new(function, template.clone(), Some(&declarations)).unwrap();
//! profile.monitor_duration(80.0, MonitorOptions::default()).unwrap();
//! profile
//!     .attach_actions_to_all(&[ActionTarget::new("arn:aws:sns:eu-west-1:123456789012:oncall")], AlarmState::Alarm)
//!     .unwrap();
//!
//! println!("{}", template.to_json().unwrap());
//! ```

pub mod alarms;
pub mod error;
pub mod metrics;
pub mod profile;
pub mod resources;
pub mod settings;
pub mod stack;
pub mod template;

// Re-export commonly used types
pub use alarms::{ActionMap, ActionTarget, AlarmDeclarations, AlarmDefinition, AlarmOptions, AlarmState};
pub use error::{CollaboratorError, ConfigurationError, MonitorError};
pub use metrics::{Metric, MetricOptions, MetricSource, Statistic};
pub use profile::{MonitorOptions, MonitoringProfile};
pub use resources::MonitoredResource;
pub use settings::MonitoringSettings;
pub use template::AlarmTemplate;
