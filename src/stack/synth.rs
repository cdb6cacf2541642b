//! Turn a stack definition into an alarm template

use std::collections::BTreeSet;

use crate::error::{ConfigurationError, MonitorError};
use crate::profile::MonitoringProfile;
use crate::resources::{
    self, ApiResource, FunctionResource, MonitoredResource, QueueResource, TableResource,
};
use crate::settings::MonitoringSettings;
use crate::template::AlarmTemplate;

use super::config::{ResourceConfig, ResourceKind, StackConfig};
use super::StackError;

/// Define every resource of `stack` and collect its alarms.
///
/// The first failing resource aborts the pass; no partial template is
/// returned. Resource names must be unique within the stack, whatever their
/// kind.
pub fn synthesize(
    stack: &StackConfig,
    settings: &MonitoringSettings,
) -> Result<AlarmTemplate, StackError> {
    let template = AlarmTemplate::new();
    let mut defined = BTreeSet::new();

    for config in &stack.resources {
        let path = resources::node_path(&stack.name, &config.name);
        if !defined.insert(path.clone()) {
            return Err(StackError::Resource {
                resource: config.name.clone(),
                source: ConfigurationError::DuplicateResource(path).into(),
            });
        }

        let alarms = define_resource(&stack.name, config, &template, settings).map_err(|source| {
            StackError::Resource {
                resource: config.name.clone(),
                source,
            }
        })?;
        tracing::debug!(stack = %stack.name, resource = %config.name, alarms, "Defined resource");
    }

    tracing::info!(
        stack = %stack.name,
        resources = stack.resources.len(),
        alarms = template.len(),
        "Synthesized alarm template"
    );

    Ok(template)
}

fn define_resource(
    scope: &str,
    config: &ResourceConfig,
    template: &AlarmTemplate,
    settings: &MonitoringSettings,
) -> Result<usize, MonitorError> {
    match &config.kind {
        ResourceKind::Function(props) => monitor(
            FunctionResource::define(scope, &config.name, props.clone()),
            config,
            template,
            settings,
        ),
        ResourceKind::Queue => monitor(
            QueueResource::define(scope, &config.name),
            config,
            template,
            settings,
        ),
        ResourceKind::Table => monitor(
            TableResource::define(scope, &config.name),
            config,
            template,
            settings,
        ),
        ResourceKind::Api(props) => monitor(
            ApiResource::define(scope, &config.name, props.clone()),
            config,
            template,
            settings,
        ),
    }
}

/// Declared alarms first, then presets, then bulk notifications
fn monitor<R: MonitoredResource>(
    resource: R,
    config: &ResourceConfig,
    template: &AlarmTemplate,
    settings: &MonitoringSettings,
) -> Result<usize, MonitorError> {
    let mut profile = MonitoringProfile::with_settings(
        resource,
        template.clone(),
        config.alarms.as_ref(),
        settings.clone(),
    )?;

    let monitors = &config.monitors;
    if let Some(m) = &monitors.errors {
        profile.monitor_errors(m.per_minute, m.options.clone())?;
    }
    if let Some(m) = &monitors.throttles {
        profile.monitor_throttles(m.per_minute, m.options.clone())?;
    }
    if let Some(m) = &monitors.duration {
        profile.monitor_duration(m.percent_of_timeout, m.options.clone())?;
    }
    if let Some(m) = &monitors.invocations {
        profile.monitor_invocations(m.per_minute, m.options.clone())?;
    }

    for notification in &config.notify {
        profile.attach_actions_to_all(&notification.targets, notification.state)?;
    }

    Ok(profile.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alarms::AlarmState;

    #[test]
    fn test_synthesize_stack() {
        let stack = StackConfig::from_json(
            r#"{
                "name": "shop",
                "resources": [
                    {
                        "name": "checkout",
                        "kind": "function",
                        "timeout": 5,
                        "deadLetterQueue": "checkout-dlq",
                        "alarms": { "Errors": { "alarmOptions": { "threshold": 5 } } },
                        "monitors": { "duration": { "percentOfTimeout": 80 } },
                        "notify": [ { "state": "Alarm", "targets": ["pager"] } ]
                    },
                    {
                        "name": "orders",
                        "kind": "queue",
                        "alarms": {
                            "ApproximateAgeOfOldestMessage": {
                                "alarmOptions": { "threshold": 300 },
                                "actions": { "Ok": ["recovered"] }
                            }
                        }
                    }
                ]
            }"#,
        )
        .unwrap();

        let template = synthesize(&stack, &MonitoringSettings::default()).unwrap();
        assert_eq!(
            template.logical_ids(),
            vec![
                "ShopCheckoutDurationAlarm",
                "ShopCheckoutErrorsAlarm",
                "ShopOrdersApproximateAgeOfOldestMessageAlarm",
            ]
        );

        let duration = template.find("shop/checkout/DurationAlarm").unwrap().properties;
        assert_eq!(duration.threshold, 4000.0);
        assert_eq!(duration.actions(AlarmState::Alarm).len(), 1);

        let errors = template.find("shop/checkout/ErrorsAlarm").unwrap().properties;
        assert_eq!(errors.threshold, 5.0);
        assert_eq!(errors.alarm_actions[0].as_str(), "pager");

        let age = template
            .find("shop/orders/ApproximateAgeOfOldestMessageAlarm")
            .unwrap()
            .properties;
        assert_eq!(age.namespace, "AWS/SQS");
        assert_eq!(age.threshold, 300.0);
        assert_eq!(age.statistic.as_deref(), Some("Maximum"));
        assert_eq!(age.ok_actions[0].as_str(), "recovered");
        assert!(age.alarm_actions.is_empty());
    }

    #[test]
    fn test_synthesize_fails_without_timeout() {
        let stack = StackConfig::from_json(
            r#"{
                "name": "shop",
                "resources": [
                    { "name": "worker", "kind": "function",
                      "monitors": { "duration": { "percentOfTimeout": 80 } } }
                ]
            }"#,
        )
        .unwrap();

        let err = synthesize(&stack, &MonitoringSettings::default()).unwrap_err();
        match err {
            StackError::Resource { resource, source } => {
                assert_eq!(resource, "worker");
                assert_eq!(
                    source,
                    MonitorError::Configuration(ConfigurationError::MissingTimeout(
                        "shop/worker".to_string()
                    ))
                );
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_synthesize_demo_stack() {
        let stack =
            StackConfig::load(concat!(env!("CARGO_MANIFEST_DIR"), "/demos/shop.json")).unwrap();
        let template = synthesize(&stack, &MonitoringSettings::default()).unwrap();
        assert_eq!(template.len(), 7);

        let ops = "arn:aws:sns:eu-west-1:123456789012:ops";
        for id in template.logical_ids() {
            let resource = template.get(&id).unwrap();
            assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
            if resource.metadata.path.starts_with("shop/checkout/") {
                assert_eq!(resource.properties.insufficient_data_actions[0].as_str(), ops);
            }
        }

        let duration = template.get("ShopCheckoutDurationAlarm").unwrap().properties;
        assert_eq!(duration.threshold, 4000.0);

        let latency = template.get("ShopStorefrontLatencyAlarm").unwrap().properties;
        assert_eq!(latency.extended_statistic.as_deref(), Some("p99"));
        assert_eq!(latency.dimensions[0].name, "ApiName");
        assert_eq!(latency.threshold, 2000.0);
    }

    #[test]
    fn test_synthesize_rejects_repeated_name_across_kinds() {
        let stack = StackConfig::from_json(
            r#"{
                "name": "shop",
                "resources": [
                    { "name": "checkout", "kind": "function",
                      "alarms": { "Errors": {} } },
                    { "name": "checkout", "kind": "queue",
                      "alarms": { "NumberOfMessagesSent": { "alarmOptions": { "threshold": 10 } } } }
                ]
            }"#,
        )
        .unwrap();

        let err = synthesize(&stack, &MonitoringSettings::default()).unwrap_err();
        match err {
            StackError::Resource { resource, source } => {
                assert_eq!(resource, "checkout");
                assert_eq!(
                    source,
                    MonitorError::Configuration(ConfigurationError::DuplicateResource(
                        "shop/checkout".to_string()
                    ))
                );
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_synthesize_rejects_repeated_function() {
        let stack = StackConfig::from_json(
            r#"{
                "name": "shop",
                "resources": [
                    { "name": "checkout", "kind": "function", "alarms": { "Errors": {} } },
                    { "name": "checkout", "kind": "function", "alarms": { "Errors": {} } }
                ]
            }"#,
        )
        .unwrap();

        let err = synthesize(&stack, &MonitoringSettings::default()).unwrap_err();
        assert!(matches!(
            err,
            StackError::Resource {
                source: MonitorError::Configuration(ConfigurationError::DuplicateResource(_)),
                ..
            }
        ));
    }

    #[test]
    fn test_synthesize_duration_monitor_on_api() {
        let stack = StackConfig::from_json(
            r#"{
                "name": "shop",
                "resources": [
                    { "name": "storefront", "kind": "api", "timeout": 29,
                      "monitors": { "duration": { "percentOfTimeout": 80 } } }
                ]
            }"#,
        )
        .unwrap();

        let template = synthesize(&stack, &MonitoringSettings::default()).unwrap();
        assert_eq!(template.logical_ids(), vec!["ShopStorefrontIntegrationLatencyAlarm"]);
        let props = template
            .get("ShopStorefrontIntegrationLatencyAlarm")
            .unwrap()
            .properties;
        assert_eq!(props.namespace, "AWS/ApiGateway");
        assert!((props.threshold - 23_200.0).abs() < 1e-6);
    }

    #[test]
    fn test_synthesize_empty_stack() {
        let stack = StackConfig::from_json(r#"{"name": "empty"}"#).unwrap();
        let template = synthesize(&stack, &MonitoringSettings::default()).unwrap();
        assert!(template.is_empty());
    }
}
