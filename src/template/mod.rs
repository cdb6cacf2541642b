//! In-memory alarm template.
//!
//! Collects every alarm a definition pass creates as a CloudFormation-style
//! `AWS::CloudWatch::Alarm` resource. Resources are keyed by an alphanumeric
//! logical id derived from `<owner>/<alarm id>`; the path itself is kept in
//! the resource metadata. Handles share their entry with the template, so
//! actions routed after creation show up in the rendered output.
//!
//! Thresholds arrive in the caller's units (seconds for time-valued metrics)
//! and are written in the unit the metric is published in.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;

use crate::alarms::{
    ActionTarget, AlarmCreateOptions, AlarmHandle, AlarmSink, AlarmState, ComparisonOperator,
    TreatMissingData,
};
use crate::error::CollaboratorError;

const ALARM_RESOURCE_TYPE: &str = "AWS::CloudWatch::Alarm";

/// One metric dimension
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Dimension {
    pub name: String,
    pub value: String,
}

/// Logical id for a template path: each path segment split on
/// non-alphanumeric characters, capitalized and concatenated.
///
/// `shop/checkout/ErrorsAlarm` becomes `ShopCheckoutErrorsAlarm`.
pub fn logical_id(path: &str) -> String {
    path.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

/// Alarm resource properties
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AlarmProperties {
    pub alarm_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alarm_description: Option<String>,
    pub namespace: String,
    pub metric_name: String,
    pub dimensions: Vec<Dimension>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extended_statistic: Option<String>,
    pub period: u64,
    pub threshold: f64,
    pub evaluation_periods: u32,
    pub comparison_operator: ComparisonOperator,
    pub treat_missing_data: TreatMissingData,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub alarm_actions: Vec<ActionTarget>,
    #[serde(rename = "OKActions", skip_serializing_if = "Vec::is_empty")]
    pub ok_actions: Vec<ActionTarget>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub insufficient_data_actions: Vec<ActionTarget>,
}

impl AlarmProperties {
    fn from_options(alarm_name: String, options: AlarmCreateOptions) -> Self {
        let metric = options.metric;
        let (statistic, extended_statistic) = if metric.statistic.is_percentile() {
            (None, Some(metric.statistic.to_string()))
        } else {
            (Some(metric.statistic.to_string()), None)
        };

        Self {
            alarm_name,
            alarm_description: options.alarm_description,
            namespace: metric.namespace,
            metric_name: metric.metric_name,
            dimensions: metric
                .dimensions
                .into_iter()
                .map(|(name, value)| Dimension { name, value })
                .collect(),
            statistic,
            extended_statistic,
            period: metric.period.as_secs(),
            threshold: metric.unit.from_seconds(options.threshold),
            evaluation_periods: options.evaluation_periods,
            comparison_operator: options.comparison_operator,
            treat_missing_data: options.treat_missing_data,
            alarm_actions: Vec::new(),
            ok_actions: Vec::new(),
            insufficient_data_actions: Vec::new(),
        }
    }

    /// Actions routed to `state`
    pub fn actions(&self, state: AlarmState) -> &[ActionTarget] {
        match state {
            AlarmState::Alarm => &self.alarm_actions,
            AlarmState::Ok => &self.ok_actions,
            AlarmState::InsufficientData => &self.insufficient_data_actions,
        }
    }

    fn actions_mut(&mut self, state: AlarmState) -> &mut Vec<ActionTarget> {
        match state {
            AlarmState::Alarm => &mut self.alarm_actions,
            AlarmState::Ok => &mut self.ok_actions,
            AlarmState::InsufficientData => &mut self.insufficient_data_actions,
        }
    }
}

/// Where an alarm came from
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AlarmMetadata {
    /// `<owner>/<alarm id>`
    pub path: String,
}

/// A template resource entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlarmResource {
    #[serde(rename = "Type")]
    pub resource_type: &'static str,
    #[serde(rename = "Metadata")]
    pub metadata: AlarmMetadata,
    #[serde(rename = "Properties")]
    pub properties: AlarmProperties,
}

type Entry = Arc<RwLock<AlarmResource>>;

/// Shared, cloneable alarm template. Cloning yields another view of the same
/// document.
#[derive(Debug, Clone, Default)]
pub struct AlarmTemplate {
    resources: Arc<RwLock<BTreeMap<String, Entry>>>,
}

impl AlarmTemplate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.resources.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.read().is_empty()
    }

    /// Logical ids in sorted order
    pub fn logical_ids(&self) -> Vec<String> {
        self.resources.read().keys().cloned().collect()
    }

    /// Snapshot of one resource by logical id
    pub fn get(&self, logical_id: &str) -> Option<AlarmResource> {
        self.resources.read().get(logical_id).map(|e| e.read().clone())
    }

    /// Snapshot of one resource by `<owner>/<alarm id>` path
    pub fn find(&self, path: &str) -> Option<AlarmResource> {
        self.get(&logical_id(path))
            .filter(|resource| resource.metadata.path == path)
    }

    /// Render as a JSON value: `{"Resources": {logical id: resource}}`
    pub fn to_value(&self) -> serde_json::Value {
        let resources: BTreeMap<String, AlarmResource> = self
            .resources
            .read()
            .iter()
            .map(|(id, entry)| (id.clone(), entry.read().clone()))
            .collect();
        serde_json::json!({ "Resources": resources })
    }

    /// Render as pretty-printed JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.to_value())
    }
}

impl AlarmSink for AlarmTemplate {
    type Handle = TemplateAlarm;

    fn create_alarm(
        &mut self,
        owner: &str,
        id: &str,
        options: AlarmCreateOptions,
    ) -> Result<TemplateAlarm, CollaboratorError> {
        let path = format!("{}/{}", owner, id);
        let key = logical_id(&path);
        let mut resources = self.resources.write();
        if let Some(existing) = resources.get(&key) {
            return Err(CollaboratorError::Sink(format!(
                "logical id {} for {} is already used by {}",
                key,
                path,
                existing.read().metadata.path
            )));
        }

        let alarm_name = path.replace('/', "-");
        let entry = Arc::new(RwLock::new(AlarmResource {
            resource_type: ALARM_RESOURCE_TYPE,
            metadata: AlarmMetadata { path: path.clone() },
            properties: AlarmProperties::from_options(alarm_name, options),
        }));
        resources.insert(key, Arc::clone(&entry));

        Ok(TemplateAlarm {
            id: id.to_string(),
            path,
            entry,
        })
    }
}

/// Handle to an alarm stored in an [`AlarmTemplate`]
#[derive(Debug, Clone)]
pub struct TemplateAlarm {
    id: String,
    path: String,
    entry: Entry,
}

impl TemplateAlarm {
    /// Template path, `<owner>/<alarm id>`
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Snapshot of the alarm's current properties
    pub fn properties(&self) -> AlarmProperties {
        self.entry.read().properties.clone()
    }

    pub fn actions(&self, state: AlarmState) -> Vec<ActionTarget> {
        self.entry.read().properties.actions(state).to_vec()
    }
}

impl AlarmHandle for TemplateAlarm {
    fn alarm_id(&self) -> &str {
        &self.id
    }

    fn add_action_for_state(
        &mut self,
        state: AlarmState,
        target: &ActionTarget,
    ) -> Result<(), CollaboratorError> {
        let mut entry = self.entry.write();
        let actions = entry.properties.actions_mut(state);
        if !actions.contains(target) {
            actions.push(target.clone());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{Aggregation, Metric, MetricUnit, Statistic};
    use std::time::Duration;

    fn options(statistic: Statistic) -> AlarmCreateOptions {
        AlarmCreateOptions {
            metric: Metric::new(
                "AWS/Lambda",
                "Errors",
                Aggregation::new(statistic, Duration::from_secs(60)),
            )
            .with_dimension("FunctionName", "checkout"),
            threshold: 5.0,
            evaluation_periods: 3,
            alarm_description: Some("Over 5 Errors per 1 minute".to_string()),
            comparison_operator: ComparisonOperator::GreaterThanThreshold,
            treat_missing_data: TreatMissingData::Missing,
        }
    }

    #[test]
    fn test_create_alarm_records_resource() {
        let mut template = AlarmTemplate::new();
        let handle = template
            .create_alarm("shop/checkout", "ErrorsAlarm", options(Statistic::Sum))
            .unwrap();

        assert_eq!(handle.alarm_id(), "ErrorsAlarm");
        assert_eq!(handle.path(), "shop/checkout/ErrorsAlarm");
        assert_eq!(template.logical_ids(), vec!["ShopCheckoutErrorsAlarm"]);

        let resource = template.get("ShopCheckoutErrorsAlarm").unwrap();
        assert_eq!(resource.metadata.path, "shop/checkout/ErrorsAlarm");
        assert_eq!(template.find("shop/checkout/ErrorsAlarm"), Some(resource.clone()));
        let props = resource.properties;
        assert_eq!(props.alarm_name, "shop-checkout-ErrorsAlarm");
        assert_eq!(props.statistic.as_deref(), Some("Sum"));
        assert_eq!(props.extended_statistic, None);
        assert_eq!(props.period, 60);
        assert_eq!(props.dimensions[0].value, "checkout");
    }

    #[test]
    fn test_percentile_uses_extended_statistic() {
        let mut template = AlarmTemplate::new();
        let handle = template
            .create_alarm("shop/checkout", "DurationAlarm", options(Statistic::Percentile(99.0)))
            .unwrap();
        let props = handle.properties();
        assert_eq!(props.statistic, None);
        assert_eq!(props.extended_statistic.as_deref(), Some("p99"));
    }

    #[test]
    fn test_logical_id_is_alphanumeric() {
        assert_eq!(logical_id("shop/checkout/ErrorsAlarm"), "ShopCheckoutErrorsAlarm");
        assert_eq!(logical_id("shop/order-api/5XXErrorAlarm"), "ShopOrderApi5XXErrorAlarm");
        assert_eq!(logical_id("a//b.c"), "ABC");
        assert!(logical_id("my_stack/fn:1/ErrorsAlarm")
            .chars()
            .all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_threshold_in_native_unit() {
        let mut template = AlarmTemplate::new();
        let mut opts = options(Statistic::Percentile(99.0));
        opts.metric.metric_name = "Duration".to_string();
        opts.metric = opts.metric.with_unit(MetricUnit::Milliseconds);
        opts.threshold = 4.0;

        let handle = template.create_alarm("shop/checkout", "DurationAlarm", opts).unwrap();
        assert_eq!(handle.properties().threshold, 4000.0);

        let mut opts = options(Statistic::Maximum);
        opts.metric = opts.metric.with_unit(MetricUnit::Seconds);
        opts.threshold = 300.0;
        let handle = template.create_alarm("shop/orders", "AgeAlarm", opts).unwrap();
        assert_eq!(handle.properties().threshold, 300.0);
    }

    #[test]
    fn test_colliding_logical_id_is_sink_error() {
        let mut template = AlarmTemplate::new();
        template
            .create_alarm("shop/order-api", "ErrorsAlarm", options(Statistic::Sum))
            .unwrap();
        let err = template
            .create_alarm("shop/orderApi", "ErrorsAlarm", options(Statistic::Sum))
            .unwrap_err();
        assert!(matches!(err, CollaboratorError::Sink(_)));
        assert_eq!(template.find("shop/orderApi/ErrorsAlarm"), None);
        assert!(template.find("shop/order-api/ErrorsAlarm").is_some());
    }

    #[test]
    fn test_duplicate_path_is_sink_error() {
        let mut template = AlarmTemplate::new();
        template
            .create_alarm("shop/checkout", "ErrorsAlarm", options(Statistic::Sum))
            .unwrap();
        let err = template
            .create_alarm("shop/checkout", "ErrorsAlarm", options(Statistic::Sum))
            .unwrap_err();
        assert!(matches!(err, CollaboratorError::Sink(_)));
        assert_eq!(template.len(), 1);
    }

    #[test]
    fn test_actions_visible_through_template() {
        let mut template = AlarmTemplate::new();
        let mut handle = template
            .create_alarm("shop/checkout", "ErrorsAlarm", options(Statistic::Sum))
            .unwrap();

        let topic = ActionTarget::new("arn:aws:sns:eu-west-1:123:alerts");
        handle.add_action_for_state(AlarmState::Alarm, &topic).unwrap();
        handle.add_action_for_state(AlarmState::Alarm, &topic).unwrap();

        let props = template.get("ShopCheckoutErrorsAlarm").unwrap().properties;
        assert_eq!(props.alarm_actions, vec![topic]);
        assert!(props.ok_actions.is_empty());
    }

    #[test]
    fn test_render_json() {
        let mut template = AlarmTemplate::new();
        let mut handle = template
            .create_alarm("shop/checkout", "ErrorsAlarm", options(Statistic::Sum))
            .unwrap();
        handle
            .add_action_for_state(AlarmState::Ok, &ActionTarget::new("ok-topic"))
            .unwrap();

        let value = template.to_value();
        let alarm = &value["Resources"]["ShopCheckoutErrorsAlarm"];
        assert_eq!(alarm["Type"], "AWS::CloudWatch::Alarm");
        assert_eq!(alarm["Metadata"]["Path"], "shop/checkout/ErrorsAlarm");
        assert_eq!(alarm["Properties"]["Threshold"], 5.0);
        assert_eq!(alarm["Properties"]["ComparisonOperator"], "GreaterThanThreshold");
        assert_eq!(alarm["Properties"]["TreatMissingData"], "missing");
        assert_eq!(alarm["Properties"]["OKActions"][0], "ok-topic");
        assert!(alarm["Properties"].get("AlarmActions").is_none());
        assert!(template.to_json().unwrap().contains("ErrorsAlarm"));
    }
}
