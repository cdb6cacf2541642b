//! Metric types and the metric source capability

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::CollaboratorError;

/// Aggregation statistic applied to a metric over one period
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Statistic {
    Sum,
    Average,
    Minimum,
    Maximum,
    SampleCount,
    /// Percentile in (0, 100], rendered as `p99`, `p99.9`, ...
    Percentile(f64),
}

impl Statistic {
    /// Whether this is an extended (percentile) statistic
    pub fn is_percentile(&self) -> bool {
        matches!(self, Statistic::Percentile(_))
    }
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statistic::Sum => write!(f, "Sum"),
            Statistic::Average => write!(f, "Average"),
            Statistic::Minimum => write!(f, "Minimum"),
            Statistic::Maximum => write!(f, "Maximum"),
            Statistic::SampleCount => write!(f, "SampleCount"),
            Statistic::Percentile(p) => write!(f, "p{}", p),
        }
    }
}

impl FromStr for Statistic {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Sum" | "sum" => Ok(Statistic::Sum),
            "Average" | "avg" | "average" => Ok(Statistic::Average),
            "Minimum" | "min" | "minimum" => Ok(Statistic::Minimum),
            "Maximum" | "max" | "maximum" => Ok(Statistic::Maximum),
            "SampleCount" | "n" => Ok(Statistic::SampleCount),
            other => {
                let pct = other
                    .strip_prefix('p')
                    .or_else(|| other.strip_prefix('P'))
                    .and_then(|p| p.parse::<f64>().ok())
                    .ok_or_else(|| format!("unknown statistic: {}", other))?;
                if pct > 0.0 && pct <= 100.0 {
                    Ok(Statistic::Percentile(pct))
                } else {
                    Err(format!("percentile out of range: {}", other))
                }
            }
        }
    }
}

impl TryFrom<String> for Statistic {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Statistic> for String {
    fn from(stat: Statistic) -> Self {
        stat.to_string()
    }
}

/// Fully resolved aggregation: statistic plus sampling period
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aggregation {
    pub statistic: Statistic,
    #[serde(with = "duration_secs")]
    pub period: Duration,
}

impl Aggregation {
    pub fn new(statistic: Statistic, period: Duration) -> Self {
        Self { statistic, period }
    }

    /// Sum over one minute
    pub fn sum_per_minute() -> Self {
        Self::new(Statistic::Sum, Duration::from_secs(60))
    }
}

/// Unit a metric is published in.
///
/// Thresholds on time-valued metrics are always declared in seconds; the unit
/// says how to express them in the metric's own scale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MetricUnit {
    #[default]
    Count,
    Seconds,
    Milliseconds,
}

impl MetricUnit {
    /// Convert a threshold declared in seconds into this unit
    pub fn from_seconds(&self, value: f64) -> f64 {
        match self {
            MetricUnit::Milliseconds => value * 1000.0,
            MetricUnit::Count | MetricUnit::Seconds => value,
        }
    }
}

/// Partial aggregation options supplied by a declaration
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statistic: Option<Statistic>,
    #[serde(default, with = "duration_secs::option", skip_serializing_if = "Option::is_none")]
    pub period: Option<Duration>,
}

impl MetricOptions {
    /// Set the aggregation statistic
    pub fn with_statistic(mut self, statistic: Statistic) -> Self {
        self.statistic = Some(statistic);
        self
    }

    /// Set the sampling period
    pub fn with_period(mut self, period: Duration) -> Self {
        self.period = Some(period);
        self
    }

    /// Overlay these options on top of a default aggregation
    pub fn merge_over(&self, defaults: Aggregation) -> Aggregation {
        Aggregation {
            statistic: self.statistic.unwrap_or(defaults.statistic),
            period: self.period.unwrap_or(defaults.period),
        }
    }
}

/// A named, time-aggregated signal produced by a resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub namespace: String,
    pub metric_name: String,
    pub dimensions: BTreeMap<String, String>,
    pub statistic: Statistic,
    #[serde(with = "duration_secs")]
    pub period: Duration,
    #[serde(default)]
    pub unit: MetricUnit,
}

impl Metric {
    pub fn new(
        namespace: impl Into<String>,
        metric_name: impl Into<String>,
        aggregation: Aggregation,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            metric_name: metric_name.into(),
            dimensions: BTreeMap::new(),
            statistic: aggregation.statistic,
            period: aggregation.period,
            unit: MetricUnit::default(),
        }
    }

    /// Set the published unit
    pub fn with_unit(mut self, unit: MetricUnit) -> Self {
        self.unit = unit;
        self
    }

    pub fn with_dimension(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.dimensions.insert(name.into(), value.into());
        self
    }
}

/// Anything that can produce a named metric about itself.
///
/// Implementations must be deterministic for identical inputs and free of
/// side effects.
pub trait MetricSource {
    fn metric(&self, name: &str, aggregation: Aggregation) -> Result<Metric, CollaboratorError>;
}

/// Render a period the way alarm descriptions read it ("1 minute", "5 minutes")
pub fn humanize_period(period: Duration) -> String {
    let secs = period.as_secs();
    let (count, unit) = if secs > 0 && secs % 3600 == 0 {
        (secs / 3600, "hour")
    } else if secs > 0 && secs % 60 == 0 {
        (secs / 60, "minute")
    } else {
        (secs, "second")
    };
    if count == 1 {
        format!("1 {}", unit)
    } else {
        format!("{} {}s", count, unit)
    }
}

/// Whole-second duration serialization
pub(crate) mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Duration::from_secs(u64::deserialize(deserializer)?))
    }

    pub mod option {
        use super::*;

        pub fn serialize<S>(duration: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match duration {
                Some(d) => serializer.serialize_some(&d.as_secs()),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
        where
            D: Deserializer<'de>,
        {
            Ok(Option::<u64>::deserialize(deserializer)?.map(Duration::from_secs))
        }
    }
}
