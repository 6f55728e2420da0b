//! Metric data model for the `metrics.json` stream of a debug bundle.
//!
//! Each capture interval produces one [`MetricSnapshot`] holding four
//! independent collections (gauges, points, counters, samples). Numeric fields
//! are resolved into a [`MetricValue`] once, at decode time.

pub mod extract;
pub mod format;
pub mod report;

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::bundle::null_default;

pub use extract::{ExtractedValue, extract_by_name, name_matcher};
pub use format::{Unit, format_go_float, format_value};
pub use report::{ReportOptions, metric_names, metric_values_report, metrics_summary};

/// Label key → scalar value. Ordered so a label set always renders the same way.
pub type Labels = BTreeMap<String, LabelValue>;

/// Chronologically ordered snapshots, as stored in the bundle.
pub type MetricSeries = Vec<MetricSnapshot>;

// ---------------------------------------------------------------------------
// Values
// ---------------------------------------------------------------------------

/// A raw numeric metric value.
#[derive(Debug, Clone, PartialEq)]
pub enum MetricValue {
    Int(i64),
    Float(f64),
    /// Non-numeric JSON found where a number was expected.
    Unsupported(Value),
}

impl MetricValue {
    /// Value as `f64`, or `None` for [`MetricValue::Unsupported`].
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MetricValue::Int(v) => Some(*v as f64),
            MetricValue::Float(v) => Some(*v),
            MetricValue::Unsupported(_) => None,
        }
    }

    /// Name of the underlying JSON type, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            MetricValue::Int(_) => "int",
            MetricValue::Float(_) => "float64",
            MetricValue::Unsupported(v) => json_type_name(v),
        }
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Int(v) => write!(f, "{v}"),
            MetricValue::Float(v) => f.write_str(&format_go_float(*v)),
            MetricValue::Unsupported(v) => write!(f, "{v}"),
        }
    }
}

fn json_type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Decode a field declared as floating point.
fn float_field<'de, D>(deserializer: D) -> Result<Option<MetricValue>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        None | Some(Value::Null) => None,
        Some(Value::Number(n)) => n.as_f64().map(MetricValue::Float),
        Some(other) => Some(MetricValue::Unsupported(other)),
    })
}

/// Decode a field declared as integer. Fractional numbers stay floats.
fn int_field<'de, D>(deserializer: D) -> Result<Option<MetricValue>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        None | Some(Value::Null) => None,
        Some(Value::Number(n)) => match n.as_i64() {
            Some(i) => Some(MetricValue::Int(i)),
            None => n.as_f64().map(MetricValue::Float),
        },
        Some(other) => Some(MetricValue::Unsupported(other)),
    })
}

/// A label value. JSON labels are always primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LabelValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Null,
}

impl fmt::Display for LabelValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelValue::Bool(b) => write!(f, "{b}"),
            LabelValue::Int(i) => write!(f, "{i}"),
            LabelValue::Float(v) => f.write_str(&format_go_float(*v)),
            LabelValue::Text(s) => f.write_str(s),
            LabelValue::Null => f.write_str("<nil>"),
        }
    }
}

// ---------------------------------------------------------------------------
// Metric shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Gauge {
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "Value", default, deserialize_with = "float_field")]
    pub value: Option<MetricValue>,
    #[serde(rename = "Labels", default, deserialize_with = "null_default")]
    pub labels: Labels,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Point {
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "Points", default, deserialize_with = "float_field")]
    pub points: Option<MetricValue>,
    #[serde(rename = "Labels", default, deserialize_with = "null_default")]
    pub labels: Labels,
}

/// Aggregated statistics shared by counters and samples.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Aggregate {
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "Count", default, deserialize_with = "int_field")]
    pub count: Option<MetricValue>,
    #[serde(rename = "Rate", default)]
    pub rate: Option<f64>,
    #[serde(rename = "Sum", default)]
    pub sum: Option<f64>,
    #[serde(rename = "Min", default)]
    pub min: Option<f64>,
    #[serde(rename = "Max", default)]
    pub max: Option<f64>,
    #[serde(rename = "Mean", default, deserialize_with = "float_field")]
    pub mean: Option<MetricValue>,
    #[serde(rename = "Stddev", default)]
    pub stddev: Option<f64>,
    #[serde(rename = "Labels", default, deserialize_with = "null_default")]
    pub labels: Labels,
}

pub type Counter = Aggregate;
pub type Sample = Aggregate;

/// One capture interval of agent metrics.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MetricSnapshot {
    #[serde(rename = "Timestamp", default)]
    pub timestamp: String,
    #[serde(rename = "Gauges", default, deserialize_with = "null_default")]
    pub gauges: Vec<Gauge>,
    #[serde(rename = "Points", default, deserialize_with = "null_default")]
    pub points: Vec<Point>,
    #[serde(rename = "Counters", default, deserialize_with = "null_default")]
    pub counters: Vec<Counter>,
    #[serde(rename = "Samples", default, deserialize_with = "null_default")]
    pub samples: Vec<Sample>,
}

impl MetricSnapshot {
    /// Total number of metric entries across all four shapes.
    pub fn len(&self) -> usize {
        self.gauges.len() + self.points.len() + self.counters.len() + self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Capture parameters from `index.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsIndex {
    #[serde(rename = "Version", default)]
    pub version: i64,
    #[serde(rename = "AgentVersion", default)]
    pub agent_version: String,
    #[serde(rename = "Interval", default)]
    pub interval: String,
    #[serde(rename = "Duration", default)]
    pub duration: String,
    #[serde(rename = "Targets", default)]
    pub targets: Vec<String>,
}
