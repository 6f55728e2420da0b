//! Metric value reports: name validation → unit lookup → extraction →
//! formatting → column rendering.

use std::collections::BTreeSet;

use crate::error::Result;
use crate::render::{columnize, delimited_row, sort_rows_by_value};
use crate::telemetry::TelemetryReference;

use super::extract::{ExtractedValue, extract_by_name};
use super::format::Unit;
use super::{Labels, MetricSnapshot, MetricsIndex};

/// Header of a metric values report.
pub const REPORT_HEADER: [&str; 6] = ["Timestamp", "Metric", "Type", "Unit", "Value", "Labels"];

/// Rendered in place of an absent value.
const NIL_VALUE: &str = "<nil>";
/// Rendered in place of the labels of an absent value.
const NIL_LABELS: &str = "-";

/// Switches for [`metric_values_report`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    /// Check the name against the telemetry reference first.
    pub validate: bool,
    /// Order rows by value, highest first, instead of by timestamp.
    pub sort_by_value: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            validate: true,
            sort_by_value: false,
        }
    }
}

/// `[{k: v} {k2: v2}]`, or `[]` for no labels.
fn render_labels(labels: &Labels) -> String {
    let parts: Vec<String> = labels
        .iter()
        .map(|(k, v)| format!("{{{k}: {v}}}"))
        .collect();
    format!("[{}]", parts.join(" "))
}

fn report_row(value: &ExtractedValue<'_>, unit: &str, metric_type: &str) -> Result<String> {
    let (rendered, labels) = match value.value {
        Some(v) => (Unit::classify(unit).convert(v)?, render_labels(value.labels)),
        None => (NIL_VALUE.to_string(), NIL_LABELS.to_string()),
    };
    Ok(delimited_row([
        value.timestamp,
        value.name,
        metric_type,
        unit,
        rendered.as_str(),
        labels.as_str(),
    ]))
}

/// Every value of metrics matching `name` across the series, one row per
/// value, as an aligned table.
///
/// `name` is matched as the regex `.*<name>`. Unit and type come from the
/// exact reference entry for `name`. No match still renders the header. A
/// value that cannot be formatted in its unit aborts the report.
pub fn metric_values_report(
    series: &[MetricSnapshot],
    reference: &TelemetryReference,
    name: &str,
    options: ReportOptions,
) -> Result<String> {
    if options.validate {
        log::info!("validating metric name with hashicorp docs");
        reference.validate_metric_name(name)?;
    } else {
        log::info!("=> skipping metric name validation with hashicorp docs");
    }

    let (unit, metric_type) = reference.unit_and_type(name);
    log::debug!("{name}: unit {unit:?}, type {metric_type:?}");

    let mut rows = vec![delimited_row(REPORT_HEADER)];
    for value in extract_by_name(series, name)? {
        rows.push(report_row(&value, unit, metric_type)?);
    }
    log::debug!("{} values matched {name:?}", rows.len() - 1);

    if options.sort_by_value {
        sort_rows_by_value(&mut rows);
    }
    Ok(columnize(&rows))
}

/// Sorted distinct metric names present anywhere in the series.
pub fn metric_names(series: &[MetricSnapshot]) -> Vec<String> {
    let mut names = BTreeSet::new();
    for snapshot in series {
        names.extend(snapshot.gauges.iter().map(|g| g.name.as_str()));
        names.extend(snapshot.points.iter().map(|p| p.name.as_str()));
        names.extend(snapshot.counters.iter().map(|c| c.name.as_str()));
        names.extend(snapshot.samples.iter().map(|s| s.name.as_str()));
    }
    names.into_iter().map(str::to_string).collect()
}

fn distinct(series: &[MetricSnapshot], names: impl Fn(&MetricSnapshot) -> Vec<&str>) -> usize {
    series
        .iter()
        .flat_map(|s| names(s))
        .collect::<BTreeSet<_>>()
        .len()
}

/// Capture details of the metrics stream: index parameters when present,
/// snapshot span, and distinct metric names per shape.
pub fn metrics_summary(series: &[MetricSnapshot], index: Option<&MetricsIndex>) -> String {
    let mut lines = Vec::new();
    if let Some(index) = index {
        lines.push(format!("Agent version:  {}", index.agent_version));
        lines.push(format!("Bundle version: {}", index.version));
        lines.push(format!("Interval:       {}", index.interval));
        lines.push(format!("Duration:       {}", index.duration));
        lines.push(format!("Targets:        {}", index.targets.join(", ")));
    }
    lines.push(format!("Snapshots:      {}", series.len()));
    if let (Some(first), Some(last)) = (series.first(), series.last()) {
        lines.push(format!("First capture:  {}", first.timestamp));
        lines.push(format!("Last capture:   {}", last.timestamp));
    }

    let gauges = distinct(series, |s| s.gauges.iter().map(|g| g.name.as_str()).collect());
    let points = distinct(series, |s| s.points.iter().map(|p| p.name.as_str()).collect());
    let counters = distinct(series, |s| s.counters.iter().map(|c| c.name.as_str()).collect());
    let samples = distinct(series, |s| s.samples.iter().map(|m| m.name.as_str()).collect());
    lines.push(format!(
        "Metric names:   {} (gauges {gauges}, points {points}, counters {counters}, samples {samples})",
        metric_names(series).len()
    ));
    lines.join("\n")
}
