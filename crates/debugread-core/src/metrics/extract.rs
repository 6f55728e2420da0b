//! Pull matching metric values out of a snapshot series.

use regex::Regex;

use crate::error::{DebugReadError, Result};

use super::{Labels, MetricSnapshot, MetricValue};

/// One matching metric entry, normalized across the four metric shapes.
///
/// Borrows from the snapshot it came from; `timestamp` is always the parent
/// snapshot's timestamp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtractedValue<'a> {
    pub name: &'a str,
    pub value: Option<&'a MetricValue>,
    pub labels: &'a Labels,
    pub timestamp: &'a str,
}

/// Compile a metric name pattern as the unanchored regex `.*<pattern>`.
///
/// Plain metric names match any name containing them; regex syntax such as
/// `raft.*Time` is honoured.
pub fn name_matcher(pattern: &str) -> Result<Regex> {
    Regex::new(&format!(".*{pattern}")).map_err(|e| DebugReadError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })
}

impl MetricSnapshot {
    /// Every entry of this snapshot whose name matches `matcher`.
    ///
    /// Gauges contribute `Value`, points `Points`, counters `Count` and
    /// samples `Mean`. Results are grouped by shape in that order.
    pub fn extract_matching<'a>(&'a self, matcher: &Regex) -> Vec<ExtractedValue<'a>> {
        let ts = self.timestamp.as_str();
        let entry = |name: &'a str, value: &'a Option<MetricValue>, labels: &'a Labels| {
            ExtractedValue {
                name,
                value: value.as_ref(),
                labels,
                timestamp: ts,
            }
        };

        let gauges = self
            .gauges
            .iter()
            .filter(|g| matcher.is_match(&g.name))
            .map(|g| entry(g.name.as_str(), &g.value, &g.labels));
        let points = self
            .points
            .iter()
            .filter(|p| matcher.is_match(&p.name))
            .map(|p| entry(p.name.as_str(), &p.points, &p.labels));
        let counters = self
            .counters
            .iter()
            .filter(|c| matcher.is_match(&c.name))
            .map(|c| entry(c.name.as_str(), &c.count, &c.labels));
        let samples = self
            .samples
            .iter()
            .filter(|s| matcher.is_match(&s.name))
            .map(|s| entry(s.name.as_str(), &s.mean, &s.labels));

        gauges.chain(points).chain(counters).chain(samples).collect()
    }
}

/// Extract every entry matching `pattern` across the whole series, in
/// snapshot order. No match yields an empty vector; a pattern that is not a
/// valid regex fails with [`DebugReadError::InvalidPattern`].
pub fn extract_by_name<'a>(
    series: &'a [MetricSnapshot],
    pattern: &str,
) -> Result<Vec<ExtractedValue<'a>>> {
    let matcher = name_matcher(pattern)?;
    Ok(series
        .iter()
        .flat_map(|snapshot| snapshot.extract_matching(&matcher))
        .collect())
}
