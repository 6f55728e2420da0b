//! Consul telemetry reference: known metric names with their unit and type.
//!
//! The table is scraped from the agent telemetry page of the Consul
//! documentation. It is used to validate requested metric names and to pick
//! the unit a metric value should be rendered in.

use std::time::Duration;

use scraper::{ElementRef, Html, Selector};

use crate::error::{DebugReadError, Result};
use crate::render::{columnize, delimited_row};

/// Consul agent telemetry reference page.
pub const TELEMETRY_URL: &str = "https://developer.hashicorp.com/consul/docs/agent/telemetry";

/// Mesh proxy metrics carry customer-defined service names after this prefix.
const PROXY_PREFIX: &str = "consul.proxy.";

/// Name of the entry that applies to any otherwise unmatched metric.
pub const WILDCARD: &str = "*";

/// Placeholder for an unknown unit or type.
pub const UNKNOWN: &str = "-";

/// One documented metric.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryMetricInfo {
    pub name: String,
    pub unit: String,
    pub metric_type: String,
}

/// The scraped reference table.
#[derive(Debug, Clone, Default)]
pub struct TelemetryReference {
    url: String,
    metrics: Vec<TelemetryMetricInfo>,
}

impl TelemetryReference {
    /// Fetch and parse the reference page with a single blocking GET.
    pub fn fetch(url: &str, timeout: Duration) -> Result<Self> {
        log::debug!("fetching telemetry reference from {url} (timeout {timeout:?})");
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        let network_err = |reason: String| DebugReadError::NetworkFetch {
            url: url.to_string(),
            reason,
        };
        let body = agent
            .get(url)
            .call()
            .map_err(|e| network_err(fetch_failure(e)))?
            .into_string()
            .map_err(|e| network_err(e.to_string()))?;
        let reference = Self::from_html(&body)?.with_url(url);
        log::debug!(
            "telemetry reference lists {} consul metrics",
            reference.metrics.len()
        );
        Ok(reference)
    }

    /// Parse the reference table out of an HTML document.
    ///
    /// Every `table tbody tr` row contributes cells 1, 3 and 4 (name, unit,
    /// type). Rows whose name does not start with `consul` are dropped.
    pub fn from_html(html: &str) -> Result<Self> {
        let rows = selector("table tbody tr")?;
        let cells = selector("td")?;
        let document = Html::parse_document(html);

        let mut row_count = 0usize;
        let mut metrics = Vec::new();
        for row in document.select(&rows) {
            row_count += 1;
            let tds: Vec<ElementRef<'_>> = row.select(&cells).collect();
            let cell = |i: usize| {
                tds.get(i)
                    .map(|td| td.text().collect::<String>().trim().to_string())
                    .unwrap_or_default()
            };
            let name = cell(0);
            if !name.starts_with("consul") {
                continue;
            }
            metrics.push(TelemetryMetricInfo {
                name,
                unit: cell(2),
                metric_type: cell(3),
            });
        }

        if row_count == 0 {
            return Err(DebugReadError::HtmlParse {
                reason: "no telemetry table rows found".to_string(),
            });
        }
        Ok(Self::from_metrics(metrics))
    }

    /// Build a reference from known entries.
    pub fn from_metrics(metrics: Vec<TelemetryMetricInfo>) -> Self {
        Self {
            url: TELEMETRY_URL.to_string(),
            metrics,
        }
    }

    /// Record the URL the table came from, used in validation errors.
    pub fn with_url(mut self, url: &str) -> Self {
        self.url = url.to_string();
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn metrics(&self) -> &[TelemetryMetricInfo] {
        &self.metrics
    }

    /// The table as aligned text under a `Metric Unit Type` header.
    pub fn listing(&self) -> String {
        let mut rows = vec![delimited_row(["Metric", "Unit", "Type"])];
        rows.extend(
            self.metrics
                .iter()
                .map(|m| delimited_row([&m.name, &m.unit, &m.metric_type])),
        );
        columnize(&rows)
    }

    /// Unit and type for `name`.
    ///
    /// Exact name matches win; otherwise a `*` entry applies. Asking for `*`
    /// itself returns the first entry. Unknown names give `("-", "-")`.
    pub fn unit_and_type(&self, name: &str) -> (&str, &str) {
        let found = self
            .metrics
            .iter()
            .find(|m| m.name == name)
            .or_else(|| self.metrics.iter().find(|m| m.name == WILDCARD))
            .or_else(|| {
                if name == WILDCARD {
                    self.metrics.first()
                } else {
                    None
                }
            });
        match found {
            Some(m) => (m.unit.as_str(), m.metric_type.as_str()),
            None => (UNKNOWN, UNKNOWN),
        }
    }

    /// Check that `name` is a documented metric.
    ///
    /// Names under `consul.proxy.` are always accepted since they embed
    /// customer service names. Anything else must appear in [`listing`].
    ///
    /// [`listing`]: TelemetryReference::listing
    pub fn validate_metric_name(&self, name: &str) -> Result<()> {
        if is_proxy_metric(name) {
            log::info!("built-in mesh proxy prefix used: {name}");
            return Ok(());
        }
        if self.listing().contains(name) {
            return Ok(());
        }
        Err(DebugReadError::NameValidation {
            name: name.to_string(),
            url: self.url.clone(),
        })
    }
}

/// `consul.proxy.<anything>` with a non-empty remainder.
pub fn is_proxy_metric(name: &str) -> bool {
    name.strip_prefix(PROXY_PREFIX)
        .is_some_and(|rest| !rest.is_empty())
}

/// Reason text for a failed GET without the request URL, which
/// [`DebugReadError::NetworkFetch`] already carries.
fn fetch_failure(err: ureq::Error) -> String {
    match err {
        ureq::Error::Status(code, response) => {
            format!("HTTP status {code} {}", response.status_text())
        }
        ureq::Error::Transport(transport) => {
            let mut reason = transport.kind().to_string();
            if let Some(message) = transport.message() {
                reason.push_str(": ");
                reason.push_str(message);
            }
            if let Some(source) = std::error::Error::source(&transport) {
                reason.push_str(": ");
                reason.push_str(&source.to_string());
            }
            reason
        }
    }
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| DebugReadError::HtmlParse {
        reason: format!("invalid selector {css:?}: {e}"),
    })
}
