//! # debugread-core
//!
//! **Read a Consul debug bundle without a running cluster.**
//!
//! `debugread-core` decodes the extracted output of `consul debug` and renders
//! it as plain-text tables: agent details, cluster members, and the values of
//! any telemetry metric across every capture interval, converted to the unit
//! HashiCorp documents for it.
//!
//! ## Quick Start
//!
//! ```no_run
//! use debugread_core::{DebugBundle, ReportOptions, TelemetryReference, metric_values_report};
//! use std::time::Duration;
//!
//! let mut bundle = DebugBundle::new("/tmp/consul-debug-2023-07-12T18-00-00Z");
//! let series = bundle.read_metrics()?;
//!
//! let reference = TelemetryReference::fetch(
//!     debugread_core::TELEMETRY_URL,
//!     Duration::from_secs(10),
//! )?;
//! let table = metric_values_report(
//!     series,
//!     &reference,
//!     "consul.runtime.alloc_bytes",
//!     ReportOptions::default(),
//! )?;
//! println!("{table}");
//! # Ok::<(), debugread_core::DebugReadError>(())
//! ```
//!
//! ## Architecture
//!
//! Bundle files → decode ([`bundle`]) → extract by name → format by unit
//! ([`metrics`]) → aligned columns ([`render`])
//!
//! Units and types come from the published telemetry table ([`telemetry`]),
//! which also validates metric names before a report is built.

pub mod agent;
pub mod bundle;
pub mod config;
pub mod error;
pub mod members;
pub mod metrics;
pub mod render;
pub mod telemetry;

pub use agent::{Agent, AgentConfig};
pub use bundle::{DebugBundle, decode_metrics_stream};
pub use config::{ReaderConfig, default_config_path};
pub use error::{DebugReadError, Result};
pub use members::{Member, MemberStatus, members_table, status_counts};
pub use metrics::{
    ExtractedValue, LabelValue, Labels, MetricSeries, MetricSnapshot, MetricValue, MetricsIndex,
    ReportOptions, Unit, extract_by_name, format_value, metric_names, metric_values_report,
    metrics_summary, name_matcher,
};
pub use render::{columnize, delimited_row, sort_rows_by_value};
pub use telemetry::{TELEMETRY_URL, TelemetryMetricInfo, TelemetryReference};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
