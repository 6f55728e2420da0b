//! Debug bundle decoding.
//!
//! A bundle is the extracted output of `consul debug`: a directory holding
//! `agent.json`, `members.json`, `index.json` and the metrics stream. Older
//! bundles keep one `metrics.json` per capture interval in timestamped
//! sub-directories instead of a single top-level stream.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::agent::Agent;
use crate::error::{DebugReadError, Result};
use crate::members::Member;
use crate::metrics::{MetricSeries, MetricSnapshot, MetricsIndex};

pub const AGENT_FILE: &str = "agent.json";
pub const MEMBERS_FILE: &str = "members.json";
pub const METRICS_FILE: &str = "metrics.json";
pub const INDEX_FILE: &str = "index.json";

/// Treat an explicit JSON `null` like a missing field.
pub(crate) fn null_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Parts of a bundle, loaded on demand.
#[derive(Debug, Clone, Default)]
pub struct DebugBundle {
    dir: PathBuf,
    pub agent: Option<Agent>,
    pub members: Vec<Member>,
    pub index: Option<MetricsIndex>,
    pub metrics: MetricSeries,
}

impl DebugBundle {
    /// An empty bundle rooted at `dir`. Nothing is read yet.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            ..Self::default()
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Decode `agent.json`.
    pub fn read_agent(&mut self) -> Result<&Agent> {
        let agent = decode_file::<Agent>(&self.dir.join(AGENT_FILE))?;
        log::debug!("decoded {AGENT_FILE} for node {:?}", agent.config.node_name);
        Ok(self.agent.insert(agent))
    }

    /// Decode `members.json`.
    pub fn read_members(&mut self) -> Result<&[Member]> {
        let path = self.dir.join(MEMBERS_FILE);
        self.members = decode_file::<Option<Vec<Member>>>(&path)?.unwrap_or_default();
        log::debug!("decoded {MEMBERS_FILE}: {} members", self.members.len());
        Ok(&self.members)
    }

    /// Decode `index.json`; a bundle without one yields `None`.
    pub fn read_index(&mut self) -> Result<Option<&MetricsIndex>> {
        let path = self.dir.join(INDEX_FILE);
        if !path.exists() {
            log::debug!("no {INDEX_FILE} in {}", self.dir.display());
            self.index = None;
            return Ok(None);
        }
        self.index = Some(decode_file::<MetricsIndex>(&path)?);
        Ok(self.index.as_ref())
    }

    /// Decode the metrics stream.
    ///
    /// Reads the top-level `metrics.json` when present, otherwise every
    /// sub-directory's `metrics.json` in lexical order.
    pub fn read_metrics(&mut self) -> Result<&[MetricSnapshot]> {
        let top = self.dir.join(METRICS_FILE);
        self.metrics = if top.exists() {
            decode_metrics_stream(&top)?
        } else {
            let mut series = MetricSeries::new();
            for path in interval_metrics_files(&self.dir)? {
                series.extend(decode_metrics_stream(&path)?);
            }
            series
        };
        log::debug!("decoded {} metric snapshots", self.metrics.len());
        Ok(&self.metrics)
    }
}

fn decode_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path).map_err(|e| DebugReadError::decode(path, e))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| DebugReadError::decode(path, e))
}

/// Decode a file of concatenated JSON documents, each either one snapshot
/// object or an array of snapshots.
pub fn decode_metrics_stream(path: &Path) -> Result<MetricSeries> {
    let file = File::open(path).map_err(|e| DebugReadError::decode(path, e))?;
    let stream = serde_json::Deserializer::from_reader(BufReader::new(file)).into_iter::<Value>();

    let snapshot = |value: Value| {
        serde_json::from_value::<MetricSnapshot>(value).map_err(|e| DebugReadError::decode(path, e))
    };
    let mut series = MetricSeries::new();
    for doc in stream {
        match doc.map_err(|e| DebugReadError::decode(path, e))? {
            Value::Array(items) => {
                for item in items {
                    series.push(snapshot(item)?);
                }
            }
            other => series.push(snapshot(other)?),
        }
    }
    Ok(series)
}

/// `<dir>/<interval>/metrics.json` files, sorted by interval directory name.
fn interval_metrics_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| DebugReadError::decode(dir, e))?;
    let mut files: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|p| p.is_dir())
        .map(|p| p.join(METRICS_FILE))
        .filter(|p| p.is_file())
        .collect();
    if files.is_empty() {
        return Err(DebugReadError::decode(
            dir.join(METRICS_FILE),
            "no metrics.json found in bundle or its interval directories",
        ));
    }
    files.sort();
    Ok(files)
}
