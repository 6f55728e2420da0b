//! Agent self-description (`agent.json`, the `/v1/agent/self` document).

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::bundle::null_default;
use crate::members::Member;

/// Static agent configuration reported under `Config`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AgentConfig {
    #[serde(rename = "Datacenter", default)]
    pub datacenter: String,
    #[serde(rename = "PrimaryDatacenter", default)]
    pub primary_datacenter: String,
    #[serde(rename = "NodeName", default)]
    pub node_name: String,
    #[serde(rename = "NodeID", default)]
    pub node_id: String,
    #[serde(rename = "Version", default)]
    pub version: String,
    #[serde(rename = "Revision", default)]
    pub revision: String,
    #[serde(rename = "Server", default)]
    pub server: bool,
    #[serde(rename = "BuildDate", default)]
    pub build_date: String,
}

/// Decoded `agent.json`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Agent {
    #[serde(rename = "Config", default, deserialize_with = "null_default")]
    pub config: AgentConfig,
    #[serde(rename = "DebugConfig", default)]
    pub debug_config: Option<Value>,
    #[serde(rename = "Member", default, deserialize_with = "null_default")]
    pub member: Member,
    #[serde(rename = "Stats", default, deserialize_with = "null_default")]
    pub stats: BTreeMap<String, BTreeMap<String, Value>>,
    #[serde(rename = "Meta", default)]
    pub meta: Option<BTreeMap<String, String>>,
}

impl Agent {
    /// A single runtime statistic, e.g. `stat("raft", "state")`.
    pub fn stat(&self, section: &str, key: &str) -> Option<String> {
        self.stats
            .get(section)
            .and_then(|s| s.get(key))
            .map(|v| match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
    }

    /// Short description of the agent: identity, version, mode and raft state.
    pub fn summary(&self) -> String {
        let c = &self.config;
        let or_dash = |s: &str| {
            if s.is_empty() {
                "-".to_string()
            } else {
                s.to_string()
            }
        };
        let mode = if c.server { "server" } else { "client" };
        let version = if c.revision.is_empty() {
            or_dash(&c.version)
        } else {
            format!("{} ({})", c.version, c.revision)
        };
        let stat = |section: &str, key: &str| self.stat(section, key).unwrap_or_else(|| "-".into());

        let mut lines = vec![
            format!("Node:               {}", or_dash(&c.node_name)),
            format!("Node ID:            {}", or_dash(&c.node_id)),
            format!("Datacenter:         {}", or_dash(&c.datacenter)),
            format!("Primary DC:         {}", or_dash(&c.primary_datacenter)),
            format!("Version:            {version}"),
            format!("Build date:         {}", or_dash(&c.build_date)),
            format!("Mode:               {mode}"),
            format!("LAN address:        {}", self.member.address()),
        ];
        if c.server {
            lines.push(format!("Raft state:         {}", stat("raft", "state")));
            lines.push(format!("Raft last index:    {}", stat("raft", "last_log_index")));
            lines.push(format!("Leader:             {}", stat("consul", "leader")));
        } else {
            lines.push(format!("Known servers:      {}", stat("consul", "known_servers")));
        }
        if let Some(segment) = self
            .meta
            .as_ref()
            .and_then(|m| m.get("consul-network-segment"))
            .filter(|s| !s.is_empty())
        {
            lines.push(format!("Network segment:    {segment}"));
        }
        lines.join("\n")
    }

    /// Full runtime configuration (`DebugConfig`) as indented JSON.
    pub fn config_full(&self) -> String {
        match &self.debug_config {
            Some(cfg) => serde_json::to_string_pretty(cfg).unwrap_or_else(|e| format!("<{e}>")),
            None => "agent.json has no DebugConfig section".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SERVER: &str = r#"{
        "Config": {"Datacenter": "dc1", "PrimaryDatacenter": "dc1", "NodeName": "server-1",
                   "NodeID": "e5a1", "Version": "1.16.0", "Revision": "abc123",
                   "Server": true, "BuildDate": "2023-06-26T00:00:00Z"},
        "DebugConfig": {"Datacenter": "dc1", "Ports": {"HTTP": 8500}},
        "Member": {"Name": "server-1", "Addr": "10.0.0.1", "Port": 8301, "Status": 1, "Tags": {}},
        "Stats": {"raft": {"state": "Leader", "last_log_index": "812"},
                  "consul": {"leader": "true", "known_datacenters": "1"},
                  "runtime": {"goroutines": 152}},
        "Meta": {"consul-network-segment": ""}
    }"#;

    #[test]
    fn server_summary() {
        let agent: Agent = serde_json::from_str(SERVER).unwrap();
        let summary = agent.summary();
        assert!(summary.contains("Node:               server-1"));
        assert!(summary.contains("Version:            1.16.0 (abc123)"));
        assert!(summary.contains("Mode:               server"));
        assert!(summary.contains("LAN address:        10.0.0.1:8301"));
        assert!(summary.contains("Raft state:         Leader"));
        assert!(summary.contains("Leader:             true"));
        assert!(!summary.contains("Network segment"));
    }

    #[test]
    fn client_summary_with_missing_fields() {
        let agent: Agent =
            serde_json::from_str(r#"{"Config": {"NodeName": "c1", "Server": false}}"#).unwrap();
        let summary = agent.summary();
        assert!(summary.contains("Mode:               client"));
        assert!(summary.contains("Datacenter:         -"));
        assert!(summary.contains("Known servers:      -"));
    }

    #[test]
    fn stats_render_non_string_values() {
        let agent: Agent = serde_json::from_str(SERVER).unwrap();
        assert_eq!(agent.stat("runtime", "goroutines").as_deref(), Some("152"));
        assert_eq!(agent.stat("raft", "missing"), None);
    }

    #[test]
    fn config_full_is_pretty_json() {
        let agent: Agent = serde_json::from_str(SERVER).unwrap();
        let cfg = agent.config_full();
        assert!(cfg.contains("\"HTTP\": 8500"));
        assert!(Agent::default().config_full().contains("no DebugConfig"));
    }
}
