//! Cluster membership (`members.json`).

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::bundle::null_default;
use crate::render::{columnize, delimited_row};

/// Serf member status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MemberStatus {
    None,
    Alive,
    Leaving,
    Left,
    Failed,
    Unknown(i64),
}

impl From<i64> for MemberStatus {
    fn from(code: i64) -> Self {
        match code {
            0 => MemberStatus::None,
            1 => MemberStatus::Alive,
            2 => MemberStatus::Leaving,
            3 => MemberStatus::Left,
            4 => MemberStatus::Failed,
            other => MemberStatus::Unknown(other),
        }
    }
}

impl fmt::Display for MemberStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemberStatus::None => write!(f, "none"),
            MemberStatus::Alive => write!(f, "alive"),
            MemberStatus::Leaving => write!(f, "leaving"),
            MemberStatus::Left => write!(f, "left"),
            MemberStatus::Failed => write!(f, "failed"),
            MemberStatus::Unknown(code) => write!(f, "unknown({code})"),
        }
    }
}

/// One serf LAN member as reported by the agent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Member {
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "Addr", default)]
    pub addr: String,
    #[serde(rename = "Port", default)]
    pub port: u16,
    #[serde(rename = "Tags", default, deserialize_with = "null_default")]
    pub tags: BTreeMap<String, String>,
    #[serde(rename = "Status", default)]
    pub status: i64,
    #[serde(rename = "ProtocolCur", default)]
    pub protocol_cur: u8,
}

impl Member {
    pub fn status(&self) -> MemberStatus {
        MemberStatus::from(self.status)
    }

    fn tag(&self, key: &str) -> &str {
        self.tags.get(key).map(String::as_str).unwrap_or("")
    }

    /// `server` for consul servers, `client` otherwise.
    pub fn role(&self) -> &str {
        match self.tag("role") {
            "consul" => "server",
            "node" | "" => "client",
            other => other,
        }
    }

    /// Consul version from the `build` tag, without the revision suffix.
    pub fn build(&self) -> &str {
        let build = self.tag("build");
        build.split(':').next().unwrap_or(build)
    }

    pub fn datacenter(&self) -> &str {
        self.tag("dc")
    }

    pub fn partition(&self) -> &str {
        self.tag("ap")
    }

    pub fn segment(&self) -> &str {
        self.tag("segment")
    }

    /// `addr:port` of the gossip listener.
    pub fn address(&self) -> String {
        format!("{}:{}", self.addr, self.port)
    }
}

/// Member table in `consul members` layout.
pub fn members_table(members: &[Member]) -> String {
    let mut rows = vec![delimited_row([
        "Node", "Address", "Status", "Type", "Build", "Protocol", "DC", "Partition", "Segment",
    ])];
    for m in members {
        rows.push(delimited_row([
            m.name.clone(),
            m.address(),
            m.status().to_string(),
            m.role().to_string(),
            m.build().to_string(),
            m.protocol_cur.to_string(),
            m.datacenter().to_string(),
            m.partition().to_string(),
            m.segment().to_string(),
        ]));
    }
    columnize(&rows)
}

/// Member count per status, in status order.
pub fn status_counts(members: &[Member]) -> Vec<(MemberStatus, usize)> {
    let mut counts: BTreeMap<MemberStatus, usize> = BTreeMap::new();
    for m in members {
        *counts.entry(m.status()).or_insert(0) += 1;
    }
    counts.into_iter().collect()
}
