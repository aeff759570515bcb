//! The structured proxy record handed to downstream consumers.

use serde::Serialize;
use serde_json::{Map, Value};

/// A validated, normalized proxy configuration.
///
/// The three layer mappings hold only schema-approved fields; each carries
/// a `type` key naming its variant. `remarks` is display-only and never
/// contributes to the record's identity. `hash` is absent until the record
/// passes canonicalization, after which the record is immutable.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProxyRecord {
    pub protocol: Map<String, Value>,
    pub security: Map<String, Value>,
    pub transport: Map<String, Value>,
    pub remarks: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
}

impl ProxyRecord {
    pub fn new(protocol: Map<String, Value>, remarks: String) -> Self {
        ProxyRecord {
            protocol,
            security: Map::new(),
            transport: Map::new(),
            remarks,
            hash: None,
        }
    }
}

/// Why a candidate URI was discarded. Every variant is local to one
/// candidate; none of them aborts a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The link does not start with any known scheme prefix.
    UnknownScheme,
    /// Structural mismatch, bad base64/JSON payload, or a protocol field
    /// that failed extraction.
    Parse,
    /// The declared security layer failed schema extraction.
    InvalidSecurityParams,
    /// The declared transport layer failed schema extraction.
    InvalidTransportParams,
}
