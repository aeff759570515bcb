use serde_json::{Map, Value};

use crate::models::ProxyType;

/// Raw output of one parser invocation: the inline positional captures of
/// the URI, the de-escaped query parameters, and the display fragment.
/// Transient; consumed by layer extraction.
#[derive(Debug, Clone, Default)]
pub struct ParsedUri {
    pub proxy_type: ProxyType,
    /// Inline components keyed by normalized field name (`address`,
    /// `port`, `id`/`password`/`method`).
    pub fields: Map<String, Value>,
    /// Query parameters (plus parameters merged from embedded payloads).
    /// Layers consume entries from this map as they extract.
    pub params: Map<String, Value>,
    pub remarks: String,
}
