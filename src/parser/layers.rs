//! Security and transport layer classification.

use log::debug;
use serde_json::{Map, Value};

use crate::models::{ProxyRecord, SecurityType, TransportType};
use crate::parser::extract::resolve_layer;
use crate::schema::{security_schema, transport_schema};
use crate::utils::string::ensure_slash_prefix;

/// Classifies and extracts the security layer of a record.
///
/// Keyed on the `security` parameter; absent or unrecognized values fall
/// back to `none`. No-op if the record already carries a security block,
/// so re-running a partially processed record cannot reclassify it.
pub fn classify_security(record: &mut ProxyRecord, params: &mut Map<String, Value>) -> bool {
    if !record.security.is_empty() {
        return true;
    }

    let label = params
        .remove("security")
        .and_then(|v| v.as_str().map(str::to_string));
    let security = SecurityType::classify(label.as_deref());

    let mut block = match resolve_layer(&Map::new(), params, security_schema(security)) {
        Some(block) => block,
        None => {
            debug!("{} layer failed extraction", security.as_str());
            return false;
        }
    };

    block.insert(
        "type".to_string(),
        Value::String(security.as_str().to_string()),
    );
    record.security = block;
    true
}

/// Classifies and extracts the transport layer of a record.
///
/// Keyed on the `type` parameter; absent or unrecognized values fall back
/// to `raw`. No-op if the record already carries a transport block.
pub fn classify_transport(record: &mut ProxyRecord, params: &mut Map<String, Value>) -> bool {
    if !record.transport.is_empty() {
        return true;
    }

    let label = params
        .remove("type")
        .and_then(|v| v.as_str().map(str::to_string));
    let transport = TransportType::classify(label.as_deref());

    let mut block = match resolve_layer(&Map::new(), params, transport_schema(transport)) {
        Some(block) => block,
        None => {
            debug!("{} transport failed extraction", transport.as_str());
            return false;
        }
    };

    if transport == TransportType::Raw {
        finalize_raw(&mut block);
    }

    block.insert(
        "type".to_string(),
        Value::String(transport.as_str().to_string()),
    );
    record.transport = block;
    true
}

/// Raw-transport post-processing.
///
/// A raw transport only carries host/path when it fakes an HTTP request:
/// a populated host, or a path sequence whose first element lacks its
/// slash, promotes `headerType` to `http`. Path elements are then
/// slash-normalized. Anything still not `http` is a plain raw stream and
/// drops host and path entirely.
fn finalize_raw(block: &mut Map<String, Value>) {
    let host_present = block
        .get("host")
        .and_then(Value::as_array)
        .map(|items| !items.is_empty())
        .unwrap_or(false);
    let path_unrooted = block
        .get("path")
        .and_then(Value::as_array)
        .and_then(|items| items.first())
        .and_then(Value::as_str)
        .map(|first| !first.starts_with('/'))
        .unwrap_or(false);

    if host_present || path_unrooted {
        block.insert("headerType".to_string(), Value::String("http".to_string()));
    }

    if let Some(Value::Array(items)) = block.get_mut("path") {
        for item in items.iter_mut() {
            if let Value::String(s) = item {
                *s = ensure_slash_prefix(s);
            }
        }
    }

    let is_http = block
        .get("headerType")
        .and_then(Value::as_str)
        .map(|t| t == "http")
        .unwrap_or(false);
    if !is_http {
        block.insert("headerType".to_string(), Value::String("none".to_string()));
        block.remove("host");
        block.remove("path");
    }
}
