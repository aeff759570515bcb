use serde_json::Value;

use crate::models::ProxyType;
use crate::parser::explodes::common::split_authority;
use crate::parser::types::ParsedUri;
use crate::rules::coerce_uuid;
use crate::utils::base64::base64_decode_repair;
use crate::utils::url::url_decode;

/// Parse a VMess link into a ParsedUri
///
/// Two-legged: the Base64-JSON form is tried first, then the inline
/// authority form shared with vless/trojan.
pub fn explode_vmess(link: &str, node: &mut ParsedUri) -> bool {
    if !link.starts_with("vmess://") {
        return false;
    }

    if explode_vmess_json(link, node) {
        return true;
    }

    explode_vmess_inline(link, node)
}

/// The conventional Base64 form: `vmess://base64(json)[#remarks]` with a
/// flat object carrying `add`/`port`/`id`/`aid`/`net`/`type`/`host`/
/// `path`/`tls`/`ps`. Recognized keys are remapped onto the normalized
/// parameter vocabulary before being merged into the query parameters.
fn explode_vmess_json(link: &str, node: &mut ParsedUri) -> bool {
    let content = &link[8..];
    let (encoded, fragment) = match content.split_once('#') {
        Some((encoded, fragment)) => (encoded, Some(fragment)),
        None => (content, None),
    };

    let decoded = match base64_decode_repair(encoded) {
        Some(decoded) => decoded,
        None => return false,
    };
    let json: Value = match serde_json::from_str(&decoded) {
        Ok(json) => json,
        Err(_) => return false,
    };
    let obj = match json.as_object() {
        Some(obj) => obj,
        None => return false,
    };

    let address = match obj.get("add").and_then(Value::as_str) {
        Some(add) if !add.is_empty() => add.to_lowercase(),
        _ => return false,
    };
    let port = match json_port(obj.get("port")) {
        Some(port) => port,
        None => return false,
    };
    let id = match obj.get("id").and_then(Value::as_str) {
        Some(id) if !id.is_empty() => coerce_uuid(id),
        _ => return false,
    };

    node.proxy_type = ProxyType::VMess;
    node.fields
        .insert("address".to_string(), Value::String(address));
    node.fields.insert("port".to_string(), port.into());
    node.fields.insert("id".to_string(), Value::String(id));

    for (key, value) in obj {
        let mapped = match key.as_str() {
            // inline fields and display keys, consumed above
            "add" | "port" | "id" | "ps" | "v" => continue,
            "scy" => "encryption",
            "tls" => "security",
            "type" => "headerType",
            "net" => "type",
            other => other,
        };
        if let Some(param) = json_param(value) {
            node.params.insert(mapped.to_string(), param);
        }
    }

    let ps = obj.get("ps").and_then(Value::as_str).unwrap_or("");
    node.remarks = if ps.is_empty() {
        fragment.map(url_decode).unwrap_or_default()
    } else {
        ps.to_string()
    };

    true
}

/// The inline form: `vmess://id@address:port[?query][#remarks]`.
fn explode_vmess_inline(link: &str, node: &mut ParsedUri) -> bool {
    let auth = match split_authority(link) {
        Some(auth) => auth,
        None => return false,
    };

    node.proxy_type = ProxyType::VMess;
    node.fields
        .insert("address".to_string(), Value::String(auth.address));
    node.fields.insert("port".to_string(), auth.port.into());
    node.fields.insert(
        "id".to_string(),
        Value::String(coerce_uuid(&auth.credential)),
    );
    node.params = auth.params;
    node.remarks = auth.remarks;

    true
}

/// The `port` key appears both as a JSON number and as a string.
fn json_port(value: Option<&Value>) -> Option<u16> {
    match value? {
        Value::Number(n) => n.as_u64().and_then(|p| u16::try_from(p).ok()),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

/// Scalar JSON values become string parameters; nested structures are kept
/// as-is; nulls are dropped.
fn json_param(value: &Value) -> Option<Value> {
    match value {
        Value::String(s) => Some(Value::String(s.clone())),
        Value::Number(n) => Some(Value::String(n.to_string())),
        Value::Bool(b) => Some(Value::String(b.to_string())),
        Value::Object(_) | Value::Array(_) => Some(value.clone()),
        Value::Null => None,
    }
}
