use serde_json::Value;

use crate::models::ProxyType;
use crate::parser::explodes::common::split_authority;
use crate::parser::types::ParsedUri;
use crate::rules::coerce_uuid;

/// Parse a VLESS link into a ParsedUri
///
/// Format: `vless://id@address:port[?query][#remarks]`. The id is coerced
/// to canonical UUID form.
pub fn explode_vless(link: &str, node: &mut ParsedUri) -> bool {
    if !link.starts_with("vless://") {
        return false;
    }

    let auth = match split_authority(link) {
        Some(auth) => auth,
        None => return false,
    };

    node.proxy_type = ProxyType::Vless;
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
