use serde_json::Value;

use crate::models::ProxyType;
use crate::parser::explodes::common::split_authority;
use crate::parser::types::ParsedUri;

/// Parse a Trojan link into a ParsedUri
///
/// Format: `trojan://password@address:port[?query][#remarks]`.
pub fn explode_trojan(link: &str, node: &mut ParsedUri) -> bool {
    if !link.starts_with("trojan://") {
        return false;
    }

    let auth = match split_authority(link) {
        Some(auth) => auth,
        None => return false,
    };

    node.proxy_type = ProxyType::Trojan;
    node.fields
        .insert("address".to_string(), Value::String(auth.address));
    node.fields.insert("port".to_string(), auth.port.into());
    node.fields
        .insert("password".to_string(), Value::String(auth.credential));
    node.params = auth.params;
    node.remarks = auth.remarks;

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explode_trojan() {
        let mut node = ParsedUri::default();
        let link = "trojan://p%40ss@10.0.0.1:8443?security=tls&sni=cdn.example.com#edge";
        assert!(explode_trojan(link, &mut node));
        assert_eq!(node.fields.get("password").unwrap(), "p@ss");
        assert_eq!(node.fields.get("address").unwrap(), "10.0.0.1");
        assert_eq!(node.fields.get("port").unwrap(), 8443);
        assert_eq!(node.remarks, "edge");
    }

    #[test]
    fn test_explode_trojan_rejects_portless_link() {
        let mut node = ParsedUri::default();
        assert!(!explode_trojan("trojan://pw@example.com", &mut node));
    }
}
