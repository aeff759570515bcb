use serde_json::Value;

use crate::models::ProxyType;
use crate::parser::explodes::common::split_authority;
use crate::parser::types::ParsedUri;

/// Parse a Hysteria2 link into a ParsedUri
///
/// Format: `hysteria2://password@address:port[?query][#remarks]`. The
/// `hy2://` alias never reaches this parser; dispatch rewrites it first.
pub fn explode_hysteria2(link: &str, node: &mut ParsedUri) -> bool {
    if !link.starts_with("hysteria2://") {
        return false;
    }

    let auth = match split_authority(link) {
        Some(auth) => auth,
        None => return false,
    };

    node.proxy_type = ProxyType::Hysteria2;
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
    fn test_explode_hysteria2() {
        let mut node = ParsedUri::default();
        let link =
            "hysteria2://letmein@gateway.example.com:443?insecure=1&obfs=salamander&obfs-password=pw#hy";
        assert!(explode_hysteria2(link, &mut node));
        assert_eq!(node.proxy_type, ProxyType::Hysteria2);
        assert_eq!(node.fields.get("password").unwrap(), "letmein");
        assert_eq!(node.params.get("obfs").unwrap(), "salamander");
    }

    #[test]
    fn test_explode_hysteria2_requires_password() {
        let mut node = ParsedUri::default();
        assert!(!explode_hysteria2("hysteria2://example.com:443", &mut node));
    }
}
