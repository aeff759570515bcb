use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::models::ProxyType;
use crate::parser::explodes::common::parse_query;
use crate::parser::types::ParsedUri;
use crate::utils::base64::base64_decode_repair;
use crate::utils::string::strip_brackets;
use crate::utils::url::url_decode;

// The userinfo is a Base64 payload; both alphabets appear in the wild, so
// the capture accepts '-'/'_' alongside '+'/'/'.
static SS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^ss://([A-Za-z0-9+/_=-]+)@(\[[^\]]+\]|[^:/?#]+):(\d+)(?:\?([^#]*))?(?:#(.*))?$")
        .expect("ss regex")
});

/// Parse a Shadowsocks link into a ParsedUri
///
/// Format: `ss://base64(method:password)@address:port[?query][#remarks]`.
/// The decoded payload splits on its first colon; a payload without one is
/// a rejection.
pub fn explode_ss(link: &str, node: &mut ParsedUri) -> bool {
    if !link.starts_with("ss://") {
        return false;
    }

    let caps = match SS_RE.captures(link.trim()) {
        Some(caps) => caps,
        None => return false,
    };

    let payload = match base64_decode_repair(&caps[1]) {
        Some(decoded) => decoded,
        None => return false,
    };
    let Some((method, password)) = payload.split_once(':') else {
        return false;
    };

    let address = strip_brackets(&caps[2]).to_lowercase();
    let port: u16 = match caps[3].parse() {
        Ok(port) => port,
        Err(_) => return false,
    };

    node.proxy_type = ProxyType::Shadowsocks;
    node.fields
        .insert("address".to_string(), Value::String(address));
    node.fields.insert("port".to_string(), port.into());
    node.fields
        .insert("method".to_string(), Value::String(method.to_string()));
    node.fields
        .insert("password".to_string(), Value::String(password.to_string()));
    node.params = caps
        .get(4)
        .map(|m| parse_query(m.as_str()))
        .unwrap_or_default();
    node.remarks = caps.get(5).map(|m| url_decode(m.as_str())).unwrap_or_default();

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    // base64("aes-256-gcm:pass") == "YWVzLTI1Ni1nY206cGFzcw=="
    #[test]
    fn test_explode_ss() {
        let mut node = ParsedUri::default();
        let link = "ss://YWVzLTI1Ni1nY206cGFzcw==@Server.Example.com:8388#home";
        assert!(explode_ss(link, &mut node));
        assert_eq!(node.proxy_type, ProxyType::Shadowsocks);
        assert_eq!(node.fields.get("method").unwrap(), "aes-256-gcm");
        assert_eq!(node.fields.get("password").unwrap(), "pass");
        assert_eq!(node.fields.get("address").unwrap(), "server.example.com");
        assert_eq!(node.fields.get("port").unwrap(), 8388);
        assert_eq!(node.remarks, "home");
    }

    // base64("colonless") == "Y29sb25sZXNz"
    #[test]
    fn test_explode_ss_rejects_colonless_payload() {
        let mut node = ParsedUri::default();
        assert!(!explode_ss("ss://Y29sb25sZXNz@example.com:8388", &mut node));
    }

    #[test]
    fn test_explode_ss_rejects_bad_base64() {
        let mut node = ParsedUri::default();
        assert!(!explode_ss("ss://@example.com:8388", &mut node));
        assert!(!explode_ss("ss://*bad*@example.com:8388", &mut node));
    }

    // password keeps any colons after the first split
    // base64("chacha20-ietf-poly1305:pw:with:colons") ==
    //   "Y2hhY2hhMjAtaWV0Zi1wb2x5MTMwNTpwdzp3aXRoOmNvbG9ucw=="
    #[test]
    fn test_explode_ss_password_keeps_colons() {
        let mut node = ParsedUri::default();
        let link = "ss://Y2hhY2hhMjAtaWV0Zi1wb2x5MTMwNTpwdzp3aXRoOmNvbG9ucw==@h.example.com:1";
        assert!(explode_ss(link, &mut node));
        assert_eq!(node.fields.get("password").unwrap(), "pw:with:colons");
    }
}
