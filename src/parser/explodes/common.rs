use serde_json::{Map, Value};
use url::{Host, Url};

use crate::parser::types::ParsedUri;
use crate::utils::url::{url_decode, url_decode_iterative};

/// Explode a proxy link into a [`ParsedUri`]
///
/// Detects the scheme and calls the matching parser. `hy2://` is an alias
/// whose only processing step rewrites the scheme token to `hysteria2://`
/// and re-dispatches.
pub fn explode(link: &str, node: &mut ParsedUri) -> bool {
    let link = link.trim();

    if link.is_empty() {
        return false;
    }

    if let Some(rest) = link.strip_prefix("hy2://") {
        let rewritten = format!("hysteria2://{}", rest);
        return explode(&rewritten, node);
    }

    if link.starts_with("vless://") {
        super::vless::explode_vless(link, node)
    } else if link.starts_with("trojan://") {
        super::trojan::explode_trojan(link, node)
    } else if link.starts_with("ss://") {
        super::ss::explode_ss(link, node)
    } else if link.starts_with("vmess://") {
        super::vmess::explode_vmess(link, node)
    } else if link.starts_with("hysteria2://") {
        super::hysteria2::explode_hysteria2(link, node)
    } else {
        false
    }
}

/// Positional captures of an authority-form link
/// (`scheme://credential@address:port[?query][#fragment]`).
pub(crate) struct Authority {
    /// Percent-decoded userinfo component.
    pub credential: String,
    /// Lowercased host, IPv6 brackets stripped.
    pub address: String,
    pub port: u16,
    pub params: Map<String, Value>,
    pub remarks: String,
}

/// Splits an authority-form link into its captures.
///
/// The port must be explicit; a link without one is a structural mismatch.
pub(crate) fn split_authority(link: &str) -> Option<Authority> {
    let url = Url::parse(link).ok()?;

    let credential = url_decode_iterative(url.username());
    if credential.is_empty() {
        return None;
    }

    let address = match url.host()? {
        Host::Domain(domain) => domain.to_lowercase(),
        Host::Ipv4(addr) => addr.to_string(),
        Host::Ipv6(addr) => addr.to_string(),
    };
    let port = url.port()?;

    let params = url.query().map(parse_query).unwrap_or_default();
    let remarks = url.fragment().map(url_decode).unwrap_or_default();

    Some(Authority {
        credential,
        address,
        port,
        params,
        remarks,
    })
}

/// Parses a query string into a parameter map.
///
/// Values are de-escaped iteratively; a value that looks like a
/// brace-delimited literal is speculatively parsed as a nested structure
/// (the `extra` parameter of xhttp carries embedded JSON this way).
pub(crate) fn parse_query(query: &str) -> Map<String, Value> {
    let mut params = Map::new();
    for pair in query.split('&') {
        let Some((key, value)) = pair.split_once('=') else {
            continue;
        };
        if key.is_empty() {
            continue;
        }
        params.insert(url_decode(key), decode_param_value(value));
    }
    params
}

pub(crate) fn decode_param_value(raw: &str) -> Value {
    let decoded = url_decode_iterative(raw);
    let trimmed = decoded.trim();
    if trimmed.starts_with('{') && trimmed.ends_with('}') {
        if let Ok(nested) = serde_json::from_str::<Value>(trimmed) {
            return nested;
        }
    }
    Value::String(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_authority() {
        let auth =
            split_authority("trojan://secret@Example.COM:443?sni=a.com#My%20Node").unwrap();
        assert_eq!(auth.credential, "secret");
        assert_eq!(auth.address, "example.com");
        assert_eq!(auth.port, 443);
        assert_eq!(auth.params.get("sni").unwrap(), "a.com");
        assert_eq!(auth.remarks, "My Node");
    }

    #[test]
    fn test_split_authority_requires_port() {
        assert!(split_authority("trojan://secret@example.com").is_none());
    }

    #[test]
    fn test_split_authority_rejects_oversized_port() {
        assert!(split_authority("trojan://secret@example.com:65536").is_none());
    }

    #[test]
    fn test_split_authority_ipv6() {
        let auth = split_authority("vless://id@[2001:db8::1]:8443").unwrap();
        assert_eq!(auth.address, "2001:db8::1");
    }

    #[test]
    fn test_parse_query_nested_literal() {
        let params = parse_query("extra=%7B%22scMaxEachPostBytes%22%3A1000000%7D&path=/ws");
        assert!(params.get("extra").unwrap().is_object());
        assert_eq!(params.get("path").unwrap(), "/ws");
    }

    #[test]
    fn test_parse_query_skips_bare_tokens() {
        let params = parse_query("flag&key=value");
        assert_eq!(params.len(), 1);
        assert_eq!(params.get("key").unwrap(), "value");
    }

    #[test]
    fn test_explode_rewrites_hy2_alias() {
        let mut node = ParsedUri::default();
        assert!(explode("hy2://pw@example.com:443?insecure=1", &mut node));
        assert_eq!(node.proxy_type, crate::models::ProxyType::Hysteria2);
    }

    #[test]
    fn test_explode_unknown_scheme() {
        let mut node = ParsedUri::default();
        assert!(!explode("wg://peer@example.com:51820", &mut node));
    }
}
