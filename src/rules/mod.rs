//! Named processors and validators referenced by the schema registry.
//!
//! Schema tables carry rule *names*; resolution happens here at extraction
//! time. An unresolvable name is a logged no-op so that a table may drift
//! ahead of the implemented rule set without poisoning extraction.

use std::net::{Ipv4Addr, Ipv6Addr};

use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use uuid::Uuid;

use crate::utils::string::split_comma_list;
use crate::utils::url::url_decode_iterative;

static DOMAIN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9]([a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(\.[a-zA-Z0-9]([a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("domain regex")
});

/// Applies a single named processor to a value.
///
/// Processors are pure transforms; each handles the value shapes it
/// understands and passes everything else through unchanged. An unknown
/// name logs and returns the value untouched.
pub fn apply_processor(name: &str, value: Value) -> Value {
    match name {
        "to_lower" => lowercase_value(value),
        "url_decode" => match value {
            Value::String(s) => Value::String(url_decode_iterative(&s)),
            other => other,
        },
        "decode_base64" => match value {
            Value::String(s) => match crate::utils::base64::base64_decode_repair(&s) {
                Some(decoded) => Value::String(decoded),
                None => Value::String(s),
            },
            other => other,
        },
        "split_comma_to_list" => match value {
            Value::String(s) => Value::Array(
                split_comma_list(&s).into_iter().map(Value::String).collect(),
            ),
            other => other,
        },
        "slash_prefix" => match value {
            Value::String(s) => {
                Value::String(crate::utils::string::ensure_slash_prefix(&s))
            }
            other => other,
        },
        "coerce_uuid" => match value {
            Value::String(s) => Value::String(coerce_uuid(&s)),
            other => other,
        },
        other => {
            warn!("unknown processor '{}', leaving value unchanged", other);
            value
        }
    }
}

fn lowercase_value(value: Value) -> Value {
    match value {
        Value::String(s) => Value::String(s.to_lowercase()),
        Value::Array(items) => Value::Array(items.into_iter().map(lowercase_value).collect()),
        other => other,
    }
}

/// Coerces an identifier to canonical UUID form.
///
/// An input that already parses as a UUID is kept verbatim. Anything else
/// maps to the UUIDv5 of the raw string under the nil namespace, so the
/// same opaque identifier always yields the same UUID across runs.
pub fn coerce_uuid(raw: &str) -> String {
    if Uuid::parse_str(raw).is_ok() {
        raw.to_string()
    } else {
        Uuid::new_v5(&Uuid::nil(), raw.as_bytes()).to_string()
    }
}

/// Runs a named validator against a value.
///
/// Returns `None` for a name this module does not know, which the caller
/// treats as "nothing to check" rather than a failure.
pub fn check_validator(name: &str, value: &Value) -> Option<bool> {
    let result = match name {
        "ipv4" => as_str(value).map(|s| s.parse::<Ipv4Addr>().is_ok()),
        "ipv6" => as_str(value).map(|s| s.parse::<Ipv6Addr>().is_ok()),
        "domain" => as_str(value).map(|s| DOMAIN_RE.is_match(s)),
        "host" => as_str(value).map(is_host),
        "uuid" => as_str(value).map(|s| Uuid::parse_str(s).is_ok()),
        "path" => as_str(value).map(|s| s.starts_with('/')),
        "port" => Some(value.as_i64().map(|p| (1..=65535).contains(&p)).unwrap_or(false)),
        other => {
            warn!("unknown validator '{}', skipping", other);
            return None;
        }
    };
    // String validators fail non-string values outright.
    Some(result.unwrap_or(false))
}

/// Applies a validator list with OR semantics: the value is accepted if at
/// least one resolvable validator returns true. An empty list, or a list
/// that resolves to nothing, imposes no check.
pub fn validate(value: &Value, validators: &[&str]) -> bool {
    let mut resolved_any = false;
    for name in validators {
        match check_validator(name, value) {
            Some(true) => return true,
            Some(false) => resolved_any = true,
            None => {}
        }
    }
    !resolved_any
}

fn as_str(value: &Value) -> Option<&str> {
    value.as_str()
}

fn is_host(s: &str) -> bool {
    DOMAIN_RE.is_match(s) || s.parse::<Ipv4Addr>().is_ok() || s.parse::<Ipv6Addr>().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ipv4_validator() {
        assert_eq!(check_validator("ipv4", &json!("192.168.1.1")), Some(true));
        assert_eq!(check_validator("ipv4", &json!("256.1.1.1")), Some(false));
        assert_eq!(check_validator("ipv4", &json!("example.com")), Some(false));
    }

    #[test]
    fn test_ipv6_validator_accepts_compressed_form() {
        assert_eq!(check_validator("ipv6", &json!("2001:db8::1")), Some(true));
        assert_eq!(check_validator("ipv6", &json!("not:an:address")), Some(false));
    }

    #[test]
    fn test_domain_validator() {
        assert_eq!(check_validator("domain", &json!("example.com")), Some(true));
        assert_eq!(check_validator("domain", &json!("a-b.example.com")), Some(true));
        assert_eq!(check_validator("domain", &json!("-bad.example.com")), Some(false));
    }

    #[test]
    fn test_port_validator_boundaries() {
        assert_eq!(check_validator("port", &json!(1)), Some(true));
        assert_eq!(check_validator("port", &json!(65535)), Some(true));
        assert_eq!(check_validator("port", &json!(0)), Some(false));
        assert_eq!(check_validator("port", &json!(65536)), Some(false));
    }

    #[test]
    fn test_path_validator() {
        assert_eq!(check_validator("path", &json!("/ws")), Some(true));
        assert_eq!(check_validator("path", &json!("ws")), Some(false));
    }

    #[test]
    fn test_unknown_validator_resolves_to_none() {
        assert_eq!(check_validator("entropy", &json!("x")), None);
    }

    #[test]
    fn test_validate_or_semantics() {
        let addr = json!("example.com");
        assert!(validate(&addr, &["ipv4", "ipv6", "domain"]));
        assert!(!validate(&json!("not valid!"), &["ipv4", "ipv6", "domain"]));
        // empty list imposes no check
        assert!(validate(&json!("anything"), &[]));
        // a list of only-unknown names imposes no check either
        assert!(validate(&json!("anything"), &["entropy"]));
    }

    #[test]
    fn test_to_lower_recurses_into_lists() {
        let value = apply_processor("to_lower", json!(["Host.COM", "Other.Net"]));
        assert_eq!(value, json!(["host.com", "other.net"]));
    }

    #[test]
    fn test_split_comma_to_list() {
        let value = apply_processor("split_comma_to_list", json!("h2,http/1.1"));
        assert_eq!(value, json!(["h2", "http/1.1"]));
    }

    #[test]
    fn test_unknown_processor_is_noop() {
        assert_eq!(apply_processor("frobnicate", json!("x")), json!("x"));
    }

    #[test]
    fn test_coerce_uuid_keeps_valid_uuid_verbatim() {
        let id = "B831381D-6324-4d53-ad4f-8cda48b30811";
        assert_eq!(coerce_uuid(id), id);
    }

    #[test]
    fn test_coerce_uuid_is_deterministic() {
        let a = coerce_uuid("my-opaque-token");
        let b = coerce_uuid("my-opaque-token");
        assert_eq!(a, b);
        assert!(Uuid::parse_str(&a).is_ok());
        assert_ne!(a, coerce_uuid("other-token"));
    }
}
