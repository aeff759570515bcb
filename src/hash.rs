//! Canonicalization and content hashing.
//!
//! A record's identity is the SHA-256 of its canonical form: the three
//! layer mappings with every string leaf lowercased, serialized with keys
//! in sorted order. Remarks and leftover query parameters never reach the
//! canonical form, so cosmetic differences cannot split identities.
//!
//! Key ordering comes from `serde_json`'s BTreeMap-backed `Map`; the
//! `preserve_order` feature must stay off for the digest to be stable.

use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use crate::models::ProxyRecord;

/// The canonical, hash-relevant form of a record.
pub fn canonicalize(record: &ProxyRecord) -> Value {
    let mut root = Map::new();
    root.insert(
        "protocol".to_string(),
        lowercase_leaves(Value::Object(record.protocol.clone())),
    );
    root.insert(
        "security".to_string(),
        lowercase_leaves(Value::Object(record.security.clone())),
    );
    root.insert(
        "transport".to_string(),
        lowercase_leaves(Value::Object(record.transport.clone())),
    );
    Value::Object(root)
}

/// Computes the hex-encoded SHA-256 digest of a record's canonical form.
pub fn content_hash(record: &ProxyRecord) -> String {
    let serialized = canonicalize(record).to_string();
    let mut hasher = Sha256::new();
    hasher.update(serialized.as_bytes());
    hex::encode(hasher.finalize())
}

/// Case-folds every string leaf at any nesting depth. Nested mappings
/// (e.g. the xhttp `extra` object) fold too, not just the top level.
fn lowercase_leaves(value: Value) -> Value {
    match value {
        Value::String(s) => Value::String(s.to_lowercase()),
        Value::Array(items) => {
            Value::Array(items.into_iter().map(lowercase_leaves).collect())
        }
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (k, lowercase_leaves(v)))
                .collect(),
        ),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record_with(protocol: Value, remarks: &str) -> ProxyRecord {
        let mut record = ProxyRecord::new(
            protocol.as_object().cloned().unwrap(),
            remarks.to_string(),
        );
        record
            .security
            .insert("type".to_string(), json!("none"));
        record
            .transport
            .insert("type".to_string(), json!("raw"));
        record
    }

    #[test]
    fn test_remarks_do_not_affect_hash() {
        let a = record_with(json!({"type": "vless", "address": "h.example.com"}), "A");
        let b = record_with(json!({"type": "vless", "address": "h.example.com"}), "B");
        assert_eq!(content_hash(&a), content_hash(&b));
    }

    #[test]
    fn test_case_is_folded_at_any_depth() {
        let a = record_with(
            json!({"type": "vless", "address": "Host.Example.com", "id": "ABC"}),
            "",
        );
        let b = record_with(
            json!({"type": "vless", "address": "host.example.com", "id": "abc"}),
            "",
        );
        assert_eq!(content_hash(&a), content_hash(&b));
    }

    #[test]
    fn test_nested_structures_fold_too() {
        let mut a = record_with(json!({"type": "vmess"}), "");
        a.transport
            .insert("extra".to_string(), json!({"mode": "Packet-UP"}));
        let mut b = record_with(json!({"type": "vmess"}), "");
        b.transport
            .insert("extra".to_string(), json!({"mode": "packet-up"}));
        assert_eq!(content_hash(&a), content_hash(&b));
    }

    #[test]
    fn test_field_difference_changes_hash() {
        let a = record_with(json!({"type": "vless", "port": 443}), "");
        let b = record_with(json!({"type": "vless", "port": 8443}), "");
        assert_ne!(content_hash(&a), content_hash(&b));
    }

    #[test]
    fn test_digest_shape() {
        let record = record_with(json!({"type": "ss"}), "");
        let digest = content_hash(&record);
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
