//! Schema-driven field extraction and validation.

use log::debug;
use serde_json::{Map, Value};

use crate::rules;
use crate::schema::{FieldSource, FieldType, SchemaEntry};

/// Resolves one layer's fields against its schema table.
///
/// Inline entries read from `fields`; param entries *consume* their entry
/// from `params`, so parameters are partitioned across the protocol,
/// security and transport layers rather than duplicated.
///
/// Returns `None` only on an explicit failure: a required field with no
/// default that is absent, a type mismatch, a disallowed value, or a value
/// every resolvable validator rejects. An empty-but-valid mapping is an
/// acceptable result for any layer.
pub fn resolve_layer(
    fields: &Map<String, Value>,
    params: &mut Map<String, Value>,
    schema: &'static [SchemaEntry],
) -> Option<Map<String, Value>> {
    let mut resolved = Map::new();

    for entry in schema {
        let raw = match entry.source {
            FieldSource::Inline => fields.get(entry.name).cloned(),
            FieldSource::Param => params.remove(entry.name),
        };
        // An empty raw value is absence, not a value to validate.
        let raw = raw.filter(|v| !matches!(v, Value::String(s) if s.is_empty()));

        let mut value = match raw {
            Some(value) => value,
            None => match entry.default {
                Some(default) => default.to_value(),
                None if entry.required => {
                    debug!("required field '{}' absent", entry.name);
                    return None;
                }
                None => continue,
            },
        };

        for processor in entry.processors {
            value = rules::apply_processor(processor, value);
        }

        if !type_matches(&value, entry.field_type) {
            debug!("field '{}' failed type check", entry.name);
            return None;
        }

        if let Some(allowed) = entry.allowed {
            if !allowed_matches(&value, allowed) {
                debug!("field '{}' carries a disallowed value", entry.name);
                return None;
            }
        }

        if !rules::validate(&value, entry.validators) {
            debug!("field '{}' failed every validator", entry.name);
            return None;
        }

        // A field that resolved to nothing stays absent.
        if matches!(&value, Value::String(s) if s.is_empty()) {
            continue;
        }

        resolved.insert(entry.name.to_string(), value);
    }

    Some(resolved)
}

/// Type checking precedes the allowed-set and validator checks; a value of
/// the wrong shape is an unconditional rejection.
fn type_matches(value: &Value, field_type: FieldType) -> bool {
    match field_type {
        FieldType::String => value.is_string(),
        FieldType::Int => value.is_i64() || value.is_u64(),
        FieldType::Mapping => value.is_object(),
        FieldType::Sequence => value.is_array(),
    }
}

fn allowed_matches(value: &Value, allowed: &[&str]) -> bool {
    match value {
        Value::String(s) => allowed.contains(&s.as_str()),
        // Sequences are checked element-wise.
        Value::Array(items) => items.iter().all(|item| allowed_matches(item, allowed)),
        _ => false,
    }
}
