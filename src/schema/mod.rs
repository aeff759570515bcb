//! Static field-rule registry.
//!
//! One table per protocol and per security/transport variant, describing
//! each field's required-ness, value type, default, allowed values, and the
//! processors/validators to run on it. Processors and validators are
//! referenced by name and resolved at extraction time; a name the rules
//! module does not know is a logged no-op, so a table may reference rules
//! ahead of their implementation without breaking extraction.

use serde_json::Value;

use crate::models::{ProxyType, SecurityType, TransportType};

/// Declared value type of a field after processors have run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    Int,
    Mapping,
    Sequence,
}

/// Where a field's raw value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSource {
    /// A positional URI component captured by the protocol parser.
    Inline,
    /// A query parameter (or a parameter merged from an embedded payload).
    Param,
}

/// Const-representable default for an absent field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultValue {
    Str(&'static str),
    StrList(&'static [&'static str]),
}

impl DefaultValue {
    pub fn to_value(self) -> Value {
        match self {
            DefaultValue::Str(s) => Value::String(s.to_string()),
            DefaultValue::StrList(items) => Value::Array(
                items.iter().map(|s| Value::String(s.to_string())).collect(),
            ),
        }
    }
}

/// One field rule. Immutable, defined once per (variant, field) pair.
#[derive(Debug, Clone, Copy)]
pub struct SchemaEntry {
    pub name: &'static str,
    pub required: bool,
    pub field_type: FieldType,
    pub default: Option<DefaultValue>,
    pub allowed: Option<&'static [&'static str]>,
    /// Applied in declared order before any check.
    pub processors: &'static [&'static str],
    /// Accepted if at least one resolvable validator returns true.
    pub validators: &'static [&'static str],
    pub source: FieldSource,
}

const BASE: SchemaEntry = SchemaEntry {
    name: "",
    required: false,
    field_type: FieldType::String,
    default: None,
    allowed: None,
    processors: &[],
    validators: &[],
    source: FieldSource::Param,
};

const ADDRESS: SchemaEntry = SchemaEntry {
    name: "address",
    required: true,
    processors: &["to_lower"],
    validators: &["ipv4", "ipv6", "domain"],
    source: FieldSource::Inline,
    ..BASE
};

const PORT: SchemaEntry = SchemaEntry {
    name: "port",
    required: true,
    field_type: FieldType::Int,
    validators: &["port"],
    source: FieldSource::Inline,
    ..BASE
};

const PASSWORD: SchemaEntry = SchemaEntry {
    name: "password",
    required: true,
    source: FieldSource::Inline,
    ..BASE
};

const ID: SchemaEntry = SchemaEntry {
    name: "id",
    required: true,
    validators: &["uuid"],
    source: FieldSource::Inline,
    ..BASE
};

const FINGERPRINTS: &[&str] = &[
    "chrome",
    "firefox",
    "safari",
    "ios",
    "android",
    "edge",
    "360",
    "qq",
    "random",
    "randomized",
];

const SNI: SchemaEntry = SchemaEntry {
    name: "sni",
    processors: &["to_lower"],
    validators: &["host"],
    ..BASE
};

const FP: SchemaEntry = SchemaEntry {
    name: "fp",
    processors: &["to_lower"],
    allowed: Some(FINGERPRINTS),
    ..BASE
};

const VLESS_FIELDS: &[SchemaEntry] = &[
    ADDRESS,
    PORT,
    ID,
    SchemaEntry {
        name: "encryption",
        default: Some(DefaultValue::Str("none")),
        allowed: Some(&["none"]),
        processors: &["to_lower"],
        ..BASE
    },
    SchemaEntry {
        name: "flow",
        allowed: Some(&["xtls-rprx-vision", "xtls-rprx-vision-udp443"]),
        processors: &["to_lower"],
        ..BASE
    },
];

const TROJAN_FIELDS: &[SchemaEntry] = &[ADDRESS, PORT, PASSWORD];

const SS_FIELDS: &[SchemaEntry] = &[
    ADDRESS,
    PORT,
    SchemaEntry {
        name: "method",
        required: true,
        allowed: Some(&[
            "2022-blake3-aes-128-gcm",
            "2022-blake3-aes-256-gcm",
            "2022-blake3-chacha20-poly1305",
            "aes-256-gcm",
            "aes-128-gcm",
            "chacha20-poly1305",
            "chacha20-ietf-poly1305",
            "xchacha20-poly1305",
            "xchacha20-ietf-poly1305",
            "none",
            "plain",
        ]),
        source: FieldSource::Inline,
        ..BASE
    },
    PASSWORD,
];

const VMESS_FIELDS: &[SchemaEntry] = &[
    ADDRESS,
    PORT,
    ID,
    SchemaEntry {
        name: "encryption",
        default: Some(DefaultValue::Str("auto")),
        allowed: Some(&["aes-128-gcm", "chacha20-poly1305", "auto", "none", "zero"]),
        processors: &["to_lower"],
        ..BASE
    },
];

const HYSTERIA2_FIELDS: &[SchemaEntry] = &[
    ADDRESS,
    PORT,
    PASSWORD,
    SchemaEntry {
        name: "insecure",
        required: true,
        default: Some(DefaultValue::Str("0")),
        allowed: Some(&["0", "1"]),
        ..BASE
    },
    SNI,
    SchemaEntry { name: "pinSHA256", ..BASE },
    SchemaEntry {
        name: "obfs",
        allowed: Some(&["salamander"]),
        ..BASE
    },
    SchemaEntry { name: "obfs-password", ..BASE },
];

const TLS_FIELDS: &[SchemaEntry] = &[
    SNI,
    FP,
    SchemaEntry {
        name: "alpn",
        field_type: FieldType::Sequence,
        default: Some(DefaultValue::StrList(&["h2", "http/1.1"])),
        allowed: Some(&["h2", "http/1.1", "http/1.0", "fromMitM"]),
        processors: &["split_comma_to_list"],
        ..BASE
    },
];

const REALITY_FIELDS: &[SchemaEntry] = &[
    SNI,
    FP,
    SchemaEntry { name: "pbk", ..BASE },
    SchemaEntry { name: "sid", ..BASE },
    SchemaEntry { name: "spx", ..BASE },
];

const HOST_PARAM: SchemaEntry = SchemaEntry {
    name: "host",
    processors: &["to_lower"],
    validators: &["host"],
    ..BASE
};

const PATH_PARAM: SchemaEntry = SchemaEntry {
    name: "path",
    required: true,
    default: Some(DefaultValue::Str("/")),
    ..BASE
};

const WS_FIELDS: &[SchemaEntry] = &[HOST_PARAM, PATH_PARAM];

const HTTPUPGRADE_FIELDS: &[SchemaEntry] = &[HOST_PARAM, PATH_PARAM];

const XHTTP_FIELDS: &[SchemaEntry] = &[
    HOST_PARAM,
    PATH_PARAM,
    SchemaEntry {
        name: "mode",
        required: true,
        default: Some(DefaultValue::Str("auto")),
        allowed: Some(&["auto", "packet-up", "stream-up", "stream-one"]),
        processors: &["to_lower"],
        ..BASE
    },
    SchemaEntry {
        name: "extra",
        field_type: FieldType::Mapping,
        ..BASE
    },
];

const GRPC_FIELDS: &[SchemaEntry] = &[
    SchemaEntry { name: "serviceName", ..BASE },
    SchemaEntry {
        name: "mode",
        required: true,
        default: Some(DefaultValue::Str("gun")),
        allowed: Some(&["gun", "multi"]),
        processors: &["to_lower"],
        ..BASE
    },
    SchemaEntry { name: "authority", ..BASE },
];

const RAW_FIELDS: &[SchemaEntry] = &[
    SchemaEntry {
        name: "headerType",
        default: Some(DefaultValue::Str("none")),
        allowed: Some(&["none", "http"]),
        processors: &["to_lower"],
        ..BASE
    },
    SchemaEntry {
        name: "host",
        field_type: FieldType::Sequence,
        processors: &["to_lower", "split_comma_to_list"],
        ..BASE
    },
    SchemaEntry {
        name: "path",
        field_type: FieldType::Sequence,
        default: Some(DefaultValue::StrList(&["/"])),
        processors: &["split_comma_to_list"],
        ..BASE
    },
];

/// Field table for a protocol. `Unknown` (and the schema-less `hy2` alias)
/// resolve to an empty table.
pub fn protocol_schema(proxy_type: ProxyType) -> &'static [SchemaEntry] {
    match proxy_type {
        ProxyType::Vless => VLESS_FIELDS,
        ProxyType::Trojan => TROJAN_FIELDS,
        ProxyType::Shadowsocks => SS_FIELDS,
        ProxyType::VMess => VMESS_FIELDS,
        ProxyType::Hysteria2 => HYSTERIA2_FIELDS,
        ProxyType::Unknown => &[],
    }
}

/// Field table for a security layer variant.
pub fn security_schema(security: SecurityType) -> &'static [SchemaEntry] {
    match security {
        SecurityType::None => &[],
        SecurityType::Tls => TLS_FIELDS,
        SecurityType::Reality => REALITY_FIELDS,
    }
}

/// Field table for a transport layer variant.
pub fn transport_schema(transport: TransportType) -> &'static [SchemaEntry] {
    match transport {
        TransportType::Raw => RAW_FIELDS,
        TransportType::Ws => WS_FIELDS,
        TransportType::HttpUpgrade => HTTPUPGRADE_FIELDS,
        TransportType::Xhttp => XHTTP_FIELDS,
        TransportType::Grpc => GRPC_FIELDS,
    }
}
