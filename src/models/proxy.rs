//! Proxy model definitions
//!
//! Contains the closed enums identifying the protocol, security and
//! transport variants a record can carry.

/// Represents the protocol a subscription URI describes.
/// This is the canonical enum used for scheme dispatch across the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProxyType {
    #[default]
    Unknown,
    Vless,
    Trojan,
    Shadowsocks,
    VMess,
    Hysteria2,
}

impl ProxyType {
    /// The lowercase identifier stored in a record's `protocol.type` field.
    pub fn as_str(self) -> &'static str {
        match self {
            ProxyType::Vless => "vless",
            ProxyType::Trojan => "trojan",
            ProxyType::Shadowsocks => "ss",
            ProxyType::VMess => "vmess",
            ProxyType::Hysteria2 => "hysteria2",
            ProxyType::Unknown => "unknown",
        }
    }

    /// Recognizes the scheme prefix of a candidate link.
    ///
    /// `hy2://` is an alias and resolves to [`ProxyType::Hysteria2`]; the
    /// actual scheme rewrite happens at parser dispatch.
    pub fn from_link(link: &str) -> Option<ProxyType> {
        let link = link.trim();
        if link.starts_with("vless://") {
            Some(ProxyType::Vless)
        } else if link.starts_with("trojan://") {
            Some(ProxyType::Trojan)
        } else if link.starts_with("ss://") {
            Some(ProxyType::Shadowsocks)
        } else if link.starts_with("vmess://") {
            Some(ProxyType::VMess)
        } else if link.starts_with("hysteria2://") || link.starts_with("hy2://") {
            Some(ProxyType::Hysteria2)
        } else {
            None
        }
    }
}

/// Scheme prefixes accepted by the pipeline, alias included.
pub const SCHEME_PREFIXES: &[&str] = &[
    "vless://",
    "trojan://",
    "ss://",
    "vmess://",
    "hysteria2://",
    "hy2://",
];

/// The security layer attached to a proxy record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SecurityType {
    None,
    Tls,
    Reality,
}

impl SecurityType {
    pub fn as_str(self) -> &'static str {
        match self {
            SecurityType::None => "none",
            SecurityType::Tls => "tls",
            SecurityType::Reality => "reality",
        }
    }

    /// Classifies the `security` query parameter; anything unknown or
    /// absent falls back to `none`.
    pub fn classify(label: Option<&str>) -> SecurityType {
        match label.map(|s| s.trim().to_lowercase()).as_deref() {
            Some("tls") => SecurityType::Tls,
            Some("reality") => SecurityType::Reality,
            _ => SecurityType::None,
        }
    }
}

/// The transport layer attached to a proxy record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportType {
    Raw,
    Ws,
    Grpc,
    Xhttp,
    HttpUpgrade,
}

impl TransportType {
    pub fn as_str(self) -> &'static str {
        match self {
            TransportType::Raw => "raw",
            TransportType::Ws => "ws",
            TransportType::Grpc => "grpc",
            TransportType::Xhttp => "xhttp",
            TransportType::HttpUpgrade => "httpupgrade",
        }
    }

    /// Classifies the `type` query parameter; anything unknown or absent
    /// falls back to `raw`. `tcp` is the legacy spelling of `raw` still
    /// emitted by older clients.
    pub fn classify(label: Option<&str>) -> TransportType {
        match label.map(|s| s.trim().to_lowercase()).as_deref() {
            Some("ws") => TransportType::Ws,
            Some("grpc") => TransportType::Grpc,
            Some("xhttp") => TransportType::Xhttp,
            Some("httpupgrade") => TransportType::HttpUpgrade,
            _ => TransportType::Raw,
        }
    }
}
