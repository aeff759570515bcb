//! Turns plaintext proxy subscription URIs (`vless`, `trojan`, `ss`,
//! `vmess`, `hysteria2` and the `hy2` alias) into deduplicated, validated
//! proxy-configuration records.
//!
//! The heart of the crate is a schema-driven pipeline: a per-scheme parser
//! captures the URI's components, the extraction engine resolves each
//! layer's fields against static rule tables, the classifier attaches the
//! security and transport layers, and the canonical SHA-256 digest of the
//! result decides whether the record is new.
//!
//! ```
//! use subsift::{Outcome, Pipeline};
//!
//! let pipeline = Pipeline::new();
//! let outcome = pipeline
//!     .process("vless://b831381d-6324-4d53-ad4f-8cda48b30811@example.com:443?encryption=none");
//! assert!(matches!(outcome, Outcome::Unique(_)));
//! ```

pub mod hash;
pub mod models;
pub mod parser;
pub mod pipeline;
pub mod rules;
pub mod schema;
pub mod store;
pub mod utils;

// Re-export the main types for easier access
pub use models::{ProxyRecord, ProxyType, RejectReason, SecurityType, TransportType};
pub use pipeline::intake::{classify_lines, Intake};
pub use pipeline::{DedupSet, Outcome, Pipeline, RunStats};
pub use store::{MemoryStore, Store, StoreError};
