//! Pipeline orchestration: parse, classify, hash, dedup.

pub mod intake;

use std::collections::HashSet;
use std::sync::Mutex;

use log::{debug, info};
use serde_json::Value;

use crate::hash::content_hash;
use crate::models::{ProxyRecord, ProxyType, RejectReason};
use crate::parser::layers::{classify_security, classify_transport};
use crate::parser::{explode, extract::resolve_layer, ParsedUri};
use crate::schema::protocol_schema;
use crate::store::{Store, StoreError};

/// Terminal state of one candidate URI.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// First sighting of this content hash; the caller owns the record.
    Unique(ProxyRecord),
    /// Canonically identical to an earlier record; carries the shared hash.
    Duplicate(String),
    Rejected(RejectReason),
}

/// Aggregate counts for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub candidates: usize,
    pub unknown_scheme: usize,
    pub parse_failures: usize,
    pub validation_failures: usize,
    pub unique: usize,
    pub duplicates: usize,
}

impl RunStats {
    fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Unique(_) => self.unique += 1,
            Outcome::Duplicate(_) => self.duplicates += 1,
            Outcome::Rejected(RejectReason::UnknownScheme) => self.unknown_scheme += 1,
            Outcome::Rejected(RejectReason::Parse) => self.parse_failures += 1,
            Outcome::Rejected(RejectReason::InvalidSecurityParams)
            | Outcome::Rejected(RejectReason::InvalidTransportParams) => {
                self.validation_failures += 1
            }
        }
    }
}

/// Content hashes observed so far.
///
/// Membership check and insertion are a single guarded operation, so two
/// workers hashing canonically identical URIs cannot both win uniqueness.
#[derive(Debug, Default)]
pub struct DedupSet {
    seen: Mutex<HashSet<String>>,
}

impl DedupSet {
    pub fn new() -> Self {
        DedupSet::default()
    }

    pub fn seed<I, S>(&self, hashes: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = self.seen.lock().expect("dedup set poisoned");
        seen.extend(hashes.into_iter().map(Into::into));
    }

    /// Returns true if the hash was not seen before; the hash is recorded
    /// either way.
    pub fn insert(&self, hash: &str) -> bool {
        let mut seen = self.seen.lock().expect("dedup set poisoned");
        seen.insert(hash.to_string())
    }

    pub fn len(&self) -> usize {
        self.seen.lock().expect("dedup set poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Drives candidate URIs through parse → security → transport → hash →
/// dedup. One instance per run; seed it to stay dedup-stable across runs.
#[derive(Debug, Default)]
pub struct Pipeline {
    dedup: DedupSet,
}

impl Pipeline {
    pub fn new() -> Self {
        Pipeline::default()
    }

    /// A pipeline whose dedup set already contains previously persisted
    /// hashes.
    pub fn with_seen<I, S>(hashes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let pipeline = Pipeline::new();
        pipeline.dedup.seed(hashes);
        pipeline
    }

    pub fn dedup(&self) -> &DedupSet {
        &self.dedup
    }

    /// Processes a single candidate URI to its terminal state.
    ///
    /// Every rejection is local to the candidate; the caller is free to
    /// keep feeding the pipeline afterwards.
    pub fn process(&self, uri: &str) -> Outcome {
        let link = uri.trim();

        let proxy_type = match ProxyType::from_link(link) {
            Some(proxy_type) => proxy_type,
            None => {
                debug!("unrecognized scheme: {}", link);
                return Outcome::Rejected(RejectReason::UnknownScheme);
            }
        };

        let mut node = ParsedUri::default();
        if !explode(link, &mut node) {
            debug!("{} link failed structural parse", proxy_type.as_str());
            return Outcome::Rejected(RejectReason::Parse);
        }

        let mut protocol = match resolve_layer(
            &node.fields,
            &mut node.params,
            protocol_schema(node.proxy_type),
        ) {
            Some(protocol) => protocol,
            None => {
                debug!("{} link failed field extraction", proxy_type.as_str());
                return Outcome::Rejected(RejectReason::Parse);
            }
        };
        protocol.insert(
            "type".to_string(),
            Value::String(node.proxy_type.as_str().to_string()),
        );

        let mut record = ProxyRecord::new(protocol, node.remarks);
        if !classify_security(&mut record, &mut node.params) {
            return Outcome::Rejected(RejectReason::InvalidSecurityParams);
        }
        if !classify_transport(&mut record, &mut node.params) {
            return Outcome::Rejected(RejectReason::InvalidTransportParams);
        }

        // Whatever is left in node.params stays out of the record.
        let digest = content_hash(&record);
        record.hash = Some(digest.clone());

        if self.dedup.insert(&digest) {
            Outcome::Unique(record)
        } else {
            Outcome::Duplicate(digest)
        }
    }

    /// Processes every unprocessed URI the store reports, marking each one
    /// back (with its hash when unique) and returning the emitted records
    /// plus the run counts.
    pub fn run<S: Store + ?Sized>(
        &self,
        store: &mut S,
    ) -> Result<(Vec<ProxyRecord>, RunStats), StoreError> {
        let candidates = store.unprocessed()?;
        let mut stats = RunStats::default();
        let mut emitted = Vec::new();

        for uri in candidates {
            stats.candidates += 1;
            let outcome = self.process(&uri);
            stats.record(&outcome);
            match outcome {
                Outcome::Unique(record) => {
                    store.mark_processed(&uri, record.hash.as_deref())?;
                    emitted.push(record);
                }
                Outcome::Duplicate(_) | Outcome::Rejected(_) => {
                    store.mark_processed(&uri, None)?;
                }
            }
        }

        info!(
            "run complete: {} candidates, {} unique, {} duplicates, {} unknown scheme, {} parse failures, {} validation failures",
            stats.candidates,
            stats.unique,
            stats.duplicates,
            stats.unknown_scheme,
            stats.parse_failures,
            stats.validation_failures
        );

        Ok((emitted, stats))
    }
}
