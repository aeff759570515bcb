pub mod proxy;
pub mod record;

pub use proxy::{ProxyType, SecurityType, TransportType, SCHEME_PREFIXES};
pub use record::{ProxyRecord, RejectReason};
