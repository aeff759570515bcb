mod common;
mod hysteria2;
mod ss;
mod trojan;
mod vless;
mod vmess;

pub use common::explode;
pub use hysteria2::explode_hysteria2;
pub use ss::explode_ss;
pub use trojan::explode_trojan;
pub use vless::explode_vless;
pub use vmess::explode_vmess;
