pub mod explodes;
pub mod extract;
pub mod layers;
pub mod types;

pub use explodes::explode;
pub use types::ParsedUri;
