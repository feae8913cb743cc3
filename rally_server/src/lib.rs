//! Authoritative match hosting

pub mod env;
pub mod host;
pub mod lobby;
pub mod transport;

pub use env::*;
pub use host::*;
pub use lobby::*;
pub use transport::*;
