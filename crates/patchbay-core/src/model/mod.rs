//! Endpoint data model
//!
//! - [`Host`] / [`Port`]: validated address halves
//! - [`Protocol`]: service family tag
//! - [`InJack`] / [`OutJack`]: endpoints participating in a patch

pub mod address;
pub mod jack;
pub mod protocol;

pub use address::{Host, Port};
pub use jack::{Endpoint, InJack, Jack, JackDefect, JackKind, JackRef, OutJack};
pub use protocol::{Protocol, ProtocolFamily};
