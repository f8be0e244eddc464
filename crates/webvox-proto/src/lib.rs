//! The line-oriented wire protocol spoken between the bridge and its web
//! clients: ASCII lines, comma-separated fields, one command per line,
//! newline reserved as the terminator.

pub mod client;
pub mod server;

pub use client::{ClientCommand, ParseError};
pub use server::ServerCommand;
