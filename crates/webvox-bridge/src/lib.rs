//! Bidirectional bridge between an authoritative voxel world and
//! lightweight web clients.
//!
//! The bridge translates world state into the line-oriented wire protocol
//! and client edits back: coordinate remapping, block-id encoding, sign
//! orientation, and per-client entity visibility. All of it runs on the
//! host simulation's single execution context; see [`bridge::Task`] for
//! how work gets there.

pub mod bridge;
pub mod host;
pub mod session;

mod blocks;
mod players;
mod signs;
mod snapshot;

pub use bridge::{Bridge, Task};
pub use host::{EntityId, EntityState, HostEvent, WorldHost};
pub use session::{ClientId, LineSink, Sessions};

#[cfg(test)]
mod scenarios;
#[cfg(test)]
pub(crate) mod testutil;
