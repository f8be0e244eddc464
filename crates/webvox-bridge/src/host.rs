//! Interface to the authoritative host simulation.
//!
//! The bridge never caches world state; every operation reads and writes
//! through [`WorldHost`] on the simulation's execution context. The host
//! notifies the bridge of changes through the [`HostEvent`] enum, one
//! bridge entry point per kind.

use std::fmt;

use glam::DVec3;
use webvox_core::{BlockDescriptor, Material, Result, WorldPos};

/// Host-side identifier of a moving entity (player).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EntityId(pub i32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A host entity's position and identity at one instant.
///
/// Yaw and pitch are in degrees, host convention; the wire encoding flips
/// them to negated radians.
#[derive(Clone, Debug)]
pub struct EntityState {
    pub id: EntityId,
    pub name: String,
    pub pos: DVec3,
    pub yaw: f32,
    pub pitch: f32,
}

/// The authoritative world, as far as the bridge is concerned.
///
/// All methods are called from the simulation context only. `block_at` and
/// `highest_block_y` are total: queries outside the loaded world answer
/// with air/ground defaults rather than failing.
pub trait WorldHost {
    /// Read the block at a world position.
    fn block_at(&self, pos: WorldPos) -> BlockDescriptor;

    /// Commit a block change. `data` of `None` means the caller has no
    /// auxiliary byte to offer and the existing one must be kept.
    fn set_block(&mut self, pos: WorldPos, material: Material, data: Option<u8>) -> Result<()>;

    /// Highest non-air Y at a column, used to place attaching clients.
    fn highest_block_y(&self, x: i32, z: i32) -> i32;

    /// Text lines of the sign at `pos`, if that block holds one.
    fn sign_lines(&self, pos: WorldPos) -> Option<Vec<String>>;

    /// Commit a wall-mounted sign with the given orientation byte and text
    /// as its first line.
    fn place_wall_sign(&mut self, pos: WorldPos, orientation: u8, text: &str) -> Result<()>;

    /// Entities currently alive in the world.
    fn entities(&self) -> Vec<EntityState>;

    /// Relay a chat line into the host world.
    fn broadcast_chat(&mut self, message: &str);
}

/// A change notification from the host simulation.
#[derive(Clone, Debug)]
pub enum HostEvent {
    /// A block was set (break events arrive as a change to air).
    BlockChanged {
        pos: WorldPos,
        material: Material,
        data: u8,
    },
    /// Sign text or orientation changed.
    SignChanged {
        pos: WorldPos,
        material: Material,
        data: u8,
        lines: Vec<String>,
    },
    /// An entity moved (or turned in place).
    EntityMoved(EntityState),
    /// An entity appeared, independent of movement.
    EntitySpawned(EntityState),
    /// An entity despawned or died.
    EntityRemoved(EntityId),
    /// A chat line was spoken in the host world.
    Chat(String),
}
