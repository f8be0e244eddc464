//! Shared test doubles: a recording sink and an in-memory world.

use std::sync::Arc;

use glam::DVec3;
use hashbrown::HashMap;
use parking_lot::Mutex;
use webvox_core::{BlockDescriptor, Material, Result, WorldPos};

use crate::host::{EntityId, EntityState, WorldHost};
use crate::session::LineSink;

/// Sink that records every line it is asked to deliver.
#[derive(Clone, Default)]
pub struct RecordingSink(Arc<Mutex<Vec<String>>>);

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines sent so far, leaving them in place.
    pub fn lines(&self) -> Vec<String> {
        self.0.lock().clone()
    }

    /// Drain and return all recorded lines.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.0.lock())
    }
}

impl LineSink for RecordingSink {
    fn send_line(&self, line: &str) {
        self.0.lock().push(line.to_string());
    }
}

/// Minimal in-memory world host. Unset cells read as air.
#[derive(Default)]
pub struct MockWorld {
    pub blocks: HashMap<WorldPos, BlockDescriptor>,
    pub signs: HashMap<WorldPos, Vec<String>>,
    pub entities: Vec<EntityState>,
    pub chat: Vec<String>,
}

impl MockWorld {
    pub fn with_block(mut self, pos: WorldPos, material: Material, data: u8) -> Self {
        self.blocks.insert(pos, BlockDescriptor::new(material, data));
        self
    }

    pub fn with_entity(mut self, id: i32, name: &str, pos: DVec3) -> Self {
        self.entities.push(EntityState {
            id: EntityId(id),
            name: name.to_string(),
            pos,
            yaw: 0.0,
            pitch: 0.0,
        });
        self
    }
}

impl WorldHost for MockWorld {
    fn block_at(&self, pos: WorldPos) -> BlockDescriptor {
        self.blocks.get(&pos).copied().unwrap_or(BlockDescriptor::AIR)
    }

    fn set_block(&mut self, pos: WorldPos, material: Material, data: Option<u8>) -> Result<()> {
        let previous = self.block_at(pos);
        let data = data.unwrap_or(previous.data);
        self.blocks.insert(pos, BlockDescriptor::new(material, data));
        Ok(())
    }

    fn highest_block_y(&self, x: i32, z: i32) -> i32 {
        self.blocks
            .iter()
            .filter(|(pos, block)| pos.x == x && pos.z == z && block.material != Material::Air)
            .map(|(pos, _)| pos.y + 1)
            .max()
            .unwrap_or(0)
    }

    fn sign_lines(&self, pos: WorldPos) -> Option<Vec<String>> {
        self.signs.get(&pos).cloned()
    }

    fn place_wall_sign(&mut self, pos: WorldPos, orientation: u8, text: &str) -> Result<()> {
        self.blocks
            .insert(pos, BlockDescriptor::new(Material::WallSign, orientation));
        self.signs.insert(pos, vec![text.to_string()]);
        Ok(())
    }

    fn entities(&self) -> Vec<EntityState> {
        self.entities.clone()
    }

    fn broadcast_chat(&mut self, message: &str) {
        self.chat.push(message.to_string());
    }
}
