//! Flat in-memory demo world.
//!
//! Stands in for a real authoritative simulation: a slab of dirt topped
//! with grass across the sandbox footprint, mutable through the same
//! [`WorldHost`] interface a real host would implement.

use hashbrown::HashMap;
use tracing::info;
use webvox_bridge::{EntityState, WorldHost};
use webvox_core::{BlockDescriptor, Error, Material, Result, SandboxConfig, WorldPos};

/// The only world identifier the demo server knows.
const WORLD_NAME: &str = "demo";

pub struct DemoWorld {
    blocks: HashMap<WorldPos, BlockDescriptor>,
    signs: HashMap<WorldPos, Vec<String>>,
}

impl DemoWorld {
    /// Generate flat terrain under the configured sandbox. Fails fast when
    /// the config names a world this host does not have.
    pub fn generate(config: &SandboxConfig) -> Result<Self> {
        if !config.world.is_empty() && config.world != WORLD_NAME {
            return Err(Error::WorldNotFound(config.world.clone()));
        }

        let c = config.center;
        let r = config.radius;
        let mut blocks = HashMap::new();
        for x in (c.x - r)..(c.x + r) {
            for z in (c.z - r)..(c.z + r) {
                for y in (c.y - r)..(c.y + r) {
                    let material = match y.cmp(&c.y) {
                        std::cmp::Ordering::Less => Material::Dirt,
                        std::cmp::Ordering::Equal => Material::Grass,
                        std::cmp::Ordering::Greater => continue,
                    };
                    blocks.insert(WorldPos::new(x, y, z), BlockDescriptor::new(material, 0));
                }
            }
        }

        Ok(Self {
            blocks,
            signs: HashMap::new(),
        })
    }
}

impl WorldHost for DemoWorld {
    fn block_at(&self, pos: WorldPos) -> BlockDescriptor {
        self.blocks.get(&pos).copied().unwrap_or(BlockDescriptor::AIR)
    }

    fn set_block(&mut self, pos: WorldPos, material: Material, data: Option<u8>) -> Result<()> {
        let previous = self.block_at(pos);
        let data = data.unwrap_or(previous.data);
        if material != Material::WallSign && material != Material::SignPost {
            self.signs.remove(&pos);
        }
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
        Vec::new()
    }

    fn broadcast_chat(&mut self, message: &str) {
        info!(message, "chat");
    }
}
