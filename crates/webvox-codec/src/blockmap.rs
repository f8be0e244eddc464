//! Bidirectional mapping between host blocks and web block ids.
//!
//! Forward (host -> web) covers dozens of materials; light sources and
//! liquids land on colored placeholder ids because the client has no
//! dedicated textures for them, a deliberate lossy approximation. The
//! reverse table covers a strict subset of the ids the forward direction
//! produces; everything else decodes to a documented placeholder.

use hashbrown::HashMap;
use tracing::warn;
use webvox_core::{Material, SandboxConfig, DEFAULT_MISSING_ID};

use crate::color::DyeColor;

/// Low end of the colorable web id range.
pub const COLOR_RANGE_START: u8 = 32;
/// High end (inclusive) of the colorable web id range.
pub const COLOR_RANGE_END: u8 = 63;

/// Material substituted when a web id has no reverse mapping.
///
/// Visibly wrong on purpose, so a client placing an untranslatable id is
/// noticed rather than silently becoming stone.
pub const DECODE_PLACEHOLDER: Material = Material::DiamondOre;

/// Static default table, material -> web id.
///
/// The colorable material (wool) is absent here; it branches on the data
/// byte in [`BlockMap::encode`].
const DEFAULT_TABLE: &[(Material, u8)] = &[
    (Material::Air, 0),
    (Material::Grass, 1),
    (Material::Sand, 2),
    (Material::SmoothBrick, 3),
    (Material::Brick, 4),
    (Material::Log, 5),
    (Material::Log2, 5),
    (Material::GoldOre, 70),
    (Material::IronOre, 71),
    (Material::CoalOre, 72),
    (Material::LapisOre, 73),
    (Material::LapisBlock, 74),
    (Material::DiamondOre, 48),
    (Material::RedstoneOre, 49),
    (Material::QuartzOre, 6),
    (Material::Stone, 6),
    (Material::Dirt, 7),
    (Material::Wood, 8),
    (Material::Snow, 9),
    (Material::Glass, 10),
    (Material::Cobblestone, 11),
    (Material::Chest, 14),
    (Material::Leaves, 15),
    (Material::Leaves2, 15),
    (Material::DoublePlant, 17),
    (Material::LongGrass, 17),
    (Material::YellowFlower, 18),
    (Material::RedRose, 19),
    (Material::Sapling, 20),
    // Signs: wall sign text is drawn on the block behind it, so the sign
    // cell itself renders as air; a standing sign shows as plank.
    (Material::WallSign, 0),
    (Material::SignPost, 8),
    // Light sources on placeholder visuals; light_level() is separate.
    (Material::Glowstone, 64),
    (Material::SeaLantern, 35),
    (Material::Torch, 21),
    (Material::RedstoneTorchOff, 19),
    (Material::RedstoneTorchOn, 19),
    // Liquids as colored blocks; they appear too often to drop.
    (Material::StationaryWater, 35),
    (Material::Water, 35),
    (Material::StationaryLava, 35),
    (Material::Lava, 35),
    (Material::Bedrock, 65),
    (Material::Gravel, 66),
    (Material::IronBlock, 67),
    (Material::GoldBlock, 68),
    (Material::DiamondBlock, 69),
    (Material::Sandstone, 75),
    (Material::Bookshelf, 50),
    (Material::MossyCobblestone, 51),
    (Material::Obsidian, 52),
    (Material::Workbench, 53),
    (Material::Furnace, 54),
    (Material::BurningFurnace, 55),
    (Material::MobSpawner, 56),
    (Material::SnowBlock, 57),
    (Material::Ice, 58),
    (Material::Clay, 59),
    (Material::Jukebox, 60),
    (Material::Cactus, 61),
    (Material::Mycelium, 62),
    (Material::Netherrack, 63),
    (Material::Sponge, 24),
    (Material::MelonBlock, 25),
    (Material::EndStone, 26),
    (Material::Tnt, 27),
    (Material::EmeraldBlock, 28),
    (Material::Pumpkin, 78),
    (Material::JackOLantern, 79),
    (Material::HugeMushroomBrown, 80),
    (Material::HugeMushroomRed, 81),
    (Material::CommandBlock, 82),
    (Material::EmeraldOre, 83),
    (Material::SoulSand, 84),
    (Material::NetherBrick, 85),
    (Material::Farmland, 86),
    (Material::RedstoneLampOff, 88),
    (Material::RedstoneLampOn, 89),
];

/// Reverse table, web id -> material, outside the colorable range.
const REVERSE_TABLE: &[(u8, Material)] = &[
    (0, Material::Air),
    (1, Material::Grass),
    (2, Material::Sand),
    (3, Material::SmoothBrick),
    (4, Material::Brick),
    (5, Material::Log),
    (6, Material::Stone),
    (7, Material::Dirt),
    (8, Material::Wood),
    (9, Material::SnowBlock),
    (10, Material::Glass),
    (11, Material::Cobblestone),
    (14, Material::Chest),
    (15, Material::Leaves),
    (17, Material::LongGrass),
    (18, Material::YellowFlower),
    (19, Material::RedRose),
    (20, Material::ChorusFlower),
    (21, Material::DoublePlant),
    (22, Material::RedRose),
    (23, Material::YellowFlower),
    (64, Material::Glowstone),
];

/// Immutable block-id mapping tables, built once from configuration.
#[derive(Clone, Debug)]
pub struct BlockMap {
    forward: HashMap<Material, u8>,
    overrides: HashMap<Material, u8>,
    reverse: HashMap<u8, Material>,
    missing_id: u8,
    warn_missing: bool,
}

impl Default for BlockMap {
    fn default() -> Self {
        Self::new(HashMap::new(), DEFAULT_MISSING_ID, true)
    }
}

impl BlockMap {
    /// Build the codec tables, with `overrides` consulted before the
    /// static defaults.
    pub fn new(overrides: HashMap<Material, u8>, missing_id: u8, warn_missing: bool) -> Self {
        Self {
            forward: DEFAULT_TABLE.iter().copied().collect(),
            overrides,
            reverse: REVERSE_TABLE.iter().copied().collect(),
            missing_id,
            warn_missing,
        }
    }

    /// Build from a sandbox configuration.
    pub fn from_config(config: &SandboxConfig) -> Self {
        Self::new(
            config.overrides.clone(),
            config.missing_id,
            config.warn_missing,
        )
    }

    /// The configured fallback id for unmapped materials.
    #[inline]
    pub const fn missing_id(&self) -> u8 {
        self.missing_id
    }

    /// Map a host block onto a web id; `None` when the material has no
    /// mapping at all.
    pub fn encode(&self, material: Material, data: u8) -> Option<u8> {
        if let Some(&id) = self.overrides.get(&material) {
            return Some(id);
        }
        if material == Material::Wool {
            // 16 dye variants onto 16 contiguous colorable ids.
            return Some(match data {
                0..=15 => COLOR_RANGE_START + data,
                _ => 47,
            });
        }
        self.forward.get(&material).copied()
    }

    /// Like [`Self::encode`], but substitute the missing id for unmapped
    /// materials (optionally warning).
    pub fn encode_or_missing(&self, material: Material, data: u8) -> u8 {
        self.encode(material, data).unwrap_or_else(|| {
            if self.warn_missing {
                warn!(%material, "material missing from blocks_to_web, substituting fallback");
            }
            self.missing_id
        })
    }

    /// True when `id` is worth counting during the initial sweep: neither
    /// air nor the missing fallback.
    #[inline]
    pub const fn is_substantial(&self, id: u8) -> bool {
        id != 0 && id != self.missing_id
    }

    /// Reverse-map a web id onto a material; `None` for uncovered ids.
    ///
    /// The whole colorable range decodes to the colorable material; its
    /// dye variant comes from [`Self::decode_aux`].
    pub fn decode(&self, web_id: u8) -> Option<Material> {
        if (COLOR_RANGE_START..=COLOR_RANGE_END).contains(&web_id) {
            return Some(Material::Wool);
        }
        self.reverse.get(&web_id).copied()
    }

    /// Reverse-map with the documented placeholder policy for uncovered
    /// ids: substitute [`DECODE_PLACEHOLDER`] and log, never fail.
    pub fn decode_or_placeholder(&self, web_id: u8) -> Material {
        self.decode(web_id).unwrap_or_else(|| {
            warn!(web_id, "untranslated web block id, substituting placeholder");
            DECODE_PLACEHOLDER
        })
    }

    /// Auxiliary data byte for a web id, `None` outside the colorable
    /// range. Callers must not overwrite existing aux data on `None`.
    ///
    /// The colorable range is fixed, so this needs no instance tables.
    pub fn decode_aux(web_id: u8) -> Option<u8> {
        DyeColor::approximate(web_id).map(DyeColor::wool_data)
    }
}
