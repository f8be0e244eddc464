//! The host simulation's block vocabulary.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Host block-type identifier.
///
/// This is the rich vocabulary of the authoritative simulation; the web
/// client only ever sees the narrow integer ids produced by the codec.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(clippy::enum_variant_names)]
pub enum Material {
    Air,
    Grass,
    Sand,
    SmoothBrick,
    Brick,
    Log,
    Log2,
    GoldOre,
    IronOre,
    CoalOre,
    LapisOre,
    LapisBlock,
    DiamondOre,
    RedstoneOre,
    GlowingRedstoneOre,
    QuartzOre,
    Stone,
    Dirt,
    Wood,
    Snow,
    SnowBlock,
    Glass,
    Cobblestone,
    MossyCobblestone,
    Chest,
    EnderChest,
    Leaves,
    Leaves2,
    DoublePlant,
    LongGrass,
    YellowFlower,
    RedRose,
    Sapling,
    ChorusFlower,
    Wool,
    WallSign,
    SignPost,
    Glowstone,
    SeaLantern,
    Torch,
    RedstoneTorchOff,
    RedstoneTorchOn,
    StationaryWater,
    Water,
    StationaryLava,
    Lava,
    Bedrock,
    Gravel,
    IronBlock,
    GoldBlock,
    DiamondBlock,
    EmeraldBlock,
    EmeraldOre,
    Sandstone,
    Bookshelf,
    Obsidian,
    Workbench,
    Furnace,
    BurningFurnace,
    MobSpawner,
    Ice,
    Clay,
    Jukebox,
    Cactus,
    Mycelium,
    Netherrack,
    NetherBrick,
    SoulSand,
    Sponge,
    MelonBlock,
    EndStone,
    Tnt,
    Pumpkin,
    JackOLantern,
    HugeMushroomBrown,
    HugeMushroomRed,
    CommandBlock,
    Farmland,
    RedstoneLampOff,
    RedstoneLampOn,
    Beacon,
    EnderPortal,
    EnderPortalFrame,
    EndRod,
    Fire,
    Portal,
    Magma,
    BrewingStand,
    BrownMushroom,
    DragonEgg,
}

/// Canonical names, used for config parsing and client-visible messages.
const NAMES: &[(&str, Material)] = &[
    ("AIR", Material::Air),
    ("GRASS", Material::Grass),
    ("SAND", Material::Sand),
    ("SMOOTH_BRICK", Material::SmoothBrick),
    ("BRICK", Material::Brick),
    ("LOG", Material::Log),
    ("LOG_2", Material::Log2),
    ("GOLD_ORE", Material::GoldOre),
    ("IRON_ORE", Material::IronOre),
    ("COAL_ORE", Material::CoalOre),
    ("LAPIS_ORE", Material::LapisOre),
    ("LAPIS_BLOCK", Material::LapisBlock),
    ("DIAMOND_ORE", Material::DiamondOre),
    ("REDSTONE_ORE", Material::RedstoneOre),
    ("GLOWING_REDSTONE_ORE", Material::GlowingRedstoneOre),
    ("QUARTZ_ORE", Material::QuartzOre),
    ("STONE", Material::Stone),
    ("DIRT", Material::Dirt),
    ("WOOD", Material::Wood),
    ("SNOW", Material::Snow),
    ("SNOW_BLOCK", Material::SnowBlock),
    ("GLASS", Material::Glass),
    ("COBBLESTONE", Material::Cobblestone),
    ("MOSSY_COBBLESTONE", Material::MossyCobblestone),
    ("CHEST", Material::Chest),
    ("ENDER_CHEST", Material::EnderChest),
    ("LEAVES", Material::Leaves),
    ("LEAVES_2", Material::Leaves2),
    ("DOUBLE_PLANT", Material::DoublePlant),
    ("LONG_GRASS", Material::LongGrass),
    ("YELLOW_FLOWER", Material::YellowFlower),
    ("RED_ROSE", Material::RedRose),
    ("SAPLING", Material::Sapling),
    ("CHORUS_FLOWER", Material::ChorusFlower),
    ("WOOL", Material::Wool),
    ("WALL_SIGN", Material::WallSign),
    ("SIGN_POST", Material::SignPost),
    ("GLOWSTONE", Material::Glowstone),
    ("SEA_LANTERN", Material::SeaLantern),
    ("TORCH", Material::Torch),
    ("REDSTONE_TORCH_OFF", Material::RedstoneTorchOff),
    ("REDSTONE_TORCH_ON", Material::RedstoneTorchOn),
    ("STATIONARY_WATER", Material::StationaryWater),
    ("WATER", Material::Water),
    ("STATIONARY_LAVA", Material::StationaryLava),
    ("LAVA", Material::Lava),
    ("BEDROCK", Material::Bedrock),
    ("GRAVEL", Material::Gravel),
    ("IRON_BLOCK", Material::IronBlock),
    ("GOLD_BLOCK", Material::GoldBlock),
    ("DIAMOND_BLOCK", Material::DiamondBlock),
    ("EMERALD_BLOCK", Material::EmeraldBlock),
    ("EMERALD_ORE", Material::EmeraldOre),
    ("SANDSTONE", Material::Sandstone),
    ("BOOKSHELF", Material::Bookshelf),
    ("OBSIDIAN", Material::Obsidian),
    ("WORKBENCH", Material::Workbench),
    ("FURNACE", Material::Furnace),
    ("BURNING_FURNACE", Material::BurningFurnace),
    ("MOB_SPAWNER", Material::MobSpawner),
    ("ICE", Material::Ice),
    ("CLAY", Material::Clay),
    ("JUKEBOX", Material::Jukebox),
    ("CACTUS", Material::Cactus),
    ("MYCELIUM", Material::Mycelium),
    ("NETHERRACK", Material::Netherrack),
    ("NETHER_BRICK", Material::NetherBrick),
    ("SOUL_SAND", Material::SoulSand),
    ("SPONGE", Material::Sponge),
    ("MELON_BLOCK", Material::MelonBlock),
    ("END_STONE", Material::EndStone),
    ("TNT", Material::Tnt),
    ("PUMPKIN", Material::Pumpkin),
    ("JACK_O_LANTERN", Material::JackOLantern),
    ("HUGE_MUSHROOM_BROWN", Material::HugeMushroomBrown),
    ("HUGE_MUSHROOM_RED", Material::HugeMushroomRed),
    ("COMMAND_BLOCK", Material::CommandBlock),
    ("FARMLAND", Material::Farmland),
    ("REDSTONE_LAMP_OFF", Material::RedstoneLampOff),
    ("REDSTONE_LAMP_ON", Material::RedstoneLampOn),
    ("BEACON", Material::Beacon),
    ("ENDER_PORTAL", Material::EnderPortal),
    ("ENDER_PORTAL_FRAME", Material::EnderPortalFrame),
    ("END_ROD", Material::EndRod),
    ("FIRE", Material::Fire),
    ("PORTAL", Material::Portal),
    ("MAGMA", Material::Magma),
    ("BREWING_STAND", Material::BrewingStand),
    ("BROWN_MUSHROOM", Material::BrownMushroom),
    ("DRAGON_EGG", Material::DragonEgg),
];

impl Material {
    /// Canonical upper-case name, as used in config files and messages.
    pub fn name(self) -> &'static str {
        NAMES
            .iter()
            .find(|(_, m)| *m == self)
            .map_or("UNKNOWN", |(name, _)| name)
    }

    /// True for the two sign-bearing materials.
    #[inline]
    pub const fn is_sign(self) -> bool {
        matches!(self, Self::WallSign | Self::SignPost)
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Material {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NAMES
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(s))
            .map(|&(_, m)| m)
            .ok_or_else(|| Error::UnknownMaterial(s.to_string()))
    }
}

/// A block as the host simulation sees it: material plus auxiliary data
/// byte (color, orientation and the like).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct BlockDescriptor {
    pub material: Material,
    pub data: u8,
}

impl Default for Material {
    fn default() -> Self {
        Self::Air
    }
}

impl BlockDescriptor {
    /// An air block.
    pub const AIR: Self = Self {
        material: Material::Air,
        data: 0,
    };

    /// Create a descriptor from material and data byte.
    #[inline]
    pub const fn new(material: Material, data: u8) -> Self {
        Self { material, data }
    }
}
