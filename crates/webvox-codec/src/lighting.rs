//! Light emission levels for host materials.
//!
//! Kept independent of the block-id mapping on purpose: a material can
//! emit light while encoding to an unrelated visual placeholder id.

use webvox_core::Material;

/// Light level emitted by a material, 0 for everything unlisted.
pub const fn light_level(material: Material) -> u8 {
    use Material as M;
    match material {
        M::Beacon
        | M::EnderPortal
        | M::Fire
        | M::Glowstone
        | M::JackOLantern
        | M::Lava
        | M::RedstoneLampOn
        | M::SeaLantern
        | M::EndRod => 15,

        M::Torch => 14,

        M::BurningFurnace => 13,

        M::Portal => 11,

        M::GlowingRedstoneOre => 9,

        M::EnderChest | M::RedstoneTorchOn => 7,

        M::Magma => 3,

        M::BrewingStand | M::BrownMushroom | M::DragonEgg | M::EnderPortalFrame => 1,

        _ => 0,
    }
}
