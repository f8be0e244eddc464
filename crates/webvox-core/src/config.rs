//! Sandbox configuration.
//!
//! A raw, serde-friendly form is deserialized from the config file and then
//! validated into the immutable [`SandboxConfig`] the bridge runs on.
//! Per-entry problems in the override tables warn and skip the entry;
//! structural problems fail construction.

use hashbrown::{HashMap, HashSet};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::coords::WorldPos;
use crate::error::{Error, Result};
use crate::material::Material;

/// Fallback web id substituted for materials without a mapping (cloud).
pub const DEFAULT_MISSING_ID: u8 = 16;

/// What web clients are allowed to do and see.
#[derive(Clone, Copy, Debug)]
pub struct Permissions {
    pub allow_break_place: bool,
    pub allow_signs: bool,
    pub allow_chat: bool,
    pub see_players: bool,
    pub see_chat: bool,
}

impl Default for Permissions {
    fn default() -> Self {
        Self {
            allow_break_place: true,
            allow_signs: true,
            allow_chat: true,
            see_players: true,
            see_chat: true,
        }
    }
}

/// Immutable bridge configuration, set once at startup.
#[derive(Clone, Debug)]
pub struct SandboxConfig {
    /// Host world identifier; empty selects the host's default world.
    pub world: String,
    pub center: WorldPos,
    pub radius: i32,
    pub y_offset: i32,
    pub permissions: Permissions,
    /// Per-material overrides consulted before the static codec table.
    pub overrides: HashMap<Material, u8>,
    /// Web id substituted for unmapped materials.
    pub missing_id: u8,
    /// Warn when a material falls through to the missing id.
    pub warn_missing: bool,
    /// Materials web clients may neither break nor place.
    pub unbreakable: HashSet<Material>,
    /// Texture pack URL pushed to clients on attach.
    pub texture_url: Option<String>,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            world: String::new(),
            center: WorldPos::new(0, 64, 0),
            radius: 16,
            y_offset: 0,
            permissions: Permissions::default(),
            overrides: HashMap::new(),
            missing_id: DEFAULT_MISSING_ID,
            warn_missing: true,
            unbreakable: HashSet::new(),
            texture_url: None,
        }
    }
}

/// Config-file form of [`SandboxConfig`], prior to validation.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawConfig {
    pub world: String,
    pub x_center: i32,
    pub y_center: i32,
    pub z_center: i32,
    pub radius: Option<i32>,
    pub y_offset: i32,
    pub allow_break_place_blocks: Option<bool>,
    pub allow_signs: Option<bool>,
    pub allow_chatting: Option<bool>,
    pub see_chat: Option<bool>,
    pub see_players: Option<bool>,
    /// Material name (or the special key `missing`) to web id.
    pub blocks_to_web_override: std::collections::HashMap<String, i64>,
    pub warn_missing: Option<bool>,
    pub unbreakable_blocks: Vec<String>,
    pub texture_url: Option<String>,
}

impl RawConfig {
    /// Validate into an immutable [`SandboxConfig`].
    pub fn build(self) -> Result<SandboxConfig> {
        let defaults = SandboxConfig::default();
        let radius = self.radius.unwrap_or(defaults.radius);
        if radius <= 0 {
            return Err(Error::InvalidConfig(format!(
                "radius must be positive, got {radius}"
            )));
        }

        let mut missing_id = DEFAULT_MISSING_ID;
        let mut overrides = HashMap::new();
        for (name, value) in &self.blocks_to_web_override {
            let Ok(id) = u8::try_from(*value) else {
                warn!(%name, value, "blocks_to_web_override id out of range, entry ignored");
                continue;
            };
            if name == "missing" {
                debug!(id, "blocks_to_web_override retargets the missing id");
                missing_id = id;
                continue;
            }
            match name.parse::<Material>() {
                Ok(material) => {
                    debug!(%material, id, "blocks_to_web_override");
                    overrides.insert(material, id);
                }
                Err(_) => {
                    warn!(%name, "blocks_to_web_override invalid material, entry ignored");
                }
            }
        }

        let mut unbreakable = HashSet::new();
        for name in &self.unbreakable_blocks {
            match name.parse::<Material>() {
                Ok(material) => {
                    unbreakable.insert(material);
                }
                Err(_) => warn!(%name, "unbreakable_blocks invalid material, entry ignored"),
            }
        }

        let p = defaults.permissions;
        Ok(SandboxConfig {
            world: self.world,
            center: WorldPos::new(self.x_center, self.y_center, self.z_center),
            radius,
            y_offset: self.y_offset,
            permissions: Permissions {
                allow_break_place: self.allow_break_place_blocks.unwrap_or(p.allow_break_place),
                allow_signs: self.allow_signs.unwrap_or(p.allow_signs),
                allow_chat: self.allow_chatting.unwrap_or(p.allow_chat),
                see_players: self.see_players.unwrap_or(p.see_players),
                see_chat: self.see_chat.unwrap_or(p.see_chat),
            },
            overrides,
            missing_id,
            warn_missing: self.warn_missing.unwrap_or(defaults.warn_missing),
            unbreakable,
            texture_url: self.texture_url,
        })
    }
}
