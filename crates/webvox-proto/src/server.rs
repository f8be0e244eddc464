//! Server-to-client wire commands.
//!
//! One ASCII line per command, comma-separated fields, newline reserved as
//! the terminator (the transport appends it). Field order and delimiters
//! are load-bearing for compatible clients and must not change.

use glam::DVec3;
use webvox_core::WebPos;

/// A single server-to-client command.
#[derive(Clone, Debug, PartialEq)]
pub enum ServerCommand {
    /// `t,<url>` — point the client at a texture pack.
    Texture { url: String },
    /// `B,0,0,<x>,<y>,<z>,<id>` — set the block at a web position.
    Block { pos: WebPos, id: u8 },
    /// `L,0,0,<x>,<y>,<z>,<level>` — set a light level.
    Light { pos: WebPos, level: u8 },
    /// `S,0,0,<x>,<y>,<z>,<face>,<text>` — set sign text and orientation.
    Sign { pos: WebPos, face: u8, text: String },
    /// `K,0,0,1` — initial-load completion marker.
    LoadComplete,
    /// `R,0,0` — ask the client to redraw.
    Redraw,
    /// `U,1,<x>,<y>,<z>,<rx>,<ry>` — teleport the receiving client.
    Teleport { pos: WebPos, rot_x: i32, rot_y: i32 },
    /// `P,<id>,<x>,<y>,<z>,<rx>,<ry>` — set or move an entity (radians).
    EntityPosition {
        id: i32,
        pos: DVec3,
        rot_x: f64,
        rot_y: f64,
    },
    /// `N,<id>,<name>` — name an entity already allocated by a prior `P`.
    EntityName { id: i32, name: String },
    /// `D,<id>` — remove an entity.
    EntityDelete { id: i32 },
    /// `T,<message>` — chat or system text.
    Text { message: String },
}

/// Strip the reserved line terminator out of a free-text payload.
fn sanitize(text: &str) -> String {
    text.replace(['\n', '\r'], " ")
}

impl ServerCommand {
    /// Encode to the wire line, without the trailing newline.
    pub fn encode(&self) -> String {
        match self {
            Self::Texture { url } => format!("t,{}", sanitize(url)),
            Self::Block { pos, id } => {
                format!("B,0,0,{},{},{},{}", pos.x, pos.y, pos.z, id)
            }
            Self::Light { pos, level } => {
                format!("L,0,0,{},{},{},{}", pos.x, pos.y, pos.z, level)
            }
            Self::Sign { pos, face, text } => format!(
                "S,0,0,{},{},{},{},{}",
                pos.x,
                pos.y,
                pos.z,
                face,
                sanitize(text)
            ),
            Self::LoadComplete => "K,0,0,1".to_string(),
            Self::Redraw => "R,0,0".to_string(),
            Self::Teleport { pos, rot_x, rot_y } => format!(
                "U,1,{},{},{},{},{}",
                pos.x, pos.y, pos.z, rot_x, rot_y
            ),
            Self::EntityPosition {
                id,
                pos,
                rot_x,
                rot_y,
            } => format!("P,{},{},{},{},{},{}", id, pos.x, pos.y, pos.z, rot_x, rot_y),
            Self::EntityName { id, name } => format!("N,{},{}", id, sanitize(name)),
            Self::EntityDelete { id } => format!("D,{id}"),
            Self::Text { message } => format!("T,{}", sanitize(message)),
        }
    }
}
