//! Sign orientation and text in both directions.
//!
//! The host packs sign orientation into the data byte, with different
//! vocabularies for wall-mounted signs (4 codes) and standing signs
//! (16 finer codes). The wire knows only 4 cardinal faces, plus 7 for
//! "no direction". A wall sign's reported coordinate shifts one cell in
//! the direction its face names, into the block the text belongs to;
//! decoding applies the exact inverse shift.

use tracing::{debug, warn};
use webvox_core::{Material, WebPos, WorldPos};
use webvox_proto::ServerCommand;

use crate::bridge::Bridge;
use crate::host::WorldHost;
use crate::session::{Audience, ClientId};

/// Wire face value for unrecognized orientation codes.
const FACE_NONE: u8 = 7;

/// Wall-sign orientation code -> (wire face, reported-coordinate shift).
fn wall_face(data: u8) -> (u8, WebPos) {
    match data {
        2 => (2, WebPos::new(0, 0, -1)), // north
        3 => (3, WebPos::new(0, 0, 1)),  // south
        4 => (0, WebPos::new(-1, 0, 0)), // west
        5 => (1, WebPos::new(1, 0, 0)),  // east
        _ => (FACE_NONE, WebPos::new(0, 0, 0)),
    }
}

/// Wire face -> (wall orientation code, shift back to the sign cell).
fn wall_orientation(face: u8) -> Option<(u8, WebPos)> {
    Some(match face {
        0 => (4, WebPos::new(1, 0, 0)),  // west
        1 => (5, WebPos::new(-1, 0, 0)), // east
        2 => (2, WebPos::new(0, 0, 1)),  // north
        3 => (3, WebPos::new(0, 0, -1)), // south
        _ => return None,
    })
}

/// Standing-sign orientation code collapsed onto a cardinal face.
fn post_face(data: u8) -> u8 {
    match data {
        0..=2 => 3,   // south through southwest
        3..=6 => 0,   // west-southwest through northwest
        7..=10 => 2,  // north-northwest through northeast
        11..=15 => 1, // east-northeast through south-southeast
        _ => FACE_NONE,
    }
}

/// Flatten sign lines into the single wire text field. Each line gets a
/// separating trailing space; the reserved terminator never survives.
fn flatten_lines(lines: &[String]) -> String {
    let mut text = String::new();
    for line in lines {
        text.push_str(line);
        text.push(' ');
    }
    text.replace('\n', " ")
}

impl<W: WorldHost> Bridge<W> {
    /// The host changed a sign: re-encode and broadcast it.
    pub fn notify_sign_change(
        &mut self,
        pos: WorldPos,
        material: Material,
        data: u8,
        lines: &[String],
    ) {
        self.emit_sign(Audience::All, pos, material, data, lines);
        self.sessions.send_to(Audience::All, &ServerCommand::Redraw);
    }

    /// Encode one sign for an audience.
    pub(crate) fn emit_sign(
        &mut self,
        audience: Audience,
        pos: WorldPos,
        material: Material,
        data: u8,
        lines: &[String],
    ) {
        let mut web = self.sandbox.to_web(pos);
        let face = match material {
            Material::WallSign => {
                let (face, shift) = wall_face(data);
                web.x += shift.x;
                web.z += shift.z;
                face
            }
            Material::SignPost => post_face(data),
            _ => FACE_NONE,
        };

        debug!(?pos, data, face, "sign encode");
        self.sessions.send_to(
            audience,
            &ServerCommand::Sign {
                pos: web,
                face,
                text: flatten_lines(lines),
            },
        );
    }

    /// A web client asked to write a sign at web `(x, y, z)` on `face`.
    ///
    /// Rejections here are silent on the wire (logged only): the policy
    /// gate and the boundary are both enforced server-side anyway, except
    /// the policy gate answers with an explanatory message.
    pub fn client_sign_create(
        &mut self,
        client: ClientId,
        x: i32,
        y: i32,
        z: i32,
        face: u8,
        text: &str,
    ) {
        if !self.config.permissions.allow_signs {
            self.sessions.send_to(
                Audience::One(client),
                &ServerCommand::Text {
                    message: "Writing on signs is not allowed".to_string(),
                },
            );
            return;
        }

        let Some((orientation, shift)) = wall_orientation(face) else {
            debug!(client = %client, face, "sign request with unknown face");
            return;
        };

        let web = WebPos::new(x + shift.x, y, z + shift.z);
        let pos = self.sandbox.to_world(web);
        if !self.sandbox.contains(pos) {
            debug!(client = %client, ?pos, "sign request outside the sandbox");
            return;
        }

        if let Err(err) = self.world.place_wall_sign(pos, orientation, text) {
            warn!(client = %client, ?pos, %err, "host refused sign placement");
            return;
        }

        // Programmatic sign edits may not raise a host change event, and
        // the committed state is the authority; re-read and broadcast.
        let committed = self.world.block_at(pos);
        let Some(lines) = self.world.sign_lines(pos) else {
            warn!(client = %client, ?pos, "committed sign did not stick, not broadcasting");
            return;
        };
        self.notify_sign_change(pos, committed.material, committed.data, &lines);
    }
}
