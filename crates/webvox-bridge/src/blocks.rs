//! Block updates in both directions.

use tracing::{debug, trace, warn};
use webvox_codec::{light_level, BlockMap};
use webvox_core::{Material, WebPos, WorldPos};
use webvox_proto::ServerCommand;

use crate::bridge::Bridge;
use crate::host::WorldHost;
use crate::session::{Audience, ClientId};

impl<W: WorldHost> Bridge<W> {
    /// A web client asked to set the block at web `(x, y, z)` to `web_id`.
    ///
    /// Checks run in order: edit policy, id resolution, unbreakable
    /// materials (either side of the edit), boundary. Only then is the
    /// change committed and relayed to the other clients, which receive
    /// the id exactly as requested rather than a re-encoding.
    pub fn client_block_edit(&mut self, client: ClientId, x: i32, y: i32, z: i32, web_id: u8) {
        if !self.config.permissions.allow_break_place {
            self.sessions.send_to(
                Audience::One(client),
                &ServerCommand::Text {
                    message: "Breaking/placing blocks not allowed".to_string(),
                },
            );
            return;
        }

        let material = self.blocks.decode_or_placeholder(web_id);
        let aux = BlockMap::decode_aux(web_id);
        let web = WebPos::new(x, y, z);
        let pos = self.sandbox.to_world(web);

        let previous = self.world.block_at(pos).material;
        if self.config.unbreakable.contains(&previous)
            || self.config.unbreakable.contains(&material)
        {
            trace!(
                client = %client, ?pos, %previous, %material,
                "rejected edit touching an unbreakable material"
            );
            let message = if self.config.unbreakable.contains(&previous) {
                format!("You cannot break blocks of type {previous}")
            } else {
                format!("You cannot place blocks of type {material}")
            };
            self.sessions
                .send_to(Audience::One(client), &ServerCommand::Text { message });
            // Roll the client's view back to the true block.
            let previous_id = self.blocks.encode_or_missing(previous, 0);
            self.sessions.send_to(
                Audience::One(client),
                &ServerCommand::Block {
                    pos: web,
                    id: previous_id,
                },
            );
            self.sessions
                .send_to(Audience::One(client), &ServerCommand::Redraw);
            return;
        }

        if !self.sandbox.contains(pos) {
            // Expected: the boundary is not necessarily enforced client-side.
            trace!(client = %client, ?pos, "edit outside the sandbox");
            self.sessions.send_to(
                Audience::One(client),
                &ServerCommand::Text {
                    message: format!("You cannot build at ({x},{y},{z})"),
                },
            );
            return;
        }

        debug!(client = %client, ?pos, %material, "committing client edit");
        if let Err(err) = self.world.set_block(pos, material, aux) {
            warn!(client = %client, ?pos, %err, "host refused block edit");
            return;
        }

        self.sessions.send_to(
            Audience::Others(client),
            &ServerCommand::Block { pos: web, id: web_id },
        );
        self.sessions
            .send_to(Audience::Others(client), &ServerCommand::Redraw);
    }

    /// The host world changed a block: relay to all clients and refresh.
    pub fn notify_block_update(&mut self, pos: WorldPos, material: Material, data: u8) {
        if !self.sandbox.contains(pos) {
            // Clients only learn about changes inside the sandbox.
            return;
        }

        self.emit_block(Audience::All, pos, material, data);
        self.sessions.send_to(Audience::All, &ServerCommand::Redraw);
    }

    /// Encode and send one block to an audience: the `B` line, an `L` line
    /// when the material emits light, and sign re-encoding for
    /// sign-bearing materials. Returns whether the block was substantial
    /// (mapped to something other than air or the missing fallback).
    pub(crate) fn emit_block(
        &mut self,
        audience: Audience,
        pos: WorldPos,
        material: Material,
        data: u8,
    ) -> bool {
        let id = self.blocks.encode_or_missing(material, data);
        let web = self.sandbox.to_web(pos);

        self.sessions
            .send_to(audience, &ServerCommand::Block { pos: web, id });

        let level = light_level(material);
        if level != 0 {
            self.sessions
                .send_to(audience, &ServerCommand::Light { pos: web, level });
        }

        if material.is_sign() {
            // The sign's authoritative text lives in the host.
            if let Some(lines) = self.world.sign_lines(pos) {
                self.emit_sign(audience, pos, material, data, &lines);
            }
        }

        self.blocks.is_substantial(id)
    }
}
