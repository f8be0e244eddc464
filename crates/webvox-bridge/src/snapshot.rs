//! Initial world snapshot for attaching clients.

use tracing::{debug, warn};
use webvox_core::WebPos;
use webvox_proto::ServerCommand;

use crate::bridge::Bridge;
use crate::host::WorldHost;
use crate::session::{Audience, ClientId};

impl<W: WorldHost> Bridge<W> {
    /// Walk the whole sandbox cube and send its state to one client,
    /// ending with the completion marker, a redraw, and a teleport onto
    /// the terrain.
    pub fn send_world(&mut self, client: ClientId) {
        let to = Audience::One(client);

        if let Some(url) = self.config.texture_url.clone() {
            self.sessions
                .send_to(to, &ServerCommand::Texture { url });
        }

        let sandbox = self.sandbox;
        let mut substantial = false;
        for pos in sandbox.cells() {
            let block = self.world.block_at(pos);
            substantial |= self.emit_block(to, pos, block.material, block.data);
        }

        self.sessions.send_to(to, &ServerCommand::LoadComplete);
        self.sessions.send_to(to, &ServerCommand::Redraw);

        if !substantial {
            // Sanity check, not a hard failure: an all-air or all-missing
            // region almost always means the center is misconfigured.
            self.sessions.send_to(
                to,
                &ServerCommand::Text {
                    message: "No blocks sent (server misconfiguration, check x/y/z_center)"
                        .to_string(),
                },
            );
            let center = sandbox.center();
            warn!(
                ?center,
                radius = sandbox.radius(),
                "no substantial blocks in the sandbox; check center/radius/blocks_to_web"
            );
        }

        // Place the client at a fixed in-region offset, above the terrain
        // height at the sandbox center column.
        let center = sandbox.center();
        let surface = self.world.highest_block_y(center.x, center.z);
        let spawn = WebPos::new(
            sandbox.radius(),
            surface - sandbox.radius() - sandbox.y_offset(),
            sandbox.radius(),
        );
        debug!(client = %client, ?spawn, "snapshot complete, teleporting client");
        self.sessions.send_to(
            to,
            &ServerCommand::Teleport {
                pos: spawn,
                rot_x: 0,
                rot_y: 0,
            },
        );
    }
}
