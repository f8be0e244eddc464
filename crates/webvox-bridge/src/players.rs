//! Entity visibility tracking and chat.
//!
//! Each attached client holds its own visibility set; the state machine
//! per (client, entity) is outside -> inside -> outside. Entering emits
//! one add sequence, position before name: the client allocates an entity
//! on the position message, so a name arriving first would refer to
//! nothing. Leaving (or despawning) emits one delete. Everything here is
//! suppressed entirely when clients may not see players.

use tracing::debug;
use webvox_core::Sandbox;
use webvox_proto::ServerCommand;

use crate::bridge::Bridge;
use crate::host::{EntityId, EntityState, WorldHost};
use crate::session::{Audience, ClientId};

/// Wire position update for one entity, in web space.
///
/// The host hands out degrees; the wire wants negated radians.
fn position_command(sandbox: Sandbox, entity: &EntityState) -> ServerCommand {
    let pos = sandbox.to_web_entity(entity.pos);
    ServerCommand::EntityPosition {
        id: entity.id.0,
        pos,
        rot_x: -f64::from(entity.yaw).to_radians(),
        rot_y: -f64::from(entity.pitch).to_radians(),
    }
}

impl<W: WorldHost> Bridge<W> {
    /// Announce the entities already inside the boundary to a client that
    /// just attached.
    pub(crate) fn send_entities(&mut self, client: ClientId) {
        if !self.config.permissions.see_players {
            return;
        }

        let sandbox = self.sandbox;
        let entities = self.world.entities();
        let Some(session) = self.sessions.get_mut(client) else {
            return;
        };

        for entity in &entities {
            if !sandbox.contains_entity(entity.pos) {
                continue;
            }
            session.visible.insert(entity.id);
            session.send(&position_command(sandbox, entity));
            session.send(&ServerCommand::EntityName {
                id: entity.id.0,
                name: entity.name.clone(),
            });
        }
    }

    /// An entity moved: per client, cross it in or out of the boundary or
    /// relay a plain position update.
    pub fn notify_entity_move(&mut self, entity: &EntityState) {
        if !self.config.permissions.see_players {
            return;
        }

        let inside = self.sandbox.contains_entity(entity.pos);
        let position = position_command(self.sandbox, entity);
        let name = ServerCommand::EntityName {
            id: entity.id.0,
            name: entity.name.clone(),
        };

        for (_, session) in self.sessions.iter_mut() {
            let was_inside = session.visible.contains(&entity.id);
            if inside {
                session.send(&position);
                if !was_inside {
                    session.visible.insert(entity.id);
                    session.send(&name);
                }
            } else if was_inside {
                session.visible.remove(&entity.id);
                session.send(&ServerCommand::EntityDelete { id: entity.id.0 });
            }
        }
    }

    /// Host-driven spawn: announce without requiring a movement.
    pub fn notify_entity_add(&mut self, entity: &EntityState) {
        if !self.config.permissions.see_players {
            return;
        }
        if !self.sandbox.contains_entity(entity.pos) {
            return;
        }

        let position = position_command(self.sandbox, entity);
        let name = ServerCommand::EntityName {
            id: entity.id.0,
            name: entity.name.clone(),
        };

        for (_, session) in self.sessions.iter_mut() {
            if session.visible.insert(entity.id) {
                session.send(&position);
                session.send(&name);
            }
        }
    }

    /// Host-driven despawn or death: delete wherever visible.
    pub fn notify_entity_remove(&mut self, id: EntityId) {
        if !self.config.permissions.see_players {
            return;
        }

        debug!(entity = %id, "entity removed");
        for (_, session) in self.sessions.iter_mut() {
            if session.visible.remove(&id) {
                session.send(&ServerCommand::EntityDelete { id: id.0 });
            }
        }
    }

    /// Host chat relayed to clients allowed to see it.
    pub fn notify_chat(&mut self, message: &str) {
        if !self.config.permissions.see_chat {
            return;
        }
        self.sessions.send_to(
            Audience::All,
            &ServerCommand::Text {
                message: message.to_string(),
            },
        );
    }

    /// A client spoke: format, relay to all web clients and into the host.
    pub fn client_chat(&mut self, client: ClientId, name: &str, text: &str) {
        if !self.config.permissions.allow_chat {
            self.sessions.send_to(
                Audience::One(client),
                &ServerCommand::Text {
                    message: "Chatting is not allowed".to_string(),
                },
            );
            return;
        }

        let formatted = format!("<{name}> {text}");
        self.sessions.send_to(
            Audience::All,
            &ServerCommand::Text {
                message: formatted.clone(),
            },
        );
        self.world.broadcast_chat(&formatted);
    }
}
