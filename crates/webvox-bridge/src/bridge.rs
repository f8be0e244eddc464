//! The bridge context: single owner of all shared bridge state.
//!
//! One `Bridge` value exists per running instance and is owned by the
//! simulation loop. Inbound work arrives as [`Task`]s through an ordered
//! queue; nothing outside that loop ever touches the state, which is the
//! sole concurrency guard.

use tracing::{debug, info};
use webvox_codec::BlockMap;
use webvox_core::{Sandbox, SandboxConfig};
use webvox_proto::ClientCommand;

use crate::host::{HostEvent, WorldHost};
use crate::session::{ClientId, LineSink, Sessions};

/// A unit of work queued onto the simulation context.
///
/// Ordering is FIFO per originating connection; tasks from different
/// connections have no ordering guarantee between them.
pub enum Task {
    /// A client finished its handshake and attached.
    Attach { id: ClientId, sink: Box<dyn LineSink> },
    /// A client's connection closed.
    Detach { id: ClientId },
    /// A decoded client command.
    Command { id: ClientId, command: ClientCommand },
    /// A change notification from the host simulation.
    Event(HostEvent),
}

/// Translation and lifecycle state for one mirrored sandbox region.
pub struct Bridge<W> {
    pub(crate) config: SandboxConfig,
    pub(crate) sandbox: Sandbox,
    pub(crate) blocks: BlockMap,
    pub(crate) world: W,
    pub(crate) sessions: Sessions,
}

impl<W: WorldHost> Bridge<W> {
    /// Build a bridge over `world` from an immutable configuration.
    pub fn new(config: SandboxConfig, world: W) -> Self {
        let sandbox = Sandbox::new(config.center, config.radius, config.y_offset);
        let blocks = BlockMap::from_config(&config);
        Self {
            config,
            sandbox,
            blocks,
            world,
            sessions: Sessions::default(),
        }
    }

    /// The sandbox region this bridge mirrors.
    pub fn sandbox(&self) -> Sandbox {
        self.sandbox
    }

    /// The host world behind the bridge.
    pub fn world(&self) -> &W {
        &self.world
    }

    /// Number of attached clients.
    pub fn client_count(&self) -> usize {
        self.sessions.len()
    }

    /// Run one queued task to completion on the simulation context.
    pub fn dispatch(&mut self, task: Task) {
        match task {
            Task::Attach { id, sink } => self.attach(id, sink),
            Task::Detach { id } => self.detach(id),
            Task::Command { id, command } => self.handle_command(id, command),
            Task::Event(event) => self.handle_event(event),
        }
    }

    /// A client attached: send the initial world state and the entities
    /// already inside the boundary.
    pub fn attach(&mut self, id: ClientId, sink: Box<dyn LineSink>) {
        info!(client = %id, "client attached");
        self.sessions.attach(id, sink);
        self.send_world(id);
        self.send_entities(id);
    }

    /// A client disconnected: drop its session and visibility set. Any
    /// already-queued mutations from it still run; only outgoing writes
    /// to the closed channel are avoided.
    pub fn detach(&mut self, id: ClientId) {
        if self.sessions.detach(id) {
            info!(client = %id, "client detached");
        }
    }

    /// Dispatch one decoded client command.
    pub fn handle_command(&mut self, id: ClientId, command: ClientCommand) {
        debug!(client = %id, ?command, "client command");
        match command {
            ClientCommand::BlockEdit { x, y, z, id: web_id } => {
                self.client_block_edit(id, x, y, z, web_id);
            }
            ClientCommand::SignCreate { x, y, z, face, text } => {
                self.client_sign_create(id, x, y, z, face, &text);
            }
            ClientCommand::Chat { name, text } => self.client_chat(id, &name, &text),
        }
    }

    /// Dispatch one host change notification.
    pub fn handle_event(&mut self, event: HostEvent) {
        match event {
            HostEvent::BlockChanged { pos, material, data } => {
                self.notify_block_update(pos, material, data);
            }
            HostEvent::SignChanged {
                pos,
                material,
                data,
                lines,
            } => self.notify_sign_change(pos, material, data, &lines),
            HostEvent::EntityMoved(entity) => self.notify_entity_move(&entity),
            HostEvent::EntitySpawned(entity) => self.notify_entity_add(&entity),
            HostEvent::EntityRemoved(id) => self.notify_entity_remove(id),
            HostEvent::Chat(message) => self.notify_chat(&message),
        }
    }
}
