//! End-to-end bridge scenarios over a mock world and recording sinks.

use glam::DVec3;
use webvox_core::{Material, SandboxConfig, WorldPos};
use webvox_proto::ClientCommand;

use crate::bridge::{Bridge, Task};
use crate::host::{EntityId, EntityState, HostEvent, WorldHost};
use crate::session::ClientId;
use crate::testutil::{MockWorld, RecordingSink};

fn config(radius: i32) -> SandboxConfig {
    SandboxConfig {
        center: WorldPos::new(0, 0, 0),
        radius,
        y_offset: 0,
        ..SandboxConfig::default()
    }
}

/// Attach a client and drain the snapshot traffic.
fn attach(bridge: &mut Bridge<MockWorld>, id: u64) -> RecordingSink {
    let sink = RecordingSink::new();
    bridge.attach(ClientId(id), Box::new(sink.clone()));
    sink.take();
    sink
}

fn entity(id: i32, name: &str, pos: DVec3) -> EntityState {
    EntityState {
        id: EntityId(id),
        name: name.to_string(),
        pos,
        yaw: 0.0,
        pitch: 0.0,
    }
}

#[test]
fn snapshot_of_empty_region_warns() {
    let mut bridge = Bridge::new(config(4), MockWorld::default());
    let sink = RecordingSink::new();
    bridge.attach(ClientId(1), Box::new(sink.clone()));

    let lines = sink.take();
    let blocks = lines.iter().filter(|l| l.starts_with("B,")).count();
    assert_eq!(blocks, 8 * 8 * 8, "sweep must be exhaustive");

    let tail: Vec<&str> = lines
        .iter()
        .filter(|l| !l.starts_with("B,"))
        .map(String::as_str)
        .collect();
    assert_eq!(
        tail,
        [
            "K,0,0,1",
            "R,0,0",
            "T,No blocks sent (server misconfiguration, check x/y/z_center)",
            "U,1,4,-4,4,0,0",
        ]
    );
}

#[test]
fn snapshot_with_terrain_sends_texture_and_no_warning() {
    let mut raw = config(4);
    raw.texture_url = Some("https://example.net/pack.zip".to_string());
    let world = MockWorld::default().with_block(WorldPos::new(0, 0, 0), Material::Grass, 0);
    let mut bridge = Bridge::new(raw, world);

    let sink = RecordingSink::new();
    bridge.attach(ClientId(1), Box::new(sink.clone()));
    let lines = sink.take();

    assert_eq!(lines[0], "t,https://example.net/pack.zip");
    assert!(lines.contains(&"B,0,0,4,4,4,1".to_string()));
    assert!(!lines.iter().any(|l| l.starts_with("T,No blocks sent")));
    // Terrain height at the center column is y=1, so the client lands at
    // web y = 1 - radius.
    assert_eq!(lines.last().unwrap(), "U,1,4,-3,4,0,0");
}

#[test]
fn client_edit_updates_world_and_relays_to_others() {
    let mut bridge = Bridge::new(config(4), MockWorld::default());
    let requester = attach(&mut bridge, 1);
    let other = attach(&mut bridge, 2);

    bridge.handle_command(
        ClientId(1),
        ClientCommand::BlockEdit { x: 1, y: 1, z: 1, id: 6 },
    );

    assert_eq!(
        bridge.world().block_at(WorldPos::new(-3, -3, -3)).material,
        Material::Stone
    );
    assert_eq!(other.take(), ["B,0,0,1,1,1,6", "R,0,0"]);
    assert!(requester.take().is_empty(), "requester gets nothing extra");
}

#[test]
fn breaking_unbreakable_block_is_reverted() {
    let mut raw = config(4);
    raw.unbreakable.insert(Material::Bedrock);
    let world = MockWorld::default().with_block(WorldPos::new(-3, -3, -3), Material::Bedrock, 0);
    let mut bridge = Bridge::new(raw, world);
    let requester = attach(&mut bridge, 1);
    let other = attach(&mut bridge, 2);

    bridge.handle_command(
        ClientId(1),
        ClientCommand::BlockEdit { x: 1, y: 1, z: 1, id: 0 },
    );

    assert_eq!(
        requester.take(),
        [
            "T,You cannot break blocks of type BEDROCK",
            "B,0,0,1,1,1,65",
            "R,0,0",
        ]
    );
    assert!(other.take().is_empty(), "no other client is notified");
    assert_eq!(
        bridge.world().block_at(WorldPos::new(-3, -3, -3)).material,
        Material::Bedrock
    );
}

#[test]
fn placing_unbreakable_material_is_rejected() {
    let mut raw = config(4);
    raw.unbreakable.insert(Material::Stone);
    let mut bridge = Bridge::new(raw, MockWorld::default());
    let requester = attach(&mut bridge, 1);

    bridge.handle_command(
        ClientId(1),
        ClientCommand::BlockEdit { x: 1, y: 1, z: 1, id: 6 },
    );

    assert_eq!(
        requester.take(),
        [
            "T,You cannot place blocks of type STONE",
            "B,0,0,1,1,1,0",
            "R,0,0",
        ]
    );
}

#[test]
fn edit_outside_boundary_is_rejected_with_message() {
    let mut bridge = Bridge::new(config(4), MockWorld::default());
    let requester = attach(&mut bridge, 1);
    let other = attach(&mut bridge, 2);

    bridge.handle_command(
        ClientId(1),
        ClientCommand::BlockEdit { x: 9, y: 1, z: 1, id: 6 },
    );

    assert_eq!(requester.take(), ["T,You cannot build at (9,1,1)"]);
    assert!(other.take().is_empty());
    assert!(bridge.world().blocks.is_empty());
}

#[test]
fn edit_rejected_when_editing_disabled() {
    let mut raw = config(4);
    raw.permissions.allow_break_place = false;
    let mut bridge = Bridge::new(raw, MockWorld::default());
    let requester = attach(&mut bridge, 1);

    bridge.handle_command(
        ClientId(1),
        ClientCommand::BlockEdit { x: 1, y: 1, z: 1, id: 6 },
    );

    assert_eq!(requester.take(), ["T,Breaking/placing blocks not allowed"]);
    assert!(bridge.world().blocks.is_empty());
}

#[test]
fn host_block_update_broadcasts_with_lighting() {
    let mut bridge = Bridge::new(config(4), MockWorld::default());
    let sink = attach(&mut bridge, 1);

    bridge.notify_block_update(WorldPos::new(0, 0, 0), Material::Glowstone, 0);
    assert_eq!(
        sink.take(),
        ["B,0,0,4,4,4,64", "L,0,0,4,4,4,15", "R,0,0"]
    );

    // Outside the boundary nothing is relayed.
    bridge.notify_block_update(WorldPos::new(40, 0, 0), Material::Stone, 0);
    assert!(sink.take().is_empty());
}

#[test]
fn wall_sign_encodes_face_and_shift() {
    let mut bridge = Bridge::new(config(8), MockWorld::default());
    let sink = attach(&mut bridge, 1);

    bridge.notify_sign_change(
        WorldPos::new(5, 0, 5),
        Material::WallSign,
        3,
        &["Hello".to_string()],
    );

    assert_eq!(sink.take(), ["S,0,0,13,8,14,3,Hello ", "R,0,0"]);
}

#[test]
fn client_sign_creation_commits_and_rebroadcasts() {
    let mut bridge = Bridge::new(config(8), MockWorld::default());
    let requester = attach(&mut bridge, 1);
    let other = attach(&mut bridge, 2);

    bridge.handle_command(
        ClientId(1),
        ClientCommand::SignCreate {
            x: 13,
            y: 8,
            z: 14,
            face: 3,
            text: "Hello".to_string(),
        },
    );

    let committed = bridge.world().block_at(WorldPos::new(5, 0, 5));
    assert_eq!(committed.material, Material::WallSign);
    assert_eq!(committed.data, 3);

    let expected = ["S,0,0,13,8,14,3,Hello ", "R,0,0"];
    assert_eq!(requester.take(), expected);
    assert_eq!(other.take(), expected);
}

#[test]
fn sign_creation_outside_boundary_is_silently_dropped() {
    let mut bridge = Bridge::new(config(8), MockWorld::default());
    let requester = attach(&mut bridge, 1);

    bridge.handle_command(
        ClientId(1),
        ClientCommand::SignCreate {
            x: 0,
            y: 0,
            z: 0,
            face: 3,
            text: "Hello".to_string(),
        },
    );

    assert!(requester.take().is_empty());
    assert!(bridge.world().signs.is_empty());
}

#[test]
fn sign_creation_rejected_when_disabled() {
    let mut raw = config(8);
    raw.permissions.allow_signs = false;
    let mut bridge = Bridge::new(raw, MockWorld::default());
    let requester = attach(&mut bridge, 1);

    bridge.handle_command(
        ClientId(1),
        ClientCommand::SignCreate {
            x: 13,
            y: 8,
            z: 14,
            face: 3,
            text: "Hello".to_string(),
        },
    );

    assert_eq!(requester.take(), ["T,Writing on signs is not allowed"]);
}

#[test]
fn visibility_tracker_crossings() {
    let mut bridge = Bridge::new(config(4), MockWorld::default());
    let sink = attach(&mut bridge, 1);

    // Outside the boundary: nothing at all.
    bridge.notify_entity_move(&entity(7, "alice", DVec3::new(10.0, 0.0, 0.0)));
    assert!(sink.take().is_empty());

    // Crossing in: exactly one add sequence, position before name.
    bridge.notify_entity_move(&entity(7, "alice", DVec3::new(1.5, 2.0, 3.25)));
    let lines = sink.take();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("P,7,5.5,6,7.25,"));
    assert_eq!(lines[1], "N,7,alice");

    // Moving while inside: plain position updates only.
    bridge.notify_entity_move(&entity(7, "alice", DVec3::new(2.0, 2.0, 2.0)));
    let lines = sink.take();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("P,7,"));

    // Crossing out: exactly one delete.
    bridge.notify_entity_move(&entity(7, "alice", DVec3::new(10.0, 0.0, 0.0)));
    assert_eq!(sink.take(), ["D,7"]);

    // Back-to-back crossings never duplicate adds or deletes.
    bridge.notify_entity_move(&entity(7, "alice", DVec3::new(0.0, 0.0, 0.0)));
    bridge.notify_entity_move(&entity(7, "alice", DVec3::new(0.5, 0.0, 0.0)));
    let lines = sink.take();
    assert_eq!(lines.iter().filter(|l| l.starts_with("N,")).count(), 1);
}

#[test]
fn rotation_is_sent_as_negated_radians() {
    use approx::assert_relative_eq;

    let mut bridge = Bridge::new(config(4), MockWorld::default());
    let sink = attach(&mut bridge, 1);

    let mut looking = entity(7, "alice", DVec3::new(1.0, 1.0, 1.0));
    looking.yaw = 90.0;
    looking.pitch = 45.0;
    bridge.notify_entity_move(&looking);

    let lines = sink.take();
    let fields: Vec<&str> = lines[0].split(',').collect();
    assert_eq!(fields[0], "P");
    let rot_x: f64 = fields[5].parse().unwrap();
    let rot_y: f64 = fields[6].parse().unwrap();
    assert_relative_eq!(rot_x, -std::f64::consts::FRAC_PI_2);
    assert_relative_eq!(rot_y, -std::f64::consts::FRAC_PI_4);
}

#[test]
fn edit_with_auxless_id_keeps_host_data_byte() {
    let world = MockWorld::default().with_block(WorldPos::new(-3, -3, -3), Material::Wool, 5);
    let mut bridge = Bridge::new(config(4), world);
    attach(&mut bridge, 1);

    // Web id 6 has no auxiliary byte; the host's stays untouched.
    bridge.handle_command(
        ClientId(1),
        ClientCommand::BlockEdit { x: 1, y: 1, z: 1, id: 6 },
    );

    let committed = bridge.world().block_at(WorldPos::new(-3, -3, -3));
    assert_eq!(committed.material, Material::Stone);
    assert_eq!(committed.data, 5);

    // A colorable id does carry one and overwrites it.
    bridge.handle_command(
        ClientId(1),
        ClientCommand::BlockEdit { x: 1, y: 1, z: 1, id: 32 },
    );
    let committed = bridge.world().block_at(WorldPos::new(-3, -3, -3));
    assert_eq!(committed.material, Material::Wool);
    assert_eq!(committed.data, 4);
}

#[test]
fn spawn_and_remove_entry_points() {
    let mut bridge = Bridge::new(config(4), MockWorld::default());
    let sink = attach(&mut bridge, 1);

    bridge.notify_entity_add(&entity(9, "bob", DVec3::new(0.0, 0.0, 0.0)));
    let lines = sink.take();
    assert!(lines[0].starts_with("P,9,"));
    assert_eq!(lines[1], "N,9,bob");

    // A second add for the same entity is a no-op.
    bridge.notify_entity_add(&entity(9, "bob", DVec3::new(0.0, 0.0, 0.0)));
    assert!(sink.take().is_empty());

    bridge.notify_entity_remove(EntityId(9));
    assert_eq!(sink.take(), ["D,9"]);

    // Removing an entity nobody sees emits nothing.
    bridge.notify_entity_remove(EntityId(9));
    assert!(sink.take().is_empty());
}

#[test]
fn attach_announces_entities_already_inside() {
    let world = MockWorld::default()
        .with_entity(3, "carol", DVec3::new(1.0, 1.0, 1.0))
        .with_entity(4, "dave", DVec3::new(100.0, 0.0, 0.0));
    let mut bridge = Bridge::new(config(4), world);

    let sink = RecordingSink::new();
    bridge.attach(ClientId(1), Box::new(sink.clone()));
    let lines = sink.take();

    let p = lines.iter().position(|l| l.starts_with("P,3,")).unwrap();
    let n = lines.iter().position(|l| l == "N,3,carol").unwrap();
    assert!(p < n, "position must precede name");
    assert!(!lines.iter().any(|l| l.starts_with("P,4,")), "outside entity stays unknown");
}

#[test]
fn see_players_disabled_suppresses_everything() {
    let mut raw = config(4);
    raw.permissions.see_players = false;
    let world = MockWorld::default().with_entity(3, "carol", DVec3::new(1.0, 1.0, 1.0));
    let mut bridge = Bridge::new(raw, world);
    let sink = attach(&mut bridge, 1);

    bridge.notify_entity_move(&entity(3, "carol", DVec3::new(0.0, 0.0, 0.0)));
    bridge.notify_entity_remove(EntityId(3));
    assert!(sink.take().is_empty());
}

#[test]
fn chat_round_trip_and_policy() {
    let mut bridge = Bridge::new(config(4), MockWorld::default());
    let a = attach(&mut bridge, 1);
    let b = attach(&mut bridge, 2);

    bridge.handle_command(
        ClientId(1),
        ClientCommand::Chat {
            name: "steve".to_string(),
            text: "hi all".to_string(),
        },
    );
    assert_eq!(a.take(), ["T,<steve> hi all"]);
    assert_eq!(b.take(), ["T,<steve> hi all"]);
    assert_eq!(bridge.world().chat, ["<steve> hi all"]);

    bridge.notify_chat("server restarting soon");
    assert_eq!(a.take(), ["T,server restarting soon"]);
}

#[test]
fn chat_rejected_when_disabled() {
    let mut raw = config(4);
    raw.permissions.allow_chat = false;
    let mut bridge = Bridge::new(raw, MockWorld::default());
    let requester = attach(&mut bridge, 1);

    bridge.handle_command(
        ClientId(1),
        ClientCommand::Chat {
            name: "steve".to_string(),
            text: "hi".to_string(),
        },
    );
    assert_eq!(requester.take(), ["T,Chatting is not allowed"]);
    assert!(bridge.world().chat.is_empty());
}

#[test]
fn see_chat_disabled_suppresses_host_chat() {
    let mut raw = config(4);
    raw.permissions.see_chat = false;
    let mut bridge = Bridge::new(raw, MockWorld::default());
    let sink = attach(&mut bridge, 1);

    bridge.notify_chat("hidden");
    assert!(sink.take().is_empty());
}

#[test]
fn detach_drops_session_and_visibility() {
    let mut bridge = Bridge::new(config(4), MockWorld::default());
    let sink = attach(&mut bridge, 1);
    bridge.notify_entity_move(&entity(7, "alice", DVec3::new(0.0, 0.0, 0.0)));
    sink.take();

    bridge.detach(ClientId(1));
    assert_eq!(bridge.client_count(), 0);

    bridge.notify_entity_move(&entity(7, "alice", DVec3::new(0.5, 0.0, 0.0)));
    bridge.notify_block_update(WorldPos::new(0, 0, 0), Material::Stone, 0);
    assert!(sink.take().is_empty(), "closed channel receives nothing");
}

#[test]
fn tasks_dispatch_to_the_right_handlers() {
    let mut bridge = Bridge::new(config(4), MockWorld::default());
    let sink = RecordingSink::new();

    bridge.dispatch(Task::Attach {
        id: ClientId(1),
        sink: Box::new(sink.clone()),
    });
    sink.take();

    bridge.dispatch(Task::Event(HostEvent::Chat("hello".to_string())));
    assert_eq!(sink.take(), ["T,hello"]);

    bridge.dispatch(Task::Command {
        id: ClientId(1),
        command: ClientCommand::BlockEdit { x: 1, y: 1, z: 1, id: 6 },
    });
    assert_eq!(
        bridge.world().block_at(WorldPos::new(-3, -3, -3)).material,
        Material::Stone
    );

    bridge.dispatch(Task::Detach { id: ClientId(1) });
    assert_eq!(bridge.client_count(), 0);
}
