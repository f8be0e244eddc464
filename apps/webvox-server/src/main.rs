//! Standalone bridge server over a generated demo world.
//!
//! Usage: `webvox-server [config.yaml] [port]`, in either order: a bare
//! numeric argument selects the port, anything else is the config path.
//! Without a config path the built-in defaults apply (4096-block sandbox
//! around the origin, all permissions enabled).

mod transport;
mod world;

use std::fs;

use anyhow::Context;
use crossbeam::channel;
use tracing::info;
use tracing_subscriber::EnvFilter;
use webvox_bridge::Bridge;
use webvox_core::{RawConfig, SandboxConfig};

use crate::world::DemoWorld;

const DEFAULT_PORT: u16 = 4081;

/// Split command-line arguments into a config path and a port. A value
/// that parses as a port number is the port; everything else is a path.
fn parse_args(args: impl Iterator<Item = String>) -> (Option<String>, u16) {
    let mut config_path = None;
    let mut port = DEFAULT_PORT;
    for arg in args {
        match arg.parse() {
            Ok(p) => port = p,
            Err(_) => config_path = Some(arg),
        }
    }
    (config_path, port)
}

fn load_config(path: Option<&str>) -> anyhow::Result<SandboxConfig> {
    let raw = match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config file {path}"))?;
            serde_yaml::from_str::<RawConfig>(&text)
                .with_context(|| format!("parsing config file {path}"))?
        }
        None => RawConfig::default(),
    };
    Ok(raw.build()?)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let (config_path, port) = parse_args(std::env::args().skip(1));
    let config = load_config(config_path.as_deref())?;
    let world = DemoWorld::generate(&config)?;
    let mut bridge = Bridge::new(config, world);

    let (tasks_tx, tasks_rx) = channel::unbounded();
    transport::listen(port, tasks_tx)?;
    info!(port, "listening");

    // Single simulation context: every mutation of bridge state happens
    // here, in the order tasks arrive.
    for task in tasks_rx {
        bridge.dispatch(task);
    }
    Ok(())
}
