//! Core types for the webvox bridge.
//!
//! This crate provides the foundational types shared by the codec,
//! protocol, and bridge crates:
//! - World and web coordinate systems, and the sandbox boundary
//! - The host material vocabulary
//! - The immutable sandbox configuration
//! - Common error types

pub mod config;
pub mod coords;
pub mod error;
pub mod material;

pub use config::{Permissions, RawConfig, SandboxConfig, DEFAULT_MISSING_ID};
pub use coords::{Sandbox, WebPos, WorldPos};
pub use error::{Error, Result};
pub use material::{BlockDescriptor, Material};
