//! Block-type codec between the host's rich material vocabulary and the
//! web client's narrow integer block ids.
//!
//! Three independent mappings live here:
//! - forward/reverse block-id translation ([`BlockMap`])
//! - light emission levels ([`light_level`])
//! - color approximation for the colorable id range ([`DyeColor`])

pub mod blockmap;
pub mod color;
pub mod lighting;

pub use blockmap::{BlockMap, COLOR_RANGE_END, COLOR_RANGE_START, DECODE_PLACEHOLDER};
pub use color::DyeColor;
pub use lighting::light_level;
