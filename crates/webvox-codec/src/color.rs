//! Color approximation for the colorable web block range.
//!
//! The web client exposes 32 colored block ids (32..=63) but the host's
//! colorable material has only 16 dye variants, so the reverse mapping is
//! deliberately many-to-one and only approximate.

/// Host dye colors, with their auxiliary-data byte values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DyeColor {
    White,
    Orange,
    Magenta,
    LightBlue,
    Yellow,
    Lime,
    Pink,
    Gray,
    Silver,
    Cyan,
    Purple,
    Blue,
    Brown,
    Green,
    Red,
    Black,
}

impl DyeColor {
    /// Auxiliary-data byte the host stores for this dye on a colorable block.
    #[inline]
    pub const fn wool_data(self) -> u8 {
        match self {
            Self::White => 0,
            Self::Orange => 1,
            Self::Magenta => 2,
            Self::LightBlue => 3,
            Self::Yellow => 4,
            Self::Lime => 5,
            Self::Pink => 6,
            Self::Gray => 7,
            Self::Silver => 8,
            Self::Cyan => 9,
            Self::Purple => 10,
            Self::Blue => 11,
            Self::Brown => 12,
            Self::Green => 13,
            Self::Red => 14,
            Self::Black => 15,
        }
    }

    /// Nearest dye for a colorable web id, `None` outside `32..=63`.
    pub const fn approximate(web_id: u8) -> Option<Self> {
        Some(match web_id {
            32 => Self::Yellow,              // yellow
            33..=35 => Self::Green,          // light green .. sea green
            36..=38 => Self::Brown,          // light .. dark brown
            39 | 42 => Self::Purple,         // purple, light purple
            40 | 41 | 49 | 63 => Self::Gray, // grays
            43 => Self::Magenta,             // crimson
            44 => Self::Red,                 // salmon
            45 => Self::Pink,                // pink
            46 => Self::Lime,                // puke green
            47 => Self::Brown,               // poop brown
            48 => Self::Black,               // black
            50 => Self::Silver,              // medium gray
            51..=55 => Self::Orange,         // leather .. sand
            56 | 57 => Self::Blue,           // aqua, blue
            58 => Self::LightBlue,           // light blue
            59 => Self::Cyan,                // foam green
            60..=62 => Self::White,          // cloud, white, offwhite
            _ => return None,
        })
    }
}
