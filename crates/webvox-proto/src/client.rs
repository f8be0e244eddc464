//! Client-to-server wire commands.
//!
//! Inbound lines are parsed on the I/O side into self-contained commands
//! before anything touches shared state. A line that fails to parse is
//! fatal for its connection.

use thiserror::Error;

/// Parse failure for an inbound line.
#[derive(Error, Debug)]
pub enum ParseError {
    /// Empty frame
    #[error("empty frame")]
    Empty,

    /// Command letter the server does not speak
    #[error("unsupported command: {0:?}")]
    UnsupportedCommand(String),

    /// Wrong number of fields for the command
    #[error("wrong field count for {command:?}: got {got}")]
    FieldCount { command: char, got: usize },

    /// A field that failed numeric conversion or range check
    #[error("invalid field in {command:?} frame: {field:?}")]
    InvalidField { command: char, field: String },
}

/// A single client-to-server command, decoded and self-contained.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClientCommand {
    /// `B,<x>,<y>,<z>,<id>` — request a block edit at a web position.
    BlockEdit { x: i32, y: i32, z: i32, id: u8 },
    /// `S,<x>,<y>,<z>,<face>,<text>` — request sign creation.
    SignCreate {
        x: i32,
        y: i32,
        z: i32,
        face: u8,
        text: String,
    },
    /// `T,<name>,<text>` — chat message.
    Chat { name: String, text: String },
}

fn int_field(command: char, field: &str) -> Result<i32, ParseError> {
    field.parse().map_err(|_| ParseError::InvalidField {
        command,
        field: field.to_string(),
    })
}

impl ClientCommand {
    /// Parse one wire line (with or without its trailing newline).
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let line = line.trim_end_matches(['\n', '\r']);
        if line.is_empty() {
            return Err(ParseError::Empty);
        }

        match line.split(',').next() {
            Some("B") => {
                let fields: Vec<&str> = line.split(',').collect();
                if fields.len() != 5 {
                    return Err(ParseError::FieldCount {
                        command: 'B',
                        got: fields.len(),
                    });
                }
                let id = fields[4].parse().map_err(|_| ParseError::InvalidField {
                    command: 'B',
                    field: fields[4].to_string(),
                })?;
                Ok(Self::BlockEdit {
                    x: int_field('B', fields[1])?,
                    y: int_field('B', fields[2])?,
                    z: int_field('B', fields[3])?,
                    id,
                })
            }
            Some("S") => {
                // The trailing text field may itself contain commas.
                let fields: Vec<&str> = line.splitn(6, ',').collect();
                if fields.len() != 6 {
                    return Err(ParseError::FieldCount {
                        command: 'S',
                        got: fields.len(),
                    });
                }
                let face: u8 = fields[4].parse().map_err(|_| ParseError::InvalidField {
                    command: 'S',
                    field: fields[4].to_string(),
                })?;
                if face > 3 {
                    return Err(ParseError::InvalidField {
                        command: 'S',
                        field: fields[4].to_string(),
                    });
                }
                Ok(Self::SignCreate {
                    x: int_field('S', fields[1])?,
                    y: int_field('S', fields[2])?,
                    z: int_field('S', fields[3])?,
                    face,
                    text: fields[5].to_string(),
                })
            }
            Some("T") => {
                let fields: Vec<&str> = line.splitn(3, ',').collect();
                if fields.len() != 3 {
                    return Err(ParseError::FieldCount {
                        command: 'T',
                        got: fields.len(),
                    });
                }
                Ok(Self::Chat {
                    name: fields[1].to_string(),
                    text: fields[2].to_string(),
                })
            }
            _ => Err(ParseError::UnsupportedCommand(
                line.chars().take(8).collect(),
            )),
        }
    }
}
