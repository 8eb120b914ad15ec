// src/corridor/connector.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lateral alignment of a segment's path where it meets its neighbour.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConnectorClass {
    Left,
    #[default]
    Middle,
    Right,
}

impl ConnectorClass {
    pub const ALL: [ConnectorClass; 3] = [Self::Left, Self::Middle, Self::Right];
}

impl fmt::Display for ConnectorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConnectorClass::Left => "Left",
            ConnectorClass::Middle => "Middle",
            ConnectorClass::Right => "Right",
        };
        f.write_str(s)
    }
}
