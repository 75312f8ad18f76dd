//! Pane identity.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which of the two body panes a renderer draws.
///
/// The left pane holds the frozen columns, the right pane scrolls. Only the
/// right pane compensates for dummy rows and scrollbars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Side {
    #[serde(rename = "L")]
    Left,
    #[default]
    #[serde(rename = "R")]
    Right,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::Left, Side::Right];

    pub fn is_right(&self) -> bool {
        matches!(self, Side::Right)
    }

    /// Single-letter code used in element ids and logs.
    pub fn code(&self) -> &'static str {
        match self {
            Side::Left => "L",
            Side::Right => "R",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
