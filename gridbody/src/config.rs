//! Body table configuration.

use serde::{Deserialize, Serialize};

/// Extra pixels the legacy engine adds to each cell through its padding.
pub const LEGACY_EXTRA_WIDTH: u32 = 20;

/// Border between cells, in pixels.
pub const CELL_BORDER_WIDTH: u32 = 1;

/// Rendering engine compatibility mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Compat {
    #[default]
    Modern,
    /// Engine that widens cells by their padding and clips the last cell of
    /// the scrollable pane.
    LegacyEngine,
}

/// How a populated table body gets redrawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedrawStrategy {
    /// Rewrite the body section in place.
    #[default]
    TargetedPatch,
    /// Rebuild the whole table (column group and body) in a single write.
    StructuralReplace,
}

/// Configuration shared by both panes of a grid.
///
/// Decided once at startup and handed to each table; nothing re-derives it
/// per call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyTableConfig {
    pub compat: Compat,
    pub redraw: RedrawStrategy,
    /// Width compensation applied per column under `Compat::LegacyEngine`.
    pub legacy_extra_width: u32,
    pub cell_border_width: u32,
}

impl Default for BodyTableConfig {
    fn default() -> Self {
        Self {
            compat: Compat::Modern,
            redraw: RedrawStrategy::TargetedPatch,
            legacy_extra_width: LEGACY_EXTRA_WIDTH,
            cell_border_width: CELL_BORDER_WIDTH,
        }
    }
}

impl BodyTableConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration for the legacy engine: width compensation on, and
    /// bodies redrawn by replacing the whole table.
    pub fn legacy() -> Self {
        Self {
            compat: Compat::LegacyEngine,
            redraw: RedrawStrategy::StructuralReplace,
            ..Default::default()
        }
    }

    pub fn compat(mut self, compat: Compat) -> Self {
        self.compat = compat;
        self
    }

    pub fn redraw(mut self, redraw: RedrawStrategy) -> Self {
        self.redraw = redraw;
        self
    }

    pub fn legacy_extra_width(mut self, width: u32) -> Self {
        self.legacy_extra_width = width;
        self
    }

    pub fn cell_border_width(mut self, width: u32) -> Self {
        self.cell_border_width = width;
        self
    }

    pub fn is_legacy(&self) -> bool {
        self.compat == Compat::LegacyEngine
    }

    /// Pixels subtracted from every column width: non-zero only for the
    /// legacy engine.
    pub fn extra_width(&self) -> u32 {
        match self.compat {
            Compat::LegacyEngine => self.legacy_extra_width,
            Compat::Modern => 0,
        }
    }
}
