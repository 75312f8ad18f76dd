//! Painter registry seam.
//!
//! Painters produce row/cell markup and own the event handlers for what they
//! draw. The body table only asks them for their handler descriptors, once,
//! and routes events to them by delegation.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use griddom::Handler;

use crate::error::BodyTableError;

/// Where and how a painter wants an event handled.
#[derive(Clone)]
pub struct HandlerInfo {
    /// Selector relative to the painted element. Empty means the element
    /// itself.
    pub selector: String,
    pub handler: Handler,
}

impl HandlerInfo {
    pub fn new(selector: impl Into<String>, handler: Handler) -> Self {
        Self {
            selector: selector.into(),
            handler,
        }
    }
}

impl fmt::Debug for HandlerInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerInfo")
            .field("selector", &self.selector)
            .finish_non_exhaustive()
    }
}

/// Event name to handler descriptor.
pub type EventHandlerInfo = BTreeMap<String, HandlerInfo>;

/// A row or cell painter.
pub trait Painter: Send + Sync {
    fn event_handler_info(&self) -> EventHandlerInfo;
}

/// Supplies the row painter and one cell painter per edit type.
pub trait PainterRegistry: Send + Sync {
    fn row_painter(&self) -> Arc<dyn Painter>;

    /// Edit type to painter.
    fn cell_painters(&self) -> BTreeMap<String, Arc<dyn Painter>>;

    /// Painter for `edit_type`. An unregistered edit type is a contract
    /// violation.
    fn cell_painter(&self, edit_type: &str) -> Result<Arc<dyn Painter>, BodyTableError> {
        self.cell_painters()
            .remove(edit_type)
            .ok_or_else(|| BodyTableError::MissingCellPainter(edit_type.to_string()))
    }
}

/// Painter without handlers.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPainter;

impl Painter for NoopPainter {
    fn event_handler_info(&self) -> EventHandlerInfo {
        EventHandlerInfo::new()
    }
}

/// Painter built from a fixed handler table.
#[derive(Debug, Clone, Default)]
pub struct HandlerTablePainter {
    handlers: EventHandlerInfo,
}

impl HandlerTablePainter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle `event` on elements matching `selector` inside the painted element.
    pub fn on(
        mut self,
        event: impl Into<String>,
        selector: impl Into<String>,
        handler: Handler,
    ) -> Self {
        self.handlers
            .insert(event.into(), HandlerInfo::new(selector, handler));
        self
    }
}

impl Painter for HandlerTablePainter {
    fn event_handler_info(&self) -> EventHandlerInfo {
        self.handlers.clone()
    }
}

/// Default registry implementation.
#[derive(Clone)]
pub struct PainterManager {
    row_painter: Arc<dyn Painter>,
    cell_painters: BTreeMap<String, Arc<dyn Painter>>,
}

impl Default for PainterManager {
    fn default() -> Self {
        Self {
            row_painter: Arc::new(NoopPainter),
            cell_painters: BTreeMap::new(),
        }
    }
}

impl fmt::Debug for PainterManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PainterManager")
            .field("cell_painters", &self.cell_painters.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl PainterManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_row_painter(mut self, painter: impl Painter + 'static) -> Self {
        self.row_painter = Arc::new(painter);
        self
    }

    pub fn with_cell_painter(
        mut self,
        edit_type: impl Into<String>,
        painter: impl Painter + 'static,
    ) -> Self {
        self.cell_painters.insert(edit_type.into(), Arc::new(painter));
        self
    }
}

impl PainterRegistry for PainterManager {
    fn row_painter(&self) -> Arc<dyn Painter> {
        Arc::clone(&self.row_painter)
    }

    fn cell_painters(&self) -> BTreeMap<String, Arc<dyn Painter>> {
        self.cell_painters.clone()
    }

    fn cell_painter(&self, edit_type: &str) -> Result<Arc<dyn Painter>, BodyTableError> {
        self.cell_painters
            .get(edit_type)
            .cloned()
            .ok_or_else(|| BodyTableError::MissingCellPainter(edit_type.to_string()))
    }
}
