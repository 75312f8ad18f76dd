//! Body table error types.

use griddom::{MarkupError, SelectorError};
use thiserror::Error;

use crate::pane::Side;

/// Errors raised by the body table and its collaborators.
///
/// Width/schema mismatches and missing painters are caller contract
/// violations: the table refuses to draw rather than showing misaligned
/// columns.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BodyTableError {
    /// Width list and visible column list disagree in length.
    #[error("{side} pane has {columns} visible columns but {widths} column widths")]
    ColumnCountMismatch {
        side: Side,
        widths: usize,
        columns: usize,
    },

    /// No cell painter is registered for the edit type.
    #[error("no cell painter registered for edit type '{0}'")]
    MissingCellPainter(String),

    #[error("invalid markup: {0}")]
    Markup(#[from] MarkupError),

    #[error("invalid selector: {0}")]
    Selector(#[from] SelectorError),

    /// The table shell has not been rendered yet.
    #[error("table shell has not been rendered")]
    ShellNotRendered,

    #[error("element '{0}' not found in table")]
    ElementNotFound(String),

    /// Called back into the table from inside one of its own locked
    /// sections, such as a `with_body` closure.
    #[error("body table is already in use on this thread")]
    Busy,

    /// The table was destroyed.
    #[error("body table has been destroyed")]
    Destroyed,
}
