//! Row collection seam.
//!
//! The body table does not know how rows are drawn. On every structural
//! render it asks the [`ViewFactory`] for a fresh [`RowList`], hands it the
//! body section to fill, and destroys it before the next render.

use griddom::Element;

use crate::body_table::Shell;
use crate::config::BodyTableConfig;
use crate::error::BodyTableError;
use crate::pane::Side;

/// Rows of one pane.
pub trait RowList: Send {
    /// Fill (or refill) the table body.
    fn render(&mut self, body: &mut BodySection<'_>) -> Result<(), BodyTableError>;

    /// Release listeners and state. Called before the next structural render
    /// and when the table is destroyed.
    fn destroy(&mut self) {}
}

/// Creates row collections.
pub trait ViewFactory: Send + Sync {
    fn create_row_list(&self, side: Side, body_id: &str) -> Box<dyn RowList>;
}

/// Write access to the body of a rendered table shell.
pub struct BodySection<'a> {
    shell: &'a mut Shell,
}

impl<'a> BodySection<'a> {
    pub(crate) fn new(shell: &'a mut Shell) -> Self {
        Self { shell }
    }

    pub fn side(&self) -> Side {
        self.shell.side()
    }

    pub fn config(&self) -> &BodyTableConfig {
        self.shell.config()
    }

    pub fn body_id(&self) -> Result<String, BodyTableError> {
        self.shell.body_id()
    }

    /// The body element, for in-place row updates.
    pub fn body(&mut self) -> Result<&mut Element, BodyTableError> {
        self.shell.body_mut()
    }

    /// Replace all rows with `markup` using the configured redraw strategy.
    /// Returns the id of the body element that now holds the rows.
    pub fn replace_rows(&mut self, markup: &str) -> Result<String, BodyTableError> {
        self.shell.replace_rows(markup)
    }

    /// Rebuild the whole table around `markup` in one write.
    pub fn redraw_table(&mut self, markup: &str) -> Result<String, BodyTableError> {
        self.shell.redraw_table(markup)
    }
}
