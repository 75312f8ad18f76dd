//! Reactions to external model changes.

use log::trace;

use griddom::{find_element_mut, Overflow};

use super::{Inner, ModelChange};
use crate::error::BodyTableError;

impl Inner {
    pub(super) fn handle_change(&mut self, change: ModelChange) -> Result<(), BodyTableError> {
        trace!("[body_table] {} pane: {:?}", self.shell.side(), change);

        match change {
            ModelChange::ColumnWidth => self.on_column_width_changed(),
            // Dummy rows must not bring up a scrollbar, so only the
            // scrollable pane tracks them.
            ModelChange::DummyRowCount if self.shell.side().is_right() => {
                self.reset_overflow();
                self.reset_height();
                Ok(())
            }
            ModelChange::BodyHeight if self.shell.side().is_right() => {
                self.reset_height();
                Ok(())
            }
            ModelChange::DummyRowCount | ModelChange::BodyHeight => Ok(()),
        }
    }

    /// Patch the `<col>` widths in place.
    fn on_column_width_changed(&mut self) -> Result<(), BodyTableError> {
        let shell = &mut self.shell;
        let side = shell.side();
        let widths = shell.dimension().column_width_list(side);

        let columns = shell.visible_column_count();
        if widths.len() != columns {
            return Err(BodyTableError::ColumnCountMismatch {
                side,
                widths: widths.len(),
                columns,
            });
        }

        if !shell.is_rendered() {
            trace!("[body_table] {} pane not rendered yet, width change skipped", side);
            return Ok(());
        }

        let extra_width = shell.config().extra_width();
        let border = shell.config().cell_border_width;
        let legacy = shell.config().is_legacy();
        let col_ids = shell.col_ids();
        let mut total_width = 0;

        for (index, width) in widths.iter().enumerate() {
            // Columns added since the last render get their <col> on the next one.
            if let Some(col) = col_ids
                .get(index)
                .and_then(|id| find_element_mut(&mut shell.el, id))
            {
                col.style.width = Some(width.saturating_sub(extra_width));
            }
            total_width += width + border;
        }

        // The legacy engine clips the last cell unless the container is sized explicitly.
        if side.is_right() && legacy {
            shell.el.style.width = Some(total_width + border);
        }
        Ok(())
    }

    pub(super) fn reset_overflow(&mut self) {
        let overflow = if self.render_model.dummy_row_count() > 0 {
            Overflow::Hidden
        } else {
            Overflow::Visible
        };
        self.shell.el.style.overflow = Some(overflow);
    }

    pub(super) fn reset_height(&mut self) {
        let height = if self.render_model.dummy_row_count() > 0 {
            let dimension = self.shell.dimension();
            Some(
                dimension
                    .body_height()
                    .saturating_sub(dimension.scroll_x_height()),
            )
        } else {
            None
        };
        self.shell.el.style.height = height;
    }

    pub(super) fn reset_table_position(&mut self) {
        self.shell.el.style.top = Some(self.shell.dimension().top());
    }
}
