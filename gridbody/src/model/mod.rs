//! The external models a body table reads from.
//!
//! The traits are the contract the table depends on. The concrete models
//! implement them on top of [`Observable`](crate::observe::Observable) and are
//! what a grid normally wires in.

mod column;
mod dimension;
mod render;

pub use column::{ColumnInfo, ColumnModel};
pub use dimension::{DimensionModel, SCROLLBAR_WIDTH};
pub use render::RenderModel;

use crate::observe::{Callback, Subscription};
use crate::pane::Side;

/// Publishes the ordered column widths of each pane.
pub trait ColumnWidthSource: Send + Sync {
    /// Pixel widths for `side`, index-aligned with the visible columns of
    /// that pane.
    fn column_width_list(&self, side: Side) -> Vec<u32>;

    /// Notified after any pane's widths change.
    fn subscribe_column_width_changed(&self, callback: Callback<()>) -> Subscription;
}

/// Geometry of the grid body.
pub trait DimensionSource: ColumnWidthSource {
    fn body_height(&self) -> u32;

    /// Height of the horizontal scrollbar, 0 when there is none.
    fn scroll_x_height(&self) -> u32;

    /// Top offset of the visible rows.
    fn top(&self) -> i32;

    fn subscribe_body_height(&self, callback: Callback<u32>) -> Subscription;
}

/// Row rendering state.
pub trait RenderSource: Send + Sync {
    /// Empty rows added to fill the viewport below the data.
    fn dummy_row_count(&self) -> usize;

    fn subscribe_dummy_row_count(&self, callback: Callback<usize>) -> Subscription;
}

/// Column definitions.
pub trait ColumnSchema: Send + Sync {
    /// Visible columns of `side` in display order. `include_meta` adds the
    /// row-number/selection meta columns, which always live on the left pane.
    fn visible_column_model_list(&self, side: Side, include_meta: bool) -> Vec<ColumnInfo>;
}
