use std::sync::{Arc, PoisonError, RwLock};

use log::trace;

use crate::observe::{Callback, Observable, Signal, Subscription};
use crate::pane::Side;

use super::{ColumnWidthSource, DimensionSource};

/// Height reserved for a horizontal scrollbar.
pub const SCROLLBAR_WIDTH: u32 = 17;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct PaneWidths {
    left: Vec<u32>,
    right: Vec<u32>,
}

/// Grid geometry: column widths per pane, body height, scroll state.
#[derive(Debug, Clone, Default)]
pub struct DimensionModel {
    widths: Arc<RwLock<PaneWidths>>,
    column_width_changed: Signal<()>,
    body_height: Observable<u32>,
    scroll_x: Observable<bool>,
    top: Observable<i32>,
}

impl DimensionModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the widths of both panes at once, then notify once.
    pub fn set_column_width_lists(&self, left: Vec<u32>, right: Vec<u32>) {
        {
            let mut widths = self.widths.write().unwrap_or_else(PoisonError::into_inner);
            widths.left = left;
            widths.right = right;
        }
        trace!("[dimension] column widths replaced");
        self.column_width_changed.emit(&());
    }

    /// Resize one column of one pane. Returns false when `index` is out of range.
    pub fn set_column_width(&self, side: Side, index: usize, width: u32) -> bool {
        {
            let mut widths = self.widths.write().unwrap_or_else(PoisonError::into_inner);
            let list = match side {
                Side::Left => &mut widths.left,
                Side::Right => &mut widths.right,
            };
            match list.get_mut(index) {
                Some(slot) if *slot != width => *slot = width,
                _ => return false,
            }
        }
        trace!("[dimension] {} column {} resized to {}", side, index, width);
        self.column_width_changed.emit(&());
        true
    }

    pub fn set_body_height(&self, height: u32) -> bool {
        self.body_height.set(height)
    }

    /// Whether a horizontal scrollbar is shown.
    pub fn set_scroll_x(&self, scroll_x: bool) -> bool {
        self.scroll_x.set(scroll_x)
    }

    pub fn set_top(&self, top: i32) -> bool {
        self.top.set(top)
    }
}

impl ColumnWidthSource for DimensionModel {
    fn column_width_list(&self, side: Side) -> Vec<u32> {
        let widths = self.widths.read().unwrap_or_else(PoisonError::into_inner);
        match side {
            Side::Left => widths.left.clone(),
            Side::Right => widths.right.clone(),
        }
    }

    fn subscribe_column_width_changed(&self, callback: Callback<()>) -> Subscription {
        self.column_width_changed.subscribe(callback)
    }
}

impl DimensionSource for DimensionModel {
    fn body_height(&self) -> u32 {
        self.body_height.get()
    }

    fn scroll_x_height(&self) -> u32 {
        if self.scroll_x.get() { SCROLLBAR_WIDTH } else { 0 }
    }

    fn top(&self) -> i32 {
        self.top.get()
    }

    fn subscribe_body_height(&self, callback: Callback<u32>) -> Subscription {
        self.body_height.subscribe(callback)
    }
}
