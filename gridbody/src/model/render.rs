use crate::observe::{Callback, Observable, Subscription};

use super::RenderSource;

/// Row rendering state shared by both panes.
#[derive(Debug, Clone, Default)]
pub struct RenderModel {
    dummy_row_count: Observable<usize>,
}

impl RenderModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_dummy_row_count(&self, count: usize) -> bool {
        self.dummy_row_count.set(count)
    }
}

impl RenderSource for RenderModel {
    fn dummy_row_count(&self) -> usize {
        self.dummy_row_count.get()
    }

    fn subscribe_dummy_row_count(&self, callback: Callback<usize>) -> Subscription {
        self.dummy_row_count.subscribe(callback)
    }
}
