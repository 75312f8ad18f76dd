//! The owned table shell: container, table, column group and body.

use std::sync::Arc;

use log::{debug, trace};

use griddom::{find_all, find_element_mut, find_first, Element, Selector};

use crate::colgroup::col_group_markup;
use crate::config::{BodyTableConfig, RedrawStrategy};
use crate::error::BodyTableError;
use crate::model::{ColumnSchema, DimensionSource};
use crate::pane::Side;

/// Class of the container element.
pub const CONTAINER_CLASS: &str = "table_container";

/// The table markup around a column group and a body.
pub fn table_template(col_group: &str, tbody: &str) -> String {
    format!(
        r##"<table width="100%" border="0" cellspacing="1" cellpadding="0" bgcolor="#EFEFEF"><colgroup>{col_group}</colgroup><tbody>{tbody}</tbody></table>"##
    )
}

pub(crate) struct Shell {
    side: Side,
    config: BodyTableConfig,
    dimension: Arc<dyn DimensionSource>,
    columns: Arc<dyn ColumnSchema>,
    pub(crate) el: Element,
    body_selector: Selector,
    col_selector: Selector,
}

impl Shell {
    pub(crate) fn new(
        side: Side,
        config: BodyTableConfig,
        dimension: Arc<dyn DimensionSource>,
        columns: Arc<dyn ColumnSchema>,
    ) -> Result<Self, BodyTableError> {
        Ok(Self {
            side,
            config,
            dimension,
            columns,
            el: Element::div().class(CONTAINER_CLASS),
            body_selector: Selector::parse("table > tbody")?,
            col_selector: Selector::parse("table > colgroup > col")?,
        })
    }

    pub(crate) fn side(&self) -> Side {
        self.side
    }

    pub(crate) fn config(&self) -> &BodyTableConfig {
        &self.config
    }

    pub(crate) fn dimension(&self) -> &dyn DimensionSource {
        self.dimension.as_ref()
    }

    pub(crate) fn visible_column_count(&self) -> usize {
        self.columns.visible_column_model_list(self.side, true).len()
    }

    pub(crate) fn is_rendered(&self) -> bool {
        find_first(&self.el, &self.body_selector).is_some()
    }

    /// Column group markup from the current widths and visible columns.
    pub(crate) fn col_group_markup(&self) -> Result<String, BodyTableError> {
        let widths = self.dimension.column_width_list(self.side);
        let columns = self.columns.visible_column_model_list(self.side, true);
        col_group_markup(self.side, &widths, &columns, self.config.extra_width())
    }

    /// Rewrite the container with a fresh column group around `tbody`.
    /// Returns the new body id.
    pub(crate) fn rebuild(&mut self, tbody: &str) -> Result<String, BodyTableError> {
        let col_group = self.col_group_markup()?;
        self.install(&col_group, tbody)
    }

    /// Rewrite the container around an already built column group.
    pub(crate) fn install(&mut self, col_group: &str, tbody: &str) -> Result<String, BodyTableError> {
        let markup = table_template(col_group, tbody);
        self.el.set_inner_markup(&markup)?;
        trace!("[shell] {} pane rebuilt ({} bytes)", self.side, markup.len());
        self.body_id()
    }

    pub(crate) fn body_id(&self) -> Result<String, BodyTableError> {
        find_first(&self.el, &self.body_selector)
            .map(|body| body.id.clone())
            .ok_or(BodyTableError::ShellNotRendered)
    }

    pub(crate) fn body_mut(&mut self) -> Result<&mut Element, BodyTableError> {
        let id = self.body_id()?;
        find_element_mut(&mut self.el, &id).ok_or(BodyTableError::ElementNotFound(id))
    }

    /// Ids of the `<col>` elements, in column order.
    pub(crate) fn col_ids(&self) -> Vec<String> {
        find_all(&self.el, &self.col_selector)
            .into_iter()
            .map(|col| col.id.clone())
            .collect()
    }

    pub(crate) fn redraw_table(&mut self, tbody: &str) -> Result<String, BodyTableError> {
        debug!("[shell] {} pane: full table redraw", self.side);
        self.rebuild(tbody)
    }

    pub(crate) fn replace_rows(&mut self, markup: &str) -> Result<String, BodyTableError> {
        match self.config.redraw {
            RedrawStrategy::StructuralReplace => self.redraw_table(markup),
            RedrawStrategy::TargetedPatch => {
                let body = self.body_mut()?;
                body.set_inner_markup(markup)?;
                Ok(body.id.clone())
            }
        }
    }
}
