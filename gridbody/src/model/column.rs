use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};

use crate::pane::Side;

use super::ColumnSchema;

/// A column definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnInfo {
    /// Stable column name, written to the `columnname` attribute.
    #[serde(rename = "columnName")]
    pub name: String,
    /// Cell edit type; selects the cell painter.
    #[serde(rename = "editType", default, skip_serializing_if = "Option::is_none")]
    pub edit_type: Option<String>,
    #[serde(rename = "isHidden", default)]
    pub hidden: bool,
    /// Row number / selection column generated by the grid itself.
    #[serde(default)]
    pub meta: bool,
}

impl ColumnInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            edit_type: None,
            hidden: false,
            meta: false,
        }
    }

    /// A grid-generated meta column.
    pub fn meta(name: impl Into<String>) -> Self {
        Self {
            meta: true,
            ..Self::new(name)
        }
    }

    pub fn edit_type(mut self, edit_type: impl Into<String>) -> Self {
        self.edit_type = Some(edit_type.into());
        self
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }
}

#[derive(Debug, Default)]
struct Columns {
    list: Vec<ColumnInfo>,
    fix_count: usize,
}

/// Column definitions plus the number of frozen data columns.
///
/// Meta columns are always shown first on the left pane, followed by the
/// first `column_fix_count` visible data columns. The right pane shows the
/// remaining visible data columns.
#[derive(Debug, Clone, Default)]
pub struct ColumnModel {
    inner: Arc<RwLock<Columns>>,
}

impl ColumnModel {
    pub fn new(columns: Vec<ColumnInfo>, column_fix_count: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Columns {
                list: columns,
                fix_count: column_fix_count,
            })),
        }
    }

    pub fn set_columns(&self, columns: Vec<ColumnInfo>) {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .list = columns;
    }

    pub fn set_column_fix_count(&self, count: usize) {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .fix_count = count;
    }

    pub fn column_fix_count(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .fix_count
    }

    /// Find a column by name, hidden ones included.
    pub fn column(&self, name: &str) -> Option<ColumnInfo> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .list
            .iter()
            .find(|c| c.name == name)
            .cloned()
    }
}

impl ColumnSchema for ColumnModel {
    fn visible_column_model_list(&self, side: Side, include_meta: bool) -> Vec<ColumnInfo> {
        let columns = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        let visible = columns.list.iter().filter(|c| !c.hidden);
        let data: Vec<&ColumnInfo> = visible.clone().filter(|c| !c.meta).collect();
        let split = columns.fix_count.min(data.len());

        match side {
            Side::Left => {
                let meta = visible.filter(|c| include_meta && c.meta);
                meta.chain(data[..split].iter().copied()).cloned().collect()
            }
            Side::Right => data[split..].iter().map(|c| (*c).clone()).collect(),
        }
    }
}
