pub mod body_table;
pub mod colgroup;
pub mod config;
pub mod error;
pub mod model;
pub mod observe;
pub mod painter;
pub mod pane;
pub mod routing;
pub mod row_list;

pub use body_table::{BodyTable, BodyTableOptions, ModelChange, View};
pub use colgroup::col_group_markup;
pub use config::{BodyTableConfig, Compat, RedrawStrategy};
pub use error::BodyTableError;
pub use pane::Side;

pub mod prelude {
    pub use crate::body_table::{BodyTable, BodyTableOptions, ModelChange, View};
    pub use crate::config::{BodyTableConfig, Compat, RedrawStrategy};
    pub use crate::error::BodyTableError;
    pub use crate::model::{
        ColumnInfo, ColumnModel, ColumnSchema, ColumnWidthSource, DimensionModel,
        DimensionSource, RenderModel, RenderSource,
    };
    pub use crate::observe::{Callback, Observable, Signal, Subscription};
    pub use crate::painter::{EventHandlerInfo, HandlerInfo, Painter, PainterManager, PainterRegistry};
    pub use crate::pane::Side;
    pub use crate::row_list::{BodySection, RowList, ViewFactory};

    pub use griddom::{DomEvent, Element, Handler, Overflow};
}
