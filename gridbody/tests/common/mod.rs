#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use gridbody::painter::HandlerTablePainter;
use gridbody::prelude::*;

pub type Log = Arc<Mutex<Vec<String>>>;

pub fn new_log() -> Log {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn entries(log: &Log) -> Vec<String> {
    log.lock().unwrap().clone()
}

pub fn clear(log: &Log) {
    log.lock().unwrap().clear();
}

pub fn recorder(log: &Log, label: &str) -> Handler {
    let log = Arc::clone(log);
    let label = label.to_string();
    Arc::new(move |_: &mut DomEvent| log.lock().unwrap().push(label.clone()))
}

/// Row list that writes a fixed markup string into the body.
pub struct MarkupRows {
    markup: Arc<Mutex<String>>,
    log: Log,
}

impl RowList for MarkupRows {
    fn render(&mut self, body: &mut BodySection<'_>) -> Result<(), BodyTableError> {
        self.log.lock().unwrap().push("rows:render".to_string());
        let markup = self.markup.lock().unwrap().clone();
        if !markup.is_empty() {
            body.replace_rows(&markup)?;
        }
        Ok(())
    }

    fn destroy(&mut self) {
        self.log.lock().unwrap().push("rows:destroy".to_string());
    }
}

pub struct MarkupRowFactory {
    pub markup: Arc<Mutex<String>>,
    pub log: Log,
}

impl ViewFactory for MarkupRowFactory {
    fn create_row_list(&self, side: Side, body_id: &str) -> Box<dyn RowList> {
        self.log
            .lock()
            .unwrap()
            .push(format!("rows:create:{side}:{}", !body_id.is_empty()));
        Box::new(MarkupRows {
            markup: Arc::clone(&self.markup),
            log: Arc::clone(&self.log),
        })
    }
}

pub const ROWS: &str = concat!(
    r#"<tr key="0"><td columnname="b" edit-type="select">x</td><td columnname="c" edit-type="text">1</td></tr>"#,
    r#"<tr key="1"><td columnname="b" edit-type="select">y</td><td columnname="c" edit-type="text">2</td></tr>"#,
);

/// Models, painters and logs shared by a pair of panes.
pub struct Fixture {
    pub dimension: Arc<DimensionModel>,
    pub render: Arc<RenderModel>,
    pub columns: Arc<ColumnModel>,
    pub painters: Arc<PainterManager>,
    pub rows_markup: Arc<Mutex<String>>,
    /// Row list lifecycle.
    pub rows_log: Log,
    /// Painter handler invocations.
    pub events: Log,
}

impl Fixture {
    /// Columns: meta `_number`, then `a` (frozen), `b`, `c`.
    pub fn new() -> Self {
        let events = new_log();
        let painters = PainterManager::new()
            .with_row_painter(
                HandlerTablePainter::new()
                    .on("click", "", recorder(&events, "row:click"))
                    .on("dblclick", "", recorder(&events, "row:dblclick")),
            )
            .with_cell_painter(
                "text",
                HandlerTablePainter::new().on("click", "", recorder(&events, "text:click")),
            )
            .with_cell_painter(
                "select",
                HandlerTablePainter::new().on("click", "", recorder(&events, "select:click")),
            );

        let columns = ColumnModel::new(
            vec![
                ColumnInfo::meta("_number"),
                ColumnInfo::new("a").edit_type("text"),
                ColumnInfo::new("b").edit_type("select"),
                ColumnInfo::new("c").edit_type("text"),
            ],
            1,
        );

        let dimension = DimensionModel::new();
        dimension.set_column_width_lists(vec![40, 100], vec![100, 80]);
        dimension.set_body_height(300);

        Self {
            dimension: Arc::new(dimension),
            render: Arc::new(RenderModel::new()),
            columns: Arc::new(columns),
            painters: Arc::new(painters),
            rows_markup: Arc::new(Mutex::new(String::new())),
            rows_log: new_log(),
            events,
        }
    }

    pub fn with_rows(self, markup: &str) -> Self {
        *self.rows_markup.lock().unwrap() = markup.to_string();
        self
    }

    pub fn options(&self, side: Side, config: BodyTableConfig) -> BodyTableOptions {
        BodyTableOptions {
            side,
            dimension: self.dimension.clone(),
            render: self.render.clone(),
            columns: self.columns.clone(),
            painters: self.painters.clone(),
            view_factory: Arc::new(MarkupRowFactory {
                markup: Arc::clone(&self.rows_markup),
                log: Arc::clone(&self.rows_log),
            }),
            config,
        }
    }

    pub fn table(&self, side: Side) -> BodyTable {
        BodyTable::new(self.options(side, BodyTableConfig::default())).unwrap()
    }

    pub fn legacy_table(&self, side: Side) -> BodyTable {
        BodyTable::new(self.options(side, BodyTableConfig::legacy())).unwrap()
    }
}

/// Style widths of the `<col>` elements, in order.
pub fn col_widths(table: &BodyTable) -> Vec<Option<u32>> {
    let el = table.element().unwrap();
    let selector = griddom::Selector::parse("col").unwrap();
    griddom::find_all(&el, &selector)
        .iter()
        .map(|col| col.style.width)
        .collect()
}

/// Id of the first element matching `selector` inside the table.
pub fn first_id(table: &BodyTable, selector: &str) -> String {
    let el = table.element().unwrap();
    let selector = griddom::Selector::parse(selector).unwrap();
    griddom::find_first(&el, &selector).unwrap().id.clone()
}
