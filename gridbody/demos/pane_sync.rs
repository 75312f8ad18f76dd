use std::fs::File;
use std::sync::Arc;

use gridbody::painter::HandlerTablePainter;
use gridbody::prelude::*;
use simplelog::{Config, LevelFilter, WriteLogger};

/// Draws a fixed set of rows for the columns of its pane.
struct DemoRows {
    side: Side,
    columns: Arc<ColumnModel>,
}

impl RowList for DemoRows {
    fn render(&mut self, body: &mut BodySection<'_>) -> Result<(), BodyTableError> {
        let columns = self.columns.visible_column_model_list(self.side, true);
        let rows: String = (0..3)
            .map(|key| {
                let cells: String = columns
                    .iter()
                    .map(|c| {
                        format!(
                            r#"<td columnname="{}" edit-type="{}">{}{}</td>"#,
                            c.name,
                            c.edit_type.as_deref().unwrap_or("normal"),
                            c.name,
                            key
                        )
                    })
                    .collect();
                format!(r#"<tr key="{key}">{cells}</tr>"#)
            })
            .collect();
        body.replace_rows(&rows)?;
        Ok(())
    }
}

struct DemoFactory {
    columns: Arc<ColumnModel>,
}

impl ViewFactory for DemoFactory {
    fn create_row_list(&self, side: Side, _body_id: &str) -> Box<dyn RowList> {
        Box::new(DemoRows {
            side,
            columns: Arc::clone(&self.columns),
        })
    }
}

fn printer(label: &'static str) -> Handler {
    Arc::new(move |event: &mut DomEvent| {
        println!(
            "  {label}: {} on <{} columnname={:?}>",
            event.name,
            event.current_tag,
            event.current_attr("columnname")
        );
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Set up file logging
    let log_file = File::create("pane_sync.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)?;

    let columns = Arc::new(ColumnModel::new(
        vec![
            ColumnInfo::meta("_number"),
            ColumnInfo::new("name").edit_type("text"),
            ColumnInfo::new("kind").edit_type("select"),
            ColumnInfo::new("price").edit_type("text"),
        ],
        1,
    ));
    let dimension = Arc::new(DimensionModel::new());
    dimension.set_column_width_lists(vec![40, 120], vec![90, 80]);
    dimension.set_body_height(240);
    let render = Arc::new(RenderModel::new());
    let painters = Arc::new(
        PainterManager::new()
            .with_row_painter(HandlerTablePainter::new().on("click", "", printer("row")))
            .with_cell_painter(
                "text",
                HandlerTablePainter::new().on("click", "", printer("text cell")),
            )
            .with_cell_painter("select", HandlerTablePainter::new())
            .with_cell_painter("normal", HandlerTablePainter::new()),
    );
    let factory = Arc::new(DemoFactory {
        columns: Arc::clone(&columns),
    });

    let config = match std::env::args().nth(1).as_deref() {
        Some("--legacy") => BodyTableConfig::legacy(),
        _ => BodyTableConfig::default(),
    };

    let panes = Side::ALL
        .into_iter()
        .map(|side| {
            BodyTable::new(BodyTableOptions {
                side,
                dimension: dimension.clone(),
                render: render.clone(),
                columns: columns.clone(),
                painters: painters.clone(),
                view_factory: factory.clone(),
                config: config.clone(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    for pane in &panes {
        pane.render()?.reset_table_position()?;
    }
    show("rendered", &panes)?;

    dimension.set_column_width(Side::Right, 0, 140);
    show("kind column widened", &panes)?;

    dimension.set_scroll_x(true);
    render.set_dummy_row_count(4);
    show("padded with dummy rows", &panes)?;

    dimension.set_body_height(300);
    render.set_dummy_row_count(0);
    show("padding removed", &panes)?;

    let right = &panes[1];
    let cell = right.with_body(|body| {
        body.child_elements()
            .first()
            .and_then(|row| row.child_elements().last())
            .map(|cell| cell.id.clone())
    })?;
    if let Some(cell) = cell {
        println!("click {cell}:");
        right.dispatch("click", &cell)?;
    }

    for pane in &panes {
        pane.destroy();
    }
    Ok(())
}

fn show(step: &str, panes: &[BodyTable]) -> Result<(), BodyTableError> {
    println!("== {step}");
    for pane in panes {
        println!("{}: {}", pane.side(), pane.to_markup()?);
    }
    Ok(())
}
