//! Column group markup.

use griddom::escape_attr;

use crate::error::BodyTableError;
use crate::model::ColumnInfo;
use crate::pane::Side;

/// Build the `<col>` elements that fix the column widths of one pane.
///
/// `widths` and `columns` are index-aligned; a length mismatch is refused.
/// Each width is reduced by `extra_width`, the legacy-engine compensation.
pub fn col_group_markup(
    side: Side,
    widths: &[u32],
    columns: &[ColumnInfo],
    extra_width: u32,
) -> Result<String, BodyTableError> {
    if widths.len() != columns.len() {
        return Err(BodyTableError::ColumnCountMismatch {
            side,
            widths: widths.len(),
            columns: columns.len(),
        });
    }

    Ok(columns
        .iter()
        .zip(widths)
        .map(|(column, width)| {
            format!(
                r#"<col columnname="{}" style="width:{}px">"#,
                escape_attr(&column.name),
                width.saturating_sub(extra_width)
            )
        })
        .collect())
}
