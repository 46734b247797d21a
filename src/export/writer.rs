//! xlsx writing: one rendered sheet onto one worksheet.

use rust_xlsxwriter::{Color, Format, FormatAlign, Worksheet, XlsxError};

use super::sheet::RenderedSheet;

/// Fixed tint of identity cells (column A).
const IDENTITY_FILL: u32 = 0xFFFF00;
/// Fixed tint of record cells in completed rows.
const COMPLETED_FILL: u32 = 0xADD8E6;

/// Presentation parameters. Legibility only, no semantics.
#[derive(Debug, Clone, Copy)]
pub struct SheetLayout {
    /// Row height in points
    pub row_height: f64,
    /// Identity column width in characters
    pub name_column_width: f64,
}

pub(crate) fn write_sheet(
    worksheet: &mut Worksheet,
    sheet: &RenderedSheet,
    layout: &SheetLayout,
) -> Result<(), XlsxError> {
    let centered = Format::new()
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter);
    let identity_format = centered.clone().set_background_color(Color::RGB(IDENTITY_FILL));
    let completed_format = centered.clone().set_background_color(Color::RGB(COMPLETED_FILL));

    if sheet.rows.is_empty() {
        worksheet.set_row_height(0, layout.row_height)?;
    }

    for (r, row) in sheet.rows.iter().enumerate() {
        let r = r as u32;
        worksheet.write_string_with_format(r, 0, row.identity.as_str(), &identity_format)?;
        worksheet.set_row_height(r, layout.row_height)?;

        let format = if row.completed { &completed_format } else { &centered };
        for (c, cell) in row.cells.iter().enumerate() {
            worksheet.write_string_with_format(r, (c + 1) as u16, cell.as_str(), format)?;
        }
    }

    worksheet.set_column_width(0, layout.name_column_width)?;
    Ok(())
}
