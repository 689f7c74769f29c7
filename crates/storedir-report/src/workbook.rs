use std::path::Path;

use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, Worksheet};
use storedir_core::ScrapeResult;

use crate::error::ReportError;
use crate::layout::{plan_rows, ReportLayout, COLUMN_WIDTHS, HEADERS};

const SHEET_NAME: &str = "Store Directory";
const HEADER_FILL: u32 = 0x00D3_D3D3;

/// Number of report columns.
const COLUMNS: u16 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CellStyle {
    Header,
    Body,
    Country,
}

/// One write against the worksheet. Every style carries a thin border and
/// text wrapping.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum CellWrite<'a> {
    Text {
        row: u32,
        col: u16,
        value: &'a str,
        style: CellStyle,
    },
    Merge {
        first_row: u32,
        last_row: u32,
        value: &'a str,
    },
    Blank {
        row: u32,
        col: u16,
    },
}

/// Every cell write of the report, in order: header, then each group's
/// country cell and store rows, then the blank separators.
pub(crate) fn plan_cells<'a>(layout: &ReportLayout<'a>) -> Vec<CellWrite<'a>> {
    let mut cells: Vec<CellWrite<'a>> = (0u16..)
        .zip(HEADERS)
        .map(|(col, title)| CellWrite::Text {
            row: 0,
            col,
            value: title,
            style: CellStyle::Header,
        })
        .collect();

    for group in &layout.groups {
        if group.is_merged() {
            cells.push(CellWrite::Merge {
                first_row: group.first_row,
                last_row: group.last_row,
                value: group.country,
            });
        } else {
            cells.push(CellWrite::Text {
                row: group.first_row,
                col: 0,
                value: group.country,
                style: CellStyle::Country,
            });
        }

        for (row, store) in (group.first_row..).zip(group.stores) {
            let values = [
                store.store_name.as_str(),
                store.address.as_str(),
                store.working_hours.as_str(),
                store.phone.as_str(),
            ];
            cells.extend((1u16..).zip(values).map(|(col, value)| CellWrite::Text {
                row,
                col,
                value,
                style: CellStyle::Body,
            }));
        }
    }

    // separators inside the table keep the grid unbroken
    for row in layout.separator_rows() {
        cells.extend((0..COLUMNS).map(|col| CellWrite::Blank { row, col }));
    }

    cells
}

struct Formats {
    header: Format,
    body: Format,
    country: Format,
}

impl Formats {
    fn new() -> Self {
        let body = Format::new()
            .set_text_wrap()
            .set_border(FormatBorder::Thin);
        Self {
            header: body
                .clone()
                .set_bold()
                .set_background_color(Color::RGB(HEADER_FILL))
                .set_align(FormatAlign::Center),
            country: body.clone().set_align(FormatAlign::VerticalCenter),
            body,
        }
    }

    fn get(&self, style: CellStyle) -> &Format {
        match style {
            CellStyle::Header => &self.header,
            CellStyle::Body => &self.body,
            CellStyle::Country => &self.country,
        }
    }
}

fn apply(
    sheet: &mut Worksheet,
    cell: &CellWrite<'_>,
    formats: &Formats,
) -> Result<(), ReportError> {
    match *cell {
        CellWrite::Text {
            row,
            col,
            value,
            style,
        } => {
            sheet.write_string_with_format(row, col, value, formats.get(style))?;
        }
        CellWrite::Merge {
            first_row,
            last_row,
            value,
        } => {
            sheet.merge_range(first_row, 0, last_row, 0, value, &formats.country)?;
        }
        CellWrite::Blank { row, col } => {
            sheet.write_blank(row, col, &formats.body)?;
        }
    }
    Ok(())
}

/// Writes `result` as a single-sheet workbook at `path`.
///
/// # Errors
///
/// Returns [`ReportError::Xlsx`] if any cell cannot be written or the file
/// cannot be saved.
pub fn write_workbook(result: &ScrapeResult, path: &Path) -> Result<(), ReportError> {
    let layout = plan_rows(result);
    let formats = Formats::new();
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, width) in (0u16..).zip(COLUMN_WIDTHS) {
        sheet.set_column_width(col, width)?;
    }
    for cell in &plan_cells(&layout) {
        apply(sheet, cell, &formats)?;
    }

    workbook.save(path)?;
    Ok(())
}
