//! Spreadsheet export (.xlsx / .ods): header row from [`COLUMNS`], one row per record.

use log::debug;
use rust_xlsxwriter::Workbook;
use spreadsheet_ods::{Sheet, WorkBook};
use std::path::Path;

use crate::DirectiveRecord;
use crate::error::{SvxError, SvxResult};
use crate::table::{COLUMNS, KeywordTable};
use crate::utils::config::SHEET_NAME;

/// Container format, chosen from the output file extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SheetFormat {
    Xlsx,
    Ods,
}

impl SheetFormat {
    pub fn from_path(path: &Path) -> SvxResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("xlsx") => Ok(SheetFormat::Xlsx),
            Some("ods") => Ok(SheetFormat::Ods),
            _ => Err(SvxError::Export {
                path: path.to_path_buf(),
                message: "unsupported spreadsheet type (use .xlsx or .ods)".to_string(),
            }),
        }
    }
}

/// Text cells of a record in column order; `None` marks the numeric line column.
fn cells(record: &DirectiveRecord) -> [Option<String>; 7] {
    [
        Some(record.file.display().to_string()),
        Some(record.encoding.label().to_string()),
        None,
        Some(record.keyword.clone()),
        Some(record.argument.clone()),
        Some(record.path.clone()),
        Some(record.full.clone()),
    ]
}

/// Write `table` to `path` in the format given by its extension.
pub fn write_spreadsheet(table: &KeywordTable, path: &Path) -> SvxResult<()> {
    let format = SheetFormat::from_path(path)?;
    debug!(
        "Writing {} records to {} ({:?})",
        table.len(),
        path.display(),
        format
    );
    match format {
        SheetFormat::Xlsx => write_xlsx(table, path),
        SheetFormat::Ods => write_ods(table, path),
    }
}

fn export_error(path: &Path, e: impl std::fmt::Display) -> SvxError {
    SvxError::Export {
        path: path.to_path_buf(),
        message: e.to_string(),
    }
}

fn write_xlsx(table: &KeywordTable, path: &Path) -> SvxResult<()> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet
        .set_name(SHEET_NAME)
        .map_err(|e| export_error(path, e))?;
    for (col, title) in COLUMNS.iter().enumerate() {
        sheet
            .write_string(0, col as u16, *title)
            .map_err(|e| export_error(path, e))?;
    }
    for (i, record) in table.iter().enumerate() {
        let row = (i + 1) as u32;
        for (col, cell) in cells(record).iter().enumerate() {
            let written = match cell {
                Some(text) => sheet.write_string(row, col as u16, text.as_str()),
                None => sheet.write_number(row, col as u16, record.line as f64),
            };
            written.map_err(|e| export_error(path, e))?;
        }
    }
    workbook.save(path).map_err(|e| export_error(path, e))
}

fn write_ods(table: &KeywordTable, path: &Path) -> SvxResult<()> {
    let mut workbook = WorkBook::new_empty();
    let mut sheet = Sheet::new(SHEET_NAME);
    for (col, title) in COLUMNS.iter().enumerate() {
        sheet.set_value(0, col as u32, *title);
    }
    for (i, record) in table.iter().enumerate() {
        let row = (i + 1) as u32;
        for (col, cell) in cells(record).into_iter().enumerate() {
            match cell {
                Some(text) => sheet.set_value(row, col as u32, text),
                None => sheet.set_value(row, col as u32, record.line as f64),
            }
        }
    }
    workbook.push_sheet(sheet);
    spreadsheet_ods::write_ods(&mut workbook, path).map_err(|e| export_error(path, e))
}
