use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use calamine::{DataType, Range, Reader, Xlsx, open_workbook};
use chrono::{Duration, NaiveDate};
use serde_json::{Number, Value};
use tracing::debug;

use crate::error::{LoadError, Result};
use crate::model::ReferenceTable;

/// Sheet listing the review status of every article reference.
pub const REVIEW_STATUS_SHEET: &str = "review_status";
/// Sheet listing when each reference was completed and by whom.
pub const DATE_COMPLETED_SHEET: &str = "date_completed";

const MILLIS_PER_DAY: i64 = 86_400_000;
// Serial of 9999-12-31, the last day Excel can display.
const MAX_SERIAL_DAYS: f64 = 2_958_465.0;

pub type ReferenceWorkbook = Xlsx<BufReader<File>>;

/// Where a reference table sits inside its sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetLayout {
    pub sheet_name: String,
    /// Zero-based sheet row holding the column headers.
    pub header_row: u32,
    /// Zero-based sheet column holding a row index, never read as data.
    pub index_column: Option<u32>,
    /// Columns that must be present; only these are read.
    pub columns: Vec<String>,
}

impl SheetLayout {
    pub fn new(sheet_name: &str, header_row: u32, index_column: Option<u32>, columns: &[&str]) -> Self {
        Self {
            sheet_name: sheet_name.to_string(),
            header_row,
            index_column,
            columns: columns.iter().map(|column| column.to_string()).collect(),
        }
    }

    pub fn review_status() -> Self {
        Self::new(
            REVIEW_STATUS_SHEET,
            2,
            Some(0),
            &["Row", "Article Id", "Reference Id", "Status"],
        )
    }

    pub fn date_completed() -> Self {
        Self::new(
            DATE_COMPLETED_SHEET,
            0,
            None,
            &["Reference Id", "Date Completed", "Reviewer"],
        )
    }
}

/// Opens the reference workbook at `path`.
pub fn open_reference_workbook(path: &Path) -> Result<ReferenceWorkbook> {
    if !path.exists() {
        return Err(LoadError::MissingInput(path.to_path_buf()));
    }
    Ok(open_workbook(path)?)
}

/// Reads the table described by `layout` out of an opened workbook.
pub fn read_table<R: std::io::Read + std::io::Seek>(
    workbook: &mut Xlsx<R>,
    layout: &SheetLayout,
) -> Result<ReferenceTable> {
    let range = read_required_sheet(workbook, &layout.sheet_name)?;
    let table = table_from_range(&range, layout)?;
    debug!(
        sheet = %layout.sheet_name,
        row_count = table.rows.len(),
        "read reference sheet"
    );
    Ok(table)
}

fn read_required_sheet<R: std::io::Read + std::io::Seek>(
    workbook: &mut Xlsx<R>,
    name: &str,
) -> Result<Range<DataType>> {
    let range_result = workbook
        .worksheet_range(name)
        .ok_or_else(|| LoadError::InvalidWorkbook(format!("missing sheet '{name}'")))?;
    let range = range_result.map_err(LoadError::from)?;
    Ok(range)
}

/// Builds a table from a sheet range. Calamine trims leading empty rows and
/// columns, so sheet coordinates are shifted by the range start.
pub fn table_from_range(range: &Range<DataType>, layout: &SheetLayout) -> Result<ReferenceTable> {
    let sheet = &layout.sheet_name;
    let (start_row, start_col) = range
        .start()
        .ok_or_else(|| LoadError::InvalidWorkbook(format!("sheet '{sheet}' is empty")))?;

    let missing_header = || {
        LoadError::InvalidWorkbook(format!(
            "sheet '{sheet}' has no header on row {}",
            layout.header_row + 1
        ))
    };
    let header_offset = layout
        .header_row
        .checked_sub(start_row)
        .ok_or_else(missing_header)? as usize;

    let mut rows = range.rows().skip(header_offset);
    let header = rows.next().ok_or_else(missing_header)?;

    let positions = layout
        .columns
        .iter()
        .map(|column| {
            header
                .iter()
                .enumerate()
                .filter(|(idx, _)| layout.index_column != Some(start_col + *idx as u32))
                .find(|(_, cell)| cell_to_string(Some(*cell)).trim() == column.as_str())
                .map(|(idx, _)| idx)
                .ok_or_else(|| {
                    LoadError::InvalidWorkbook(format!("sheet '{sheet}' has no column '{column}'"))
                })
        })
        .collect::<Result<Vec<_>>>()?;

    let mut table = ReferenceTable::new(sheet.clone(), layout.columns.clone());
    for row in rows {
        if row.iter().all(DataType::is_empty) {
            continue;
        }
        table
            .rows
            .push(positions.iter().map(|&idx| cell_to_value(row.get(idx))).collect());
    }

    Ok(table)
}

/// Converts a cell into the JSON value stored in records. Strings are
/// trimmed, whole numbers become integers and dates become ISO-8601 text.
pub fn cell_to_value(cell: Option<&DataType>) -> Value {
    match cell {
        Some(DataType::String(value)) => Value::String(value.trim().to_string()),
        Some(DataType::Int(value)) => Value::from(*value),
        Some(DataType::Float(value)) => float_to_value(*value),
        Some(DataType::Bool(value)) => Value::Bool(*value),
        Some(DataType::DateTime(serial)) => excel_serial_to_string(*serial)
            .map(Value::String)
            .unwrap_or(Value::Null),
        Some(DataType::Empty) | Some(DataType::Error(_)) | None => Value::Null,
        Some(other) => Value::String(other.to_string()),
    }
}

fn cell_to_string(cell: Option<&DataType>) -> String {
    match cell {
        Some(DataType::String(value)) => value.clone(),
        Some(DataType::Float(value)) => value.to_string(),
        Some(DataType::Int(value)) => value.to_string(),
        Some(DataType::Bool(value)) => value.to_string(),
        Some(DataType::Empty) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

fn float_to_value(value: f64) -> Value {
    if value.fract() == 0.0 && value.abs() < 9.0e15 {
        return Value::from(value as i64);
    }
    Number::from_f64(value)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

/// Excel stores dates as fractional days since 1899-12-30.
fn excel_serial_to_string(serial: f64) -> Option<String> {
    if !serial.is_finite() || serial.abs() > MAX_SERIAL_DAYS {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let millis = (serial * MILLIS_PER_DAY as f64).round() as i64;
    let moment = epoch.checked_add_signed(Duration::milliseconds(millis))?;
    let text = if millis % MILLIS_PER_DAY == 0 {
        moment.format("%Y-%m-%d").to_string()
    } else {
        moment.format("%Y-%m-%dT%H:%M:%S").to_string()
    };
    Some(text)
}
