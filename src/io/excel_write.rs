use std::path::Path;

use rust_xlsxwriter::Workbook;
use serde_json::Value;

use crate::error::{LoadError, Result};
use crate::model::LoadedDataset;

/// Name of the single sheet written by [`write_dataset`].
pub const RECORDS_SHEET: &str = "records";

/// Writes the dataset to an xlsx workbook: one header row with every field,
/// then one row per record.
pub fn write_dataset(path: &Path, dataset: &LoadedDataset) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(RECORDS_SHEET)?;

    let columns = dataset.columns();
    for (col_idx, column) in columns.iter().enumerate() {
        worksheet.write_string(0, column_number(col_idx)?, column)?;
    }

    for (row_idx, record) in dataset.records.iter().enumerate() {
        let row = row_number(row_idx + 1)?;
        for (col_idx, column) in columns.iter().enumerate() {
            let col = column_number(col_idx)?;
            match record.get(column) {
                None | Some(Value::Null) => {}
                Some(Value::String(text)) => {
                    worksheet.write_string(row, col, text)?;
                }
                Some(Value::Bool(flag)) => {
                    worksheet.write_boolean(row, col, *flag)?;
                }
                Some(Value::Number(number)) => match number.as_f64() {
                    Some(value) => {
                        worksheet.write_number(row, col, value)?;
                    }
                    None => {
                        worksheet.write_string(row, col, number.to_string())?;
                    }
                },
                Some(other) => {
                    worksheet.write_string(row, col, serde_json::to_string(other)?)?;
                }
            }
        }
    }

    workbook.save(path)?;
    Ok(())
}

fn row_number(idx: usize) -> Result<u32> {
    u32::try_from(idx).map_err(|_| LoadError::SheetLimit(format!("row {idx} is out of range")))
}

fn column_number(idx: usize) -> Result<u16> {
    u16::try_from(idx)
        .map_err(|_| LoadError::SheetLimit(format!("column {idx} is out of range")))
}
