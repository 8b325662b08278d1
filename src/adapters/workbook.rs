use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};

use crate::domain::model::CellValue;
use crate::utils::error::{IngestError, Result};

/// Decode a spreadsheet binary (xlsx/xls/ods) into a grid of cell values from
/// its first worksheet.
pub fn decode_grid(bytes: &[u8]) -> Result<Vec<Vec<CellValue>>> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(IngestError::Workbook(calamine::Error::Msg(
            "workbook has no sheets",
        )))??;

    let grid = range
        .rows()
        .map(|row| row.iter().map(cell_value).collect())
        .collect();
    Ok(grid)
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(text) => CellValue::Text(text.clone()),
        Data::Float(n) => CellValue::Number(*n),
        Data::Int(n) => CellValue::Number(*n as f64),
        Data::Bool(flag) => CellValue::Text(flag.to_string()),
        Data::DateTimeIso(text) | Data::DurationIso(text) => CellValue::Text(text.clone()),
        // Dates and cell errors keep their display form; rosters should not
        // contain either in the columns we read.
        other => CellValue::Text(other.to_string()),
    }
}
