use crate::domain::model::{CellValue, RawRow};
use crate::utils::error::{IngestError, Result};

/// Parse comma- or tab-delimited text into rows of cell strings.
///
/// The delimiter is sniffed once per input: tab wins when present, since
/// pastes from a spreadsheet are tab-separated and may carry commas inside
/// names. Blank lines are skipped. Input that is not valid UTF-8 is a decode
/// failure, so the extension fallback can reject binary garbage.
pub fn parse_delimited(bytes: &[u8]) -> Result<Vec<RawRow>> {
    let text = std::str::from_utf8(bytes).map_err(|_| IngestError::NotText)?;
    let delimiter = if text.contains('\t') { b'\t' } else { b',' };

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row: RawRow = record.iter().map(|cell| cell.to_string()).collect();
        if is_blank(&row) {
            continue;
        }
        rows.push(row);
    }
    Ok(rows)
}

/// Flatten a decoded workbook grid into rows of cell strings, dropping rows
/// with no content.
pub fn rows_from_grid(grid: Vec<Vec<CellValue>>) -> Vec<RawRow> {
    grid.into_iter()
        .map(|cells| cells.into_iter().map(CellValue::into_text).collect::<RawRow>())
        .filter(|row| !is_blank(row))
        .collect()
}

fn is_blank(row: &RawRow) -> bool {
    row.iter().all(|cell| cell.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_comma_delimited() {
        let rows = parse_delimited(b"Karim,01,01711112222\nRahim,,01733334444").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec!["Karim", "01", "01711112222"]);
        assert_eq!(rows[1], vec!["Rahim", "", "01733334444"]);
    }

    #[test]
    fn test_parse_tab_delimited() {
        let rows = parse_delimited("নাম\tরোল\nকরিম\t০১".as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec!["নাম", "রোল"]);
    }

    #[test]
    fn test_tab_wins_over_comma() {
        // A spreadsheet paste keeps commas inside cells.
        let rows = parse_delimited(b"Rahman, Karim\t05\n").unwrap();
        assert_eq!(rows, vec![vec!["Rahman, Karim".to_string(), "05".to_string()]]);
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let rows = parse_delimited(b"Karim,01\n\n   \nRahim,02\n").unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_quoted_field_with_comma() {
        let rows = parse_delimited(b"\"Rahman, Karim\",07\n").unwrap();
        assert_eq!(rows, vec![vec!["Rahman, Karim".to_string(), "07".to_string()]]);
    }

    #[test]
    fn test_ragged_rows_are_kept() {
        let rows = parse_delimited(b"Karim,01,01711112222\nRahim\n").unwrap();
        assert_eq!(rows[1], vec!["Rahim"]);
    }

    #[test]
    fn test_non_utf8_input_is_rejected() {
        let result = parse_delimited(&[0x50, 0x4b, 0x03, 0x04, 0xff, 0xfe, 0x00]);
        assert!(matches!(result, Err(IngestError::NotText)));
    }

    #[test]
    fn test_rows_from_grid_normalizes_and_drops_empty_rows() {
        let grid = vec![
            vec![
                CellValue::Text("Name".to_string()),
                CellValue::Text("Roll".to_string()),
            ],
            vec![CellValue::Empty, CellValue::Empty],
            vec![CellValue::Text("Karim".to_string()), CellValue::Number(5.0)],
            vec![],
        ];

        let rows = rows_from_grid(grid);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], vec!["Karim", "5"]);
    }
}
