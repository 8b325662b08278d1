use crate::core::columns::ColumnMap;
use crate::core::rolls::RollAllocator;
use crate::domain::model::{RawRow, StudentRecord};

fn cell_at<'a>(row: &'a RawRow, idx: Option<usize>) -> &'a str {
    idx.and_then(|i| row.get(i))
        .map(|cell| cell.trim())
        .unwrap_or("")
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Assemble one record from a classified row. Rows without a name are dropped
/// rather than reported, and never consume an auto roll.
pub fn build_record(
    row: &RawRow,
    map: &ColumnMap,
    rolls: &mut RollAllocator,
) -> Option<StudentRecord> {
    let name = cell_at(row, map.name);
    if name.is_empty() {
        return None;
    }

    Some(StudentRecord {
        name: name.to_string(),
        roll_number: rolls.resolve(cell_at(row, map.roll)),
        guardian_name: non_empty(cell_at(row, map.guardian_name)),
        guardian_phone: non_empty(cell_at(row, map.guardian_phone)),
    })
}

/// Re-run a vision-service record through the same normalization rules as a
/// tabular row.
pub fn restage_record(record: StudentRecord, rolls: &mut RollAllocator) -> Option<StudentRecord> {
    let name = record.name.trim();
    if name.is_empty() {
        return None;
    }

    Some(StudentRecord {
        name: name.to_string(),
        roll_number: rolls.resolve(&record.roll_number),
        guardian_name: record
            .guardian_name
            .as_deref()
            .and_then(|value| non_empty(value.trim())),
        guardian_phone: record
            .guardian_phone
            .as_deref()
            .and_then(|value| non_empty(value.trim())),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::columns::classify_header;

    fn row(cells: &[&str]) -> RawRow {
        cells.iter().map(|cell| cell.to_string()).collect()
    }

    #[test]
    fn test_build_record_with_full_row() {
        let map = classify_header(&row(&["Name", "Roll", "Guardian", "Guardian Phone"]));
        let mut rolls = RollAllocator::from_existing(&[]);

        let record =
            build_record(&row(&["Karim", "5", "Abdul", "01711112222"]), &map, &mut rolls).unwrap();
        assert_eq!(record.name, "Karim");
        assert_eq!(record.roll_number, "05");
        assert_eq!(record.guardian_name.as_deref(), Some("Abdul"));
        assert_eq!(record.guardian_phone.as_deref(), Some("01711112222"));
    }

    #[test]
    fn test_blank_name_is_dropped() {
        let map = classify_header(&row(&["Name", "Roll"]));
        let mut rolls = RollAllocator::from_existing(&[]);

        assert!(build_record(&row(&["", "5"]), &map, &mut rolls).is_none());
        assert!(build_record(&row(&["   ", "6"]), &map, &mut rolls).is_none());
        // A dropped row must not have consumed an auto roll.
        assert_eq!(rolls.resolve(""), "01");
    }

    #[test]
    fn test_empty_guardian_cells_are_absent_not_empty() {
        let map = classify_header(&row(&["Name", "Roll", "Guardian", "Guardian Phone"]));
        let mut rolls = RollAllocator::from_existing(&[]);

        let record = build_record(&row(&["Rahim", "", " ", ""]), &map, &mut rolls).unwrap();
        assert_eq!(record.guardian_name, None);
        assert_eq!(record.guardian_phone, None);
    }

    #[test]
    fn test_short_row_is_padded_with_absent_cells() {
        let map = classify_header(&row(&["Name", "Roll", "Guardian Phone"]));
        let mut rolls = RollAllocator::from_existing(&[]);

        let record = build_record(&row(&["Rahim"]), &map, &mut rolls).unwrap();
        assert_eq!(record.roll_number, "01");
        assert_eq!(record.guardian_phone, None);
    }

    #[test]
    fn test_restage_trims_and_assigns_missing_rolls() {
        let mut rolls = RollAllocator::from_existing(&[]);
        let record = restage_record(
            StudentRecord {
                name: "  Karim  ".to_string(),
                roll_number: String::new(),
                guardian_name: Some("  ".to_string()),
                guardian_phone: Some(" 01711112222 ".to_string()),
            },
            &mut rolls,
        )
        .unwrap();

        assert_eq!(record.name, "Karim");
        assert_eq!(record.roll_number, "01");
        assert_eq!(record.guardian_name, None);
        assert_eq!(record.guardian_phone.as_deref(), Some("01711112222"));
    }
}
