use crate::domain::model::RawRow;

/// Column indices resolved from the first row of a tabular input.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColumnMap {
    pub name: Option<usize>,
    pub roll: Option<usize>,
    pub guardian_name: Option<usize>,
    pub guardian_phone: Option<usize>,
    /// True when keyword matching recognized the first row as a header; false
    /// when the positional fallback applies and the first row is data.
    pub header_row: bool,
}

const NAME_KEYS: [&str; 2] = ["name", "নাম"];
const ROLL_KEYS: [&str; 2] = ["roll", "রোল"];
const GUARDIAN_KEYS: [&str; 2] = ["guardian", "অভিভাবক"];
const PHONE_SUFFIX_KEYS: [&str; 4] = ["phone", "number", "নম্বর", "নাম্বার"];
const PHONE_KEYS: [&str; 4] = ["phone", "mobile", "মোবাইল", "নম্বর"];

fn matches_any(header: &str, keys: &[&str]) -> bool {
    keys.iter().any(|key| header.contains(key))
}

/// Resolve which column holds each field by bilingual substring matching on
/// the header cells.
///
/// Name and guardian-name keep the first matching column; roll and
/// guardian-phone keep the last. A phone-looking column without a guardian
/// keyword still lands in guardian_phone. When no name column is recognized
/// the header is assumed absent and the positional guess applies: column 0
/// name, column 1 roll, column 2 guardian phone.
pub fn classify_header(header: &RawRow) -> ColumnMap {
    let mut map = ColumnMap::default();

    for (idx, cell) in header.iter().enumerate() {
        let cell = cell.to_lowercase();
        if matches_any(&cell, &NAME_KEYS) {
            if map.name.is_none() {
                map.name = Some(idx);
            }
        } else if matches_any(&cell, &ROLL_KEYS) {
            map.roll = Some(idx);
        } else if matches_any(&cell, &GUARDIAN_KEYS) {
            if matches_any(&cell, &PHONE_SUFFIX_KEYS) {
                map.guardian_phone = Some(idx);
            } else if map.guardian_name.is_none() {
                map.guardian_name = Some(idx);
            }
        } else if matches_any(&cell, &PHONE_KEYS) {
            map.guardian_phone = Some(idx);
        }
    }

    if map.name.is_none() {
        return ColumnMap {
            name: Some(0),
            roll: Some(1),
            guardian_name: None,
            guardian_phone: Some(2),
            header_row: false,
        };
    }

    map.header_row = true;
    map
}
