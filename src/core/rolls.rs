use crate::domain::model::StudentRecord;

/// Assigns roll numbers for one ingestion batch, continuing above the highest
/// numeric roll already present in the destination class. Non-numeric
/// existing rolls are ignored for the starting point.
#[derive(Debug)]
pub struct RollAllocator {
    next: u32,
}

impl RollAllocator {
    pub fn from_existing(existing: &[StudentRecord]) -> Self {
        let max = existing
            .iter()
            .filter_map(|record| record.roll_number.trim().parse::<u32>().ok())
            .max()
            .unwrap_or(0);
        Self { next: max + 1 }
    }

    /// Resolve one row's roll: format a supplied value, or assign the next
    /// free number when the cell was blank. Supplied values never advance the
    /// counter, and are not checked against existing rolls here.
    pub fn resolve(&mut self, supplied: &str) -> String {
        let supplied = supplied.trim();
        if supplied.is_empty() {
            let roll = format_roll(&self.next.to_string());
            self.next += 1;
            roll
        } else {
            format_roll(supplied)
        }
    }
}

/// Two-digit zero padding for numeric rolls; non-numeric values pass through
/// untouched.
pub fn format_roll(value: &str) -> String {
    let value = value.trim();
    match value.parse::<u32>() {
        Ok(n) => format!("{:02}", n),
        Err(_) => value.to_string(),
    }
}
