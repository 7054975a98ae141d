use serde::Serialize;
use crate::models::{CellValue, Row};

/// Equality constraints on `Device` and `Machine Type`. `None` matches every row.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterState {
    pub device: Option<String>,
    pub machine_type: Option<String>,
}

impl FilterState {
    pub fn set_device(&mut self, value: &str) {
        self.device = constraint(value);
    }

    pub fn set_machine_type(&mut self, value: &str) {
        self.machine_type = constraint(value);
    }

    pub fn matches(&self, row: &Row) -> bool {
        cell_matches(row.device(), self.device.as_deref())
            && cell_matches(row.machine_type(), self.machine_type.as_deref())
    }
}

// An empty selection clears the constraint rather than matching empty cells.
fn constraint(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Exact string comparison against the decoded cell. Only text cells can
/// match; numbers are never coerced to text.
fn cell_matches(cell: &CellValue, wanted: Option<&str>) -> bool {
    match (wanted, cell) {
        (None, _) => true,
        (Some(wanted), CellValue::Text(text)) => text == wanted,
        (Some(_), CellValue::Number(_) | CellValue::Empty) => false,
    }
}

/// Rows satisfying `filters`, in store order.
pub fn filter_rows<'a>(rows: &'a [Row], filters: &FilterState) -> Vec<&'a Row> {
    rows.iter().filter(|row| filters.matches(row)).collect()
}
