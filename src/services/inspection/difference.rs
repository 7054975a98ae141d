use crate::models::Row;

/// `AICone - Qpro` for one row. Missing or non-numeric values count as zero.
pub fn frequency_difference(row: &Row) -> f64 {
    row.aicone().as_number() - row.qpro().as_number()
}
