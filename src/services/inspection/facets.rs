use serde::Serialize;
use crate::models::{CellValue, Row, DEVICE_COLUMN, MACHINE_TYPE_COLUMN};

/// Selector options for the two filterable columns, taken from every row.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Facets {
    pub device: Vec<CellValue>,
    pub machine_type: Vec<CellValue>,
}

pub fn facets(rows: &[Row]) -> Facets {
    Facets {
        device: distinct_values(rows, DEVICE_COLUMN),
        machine_type: distinct_values(rows, MACHINE_TYPE_COLUMN),
    }
}

/// Distinct values of `column` in first-occurrence order. Rows without the
/// column contribute nothing.
pub fn distinct_values(rows: &[Row], column: &str) -> Vec<CellValue> {
    let mut values: Vec<CellValue> = Vec::new();
    for value in rows.iter().map(|row| row.get(column)) {
        if !value.is_empty() && !values.contains(value) {
            values.push(value.clone());
        }
    }
    values
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(device: &str, machine: &str) -> Row {
        vec![
            (DEVICE_COLUMN, CellValue::Text(device.into())),
            (MACHINE_TYPE_COLUMN, CellValue::Text(machine.into())),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn first_occurrence_order_without_duplicates() {
        let rows = vec![row("Y", "B"), row("X", "A"), row("Y", "A"), row("Z", "B")];
        let facets = facets(&rows);
        assert_eq!(
            facets.device,
            vec![
                CellValue::Text("Y".into()),
                CellValue::Text("X".into()),
                CellValue::Text("Z".into())
            ]
        );
        assert_eq!(
            facets.machine_type,
            vec![CellValue::Text("B".into()), CellValue::Text("A".into())]
        );
    }

    #[test]
    fn numbers_and_text_are_distinct_values() {
        let rows: Vec<Row> = vec![
            vec![(DEVICE_COLUMN, CellValue::Number(5.0))].into_iter().collect(),
            vec![(DEVICE_COLUMN, CellValue::Text("5".into()))].into_iter().collect(),
            vec![(DEVICE_COLUMN, CellValue::Number(5.0))].into_iter().collect(),
            Row::default(),
        ];
        assert_eq!(
            distinct_values(&rows, DEVICE_COLUMN),
            vec![CellValue::Number(5.0), CellValue::Text("5".into())]
        );
    }

    #[test]
    fn no_rows_no_options() {
        assert_eq!(facets(&[]), Facets::default());
    }
}
