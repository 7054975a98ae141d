use std::collections::HashMap;
use calamine::Data;
use crate::models::CellValue;

pub const EMPTY_HEADER: &str = "__EMPTY";

/// Converts a calamine cell into a row value. Date-times keep their Excel
/// serial number, booleans read as their sheet text.
pub fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::DateTime(d) => CellValue::Number(d.as_f64()),
        Data::Bool(b) => CellValue::Text(if *b { "TRUE" } else { "FALSE" }.to_string()),
        other => CellValue::Text(other.to_string()),
    }
}

/// Names the header cells of a sheet. Blank headers become `__EMPTY` and
/// repeated names get `_1`, `_2`, ... appended.
pub fn header_names(cells: &[Data]) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();

    cells
        .iter()
        .map(|cell| {
            let base = match cell_value(cell).to_text() {
                Some(text) if !text.is_empty() => text,
                _ => EMPTY_HEADER.to_string(),
            };

            let counter = seen.get(&base).copied().unwrap_or(0);
            if counter == 0 {
                seen.insert(base.clone(), 1);
                return base;
            }

            let mut counter = counter;
            let mut name = format!("{}_{}", base, counter);
            while seen.contains_key(&name) {
                counter += 1;
                name = format!("{}_{}", base, counter);
            }
            seen.insert(base, counter + 1);
            seen.insert(name.clone(), 1);
            name
        })
        .collect()
}
