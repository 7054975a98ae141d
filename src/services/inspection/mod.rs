pub mod difference;
pub mod facets;
pub mod filter;

pub use difference::frequency_difference;
pub use facets::{facets, Facets};
pub use filter::{filter_rows, FilterState};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};
use crate::models::{CellValue, Row};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Empty,
    Loaded,
}

/// The decoded rows of the current session. Only ever replaced as a whole.
#[derive(Debug)]
pub struct RowStore {
    rows: Vec<Row>,
    status: Status,
    revision: u64,
    loaded_at: Option<DateTime<Utc>>,
}

impl Default for RowStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RowStore {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            status: Status::Empty,
            revision: 0,
            loaded_at: None,
        }
    }

    pub fn replace(&mut self, rows: Vec<Row>) -> u64 {
        self.rows = rows;
        self.status = Status::Loaded;
        self.revision += 1;
        self.loaded_at = Some(Utc::now());
        self.revision
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }
}

/// What one card of the inspection list shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InspectionCard {
    pub device: CellValue,
    pub machine_type: CellValue,
    pub aicone: CellValue,
    pub qpro: CellValue,
    pub difference: f64,
}

impl InspectionCard {
    pub fn from_row(row: &Row) -> Self {
        Self {
            device: row.device().clone(),
            machine_type: row.machine_type().clone(),
            aicone: row.aicone().clone(),
            qpro: row.qpro().clone(),
            difference: frequency_difference(row),
        }
    }
}

/// Owns the row store and filter selection for a session. All mutation goes
/// through `load_rows` and the two filter setters; views are recomputed on
/// every read.
#[derive(Debug, Default)]
pub struct InspectionController {
    store: RowStore,
    filters: FilterState,
}

impl InspectionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces every stored row. Filter selections are kept.
    pub fn load_rows(&mut self, rows: Vec<Row>) -> u64 {
        let count = rows.len();
        let revision = self.store.replace(rows);
        info!("Loaded {} rows (revision {})", count, revision);
        revision
    }

    pub fn set_device_filter(&mut self, value: &str) {
        self.filters.set_device(value);
        debug!("Device filter set to {:?}", self.filters.device);
    }

    pub fn set_machine_type_filter(&mut self, value: &str) {
        self.filters.set_machine_type(value);
        debug!("Machine type filter set to {:?}", self.filters.machine_type);
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn filtered_rows(&self) -> Vec<&Row> {
        filter_rows(self.store.rows(), &self.filters)
    }

    pub fn facets(&self) -> Facets {
        facets(self.store.rows())
    }

    pub fn cards(&self) -> Vec<InspectionCard> {
        self.filtered_rows()
            .into_iter()
            .map(InspectionCard::from_row)
            .collect()
    }

    pub fn status(&self) -> Status {
        self.store.status
    }

    pub fn revision(&self) -> u64 {
        self.store.revision
    }

    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.store.loaded_at
    }

    pub fn row_count(&self) -> usize {
        self.store.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AICONE_COLUMN, DEVICE_COLUMN, MACHINE_TYPE_COLUMN, QPRO_COLUMN};

    fn inspection(device: &str, machine: &str, aicone: f64, qpro: f64) -> Row {
        vec![
            (DEVICE_COLUMN, CellValue::Text(device.into())),
            (MACHINE_TYPE_COLUMN, CellValue::Text(machine.into())),
            (AICONE_COLUMN, CellValue::Number(aicone)),
            (QPRO_COLUMN, CellValue::Number(qpro)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn starts_with_no_data() {
        let controller = InspectionController::new();
        assert_eq!(controller.status(), Status::Empty);
        assert!(controller.cards().is_empty());
        assert_eq!(controller.facets(), Facets::default());
        assert!(controller.loaded_at().is_none());
    }

    #[test]
    fn device_and_machine_type_selection() {
        let mut controller = InspectionController::new();
        controller.load_rows(vec![
            inspection("X", "A", 10.0, 8.0),
            inspection("Y", "A", 5.0, 5.0),
        ]);
        assert_eq!(controller.status(), Status::Loaded);

        controller.set_device_filter("X");
        let cards = controller.cards();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].difference, 2.0);

        controller.set_device_filter("");
        controller.set_machine_type_filter("A");
        assert_eq!(controller.cards().len(), 2);
    }

    #[test]
    fn second_load_replaces_first() {
        let mut controller = InspectionController::new();
        assert_eq!(controller.load_rows(vec![inspection("Old", "A", 1.0, 1.0)]), 1);
        assert_eq!(controller.load_rows(vec![inspection("New", "B", 2.0, 1.0)]), 2);

        let devices: Vec<_> = controller.filtered_rows().iter().map(|r| r.device().clone()).collect();
        assert_eq!(devices, vec![CellValue::Text("New".into())]);
        assert_eq!(controller.facets().device, vec![CellValue::Text("New".into())]);
        assert_eq!(controller.row_count(), 1);
    }

    #[test]
    fn facets_ignore_filters_and_filters_survive_reload() {
        let mut controller = InspectionController::new();
        controller.set_device_filter("Y");
        controller.load_rows(vec![
            inspection("X", "A", 0.0, 0.0),
            inspection("Y", "B", 0.0, 0.0),
        ]);

        assert_eq!(controller.filtered_rows().len(), 1);
        assert_eq!(controller.facets().device.len(), 2);
        assert_eq!(controller.filters().device.as_deref(), Some("Y"));
    }

    #[test]
    fn empty_upload_still_counts_as_loaded() {
        let mut controller = InspectionController::new();
        controller.load_rows(Vec::new());
        assert_eq!(controller.status(), Status::Loaded);
        assert_eq!(controller.row_count(), 0);
    }
}
