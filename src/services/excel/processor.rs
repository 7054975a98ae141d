use super::utils::*;
use std::io::Cursor;
use bytes::Bytes;
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use crate::error::AppError;
use crate::models::Row;

/// Rows decoded from the first sheet of a workbook.
#[derive(Debug, Clone, Default)]
pub struct SheetRows {
    pub sheet_name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

pub struct ExcelProcessor;

impl ExcelProcessor {
    /// Runs the decode on tokio's blocking pool.
    pub async fn decode_upload(file_data: Bytes) -> Result<SheetRows, AppError> {
        tokio::task::spawn_blocking(move || Self::decode_first_sheet(file_data))
            .await
            .map_err(|e| AppError::Internal(format!("Decode task failed: {}", e)))?
    }

    pub fn decode_first_sheet(file_data: Bytes) -> Result<SheetRows, AppError> {
        let start = std::time::Instant::now();
        let size = file_data.len();
        let cursor = Cursor::new(file_data);

        let mut workbook = open_workbook_auto_from_rs(cursor).map_err(|e| {
            tracing::error!("Failed to open spreadsheet: {}", e);
            AppError::Spreadsheet(e)
        })?;

        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| AppError::FileProcessing("No sheets found in workbook".to_string()))?;

        let range = workbook.worksheet_range(&sheet_name).map_err(|e| {
            tracing::error!("Failed to read worksheet {}: {}", sheet_name, e);
            AppError::Spreadsheet(e)
        })?;

        // The used range starts at the first non-empty cell, so leading blank
        // rows are skipped when picking the header.
        let mut sheet_rows = range.rows();
        let columns = match sheet_rows.next() {
            Some(header) => header_names(header),
            None => {
                tracing::warn!("Sheet {} is empty", sheet_name);
                return Ok(SheetRows {
                    sheet_name,
                    ..SheetRows::default()
                });
            }
        };

        let rows: Vec<Row> = sheet_rows
            .filter(|cells| cells.iter().any(|cell| !matches!(cell, Data::Empty)))
            .map(|cells| {
                columns
                    .iter()
                    .zip(cells.iter())
                    .map(|(name, cell)| (name.as_str(), cell_value(cell)))
                    .collect()
            })
            .collect();

        tracing::info!(
            "Decoded sheet {} ({}KB): {} columns, {} rows in {:?}",
            sheet_name,
            size / 1024,
            columns.len(),
            rows.len(),
            start.elapsed()
        );

        Ok(SheetRows {
            sheet_name,
            columns,
            rows,
        })
    }
}
