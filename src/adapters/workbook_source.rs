use crate::adapters::csv_source::is_blank_row;
use crate::core::{ResponseSource, ResponseTable, Storage};
use crate::utils::error::{BoardError, Result};
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use std::io::Cursor;

/// 從試算表檔案（xlsx/xls/ods）中依名稱讀取回應工作表
pub struct WorkbookResponseSource<S: Storage> {
    storage: S,
    path: String,
    sheet: String,
}

impl<S: Storage> WorkbookResponseSource<S> {
    pub fn new(storage: S, path: impl Into<String>, sheet: impl Into<String>) -> Self {
        Self {
            storage,
            path: path.into(),
            sheet: sheet.into(),
        }
    }
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        other => other.to_string(),
    }
}

pub fn parse_workbook(sheet: &str, data: Vec<u8>) -> Result<ResponseTable> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(data))?;

    if !workbook.sheet_names().iter().any(|name| name == sheet) {
        return Err(BoardError::MissingSheet {
            sheet: sheet.to_string(),
        });
    }

    let range = workbook.worksheet_range(sheet)?;
    let mut rows = range
        .rows()
        .map(|row| row.iter().map(cell_text).collect::<Vec<String>>());

    let header = rows.next().unwrap_or_default();
    let rows = rows.filter(|row| !is_blank_row(row)).collect();

    Ok(ResponseTable::new(sheet, header, rows))
}

impl<S: Storage> ResponseSource for WorkbookResponseSource<S> {
    async fn read_responses(&self) -> Result<ResponseTable> {
        if !self.storage.exists(&self.path).await {
            return Err(BoardError::ConfigError {
                message: format!("Response workbook '{}' not found", self.path),
            });
        }
        let data = self.storage.read_file(&self.path).await?;
        tracing::debug!("Opening workbook '{}' ({} bytes)", self.path, data.len());
        parse_workbook(&self.sheet, data)
    }
}
