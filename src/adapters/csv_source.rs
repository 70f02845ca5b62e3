use crate::core::columns::ColumnDetector;
use crate::core::{ResponseLog, ResponseSource, ResponseTable, Storage};
use crate::utils::error::{BoardError, Result};
use std::collections::HashMap;

/// Google 表單匯出的時間戳欄位
const TIMESTAMP_HEADER: &str = "timestamp";

/// 以 CSV 檔作為回應工作表
pub struct CsvResponseSource<S: Storage> {
    storage: S,
    path: String,
    sheet: String,
}

impl<S: Storage> CsvResponseSource<S> {
    pub fn new(storage: S, path: impl Into<String>, sheet: impl Into<String>) -> Self {
        Self {
            storage,
            path: path.into(),
            sheet: sheet.into(),
        }
    }

    async fn read_bytes(&self) -> Result<Vec<u8>> {
        if !self.storage.exists(&self.path).await {
            return Err(BoardError::MissingSheet {
                sheet: self.sheet.clone(),
            });
        }
        self.storage.read_file(&self.path).await
    }
}

pub(crate) fn is_blank_row(row: &[String]) -> bool {
    row.iter().all(|cell| cell.trim().is_empty())
}

pub fn parse_csv(sheet: &str, data: &[u8]) -> Result<ResponseTable> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(data);

    let header: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let row: Vec<String> = record?.iter().map(str::to_string).collect();
        if !is_blank_row(&row) {
            rows.push(row);
        }
    }

    Ok(ResponseTable::new(sheet, header, rows))
}

impl<S: Storage> ResponseSource for CsvResponseSource<S> {
    async fn read_responses(&self) -> Result<ResponseTable> {
        let data = self.read_bytes().await?;
        parse_csv(&self.sheet, &data)
    }
}

/// 欄位名稱先比對標題（不分大小寫），再以 `name` / `email` 對應偵測到的欄位
fn resolve_column(header: &[String], key: &str, detector: &ColumnDetector) -> Option<usize> {
    if let Some(idx) = header.iter().position(|h| h.eq_ignore_ascii_case(key)) {
        return Some(idx);
    }

    match key.to_ascii_lowercase().as_str() {
        "name" => detector.detect(header).ok().map(|c| c.name),
        "email" => detector.detect(header).ok().and_then(|c| c.email),
        _ => None,
    }
}

impl<S: Storage> ResponseLog for CsvResponseSource<S> {
    async fn append_response(&self, fields: &HashMap<String, String>) -> Result<usize> {
        let data = self.read_bytes().await?;
        let table = parse_csv(&self.sheet, &data)?;
        let detector = ColumnDetector::new()?;

        let mut row = vec![String::new(); table.header.len()];
        for (key, value) in fields {
            let idx = resolve_column(&table.header, key, &detector).ok_or_else(|| {
                BoardError::ProcessingError {
                    message: format!("Unknown response field '{}'", key),
                }
            })?;
            row[idx] = value.clone();
        }

        if let Some(idx) = table
            .header
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(TIMESTAMP_HEADER))
        {
            if row[idx].is_empty() {
                row[idx] = chrono::Local::now().format("%m/%d/%Y %H:%M:%S").to_string();
            }
        }

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(&row)?;
        let record = writer.into_inner().map_err(|e| BoardError::IoError(e.into_error()))?;

        let mut updated = data;
        if !updated.is_empty() && !updated.ends_with(b"\n") {
            updated.push(b'\n');
        }
        updated.extend_from_slice(&record);
        self.storage.write_file(&self.path, &updated).await?;

        // 標題列為第 1 列
        let sheet_row = table.rows.len() + 2;
        tracing::info!("📝 Appended response at row {} of '{}'", sheet_row, self.sheet);
        Ok(sheet_row)
    }
}
