// Adapters layer: concrete implementations for external systems (storage, response sheets, workbook output).

pub mod csv_source;
pub mod storage;
pub mod workbook_source;
pub mod xlsx_store;

use crate::core::{ResponseSource, ResponseTable, Storage};
use crate::utils::error::Result;
use csv_source::CsvResponseSource;
use std::path::Path;
use workbook_source::WorkbookResponseSource;

/// 依副檔名選擇的回應來源
pub enum ResponseFile<S: Storage> {
    Csv(CsvResponseSource<S>),
    Workbook(WorkbookResponseSource<S>),
}

impl<S: Storage> ResponseFile<S> {
    pub fn open(storage: S, path: &str, sheet: &str) -> Self {
        let is_csv = Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

        if is_csv {
            ResponseFile::Csv(CsvResponseSource::new(storage, path, sheet))
        } else {
            ResponseFile::Workbook(WorkbookResponseSource::new(storage, path, sheet))
        }
    }

    /// 只有 CSV 來源可以附加新回應
    pub fn as_log(&self) -> Option<&CsvResponseSource<S>> {
        match self {
            ResponseFile::Csv(source) => Some(source),
            ResponseFile::Workbook(_) => None,
        }
    }
}

impl<S: Storage> ResponseSource for ResponseFile<S> {
    async fn read_responses(&self) -> Result<ResponseTable> {
        match self {
            ResponseFile::Csv(source) => source.read_responses().await,
            ResponseFile::Workbook(source) => source.read_responses().await,
        }
    }
}
