use crate::domain::model::{RenderPlan, ResponseTable};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn exists(&self, path: &str) -> impl std::future::Future<Output = bool> + Send;
    /// 給使用者看的完整位置
    fn locate(&self, path: &str) -> String;
}

pub trait ConfigProvider: Send + Sync {
    fn response_sheet(&self) -> &str;
    fn board_sheet(&self) -> &str;
    fn chart_data_sheet(&self) -> &str;
    fn output_path(&self) -> &str;
}

/// 回應工作表的讀取端
pub trait ResponseSource: Send + Sync {
    fn read_responses(&self) -> impl std::future::Future<Output = Result<ResponseTable>> + Send;
}

/// 表單送出時附加一列回應；只有可寫入的來源會實作
pub trait ResponseLog: Send + Sync {
    fn append_response(
        &self,
        fields: &HashMap<String, String>,
    ) -> impl std::future::Future<Output = Result<usize>> + Send;
}

pub trait BoardStore: Send + Sync {
    /// 完整取代既有的看板，回傳輸出位置
    fn write_board(&self, plan: &RenderPlan) -> impl std::future::Future<Output = Result<String>> + Send;
    fn read_board(&self) -> impl std::future::Future<Output = Result<RenderPlan>> + Send;
    /// 複製目前看板為封存版本，不影響現行看板
    fn snapshot_board(&self, label: &str) -> impl std::future::Future<Output = Result<String>> + Send;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<ResponseTable>;
    async fn transform(&self, table: ResponseTable) -> Result<RenderPlan>;
    async fn load(&self, plan: RenderPlan) -> Result<String>;
}
