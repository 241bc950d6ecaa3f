use crate::domain::model::{Page, Source, StatsTable};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// 取得單一 (來源, 語言, 頁) 的職缺
///
/// 非成功狀態或傳輸錯誤必須以 `EtlError::SourceUnavailable` 回報，
/// 不能當作空頁。
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_page(&self, source: Source, language: &str, page: u32) -> Result<Page>;
}

#[async_trait]
pub trait ReportSink: Send + Sync {
    async fn emit(&self, table: &StatsTable) -> Result<()>;
}
