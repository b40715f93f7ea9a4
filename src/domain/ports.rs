use crate::domain::model::Attempt;
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

/// 條碼資料來源
///
/// `fetch` 只在基礎設施層面失敗（連線、逾時、JSON 格式錯誤）時回傳 `Err`，
/// 查無資料應回傳 `Attempt::Miss`。
#[async_trait]
pub trait Provider: Send + Sync {
    fn name(&self) -> &'static str;

    /// Disabled providers are skipped without a call.
    fn is_enabled(&self) -> bool {
        true
    }

    /// Whether the provider makes outbound calls (the demo table does not).
    fn is_remote(&self) -> bool {
        true
    }

    async fn fetch(&self, code: &str) -> Result<Attempt>;
}
