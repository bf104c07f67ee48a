use notebook_core::{AppId, PageIndex};
use thiserror::Error;

use crate::{Page, SaveReceipt};

/// Opaque failure payload reported by a store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct StoreError(pub String);

impl StoreError {
    pub fn new(payload: impl Into<String>) -> Self {
        Self(payload.into())
    }
}

/// The remote page store. Pages are keyed by application id and page index.
#[async_trait::async_trait]
pub trait PageStore: Send + Sync {
    async fn load_page(&self, appid: AppId, page: PageIndex) -> Result<Page, StoreError>;

    /// Stores `data`; an empty payload clears the page.
    async fn save_page(
        &self,
        appid: AppId,
        page: PageIndex,
        data: &str,
    ) -> Result<SaveReceipt, StoreError>;

    /// Must succeed for pages that do not exist.
    async fn delete_page(&self, appid: AppId, page: PageIndex) -> Result<bool, StoreError>;

    /// Metadata only; `data` may be `None`.
    async fn list_pages(&self, appid: AppId) -> Result<Vec<Page>, StoreError>;

    async fn load_last_selected_page(&self, appid: AppId) -> Result<PageIndex, StoreError>;

    async fn save_last_selected_page(
        &self,
        appid: AppId,
        page: PageIndex,
    ) -> Result<bool, StoreError>;
}
