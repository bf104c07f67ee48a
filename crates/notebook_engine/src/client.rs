use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use notebook_core::{AppId, PageIndex};
use notebook_logging::notebook_error;

use crate::{ClientError, Page, PageStore, RemoteOp, SaveReceipt, StoreError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    /// Deadline for every remote call.
    pub timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(6000),
        }
    }
}

/// Typed access to the page store with a timeout guard on every call.
///
/// Failures are logged and returned unchanged; callers decide how to report them.
#[derive(Clone)]
pub struct PageClient {
    store: Arc<dyn PageStore>,
    settings: ClientSettings,
}

impl PageClient {
    pub fn new(store: Arc<dyn PageStore>, settings: ClientSettings) -> Self {
        Self { store, settings }
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    pub async fn load_page(&self, appid: AppId, page: PageIndex) -> Result<Page, ClientError> {
        self.guard(RemoteOp::LoadPage, move |store| async move {
            store.load_page(appid, page).await
        })
        .await
    }

    pub async fn save_page(
        &self,
        appid: AppId,
        page: PageIndex,
        data: String,
    ) -> Result<SaveReceipt, ClientError> {
        self.guard(RemoteOp::SavePage, move |store| async move {
            store.save_page(appid, page, &data).await
        })
        .await
    }

    pub async fn delete_page(&self, appid: AppId, page: PageIndex) -> Result<bool, ClientError> {
        self.guard(RemoteOp::DeletePage, move |store| async move {
            store.delete_page(appid, page).await
        })
        .await
    }

    pub async fn list_pages(&self, appid: AppId) -> Result<Vec<Page>, ClientError> {
        self.guard(RemoteOp::ListPages, move |store| async move {
            store.list_pages(appid).await
        })
        .await
    }

    pub async fn load_last_selected_page(&self, appid: AppId) -> Result<PageIndex, ClientError> {
        self.guard(RemoteOp::LoadLastSelectedPage, move |store| async move {
            store.load_last_selected_page(appid).await
        })
        .await
    }

    pub async fn save_last_selected_page(
        &self,
        appid: AppId,
        page: PageIndex,
    ) -> Result<bool, ClientError> {
        self.guard(RemoteOp::SaveLastSelectedPage, move |store| async move {
            store.save_last_selected_page(appid, page).await
        })
        .await
    }

    /// Races the call against the deadline. A call that loses keeps running detached;
    /// only its result is dropped.
    async fn guard<T, F, Fut>(&self, operation: RemoteOp, call: F) -> Result<T, ClientError>
    where
        F: FnOnce(Arc<dyn PageStore>) -> Fut,
        Fut: Future<Output = Result<T, StoreError>> + Send + 'static,
        T: Send + 'static,
    {
        let task = tokio::spawn(call(Arc::clone(&self.store)));
        let error = match tokio::time::timeout(self.settings.timeout, task).await {
            Ok(Ok(Ok(value))) => return Ok(value),
            Ok(Ok(Err(err))) => ClientError::Remote {
                operation,
                payload: err.0,
            },
            Ok(Err(join_err)) => ClientError::Remote {
                operation,
                payload: join_err.to_string(),
            },
            Err(_elapsed) => ClientError::Timeout {
                operation,
                after: self.settings.timeout,
            },
        };
        notebook_error!("{}", error);
        Err(error)
    }
}
