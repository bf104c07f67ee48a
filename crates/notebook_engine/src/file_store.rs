//! Page store backed by a directory tree: `{root}/{appid}/{page}.json` holds a page and
//! `{root}/{appid}/page` the last selected page index.
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use notebook_core::{AppId, PageIndex};

use crate::persist::{modified_ms, remove_if_exists, write_atomic, PersistError};
use crate::{Page, PageStore, SaveReceipt, StoreError};

const PAGE_EXTENSION: &str = ".json";
const SELECTION_FILENAME: &str = "page";

#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn app_dir(&self, appid: AppId) -> PathBuf {
        self.root.join(appid.to_string())
    }

    fn page_path(&self, appid: AppId, page: PageIndex) -> PathBuf {
        self.app_dir(appid).join(format!("{page}{PAGE_EXTENSION}"))
    }

    fn selection_path(&self, appid: AppId) -> PathBuf {
        self.app_dir(appid).join(SELECTION_FILENAME)
    }

    fn read_page(&self, appid: AppId, page: PageIndex) -> Result<Page, PersistError> {
        let path = self.page_path(appid, page);
        let meta = match fs::metadata(&path) {
            Ok(meta) => meta,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Page::blank(page)),
            Err(err) => return Err(err.into()),
        };
        let data = fs::read_to_string(&path)?.trim().to_string();
        Ok(Page {
            page,
            timestamp: modified_ms(&meta)?,
            empty: data.is_empty(),
            data: Some(data),
        })
    }

    fn read_index(&self, appid: AppId) -> Result<Vec<Page>, PersistError> {
        let entries = match fs::read_dir(self.app_dir(appid)) {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        let mut pages = Vec::new();
        for entry in entries {
            let entry = entry?;
            let meta = entry.metadata()?;
            if !meta.is_file() {
                continue;
            }
            let Some(page) = entry.file_name().to_str().and_then(parse_page_filename) else {
                continue;
            };
            pages.push(Page {
                page,
                timestamp: modified_ms(&meta)?,
                empty: meta.len() == 0,
                data: None,
            });
        }
        pages.sort_by_key(|page| page.page);
        Ok(pages)
    }

    fn read_selection(&self, appid: AppId) -> Result<PageIndex, PersistError> {
        match fs::read_to_string(self.selection_path(appid)) {
            Ok(text) => Ok(text.trim().parse().unwrap_or(0)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(0),
            Err(err) => Err(err.into()),
        }
    }
}

fn parse_page_filename(name: &str) -> Option<PageIndex> {
    let stem = name.strip_suffix(PAGE_EXTENSION)?;
    if stem.is_empty() || !stem.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    stem.parse().ok()
}

async fn blocking<T, F>(work: F) -> Result<T, StoreError>
where
    F: FnOnce() -> Result<T, PersistError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|err| StoreError::new(err.to_string()))?
        .map_err(|err| StoreError::new(err.to_string()))
}

#[async_trait::async_trait]
impl PageStore for FileStore {
    async fn load_page(&self, appid: AppId, page: PageIndex) -> Result<Page, StoreError> {
        let store = self.clone();
        blocking(move || store.read_page(appid, page)).await
    }

    async fn save_page(
        &self,
        appid: AppId,
        page: PageIndex,
        data: &str,
    ) -> Result<SaveReceipt, StoreError> {
        let path = self.page_path(appid, page);
        let data = data.to_string();
        let timestamp = blocking(move || write_atomic(&path, &data)).await?;
        Ok(SaveReceipt { timestamp })
    }

    async fn delete_page(&self, appid: AppId, page: PageIndex) -> Result<bool, StoreError> {
        let path = self.page_path(appid, page);
        blocking(move || remove_if_exists(&path)).await?;
        Ok(true)
    }

    async fn list_pages(&self, appid: AppId) -> Result<Vec<Page>, StoreError> {
        let store = self.clone();
        blocking(move || store.read_index(appid)).await
    }

    async fn load_last_selected_page(&self, appid: AppId) -> Result<PageIndex, StoreError> {
        let store = self.clone();
        blocking(move || store.read_selection(appid)).await
    }

    async fn save_last_selected_page(
        &self,
        appid: AppId,
        page: PageIndex,
    ) -> Result<bool, StoreError> {
        let path = self.selection_path(appid);
        blocking(move || write_atomic(&path, &page.to_string())).await?;
        Ok(true)
    }
}
