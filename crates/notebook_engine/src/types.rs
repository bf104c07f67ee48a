use std::fmt;
use std::time::Duration;

use notebook_core::{PageIndex, PageMeta, RequestId, Stroke, Timestamp};
use thiserror::Error;

/// A page as returned by the store. `data` is only populated by `load_page`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub page: PageIndex,
    pub timestamp: Timestamp,
    pub empty: bool,
    pub data: Option<String>,
}

impl Page {
    pub fn blank(page: PageIndex) -> Self {
        Self {
            page,
            timestamp: 0,
            empty: true,
            data: Some(String::new()),
        }
    }

    pub fn meta(&self) -> PageMeta {
        PageMeta {
            page: self.page,
            timestamp: self.timestamp,
            empty: self.empty,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveReceipt {
    /// Store-assigned modification time; callers adopt it instead of a local clock.
    pub timestamp: Timestamp,
}

/// Remote operations, named as the store names them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteOp {
    LoadPage,
    SavePage,
    DeletePage,
    ListPages,
    LoadLastSelectedPage,
    SaveLastSelectedPage,
}

impl fmt::Display for RemoteOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RemoteOp::LoadPage => "loadPage",
            RemoteOp::SavePage => "savePage",
            RemoteOp::DeletePage => "deletePage",
            RemoteOp::ListPages => "listPages",
            RemoteOp::LoadLastSelectedPage => "loadLastSelectedPage",
            RemoteOp::SaveLastSelectedPage => "saveLastSelectedPage",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("{operation} timed out after {}ms", after.as_millis())]
    Timeout { operation: RemoteOp, after: Duration },
    #[error("{operation} failed: {payload}")]
    Remote { operation: RemoteOp, payload: String },
    #[error("malformed page payload: {0}")]
    MalformedPayload(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    IndexFetched {
        request: RequestId,
        pages: Result<Vec<Page>, ClientError>,
        last_selected: Result<PageIndex, ClientError>,
    },
    PageLoaded {
        request: RequestId,
        page: PageIndex,
        result: Result<Vec<Stroke>, ClientError>,
    },
    PageSaved {
        request: RequestId,
        page: PageIndex,
        empty: bool,
        result: Result<SaveReceipt, ClientError>,
    },
    PageDeleted {
        request: RequestId,
        page: PageIndex,
        result: Result<bool, ClientError>,
    },
    SelectionPersisted {
        page: PageIndex,
        result: Result<bool, ClientError>,
    },
}
