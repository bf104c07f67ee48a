use crate::{AppId, PageIndex, RequestId, Stroke};

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// List pages and load the last selected page index. Answered by `Msg::IndexFetched`.
    FetchIndex { request: RequestId, appid: AppId },
    /// Clear the drawing surface.
    ResetSurface,
    /// Load one page's strokes. Answered by `Msg::PageLoaded`.
    LoadPage {
        request: RequestId,
        appid: AppId,
        page: PageIndex,
    },
    /// Feed strokes to the drawing surface.
    DrawStrokes(Vec<Stroke>),
    /// Export the drawing surface and store it. Answered by `Msg::PageSaved`.
    SavePage {
        request: RequestId,
        appid: AppId,
        page: PageIndex,
    },
    /// Answered by `Msg::PageDeleted`.
    DeletePage {
        request: RequestId,
        appid: AppId,
        page: PageIndex,
    },
    /// Answered by `Msg::SelectionPersisted`.
    PersistSelection { appid: AppId, page: PageIndex },
    SetEraseMode(bool),
    /// Non-blocking user-visible notification.
    Notify(Notification),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub body: String,
}

impl Notification {
    pub fn error(body: impl Into<String>) -> Self {
        Self {
            title: "Notebook Error".to_string(),
            body: body.into(),
        }
    }
}
