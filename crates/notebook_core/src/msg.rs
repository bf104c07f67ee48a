use crate::{AppContext, Failure, FocusEvent, PageIndex, PageMeta, RequestId, Stroke, Timestamp};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Panel mounted while `AppContext` had focus.
    PanelOpened(AppContext),
    /// Host reported a focus change (high frequency).
    FocusChanged(FocusEvent),
    /// User picked a page in the dropdown.
    PageChosen(PageIndex),
    /// Drawing surface finished a stroke.
    StrokeCompleted,
    /// User clicked the delete button.
    DeleteClicked,
    /// User toggled between pen and eraser.
    EraserToggled,
    /// Time advanced; fires due debounced actions and expiries.
    Tick,
    /// Panel is being torn down.
    PanelClosed,
    /// Store listing and last selection for a refresh.
    IndexFetched {
        request: RequestId,
        pages: Result<Vec<PageMeta>, Failure>,
        last_selected: Result<PageIndex, Failure>,
    },
    /// Page content for a refresh or selection change.
    PageLoaded {
        request: RequestId,
        page: PageIndex,
        strokes: Result<Vec<Stroke>, Failure>,
    },
    /// Autosave finished; `empty` tells whether a cleared page was written.
    PageSaved {
        request: RequestId,
        page: PageIndex,
        empty: bool,
        result: Result<Timestamp, Failure>,
    },
    /// Confirmed delete finished.
    PageDeleted {
        request: RequestId,
        page: PageIndex,
        result: Result<bool, Failure>,
    },
    /// Best-effort persistence of the last selected page finished.
    SelectionPersisted {
        page: PageIndex,
        result: Result<bool, Failure>,
    },
    /// Fallback for placeholder wiring.
    NoOp,
}
