//! Notebook core: pure panel state machine and view-model helpers.
mod config;
mod confirm;
mod context;
mod effect;
mod failure;
mod msg;
mod registry;
mod schedule;
mod sketch;
mod state;
mod update;
mod view_model;

pub use config::PanelConfig;
pub use confirm::{ConfirmOutcome, ConfirmState, DeleteConfirmation};
pub use context::{AppContext, AppId, ContextTracker, FocusEvent, ProcessId};
pub use effect::{Effect, Notification};
pub use failure::{Failure, FailureKind};
pub use msg::Msg;
pub use registry::{PageEntry, PageIndex, PageMeta, PageRegistry, Timestamp};
pub use schedule::{Debouncer, Throttler};
pub use sketch::{Point, Stroke};
pub use state::{Operation, PanelState, RequestId, Selection};
pub use update::update;
pub use view_model::{format_age, PageEntryView, PanelView};
