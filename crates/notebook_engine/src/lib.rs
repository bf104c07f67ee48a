//! Notebook engine: page store access and remote command execution.
mod client;
pub mod codec;
mod engine;
mod file_store;
mod persist;
mod store;
mod types;

pub use client::{ClientSettings, PageClient};
pub use engine::{execute, EngineCommand, EngineHandle, EngineStopped};
pub use file_store::FileStore;
pub use persist::{ensure_dir, write_atomic, PersistError};
pub use store::{PageStore, StoreError};
pub use types::{ClientError, EngineEvent, Page, RemoteOp, SaveReceipt};
