use std::io;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use notebook_core::{AppId, PageIndex, RequestId, Stroke};
use notebook_logging::{notebook_debug, notebook_error, notebook_info};
use thiserror::Error;

use crate::codec::{encode_strokes, page_strokes};
use crate::{EngineEvent, PageClient};

/// Remote work requested by the panel.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCommand {
    FetchIndex {
        request: RequestId,
        appid: AppId,
    },
    LoadPage {
        request: RequestId,
        appid: AppId,
        page: PageIndex,
    },
    SavePage {
        request: RequestId,
        appid: AppId,
        page: PageIndex,
        strokes: Vec<Stroke>,
    },
    DeletePage {
        request: RequestId,
        appid: AppId,
        page: PageIndex,
    },
    PersistSelection {
        appid: AppId,
        page: PageIndex,
    },
}

/// The engine thread is gone; the command was not executed.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("engine stopped before {0:?} could run")]
pub struct EngineStopped(pub EngineCommand);

/// Runs commands one at a time, in submission order, on a background single-threaded
/// runtime. Every command produces exactly one `EngineEvent`.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(client: PageClient) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel::<EngineCommand>();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()?;

        thread::Builder::new()
            .name("notebook-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let event = runtime.block_on(execute(&client, command));
                    if event_tx.send(event).is_err() {
                        break;
                    }
                }
                notebook_info!("engine stopped");
            })?;

        Ok(Self { cmd_tx, event_rx })
    }

    /// Queues a command. On error no `EngineEvent` will ever answer it.
    pub fn send(&self, command: EngineCommand) -> Result<(), EngineStopped> {
        notebook_debug!("engine command {:?}", command);
        self.cmd_tx.send(command).map_err(|err| {
            notebook_error!("engine thread is gone; dropping command");
            EngineStopped(err.0)
        })
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

/// Performs one command against the store.
pub async fn execute(client: &PageClient, command: EngineCommand) -> EngineEvent {
    match command {
        EngineCommand::FetchIndex { request, appid } => {
            let pages = client.list_pages(appid).await;
            let last_selected = client.load_last_selected_page(appid).await;
            EngineEvent::IndexFetched {
                request,
                pages,
                last_selected,
            }
        }
        EngineCommand::LoadPage {
            request,
            appid,
            page,
        } => {
            let result = client
                .load_page(appid, page)
                .await
                .and_then(|loaded| page_strokes(&loaded));
            EngineEvent::PageLoaded {
                request,
                page,
                result,
            }
        }
        EngineCommand::SavePage {
            request,
            appid,
            page,
            strokes,
        } => {
            let empty = strokes.is_empty();
            let result = match encode_strokes(&strokes) {
                Ok(data) => client.save_page(appid, page, data).await,
                Err(err) => Err(err),
            };
            EngineEvent::PageSaved {
                request,
                page,
                empty,
                result,
            }
        }
        EngineCommand::DeletePage {
            request,
            appid,
            page,
        } => EngineEvent::PageDeleted {
            request,
            page,
            result: client.delete_page(appid, page).await,
        },
        EngineCommand::PersistSelection { appid, page } => EngineEvent::SelectionPersisted {
            page,
            result: client.save_last_selected_page(appid, page).await,
        },
    }
}
