use notebook_core::{Effect, Failure, FailureKind, Msg, Notification};
use notebook_engine::{ClientError, EngineCommand, EngineEvent, EngineHandle, EngineStopped};
use notebook_logging::{notebook_debug, notebook_warn};

use super::canvas::DrawingSurface;
use super::render::render_notification;

/// Carries out effects: remote work goes to the engine, drawing goes to the surface.
pub struct EffectRunner<S> {
    engine: EngineHandle,
    surface: S,
    /// Failure completions for commands the engine could not accept.
    undelivered: Vec<Msg>,
}

impl<S: DrawingSurface> EffectRunner<S> {
    pub fn new(engine: EngineHandle, surface: S) -> Self {
        Self {
            engine,
            surface,
            undelivered: Vec::new(),
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn run(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            notebook_debug!("effect {:?}", effect);
            match effect {
                Effect::FetchIndex { request, appid } => {
                    self.submit(EngineCommand::FetchIndex { request, appid });
                }
                Effect::ResetSurface => self.surface.reset_canvas(),
                Effect::LoadPage {
                    request,
                    appid,
                    page,
                } => self.submit(EngineCommand::LoadPage {
                    request,
                    appid,
                    page,
                }),
                Effect::DrawStrokes(strokes) => self.surface.load_paths(strokes),
                Effect::SavePage {
                    request,
                    appid,
                    page,
                } => self.submit(EngineCommand::SavePage {
                    request,
                    appid,
                    page,
                    strokes: self.surface.export_paths(),
                }),
                Effect::DeletePage {
                    request,
                    appid,
                    page,
                } => self.submit(EngineCommand::DeletePage {
                    request,
                    appid,
                    page,
                }),
                Effect::PersistSelection { appid, page } => {
                    self.submit(EngineCommand::PersistSelection { appid, page });
                }
                Effect::SetEraseMode(enabled) => self.surface.erase_mode(enabled),
                Effect::Notify(notification) => notify(&notification),
            }
        }
    }

    fn submit(&mut self, command: EngineCommand) {
        if let Err(EngineStopped(command)) = self.engine.send(command) {
            self.undelivered.push(undelivered_msg(command));
        }
    }

    /// Completions that arrived since the last poll, as messages.
    pub fn poll_completions(&mut self) -> Vec<Msg> {
        let mut msgs = std::mem::take(&mut self.undelivered);
        msgs.extend(std::iter::from_fn(|| self.engine.try_recv()).map(completion_msg));
        msgs
    }
}

fn notify(notification: &Notification) {
    notebook_warn!("{}: {}", notification.title, notification.body);
    println!("{}", render_notification(notification));
}

fn completion_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::IndexFetched {
            request,
            pages,
            last_selected,
        } => Msg::IndexFetched {
            request,
            pages: pages
                .map(|pages| pages.iter().map(|page| page.meta()).collect())
                .map_err(failure),
            last_selected: last_selected.map_err(failure),
        },
        EngineEvent::PageLoaded {
            request,
            page,
            result,
        } => Msg::PageLoaded {
            request,
            page,
            strokes: result.map_err(failure),
        },
        EngineEvent::PageSaved {
            request,
            page,
            empty,
            result,
        } => Msg::PageSaved {
            request,
            page,
            empty,
            result: result.map(|receipt| receipt.timestamp).map_err(failure),
        },
        EngineEvent::PageDeleted {
            request,
            page,
            result,
        } => Msg::PageDeleted {
            request,
            page,
            result: result.map_err(failure),
        },
        EngineEvent::SelectionPersisted { page, result } => Msg::SelectionPersisted {
            page,
            result: result.map_err(failure),
        },
    }
}

/// Answers a command that never reached the engine, so its operation still settles.
fn undelivered_msg(command: EngineCommand) -> Msg {
    match command {
        EngineCommand::FetchIndex { request, .. } => Msg::IndexFetched {
            request,
            pages: stopped(),
            last_selected: stopped(),
        },
        EngineCommand::LoadPage { request, page, .. } => Msg::PageLoaded {
            request,
            page,
            strokes: stopped(),
        },
        EngineCommand::SavePage {
            request,
            page,
            strokes,
            ..
        } => Msg::PageSaved {
            request,
            page,
            empty: strokes.is_empty(),
            result: stopped(),
        },
        EngineCommand::DeletePage { request, page, .. } => Msg::PageDeleted {
            request,
            page,
            result: stopped(),
        },
        EngineCommand::PersistSelection { page, .. } => Msg::SelectionPersisted {
            page,
            result: stopped(),
        },
    }
}

fn stopped<T>() -> Result<T, Failure> {
    Err(Failure::new(FailureKind::Remote, "engine stopped"))
}

fn failure(err: ClientError) -> Failure {
    let kind = match &err {
        ClientError::Timeout { .. } => FailureKind::Timeout,
        ClientError::Remote { .. } => FailureKind::Remote,
        ClientError::MalformedPayload(_) => FailureKind::MalformedPayload,
    };
    Failure::new(kind, err.to_string())
}
