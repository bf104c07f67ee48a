use std::time::Instant;

use crate::state::report;
use crate::{Effect, Msg, Operation, PanelState};

/// Pure update function: applies a message observed at `now` and returns any effects.
pub fn update(mut state: PanelState, msg: Msg, now: Instant) -> (PanelState, Vec<Effect>) {
    let mut effects = Vec::new();
    match msg {
        Msg::PanelOpened(context) => state.open(context, now),
        Msg::PanelClosed => {
            if state.is_open() {
                state.close(&mut effects);
            }
        }
        Msg::FocusChanged(event) => {
            if state.is_open() {
                state.observe_focus(&event, now);
            }
        }
        // Controls are disabled while busy, so their input is dropped rather than queued.
        Msg::PageChosen(page) => {
            if state.is_open() && !state.is_busy() {
                state.queue_selection(page, now);
            }
        }
        Msg::DeleteClicked => {
            if state.is_open() && !state.is_busy() {
                state.queue_delete(now);
            }
        }
        Msg::EraserToggled => {
            if state.is_open() && !state.is_busy() {
                let eraser = state.toggle_eraser();
                effects.push(Effect::SetEraseMode(eraser));
            }
        }
        Msg::StrokeCompleted => {
            if state.is_open() {
                state.queue_autosave(now);
            }
        }
        Msg::Tick => {
            if state.is_open() {
                state.fire_due(now, &mut effects);
            }
        }
        Msg::IndexFetched {
            request,
            pages,
            last_selected,
        } => {
            let Some(flight) = state.peek(request) else {
                return (state, effects);
            };
            if flight.operation != Operation::Refresh || !state.is_current(&flight) {
                state.finish(request);
                return (state, effects);
            }
            let pages = pages.unwrap_or_else(|failure| {
                report(&mut effects, "Listing pages failed", &failure);
                Vec::new()
            });
            let last_selected = last_selected.unwrap_or_else(|failure| {
                report(&mut effects, "Loading last selected page failed", &failure);
                0
            });
            let page = state.apply_index(flight.context, &pages, last_selected, &mut effects);
            effects.push(Effect::ResetSurface);
            effects.push(Effect::LoadPage {
                request,
                appid: flight.context.appid,
                page,
            });
        }
        Msg::PageLoaded {
            request,
            page,
            strokes,
        } => {
            let Some(flight) = state.finish(request) else {
                return (state, effects);
            };
            let shown = state.is_current(&flight) && page == state.selection().selected;
            match strokes {
                Ok(strokes) if shown => effects.push(Effect::DrawStrokes(strokes)),
                Ok(_) => {}
                // The surface was already cleared; the page stays blank.
                Err(failure) => report(&mut effects, &format!("Loading page {page} failed"), &failure),
            }
        }
        Msg::PageSaved {
            request,
            page,
            empty,
            result,
        } => {
            let Some(flight) = state.finish(request) else {
                return (state, effects);
            };
            match result {
                Ok(timestamp) => state.apply_saved(flight.context, page, timestamp, empty),
                Err(failure) => report(&mut effects, &format!("Saving page {page} failed"), &failure),
            }
        }
        Msg::PageDeleted {
            request,
            page,
            result,
        } => {
            let Some(flight) = state.finish(request) else {
                return (state, effects);
            };
            match result {
                Ok(true) => state.apply_deleted(flight.context, page),
                Ok(false) => effects.push(Effect::Notify(crate::Notification::error(format!(
                    "Deleting page {page} failed: store refused"
                )))),
                Err(failure) => {
                    report(&mut effects, &format!("Deleting page {page} failed"), &failure)
                }
            }
        }
        Msg::SelectionPersisted { page, result } => match result {
            Ok(true) => state.apply_persisted(page),
            Ok(false) => effects.push(Effect::Notify(crate::Notification::error(format!(
                "Remembering page {page} failed: store refused"
            )))),
            Err(failure) => report(
                &mut effects,
                &format!("Remembering page {page} failed"),
                &failure,
            ),
        },
        Msg::NoOp => {}
    }

    (state, effects)
}
