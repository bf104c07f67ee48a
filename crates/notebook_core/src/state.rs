use std::collections::BTreeMap;
use std::time::Instant;

use crate::confirm::{ConfirmOutcome, DeleteConfirmation};
use crate::context::{AppContext, ContextTracker};
use crate::effect::{Effect, Notification};
use crate::registry::{PageIndex, PageRegistry};
use crate::schedule::Debouncer;
use crate::view_model::{entry_label, PageEntryView, PanelView};
use crate::{Failure, PanelConfig, Timestamp};

/// Correlates an effect with the message that completes it.
pub type RequestId = u64;

/// Kinds of remote work that keep the panel busy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Refresh,
    Select,
    Save,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct InFlight {
    pub(crate) operation: Operation,
    pub(crate) generation: u64,
    pub(crate) context: AppContext,
}

/// The page whose content the drawing surface holds; autosaves are written back to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SaveTarget {
    context: AppContext,
    page: PageIndex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub selected: PageIndex,
    pub last_persisted: PageIndex,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelState {
    config: PanelConfig,
    open: bool,
    registry: PageRegistry,
    tracker: ContextTracker,
    active: AppContext,
    selection: Selection,
    /// `None` until a page has been loaded onto the surface.
    shown: Option<SaveTarget>,
    confirm: DeleteConfirmation,
    eraser: bool,
    generation: u64,
    next_request: RequestId,
    in_flight: BTreeMap<RequestId, InFlight>,
    refresh: Debouncer<()>,
    select: Debouncer<PageIndex>,
    delete: Debouncer<PageIndex>,
    autosave: Debouncer<SaveTarget>,
    dirty: bool,
}

impl Default for PanelState {
    fn default() -> Self {
        Self::new(PanelConfig::default())
    }
}

impl PanelState {
    /// A `max_pages` of zero is raised to one so there is always a page to select.
    pub fn new(config: PanelConfig) -> Self {
        let config = PanelConfig {
            max_pages: config.max_pages.max(1),
            ..config
        };
        Self {
            open: false,
            registry: PageRegistry::new(config.max_pages),
            tracker: ContextTracker::new(config.focus_change_wait, AppContext::default()),
            active: AppContext::default(),
            selection: Selection::default(),
            shown: None,
            confirm: DeleteConfirmation::new(config.confirm_timeout),
            eraser: false,
            generation: 0,
            next_request: 0,
            in_flight: BTreeMap::new(),
            refresh: Debouncer::new(config.refresh_wait),
            select: Debouncer::new(config.selection_wait),
            delete: Debouncer::new(config.delete_click_wait),
            autosave: Debouncer::new(config.autosave_wait),
            dirty: false,
            config,
        }
    }

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// True while at least one refresh, selection, save or delete is outstanding.
    pub fn is_busy(&self) -> bool {
        !self.in_flight.is_empty()
    }

    pub fn outstanding(&self) -> Vec<Operation> {
        self.in_flight.values().map(|f| f.operation).collect()
    }

    pub fn registry(&self) -> &PageRegistry {
        &self.registry
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn active_context(&self) -> AppContext {
        self.active
    }

    pub fn host_context(&self) -> AppContext {
        self.tracker.host_context()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn armed_page(&self) -> Option<PageIndex> {
        self.confirm.armed_page()
    }

    pub fn eraser(&self) -> bool {
        self.eraser
    }

    /// Earliest instant at which a `Tick` has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        if !self.open {
            return None;
        }
        [
            self.refresh.deadline(),
            self.select.deadline(),
            self.delete.deadline(),
            self.autosave.deadline(),
            self.confirm.deadline(),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    pub fn view(&self, now_ms: Timestamp) -> PanelView {
        let entries = self
            .registry
            .sort_for_display()
            .into_iter()
            .map(|entry| PageEntryView {
                index: entry.index,
                label: entry_label(entry.index, entry.timestamp, now_ms),
                timestamp: entry.timestamp,
            })
            .collect();
        PanelView {
            title: if self.active.appid == 0 {
                "Steam".to_string()
            } else {
                format!("App {}", self.active.appid)
            },
            controls_disabled: self.is_busy(),
            entries,
            selected: self.selection.selected,
            delete_prompt: self.confirm.armed_page().is_some(),
            eraser: self.eraser,
        }
    }

    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    // ---- transitions used by `update` ----

    pub(crate) fn open(&mut self, context: AppContext, now: Instant) {
        self.open = true;
        self.tracker = ContextTracker::new(self.config.focus_change_wait, context);
        self.refresh.trigger(now, ());
        self.mark_dirty();
    }

    pub(crate) fn close(&mut self, effects: &mut Vec<Effect>) {
        self.flush_autosave(effects);
        self.refresh.cancel();
        self.select.cancel();
        self.delete.cancel();
        self.confirm.disarm();
        self.open = false;
        self.mark_dirty();
    }

    pub(crate) fn observe_focus(&mut self, event: &crate::FocusEvent, now: Instant) {
        if self.tracker.observe(event, now) {
            self.refresh.trigger(now, ());
        }
    }

    pub(crate) fn queue_selection(&mut self, page: PageIndex, now: Instant) {
        if self.registry.contains(page) {
            self.select.trigger(now, page);
        }
    }

    pub(crate) fn queue_delete(&mut self, now: Instant) {
        self.delete.trigger(now, self.selection.selected);
    }

    /// Strokes drawn before any page is shown are discarded by the next surface reset.
    pub(crate) fn queue_autosave(&mut self, now: Instant) {
        if let Some(target) = self.shown {
            self.autosave.trigger(now, target);
        }
    }

    pub(crate) fn toggle_eraser(&mut self) -> bool {
        self.eraser = !self.eraser;
        self.mark_dirty();
        self.eraser
    }

    /// Runs every debounced action whose quiet period has elapsed, then expiries.
    pub(crate) fn fire_due(&mut self, now: Instant, effects: &mut Vec<Effect>) {
        if let Some(target) = self.autosave.poll(now) {
            self.start_save(target, effects);
        }
        if self.refresh.poll(now).is_some() {
            self.start_refresh(effects);
        }
        if let Some(page) = self.select.poll(now) {
            self.start_selection(page, effects);
        }
        if let Some(page) = self.delete.poll(now) {
            self.press_delete(page, now, effects);
        }
        if self.confirm.expire(now) {
            self.mark_dirty();
        }
    }

    fn begin(&mut self, operation: Operation, context: AppContext) -> RequestId {
        self.next_request += 1;
        let request = self.next_request;
        self.in_flight.insert(
            request,
            InFlight {
                operation,
                generation: self.generation,
                context,
            },
        );
        self.mark_dirty();
        request
    }

    pub(crate) fn peek(&self, request: RequestId) -> Option<InFlight> {
        self.in_flight.get(&request).copied()
    }

    pub(crate) fn finish(&mut self, request: RequestId) -> Option<InFlight> {
        let flight = self.in_flight.remove(&request);
        if flight.is_some() {
            self.mark_dirty();
        }
        flight
    }

    pub(crate) fn is_current(&self, flight: &InFlight) -> bool {
        flight.generation == self.generation
    }

    fn flush_autosave(&mut self, effects: &mut Vec<Effect>) {
        if let Some(target) = self.autosave.flush() {
            self.start_save(target, effects);
        }
    }

    fn start_save(&mut self, target: SaveTarget, effects: &mut Vec<Effect>) {
        let request = self.begin(Operation::Save, target.context);
        effects.push(Effect::SavePage {
            request,
            appid: target.context.appid,
            page: target.page,
        });
    }

    fn start_refresh(&mut self, effects: &mut Vec<Effect>) {
        self.flush_autosave(effects);
        self.select.cancel();
        self.delete.cancel();
        self.confirm.disarm();

        self.generation += 1;
        let context = self.tracker.host_context();
        self.tracker.track(context);
        self.active = context;

        let request = self.begin(Operation::Refresh, context);
        effects.push(Effect::FetchIndex {
            request,
            appid: context.appid,
        });
    }

    fn start_selection(&mut self, page: PageIndex, effects: &mut Vec<Effect>) {
        self.flush_autosave(effects);
        self.selection.selected = page;
        self.shown = Some(SaveTarget {
            context: self.active,
            page,
        });
        let appid = self.active.appid;
        let request = self.begin(Operation::Select, self.active);
        effects.push(Effect::PersistSelection { appid, page });
        effects.push(Effect::ResetSurface);
        effects.push(Effect::LoadPage {
            request,
            appid,
            page,
        });
    }

    fn press_delete(&mut self, page: PageIndex, now: Instant, effects: &mut Vec<Effect>) {
        match self.confirm.click(page, now) {
            ConfirmOutcome::Armed => self.mark_dirty(),
            ConfirmOutcome::Confirmed(page) => {
                if page == self.selection.selected {
                    // The cleared surface must not be re-saved over the deletion.
                    self.autosave.cancel();
                    effects.push(Effect::ResetSurface);
                }
                let request = self.begin(Operation::Delete, self.active);
                effects.push(Effect::DeletePage {
                    request,
                    appid: self.active.appid,
                    page,
                });
            }
        }
    }

    /// Applies the store index fetched by a refresh and returns the page to load.
    ///
    /// Strokes drawn while the index was loading belong to the page still on the surface,
    /// so they are saved there before the caller resets it.
    pub(crate) fn apply_index(
        &mut self,
        context: AppContext,
        pages: &[crate::PageMeta],
        last_selected: PageIndex,
        effects: &mut Vec<Effect>,
    ) -> PageIndex {
        self.flush_autosave(effects);
        self.registry.refresh_labels(pages);
        let selected = if self.registry.contains(last_selected) {
            last_selected
        } else {
            0
        };
        self.selection = Selection {
            selected,
            last_persisted: selected,
        };
        self.shown = Some(SaveTarget {
            context,
            page: selected,
        });
        self.mark_dirty();
        selected
    }

    pub(crate) fn apply_saved(
        &mut self,
        context: AppContext,
        page: PageIndex,
        timestamp: Timestamp,
        empty: bool,
    ) {
        if context.appid == self.active.appid {
            self.registry.mark_saved(page, timestamp, empty);
            self.mark_dirty();
        }
    }

    pub(crate) fn apply_deleted(&mut self, context: AppContext, page: PageIndex) {
        if context.appid == self.active.appid {
            self.registry.clear(page);
            self.mark_dirty();
        }
    }

    pub(crate) fn apply_persisted(&mut self, page: PageIndex) {
        self.selection.last_persisted = page;
    }
}

pub(crate) fn report(effects: &mut Vec<Effect>, action: &str, failure: &Failure) {
    effects.push(Effect::Notify(Notification::error(format!(
        "{action}: {failure}"
    ))));
}
