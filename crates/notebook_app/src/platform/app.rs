use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use chrono::Utc;
use log::LevelFilter;
use notebook_core::{update, AppContext, Msg, PanelState};
use notebook_engine::{ensure_dir, EngineHandle, FileStore, PageClient};
use notebook_logging::{notebook_info, notebook_warn};

use super::canvas::MemoryCanvas;
use super::effects::EffectRunner;
use super::host::{HostEvent, StdinHost};
use super::logging::{self, LogDestination};
use super::render::render;
use super::settings::{load_settings, SETTINGS_FILENAME};

const POLL_INTERVAL: Duration = Duration::from_millis(15);
/// Upper bound on waiting for outstanding completions after the panel closes.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

pub fn run_app(
    settings_path: Option<PathBuf>,
    log_destination: LogDestination,
    log_level: LevelFilter,
) -> anyhow::Result<()> {
    logging::initialize(log_destination, log_level);

    let settings_path = settings_path.unwrap_or_else(|| PathBuf::from(SETTINGS_FILENAME));
    let settings = load_settings(&settings_path);
    ensure_dir(&settings.store_dir)
        .with_context(|| format!("creating store directory {:?}", settings.store_dir))?;
    notebook_info!("notebook store at {:?}", settings.store_dir);

    let store = Arc::new(FileStore::new(settings.store_dir.clone()));
    let engine = EngineHandle::new(PageClient::new(store, settings.client.clone()))
        .context("starting engine thread")?;
    let host = StdinHost::spawn().context("starting stdin reader")?;

    let mut panel = Panel::new(
        PanelState::new(settings.panel),
        EffectRunner::new(engine, MemoryCanvas::default()),
    );
    let subscription = host.register_for_focus_changes();
    panel.dispatch(Msg::PanelOpened(AppContext::default()));

    'running: loop {
        while let Some(event) = host.try_recv() {
            match event {
                HostEvent::Quit => break 'running,
                HostEvent::Show => panel.print(),
                HostEvent::Focus(focus) => panel.dispatch(Msg::FocusChanged(focus)),
                HostEvent::Select(page) => panel.dispatch(Msg::PageChosen(page)),
                HostEvent::Stroke(points) => {
                    panel.runner.surface_mut().draw(points);
                    panel.dispatch(Msg::StrokeCompleted);
                }
                HostEvent::ToggleEraser => panel.dispatch(Msg::EraserToggled),
                HostEvent::Delete => panel.dispatch(Msg::DeleteClicked),
            }
        }
        panel.pump();
        thread::sleep(POLL_INTERVAL);
    }

    subscription.unregister();
    panel.dispatch(Msg::PanelClosed);
    panel.drain(SHUTDOWN_GRACE);
    notebook_info!("notebook panel closed");
    Ok(())
}

/// Owns the panel state and feeds it messages, one at a time.
struct Panel {
    state: PanelState,
    runner: EffectRunner<MemoryCanvas>,
}

impl Panel {
    fn new(state: PanelState, runner: EffectRunner<MemoryCanvas>) -> Self {
        Self { state, runner }
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg, Instant::now());
        self.state = state;
        self.runner.run(effects);
        if self.state.consume_dirty() {
            self.print();
        }
    }

    /// Delivers completions, then fires due timers.
    fn pump(&mut self) {
        for msg in self.runner.poll_completions() {
            self.dispatch(msg);
        }
        if let Some(deadline) = self.state.next_deadline() {
            if Instant::now() >= deadline {
                self.dispatch(Msg::Tick);
            }
        }
    }

    /// Waits for outstanding remote work so the final save lands before exit.
    fn drain(&mut self, grace: Duration) {
        let started = Instant::now();
        while self.state.is_busy() {
            if started.elapsed() >= grace {
                notebook_warn!(
                    "giving up on {} outstanding operation(s)",
                    self.state.outstanding().len()
                );
                return;
            }
            self.pump();
            thread::sleep(POLL_INTERVAL);
        }
    }

    fn print(&self) {
        let view = self.state.view(Utc::now().timestamp_millis());
        for line in render(&view, self.runner.surface().stroke_count()) {
            println!("{line}");
        }
    }
}
