use std::sync::Once;
use std::time::{Duration, Instant};

use notebook_core::{
    update, AppContext, Effect, Failure, FailureKind, Msg, PageMeta, PanelState, Stroke,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(notebook_logging::initialize_for_tests);
}

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

/// Opens the panel on app 100 with page 0 saved at `5_000` and completes the refresh.
fn synced() -> (PanelState, Instant) {
    let t0 = Instant::now();
    let (state, _) = update(
        PanelState::default(),
        Msg::PanelOpened(AppContext::new(100, 10)),
        t0,
    );
    let (state, _) = update(state, Msg::Tick, t0 + ms(500));
    let (state, _) = update(
        state,
        Msg::IndexFetched {
            request: 1,
            pages: Ok(vec![PageMeta {
                page: 0,
                timestamp: 5_000,
                empty: false,
            }]),
            last_selected: Ok(0),
        },
        t0 + ms(510),
    );
    let (state, _) = update(
        state,
        Msg::PageLoaded {
            request: 1,
            page: 0,
            strokes: Ok(Vec::new()),
        },
        t0 + ms(520),
    );
    assert!(!state.is_busy());
    (state, t0 + ms(1000))
}

fn run(state: PanelState, steps: Vec<(Msg, Instant)>) -> (PanelState, Vec<Effect>) {
    let mut state = state;
    let mut effects = Vec::new();
    for (msg, at) in steps {
        let (next, out) = update(state, msg, at);
        state = next;
        effects.extend(out);
    }
    (state, effects)
}

#[test]
fn selection_change_is_debounced_and_loads_last_choice() {
    init_logging();
    let (state, t) = synced();

    let (state, effects) = run(
        state,
        vec![
            (Msg::PageChosen(3), t),
            (Msg::PageChosen(5), t + ms(100)),
            (Msg::Tick, t + ms(599)),
        ],
    );
    assert!(effects.is_empty());

    let (state, effects) = update(state, Msg::Tick, t + ms(600));
    assert_eq!(
        effects,
        vec![
            Effect::PersistSelection {
                appid: 100,
                page: 5
            },
            Effect::ResetSurface,
            Effect::LoadPage {
                request: 2,
                appid: 100,
                page: 5
            },
        ]
    );
    assert!(state.is_busy());
    assert_eq!(state.selection().selected, 5);

    // The dropdown is disabled while the page loads.
    let (state, effects) = run(
        state,
        vec![(Msg::PageChosen(1), t + ms(610)), (Msg::Tick, t + ms(2_000))],
    );
    assert!(effects.is_empty());

    let (state, effects) = update(
        state,
        Msg::PageLoaded {
            request: 2,
            page: 5,
            strokes: Ok(Vec::new()),
        },
        t + ms(700),
    );
    assert_eq!(effects, vec![Effect::DrawStrokes(Vec::new())]);
    assert!(!state.is_busy());

    let (state, effects) = update(
        state,
        Msg::SelectionPersisted {
            page: 5,
            result: Ok(true),
        },
        t + ms(710),
    );
    assert!(effects.is_empty());
    assert_eq!(state.selection().last_persisted, 5);
}

#[test]
fn failed_selection_persist_is_reported_without_blocking() {
    init_logging();
    let (state, t) = synced();
    let (state, effects) = update(
        state,
        Msg::SelectionPersisted {
            page: 2,
            result: Err(Failure::new(FailureKind::Remote, "read-only")),
        },
        t,
    );
    assert!(matches!(effects.as_slice(), [Effect::Notify(_)]));
    assert!(!state.is_busy());
    assert_eq!(state.selection().last_persisted, 0);
}

#[test]
fn malformed_page_falls_back_to_blank_surface() {
    init_logging();
    let (state, t) = synced();
    let (state, _) = run(
        state,
        vec![(Msg::PageChosen(2), t), (Msg::Tick, t + ms(500))],
    );
    let (state, effects) = update(
        state,
        Msg::PageLoaded {
            request: 2,
            page: 2,
            strokes: Err(Failure::new(FailureKind::MalformedPayload, "expected value")),
        },
        t + ms(600),
    );
    assert!(matches!(effects.as_slice(), [Effect::Notify(_)]));
    assert!(!effects.iter().any(|e| matches!(e, Effect::DrawStrokes(_))));
    assert!(!state.is_busy());
}

#[test]
fn autosave_collapses_strokes_and_adopts_store_timestamp() {
    init_logging();
    let (state, t) = synced();

    let (state, effects) = run(
        state,
        vec![
            (Msg::StrokeCompleted, t),
            (Msg::StrokeCompleted, t + ms(300)),
            (Msg::StrokeCompleted, t + ms(600)),
            (Msg::Tick, t + ms(1_599)),
        ],
    );
    assert!(effects.is_empty());

    let (state, effects) = update(state, Msg::Tick, t + ms(1_600));
    assert_eq!(
        effects,
        vec![Effect::SavePage {
            request: 2,
            appid: 100,
            page: 0
        }]
    );
    assert!(state.is_busy());

    let (state, effects) = update(
        state,
        Msg::PageSaved {
            request: 2,
            page: 0,
            empty: false,
            result: Ok(9_000),
        },
        t + ms(1_700),
    );
    assert!(effects.is_empty());
    assert!(!state.is_busy());
    assert_eq!(state.registry().freshness(0), Some(9_000));
}

#[test]
fn saving_a_cleared_surface_marks_page_empty() {
    init_logging();
    let (state, t) = synced();
    let (state, _) = run(
        state,
        vec![(Msg::StrokeCompleted, t), (Msg::Tick, t + ms(1_000))],
    );
    let (state, _) = update(
        state,
        Msg::PageSaved {
            request: 2,
            page: 0,
            empty: true,
            result: Ok(9_000),
        },
        t + ms(1_100),
    );
    assert_eq!(state.registry().freshness(0), Some(0));
    assert_eq!(state.view(10_000).entries[0].label, "Page 0 - Empty");
}

#[test]
fn failed_autosave_is_reported_and_keeps_freshness() {
    init_logging();
    let (state, t) = synced();
    let (state, _) = run(
        state,
        vec![(Msg::StrokeCompleted, t), (Msg::Tick, t + ms(1_000))],
    );
    let (state, effects) = update(
        state,
        Msg::PageSaved {
            request: 2,
            page: 0,
            empty: false,
            result: Err(Failure::new(FailureKind::Timeout, "6000ms")),
        },
        t + ms(7_000),
    );
    assert!(matches!(effects.as_slice(), [Effect::Notify(_)]));
    assert!(!state.is_busy());
    assert_eq!(state.registry().freshness(0), Some(5_000));
}

#[test]
fn pending_autosave_is_flushed_before_page_switch() {
    init_logging();
    let (state, t) = synced();
    let (state, effects) = run(
        state,
        vec![
            (Msg::StrokeCompleted, t),
            (Msg::PageChosen(4), t + ms(100)),
            (Msg::Tick, t + ms(600)),
        ],
    );
    assert_eq!(
        effects,
        vec![
            Effect::SavePage {
                request: 2,
                appid: 100,
                page: 0
            },
            Effect::PersistSelection {
                appid: 100,
                page: 4
            },
            Effect::ResetSurface,
            Effect::LoadPage {
                request: 3,
                appid: 100,
                page: 4
            },
        ]
    );
    assert_eq!(state.next_deadline(), None);
}

#[test]
fn delete_requires_confirming_second_click() {
    init_logging();
    let (state, t) = synced();

    let (state, effects) = run(
        state,
        vec![(Msg::DeleteClicked, t), (Msg::Tick, t + ms(250))],
    );
    assert!(effects.is_empty());
    assert_eq!(state.armed_page(), Some(0));
    assert!(state.view(10_000).delete_prompt);
    assert_eq!(state.registry().freshness(0), Some(5_000));

    let (state, effects) = run(
        state,
        vec![(Msg::DeleteClicked, t + ms(1_000)), (Msg::Tick, t + ms(1_250))],
    );
    assert_eq!(
        effects,
        vec![
            Effect::ResetSurface,
            Effect::DeletePage {
                request: 2,
                appid: 100,
                page: 0
            }
        ]
    );
    assert_eq!(state.armed_page(), None);
    assert!(state.is_busy());

    let (state, effects) = update(
        state,
        Msg::PageDeleted {
            request: 2,
            page: 0,
            result: Ok(true),
        },
        t + ms(1_300),
    );
    assert!(effects.is_empty());
    assert!(!state.is_busy());
    assert_eq!(state.registry().freshness(0), Some(0));
}

#[test]
fn rapid_double_click_only_arms() {
    init_logging();
    let (state, t) = synced();
    let (state, effects) = run(
        state,
        vec![
            (Msg::DeleteClicked, t),
            (Msg::DeleteClicked, t + ms(100)),
            (Msg::Tick, t + ms(350)),
        ],
    );
    assert!(effects.is_empty());
    assert_eq!(state.armed_page(), Some(0));
}

#[test]
fn unconfirmed_delete_expires_without_remote_effect() {
    init_logging();
    let (state, t) = synced();
    let (state, _) = run(
        state,
        vec![(Msg::DeleteClicked, t), (Msg::Tick, t + ms(250))],
    );
    assert_eq!(state.next_deadline(), Some(t + ms(4_250)));

    let (state, effects) = update(state, Msg::Tick, t + ms(4_250));
    assert!(effects.is_empty());
    assert_eq!(state.armed_page(), None);
    assert!(!state.view(10_000).delete_prompt);

    // A later click starts over instead of confirming.
    let (state, effects) = run(
        state,
        vec![(Msg::DeleteClicked, t + ms(5_000)), (Msg::Tick, t + ms(5_250))],
    );
    assert!(effects.is_empty());
    assert_eq!(state.armed_page(), Some(0));
    assert_eq!(state.registry().freshness(0), Some(5_000));
}

#[test]
fn arming_another_page_replaces_previous_arm() {
    init_logging();
    let (state, t) = synced();
    let (state, _) = run(
        state,
        vec![
            (Msg::DeleteClicked, t),
            (Msg::Tick, t + ms(250)),
            (Msg::PageChosen(2), t + ms(300)),
            (Msg::Tick, t + ms(800)),
        ],
    );
    assert_eq!(state.armed_page(), Some(0));
    let (state, _) = update(
        state,
        Msg::PageLoaded {
            request: 2,
            page: 2,
            strokes: Ok(Vec::new()),
        },
        t + ms(900),
    );

    let (state, effects) = run(
        state,
        vec![(Msg::DeleteClicked, t + ms(1_000)), (Msg::Tick, t + ms(1_250))],
    );
    assert!(effects.is_empty(), "page 2 is only armed, not deleted");
    assert_eq!(state.armed_page(), Some(2));
    assert_eq!(state.next_deadline(), Some(t + ms(5_250)));
}

#[test]
fn failed_delete_is_reported_and_keeps_freshness() {
    init_logging();
    let (state, t) = synced();
    let (state, _) = run(
        state,
        vec![
            (Msg::DeleteClicked, t),
            (Msg::Tick, t + ms(250)),
            (Msg::DeleteClicked, t + ms(500)),
            (Msg::Tick, t + ms(750)),
        ],
    );
    assert!(state.is_busy());

    let (state, effects) = update(
        state,
        Msg::PageDeleted {
            request: 2,
            page: 0,
            result: Err(Failure::new(FailureKind::Remote, "permission denied")),
        },
        t + ms(800),
    );
    assert!(matches!(effects.as_slice(), [Effect::Notify(_)]));
    assert!(!state.is_busy());
    assert_eq!(state.registry().freshness(0), Some(5_000));
}

#[test]
fn eraser_toggle_is_gated_by_busy() {
    init_logging();
    let (state, t) = synced();
    let (state, effects) = update(state, Msg::EraserToggled, t);
    assert_eq!(effects, vec![Effect::SetEraseMode(true)]);
    assert!(state.view(0).eraser);

    let (state, _) = run(
        state,
        vec![(Msg::StrokeCompleted, t), (Msg::Tick, t + ms(1_000))],
    );
    assert!(state.is_busy());
    let (state, effects) = update(state, Msg::EraserToggled, t + ms(1_010));
    assert!(effects.is_empty());
    assert!(state.eraser());
}

#[test]
fn closing_flushes_autosave_and_cancels_timers() {
    init_logging();
    let (state, t) = synced();
    let (state, effects) = run(
        state,
        vec![
            (Msg::StrokeCompleted, t),
            (Msg::DeleteClicked, t),
            (Msg::PanelClosed, t + ms(10)),
        ],
    );
    assert_eq!(
        effects,
        vec![Effect::SavePage {
            request: 2,
            appid: 100,
            page: 0
        }]
    );
    assert!(!state.is_open());
    assert_eq!(state.next_deadline(), None);

    let (state, effects) = run(
        state,
        vec![(Msg::PageChosen(1), t + ms(20)), (Msg::Tick, t + ms(5_000))],
    );
    assert!(effects.is_empty());

    // The flushed save still settles.
    let (state, _) = update(
        state,
        Msg::PageSaved {
            request: 2,
            page: 0,
            empty: false,
            result: Ok(6_000),
        },
        t + ms(5_100),
    );
    assert!(!state.is_busy());
}

#[test]
fn strokes_serialize_with_surface_field_names() {
    let stroke = Stroke::pen(vec![notebook_core::Point { x: 1.5, y: 2.0 }]);
    let json = serde_json::to_value(&stroke).unwrap();
    assert_eq!(json["drawMode"], serde_json::json!(true));
    assert_eq!(json["strokeWidth"], serde_json::json!(4.0));
    assert_eq!(json["paths"][0]["x"], serde_json::json!(1.5));
}

#[test]
fn strokes_while_a_page_loads_are_saved_to_that_page() {
    init_logging();
    let (state, t) = synced();
    let (state, effects) = run(
        state,
        vec![(Msg::PageChosen(4), t), (Msg::Tick, t + ms(500))],
    );
    assert!(effects.contains(&Effect::LoadPage {
        request: 2,
        appid: 100,
        page: 4
    }));

    let (state, effects) = run(
        state,
        vec![
            (Msg::StrokeCompleted, t + ms(600)),
            (
                Msg::PageLoaded {
                    request: 2,
                    page: 4,
                    strokes: Ok(Vec::new()),
                },
                t + ms(700),
            ),
            (Msg::Tick, t + ms(1_600)),
        ],
    );
    assert_eq!(
        effects,
        vec![
            Effect::DrawStrokes(Vec::new()),
            Effect::SavePage {
                request: 3,
                appid: 100,
                page: 4
            },
        ]
    );
    assert!(state.is_busy());
}
