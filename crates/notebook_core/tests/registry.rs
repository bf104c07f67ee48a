use notebook_core::{PageEntry, PageMeta, PageRegistry};

fn order(registry: &PageRegistry) -> Vec<usize> {
    registry
        .sort_for_display()
        .into_iter()
        .map(|entry| entry.index)
        .collect()
}

#[test]
fn new_registry_has_one_empty_slot_per_index() {
    let registry = PageRegistry::new(8);
    let entries = registry.sort_for_display();

    assert_eq!(registry.capacity(), 8);
    assert_eq!(order(&registry), (0..8).collect::<Vec<_>>());
    assert!(entries.iter().all(|entry| entry.timestamp == 0));
    assert!(!registry.contains(8));
}

#[test]
fn saved_page_sorts_first() {
    let mut registry = PageRegistry::new(8);
    registry.refresh_labels(&[PageMeta {
        page: 3,
        timestamp: 1_700_000_000_123,
        empty: false,
    }]);

    let entries = registry.sort_for_display();
    assert_eq!(
        entries[0],
        PageEntry {
            index: 3,
            timestamp: 1_700_000_000_123
        }
    );
    assert_eq!(order(&registry), vec![3, 0, 1, 2, 4, 5, 6, 7]);
}

#[test]
fn ties_break_by_ascending_index() {
    let mut registry = PageRegistry::new(6);
    registry.refresh_labels(&[
        PageMeta {
            page: 5,
            timestamp: 200,
            empty: false,
        },
        PageMeta {
            page: 1,
            timestamp: 200,
            empty: false,
        },
        PageMeta {
            page: 4,
            timestamp: 900,
            empty: false,
        },
    ]);

    assert_eq!(order(&registry), vec![4, 1, 5, 0, 2, 3]);
    // Deterministic across runs.
    assert_eq!(order(&registry), order(&registry.clone()));
}

#[test]
fn empty_or_unknown_remote_pages_have_no_freshness() {
    let mut registry = PageRegistry::new(4);
    registry.mark_saved(0, 50, false);
    registry.refresh_labels(&[
        PageMeta {
            page: 1,
            timestamp: 300,
            empty: true,
        },
        PageMeta {
            page: 9,
            timestamp: 400,
            empty: false,
        },
    ]);

    for index in 0..4 {
        assert_eq!(registry.freshness(index), Some(0));
    }
    assert_eq!(registry.freshness(9), None);
}

#[test]
fn saving_and_clearing_update_one_slot() {
    let mut registry = PageRegistry::new(4);
    registry.mark_saved(2, 1_000, false);
    registry.mark_saved(1, 2_000, true);
    assert_eq!(registry.freshness(2), Some(1_000));
    assert_eq!(registry.freshness(1), Some(0));

    registry.clear(2);
    assert_eq!(registry.freshness(2), Some(0));
    assert_eq!(order(&registry), vec![0, 1, 2, 3]);
}
