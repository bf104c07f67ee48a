use notebook_core::{Notification, PanelView};

/// Text rendition of the panel: title, controls, then the page dropdown.
pub fn render(view: &PanelView, strokes: usize) -> Vec<String> {
    let mut lines = Vec::with_capacity(view.entries.len() + 3);
    let state = if view.controls_disabled { "busy" } else { "ready" };
    lines.push(format!("== {} [{state}] ==", view.title));

    let tool = if view.eraser { "Eraser" } else { "Pen" };
    let delete = if view.delete_prompt {
        "Tap to confirm"
    } else {
        "Delete"
    };
    lines.push(format!("tool: {tool} | {delete} | strokes: {strokes}"));

    for entry in &view.entries {
        let marker = if entry.index == view.selected { '>' } else { ' ' };
        lines.push(format!("{marker} {}", entry.label));
    }
    lines
}

pub fn render_notification(notification: &Notification) -> String {
    format!("! {}: {}", notification.title, notification.body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use notebook_core::PageEntryView;

    #[test]
    fn marks_selected_page_and_prompt() {
        let view = PanelView {
            title: "App 100".to_string(),
            controls_disabled: true,
            entries: vec![
                PageEntryView {
                    index: 2,
                    label: "Page 2 - 5m ago".to_string(),
                    timestamp: 10,
                },
                PageEntryView {
                    index: 0,
                    label: "Page 0 - Empty".to_string(),
                    timestamp: 0,
                },
            ],
            selected: 2,
            delete_prompt: true,
            eraser: false,
        };

        assert_eq!(
            render(&view, 3),
            vec![
                "== App 100 [busy] ==".to_string(),
                "tool: Pen | Tap to confirm | strokes: 3".to_string(),
                "> Page 2 - 5m ago".to_string(),
                "  Page 0 - Empty".to_string(),
            ]
        );
    }

    #[test]
    fn notifications_are_prefixed() {
        let line = render_notification(&Notification::error("loadPage timed out after 6000ms"));
        assert_eq!(line, "! Notebook Error: loadPage timed out after 6000ms");
    }
}
