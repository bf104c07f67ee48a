//! Line-oriented host driver reading commands from stdin.
//!
//! Commands:
//! `focus <appid> <pid> [exe]`, `select <page>`, `stroke <x,y> ...`, `erase`, `delete`,
//! `show`, `quit`.

use std::io::{self, BufRead};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;

use notebook_core::{FocusEvent, PageIndex, Point};
use notebook_logging::{notebook_info, notebook_warn};

#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    Focus(FocusEvent),
    Select(PageIndex),
    Stroke(Vec<Point>),
    ToggleEraser,
    Delete,
    Show,
    Quit,
}

pub fn parse_command(line: &str) -> Result<Option<HostEvent>, String> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(None);
    };
    let event = match command {
        "focus" => {
            let appid = parse_number(words.next(), "appid")?;
            let pid = parse_number(words.next(), "pid")?;
            let exe_name = words.next().unwrap_or_default().to_string();
            HostEvent::Focus(FocusEvent {
                appid,
                pid,
                exe_name,
                window_id: 0,
            })
        }
        "select" => HostEvent::Select(parse_number(words.next(), "page")?),
        "stroke" => {
            let points = words.map(parse_point).collect::<Result<Vec<_>, _>>()?;
            if points.is_empty() {
                return Err("stroke needs at least one x,y point".to_string());
            }
            HostEvent::Stroke(points)
        }
        "erase" => HostEvent::ToggleEraser,
        "delete" => HostEvent::Delete,
        "show" => HostEvent::Show,
        "quit" | "exit" => HostEvent::Quit,
        other => return Err(format!("unknown command '{other}'")),
    };
    Ok(Some(event))
}

fn parse_number<T: std::str::FromStr>(word: Option<&str>, name: &str) -> Result<T, String> {
    let word = word.ok_or_else(|| format!("missing {name}"))?;
    word.parse()
        .map_err(|_| format!("invalid {name} '{word}'"))
}

fn parse_point(word: &str) -> Result<Point, String> {
    let (x, y) = word
        .split_once(',')
        .ok_or_else(|| format!("invalid point '{word}'"))?;
    let x = x.parse().map_err(|_| format!("invalid point '{word}'"))?;
    let y = y.parse().map_err(|_| format!("invalid point '{word}'"))?;
    Ok(Point { x, y })
}

/// Host event source backed by a stdin reader thread. Focus events are only
/// forwarded while a `FocusSubscription` is alive.
pub struct StdinHost {
    events: mpsc::Receiver<HostEvent>,
    focus_enabled: Arc<AtomicBool>,
}

impl StdinHost {
    pub fn spawn() -> io::Result<Self> {
        let (tx, events) = mpsc::channel();
        let focus_enabled = Arc::new(AtomicBool::new(false));
        let gate = focus_enabled.clone();

        thread::Builder::new()
            .name("notebook-stdin".to_string())
            .spawn(move || {
                let stdin = io::stdin();
                for line in stdin.lock().lines() {
                    let line = match line {
                        Ok(line) => line,
                        Err(err) => {
                            notebook_warn!("stdin read failed: {}", err);
                            break;
                        }
                    };
                    let event = match parse_command(&line) {
                        Ok(Some(event)) => event,
                        Ok(None) => continue,
                        Err(message) => {
                            eprintln!("? {message}");
                            continue;
                        }
                    };
                    if matches!(event, HostEvent::Focus(_)) && !gate.load(Ordering::Acquire) {
                        continue;
                    }
                    if tx.send(event).is_err() {
                        return;
                    }
                }
                let _ = tx.send(HostEvent::Quit);
            })?;

        Ok(Self {
            events,
            focus_enabled,
        })
    }

    pub fn register_for_focus_changes(&self) -> FocusSubscription {
        self.focus_enabled.store(true, Ordering::Release);
        notebook_info!("focus subscription registered");
        FocusSubscription {
            enabled: self.focus_enabled.clone(),
        }
    }

    pub fn try_recv(&self) -> Option<HostEvent> {
        self.events.try_recv().ok()
    }
}

/// Dropping or unregistering stops focus delivery.
pub struct FocusSubscription {
    enabled: Arc<AtomicBool>,
}

impl FocusSubscription {
    pub fn unregister(self) {}
}

impl Drop for FocusSubscription {
    fn drop(&mut self) {
        self.enabled.store(false, Ordering::Release);
        notebook_info!("focus subscription released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_focus_with_optional_exe() {
        assert_eq!(
            parse_command("focus 200 31 game.exe"),
            Ok(Some(HostEvent::Focus(FocusEvent {
                appid: 200,
                pid: 31,
                exe_name: "game.exe".to_string(),
                window_id: 0,
            })))
        );
        assert!(matches!(
            parse_command("focus 0 1"),
            Ok(Some(HostEvent::Focus(FocusEvent { appid: 0, pid: 1, .. })))
        ));
    }

    #[test]
    fn parses_stroke_points() {
        assert_eq!(
            parse_command("stroke 1,2 3.5,4"),
            Ok(Some(HostEvent::Stroke(vec![
                Point { x: 1.0, y: 2.0 },
                Point { x: 3.5, y: 4.0 }
            ])))
        );
        assert!(parse_command("stroke").is_err());
        assert!(parse_command("stroke 1;2").is_err());
    }

    #[test]
    fn blank_and_unknown_lines() {
        assert_eq!(parse_command("   "), Ok(None));
        assert_eq!(parse_command("select 3"), Ok(Some(HostEvent::Select(3))));
        assert!(parse_command("select three").is_err());
        assert!(parse_command("dance").is_err());
    }

    #[test]
    fn subscription_gates_focus_until_dropped() {
        let (_tx, events) = mpsc::channel();
        let host = StdinHost {
            events,
            focus_enabled: Arc::new(AtomicBool::new(false)),
        };
        let subscription = host.register_for_focus_changes();
        assert!(host.focus_enabled.load(Ordering::Acquire));
        subscription.unregister();
        assert!(!host.focus_enabled.load(Ordering::Acquire));
    }
}
