use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEvent};

use crate::config::ConfigDocument;

/// Everything the UI loop reacts to: terminal input, ticks, and replies
/// from the privileged side.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Tick,
    /// Terminal size changed; the next draw picks up the new area.
    Resize,
    ConfigLoaded(Result<ConfigDocument, String>),
    SaveFinished(Result<(), String>),
    EnvVarRead {
        name: String,
        value: String,
    },
    /// `Ok` carries the shell profile that was edited, if any.
    EnvVarWritten {
        name: String,
        result: Result<Option<PathBuf>, String>,
    },
}

pub struct EventHandler {
    rx: Receiver<AppEvent>,
    tx: mpsc::Sender<AppEvent>,
}

impl EventHandler {
    /// Start the input thread. It exits once the handler is dropped.
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        let event_tx = tx.clone();

        let spawned = thread::Builder::new()
            .name("input".to_string())
            .spawn(move || input_loop(event_tx, tick_rate));
        if let Err(err) = spawned {
            tracing::error!(target: "events", error = %err, "failed to spawn input thread");
        }

        Self { rx, tx }
    }

    pub fn next(&self, timeout: Duration) -> Result<AppEvent, mpsc::RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }

    pub fn sender(&self) -> mpsc::Sender<AppEvent> {
        self.tx.clone()
    }
}

fn input_loop(tx: mpsc::Sender<AppEvent>, tick_rate: Duration) {
    let mut last_tick = Instant::now();
    loop {
        // Short poll so a dropped receiver is noticed quickly.
        let timeout = tick_rate
            .saturating_sub(last_tick.elapsed())
            .min(Duration::from_millis(50));

        let forwarded = match event::poll(timeout) {
            Ok(true) => match event::read() {
                Ok(Event::Key(key)) => Some(AppEvent::Key(key)),
                Ok(Event::Resize(_, _)) => Some(AppEvent::Resize),
                Ok(_) => None,
                Err(err) => {
                    tracing::error!(target: "events", error = %err, "terminal read failed");
                    break;
                }
            },
            Ok(false) => None,
            Err(err) => {
                tracing::error!(target: "events", error = %err, "terminal poll failed");
                break;
            }
        };

        if let Some(event) = forwarded {
            if tx.send(event).is_err() {
                break;
            }
        }

        if last_tick.elapsed() >= tick_rate {
            if tx.send(AppEvent::Tick).is_err() {
                break;
            }
            last_tick = Instant::now();
        }
    }
}
