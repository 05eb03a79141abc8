//! Debounced auto-save.
//!
//! Holds at most one pending write. Every `schedule` replaces the pending
//! snapshot and restarts the quiescence timer, so a burst of edits produces a
//! single write of the last document. Before the snapshot leaves the
//! scheduler, the API-key convention is applied.

use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use crate::config::ConfigDocument;
use crate::document::apply_api_key_convention;

/// Quiescence window used by the editor.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

enum SchedulerMsg {
    Schedule(ConfigDocument),
    Flush,
    Cancel,
}

/// Pending-write scheduler running on its own thread.
///
/// Dropping the scheduler writes any pending snapshot before the thread exits.
pub struct SaveScheduler {
    sender: Option<mpsc::Sender<SchedulerMsg>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl SaveScheduler {
    /// Start the scheduler. `sink` receives each document that is due.
    pub fn start<F>(debounce: Duration, sink: F) -> Self
    where
        F: FnMut(ConfigDocument) + Send + 'static,
    {
        let (sender, receiver) = mpsc::channel();
        let handle = thread::Builder::new()
            .name("autosave".to_string())
            .spawn(move || debounce_loop(receiver, debounce, sink))
            .map_err(|err| {
                tracing::error!(target: "autosave", error = %err, "failed to spawn autosave thread");
            })
            .ok();

        Self {
            sender: Some(sender),
            handle,
        }
    }

    /// Replace the pending snapshot and restart the timer.
    pub fn schedule(&self, doc: ConfigDocument) {
        self.send(SchedulerMsg::Schedule(doc));
    }

    /// Write the pending snapshot now, if there is one.
    pub fn flush(&self) {
        self.send(SchedulerMsg::Flush);
    }

    /// Drop the pending snapshot without writing it.
    pub fn cancel(&self) {
        self.send(SchedulerMsg::Cancel);
    }

    fn send(&self, msg: SchedulerMsg) {
        if let Some(sender) = &self.sender {
            if sender.send(msg).is_err() {
                tracing::warn!(target: "autosave", "autosave thread is gone");
            }
        }
    }
}

impl Drop for SaveScheduler {
    fn drop(&mut self) {
        // Closing the channel makes the loop flush and exit.
        self.sender.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn debounce_loop<F>(rx: mpsc::Receiver<SchedulerMsg>, debounce: Duration, mut sink: F)
where
    F: FnMut(ConfigDocument),
{
    let mut pending: Option<(ConfigDocument, Instant)> = None;

    loop {
        let received = match &pending {
            Some((_, due)) => rx.recv_timeout(due.saturating_duration_since(Instant::now())),
            None => rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };

        match received {
            Ok(SchedulerMsg::Schedule(doc)) => {
                pending = Some((doc, Instant::now() + debounce));
            }
            Ok(SchedulerMsg::Flush) => {
                if let Some((doc, _)) = pending.take() {
                    write(&mut sink, doc);
                }
            }
            Ok(SchedulerMsg::Cancel) => {
                if pending.take().is_some() {
                    tracing::debug!(target: "autosave", "pending write cancelled");
                }
            }
            Err(RecvTimeoutError::Timeout) => {
                if let Some((doc, due)) = pending.take() {
                    if Instant::now() >= due {
                        write(&mut sink, doc);
                    } else {
                        pending = Some((doc, due));
                    }
                }
            }
            Err(RecvTimeoutError::Disconnected) => {
                if let Some((doc, _)) = pending.take() {
                    write(&mut sink, doc);
                }
                break;
            }
        }
    }
}

fn write<F>(sink: &mut F, doc: ConfigDocument)
where
    F: FnMut(ConfigDocument),
{
    tracing::debug!(target: "autosave", providers = doc.providers.len(), "writing snapshot");
    sink(apply_api_key_convention(&doc));
}
