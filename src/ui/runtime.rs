use crate::autosave::SaveScheduler;
use crate::config::ConfigStore;
use crate::env::EnvWriter;
use crate::error::ManagerError;
use crate::ipc::{IpcClient, IpcError, IpcLayer};
use crate::ui::app::{App, UiCommand};
use crate::ui::events::{AppEvent, EventHandler};
use crate::ui::i18n::Lang;
use crate::ui::input::handle_key;
use crate::ui::render::draw;
use crate::ui::terminal_guard::setup_terminal;
use std::io;
use std::path::PathBuf;
use std::sync::mpsc as std_mpsc;
use std::time::Duration;
use tokio::sync::mpsc;

const TICK_RATE: Duration = Duration::from_millis(250);
const UI_COMMAND_BUFFER: usize = 32;

pub struct RuntimeOptions {
    pub config_path: PathBuf,
    pub debounce: Duration,
    pub lang: Lang,
}

/// Run the editor until the user quits.
///
/// The privileged side (config store and environment writer) runs as a task
/// on a private tokio runtime; the UI loop stays on the calling thread.
pub fn run(options: RuntimeOptions) -> io::Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .thread_name("ipc")
        .enable_all()
        .build()?;

    let store = ConfigStore::new(options.config_path);
    let env_writer = match EnvWriter::from_env() {
        Ok(writer) => Some(writer),
        Err(err) => {
            tracing::warn!(target: "ui", error = %err, "environment writer unavailable");
            None
        }
    };
    let (client, server) = IpcLayer::new();
    runtime.spawn(server.run(store, env_writer));

    let events = EventHandler::new(TICK_RATE);
    let (ui_tx, ui_rx) = mpsc::channel(UI_COMMAND_BUFFER);
    let bridge = runtime.spawn(ui_command_loop(client, ui_rx, events.sender()));

    let mut app = App::new(options.lang);
    app.set_ipc_sender(ui_tx.clone());
    app.set_autosave(SaveScheduler::start(options.debounce, move |document| {
        if ui_tx
            .blocking_send(UiCommand::SaveConfig { document })
            .is_err()
        {
            tracing::warn!(target: "autosave", "UI command channel closed; save dropped");
        }
    }));
    app.request_config_load();

    let (mut terminal, guard) = setup_terminal()?;
    let result = event_loop(&mut terminal, &mut app, &events);

    // Dropping the app flushes a pending save into the bridge; wait for the
    // bridge to drain so the write lands before the runtime shuts down.
    drop(app);
    if let Err(err) = runtime.block_on(bridge) {
        tracing::error!(target: "ui", error = %err, "UI command bridge failed");
    }
    drop(guard);
    result
}

fn event_loop(
    terminal: &mut ratatui::Terminal<ratatui::backend::CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> io::Result<()> {
    loop {
        terminal.draw(|frame| draw(frame, app))?;
        if app.should_quit() {
            return Ok(());
        }

        match events.next(TICK_RATE) {
            Ok(AppEvent::Key(key)) => handle_key(app, key),
            Ok(AppEvent::Tick) => app.on_tick(),
            Ok(AppEvent::Resize) => {}
            Ok(AppEvent::ConfigLoaded(result)) => app.on_config_loaded(result),
            Ok(AppEvent::SaveFinished(result)) => app.on_save_finished(result),
            Ok(AppEvent::EnvVarRead { name, value }) => app.on_env_var_read(&name, &value),
            Ok(AppEvent::EnvVarWritten { name, result }) => app.on_env_var_written(name, result),
            Err(std_mpsc::RecvTimeoutError::Timeout) => {}
            Err(std_mpsc::RecvTimeoutError::Disconnected) => return Ok(()),
        }
    }
}

/// Forward UI commands to the privileged side one at a time and post the
/// replies back as events. Sequential handling keeps saves in order.
async fn ui_command_loop(
    client: IpcClient,
    mut commands: mpsc::Receiver<UiCommand>,
    events: std_mpsc::Sender<AppEvent>,
) {
    while let Some(command) = commands.recv().await {
        let event = match command {
            UiCommand::LoadConfig => AppEvent::ConfigLoaded(into_message(client.get_config().await)),
            UiCommand::SaveConfig { document } => {
                AppEvent::SaveFinished(into_message(client.save_config(document).await))
            }
            UiCommand::GetEnvVar { name } => {
                let value = match client.get_env_var(name.clone()).await {
                    Ok(value) => value,
                    Err(err) => {
                        tracing::warn!(target: "ipc", error = %err, "get-env-var failed");
                        String::new()
                    }
                };
                AppEvent::EnvVarRead { name, value }
            }
            UiCommand::SetEnvVar { name, value } => {
                let result = into_message(client.set_env_var(name.clone(), value).await)
                    .map(|outcome| outcome.profile_path);
                AppEvent::EnvVarWritten { name, result }
            }
        };
        // The UI may already be gone at shutdown; keep draining so saves land.
        let _ = events.send(event);
    }
}

/// Collapse a remote reply into the `{error: message}` shape the UI shows.
fn into_message<T>(reply: Result<Result<T, ManagerError>, IpcError>) -> Result<T, String> {
    match reply {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => Err(err.user_message()),
        Err(err) => Err(err.to_string()),
    }
}
