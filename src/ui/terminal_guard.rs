use crossterm::cursor::{Hide, Show};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, Clear as TermClear, ClearType, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use parking_lot::Mutex;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::sync::Arc;

type Restore = Box<dyn FnOnce() + Send + 'static>;

/// Puts the terminal back into cooked mode exactly once, on drop or on panic.
pub struct TerminalGuard {
    restore: Arc<Mutex<Option<Restore>>>,
}

impl TerminalGuard {
    fn install<F: FnOnce() + Send + 'static>(restore: F) -> Self {
        let slot: Arc<Mutex<Option<Restore>>> = Arc::new(Mutex::new(Some(Box::new(restore))));
        let hook_slot = Arc::clone(&slot);
        let default_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            run_once(&hook_slot);
            default_hook(info);
        }));
        Self { restore: slot }
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        run_once(&self.restore);
    }
}

fn run_once(slot: &Mutex<Option<Restore>>) {
    let restore = slot.lock().take();
    if let Some(restore) = restore {
        restore();
    }
}

fn restore_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = stdout.execute(LeaveAlternateScreen);
    let _ = stdout.execute(Show);
}

pub fn setup_terminal() -> io::Result<(Terminal<CrosstermBackend<Stdout>>, TerminalGuard)> {
    enable_raw_mode()?;
    let guard = TerminalGuard::install(restore_terminal);

    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(TermClear(ClearType::All))?;
    stdout.execute(Hide)?;

    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    Ok((terminal, guard))
}
