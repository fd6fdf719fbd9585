use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::storage::FileStorage;
use crate::store::TaskListStore;

use super::input;
use super::render;
use super::theme::Theme;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    Insert,
}

/// Main application state
pub struct App {
    pub store: TaskListStore,
    pub mode: Mode,
    pub should_quit: bool,
    pub theme: Theme,
    /// Cursor index into the task list
    pub cursor: usize,
    /// First visible row of the list
    pub scroll_offset: usize,
    /// Insert mode: text being typed
    pub input: String,
    /// Insert mode: byte offset of the cursor within `input`
    pub input_cursor: usize,
    /// Last failed save, shown on the status row
    pub save_error: Option<String>,
}

impl App {
    pub fn new(store: TaskListStore) -> Self {
        App {
            store,
            mode: Mode::Navigate,
            should_quit: false,
            theme: Theme::default(),
            cursor: 0,
            scroll_offset: 0,
            input: String::new(),
            input_cursor: 0,
            save_error: None,
        }
    }

    /// Id of the task under the cursor
    pub fn cursor_task_id(&self) -> Option<u64> {
        self.store.tasks().get(self.cursor).map(|t| t.id)
    }

    /// Keep the cursor inside the list after a removal
    pub fn clamp_cursor(&mut self) {
        let len = self.store.tasks().len();
        if len == 0 {
            self.cursor = 0;
        } else if self.cursor >= len {
            self.cursor = len - 1;
        }
    }

    /// Persist after a mutation. A failed write becomes a status message;
    /// the in-memory list stays authoritative.
    pub fn commit(&mut self) {
        self.save_error = match self.store.save() {
            Ok(()) => None,
            Err(e) => Some(e.to_string()),
        };
    }
}

/// Run the TUI application
pub fn run(dir: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let dir = match dir {
        Some(d) => PathBuf::from(d),
        None => std::env::current_dir()?,
    };

    let mut store = TaskListStore::new(Box::new(FileStorage::new(dir)));
    store.load();
    let mut app = App::new(store);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
