use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{error, info};
use question_bank::{
    draw_import_summary, draw_menu, draw_new_bank_prompt, logger, App, AppError, AppState,
    Config, SqliteStore,
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use std::io;

type Tui = Terminal<CrosstermBackend<io::Stdout>>;

fn render(f: &mut Frame, app: &App<SqliteStore>) {
    match app.state {
        AppState::Menu => draw_menu(f, app),
        AppState::NewBank => {
            draw_menu(f, app);
            draw_new_bank_prompt(f, &app.input_buffer);
        }
        AppState::ImportSummary => {
            if let Some(session) = &app.import {
                draw_import_summary(f, session, app.config.error_preview_limit);
            }
        }
    }
}

fn run(terminal: &mut Tui, app: &mut App<SqliteStore>) -> io::Result<()> {
    while !app.should_quit {
        terminal.draw(|f| render(f, app))?;

        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            app.handle_key(key);
        }
    }
    Ok(())
}

fn main() -> Result<(), AppError> {
    let config = Config::from_env()?;
    logger::init(&config.log_path)?;
    info!("starting with import dir {}", config.import_dir.display());

    let store = SqliteStore::open(&config.db_path)?;
    let mut app = App::new(config, store)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        error!("terminal loop failed: {}", e);
    }
    Ok(result?)
}
