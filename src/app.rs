use crate::config::Config;
use crate::csv::{get_csv_files, load_csv};
use crate::db::bank::BankSummary;
use crate::error::StoreError;
use crate::import_flow::{handle_import_input, start_import, ImportSession};
use crate::models::AppState;
use crate::store::QuestionStore;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::warn;
use std::path::PathBuf;

pub const FILES_PANEL: usize = 0;
pub const BANKS_PANEL: usize = 1;

pub struct App<S: QuestionStore> {
    pub config: Config,
    pub store: S,
    pub state: AppState,
    pub csv_files: Vec<PathBuf>,
    pub banks: Vec<BankSummary>,
    pub selected_file: usize,
    pub selected_bank: usize,
    pub focused_panel: usize,
    pub input_buffer: String,
    pub status: Option<String>,
    pub import: Option<ImportSession>,
    pub should_quit: bool,
}

impl<S: QuestionStore> App<S> {
    pub fn new(config: Config, store: S) -> Result<Self, StoreError> {
        let mut app = Self {
            config,
            store,
            state: AppState::Menu,
            csv_files: Vec::new(),
            banks: Vec::new(),
            selected_file: 0,
            selected_bank: 0,
            focused_panel: FILES_PANEL,
            input_buffer: String::new(),
            status: None,
            import: None,
            should_quit: false,
        };
        app.refresh()?;
        Ok(app)
    }

    /// Re-reads the import directory and the bank list, keeping selections in range.
    pub fn refresh(&mut self) -> Result<(), StoreError> {
        self.csv_files = get_csv_files(&self.config.import_dir);
        self.banks = self.store.list_banks()?;
        self.selected_file = self.selected_file.min(self.csv_files.len().saturating_sub(1));
        self.selected_bank = self.selected_bank.min(self.banks.len().saturating_sub(1));
        Ok(())
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.state {
            AppState::Menu => self.handle_menu_key(key),
            AppState::NewBank => self.handle_new_bank_key(key),
            AppState::ImportSummary => {
                if let Some(session) = &mut self.import {
                    handle_import_input(session, &mut self.store, key, &mut self.state);
                } else {
                    self.state = AppState::Menu;
                }
                if self.state == AppState::Menu {
                    if let Some(session) = self.import.take()
                        && let Some(outcome) = session.outcome
                    {
                        self.status = Some(outcome.message());
                    }
                    self.refresh_or_report();
                }
            }
        }
    }

    fn handle_menu_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('1') => self.focused_panel = FILES_PANEL,
            KeyCode::Char('2') => self.focused_panel = BANKS_PANEL,
            KeyCode::Tab => self.focused_panel = 1 - self.focused_panel,
            KeyCode::Up => {
                let selected = self.selected_mut();
                *selected = selected.saturating_sub(1);
            }
            KeyCode::Down => {
                let len = if self.focused_panel == FILES_PANEL {
                    self.csv_files.len()
                } else {
                    self.banks.len()
                };
                let selected = self.selected_mut();
                if *selected < len.saturating_sub(1) {
                    *selected += 1;
                }
            }
            KeyCode::Char('n') => {
                self.input_buffer.clear();
                self.state = AppState::NewBank;
            }
            KeyCode::Char('r') => self.refresh_or_report(),
            KeyCode::Enter => self.run_import(),
            _ => {}
        }
    }

    fn handle_new_bank_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.input_buffer.clear();
                self.state = AppState::Menu;
            }
            KeyCode::Backspace => {
                self.input_buffer.pop();
            }
            KeyCode::Char(c) => self.input_buffer.push(c),
            KeyCode::Enter => {
                match self.store.create_bank(&self.input_buffer) {
                    Ok(bank) => {
                        self.status = Some(format!("Created bank \"{}\"", bank.name));
                        self.refresh_or_report();
                        if let Some(index) = self.banks.iter().position(|b| b.id == bank.id) {
                            self.selected_bank = index;
                        }
                        self.focused_panel = BANKS_PANEL;
                    }
                    Err(e) => self.status = Some(format!("Could not create bank: {}", e)),
                }
                self.input_buffer.clear();
                self.state = AppState::Menu;
            }
            _ => {}
        }
    }

    fn selected_mut(&mut self) -> &mut usize {
        if self.focused_panel == FILES_PANEL {
            &mut self.selected_file
        } else {
            &mut self.selected_bank
        }
    }

    fn refresh_or_report(&mut self) {
        if let Err(e) = self.refresh() {
            warn!("refresh failed: {}", e);
            self.status = Some(format!("Could not load banks: {}", e));
        }
    }

    fn run_import(&mut self) {
        let Some(path) = self.csv_files.get(self.selected_file).cloned() else {
            self.status = Some(format!(
                "No CSV files in {}",
                self.config.import_dir.display()
            ));
            return;
        };
        let Some(bank) = self.banks.get(self.selected_bank).cloned() else {
            self.status = Some("Create a bank first (press n)".to_string());
            return;
        };

        let text = match load_csv(&path) {
            Ok(text) => text,
            Err(e) => {
                warn!("could not read {}: {}", path.display(), e);
                self.status = Some(format!("Could not read {}: {}", path.display(), e));
                return;
            }
        };

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        self.status = None;
        self.import = Some(start_import(&mut self.store, &file_name, &text, bank));
        self.state = AppState::ImportSummary;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import_flow::ImportOutcome;
    use crate::store::SqliteStore;
    use std::fs;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn test_app(dir: &std::path::Path) -> App<SqliteStore> {
        let config = Config {
            import_dir: dir.to_path_buf(),
            db_path: dir.join("unused.db"),
            log_path: dir.join("unused.log"),
            error_preview_limit: 5,
        };
        App::new(config, SqliteStore::open_in_memory().unwrap()).unwrap()
    }

    fn type_text(app: &mut App<SqliteStore>, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_create_bank_via_prompt() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut app = test_app(temp_dir.path());

        app.handle_key(key(KeyCode::Char('n')));
        assert_eq!(app.state, AppState::NewBank);
        type_text(&mut app, "Physics");
        app.handle_key(key(KeyCode::Backspace));
        app.handle_key(key(KeyCode::Enter));

        assert_eq!(app.state, AppState::Menu);
        assert_eq!(app.banks.len(), 1);
        assert_eq!(app.banks[0].name, "Physic");
        assert_eq!(app.focused_panel, BANKS_PANEL);
    }

    #[test]
    fn test_import_without_bank_sets_status() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join("q.csv"), "h\nSINGLE,Q,A|B,A").unwrap();
        let mut app = test_app(temp_dir.path());

        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.state, AppState::Menu);
        assert_eq!(app.status.as_deref(), Some("Create a bank first (press n)"));
    }

    #[test]
    fn test_full_partial_import_flow() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(
            temp_dir.path().join("q.csv"),
            "type,content,options,answer\nSINGLE,Q,A|B,A\nESSAY,Q,,A\n",
        )
        .unwrap();
        let mut app = test_app(temp_dir.path());
        app.store.create_bank("Math").unwrap();
        app.refresh().unwrap();

        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.state, AppState::ImportSummary);
        let session = app.import.as_ref().unwrap();
        assert!(session.awaiting_confirmation());
        assert_eq!(session.report.errors.len(), 1);

        app.handle_key(key(KeyCode::Char('y')));
        assert_eq!(
            app.import.as_ref().unwrap().outcome,
            Some(ImportOutcome::Imported(1))
        );

        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.state, AppState::Menu);
        assert!(app.import.is_none());
        assert_eq!(app.status.as_deref(), Some("Imported 1 questions"));
        assert_eq!(app.banks[0].question_count, 1);
    }

    #[test]
    fn test_navigation_stays_in_bounds() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join("a.csv"), "").unwrap();
        fs::write(temp_dir.path().join("b.csv"), "").unwrap();
        let mut app = test_app(temp_dir.path());

        app.handle_key(key(KeyCode::Up));
        assert_eq!(app.selected_file, 0);
        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Down));
        assert_eq!(app.selected_file, 1);

        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Down));
        assert_eq!(app.selected_bank, 0);
    }

    #[test]
    fn test_ctrl_c_quits_from_any_state() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut app = test_app(temp_dir.path());
        app.handle_key(key(KeyCode::Char('n')));
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }
}
