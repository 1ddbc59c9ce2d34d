pub mod app;
pub mod config;
pub mod csv;
pub mod db;
pub mod error;
pub mod import_flow;
pub mod importer;
pub mod logger;
pub mod models;
pub mod store;
pub mod ui;
pub mod utils;

// Re-exports for convenience
pub use app::App;
pub use config::Config;
pub use csv::{get_csv_files, load_csv, parse_csv_line, split_data_records};
pub use error::{AppError, StoreError};
pub use import_flow::{commit, start_import, ImportDecision, ImportOutcome, ImportSession};
pub use importer::{parse_and_validate, parse_and_validate_with, ImportReport, RowError, RowErrorKind};
pub use models::{AppState, CandidateQuestion, JudgeAnswer, QuestionBody, QuestionType};
pub use store::{QuestionStore, SqliteStore};
pub use ui::{draw_import_summary, draw_menu, draw_new_bank_prompt};
