use crate::db::bank::BankSummary;
use crate::error::StoreError;
use crate::importer::{parse_and_validate, ImportReport};
use crate::models::AppState;
use crate::store::QuestionStore;
use crossterm::event::{KeyCode, KeyEvent};
use log::{info, warn};

/// What the caller should do with a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportDecision {
    /// No data rows at all.
    Nothing,
    /// Every row failed; nothing is inserted.
    Rejected,
    /// Some rows failed; the user must confirm importing the rest.
    NeedsConfirmation,
    /// Every row passed.
    Ready,
}

impl ImportDecision {
    pub fn from_report(report: &ImportReport) -> Self {
        match (report.accepted.is_empty(), report.errors.is_empty()) {
            (true, true) => ImportDecision::Nothing,
            (true, false) => ImportDecision::Rejected,
            (false, false) => ImportDecision::NeedsConfirmation,
            (false, true) => ImportDecision::Ready,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    Imported(usize),
    Cancelled,
    NothingToImport,
    Rejected,
    Failed(String),
}

impl ImportOutcome {
    pub fn message(&self) -> String {
        match self {
            ImportOutcome::Imported(count) => format!("Imported {} questions", count),
            ImportOutcome::Cancelled => "Import cancelled".to_string(),
            ImportOutcome::NothingToImport => "Nothing to import".to_string(),
            ImportOutcome::Rejected => "Import failed: no valid rows".to_string(),
            ImportOutcome::Failed(error) => format!("Import failed: {}", error),
        }
    }
}

/// Hands the accepted batch to the store in a single call.
pub fn commit<S: QuestionStore + ?Sized>(
    store: &mut S,
    bank_id: &str,
    report: &ImportReport,
) -> Result<usize, StoreError> {
    store.bulk_insert(bank_id, &report.accepted)
}

#[derive(Debug)]
pub struct ImportSession {
    pub file_name: String,
    pub bank: BankSummary,
    pub report: ImportReport,
    pub decision: ImportDecision,
    pub outcome: Option<ImportOutcome>,
}

impl ImportSession {
    pub fn awaiting_confirmation(&self) -> bool {
        self.decision == ImportDecision::NeedsConfirmation && self.outcome.is_none()
    }

    fn finish<S: QuestionStore + ?Sized>(&mut self, store: &mut S) {
        let outcome = match commit(store, &self.bank.id, &self.report) {
            Ok(count) => ImportOutcome::Imported(count),
            Err(e) => {
                warn!("import of {} failed: {}", self.file_name, e);
                ImportOutcome::Failed(e.to_string())
            }
        };
        self.outcome = Some(outcome);
    }
}

/// Validates `text` against `bank` and applies the import policy: a clean
/// file is inserted at once, a partially bad one waits for confirmation.
pub fn start_import<S: QuestionStore + ?Sized>(
    store: &mut S,
    file_name: &str,
    text: &str,
    bank: BankSummary,
) -> ImportSession {
    let report = parse_and_validate(text, &bank.id);
    let decision = ImportDecision::from_report(&report);
    info!("{} -> {}: {:?}", file_name, bank.name, decision);

    let mut session = ImportSession {
        file_name: file_name.to_string(),
        bank,
        report,
        decision,
        outcome: None,
    };

    match decision {
        ImportDecision::Nothing => session.outcome = Some(ImportOutcome::NothingToImport),
        ImportDecision::Rejected => session.outcome = Some(ImportOutcome::Rejected),
        ImportDecision::Ready => session.finish(store),
        ImportDecision::NeedsConfirmation => {}
    }

    session
}

pub fn handle_import_input<S: QuestionStore + ?Sized>(
    session: &mut ImportSession,
    store: &mut S,
    key: KeyEvent,
    app_state: &mut AppState,
) {
    if session.awaiting_confirmation() {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => session.finish(store),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                session.outcome = Some(ImportOutcome::Cancelled);
            }
            _ => {}
        }
    } else {
        match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char('m') => *app_state = AppState::Menu,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::question::StoredQuestion;
    use crate::models::CandidateQuestion;
    use crate::store::SqliteStore;
    use crossterm::event::KeyModifiers;

    /// Store double that records every bulk insert.
    #[derive(Default)]
    struct RecordingStore {
        inserts: Vec<(String, usize)>,
        fail: bool,
    }

    impl QuestionStore for RecordingStore {
        fn list_banks(&self) -> Result<Vec<BankSummary>, StoreError> {
            Ok(vec![])
        }

        fn create_bank(&mut self, _name: &str) -> Result<BankSummary, StoreError> {
            Err(StoreError::EmptyBankName)
        }

        fn bulk_insert(
            &mut self,
            bank_id: &str,
            questions: &[CandidateQuestion],
        ) -> Result<usize, StoreError> {
            if self.fail {
                return Err(StoreError::BankNotFound {
                    bank_id: bank_id.to_string(),
                });
            }
            self.inserts.push((bank_id.to_string(), questions.len()));
            Ok(questions.len())
        }

        fn load_questions(&self, _bank_id: &str) -> Result<Vec<StoredQuestion>, StoreError> {
            Ok(vec![])
        }
    }

    fn bank() -> BankSummary {
        BankSummary {
            id: "bank-1".to_string(),
            name: "Math".to_string(),
            question_count: 0,
            created_at: 0,
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    const MIXED: &str = "h\nSINGLE,Q,A|B,A\nESSAY,Q,,A";

    #[test]
    fn test_decision_table() {
        let mut report = ImportReport::default();
        assert_eq!(ImportDecision::from_report(&report), ImportDecision::Nothing);

        report = parse_and_validate("h\nESSAY,Q,,A", "b");
        assert_eq!(ImportDecision::from_report(&report), ImportDecision::Rejected);

        report = parse_and_validate(MIXED, "b");
        assert_eq!(
            ImportDecision::from_report(&report),
            ImportDecision::NeedsConfirmation
        );

        report = parse_and_validate("h\nSINGLE,Q,A|B,A", "b");
        assert_eq!(ImportDecision::from_report(&report), ImportDecision::Ready);
    }

    #[test]
    fn test_clean_file_imports_immediately() {
        let mut store = RecordingStore::default();
        let session = start_import(&mut store, "math.csv", "h\nSINGLE,Q,A|B,A\nJUDGE,J,,B", bank());
        assert_eq!(session.outcome, Some(ImportOutcome::Imported(2)));
        assert_eq!(store.inserts, vec![("bank-1".to_string(), 2)]);
    }

    #[test]
    fn test_all_rows_bad_never_inserts() {
        let mut store = RecordingStore::default();
        let session = start_import(&mut store, "bad.csv", "h\nESSAY,Q,,A", bank());
        assert_eq!(session.outcome, Some(ImportOutcome::Rejected));
        assert!(store.inserts.is_empty());
    }

    #[test]
    fn test_header_only_is_nothing_to_import() {
        let mut store = RecordingStore::default();
        let session = start_import(&mut store, "empty.csv", "type,content", bank());
        assert_eq!(session.outcome, Some(ImportOutcome::NothingToImport));
        assert!(store.inserts.is_empty());
    }

    #[test]
    fn test_partial_import_confirmed() {
        let mut store = RecordingStore::default();
        let mut app_state = AppState::ImportSummary;
        let mut session = start_import(&mut store, "mixed.csv", MIXED, bank());
        assert!(session.awaiting_confirmation());
        assert!(store.inserts.is_empty());

        // unrelated keys do nothing while waiting
        handle_import_input(&mut session, &mut store, key(KeyCode::Enter), &mut app_state);
        assert!(session.awaiting_confirmation());
        assert_eq!(app_state, AppState::ImportSummary);

        handle_import_input(&mut session, &mut store, key(KeyCode::Char('y')), &mut app_state);
        assert_eq!(session.outcome, Some(ImportOutcome::Imported(1)));
        assert_eq!(store.inserts.len(), 1);

        handle_import_input(&mut session, &mut store, key(KeyCode::Enter), &mut app_state);
        assert_eq!(app_state, AppState::Menu);
    }

    #[test]
    fn test_partial_import_cancelled() {
        let mut store = RecordingStore::default();
        let mut app_state = AppState::ImportSummary;
        let mut session = start_import(&mut store, "mixed.csv", MIXED, bank());

        handle_import_input(&mut session, &mut store, key(KeyCode::Char('n')), &mut app_state);
        assert_eq!(session.outcome, Some(ImportOutcome::Cancelled));
        assert!(store.inserts.is_empty());
    }

    #[test]
    fn test_store_failure_surfaces_as_failed() {
        let mut store = RecordingStore {
            fail: true,
            ..Default::default()
        };
        let session = start_import(&mut store, "math.csv", "h\nSINGLE,Q,A|B,A", bank());
        match session.outcome {
            Some(ImportOutcome::Failed(message)) => {
                assert!(message.contains("bank-1"));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_import_into_sqlite_store() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let bank = store.create_bank("Science").unwrap();
        let bank_id = bank.id.clone();

        let session = start_import(&mut store, "sci.csv", "h\nJUDGE,Water boils at 100C,,A", bank);
        assert_eq!(session.outcome, Some(ImportOutcome::Imported(1)));
        assert_eq!(store.load_questions(&bank_id).unwrap().len(), 1);
    }

    #[test]
    fn test_outcome_messages() {
        assert_eq!(ImportOutcome::Imported(3).message(), "Imported 3 questions");
        assert_eq!(ImportOutcome::Cancelled.message(), "Import cancelled");
    }
}
