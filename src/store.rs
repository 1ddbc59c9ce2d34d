use crate::db;
use crate::db::bank::BankSummary;
use crate::db::question::StoredQuestion;
use crate::error::StoreError;
use crate::models::CandidateQuestion;
use log::{info, warn};
use rusqlite::Connection;
use std::path::Path;

/// Data access the import flow and UI depend on. Passed in explicitly so the
/// flow can run against any backing store.
pub trait QuestionStore {
    fn list_banks(&self) -> Result<Vec<BankSummary>, StoreError>;

    fn create_bank(&mut self, name: &str) -> Result<BankSummary, StoreError>;

    /// Inserts the whole batch into `bank_id` or nothing at all.
    fn bulk_insert(
        &mut self,
        bank_id: &str,
        questions: &[CandidateQuestion],
    ) -> Result<usize, StoreError>;

    fn load_questions(&self, bank_id: &str) -> Result<Vec<StoredQuestion>, StoreError>;
}

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = db::init_db(path)?;
        info!("opened question store at {}", path.display());
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        db::run_migrations(&conn)?;
        Ok(Self { conn })
    }
}

impl QuestionStore for SqliteStore {
    fn list_banks(&self) -> Result<Vec<BankSummary>, StoreError> {
        Ok(db::bank::list_banks(&self.conn)?)
    }

    fn create_bank(&mut self, name: &str) -> Result<BankSummary, StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::EmptyBankName);
        }
        let bank = db::bank::create_bank(&self.conn, name)?;
        info!("created bank {} ({})", bank.name, bank.id);
        Ok(bank)
    }

    fn bulk_insert(
        &mut self,
        bank_id: &str,
        questions: &[CandidateQuestion],
    ) -> Result<usize, StoreError> {
        match db::question::insert_questions(&mut self.conn, bank_id, questions) {
            Ok(count) => {
                info!("inserted {} questions into bank {}", count, bank_id);
                Ok(count)
            }
            Err(e) => {
                warn!("bulk insert into bank {} failed: {}", bank_id, e);
                Err(e)
            }
        }
    }

    fn load_questions(&self, bank_id: &str) -> Result<Vec<StoredQuestion>, StoreError> {
        Ok(db::question::load_questions(&self.conn, bank_id)?)
    }
}
