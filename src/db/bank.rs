use rusqlite::{Connection, OptionalExtension, Result};
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankSummary {
    pub id: String,
    pub name: String,
    pub question_count: usize,
    pub created_at: u64,
}

pub(crate) fn now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

pub fn create_bank(conn: &Connection, name: &str) -> Result<BankSummary> {
    let id = uuid::Uuid::new_v4().to_string();
    let created_at = now();

    conn.execute(
        "INSERT INTO banks (id, name, question_count, created_at, updated_at)
         VALUES (?, ?, 0, ?, ?)",
        rusqlite::params![id, name, created_at, created_at],
    )?;

    Ok(BankSummary {
        id,
        name: name.to_string(),
        question_count: 0,
        created_at,
    })
}

pub fn get_bank(conn: &Connection, id: &str) -> Result<Option<BankSummary>> {
    conn.query_row(
        "SELECT id, name, question_count, created_at FROM banks WHERE id = ?",
        [id],
        |row| {
            Ok(BankSummary {
                id: row.get(0)?,
                name: row.get(1)?,
                question_count: row.get(2)?,
                created_at: row.get(3)?,
            })
        },
    )
    .optional()
}

pub fn list_banks(conn: &Connection) -> Result<Vec<BankSummary>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, question_count, created_at
         FROM banks ORDER BY created_at DESC, name",
    )?;

    let banks = stmt
        .query_map([], |row| {
            Ok(BankSummary {
                id: row.get(0)?,
                name: row.get(1)?,
                question_count: row.get(2)?,
                created_at: row.get(3)?,
            })
        })?
        .collect::<Result<Vec<_>>>()?;

    Ok(banks)
}

pub fn bank_exists(conn: &Connection, id: &str) -> Result<bool> {
    conn.query_row("SELECT 1 FROM banks WHERE id = ?", [id], |_| Ok(()))
        .optional()
        .map(|found| found.is_some())
}
