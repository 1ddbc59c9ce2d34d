use crate::db::bank::{bank_exists, now};
use crate::error::StoreError;
use crate::models::{CandidateQuestion, QuestionType};
use rusqlite::types::Type;
use rusqlite::Connection;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredQuestion {
    pub id: String,
    pub bank_id: String,
    pub kind: QuestionType,
    pub content: String,
    pub options: Vec<String>,
    pub answer: String,
    pub explanation: String,
    pub display_order: usize,
    pub created_at: u64,
}

/// Inserts every question into `bank_id` in one transaction and bumps the
/// bank's question count. Returns the number of rows inserted.
pub fn insert_questions(
    conn: &mut Connection,
    bank_id: &str,
    questions: &[CandidateQuestion],
) -> Result<usize, StoreError> {
    let tx = conn.transaction()?;

    if !bank_exists(&tx, bank_id)? {
        return Err(StoreError::BankNotFound {
            bank_id: bank_id.to_string(),
        });
    }

    let created_at = now();
    let start_order: usize = tx.query_row(
        "SELECT COUNT(*) FROM questions WHERE bank_id = ?",
        [bank_id],
        |row| row.get(0),
    )?;

    let mut inserted = 0;
    {
        let mut stmt = tx.prepare(
            "INSERT INTO questions (id, bank_id, kind, content, options, answer, explanation, display_order, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )?;

        for (index, question) in questions.iter().enumerate() {
            let options_json = serde_json::to_string(&question.options())?;
            inserted += stmt.execute(rusqlite::params![
                question.id,
                bank_id,
                question.kind().as_str(),
                question.content,
                options_json,
                question.answer_letters(),
                question.explanation,
                start_order + index,
                created_at
            ])?;
        }
    }

    tx.execute(
        "UPDATE banks SET question_count = question_count + ?, updated_at = ? WHERE id = ?",
        rusqlite::params![inserted, created_at, bank_id],
    )?;

    tx.commit()?;

    Ok(inserted)
}

pub fn load_questions(conn: &Connection, bank_id: &str) -> rusqlite::Result<Vec<StoredQuestion>> {
    let mut stmt = conn.prepare(
        "SELECT id, bank_id, kind, content, options, answer, explanation, display_order, created_at
         FROM questions WHERE bank_id = ? ORDER BY display_order",
    )?;

    let questions = stmt
        .query_map([bank_id], |row| {
            let kind: String = row.get(2)?;
            let kind = QuestionType::from_token(&kind)
                .ok_or_else(|| rusqlite::Error::InvalidColumnType(2, "kind".to_string(), Type::Text))?;
            let options: String = row.get(4)?;
            let options: Vec<String> = serde_json::from_str(&options)
                .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e)))?;

            Ok(StoredQuestion {
                id: row.get(0)?,
                bank_id: row.get(1)?,
                kind,
                content: row.get(3)?,
                options,
                answer: row.get(5)?,
                explanation: row.get(6)?,
                display_order: row.get(7)?,
                created_at: row.get(8)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(questions)
}
