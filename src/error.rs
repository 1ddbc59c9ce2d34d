//! Error types for the store and the application shell.
//!
//! Row-level import problems are not errors in this sense; they are collected
//! as [`crate::importer::RowError`] values inside an import report.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("failed to encode options: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("question bank not found: {bank_id}")]
    BankNotFound { bank_id: String },

    #[error("bank name must not be empty")]
    EmptyBankName,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("configuration error: {message}")]
    Configuration { message: String },
}

pub type Result<T> = std::result::Result<T, AppError>;
