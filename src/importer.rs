use crate::csv::split_data_records;
use crate::models::{
    CandidateQuestion, ImportRow, JudgeAnswer, QuestionBody, QuestionType, MAX_OPTIONS,
    MIN_OPTIONS,
};
use log::{debug, info};
use std::collections::BTreeSet;
use thiserror::Error;

const MIN_FIELDS: usize = 4;
const OPTION_SEPARATOR: char = '|';

const TYPE_COLUMN: usize = 0;
const CONTENT_COLUMN: usize = 1;
const OPTIONS_COLUMN: usize = 2;
const ANSWER_COLUMN: usize = 3;
const EXPLANATION_COLUMN: usize = 4;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RowErrorKind {
    #[error("insufficient fields")]
    InsufficientFields,
    #[error("unterminated quoted field")]
    UnterminatedQuote,
    #[error("unknown question type \"{0}\"")]
    UnknownType(String),
    #[error("empty question content")]
    EmptyContent,
    #[error("too few options")]
    TooFewOptions,
    #[error("too many options")]
    TooManyOptions,
    #[error("empty answer")]
    EmptyAnswer,
    #[error("bad multiple-choice answer format")]
    BadMultipleAnswer,
    #[error("single-choice answer must be one letter")]
    BadSingleAnswer,
    #[error("judge answer must be A or B")]
    BadJudgeAnswer,
    #[error("answer out of range")]
    AnswerOutOfRange,
}

/// A rejected CSV row: the line it started on and the rule it broke.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("row {line}: {kind}")]
pub struct RowError {
    pub line: usize,
    pub kind: RowErrorKind,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub accepted: Vec<CandidateQuestion>,
    pub errors: Vec<RowError>,
}

impl ImportReport {
    /// True when the input held nothing to import and nothing went wrong.
    pub fn is_empty(&self) -> bool {
        self.accepted.is_empty() && self.errors.is_empty()
    }

    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.to_string()).collect()
    }

    /// The first `limit` error messages, for display.
    pub fn error_preview(&self, limit: usize) -> Vec<String> {
        self.errors.iter().take(limit).map(|e| e.to_string()).collect()
    }
}

/// Parses a CSV body into validated questions for `bank_id`.
///
/// The first line is a header and is never read as data. Bad rows are
/// collected as [`RowError`]s; the call itself never fails.
pub fn parse_and_validate(text: &str, bank_id: &str) -> ImportReport {
    parse_and_validate_with(text, bank_id, || uuid::Uuid::new_v4().to_string())
}

/// Same as [`parse_and_validate`] with a caller-supplied id source.
pub fn parse_and_validate_with<F>(text: &str, bank_id: &str, mut next_id: F) -> ImportReport
where
    F: FnMut() -> String,
{
    let mut report = ImportReport::default();

    for row in split_data_records(text) {
        match validate_row(&row) {
            Ok(draft) => report.accepted.push(CandidateQuestion {
                id: next_id(),
                bank_id: bank_id.to_string(),
                content: draft.content,
                body: draft.body,
                explanation: draft.explanation,
            }),
            Err(kind) => {
                let error = RowError {
                    line: row.line_number,
                    kind,
                };
                debug!("rejected {}", error);
                report.errors.push(error);
            }
        }
    }

    if !report.is_empty() {
        info!(
            "import into bank {}: {} accepted, {} rejected",
            bank_id,
            report.accepted.len(),
            report.errors.len()
        );
    }

    report
}

struct Draft {
    content: String,
    body: QuestionBody,
    explanation: String,
}

fn validate_row(row: &ImportRow) -> Result<Draft, RowErrorKind> {
    if row.unterminated {
        return Err(RowErrorKind::UnterminatedQuote);
    }

    let fields = &row.fields;
    if fields.len() < MIN_FIELDS {
        return Err(RowErrorKind::InsufficientFields);
    }

    let type_token = fields[TYPE_COLUMN].trim();
    let kind = QuestionType::from_token(type_token)
        .ok_or_else(|| RowErrorKind::UnknownType(type_token.to_string()))?;

    let content = fields[CONTENT_COLUMN].trim();
    if content.is_empty() {
        return Err(RowErrorKind::EmptyContent);
    }

    let answer = fields[ANSWER_COLUMN].trim().to_uppercase();

    let body = match kind {
        QuestionType::Judge => {
            if answer.is_empty() {
                return Err(RowErrorKind::EmptyAnswer);
            }
            QuestionBody::Judge {
                answer: parse_judge_answer(&answer)?,
            }
        }
        QuestionType::Single => {
            let options = split_options(&fields[OPTIONS_COLUMN])?;
            if answer.is_empty() {
                return Err(RowErrorKind::EmptyAnswer);
            }
            let answer = parse_single_answer(&answer, options.len())?;
            QuestionBody::Single { options, answer }
        }
        QuestionType::Multiple => {
            let options = split_options(&fields[OPTIONS_COLUMN])?;
            if answer.is_empty() {
                return Err(RowErrorKind::EmptyAnswer);
            }
            let answer = parse_multiple_answer(&answer, options.len())?;
            QuestionBody::Multiple { options, answer }
        }
    };

    let explanation = fields
        .get(EXPLANATION_COLUMN)
        .map(|e| e.trim().to_string())
        .unwrap_or_default();

    Ok(Draft {
        content: content.to_string(),
        body,
        explanation,
    })
}

fn split_options(token: &str) -> Result<Vec<String>, RowErrorKind> {
    let options: Vec<String> = token
        .split(OPTION_SEPARATOR)
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect();

    if options.len() < MIN_OPTIONS {
        return Err(RowErrorKind::TooFewOptions);
    }
    if options.len() > MAX_OPTIONS {
        return Err(RowErrorKind::TooManyOptions);
    }
    Ok(options)
}

/// Highest answer letter allowed for `option_count` options. Option count is
/// capped at 8 so the result always stays within `A..=Z`.
fn max_letter(option_count: usize) -> char {
    (b'A' + option_count as u8 - 1) as char
}

fn parse_single_answer(answer: &str, option_count: usize) -> Result<char, RowErrorKind> {
    let mut chars = answer.chars();
    let letter = match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_uppercase() => c,
        _ => return Err(RowErrorKind::BadSingleAnswer),
    };

    if letter > max_letter(option_count) {
        return Err(RowErrorKind::AnswerOutOfRange);
    }
    Ok(letter)
}

fn parse_multiple_answer(
    answer: &str,
    option_count: usize,
) -> Result<BTreeSet<char>, RowErrorKind> {
    let letters: BTreeSet<char> = answer.chars().filter(|c| c.is_ascii_uppercase()).collect();
    if letters.is_empty() {
        return Err(RowErrorKind::BadMultipleAnswer);
    }

    let max = max_letter(option_count);
    if letters.iter().any(|&c| c > max) {
        return Err(RowErrorKind::AnswerOutOfRange);
    }
    Ok(letters)
}

fn parse_judge_answer(answer: &str) -> Result<JudgeAnswer, RowErrorKind> {
    match answer {
        "A" => Ok(JudgeAnswer::Correct),
        "B" => Ok(JudgeAnswer::Incorrect),
        _ => Err(RowErrorKind::BadJudgeAnswer),
    }
}
