use std::collections::BTreeSet;
use std::fmt;

pub const MIN_OPTIONS: usize = 2;
pub const MAX_OPTIONS: usize = 8;

/// Fixed option labels shown for true/false questions.
pub const JUDGE_OPTIONS: [&str; 2] = ["Correct", "Incorrect"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionType {
    Single,
    Multiple,
    Judge,
}

impl QuestionType {
    /// Parses a CSV type token. Case-insensitive, surrounding whitespace ignored.
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_uppercase().as_str() {
            "SINGLE" => Some(QuestionType::Single),
            "MULTIPLE" => Some(QuestionType::Multiple),
            "JUDGE" => Some(QuestionType::Judge),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::Single => "SINGLE",
            QuestionType::Multiple => "MULTIPLE",
            QuestionType::Judge => "JUDGE",
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JudgeAnswer {
    Correct,
    Incorrect,
}

impl JudgeAnswer {
    pub fn letter(&self) -> char {
        match self {
            JudgeAnswer::Correct => 'A',
            JudgeAnswer::Incorrect => 'B',
        }
    }
}

/// Type-specific part of a question. Each variant only carries what its type needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionBody {
    Single {
        options: Vec<String>,
        answer: char,
    },
    Multiple {
        options: Vec<String>,
        answer: BTreeSet<char>,
    },
    Judge {
        answer: JudgeAnswer,
    },
}

/// A validated, not-yet-persisted question produced by one import call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateQuestion {
    pub id: String,
    pub bank_id: String,
    pub content: String,
    pub body: QuestionBody,
    pub explanation: String,
}

impl CandidateQuestion {
    pub fn kind(&self) -> QuestionType {
        match self.body {
            QuestionBody::Single { .. } => QuestionType::Single,
            QuestionBody::Multiple { .. } => QuestionType::Multiple,
            QuestionBody::Judge { .. } => QuestionType::Judge,
        }
    }

    pub fn options(&self) -> Vec<String> {
        match &self.body {
            QuestionBody::Single { options, .. } | QuestionBody::Multiple { options, .. } => {
                options.clone()
            }
            QuestionBody::Judge { .. } => JUDGE_OPTIONS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Answer letters in ascending order, e.g. `"C"` or `"ABD"`.
    pub fn answer_letters(&self) -> String {
        match &self.body {
            QuestionBody::Single { answer, .. } => answer.to_string(),
            QuestionBody::Multiple { answer, .. } => answer.iter().collect(),
            QuestionBody::Judge { answer } => answer.letter().to_string(),
        }
    }
}

/// One CSV record before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRow {
    pub line_number: usize,
    pub fields: Vec<String>,
    pub unterminated: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Menu,
    NewBank,
    ImportSummary,
}
