use crate::models::ImportRow;
use std::fs;
use std::path::{Path, PathBuf};

const DELIMITER: char = ',';
const QUOTE: char = '"';
const BOM: char = '\u{feff}';

pub fn get_csv_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();

    if dir.exists() && dir.is_dir()
        && let Ok(entries) = fs::read_dir(dir) {
            for entry in entries.flatten() {
                if let Some(ext) = entry.path().extension()
                    && ext.eq_ignore_ascii_case("csv") {
                        files.push(entry.path());
                    }
            }
        }

    files.sort();
    files
}

pub fn load_csv(path: &Path) -> std::io::Result<String> {
    fs::read_to_string(path)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    FieldStart,
    Unquoted,
    Quoted,
    QuoteInQuoted,
}

struct Scan {
    fields: Vec<String>,
    open_quote: bool,
}

fn scan(record: &str) -> Scan {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut state = State::FieldStart;

    for c in record.chars() {
        state = match (state, c) {
            (State::FieldStart, QUOTE) => {
                // whitespace before an opening quote is not part of the value
                field.clear();
                State::Quoted
            }
            (State::FieldStart, DELIMITER) | (State::Unquoted, DELIMITER) => {
                fields.push(std::mem::take(&mut field));
                State::FieldStart
            }
            (State::FieldStart, ' ') | (State::FieldStart, '\t') => {
                field.push(c);
                State::FieldStart
            }
            (State::FieldStart, _) | (State::Unquoted, _) => {
                field.push(c);
                State::Unquoted
            }
            (State::Quoted, QUOTE) => State::QuoteInQuoted,
            (State::Quoted, _) => {
                field.push(c);
                State::Quoted
            }
            (State::QuoteInQuoted, QUOTE) => {
                field.push(QUOTE);
                State::Quoted
            }
            (State::QuoteInQuoted, DELIMITER) => {
                fields.push(std::mem::take(&mut field));
                State::FieldStart
            }
            (State::QuoteInQuoted, _) => {
                field.push(c);
                State::Unquoted
            }
        };
    }

    fields.push(field);

    Scan {
        fields,
        open_quote: state == State::Quoted,
    }
}

/// Splits one CSV record into fields.
///
/// Quoted and bare fields can be mixed on a line. Inside quotes the delimiter is
/// literal and `""` stands for one `"`. A trailing delimiter yields a trailing
/// empty field.
pub fn parse_csv_line(line: &str) -> Vec<String> {
    scan(line).fields
}

fn physical_lines(text: &str) -> Vec<&str> {
    let text = text.strip_prefix(BOM).unwrap_or(text);
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}

/// Splits the data part of a CSV body into records.
///
/// Physical line 1 is the header and is dropped before any quote handling,
/// so a malformed header cannot swallow the rows below it. Blank lines are
/// skipped but still counted. A quoted field may span several physical
/// lines and the record keeps the line number it started on. A quote that
/// never closes only marks its own line as unterminated; splitting resumes
/// on the next physical line.
pub fn split_data_records(text: &str) -> Vec<ImportRow> {
    let lines = physical_lines(text);
    let mut rows = Vec::new();
    let mut index = 1;

    while index < lines.len() {
        let line = lines[index];
        if line.trim().is_empty() {
            index += 1;
            continue;
        }

        let mut record = line.to_string();
        let mut scanned = scan(&record);
        let mut end = index;
        while scanned.open_quote && end + 1 < lines.len() {
            end += 1;
            record.push('\n');
            record.push_str(lines[end]);
            scanned = scan(&record);
        }

        if scanned.open_quote {
            rows.push(ImportRow {
                line_number: index + 1,
                fields: scan(line).fields,
                unterminated: true,
            });
            index += 1;
        } else {
            rows.push(ImportRow {
                line_number: index + 1,
                fields: scanned.fields,
                unterminated: false,
            });
            index = end + 1;
        }
    }

    rows
}
