use std::fs;
use std::path::Path;

use csv::{ErrorKind, ReaderBuilder};

use crate::error::{AppError, AppResult};

/// Reads a comma separated file and returns the first field of every row,
/// in file order. There is no header row.
pub fn read_repository_list(path: &Path) -> AppResult<Vec<String>> {
    let contents = fs::read(path)
        .map_err(|err| AppError::InputUnreadable(format!("{}: {err}", path.display())))?;
    parse_repository_list(&contents)
        .map_err(|err| match err {
            AppError::InputMalformed(reason) => {
                AppError::InputMalformed(format!("{}: {reason}", path.display()))
            }
            other => other,
        })
}

pub fn parse_repository_list(contents: &[u8]) -> AppResult<Vec<String>> {
    check_quotes(contents).map_err(AppError::InputMalformed)?;

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .delimiter(b',')
        .from_reader(contents);

    let mut repositories = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|err| match err.kind() {
            ErrorKind::Io(io) => AppError::InputUnreadable(io.to_string()),
            _ => AppError::InputMalformed(err.to_string()),
        })?;
        repositories.push(record.get(0).unwrap_or_default().to_string());
    }
    Ok(repositories)
}

#[derive(Clone, Copy)]
enum QuoteState {
    FieldStart,
    Unquoted,
    Quoted,
    QuoteInQuoted,
}

/// The csv reader is lenient about quotes: a bare quote is kept as data and an
/// open quote swallows the rest of the input. Reject both up front.
fn check_quotes(contents: &[u8]) -> Result<(), String> {
    let mut state = QuoteState::FieldStart;
    let mut line = 1;
    let mut quoted_from = 1;

    for &byte in contents {
        state = match (state, byte) {
            (QuoteState::Quoted, b'"') => QuoteState::QuoteInQuoted,
            (QuoteState::Quoted, _) => QuoteState::Quoted,
            (QuoteState::QuoteInQuoted, b'"') => QuoteState::Quoted,
            (QuoteState::FieldStart, b'"') => {
                quoted_from = line;
                QuoteState::Quoted
            }
            (QuoteState::Unquoted, b'"') => {
                return Err(format!("bare quote in unquoted field on line {line}"));
            }
            (_, b',' | b'\n' | b'\r') => QuoteState::FieldStart,
            (QuoteState::QuoteInQuoted, _) => {
                return Err(format!("extraneous quote in quoted field on line {line}"));
            }
            (QuoteState::FieldStart | QuoteState::Unquoted, _) => QuoteState::Unquoted,
        };
        if byte == b'\n' {
            line += 1;
        }
    }

    match state {
        QuoteState::Quoted => Err(format!(
            "unterminated quoted field starting on line {quoted_from}"
        )),
        _ => Ok(()),
    }
}
