//! Reading segments from text.
//!
//! One segment per line, as four whitespace-separated numbers
//! `x1 y1 x2 y2`. Blank lines and lines starting with `#` are skipped.

use std::io::BufRead;

use log::debug;

use crate::error::{ParseError, ParseErrorKind, ReadError};

/// Parse one record. `line` is the one-based line number, for errors.
fn parse_record(record: &str, line: usize) -> Result<[f64; 4], ParseError> {
    let fields: Vec<&str> = record.split_whitespace().collect();
    if fields.len() != 4 {
        return Err(ParseError {
            line,
            kind: ParseErrorKind::FieldCount(fields.len()),
        });
    }

    let mut values = [0.; 4];
    for (value, field) in values.iter_mut().zip(fields) {
        *value = field.parse().map_err(|_| ParseError {
            line,
            kind: ParseErrorKind::InvalidNumber(field.to_string()),
        })?;
    }
    Ok(values)
}

fn is_skipped(record: &str) -> bool {
    let record = record.trim();
    record.is_empty() || record.starts_with('#')
}

/// Parse segments from a string. Fails on the first malformed line.
pub fn parse_segments(text: &str) -> Result<Vec<[f64; 4]>, ParseError> {
    text.lines()
        .enumerate()
        .filter(|(_, record)| !is_skipped(record))
        .map(|(i, record)| parse_record(record, i + 1))
        .collect()
}

/// Read segments from `reader` until end of input.
pub fn read_segments<R: BufRead>(reader: R) -> Result<Vec<[f64; 4]>, ReadError> {
    let mut segments = Vec::new();
    for (i, record) in reader.lines().enumerate() {
        let record = record?;
        if is_skipped(&record) {
            continue;
        }
        segments.push(parse_record(&record, i + 1)?);
    }
    debug!("read {} segments", segments.len());
    Ok(segments)
}
