//! Line-by-line validation of label files.
//!
//! A label file holds one line per vector; each line is a comma-separated
//! list of distinct positive integer label ids. The first invalid line stops
//! the pass. Frequency order is only checked once every line is valid.

use crate::error::{Error, Result};
use crate::model::{FrequencyTable, LabelId, LabelSet, ValidationReport};
use std::collections::HashSet;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// A decimal integer token of any magnitude.
///
/// Leading zeros and a `+` sign are dropped and zero is never negative, so
/// two tokens compare equal exactly when they denote the same integer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Integer {
    negative: bool,
    digits: String,
}

impl Integer {
    fn parse(token: &str) -> Option<Self> {
        let token = token.trim();
        let (negative, digits) = match token.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, token.strip_prefix('+').unwrap_or(token)),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        let digits = match digits.trim_start_matches('0') {
            "" => "0",
            rest => rest,
        };
        Some(Self {
            negative: negative && digits != "0",
            digits: digits.to_string(),
        })
    }

    fn is_positive(&self) -> bool {
        !self.negative && self.digits != "0"
    }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            write!(f, "-{}", self.digits)
        } else {
            f.write_str(&self.digits)
        }
    }
}

/// Parse and validate the line at 0-based `index`.
///
/// Checks run in a fixed order: empty line, non-numeric token, duplicate
/// label, non-positive label, label id too large to store. The first failing
/// check decides the error. Magnitude plays no part in the first three
/// checks: `-99999999999999999999` is non-positive, not non-numeric.
pub fn parse_label_set(index: usize, line: &str) -> Result<LabelSet> {
    let line = line.trim();
    if line.is_empty() {
        return Err(Error::EmptyLine { line: index });
    }

    let values = line
        .split(',')
        .map(|token| {
            Integer::parse(token).ok_or_else(|| Error::NonNumericLabel {
                line: index,
                token: token.to_string(),
            })
        })
        .collect::<Result<Vec<Integer>>>()?;

    let mut seen = HashSet::with_capacity(values.len());
    if let Some(value) = values.iter().find(|v| !seen.insert(*v)) {
        return Err(Error::DuplicateLabel {
            line: index,
            label: value.to_string(),
        });
    }

    if let Some(value) = values.iter().find(|v| !v.is_positive()) {
        return Err(Error::NonPositiveLabel {
            line: index,
            label: value.to_string(),
        });
    }

    let labels = values
        .iter()
        .map(|v| {
            v.digits
                .parse::<LabelId>()
                .map_err(|_| Error::LabelOutOfRange {
                    line: index,
                    label: v.to_string(),
                    max: LabelId::MAX,
                })
        })
        .collect::<Result<Vec<LabelId>>>()?;

    Ok(LabelSet::new(labels))
}

/// Single pass over a label file, accumulating frequencies.
#[derive(Debug, Default)]
pub struct LabelFileValidator {
    frequencies: FrequencyTable,
    lines: usize,
}

impl LabelFileValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the next line and count its labels
    pub fn push_line(&mut self, line: &str) -> Result<()> {
        let set = parse_label_set(self.lines, line)?;
        self.frequencies.record(&set);
        self.lines += 1;
        Ok(())
    }

    /// Number of lines accepted so far
    pub fn lines(&self) -> usize {
        self.lines
    }

    pub fn finish(self) -> FrequencyTable {
        self.frequencies
    }
}

/// Split a chunk ending in `\n` (or at end of input) into lines.
///
/// `\n`, `\r\n` and a lone `\r` each end a line. Text after the last
/// terminator is a final unterminated line.
fn split_lines(chunk: &[u8]) -> Vec<&[u8]> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < chunk.len() {
        match chunk[i] {
            b'\n' => {
                lines.push(&chunk[start..i]);
                i += 1;
                start = i;
            }
            b'\r' => {
                lines.push(&chunk[start..i]);
                i += if chunk.get(i + 1) == Some(&b'\n') { 2 } else { 1 };
                start = i;
            }
            _ => i += 1,
        }
    }
    if start < chunk.len() {
        lines.push(&chunk[start..]);
    }

    lines
}

/// Validate every line read from `reader`.
///
/// Lines end at `\n`, `\r\n` or `\r`. Read failures (including invalid
/// UTF-8) surface as [`Error::Io`].
pub fn validate_reader<R: BufRead>(mut reader: R) -> Result<FrequencyTable> {
    let mut validator = LabelFileValidator::new();
    let mut chunk = Vec::new();

    loop {
        chunk.clear();
        if reader.read_until(b'\n', &mut chunk)? == 0 {
            break;
        }

        for line in split_lines(&chunk) {
            let line = std::str::from_utf8(line)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
            validator.push_line(line)?;
        }
    }

    Ok(validator.finish())
}

/// Validate the label file at `path` and build the full report.
pub fn validate_file(path: &Path) -> Result<ValidationReport> {
    let file = File::open(path).map_err(|source| Error::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let frequencies = validate_reader(BufReader::new(file))?;

    Ok(ValidationReport {
        path: path.display().to_string(),
        stats: frequencies.stats(),
        frequencies: frequencies.to_entries(),
        warnings: frequencies.order_warnings(),
    })
}
