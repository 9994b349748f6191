use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime};
use csv::StringRecord;

use super::schema::SchemaColumn;
use crate::errors::DataLoadError;
use crate::model::SourceKind;

/// Header positions of every required column of one source.
pub(crate) struct ColumnIndex<C: SchemaColumn> {
    positions: HashMap<C, usize>,
}

impl<C: SchemaColumn> ColumnIndex<C> {
    pub fn resolve(kind: SourceKind, headers: &StringRecord) -> Result<Self, DataLoadError> {
        let normalized: Vec<String> = headers
            .iter()
            .map(|header| header.trim().to_ascii_lowercase())
            .collect();

        let mut positions = HashMap::with_capacity(C::all().len());
        for column in C::all() {
            let position = normalized
                .iter()
                .position(|header| column.aliases().contains(&header.as_str()))
                .ok_or(DataLoadError::MissingColumn {
                    kind,
                    column: column.canonical_name(),
                })?;
            positions.insert(*column, position);
        }

        Ok(Self { positions })
    }

    pub fn get<'r>(&self, record: &'r StringRecord, column: C) -> &'r str {
        self.positions
            .get(&column)
            .and_then(|idx| record.get(*idx))
            .unwrap_or_default()
    }
}

pub(crate) fn line_of(record: &StringRecord) -> u64 {
    record.position().map(|pos| pos.line()).unwrap_or(0)
}

pub(crate) fn parse_date(
    kind: SourceKind,
    value: &str,
    line: u64,
    column: &'static str,
) -> Result<NaiveDate, DataLoadError> {
    static DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
    static DATETIME_FORMATS: &[&str] = &[
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
    ];

    let trimmed = value.trim();
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Ok(date);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Ok(dt.date());
        }
    }

    Err(DataLoadError::InvalidRow {
        kind,
        line,
        column,
        message: format!("invalid date '{trimmed}'"),
    })
}

fn is_blank(value: &str) -> bool {
    value.is_empty() || value.eq_ignore_ascii_case("nan")
}

/// Blank and `nan` cells count as zero; everything else must be a finite number.
pub(crate) fn parse_amount(
    kind: SourceKind,
    value: &str,
    line: u64,
    column: &'static str,
) -> Result<f64, DataLoadError> {
    let trimmed = value.trim();
    if is_blank(trimmed) {
        return Ok(0.0);
    }
    let amount = trimmed
        .parse::<f64>()
        .map_err(|err| DataLoadError::InvalidRow {
            kind,
            line,
            column,
            message: format!("failed to parse '{trimmed}' as a number: {err}"),
        })?;
    if !amount.is_finite() {
        return Err(DataLoadError::InvalidRow {
            kind,
            line,
            column,
            message: format!("'{trimmed}' is not a finite number"),
        });
    }
    Ok(amount)
}

pub(crate) fn parse_count(
    kind: SourceKind,
    value: &str,
    line: u64,
    column: &'static str,
) -> Result<u64, DataLoadError> {
    let trimmed = value.trim();
    if is_blank(trimmed) {
        return Ok(0);
    }
    if let Ok(parsed) = trimmed.parse::<u64>() {
        return Ok(parsed);
    }

    // integer-valued floats such as "12.0"
    match trimmed.parse::<f64>() {
        Ok(parsed) if parsed >= 0.0 && parsed.fract() == 0.0 && parsed <= u64::MAX as f64 => {
            Ok(parsed as u64)
        }
        _ => Err(DataLoadError::InvalidRow {
            kind,
            line,
            column,
            message: format!("'{trimmed}' is not a non-negative whole number"),
        }),
    }
}
