use csv::{ReaderBuilder, Trim};

use super::schema::{AdColumn, SchemaColumn};
use super::{line_of, parse_amount, parse_count, parse_date, ColumnIndex};
use crate::errors::DataLoadError;
use crate::model::{AdRecord, Platform, SourceKind};
use crate::registry::SourceFormat;

/// Export of one ad platform. Every row is tagged with the platform the file belongs to.
#[derive(Debug, Clone, Copy)]
pub struct AdPlatformFormat {
    platform: Platform,
}

impl AdPlatformFormat {
    pub fn new(platform: Platform) -> Self {
        Self { platform }
    }
}

impl SourceFormat for AdPlatformFormat {
    type Record = AdRecord;

    fn kind(&self) -> SourceKind {
        self.platform.source_kind()
    }

    fn parse(&self, content: &[u8]) -> Result<Vec<AdRecord>, DataLoadError> {
        let kind = self.kind();
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(content);

        let headers = reader
            .headers()
            .map_err(|source| DataLoadError::Csv { kind, source })?
            .clone();
        let columns = ColumnIndex::<AdColumn>::resolve(kind, &headers)?;

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row.map_err(|source| DataLoadError::Csv { kind, source })?;
            let line = line_of(&row);
            let amount = |column: AdColumn| {
                parse_amount(kind, columns.get(&row, column), line, column.canonical_name())
            };
            let count = |column: AdColumn| {
                parse_count(kind, columns.get(&row, column), line, column.canonical_name())
            };

            records.push(AdRecord {
                date: parse_date(
                    kind,
                    columns.get(&row, AdColumn::Date),
                    line,
                    AdColumn::Date.canonical_name(),
                )?,
                platform: self.platform,
                state: columns.get(&row, AdColumn::State).to_string(),
                campaign: columns.get(&row, AdColumn::Campaign).to_string(),
                spend: amount(AdColumn::Spend)?,
                attributed_revenue: amount(AdColumn::AttributedRevenue)?,
                clicks: count(AdColumn::Clicks)?,
                impressions: count(AdColumn::Impressions)?,
            });
        }

        Ok(records)
    }
}
