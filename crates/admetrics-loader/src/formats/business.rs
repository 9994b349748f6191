use csv::{ReaderBuilder, Trim};

use super::schema::{BusinessColumn, SchemaColumn};
use super::{line_of, parse_amount, parse_count, parse_date, ColumnIndex};
use crate::errors::DataLoadError;
use crate::model::{BusinessRecord, SourceKind};
use crate::registry::SourceFormat;

#[derive(Debug, Clone, Copy, Default)]
pub struct BusinessFormat;

impl SourceFormat for BusinessFormat {
    type Record = BusinessRecord;

    fn kind(&self) -> SourceKind {
        SourceKind::Business
    }

    fn parse(&self, content: &[u8]) -> Result<Vec<BusinessRecord>, DataLoadError> {
        let kind = self.kind();
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(content);

        let headers = reader
            .headers()
            .map_err(|source| DataLoadError::Csv { kind, source })?
            .clone();
        let columns = ColumnIndex::<BusinessColumn>::resolve(kind, &headers)?;

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row.map_err(|source| DataLoadError::Csv { kind, source })?;
            let line = line_of(&row);
            let amount = |column: BusinessColumn| {
                parse_amount(kind, columns.get(&row, column), line, column.canonical_name())
            };
            let count = |column: BusinessColumn| {
                parse_count(kind, columns.get(&row, column), line, column.canonical_name())
            };

            records.push(BusinessRecord {
                date: parse_date(
                    kind,
                    columns.get(&row, BusinessColumn::Date),
                    line,
                    BusinessColumn::Date.canonical_name(),
                )?,
                total_revenue: amount(BusinessColumn::TotalRevenue)?,
                gross_profit: amount(BusinessColumn::GrossProfit)?,
                new_orders: count(BusinessColumn::NewOrders)?,
                total_orders: count(BusinessColumn::TotalOrders)?,
                new_customers: count(BusinessColumn::NewCustomers)?,
            });
        }

        Ok(records)
    }
}
