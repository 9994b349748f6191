mod ad_platform;
mod business;
mod common;
pub(crate) mod schema;

pub use ad_platform::AdPlatformFormat;
pub use business::BusinessFormat;
pub use schema::{AdColumn, BusinessColumn, SchemaColumn};

pub(crate) use common::{line_of, parse_amount, parse_count, parse_date, ColumnIndex};
