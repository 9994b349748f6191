pub mod aggregate;
pub mod bucket;
pub mod config;
pub mod dataset;
pub mod error;
pub mod filter;
pub mod frame;
pub mod kpi;
pub mod report;
pub mod summary;

pub use admetrics_loader::{
    AdRecord, BusinessRecord, DataLoadError, LoadedSources, Platform, SourceKind, SourceReport,
};
