pub mod errors;
pub mod formats;
pub mod model;
mod registry;

pub use errors::DataLoadError;
pub use model::{AdRecord, BusinessRecord, LoadedSources, Platform, SourceKind, SourceReport};
pub use registry::{
    load_directory, load_sources, parse_ad_source, parse_business_source, SourceFiles,
    SourceFormat,
};
