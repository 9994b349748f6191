use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::errors::DataLoadError;
use crate::formats::{AdPlatformFormat, BusinessFormat};
use crate::model::{AdRecord, BusinessRecord, LoadedSources, Platform, SourceKind, SourceReport};

pub trait SourceFormat {
    type Record;

    fn kind(&self) -> SourceKind;
    fn parse(&self, content: &[u8]) -> Result<Vec<Self::Record>, DataLoadError>;
}

/// Locations of the four source files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFiles {
    pub google: PathBuf,
    pub facebook: PathBuf,
    pub tiktok: PathBuf,
    pub business: PathBuf,
}

impl SourceFiles {
    /// The default file names inside `dir`.
    pub fn standard(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            google: dir.join(SourceKind::Google.default_file_name()),
            facebook: dir.join(SourceKind::Facebook.default_file_name()),
            tiktok: dir.join(SourceKind::TikTok.default_file_name()),
            business: dir.join(SourceKind::Business.default_file_name()),
        }
    }

    pub fn path(&self, kind: SourceKind) -> &Path {
        match kind {
            SourceKind::Google => &self.google,
            SourceKind::Facebook => &self.facebook,
            SourceKind::TikTok => &self.tiktok,
            SourceKind::Business => &self.business,
        }
    }
}

pub fn parse_ad_source(platform: Platform, content: &str) -> Result<Vec<AdRecord>, DataLoadError> {
    AdPlatformFormat::new(platform).parse(content.as_bytes())
}

pub fn parse_business_source(content: &str) -> Result<Vec<BusinessRecord>, DataLoadError> {
    BusinessFormat.parse(content.as_bytes())
}

/// Loads the four sources from their default names inside `dir`.
pub fn load_directory(dir: impl AsRef<Path>) -> Result<LoadedSources, DataLoadError> {
    load_sources(&SourceFiles::standard(dir))
}

/// Loads all four sources. The first missing or unreadable file aborts the load.
pub fn load_sources(files: &SourceFiles) -> Result<LoadedSources, DataLoadError> {
    let mut loaded = LoadedSources::default();

    for platform in Platform::ALL {
        let (records, report) = read_source(&AdPlatformFormat::new(platform), files, |record| {
            &record.date
        })?;
        match platform {
            Platform::Google => loaded.google = records,
            Platform::Facebook => loaded.facebook = records,
            Platform::TikTok => loaded.tiktok = records,
        }
        loaded.reports.push(report);
    }

    let (business, report) = read_source(&BusinessFormat, files, |record| &record.date)?;
    loaded.business = business;
    loaded.reports.push(report);

    Ok(loaded)
}

fn read_source<F>(
    format: &F,
    files: &SourceFiles,
    date_of: fn(&F::Record) -> &chrono::NaiveDate,
) -> Result<(Vec<F::Record>, SourceReport), DataLoadError>
where
    F: SourceFormat,
{
    let kind = format.kind();
    let path = files.path(kind);
    let contents = std::fs::read(path).map_err(|source| {
        if source.kind() == ErrorKind::NotFound {
            DataLoadError::MissingSource {
                kind,
                path: path.to_path_buf(),
            }
        } else {
            DataLoadError::Io {
                kind,
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let records = format.parse(&contents)?;
    let report = SourceReport::new(
        kind,
        path.display().to_string(),
        &contents,
        records.iter().map(date_of),
    );

    if records.is_empty() {
        warn!(source = %kind, path = %path.display(), "source contained no data rows");
    } else {
        info!(
            source = %kind,
            rows = report.row_count,
            fingerprint = %report.fingerprint,
            "loaded source"
        );
    }

    Ok((records, report))
}
