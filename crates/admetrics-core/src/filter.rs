use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bucket::Bucket;
use crate::dataset::{Dataset, FilterDefaults};
use crate::error::{FilterError, Result};
use crate::{AdRecord, BusinessRecord, Platform};

/// One query over the dataset. Bounds are inclusive and never inverted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterSpec {
    date_start: NaiveDate,
    date_end: NaiveDate,
    platforms: BTreeSet<Platform>,
    regions: BTreeSet<String>,
    bucket: Bucket,
}

impl FilterSpec {
    pub fn new(
        date_start: NaiveDate,
        date_end: NaiveDate,
        platforms: impl IntoIterator<Item = Platform>,
        regions: impl IntoIterator<Item = impl Into<String>>,
        bucket: Bucket,
    ) -> Result<Self> {
        if date_start > date_end {
            return Err(FilterError::InvertedRange {
                start: date_start,
                end: date_end,
            });
        }

        Ok(Self {
            date_start,
            date_end,
            platforms: platforms.into_iter().collect(),
            regions: regions.into_iter().map(Into::into).collect(),
            bucket,
        })
    }

    pub fn date_start(&self) -> NaiveDate {
        self.date_start
    }

    pub fn date_end(&self) -> NaiveDate {
        self.date_end
    }

    pub fn platforms(&self) -> &BTreeSet<Platform> {
        &self.platforms
    }

    pub fn regions(&self) -> &BTreeSet<String> {
        &self.regions
    }

    pub fn bucket(&self) -> Bucket {
        self.bucket
    }

    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.date_start <= date && date <= self.date_end
    }

    pub fn matches_ad(&self, record: &AdRecord) -> bool {
        self.platforms.contains(&record.platform)
            && self.regions.contains(&record.state)
            && self.contains_date(record.date)
    }
}

/// Ad rows whose platform, region and date all match. An empty platform set selects nothing.
pub fn filter_ad_records<'a>(records: &'a [AdRecord], spec: &FilterSpec) -> Vec<&'a AdRecord> {
    if spec.platforms.is_empty() {
        debug!("empty platform selection, ad side is empty");
        return Vec::new();
    }

    let filtered: Vec<&AdRecord> = records.iter().filter(|r| spec.matches_ad(r)).collect();
    debug!(
        input = records.len(),
        kept = filtered.len(),
        "filtered ad records"
    );
    filtered
}

/// Business rows within the date range. Platform and region selections do not apply.
pub fn filter_business_records<'a>(
    records: &'a [BusinessRecord],
    spec: &FilterSpec,
) -> Vec<&'a BusinessRecord> {
    let filtered: Vec<&BusinessRecord> = records
        .iter()
        .filter(|r| spec.contains_date(r.date))
        .collect();
    debug!(
        input = records.len(),
        kept = filtered.len(),
        "filtered business records"
    );
    filtered
}

pub fn parse_date(value: &str) -> Result<NaiveDate> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|_| FilterError::InvalidDate(trimmed.to_string()))
}

/// Comma-separated, case-insensitive platform names. An empty string is an empty set.
pub fn parse_platforms(value: &str) -> Result<BTreeSet<Platform>> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| Platform::try_from(item).map_err(FilterError::UnknownPlatform))
        .collect()
}

/// Comma-separated region identifiers. An empty string is an empty set.
pub fn parse_regions(value: &str) -> BTreeSet<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Raw query parameters. `None` means "use the default"; `Some("")` for a list
/// means "select nothing".
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FilterRequest {
    pub start: Option<String>,
    pub end: Option<String>,
    pub platforms: Option<String>,
    pub regions: Option<String>,
    pub bucket: Option<String>,
}

impl FilterRequest {
    pub fn resolve(&self, dataset: &Dataset, defaults: &FilterDefaults) -> Result<FilterSpec> {
        let fallback = dataset.default_filter(defaults);

        let date_start = match (&self.start, &fallback) {
            (Some(value), _) => parse_date(value)?,
            (None, Some(spec)) => spec.date_start,
            (None, None) => return Err(FilterError::NoDateRange),
        };
        let date_end = match (&self.end, &fallback) {
            (Some(value), _) => parse_date(value)?,
            (None, Some(spec)) => spec.date_end,
            (None, None) => return Err(FilterError::NoDateRange),
        };

        let platforms = match &self.platforms {
            Some(value) => parse_platforms(value)?,
            None => Platform::ALL.into_iter().collect(),
        };
        let regions = match &self.regions {
            Some(value) => parse_regions(value),
            None => dataset.default_regions(defaults.region_count),
        };
        let bucket = match &self.bucket {
            Some(value) => value.parse()?,
            None => defaults.bucket,
        };

        FilterSpec::new(date_start, date_end, platforms, regions, bucket)
    }
}
