use std::collections::{BTreeSet, HashSet};

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::bucket::Bucket;
use crate::filter::FilterSpec;
use crate::{AdRecord, BusinessRecord, LoadedSources, Platform, SourceReport};

/// Selectable date range shared by all non-empty sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateBounds {
    pub min: NaiveDate,
    pub max: NaiveDate,
}

/// How the default selection is derived when a query leaves a field unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterDefaults {
    pub bucket: Bucket,
    pub lookback_days: u32,
    pub region_count: usize,
}

impl Default for FilterDefaults {
    fn default() -> Self {
        Self {
            bucket: Bucket::Week,
            lookback_days: 30,
            region_count: 3,
        }
    }
}

/// Immutable handle over the loaded tables, built once and shared by every query.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    ad_records: Vec<AdRecord>,
    business_records: Vec<BusinessRecord>,
    reports: Vec<SourceReport>,
    regions: Vec<String>,
    bounds: Option<DateBounds>,
}

impl Dataset {
    /// Concatenates the ad sources in `Platform::ALL` order, preserving row order within each.
    pub fn new(sources: LoadedSources) -> Self {
        let LoadedSources {
            google,
            facebook,
            tiktok,
            business,
            reports,
        } = sources;

        let mut ad_records = Vec::with_capacity(google.len() + facebook.len() + tiktok.len());
        ad_records.extend(google);
        ad_records.extend(facebook);
        ad_records.extend(tiktok);

        let mut dataset = Self::from_records(ad_records, business);
        dataset.reports = reports;
        dataset
    }

    /// Builds a handle from already-ordered records.
    pub fn from_records(ad_records: Vec<AdRecord>, business_records: Vec<BusinessRecord>) -> Self {
        let regions = distinct_regions(&ad_records);
        let bounds = shared_bounds(&ad_records, &business_records);
        if bounds.is_none() {
            warn!("sources share no overlapping date range");
        }

        Self {
            ad_records,
            business_records,
            reports: Vec::new(),
            regions,
            bounds,
        }
    }

    pub fn ad_records(&self) -> &[AdRecord] {
        &self.ad_records
    }

    pub fn business_records(&self) -> &[BusinessRecord] {
        &self.business_records
    }

    pub fn reports(&self) -> &[SourceReport] {
        &self.reports
    }

    /// Distinct regions in encounter order.
    pub fn regions(&self) -> &[String] {
        &self.regions
    }

    pub fn date_bounds(&self) -> Option<DateBounds> {
        self.bounds
    }

    /// The first `count` regions, or all of them when there are no more than `count`.
    pub fn default_regions(&self, count: usize) -> BTreeSet<String> {
        self.regions.iter().take(count).cloned().collect()
    }

    /// The last `lookback_days` of the shared range (clamped to its start), every platform,
    /// the leading regions. `None` when the sources share no dates.
    pub fn default_filter(&self, defaults: &FilterDefaults) -> Option<FilterSpec> {
        let bounds = self.bounds?;
        let start = bounds
            .max
            .checked_sub_signed(Duration::days(defaults.lookback_days as i64))
            .unwrap_or(bounds.min)
            .max(bounds.min);

        FilterSpec::new(
            start,
            bounds.max,
            Platform::ALL,
            self.default_regions(defaults.region_count),
            defaults.bucket,
        )
        .ok()
    }
}

fn distinct_regions(records: &[AdRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    records
        .iter()
        .filter(|record| seen.insert(record.state.as_str()))
        .map(|record| record.state.clone())
        .collect()
}

fn date_range<'a>(dates: impl Iterator<Item = &'a NaiveDate>) -> Option<(NaiveDate, NaiveDate)> {
    dates.fold(None, |range, date| match range {
        None => Some((*date, *date)),
        Some((min, max)) => Some((min.min(*date), max.max(*date))),
    })
}

/// Latest per-source minimum and earliest per-source maximum over the non-empty sources.
fn shared_bounds(ad_records: &[AdRecord], business_records: &[BusinessRecord]) -> Option<DateBounds> {
    let mut ranges: Vec<(NaiveDate, NaiveDate)> = Platform::ALL
        .iter()
        .filter_map(|platform| {
            date_range(
                ad_records
                    .iter()
                    .filter(|record| record.platform == *platform)
                    .map(|record| &record.date),
            )
        })
        .collect();
    ranges.extend(date_range(business_records.iter().map(|record| &record.date)));

    let min = ranges.iter().map(|(min, _)| *min).max()?;
    let max = ranges.iter().map(|(_, max)| *max).min()?;
    (min <= max).then_some(DateBounds { min, max })
}
