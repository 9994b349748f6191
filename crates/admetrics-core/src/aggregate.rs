use std::collections::{BTreeMap, HashMap};
use std::iter::Sum;
use std::ops::AddAssign;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bucket::Bucket;
use crate::{AdRecord, BusinessRecord};

/// Anything keyed by a calendar date.
pub trait Dated {
    fn date(&self) -> NaiveDate;
}

impl Dated for AdRecord {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Dated for BusinessRecord {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

/// Summable numeric fields of one record type. Counts saturate at `u64::MAX`.
pub trait Measures: Default + Copy + AddAssign {}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AdTotals {
    pub spend: f64,
    pub attributed_revenue: f64,
    pub clicks: u64,
    pub impressions: u64,
}

impl Measures for AdTotals {}

impl AddAssign for AdTotals {
    fn add_assign(&mut self, rhs: Self) {
        self.spend += rhs.spend;
        self.attributed_revenue += rhs.attributed_revenue;
        self.clicks = self.clicks.saturating_add(rhs.clicks);
        self.impressions = self.impressions.saturating_add(rhs.impressions);
    }
}

impl From<&AdRecord> for AdTotals {
    fn from(record: &AdRecord) -> Self {
        Self {
            spend: record.spend,
            attributed_revenue: record.attributed_revenue,
            clicks: record.clicks,
            impressions: record.impressions,
        }
    }
}

impl<'a> Sum<&'a AdRecord> for AdTotals {
    fn sum<I: Iterator<Item = &'a AdRecord>>(iter: I) -> Self {
        iter.fold(Self::default(), |mut acc, record| {
            acc += Self::from(record);
            acc
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BusinessTotals {
    pub total_revenue: f64,
    pub gross_profit: f64,
    pub new_orders: u64,
    pub total_orders: u64,
    pub new_customers: u64,
}

impl Measures for BusinessTotals {}

impl AddAssign for BusinessTotals {
    fn add_assign(&mut self, rhs: Self) {
        self.total_revenue += rhs.total_revenue;
        self.gross_profit += rhs.gross_profit;
        self.new_orders = self.new_orders.saturating_add(rhs.new_orders);
        self.total_orders = self.total_orders.saturating_add(rhs.total_orders);
        self.new_customers = self.new_customers.saturating_add(rhs.new_customers);
    }
}

impl From<&BusinessRecord> for BusinessTotals {
    fn from(record: &BusinessRecord) -> Self {
        Self {
            total_revenue: record.total_revenue,
            gross_profit: record.gross_profit,
            new_orders: record.new_orders,
            total_orders: record.total_orders,
            new_customers: record.new_customers,
        }
    }
}

impl<'a> Sum<&'a BusinessRecord> for BusinessTotals {
    fn sum<I: Iterator<Item = &'a BusinessRecord>>(iter: I) -> Self {
        iter.fold(Self::default(), |mut acc, record| {
            acc += Self::from(record);
            acc
        })
    }
}

/// One bucket of one source, keyed by bucket start.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bucketed<T> {
    pub start: NaiveDate,
    pub totals: T,
}

/// One row of the joined trend series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AggregatedBucket {
    #[serde(rename = "date")]
    pub start: NaiveDate,
    #[serde(flatten)]
    pub ad: AdTotals,
    #[serde(flatten)]
    pub business: BusinessTotals,
}

/// Sums records sharing a calendar date: one entry per distinct date in the input.
pub fn rollup_by_date<'a, R, T>(records: impl IntoIterator<Item = &'a R>) -> BTreeMap<NaiveDate, T>
where
    R: Dated + 'a,
    T: Measures + From<&'a R>,
{
    let mut daily: BTreeMap<NaiveDate, T> = BTreeMap::new();
    for record in records {
        *daily.entry(record.date()).or_default() += T::from(record);
    }
    daily
}

/// Folds per-date rows into buckets and densifies the range between the first and last
/// occupied bucket with zero rows. Ascending by bucket start.
pub fn resample<T: Measures>(daily: &BTreeMap<NaiveDate, T>, bucket: Bucket) -> Vec<Bucketed<T>> {
    let mut occupied: BTreeMap<NaiveDate, T> = BTreeMap::new();
    for (date, totals) in daily {
        *occupied.entry(bucket.start_of(*date)).or_default() += *totals;
    }

    let (Some(first), Some(last)) = (
        occupied.keys().next().copied(),
        occupied.keys().next_back().copied(),
    ) else {
        return Vec::new();
    };

    bucket
        .span(first, last)
        .into_iter()
        .map(|start| Bucketed {
            start,
            totals: occupied.get(&start).copied().unwrap_or_default(),
        })
        .collect()
}

/// Date rollup followed by bucket resampling. Empty input yields empty output.
pub fn aggregate<'a, R, T>(records: impl IntoIterator<Item = &'a R>, bucket: Bucket) -> Vec<Bucketed<T>>
where
    R: Dated + 'a,
    T: Measures + From<&'a R>,
{
    let daily = rollup_by_date(records);
    let buckets = resample(&daily, bucket);
    debug!(
        dates = daily.len(),
        buckets = buckets.len(),
        bucket = %bucket,
        "aggregated records"
    );
    buckets
}

pub fn aggregate_ad<'a>(
    records: impl IntoIterator<Item = &'a AdRecord>,
    bucket: Bucket,
) -> Vec<Bucketed<AdTotals>> {
    aggregate(records, bucket)
}

pub fn aggregate_business<'a>(
    records: impl IntoIterator<Item = &'a BusinessRecord>,
    bucket: Bucket,
) -> Vec<Bucketed<BusinessTotals>> {
    aggregate(records, bucket)
}

/// Left join on bucket start with business buckets as the spine. Business buckets without a
/// matching ad bucket get zero ad totals; ad buckets outside the spine are dropped.
pub fn join(
    ad_buckets: &[Bucketed<AdTotals>],
    business_buckets: &[Bucketed<BusinessTotals>],
) -> Vec<AggregatedBucket> {
    let mut ad_by_start: HashMap<NaiveDate, AdTotals> = HashMap::with_capacity(ad_buckets.len());
    for row in ad_buckets {
        *ad_by_start.entry(row.start).or_default() += row.totals;
    }

    business_buckets
        .iter()
        .map(|row| AggregatedBucket {
            start: row.start,
            ad: ad_by_start.get(&row.start).copied().unwrap_or_default(),
            business: row.totals,
        })
        .collect()
}
