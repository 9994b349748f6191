use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aggregate::{aggregate_ad, aggregate_business, join, AdTotals, AggregatedBucket, BusinessTotals};
use crate::dataset::Dataset;
use crate::filter::{filter_ad_records, filter_business_records, FilterSpec};
use crate::kpi::{derive, KpiSet};
use crate::summary::{
    summarize_by_campaign, summarize_by_platform, CampaignRanking, CampaignSummary,
    PlatformSummary,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportOptions {
    pub top_campaigns: usize,
    pub campaign_ranking: CampaignRanking,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            top_campaigns: 6,
            campaign_ranking: CampaignRanking::Revenue,
        }
    }
}

/// Everything the presentation layer needs for one filter selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReport {
    pub filter: FilterSpec,
    pub kpis: KpiSet,
    pub trend: Vec<AggregatedBucket>,
    pub platforms: Vec<PlatformSummary>,
    pub campaigns: Vec<CampaignSummary>,
}

/// One full recomputation: filter, bucket, join, derive, summarize.
pub fn build_report(dataset: &Dataset, spec: &FilterSpec, options: &ReportOptions) -> DashboardReport {
    let ads = filter_ad_records(dataset.ad_records(), spec);
    let business = filter_business_records(dataset.business_records(), spec);

    let ad_buckets = aggregate_ad(ads.iter().copied(), spec.bucket());
    let business_buckets = aggregate_business(business.iter().copied(), spec.bucket());
    let trend = join(&ad_buckets, &business_buckets);

    let ad_totals: AdTotals = ads.iter().copied().sum();
    let business_totals: BusinessTotals = business.iter().copied().sum();
    let kpis = derive(&ad_totals, &business_totals);

    let platforms = summarize_by_platform(ads.iter().copied());
    let campaigns = summarize_by_campaign(
        ads.iter().copied(),
        options.campaign_ranking,
        options.top_campaigns,
    );

    debug!(
        ad_rows = ads.len(),
        business_rows = business.len(),
        trend_rows = trend.len(),
        campaigns = campaigns.len(),
        "built dashboard report"
    );

    DashboardReport {
        filter: spec.clone(),
        kpis,
        trend,
        platforms,
        campaigns,
    }
}
