use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FilterError;
use crate::kpi::ratio;
use crate::{AdRecord, Platform};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlatformSummary {
    pub platform: Platform,
    pub spend: f64,
    pub attributed_revenue: f64,
    pub roas: f64,
}

/// Spend, attributed revenue and ROAS per platform present in `records`,
/// in `Platform` order (Google, Facebook, TikTok).
pub fn summarize_by_platform<'a>(
    records: impl IntoIterator<Item = &'a AdRecord>,
) -> Vec<PlatformSummary> {
    let mut sums: BTreeMap<Platform, (f64, f64)> = BTreeMap::new();
    for record in records {
        let entry = sums.entry(record.platform).or_default();
        entry.0 += record.spend;
        entry.1 += record.attributed_revenue;
    }

    sums.into_iter()
        .map(|(platform, (spend, attributed_revenue))| PlatformSummary {
            platform,
            spend,
            attributed_revenue,
            roas: ratio(attributed_revenue, spend),
        })
        .collect()
}

/// Column the top-campaign table is ranked by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignRanking {
    #[default]
    Revenue,
    Spend,
}

impl CampaignRanking {
    pub fn as_str(&self) -> &'static str {
        match self {
            CampaignRanking::Revenue => "revenue",
            CampaignRanking::Spend => "spend",
        }
    }

    fn key(&self, summary: &CampaignSummary) -> f64 {
        match self {
            CampaignRanking::Revenue => summary.attributed_revenue,
            CampaignRanking::Spend => summary.spend,
        }
    }
}

impl fmt::Display for CampaignRanking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CampaignRanking {
    type Err = FilterError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "revenue" | "attributed_revenue" | "attributed revenue" => Ok(CampaignRanking::Revenue),
            "spend" => Ok(CampaignRanking::Spend),
            other => Err(FilterError::UnknownRanking(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CampaignSummary {
    pub campaign: String,
    pub spend: f64,
    pub attributed_revenue: f64,
    pub roas: f64,
}

/// Groups by campaign in first-encounter order, ranks descending by `ranking` and keeps the
/// first `limit`. The sort is stable, so ties keep encounter order.
pub fn summarize_by_campaign<'a>(
    records: impl IntoIterator<Item = &'a AdRecord>,
    ranking: CampaignRanking,
    limit: usize,
) -> Vec<CampaignSummary> {
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut summaries: Vec<CampaignSummary> = Vec::new();

    for record in records {
        let slot = *index.entry(record.campaign.as_str()).or_insert_with(|| {
            summaries.push(CampaignSummary {
                campaign: record.campaign.clone(),
                spend: 0.0,
                attributed_revenue: 0.0,
                roas: 0.0,
            });
            summaries.len() - 1
        });
        let summary = &mut summaries[slot];
        summary.spend += record.spend;
        summary.attributed_revenue += record.attributed_revenue;
    }

    for summary in &mut summaries {
        summary.roas = ratio(summary.attributed_revenue, summary.spend);
    }

    summaries.sort_by(|a, b| ranking.key(b).total_cmp(&ranking.key(a)));
    summaries.truncate(limit);
    summaries
}
