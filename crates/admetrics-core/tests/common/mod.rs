#![allow(dead_code)]

use admetrics_core::{AdRecord, BusinessRecord, Platform};
use chrono::NaiveDate;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn ad(
    day: NaiveDate,
    platform: Platform,
    state: &str,
    campaign: &str,
    spend: f64,
    attributed_revenue: f64,
) -> AdRecord {
    AdRecord {
        date: day,
        platform,
        state: state.to_string(),
        campaign: campaign.to_string(),
        spend,
        attributed_revenue,
        clicks: 0,
        impressions: 0,
    }
}

pub fn ad_with_traffic(mut record: AdRecord, clicks: u64, impressions: u64) -> AdRecord {
    record.clicks = clicks;
    record.impressions = impressions;
    record
}

pub fn business(
    day: NaiveDate,
    total_revenue: f64,
    gross_profit: f64,
    new_orders: u64,
    total_orders: u64,
    new_customers: u64,
) -> BusinessRecord {
    BusinessRecord {
        date: day,
        total_revenue,
        gross_profit,
        new_orders,
        total_orders,
        new_customers,
    }
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
