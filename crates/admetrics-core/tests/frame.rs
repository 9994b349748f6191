mod common;

use std::fs;
use std::path::Path;

use admetrics_core::aggregate::{AdTotals, AggregatedBucket, BusinessTotals};
use admetrics_core::frame::{
    campaign_frame, platform_frame, trend_frame, write_frame, FrameError, FrameFormat,
};
use admetrics_core::summary::{summarize_by_campaign, summarize_by_platform, CampaignRanking};
use admetrics_core::Platform;

use common::{ad, date};

fn trend() -> Vec<AggregatedBucket> {
    vec![
        AggregatedBucket {
            start: date(2024, 1, 1),
            ad: AdTotals {
                spend: 100.0,
                attributed_revenue: 200.0,
                clicks: 10,
                impressions: 1000,
            },
            business: BusinessTotals {
                total_revenue: 500.0,
                gross_profit: 150.0,
                new_orders: 5,
                total_orders: 8,
                new_customers: 4,
            },
        },
        AggregatedBucket {
            start: date(2024, 1, 8),
            ad: AdTotals::default(),
            business: BusinessTotals::default(),
        },
    ]
}

#[test]
fn trend_frame_has_one_row_per_bucket() {
    let df = trend_frame(&trend()).unwrap();
    assert_eq!(df.height(), 2);
    let names: Vec<&str> = df.get_column_names().into_iter().map(|n| n.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "date",
            "spend",
            "attributed_revenue",
            "clicks",
            "impressions",
            "total_revenue",
            "gross_profit",
            "new_orders",
            "total_orders",
            "new_customers",
        ]
    );
}

#[test]
fn summary_frames() {
    let day = date(2024, 1, 1);
    let records = vec![
        ad(day, Platform::Google, "CA", "A", 10.0, 30.0),
        ad(day, Platform::TikTok, "CA", "B", 5.0, 5.0),
    ];

    let campaigns = campaign_frame(&summarize_by_campaign(&records, CampaignRanking::Revenue, 6)).unwrap();
    assert_eq!(campaigns.height(), 2);
    assert_eq!(campaigns.width(), 4);

    let platforms = platform_frame(&summarize_by_platform(&records)).unwrap();
    assert_eq!(platforms.height(), 2);
}

#[test]
fn writes_csv_with_header() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trend.csv");
    let mut df = trend_frame(&trend()).unwrap();

    write_frame(&mut df, &path, FrameFormat::Csv).unwrap();

    let written = fs::read_to_string(&path).unwrap();
    let mut lines = written.lines();
    assert_eq!(
        lines.next(),
        Some("date,spend,attributed_revenue,clicks,impressions,total_revenue,gross_profit,new_orders,total_orders,new_customers")
    );
    let first = lines.next().unwrap();
    assert!(first.starts_with("2024-01-01,"));
    assert!(first.contains(",10,1000,"));
    assert_eq!(lines.count(), 1);
}

#[test]
fn writes_parquet() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trend.parquet");
    let mut df = trend_frame(&trend()).unwrap();

    write_frame(&mut df, &path, FrameFormat::Parquet).unwrap();
    assert!(fs::metadata(&path).unwrap().len() > 0);
}

#[test]
fn format_from_name_and_extension() {
    assert_eq!("CSV".parse::<FrameFormat>().unwrap(), FrameFormat::Csv);
    assert_eq!(
        FrameFormat::from_path(Path::new("out/trend.parquet")),
        Some(FrameFormat::Parquet)
    );
    assert_eq!(FrameFormat::from_path(Path::new("trend")), None);
    assert!(matches!(
        "xlsx".parse::<FrameFormat>(),
        Err(FrameError::UnknownFormat(_))
    ));
}
