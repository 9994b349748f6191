mod common;

use std::collections::BTreeSet;

use admetrics_core::bucket::Bucket;
use admetrics_core::dataset::{Dataset, FilterDefaults};
use admetrics_core::error::FilterError;
use admetrics_core::filter::{
    filter_ad_records, filter_business_records, parse_platforms, parse_regions, FilterRequest,
    FilterSpec,
};
use admetrics_core::Platform;

use common::{ad, business, date};

fn spec(platforms: &[Platform], regions: &[&str]) -> FilterSpec {
    FilterSpec::new(
        date(2024, 1, 2),
        date(2024, 1, 4),
        platforms.iter().copied(),
        regions.iter().copied(),
        Bucket::Day,
    )
    .unwrap()
}

#[test]
fn inverted_range_is_rejected() {
    let err = FilterSpec::new(
        date(2024, 2, 1),
        date(2024, 1, 1),
        Platform::ALL,
        ["CA"],
        Bucket::Week,
    )
    .unwrap_err();

    assert_eq!(
        err,
        FilterError::InvertedRange {
            start: date(2024, 2, 1),
            end: date(2024, 1, 1)
        }
    );
}

#[test]
fn single_day_range_is_allowed() {
    let spec = FilterSpec::new(
        date(2024, 1, 1),
        date(2024, 1, 1),
        Platform::ALL,
        ["CA"],
        Bucket::Day,
    )
    .unwrap();
    assert!(spec.contains_date(date(2024, 1, 1)));
    assert!(!spec.contains_date(date(2024, 1, 2)));
}

#[test]
fn ad_filter_requires_platform_region_and_date() {
    let records = vec![
        ad(date(2024, 1, 1), Platform::Google, "CA", "A", 1.0, 1.0), // before range
        ad(date(2024, 1, 2), Platform::Google, "CA", "A", 2.0, 2.0), // kept
        ad(date(2024, 1, 3), Platform::TikTok, "CA", "B", 3.0, 3.0), // platform excluded
        ad(date(2024, 1, 3), Platform::Facebook, "NY", "C", 4.0, 4.0), // region excluded
        ad(date(2024, 1, 4), Platform::Facebook, "CA", "C", 5.0, 5.0), // kept, inclusive end
        ad(date(2024, 1, 5), Platform::Google, "CA", "A", 6.0, 6.0), // after range
    ];

    let kept = filter_ad_records(
        &records,
        &spec(&[Platform::Google, Platform::Facebook], &["CA"]),
    );
    let spends: Vec<f64> = kept.iter().map(|r| r.spend).collect();
    assert_eq!(spends, vec![2.0, 5.0]);
}

#[test]
fn empty_platform_set_selects_nothing() {
    let records = vec![ad(date(2024, 1, 2), Platform::Google, "CA", "A", 1.0, 1.0)];
    assert!(filter_ad_records(&records, &spec(&[], &["CA"])).is_empty());
}

#[test]
fn empty_region_set_selects_nothing() {
    let records = vec![ad(date(2024, 1, 2), Platform::Google, "CA", "A", 1.0, 1.0)];
    assert!(filter_ad_records(&records, &spec(&Platform::ALL, &[])).is_empty());
}

#[test]
fn business_filter_ignores_platform_and_region() {
    let records = vec![
        business(date(2024, 1, 1), 1.0, 0.0, 0, 0, 0),
        business(date(2024, 1, 2), 2.0, 0.0, 0, 0, 0),
        business(date(2024, 1, 4), 4.0, 0.0, 0, 0, 0),
        business(date(2024, 1, 5), 5.0, 0.0, 0, 0, 0),
    ];

    let kept = filter_business_records(&records, &spec(&[], &[]));
    let revenue: Vec<f64> = kept.iter().map(|r| r.total_revenue).collect();
    assert_eq!(revenue, vec![2.0, 4.0]);
}

#[test]
fn filtering_leaves_source_untouched() {
    let records = vec![
        ad(date(2024, 1, 2), Platform::Google, "CA", "A", 1.0, 1.0),
        ad(date(2024, 1, 9), Platform::Google, "CA", "A", 1.0, 1.0),
    ];
    let before = records.clone();
    let _ = filter_ad_records(&records, &spec(&Platform::ALL, &["CA"]));
    assert_eq!(records, before);
}

#[test]
fn parses_platform_lists() {
    let parsed = parse_platforms("google, TikTok").unwrap();
    assert_eq!(
        parsed,
        BTreeSet::from([Platform::Google, Platform::TikTok])
    );
    assert!(parse_platforms("").unwrap().is_empty());
    assert!(matches!(
        parse_platforms("google,myspace"),
        Err(FilterError::UnknownPlatform(_))
    ));
}

#[test]
fn parses_region_lists() {
    assert_eq!(
        parse_regions("CA, NY,,"),
        BTreeSet::from(["CA".to_string(), "NY".to_string()])
    );
    assert!(parse_regions(" ").is_empty());
}

fn request_dataset() -> Dataset {
    let ads = vec![
        ad(date(2024, 1, 1), Platform::Google, "TX", "A", 1.0, 1.0),
        ad(date(2024, 1, 20), Platform::Google, "CA", "A", 1.0, 1.0),
        ad(date(2024, 1, 20), Platform::Google, "NY", "A", 1.0, 1.0),
        ad(date(2024, 1, 20), Platform::Google, "FL", "A", 1.0, 1.0),
    ];
    let business_rows = vec![
        business(date(2024, 1, 1), 1.0, 0.0, 0, 0, 0),
        business(date(2024, 1, 20), 1.0, 0.0, 0, 0, 0),
    ];
    Dataset::from_records(ads, business_rows)
}

#[test]
fn absent_request_fields_use_defaults() {
    let spec = FilterRequest::default()
        .resolve(&request_dataset(), &FilterDefaults::default())
        .unwrap();

    assert_eq!(spec.date_start(), date(2024, 1, 1));
    assert_eq!(spec.date_end(), date(2024, 1, 20));
    assert_eq!(spec.platforms().len(), 3);
    assert_eq!(
        spec.regions(),
        &BTreeSet::from(["TX".to_string(), "CA".to_string(), "NY".to_string()])
    );
    assert_eq!(spec.bucket(), Bucket::Week);
}

#[test]
fn present_but_empty_lists_select_nothing() {
    let request = FilterRequest {
        platforms: Some(String::new()),
        regions: Some(String::new()),
        bucket: Some("month".to_string()),
        ..FilterRequest::default()
    };
    let spec = request
        .resolve(&request_dataset(), &FilterDefaults::default())
        .unwrap();

    assert!(spec.platforms().is_empty());
    assert!(spec.regions().is_empty());
    assert_eq!(spec.bucket(), Bucket::Month);
}

#[test]
fn request_errors_surface() {
    let dataset = request_dataset();
    let defaults = FilterDefaults::default();

    let inverted = FilterRequest {
        start: Some("2024-01-10".to_string()),
        end: Some("2024-01-05".to_string()),
        ..FilterRequest::default()
    };
    assert!(matches!(
        inverted.resolve(&dataset, &defaults),
        Err(FilterError::InvertedRange { .. })
    ));

    let bad_date = FilterRequest {
        start: Some("01/05/2024".to_string()),
        ..FilterRequest::default()
    };
    assert!(matches!(
        bad_date.resolve(&dataset, &defaults),
        Err(FilterError::InvalidDate(_))
    ));

    let bad_bucket = FilterRequest {
        bucket: Some("hourly".to_string()),
        ..FilterRequest::default()
    };
    assert!(matches!(
        bad_bucket.resolve(&dataset, &defaults),
        Err(FilterError::UnknownBucket(_))
    ));
}

#[test]
fn request_without_shared_dates_needs_explicit_range() {
    let dataset = Dataset::default();
    let err = FilterRequest::default()
        .resolve(&dataset, &FilterDefaults::default())
        .unwrap_err();
    assert_eq!(err, FilterError::NoDateRange);

    let explicit = FilterRequest {
        start: Some("2024-01-01".to_string()),
        end: Some("2024-01-31".to_string()),
        ..FilterRequest::default()
    };
    assert!(explicit.resolve(&dataset, &FilterDefaults::default()).is_ok());
}
