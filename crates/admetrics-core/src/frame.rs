use std::fs::File;
use std::path::Path;
use std::str::FromStr;

use polars::io::parquet::write::{ParquetCompression, ParquetWriter, StatisticsOptions};
use polars::prelude::{CsvWriter, DataFrame, NamedFrom, PolarsError, SerWriter, Series};
use thiserror::Error;

use crate::aggregate::AggregatedBucket;
use crate::summary::{CampaignSummary, PlatformSummary};

#[derive(Debug, Error)]
pub enum FrameError {
    #[error(transparent)]
    Polars(#[from] PolarsError),
    #[error("failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("unknown output format '{0}', expected csv or parquet")]
    UnknownFormat(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameFormat {
    Csv,
    Parquet,
}

impl FrameFormat {
    /// Guesses the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        ext.parse().ok()
    }
}

impl FromStr for FrameFormat {
    type Err = FrameError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(FrameFormat::Csv),
            "parquet" | "pq" => Ok(FrameFormat::Parquet),
            other => Err(FrameError::UnknownFormat(other.to_string())),
        }
    }
}

/// The joined trend series as one row per bucket, dates as ISO strings.
pub fn trend_frame(buckets: &[AggregatedBucket]) -> Result<DataFrame, FrameError> {
    let column_f64 = |f: fn(&AggregatedBucket) -> f64| buckets.iter().map(f).collect::<Vec<f64>>();
    let column_u64 = |f: fn(&AggregatedBucket) -> u64| buckets.iter().map(f).collect::<Vec<u64>>();

    let dates: Vec<String> = buckets
        .iter()
        .map(|b| b.start.format("%Y-%m-%d").to_string())
        .collect();

    let df = DataFrame::new(vec![
        Series::new("date".into(), dates).into(),
        Series::new("spend".into(), column_f64(|b| b.ad.spend)).into(),
        Series::new(
            "attributed_revenue".into(),
            column_f64(|b| b.ad.attributed_revenue),
        )
        .into(),
        Series::new("clicks".into(), column_u64(|b| b.ad.clicks)).into(),
        Series::new("impressions".into(), column_u64(|b| b.ad.impressions)).into(),
        Series::new(
            "total_revenue".into(),
            column_f64(|b| b.business.total_revenue),
        )
        .into(),
        Series::new("gross_profit".into(), column_f64(|b| b.business.gross_profit)).into(),
        Series::new("new_orders".into(), column_u64(|b| b.business.new_orders)).into(),
        Series::new("total_orders".into(), column_u64(|b| b.business.total_orders)).into(),
        Series::new(
            "new_customers".into(),
            column_u64(|b| b.business.new_customers),
        )
        .into(),
    ])?;

    Ok(df)
}

pub fn campaign_frame(campaigns: &[CampaignSummary]) -> Result<DataFrame, FrameError> {
    let names: Vec<&str> = campaigns.iter().map(|c| c.campaign.as_str()).collect();
    let df = DataFrame::new(vec![
        Series::new("campaign".into(), names).into(),
        Series::new(
            "spend".into(),
            campaigns.iter().map(|c| c.spend).collect::<Vec<f64>>(),
        )
        .into(),
        Series::new(
            "attributed_revenue".into(),
            campaigns
                .iter()
                .map(|c| c.attributed_revenue)
                .collect::<Vec<f64>>(),
        )
        .into(),
        Series::new(
            "roas".into(),
            campaigns.iter().map(|c| c.roas).collect::<Vec<f64>>(),
        )
        .into(),
    ])?;

    Ok(df)
}

pub fn platform_frame(platforms: &[PlatformSummary]) -> Result<DataFrame, FrameError> {
    let names: Vec<&str> = platforms.iter().map(|p| p.platform.as_str()).collect();
    let df = DataFrame::new(vec![
        Series::new("platform".into(), names).into(),
        Series::new(
            "spend".into(),
            platforms.iter().map(|p| p.spend).collect::<Vec<f64>>(),
        )
        .into(),
        Series::new(
            "attributed_revenue".into(),
            platforms
                .iter()
                .map(|p| p.attributed_revenue)
                .collect::<Vec<f64>>(),
        )
        .into(),
        Series::new(
            "roas".into(),
            platforms.iter().map(|p| p.roas).collect::<Vec<f64>>(),
        )
        .into(),
    ])?;

    Ok(df)
}

pub fn write_frame(df: &mut DataFrame, path: &Path, format: FrameFormat) -> Result<(), FrameError> {
    let mut file = File::create(path).map_err(|source| FrameError::Io {
        path: path.display().to_string(),
        source,
    })?;

    match format {
        FrameFormat::Csv => {
            CsvWriter::new(&mut file).include_header(true).finish(df)?;
        }
        FrameFormat::Parquet => {
            ParquetWriter::new(&mut file)
                .with_compression(ParquetCompression::Zstd(None))
                .with_statistics(StatisticsOptions::default())
                .finish(df)?;
        }
    }

    Ok(())
}
