use std::path::PathBuf;

use admetrics::api::{router, AppState};
use admetrics::display;
use admetrics_core::config::DashboardConfig;
use admetrics_core::dataset::Dataset;
use admetrics_core::filter::FilterRequest;
use admetrics_core::frame::{campaign_frame, trend_frame, write_frame, FrameFormat};
use admetrics_core::report::{build_report, DashboardReport, ReportOptions};
use admetrics_core::summary::CampaignRanking;
use admetrics_loader::load_sources;
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Marketing metrics dashboard CLI and API server", long_about = None)]
struct Cli {
    /// TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Directory holding the Google, Facebook, TikTok and Business CSVs
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print KPIs, platform and campaign summaries and the trend series
    Report(ReportArgs),
    /// Write the trend (or campaign) table to CSV or Parquet
    Export(ExportArgs),
    /// Show what was loaded from each source file
    Sources,
    /// Start the dashboard API server
    Serve(ServeArgs),
}

/// Absent flags fall back to the default selection; an empty list selects nothing.
#[derive(Args, Debug, Default)]
struct FilterArgs {
    /// First day, YYYY-MM-DD
    #[arg(long)]
    start: Option<String>,
    /// Last day (inclusive), YYYY-MM-DD
    #[arg(long)]
    end: Option<String>,
    /// Comma-separated: google,facebook,tiktok
    #[arg(long)]
    platforms: Option<String>,
    /// Comma-separated region codes
    #[arg(long)]
    regions: Option<String>,
    /// day, week or month
    #[arg(long)]
    bucket: Option<String>,
    /// Rank campaigns by revenue or spend
    #[arg(long)]
    ranking: Option<CampaignRanking>,
    /// Number of campaigns to keep
    #[arg(long)]
    top: Option<usize>,
}

impl FilterArgs {
    fn request(&self) -> FilterRequest {
        FilterRequest {
            start: self.start.clone(),
            end: self.end.clone(),
            platforms: self.platforms.clone(),
            regions: self.regions.clone(),
            bucket: self.bucket.clone(),
        }
    }

    fn options(&self, base: ReportOptions) -> ReportOptions {
        ReportOptions {
            top_campaigns: self.top.unwrap_or(base.top_campaigns),
            campaign_ranking: self.ranking.unwrap_or(base.campaign_ranking),
        }
    }
}

#[derive(Args, Debug)]
struct ReportArgs {
    #[command(flatten)]
    filter: FilterArgs,
    /// Print the report as JSON instead of tables
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct ExportArgs {
    #[command(flatten)]
    filter: FilterArgs,
    #[arg(short, long)]
    output: PathBuf,
    /// csv or parquet; guessed from the output extension when omitted
    #[arg(long)]
    format: Option<FrameFormat>,
    /// Export the top-campaign table instead of the trend series
    #[arg(long)]
    campaigns: bool,
}

#[derive(Args, Debug)]
struct ServeArgs {
    /// Address to listen on, e.g. 127.0.0.1:3000
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    match cli.command {
        Command::Report(args) => {
            let dataset = load_dataset(&config)?;
            let report = run_report(&dataset, &config, &args.filter)?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
            Ok(())
        }
        Command::Export(args) => {
            let dataset = load_dataset(&config)?;
            let report = run_report(&dataset, &config, &args.filter)?;
            let format = args
                .format
                .or_else(|| FrameFormat::from_path(&args.output))
                .unwrap_or(FrameFormat::Csv);

            let mut frame = if args.campaigns {
                campaign_frame(&report.campaigns)?
            } else {
                trend_frame(&report.trend)?
            };
            write_frame(&mut frame, &args.output, format)?;
            info!(
                path = %args.output.display(),
                rows = frame.height(),
                ?format,
                "exported frame"
            );
            Ok(())
        }
        Command::Sources => {
            let dataset = load_dataset(&config)?;
            println!("{}", display::sources_table(dataset.reports()));
            match dataset.date_bounds() {
                Some(bounds) => println!("shared date range: {} to {}", bounds.min, bounds.max),
                None => println!("shared date range: none"),
            }
            println!("regions: {}", dataset.regions().join(", "));
            Ok(())
        }
        Command::Serve(args) => {
            let dataset = load_dataset(&config)?;
            let bind = args.bind.unwrap_or_else(|| config.server.bind.clone());
            let state = AppState::new(dataset, config.defaults, config.report);

            let listener = TcpListener::bind(&bind)
                .await
                .with_context(|| format!("failed to bind {bind}"))?;
            info!("listening on {}", listener.local_addr()?);
            axum::serve(listener, router(state)).await?;
            Ok(())
        }
    }
}

fn load_config(cli: &Cli) -> Result<DashboardConfig> {
    let mut config = match &cli.config {
        Some(path) => DashboardConfig::load(path)?,
        None => DashboardConfig::default(),
    };
    config.apply_env()?;
    if let Some(dir) = &cli.data_dir {
        config.data_dir = dir.clone();
    }
    Ok(config)
}

fn load_dataset(config: &DashboardConfig) -> Result<Dataset> {
    let sources = load_sources(&config.source_files())
        .with_context(|| format!("failed to load sources from {}", config.data_dir.display()))?;
    let dataset = Dataset::new(sources);
    info!(
        ad_rows = dataset.ad_records().len(),
        business_rows = dataset.business_records().len(),
        regions = dataset.regions().len(),
        "dataset ready"
    );
    Ok(dataset)
}

fn run_report(
    dataset: &Dataset,
    config: &DashboardConfig,
    filter: &FilterArgs,
) -> Result<DashboardReport> {
    let spec = filter.request().resolve(dataset, &config.defaults)?;
    let options = filter.options(config.report);
    Ok(build_report(dataset, &spec, &options))
}

fn print_report(report: &DashboardReport) {
    let filter = &report.filter;
    println!(
        "{} to {} by {}",
        filter.date_start(),
        filter.date_end(),
        filter.bucket()
    );
    println!("{}", display::kpi_table(report));
    println!("{}", display::platform_table(report));
    println!("{}", display::campaign_table(report));
    println!("{}", display::trend_table(report));
}
