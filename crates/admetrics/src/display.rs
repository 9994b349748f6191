//! Terminal rendering of a [`DashboardReport`]. Formatting here is for display only;
//! every value stays a plain number in the report itself.

use admetrics_core::kpi::{Kpi, KpiUnit};
use admetrics_core::report::DashboardReport;
use admetrics_core::SourceReport;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};

/// Inserts `,` every three digits of the integer part.
fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// `$1,234.56` with `decimals` fraction digits. Negative values get a leading `-`.
pub fn currency(value: f64, decimals: usize) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (fixed.as_str(), None),
    };

    match frac_part {
        Some(frac) => format!("{sign}${}.{frac}", group_thousands(int_part)),
        None => format!("{sign}${}", group_thousands(int_part)),
    }
}

/// Campaign-table style: `$1.2M`, `$45k`, `$950`.
pub fn compact_currency(value: f64) -> String {
    if value >= 1_000_000.0 {
        format!("${:.1}M", value / 1_000_000.0)
    } else if value >= 1_000.0 {
        format!("${:.0}k", value / 1_000.0)
    } else {
        currency(value, 0)
    }
}

pub fn multiple(value: f64) -> String {
    format!("{value:.2}x")
}

pub fn percent(value: f64) -> String {
    format!("{value:.2}%")
}

pub fn count(value: u64) -> String {
    group_thousands(&value.to_string())
}

pub fn format_kpi(kpi: Kpi, value: f64) -> String {
    match kpi.unit() {
        KpiUnit::Ratio => multiple(value),
        KpiUnit::Currency => currency(value, 2),
        KpiUnit::Percent => percent(value),
    }
}

fn table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn right(text: String) -> Cell {
    Cell::new(text).set_alignment(CellAlignment::Right)
}

pub fn kpi_table(report: &DashboardReport) -> Table {
    let kpis = &report.kpis;
    let mut table = table(vec!["Metric", "Value"]);

    table.add_row(vec![
        Cell::new("Total Marketing Spend"),
        right(currency(kpis.spend(), 0)),
    ]);
    table.add_row(vec![
        Cell::new("Attributed Revenue"),
        right(currency(kpis.attributed_revenue(), 0)),
    ]);
    table.add_row(vec![Cell::new("New Orders"), right(count(kpis.new_orders()))]);
    table.add_row(vec![
        Cell::new("New Customers"),
        right(count(kpis.new_customers())),
    ]);
    table.add_row(vec![
        Cell::new("Gross Profit"),
        right(currency(kpis.gross_profit(), 0)),
    ]);
    for kpi in Kpi::ALL {
        table.add_row(vec![Cell::new(kpi.label()), right(format_kpi(kpi, kpis.get(kpi)))]);
    }
    table
}

pub fn platform_table(report: &DashboardReport) -> Table {
    let mut table = table(vec!["Platform", "Spend", "Attributed Revenue", "ROAS"]);
    for summary in &report.platforms {
        table.add_row(vec![
            Cell::new(summary.platform),
            right(currency(summary.spend, 0)),
            right(currency(summary.attributed_revenue, 0)),
            right(multiple(summary.roas)),
        ]);
    }
    table
}

pub fn campaign_table(report: &DashboardReport) -> Table {
    let mut table = table(vec!["Campaign", "Spend", "Attributed Revenue", "ROAS"]);
    for summary in &report.campaigns {
        table.add_row(vec![
            Cell::new(&summary.campaign),
            right(compact_currency(summary.spend)),
            right(compact_currency(summary.attributed_revenue)),
            right(multiple(summary.roas)),
        ]);
    }
    table
}

pub fn trend_table(report: &DashboardReport) -> Table {
    let mut table = table(vec![
        "Bucket",
        "Spend",
        "Attributed Revenue",
        "Total Revenue",
        "Gross Profit",
        "Orders",
        "New Customers",
    ]);
    for bucket in &report.trend {
        table.add_row(vec![
            Cell::new(bucket.start),
            right(currency(bucket.ad.spend, 0)),
            right(currency(bucket.ad.attributed_revenue, 0)),
            right(currency(bucket.business.total_revenue, 0)),
            right(currency(bucket.business.gross_profit, 0)),
            right(count(bucket.business.total_orders)),
            right(count(bucket.business.new_customers)),
        ]);
    }
    table
}

pub fn sources_table(reports: &[SourceReport]) -> Table {
    let mut table = table(vec!["Source", "Path", "Rows", "First", "Last", "blake3"]);
    let date_cell = |date: Option<chrono::NaiveDate>| {
        Cell::new(date.map_or_else(|| "-".to_string(), |d| d.to_string()))
    };
    for report in reports {
        table.add_row(vec![
            Cell::new(report.kind),
            Cell::new(&report.path),
            right(count(report.row_count as u64)),
            date_cell(report.first_date),
            date_cell(report.last_date),
            Cell::new(&report.fingerprint[..report.fingerprint.len().min(16)]),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_groups_thousands() {
        assert_eq!(currency(1234567.891, 2), "$1,234,567.89");
        assert_eq!(currency(950.0, 0), "$950");
        assert_eq!(currency(0.0, 2), "$0.00");
        assert_eq!(currency(-1500.0, 0), "-$1,500");
        assert_eq!(currency(100.0, 0), "$100");
    }

    #[test]
    fn compact_currency_tiers() {
        assert_eq!(compact_currency(1_240_000.0), "$1.2M");
        assert_eq!(compact_currency(45_300.0), "$45k");
        assert_eq!(compact_currency(999.4), "$999");
    }

    #[test]
    fn kpi_units_render() {
        assert_eq!(format_kpi(Kpi::Roas, 2.0), "2.00x");
        assert_eq!(format_kpi(Kpi::Cac, 25.0), "$25.00");
        assert_eq!(format_kpi(Kpi::ProfitMargin, 30.0), "30.00%");
        assert_eq!(count(1234), "1,234");
    }
}
