use std::fmt;

use serde::{Deserialize, Serialize};

use crate::aggregate::{AdTotals, BusinessTotals};

/// Zero-guarded division: a zero denominator yields 0, never NaN or infinity.
pub fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KpiUnit {
    /// A multiple, e.g. 2.0x.
    Ratio,
    Currency,
    Percent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kpi {
    Roas,
    Cac,
    ConversionRate,
    ProfitMargin,
    Mer,
    Ctr,
    Aov,
    Cpc,
    Poas,
}

impl Kpi {
    pub const ALL: [Kpi; 9] = [
        Kpi::Roas,
        Kpi::Cac,
        Kpi::ConversionRate,
        Kpi::ProfitMargin,
        Kpi::Mer,
        Kpi::Ctr,
        Kpi::Aov,
        Kpi::Cpc,
        Kpi::Poas,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Kpi::Roas => "roas",
            Kpi::Cac => "cac",
            Kpi::ConversionRate => "conversion_rate",
            Kpi::ProfitMargin => "profit_margin",
            Kpi::Mer => "mer",
            Kpi::Ctr => "ctr",
            Kpi::Aov => "aov",
            Kpi::Cpc => "cpc",
            Kpi::Poas => "poas",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Kpi::Roas => "ROAS",
            Kpi::Cac => "CAC",
            Kpi::ConversionRate => "Conversion Rate",
            Kpi::ProfitMargin => "Profit Margin",
            Kpi::Mer => "MER",
            Kpi::Ctr => "CTR",
            Kpi::Aov => "Avg. Order Value",
            Kpi::Cpc => "Cost Per Click",
            Kpi::Poas => "Profit on Ad Spend",
        }
    }

    pub fn unit(&self) -> KpiUnit {
        match self {
            Kpi::Roas | Kpi::Mer | Kpi::Poas => KpiUnit::Ratio,
            Kpi::Cac | Kpi::Aov | Kpi::Cpc => KpiUnit::Currency,
            Kpi::ConversionRate | Kpi::ProfitMargin | Kpi::Ctr => KpiUnit::Percent,
        }
    }

    /// `(numerator, denominator)` of the formula, drawn from the filtered totals.
    pub fn terms(&self, ad: &AdTotals, business: &BusinessTotals) -> (f64, f64) {
        match self {
            Kpi::Roas => (ad.attributed_revenue, ad.spend),
            Kpi::Cac => (ad.spend, business.new_customers as f64),
            Kpi::ConversionRate => (business.new_orders as f64, business.new_customers as f64),
            Kpi::ProfitMargin => (business.gross_profit, business.total_revenue),
            Kpi::Mer => (business.total_revenue, ad.spend),
            Kpi::Ctr => (ad.clicks as f64, ad.impressions as f64),
            Kpi::Aov => (business.total_revenue, business.total_orders as f64),
            Kpi::Cpc => (ad.spend, ad.clicks as f64),
            Kpi::Poas => (business.gross_profit, ad.spend),
        }
    }

    pub fn evaluate(&self, ad: &AdTotals, business: &BusinessTotals) -> f64 {
        let (numerator, denominator) = self.terms(ad, business);
        let scale = match self.unit() {
            KpiUnit::Percent => 100.0,
            KpiUnit::Ratio | KpiUnit::Currency => 1.0,
        };
        ratio(numerator * scale, denominator)
    }
}

impl fmt::Display for Kpi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Derived KPIs plus the raw totals they were computed from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct KpiSet {
    pub roas: f64,
    pub cac: f64,
    pub conversion_rate: f64,
    pub profit_margin: f64,
    pub mer: f64,
    pub ctr: f64,
    pub aov: f64,
    pub cpc: f64,
    pub poas: f64,
    pub ad_totals: AdTotals,
    pub business_totals: BusinessTotals,
}

impl KpiSet {
    pub fn get(&self, kpi: Kpi) -> f64 {
        match kpi {
            Kpi::Roas => self.roas,
            Kpi::Cac => self.cac,
            Kpi::ConversionRate => self.conversion_rate,
            Kpi::ProfitMargin => self.profit_margin,
            Kpi::Mer => self.mer,
            Kpi::Ctr => self.ctr,
            Kpi::Aov => self.aov,
            Kpi::Cpc => self.cpc,
            Kpi::Poas => self.poas,
        }
    }

    pub fn spend(&self) -> f64 {
        self.ad_totals.spend
    }

    pub fn attributed_revenue(&self) -> f64 {
        self.ad_totals.attributed_revenue
    }

    pub fn new_orders(&self) -> u64 {
        self.business_totals.new_orders
    }

    pub fn new_customers(&self) -> u64 {
        self.business_totals.new_customers
    }

    pub fn gross_profit(&self) -> f64 {
        self.business_totals.gross_profit
    }

    pub fn total_revenue(&self) -> f64 {
        self.business_totals.total_revenue
    }
}

/// Computes every KPI from totals over the full filtered range.
pub fn derive(ad: &AdTotals, business: &BusinessTotals) -> KpiSet {
    KpiSet {
        roas: Kpi::Roas.evaluate(ad, business),
        cac: Kpi::Cac.evaluate(ad, business),
        conversion_rate: Kpi::ConversionRate.evaluate(ad, business),
        profit_margin: Kpi::ProfitMargin.evaluate(ad, business),
        mer: Kpi::Mer.evaluate(ad, business),
        ctr: Kpi::Ctr.evaluate(ad, business),
        aov: Kpi::Aov.evaluate(ad, business),
        cpc: Kpi::Cpc.evaluate(ad, business),
        poas: Kpi::Poas.evaluate(ad, business),
        ad_totals: *ad,
        business_totals: *business,
    }
}
