/// A column a source format requires, with the header spellings it accepts.
pub trait SchemaColumn: Copy + Eq + std::hash::Hash + 'static {
    fn canonical_name(&self) -> &'static str;
    fn aliases(&self) -> &'static [&'static str];
    fn all() -> &'static [Self];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdColumn {
    Date,
    State,
    Campaign,
    Impressions,
    Clicks,
    Spend,
    AttributedRevenue,
}

impl SchemaColumn for AdColumn {
    fn canonical_name(&self) -> &'static str {
        match self {
            AdColumn::Date => "date",
            AdColumn::State => "state",
            AdColumn::Campaign => "campaign",
            AdColumn::Impressions => "impression",
            AdColumn::Clicks => "clicks",
            AdColumn::Spend => "spend",
            AdColumn::AttributedRevenue => "attributed revenue",
        }
    }

    fn aliases(&self) -> &'static [&'static str] {
        match self {
            AdColumn::Date => &["date"],
            AdColumn::State => &["state", "region"],
            AdColumn::Campaign => &["campaign"],
            AdColumn::Impressions => &["impression", "impressions"],
            AdColumn::Clicks => &["clicks"],
            AdColumn::Spend => &["spend"],
            AdColumn::AttributedRevenue => &["attributed revenue", "attributed_revenue"],
        }
    }

    fn all() -> &'static [Self] {
        use AdColumn::*;
        &[
            Date,
            State,
            Campaign,
            Impressions,
            Clicks,
            Spend,
            AttributedRevenue,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BusinessColumn {
    Date,
    TotalOrders,
    NewOrders,
    NewCustomers,
    TotalRevenue,
    GrossProfit,
}

impl SchemaColumn for BusinessColumn {
    fn canonical_name(&self) -> &'static str {
        match self {
            BusinessColumn::Date => "date",
            BusinessColumn::TotalOrders => "# of orders",
            BusinessColumn::NewOrders => "# of new orders",
            BusinessColumn::NewCustomers => "new customers",
            BusinessColumn::TotalRevenue => "total revenue",
            BusinessColumn::GrossProfit => "gross profit",
        }
    }

    fn aliases(&self) -> &'static [&'static str] {
        match self {
            BusinessColumn::Date => &["date"],
            BusinessColumn::TotalOrders => &["# of orders", "total_orders"],
            BusinessColumn::NewOrders => &["# of new orders", "new_orders"],
            BusinessColumn::NewCustomers => &["new customers", "new_customers"],
            BusinessColumn::TotalRevenue => &["total revenue", "total_revenue"],
            BusinessColumn::GrossProfit => &["gross profit", "gross_profit"],
        }
    }

    fn all() -> &'static [Self] {
        use BusinessColumn::*;
        &[
            Date,
            TotalOrders,
            NewOrders,
            NewCustomers,
            TotalRevenue,
            GrossProfit,
        ]
    }
}
