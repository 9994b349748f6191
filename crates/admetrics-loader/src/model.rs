use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Platform {
    Google,
    Facebook,
    TikTok,
}

impl Platform {
    /// Load order of the ad sources. Also the order ad records are concatenated in.
    pub const ALL: [Platform; 3] = [Platform::Google, Platform::Facebook, Platform::TikTok];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Google => "Google",
            Platform::Facebook => "Facebook",
            Platform::TikTok => "TikTok",
        }
    }

    pub fn source_kind(&self) -> SourceKind {
        match self {
            Platform::Google => SourceKind::Google,
            Platform::Facebook => SourceKind::Facebook,
            Platform::TikTok => SourceKind::TikTok,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Platform {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "google" => Ok(Platform::Google),
            "facebook" | "fb" | "meta" => Ok(Platform::Facebook),
            "tiktok" => Ok(Platform::TikTok),
            other => Err(format!("unknown platform '{other}'")),
        }
    }
}

/// The four inputs the dashboard cannot run without.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceKind {
    Google,
    Facebook,
    TikTok,
    Business,
}

impl SourceKind {
    pub const ALL: [SourceKind; 4] = [
        SourceKind::Google,
        SourceKind::Facebook,
        SourceKind::TikTok,
        SourceKind::Business,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Google => "google",
            SourceKind::Facebook => "facebook",
            SourceKind::TikTok => "tiktok",
            SourceKind::Business => "business",
        }
    }

    pub fn default_file_name(&self) -> &'static str {
        match self {
            SourceKind::Google => "Google.csv",
            SourceKind::Facebook => "Facebook.csv",
            SourceKind::TikTok => "TikTok.csv",
            SourceKind::Business => "Business.csv",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of ad-platform activity. The platform tag comes from the source file, never the row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdRecord {
    pub date: NaiveDate,
    pub platform: Platform,
    pub state: String,
    pub campaign: String,
    pub spend: f64,
    pub attributed_revenue: f64,
    pub clicks: u64,
    pub impressions: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessRecord {
    pub date: NaiveDate,
    pub total_revenue: f64,
    pub gross_profit: f64,
    pub new_orders: u64,
    pub total_orders: u64,
    pub new_customers: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceReport {
    pub kind: SourceKind,
    pub path: String,
    pub row_count: usize,
    /// blake3 hex digest of the raw file bytes.
    pub fingerprint: String,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
}

impl SourceReport {
    pub(crate) fn new<'a>(
        kind: SourceKind,
        path: impl Into<String>,
        contents: &[u8],
        dates: impl Iterator<Item = &'a NaiveDate>,
    ) -> Self {
        let mut row_count = 0;
        let mut first_date: Option<NaiveDate> = None;
        let mut last_date: Option<NaiveDate> = None;
        for date in dates {
            row_count += 1;
            first_date = Some(first_date.map_or(*date, |current| current.min(*date)));
            last_date = Some(last_date.map_or(*date, |current| current.max(*date)));
        }

        Self {
            kind,
            path: path.into(),
            row_count,
            fingerprint: blake3::hash(contents).to_hex().to_string(),
            first_date,
            last_date,
        }
    }
}

/// All four typed tables, as handed over by the loader.
#[derive(Debug, Clone, Default)]
pub struct LoadedSources {
    pub google: Vec<AdRecord>,
    pub facebook: Vec<AdRecord>,
    pub tiktok: Vec<AdRecord>,
    pub business: Vec<BusinessRecord>,
    pub reports: Vec<SourceReport>,
}
