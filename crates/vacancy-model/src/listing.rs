use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Placeholder for company, location and expiry when the listing omits them.
pub const NOT_SPECIFIED: &str = "Not specified";

/// Placeholder for a listing without a description paragraph.
pub const NO_DESCRIPTION: &str = "No description";

/// Upper bound on listings taken from one page, applied before any are skipped.
pub const MAX_LISTINGS: usize = 10;

/// Output column names, in row order.
pub const COLUMNS: [&str; 6] = [
    "Job Title",
    "Company",
    "Location",
    "Expiry Date",
    "Description",
    "Scraped Date",
];

/// One job posting as extracted from the listings page.
///
/// Field names serialize to the column names in [`COLUMNS`], so a record
/// maps directly onto one CSV row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingRecord {
    #[serde(rename = "Job Title")]
    pub title: String,
    #[serde(rename = "Company")]
    pub company: String,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Expiry Date")]
    pub expiry_date: String,
    #[serde(rename = "Description")]
    pub description: String,
    /// Date of the run, shared by every record it produces.
    #[serde(rename = "Scraped Date")]
    pub scraped_date: NaiveDate,
}

impl ListingRecord {
    /// A record with only a title; every optional field holds its placeholder.
    pub fn titled(title: impl Into<String>, scraped_date: NaiveDate) -> Self {
        Self {
            title: title.into(),
            company: NOT_SPECIFIED.to_string(),
            location: NOT_SPECIFIED.to_string(),
            expiry_date: NOT_SPECIFIED.to_string(),
            description: NO_DESCRIPTION.to_string(),
            scraped_date,
        }
    }
}
