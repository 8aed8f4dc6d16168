use crate::footer::FooterFields;
use chrono::{Local, NaiveDate};
use scraper::{ElementRef, Html, Selector};
use vacancy_model::{ListingParseFailure, ListingRecord, MAX_LISTINGS, NOT_SPECIFIED, NO_DESCRIPTION};

/// CSS selectors for the parts of one listing.
struct Selectors {
    listing: Selector,
    title: Selector,
    company: Selector,
    description: Selector,
    footer: Selector,
}

impl Selectors {
    fn new() -> Self {
        let parse = |s: &str| Selector::parse(s).expect("valid selector");
        Self {
            listing: parse("a.job-listing"),
            title: parse("h3.job-listing-title"),
            company: parse("h4.job-listing-company"),
            description: parse("p.job-listing-text"),
            footer: parse("div.job-listing-footer"),
        }
    }
}

/// Extract up to [`MAX_LISTINGS`] records from a listings page, dated today.
pub fn extract(document: &Html) -> Vec<ListingRecord> {
    extract_on(document, Local::now().date_naive())
}

/// Extract records stamped with `scraped_date`.
///
/// Listings that cannot be parsed are logged at warn level and left out;
/// the rest keep their page order.
pub fn extract_on(document: &Html, scraped_date: NaiveDate) -> Vec<ListingRecord> {
    extract_each(document, scraped_date)
        .into_iter()
        .filter_map(|result| match result {
            Ok(record) => Some(record),
            Err(failure) => {
                tracing::warn!("Error processing job listing: {failure}");
                None
            }
        })
        .collect()
}

/// One result per candidate listing, capped at [`MAX_LISTINGS`] before parsing.
pub fn extract_each(
    document: &Html,
    scraped_date: NaiveDate,
) -> Vec<Result<ListingRecord, ListingParseFailure>> {
    let selectors = Selectors::new();

    document
        .select(&selectors.listing)
        .take(MAX_LISTINGS)
        .enumerate()
        .map(|(index, fragment)| parse_listing(&selectors, fragment, index, scraped_date))
        .collect()
}

/// Turn a single `a.job-listing` fragment into a record.
pub fn extract_one(
    fragment: ElementRef<'_>,
    index: usize,
    scraped_date: NaiveDate,
) -> Result<ListingRecord, ListingParseFailure> {
    parse_listing(&Selectors::new(), fragment, index, scraped_date)
}

fn parse_listing(
    selectors: &Selectors,
    fragment: ElementRef<'_>,
    index: usize,
    scraped_date: NaiveDate,
) -> Result<ListingRecord, ListingParseFailure> {
    let title = first_text(fragment, &selectors.title)
        .ok_or(ListingParseFailure::MissingTitle { index })?;

    let company = first_text(fragment, &selectors.company).unwrap_or_else(|| NOT_SPECIFIED.to_string());
    let description =
        first_text(fragment, &selectors.description).unwrap_or_else(|| NO_DESCRIPTION.to_string());
    let footer = FooterFields::from_footer(fragment.select(&selectors.footer).next());

    Ok(ListingRecord {
        title,
        company,
        location: footer.location,
        expiry_date: footer.expiry,
        description,
        scraped_date,
    })
}

/// Trimmed text of the first descendant matching `selector`.
fn first_text(element: ElementRef<'_>, selector: &Selector) -> Option<String> {
    element
        .select(selector)
        .next()
        .map(|found| found.text().collect::<String>().trim().to_string())
}
