use scraper::{ElementRef, Selector};
use vacancy_model::NOT_SPECIFIED;

const LOCATION_ICON: &str = "icon-material-outline-location-on";
const TIME_ICON: &str = "icon-material-outline-access-time";
const EXPIRES: &str = "Expires";

/// What a single `<li>` in a listing footer carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FooterItem {
    Location(String),
    Expiry(String),
    Unrecognized,
}

/// Classify a footer item from its outer markup and its text content.
///
/// The location icon takes precedence. An expiry needs both the clock icon
/// and the word "Expires" somewhere in the markup, and loses that word.
pub fn classify(markup: &str, text: &str) -> FooterItem {
    if markup.contains(LOCATION_ICON) {
        FooterItem::Location(text.trim().to_string())
    } else if markup.contains(TIME_ICON) && markup.contains(EXPIRES) {
        FooterItem::Expiry(text.replace(EXPIRES, "").trim().to_string())
    } else {
        FooterItem::Unrecognized
    }
}

/// Location and expiry read from a listing footer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterFields {
    pub location: String,
    pub expiry: String,
}

impl Default for FooterFields {
    fn default() -> Self {
        Self {
            location: NOT_SPECIFIED.to_string(),
            expiry: NOT_SPECIFIED.to_string(),
        }
    }
}

impl FooterFields {
    /// Scan the footer's items; the first item of each kind wins.
    pub fn from_footer(footer: Option<ElementRef<'_>>) -> Self {
        let Some(footer) = footer else {
            return Self::default();
        };
        let item_sel = Selector::parse("li").expect("valid selector");

        let mut location = None;
        let mut expiry = None;
        for item in footer.select(&item_sel) {
            let text = item.text().collect::<String>();
            match classify(&item.html(), &text) {
                FooterItem::Location(value) => {
                    location.get_or_insert(value);
                }
                FooterItem::Expiry(value) => {
                    expiry.get_or_insert(value);
                }
                FooterItem::Unrecognized => {}
            }
            if location.is_some() && expiry.is_some() {
                break;
            }
        }

        let fallback = Self::default();
        Self {
            location: location.unwrap_or(fallback.location),
            expiry: expiry.unwrap_or(fallback.expiry),
        }
    }
}
