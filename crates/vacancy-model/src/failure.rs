use thiserror::Error;

/// Why a single listing fragment could not be turned into a record.
///
/// These never abort a run: the fragment is logged and dropped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListingParseFailure {
    #[error("listing {index} has no title element")]
    MissingTitle { index: usize },
}

impl ListingParseFailure {
    /// Position of the offending fragment within the page.
    pub fn index(&self) -> usize {
        match self {
            Self::MissingTitle { index } => *index,
        }
    }
}
