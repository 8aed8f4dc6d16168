pub mod listing;
pub mod failure;

pub use listing::*;
pub use failure::*;
