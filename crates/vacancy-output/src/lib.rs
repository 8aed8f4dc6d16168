pub mod path;
pub mod writer;
