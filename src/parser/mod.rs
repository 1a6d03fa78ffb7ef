pub mod document;
pub mod indicators;

pub use document::{Document, Extracted};
pub use indicators::Indicator;
