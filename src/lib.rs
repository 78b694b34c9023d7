pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod matching;
pub mod normalize;
pub mod report;

pub use error::{PricedeltaError, Result};
