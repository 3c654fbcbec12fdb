//! Core business logic modules

pub mod filter;

// Re-export commonly used types
pub use filter::{FilterResult, RaceFilter};
