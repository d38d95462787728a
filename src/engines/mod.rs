//! Search engine implementations.

mod duckduckgo;

pub use duckduckgo::DuckDuckGo;
