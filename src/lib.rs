//! hierex - Hierarchy-aware HTML extraction for search indexing
//!
//! This library turns an HTML page into an ordered list of records, one per
//! content node, each carrying the headings that contextualize it, the nearest
//! anchor for deep-linking, a ranking weight and a stable identifier.

pub mod cli;
pub mod config;
pub mod error;
pub mod extract;

/// Re-export commonly used types
pub use config::ExtractorConfig;
pub use error::{ExtractError, Result};
pub use extract::{
    extract, extract_bytes, HeadingHierarchy, HeadingLevel, HierarchyExtractor, Record,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_NAME: &str = "hierex";
