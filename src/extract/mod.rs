//! Hierarchy-aware record extraction from HTML
//!
//! This module turns a document into indexable records:
//! - The walker visits headings and content nodes in document order
//! - The finalizer attaches position, weight and a stable identifier

pub mod hierarchy;
pub mod markup;
pub mod record;
pub mod walker;

pub use hierarchy::{HeadingHierarchy, HeadingLevel};
pub use record::{finalize, stable_id, CustomRanking, Record};
pub use walker::{HierarchyWalker, NodeMatch, RawRecord, WalkState};

use crate::config::{CompiledConfig, ExtractorConfig};
use crate::error::{ExtractError, Result};
use scraper::Html;
use sha2::{Digest, Sha256};

/// Compute a stable hash for content
pub fn content_hash(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}

/// Extract records from an HTML document
pub fn extract(document: &str, config: &ExtractorConfig) -> Result<Vec<Record>> {
    HierarchyExtractor::new(config)?.extract(document)
}

/// Extract records from a UTF-8 encoded HTML buffer
pub fn extract_bytes(document: &[u8], config: &ExtractorConfig) -> Result<Vec<Record>> {
    HierarchyExtractor::new(config)?.extract_bytes(document)
}

/// Extractor with a validated configuration, reusable across documents
///
/// Walk state lives only for one call, so documents never share hierarchy
/// or anchor.
#[derive(Debug, Clone)]
pub struct HierarchyExtractor {
    compiled: CompiledConfig,
}

impl HierarchyExtractor {
    /// Validate the configuration up front
    pub fn new(config: &ExtractorConfig) -> Result<Self> {
        Ok(Self {
            compiled: config.compile()?,
        })
    }

    /// Extract records from a document string
    pub fn extract(&self, document: &str) -> Result<Vec<Record>> {
        let html = Self::parse(document);
        Ok(finalize(self.walk(&html)))
    }

    /// Extract records from raw bytes, which must be UTF-8
    pub fn extract_bytes(&self, document: &[u8]) -> Result<Vec<Record>> {
        let text = std::str::from_utf8(document).map_err(|e| {
            ExtractError::InvalidInput(format!("document is not valid UTF-8: {}", e))
        })?;
        self.extract(text)
    }

    /// Parse a document; parser errors are recovered by html5ever
    pub fn parse(document: &str) -> Html {
        let document = document.strip_prefix('\u{feff}').unwrap_or(document);
        let html = Html::parse_document(document);
        if !html.errors.is_empty() {
            tracing::debug!("Parser recovered from {} error(s)", html.errors.len());
        }
        html
    }

    /// Raw records of an already parsed document, with their nodes
    pub fn walk<'a>(&self, html: &'a Html) -> Vec<RawRecord<'a>> {
        HierarchyWalker::new(&self.compiled).walk(html)
    }
}
