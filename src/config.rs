//! Extraction configuration for hierex

use crate::error::{ExtractError, Result as ExtractResult};
use anyhow::{Context, Result};
use scraper::Selector;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// File name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "hierex.toml";

/// Selector matching every heading tag
pub const HEADING_SELECTOR: &str = "h1,h2,h3,h4,h5,h6";

/// Configuration for a single extraction run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// CSS selector of the nodes that become records
    #[serde(default = "default_content_selector")]
    pub content_selector: String,

    /// Tag names stripped from record markup and text
    #[serde(default)]
    pub excluded_tags: Vec<String>,
}

fn default_content_selector() -> String {
    "p".to_string()
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            content_selector: default_content_selector(),
            excluded_tags: Vec::new(),
        }
    }
}

impl ExtractorConfig {
    /// Replace the content selector
    pub fn with_selector(mut self, selector: impl Into<String>) -> Self {
        self.content_selector = selector.into();
        self
    }

    /// Replace the excluded tags
    pub fn with_excluded_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config: ExtractorConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;
        Ok(config)
    }

    /// Load the explicit file, else the first config found on the search path, else defaults
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        match Self::search_paths().into_iter().find(|p| p.is_file()) {
            Some(path) => {
                tracing::debug!("Using config file {:?}", path);
                Self::load(&path)
            }
            None => Ok(Self::default()),
        }
    }

    /// Candidate config files, most specific first
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(CONFIG_FILE_NAME)];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("hierex").join("config.toml"));
        }
        paths
    }

    /// Save configuration as pretty TOML
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {:?}", path))?;

        Ok(())
    }

    /// Render configuration as pretty TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }

    /// Validate the configuration and compile its selectors
    pub fn compile(&self) -> ExtractResult<CompiledConfig> {
        let selector = self.content_selector.trim();
        if selector.is_empty() {
            return Err(ExtractError::InvalidConfiguration(
                "content selector is empty".to_string(),
            ));
        }

        let content = Selector::parse(selector).map_err(|e| {
            ExtractError::InvalidConfiguration(format!(
                "invalid content selector {:?}: {}",
                selector, e
            ))
        })?;

        let combined_source = format!("{},{}", HEADING_SELECTOR, selector);
        let combined = Selector::parse(&combined_source).map_err(|e| {
            ExtractError::InvalidConfiguration(format!(
                "invalid combined selector {:?}: {}",
                combined_source, e
            ))
        })?;

        let mut excluded_tags = BTreeSet::new();
        for tag in &self.excluded_tags {
            let tag = tag.trim();
            if !is_tag_name(tag) {
                return Err(ExtractError::InvalidConfiguration(format!(
                    "invalid excluded tag name {:?}",
                    tag
                )));
            }
            excluded_tags.insert(tag.to_ascii_lowercase());
        }

        Ok(CompiledConfig {
            content,
            combined,
            excluded_tags,
        })
    }
}

/// Plain element names only: letters, digits and dashes, starting with a letter
fn is_tag_name(tag: &str) -> bool {
    let mut chars = tag.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '-')
        }
        _ => false,
    }
}

/// Validated configuration, ready for a walk
#[derive(Debug, Clone)]
pub struct CompiledConfig {
    pub(crate) content: Selector,
    pub(crate) combined: Selector,
    pub(crate) excluded_tags: BTreeSet<String>,
}

impl CompiledConfig {
    /// Whether a lowercased tag name is stripped from records
    pub fn is_excluded(&self, tag_name: &str) -> bool {
        self.excluded_tags.contains(tag_name)
    }
}
