//! Single-pass walk over headings and content nodes
//!
//! Headings and content matches are visited together in document order. The
//! walker keeps one mutable [`WalkState`] for the whole document and attaches a
//! snapshot of it to every record it emits.

use super::hierarchy::{HeadingHierarchy, HeadingLevel};
use super::markup::extract_markup;
use crate::config::CompiledConfig;
use scraper::{ElementRef, Html, Selector};

/// How a visited node takes part in the walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeMatch {
    /// Heading only: updates hierarchy and anchor
    Heading(HeadingLevel),
    /// Content only: emits a record
    Content,
    /// Heading that is also selected as content
    Both(HeadingLevel),
}

impl NodeMatch {
    /// Classify an element against the content selector
    pub fn classify(element: ElementRef<'_>, content: &Selector) -> Option<Self> {
        let level = HeadingLevel::from_tag_name(element.value().name());
        let is_content = content.matches(&element);

        match (level, is_content) {
            (Some(level), true) => Some(NodeMatch::Both(level)),
            (Some(level), false) => Some(NodeMatch::Heading(level)),
            (None, true) => Some(NodeMatch::Content),
            (None, false) => None,
        }
    }

    pub fn heading_level(self) -> Option<HeadingLevel> {
        match self {
            NodeMatch::Heading(level) | NodeMatch::Both(level) => Some(level),
            NodeMatch::Content => None,
        }
    }

    pub fn is_content(self) -> bool {
        matches!(self, NodeMatch::Content | NodeMatch::Both(_))
    }
}

/// A record as emitted by the walker, before position and identity
#[derive(Debug, Clone)]
pub struct RawRecord<'a> {
    /// Trimmed outer markup
    pub html: String,
    /// Text content
    pub content: String,
    /// Lowercased tag name
    pub tag_name: String,
    /// Hierarchy at emission time
    pub hierarchy: HeadingHierarchy,
    /// Anchor at emission time
    pub anchor: Option<String>,
    /// Originating node
    pub node: ElementRef<'a>,
}

/// Mutable state threaded through one document
#[derive(Debug, Default)]
pub struct WalkState {
    hierarchy: HeadingHierarchy,
    anchor: Option<String>,
}

impl WalkState {
    pub fn hierarchy(&self) -> &HeadingHierarchy {
        &self.hierarchy
    }

    pub fn anchor(&self) -> Option<&str> {
        self.anchor.as_deref()
    }

    /// Apply a heading: set its level, and take its anchor if it has one
    pub fn enter_heading(&mut self, level: HeadingLevel, heading: ElementRef<'_>) {
        let text: String = heading.text().collect();
        self.hierarchy.set(level, text.trim());

        if let Some(anchor) = resolve_anchor(heading) {
            self.anchor = Some(anchor);
        }

        tracing::trace!(
            "Entered {} {:?}, anchor {:?}",
            level,
            text.trim(),
            self.anchor
        );
    }
}

/// Anchor of a heading: its own `name`, then its own `id`, then the first
/// descendant carrying either
pub fn resolve_anchor(element: ElementRef<'_>) -> Option<String> {
    own_anchor(element)
        .or_else(|| {
            element
                .descendants()
                .skip(1)
                .filter_map(ElementRef::wrap)
                .find_map(own_anchor)
        })
        .map(str::to_string)
}

/// First non-blank `name` or `id`; a blank `name` falls through to `id`
fn own_anchor<'a>(element: ElementRef<'a>) -> Option<&'a str> {
    let el = element.value();
    ["name", "id"]
        .into_iter()
        .filter_map(|attr| el.attr(attr))
        .find(|value| !value.trim().is_empty())
}

/// Walks a parsed document with a compiled configuration
pub struct HierarchyWalker<'c> {
    config: &'c CompiledConfig,
}

impl<'c> HierarchyWalker<'c> {
    pub fn new(config: &'c CompiledConfig) -> Self {
        Self { config }
    }

    /// Produce raw records in document order
    pub fn walk<'a>(&self, document: &'a Html) -> Vec<RawRecord<'a>> {
        let mut state = WalkState::default();
        let mut records = Vec::new();
        let mut skipped = 0usize;

        for element in document.select(&self.config.combined) {
            let Some(node_match) = NodeMatch::classify(element, &self.config.content) else {
                continue;
            };

            if let Some(level) = node_match.heading_level() {
                state.enter_heading(level, element);
            }

            if !node_match.is_content() {
                continue;
            }

            match self.emit(element, &state) {
                Some(record) => records.push(record),
                None => skipped += 1,
            }
        }

        tracing::debug!(
            "Walked document: {} records, {} empty nodes skipped",
            records.len(),
            skipped
        );

        records
    }

    fn emit<'a>(&self, element: ElementRef<'a>, state: &WalkState) -> Option<RawRecord<'a>> {
        let markup = extract_markup(element, self.config);
        if markup.text.trim().is_empty() {
            return None;
        }

        Some(RawRecord {
            html: markup.html,
            content: markup.text,
            tag_name: element.value().name().to_ascii_lowercase(),
            hierarchy: state.hierarchy().clone(),
            anchor: state.anchor().map(str::to_string),
            node: element,
        })
    }
}
