//! Markup and text extraction for matched nodes
//!
//! Excluded tags are dropped together with their whole subtree, from both the
//! serialized markup and the collected text. The matched node itself is never
//! dropped.

use crate::config::CompiledConfig;
use scraper::node::Node;
use scraper::ElementRef;

/// Markup and text of one matched node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markup {
    /// Trimmed outer markup
    pub html: String,
    /// Concatenated text of every remaining descendant text node
    pub text: String,
}

impl Markup {
    fn of(element: ElementRef<'_>) -> Self {
        Self {
            html: element.html().trim().to_string(),
            text: element.text().collect(),
        }
    }
}

/// Markup and text of an element with excluded descendants removed
///
/// Pruning happens on a copy of the document tree, so serialization stays
/// with html5ever whether or not anything was excluded.
pub fn extract_markup(element: ElementRef<'_>, config: &CompiledConfig) -> Markup {
    let excluded: Vec<_> = element
        .descendants()
        .skip(1)
        .filter(|node| matches!(node.value(), Node::Element(el) if config.is_excluded(el.name())))
        .map(|node| node.id())
        .collect();

    if excluded.is_empty() {
        return Markup::of(element);
    }

    let mut tree = element.tree().clone();
    for id in excluded {
        if let Some(mut node) = tree.get_mut(id) {
            node.detach();
        }
    }

    match tree.get(element.id()).and_then(ElementRef::wrap) {
        Some(pruned) => Markup::of(pruned),
        None => Markup::of(element),
    }
}
