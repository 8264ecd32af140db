// Copyright 2025 the Disclose Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! [`Dom`] implementation over the in-memory [`Document`] tree.

use std::collections::BTreeSet;

use tracing::debug;

use disclose_dom::{Document, NodeId, SelectorList};

use crate::host::Dom;

/// An in-memory host: a [`Document`] plus the bits of page environment the
/// engine consults (viewport width, URL tokens).
///
/// Selector strings are parsed on each call; a selector the engine cannot
/// parse is logged and treated as matching nothing, so one bad selector in a
/// payload degrades that lookup instead of poisoning the host.
#[derive(Clone, Debug)]
pub struct DocumentHost {
    /// The element tree.
    pub doc: Document,
    /// Current viewport width, consulted by breakpoint auto-activation.
    pub viewport_width: f64,
    /// Tokens present in the page URL (query keys, hash fragments).
    pub url_tokens: BTreeSet<String>,
}

impl DocumentHost {
    /// Wrap a document with a desktop-sized viewport and no URL tokens.
    pub fn new(doc: Document) -> Self {
        Self {
            doc,
            viewport_width: 1024.0,
            url_tokens: BTreeSet::new(),
        }
    }

    fn parse(selector: &str) -> Option<SelectorList> {
        match SelectorList::parse(selector) {
            Ok(list) => Some(list),
            Err(err) => {
                debug!(selector, %err, "unparsable selector; matching nothing");
                None
            }
        }
    }
}

impl Dom<NodeId> for DocumentHost {
    fn parent_of(&self, node: &NodeId) -> Option<NodeId> {
        self.doc.parent(*node)
    }

    fn matches(&self, node: &NodeId, selector: &str) -> bool {
        Self::parse(selector).is_some_and(|list| self.doc.matches(*node, &list))
    }

    fn query_all(&self, selector: &str) -> Vec<NodeId> {
        Self::parse(selector)
            .map(|list| self.doc.query_all(&list))
            .unwrap_or_default()
    }

    fn add_class(&mut self, node: &NodeId, class: &str) {
        self.doc.add_class(*node, class);
    }

    fn remove_class(&mut self, node: &NodeId, class: &str) {
        self.doc.remove_class(*node, class);
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.doc.attribute(*node, name).map(str::to_owned)
    }

    fn remove_attribute(&mut self, node: &NodeId, name: &str) {
        self.doc.remove_attribute(*node, name);
    }

    fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    fn has_url_token(&self, token: &str) -> bool {
        self.url_tokens.contains(token)
    }

    fn activates_natively(&self, node: &NodeId) -> bool {
        *node == self.doc.root() || self.doc.tag(*node) == "button"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selector_lookups_go_through_the_tree() {
        let mut doc = Document::new();
        let a = doc.append(doc.root(), "div");
        doc.add_class(a, "x");
        let b = doc.append(a, "span");
        doc.add_class(b, "x");
        let host = DocumentHost::new(doc);

        assert!(host.matches(&a, ".x"));
        assert!(!host.matches(&a, ".y"));
        assert_eq!(host.query_all(".x"), vec![a, b]);
        assert_eq!(host.closest(&b, "div"), Some(a));
        assert!(host.contains(&a, &b));
        assert!(!host.contains(&b, &a));
    }

    #[test]
    fn bad_selectors_match_nothing() {
        let mut doc = Document::new();
        let a = doc.append(doc.root(), "div");
        let host = DocumentHost::new(doc);

        assert!(!host.matches(&a, "div > span"));
        assert!(host.query_all("..").is_empty());
        assert_eq!(host.closest(&a, ""), None);
    }

    #[test]
    fn native_activation_covers_root_and_buttons() {
        let mut doc = Document::new();
        let button = doc.append(doc.root(), "button");
        let span = doc.append(doc.root(), "span");
        let root = doc.root();
        let host = DocumentHost::new(doc);

        assert!(host.activates_natively(&root));
        assert!(host.activates_natively(&button));
        assert!(!host.activates_natively(&span));
    }

    #[test]
    fn environment_fields_are_reflected() {
        let mut host = DocumentHost::new(Document::new());
        assert!(!host.has_url_token("welcome"));
        host.url_tokens.insert("welcome".to_owned());
        assert!(host.has_url_token("welcome"));
        host.viewport_width = 360.0;
        assert_eq!(host.viewport_width(), 360.0);
    }
}
