// Copyright 2025 the Disclose Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The element tree: an arena of nodes with tags, classes, and attributes.

use std::collections::BTreeMap;

use crate::selector::{Compound, SelectorList};

/// Identifier for an element in a [`Document`].
///
/// Ids are only meaningful for the document that issued them. Elements are
/// never removed, so an id stays valid for the lifetime of its document.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug, Default)]
struct NodeData {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    attrs: BTreeMap<String, String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// An in-memory element tree.
///
/// A document always has a root element (tag `body`). New elements are
/// created attached to an existing parent with [`Document::append`], which
/// keeps every node reachable from the root and gives [`Document::query_all`]
/// a stable document order (depth-first, children in insertion order).
///
/// ## Example
///
/// ```
/// use disclose_dom::{Document, SelectorList};
///
/// let mut doc = Document::new();
/// let panel = doc.append(doc.root(), "div");
/// doc.add_class(panel, "panel");
/// doc.set_attribute(panel, "data-name", "menu");
///
/// let sel = SelectorList::parse("div.panel[data-name=menu]").unwrap();
/// assert!(doc.matches(panel, &sel));
/// ```
#[derive(Clone, Debug)]
pub struct Document {
    nodes: Vec<NodeData>,
}

impl Document {
    /// Create a document containing only the root element.
    pub fn new() -> Self {
        Self {
            nodes: vec![NodeData {
                tag: "body".to_owned(),
                ..NodeData::default()
            }],
        }
    }

    /// The root element.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Create a new element with the given tag and attach it under `parent`.
    pub fn append(&mut self, parent: NodeId, tag: &str) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(NodeData {
            tag: tag.to_owned(),
            parent: Some(parent),
            ..NodeData::default()
        });
        self.nodes[parent.idx()].children.push(id);
        id
    }

    /// The element's tag name.
    pub fn tag(&self, node: NodeId) -> &str {
        &self.nodes[node.idx()].tag
    }

    /// The element's parent, if it is not the root.
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.idx()].parent
    }

    /// The element's children, in insertion order.
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.idx()].children
    }

    /// Set the element's id (the `#id` selector target).
    pub fn set_id(&mut self, node: NodeId, id: &str) {
        self.nodes[node.idx()].id = Some(id.to_owned());
    }

    /// Add a class to the element's class list. Adding a class twice is a
    /// no-op.
    pub fn add_class(&mut self, node: NodeId, class: &str) {
        let classes = &mut self.nodes[node.idx()].classes;
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_owned());
        }
    }

    /// Remove a class from the element's class list.
    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        self.nodes[node.idx()].classes.retain(|c| c != class);
    }

    /// Whether the element carries the class.
    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.nodes[node.idx()].classes.iter().any(|c| c == class)
    }

    /// Set an attribute. An empty value models a bare attribute
    /// (`<div data-toggle-close>`).
    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        self.nodes[node.idx()]
            .attrs
            .insert(name.to_owned(), value.to_owned());
    }

    /// Read an attribute value.
    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.nodes[node.idx()].attrs.get(name).map(String::as_str)
    }

    /// Remove an attribute.
    pub fn remove_attribute(&mut self, node: NodeId, name: &str) {
        self.nodes[node.idx()].attrs.remove(name);
    }

    /// Whether the element matches any compound in the selector list.
    pub fn matches(&self, node: NodeId, selector: &SelectorList) -> bool {
        selector
            .parts
            .iter()
            .any(|c| self.matches_compound(node, c))
    }

    fn matches_compound(&self, node: NodeId, compound: &Compound) -> bool {
        let data = &self.nodes[node.idx()];
        if let Some(tag) = &compound.tag
            && data.tag != *tag
        {
            return false;
        }
        if let Some(id) = &compound.id
            && data.id.as_deref() != Some(id.as_str())
        {
            return false;
        }
        if !compound
            .classes
            .iter()
            .all(|class| data.classes.iter().any(|c| c == class))
        {
            return false;
        }
        compound.attrs.iter().all(|attr| {
            data.attrs.get(&attr.name).is_some_and(|v| {
                attr.value.as_deref().is_none_or(|expected| v == expected)
            })
        })
    }

    /// All matching elements in document order (depth-first from the root).
    pub fn query_all(&self, selector: &SelectorList) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![self.root()];
        while let Some(node) = stack.pop() {
            if self.matches(node, selector) {
                out.push(node);
            }
            // Reverse so the leftmost child is visited first.
            stack.extend(self.children(node).iter().rev());
        }
        out
    }

    /// The nearest ancestor (including `node` itself) matching the selector.
    pub fn closest(&self, node: NodeId, selector: &SelectorList) -> Option<NodeId> {
        let mut cur = Some(node);
        while let Some(n) = cur {
            if self.matches(n, selector) {
                return Some(n);
            }
            cur = self.parent(n);
        }
        None
    }

    /// Whether `ancestor` contains `node` (inclusive: an element contains
    /// itself).
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cur = Some(node);
        while let Some(n) = cur {
            if n == ancestor {
                return true;
            }
            cur = self.parent(n);
        }
        false
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sel(s: &str) -> SelectorList {
        SelectorList::parse(s).expect("selector should parse")
    }

    #[test]
    fn append_links_parent_and_children() {
        let mut doc = Document::new();
        let nav = doc.append(doc.root(), "nav");
        let a = doc.append(nav, "a");
        assert_eq!(doc.parent(a), Some(nav));
        assert_eq!(doc.parent(nav), Some(doc.root()));
        assert_eq!(doc.parent(doc.root()), None);
        assert_eq!(doc.children(nav), &[a]);
    }

    #[test]
    fn class_list_is_a_set() {
        let mut doc = Document::new();
        let el = doc.append(doc.root(), "div");
        doc.add_class(el, "active");
        doc.add_class(el, "active");
        doc.remove_class(el, "active");
        assert!(!doc.has_class(el, "active"));
    }

    #[test]
    fn matching_covers_tag_id_class_attr() {
        let mut doc = Document::new();
        let el = doc.append(doc.root(), "button");
        doc.set_id(el, "menu");
        doc.add_class(el, "primary");
        doc.set_attribute(el, "role", "tab");
        doc.set_attribute(el, "data-toggle-close", "");

        assert!(doc.matches(el, &sel("button#menu.primary[role=tab]")));
        assert!(doc.matches(el, &sel("[data-toggle-close]")));
        assert!(doc.matches(el, &sel("*")));
        assert!(!doc.matches(el, &sel("button.secondary")));
        assert!(!doc.matches(el, &sel("div#menu")));
        assert!(!doc.matches(el, &sel("[role=panel]")));
    }

    #[test]
    fn list_matches_any_part() {
        let mut doc = Document::new();
        let el = doc.append(doc.root(), "span");
        doc.add_class(el, "b");
        assert!(doc.matches(el, &sel(".a, .b")));
        assert!(!doc.matches(el, &sel(".a, .c")));
    }

    #[test]
    fn query_all_returns_document_order() {
        let mut doc = Document::new();
        let first = doc.append(doc.root(), "section");
        let nested = doc.append(first, "div");
        let second = doc.append(doc.root(), "div");
        doc.add_class(nested, "hit");
        doc.add_class(second, "hit");
        assert_eq!(doc.query_all(&sel(".hit")), vec![nested, second]);
    }

    #[test]
    fn closest_walks_up_and_includes_self() {
        let mut doc = Document::new();
        let outer = doc.append(doc.root(), "div");
        doc.add_class(outer, "scope");
        let inner = doc.append(outer, "span");
        assert_eq!(doc.closest(inner, &sel(".scope")), Some(outer));
        assert_eq!(doc.closest(outer, &sel(".scope")), Some(outer));
        assert_eq!(doc.closest(inner, &sel(".absent")), None);
    }

    #[test]
    fn contains_is_inclusive() {
        let mut doc = Document::new();
        let a = doc.append(doc.root(), "div");
        let b = doc.append(a, "div");
        let c = doc.append(doc.root(), "div");
        assert!(doc.contains(a, b));
        assert!(doc.contains(a, a));
        assert!(!doc.contains(a, c));
        assert!(doc.contains(doc.root(), c));
    }

    #[test]
    fn attributes_round_trip_and_remove() {
        let mut doc = Document::new();
        let el = doc.append(doc.root(), "div");
        doc.set_attribute(el, "data-toggle", "{}");
        assert_eq!(doc.attribute(el, "data-toggle"), Some("{}"));
        doc.remove_attribute(el, "data-toggle");
        assert_eq!(doc.attribute(el, "data-toggle"), None);
    }
}
