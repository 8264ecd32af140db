// Copyright 2025 the Disclose Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host contract: how the engine sees the element tree.
//!
//! The controller is generic over an element handle `K` and reaches the
//! host's tree only through [`Dom`]. The trait covers four concerns:
//!
//! - **Structure and selection**: [`Dom::parent_of`], [`Dom::matches`], and
//!   [`Dom::query_all`] (the element-iteration collaborator). The provided
//!   [`Dom::closest`] and [`Dom::contains`] walk `parent_of`.
//! - **Markers**: [`Dom::add_class`] / [`Dom::remove_class`] apply the shared
//!   active marker.
//! - **Attributes**: [`Dom::attribute`] / [`Dom::remove_attribute`] read the
//!   declarative configuration payload and the dismiss-control
//!   discriminator.
//! - **Environment**: [`Dom::viewport_width`], [`Dom::has_url_token`] (the
//!   URL-parameter collaborator), and [`Dom::activates_natively`] for the
//!   keyboard bridge.
//!
//! A reference implementation over `disclose_dom` lives in
//! [`crate::adapters`]; tests and embedders with their own trees implement
//! the trait directly.

/// Host element-tree access for the toggle engine.
pub trait Dom<K: Copy + Eq> {
    /// The element's structural parent, if any.
    fn parent_of(&self, node: &K) -> Option<K>;

    /// Whether the element matches a selector. Unparsable selectors should
    /// simply not match.
    fn matches(&self, node: &K, selector: &str) -> bool;

    /// All elements matching a selector, in document order.
    fn query_all(&self, selector: &str) -> Vec<K>;

    /// Add a class to the element.
    fn add_class(&mut self, node: &K, class: &str);

    /// Remove a class from the element.
    fn remove_class(&mut self, node: &K, class: &str);

    /// Read an attribute value. A bare attribute reads as an empty string.
    fn attribute(&self, node: &K, name: &str) -> Option<String>;

    /// Remove an attribute.
    fn remove_attribute(&mut self, node: &K, name: &str);

    /// Current viewport width, for breakpoint-driven auto-activation.
    fn viewport_width(&self) -> f64;

    /// Whether `name` appears as a URL query parameter or hash token.
    fn has_url_token(&self, name: &str) -> bool;

    /// Whether the element is already keyboard-activatable without help
    /// (the document root, or a native button). The keyboard bridge leaves
    /// such elements alone.
    fn activates_natively(&self, node: &K) -> bool;

    /// The nearest ancestor (including `node` itself) matching the selector.
    fn closest(&self, node: &K, selector: &str) -> Option<K> {
        let mut cur = *node;
        loop {
            if self.matches(&cur, selector) {
                return Some(cur);
            }
            cur = self.parent_of(&cur)?;
        }
    }

    /// Whether `ancestor` contains `node` (inclusive).
    fn contains(&self, ancestor: &K, node: &K) -> bool {
        let mut cur = *node;
        loop {
            if cur == *ancestor {
                return true;
            }
            match self.parent_of(&cur) {
                Some(p) => cur = p,
                None => return false,
            }
        }
    }
}
