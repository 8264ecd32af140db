// Copyright 2025 the Disclose Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Disclose DOM: a minimal in-memory element tree with selector matching.
//!
//! ## Overview
//!
//! This crate provides the reference host structure for the `disclose_toggle`
//! engine: an arena-backed tree of elements, each carrying a tag name, an
//! optional id, a class list, and an attribute map, together with a small
//! selector engine for compound selectors.
//!
//! It is deliberately not a browser DOM. There is no text content, no layout,
//! and no event system; those concerns belong to the host embedding the tree.
//! What it does provide is exactly the surface a show/hide controller needs:
//! structural queries (parent, ancestor walks, document-order search), class
//! mutation, and attribute access.
//!
//! ## Selectors
//!
//! [`SelectorList`] parses comma-separated lists of compound selectors:
//!
//! - type selectors (`div`) and the universal selector (`*`),
//! - id selectors (`#menu`),
//! - class selectors (`.panel`),
//! - attribute selectors (`[data-toggle]`, `[role="dialog"]`),
//! - any combination of the above in one compound (`nav.primary[aria-live]`).
//!
//! Combinators (descendant, child, sibling) are not supported; scoped lookups
//! are expressed through [`Document::closest`] and [`Document::contains`]
//! instead.
//!
//! ## Example
//!
//! ```
//! use disclose_dom::{Document, SelectorList};
//!
//! let mut doc = Document::new();
//! let nav = doc.append(doc.root(), "nav");
//! let button = doc.append(nav, "button");
//! doc.add_class(button, "menu-trigger");
//!
//! let sel = SelectorList::parse("button.menu-trigger").unwrap();
//! assert_eq!(doc.query_all(&sel), vec![button]);
//! assert_eq!(doc.closest(button, &SelectorList::parse("nav").unwrap()), Some(nav));
//! assert!(doc.contains(nav, button));
//! ```

pub mod document;
pub mod selector;

pub use document::{Document, NodeId};
pub use selector::{SelectorError, SelectorList};
