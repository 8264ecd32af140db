// Copyright 2025 the Disclose Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Parent and target resolution for a trigger.
//!
//! The parent is resolved with a fallback chain: nearest ancestor (including
//! the trigger itself) matching the parent selector, then the first
//! document-wide match of that selector, then the trigger's structural
//! parent. The target selector is resolved document-wide; when it is
//! ambiguous (more than one match) the search is narrowed to descendants of
//! the resolved parent and the first match wins. An unresolvable target
//! aborts setup for that trigger.

use crate::host::Dom;
use crate::options::ToggleOptions;

/// Resolve the trigger's parent container.
///
/// Falls back to the trigger itself when it has no structural parent.
pub(crate) fn resolve_parent<K: Copy + Eq, D: Dom<K>>(
    dom: &D,
    trigger: K,
    options: &ToggleOptions,
) -> K {
    if let Some(selector) = options.parent.as_deref().filter(|s| !s.is_empty()) {
        if let Some(parent) = dom.closest(&trigger, selector) {
            return parent;
        }
        if let Some(parent) = dom.query_all(selector).first().copied() {
            return parent;
        }
    }
    dom.parent_of(&trigger).unwrap_or(trigger)
}

/// Resolve the trigger's target region, or `None` when the selector is
/// absent, matches nothing, or matches several elements none of which is a
/// descendant of `parent`.
pub(crate) fn resolve_target<K: Copy + Eq, D: Dom<K>>(
    dom: &D,
    parent: K,
    options: &ToggleOptions,
) -> Option<K> {
    let selector = options.target.as_deref().filter(|s| !s.is_empty())?;
    let matches = dom.query_all(selector);
    match matches.as_slice() {
        [] => None,
        [only] => Some(*only),
        many => many
            .iter()
            .copied()
            .find(|m| *m != parent && dom.contains(&parent, m)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::DocumentHost;
    use disclose_dom::Document;

    fn options(parent: Option<&str>, target: Option<&str>) -> ToggleOptions {
        ToggleOptions {
            parent: parent.map(str::to_owned),
            target: target.map(str::to_owned),
            ..ToggleOptions::default()
        }
    }

    #[test]
    fn parent_prefers_nearest_matching_ancestor() {
        let mut doc = Document::new();
        let outer = doc.append(doc.root(), "div");
        doc.add_class(outer, "scope");
        let inner = doc.append(outer, "div");
        doc.add_class(inner, "scope");
        let trigger = doc.append(inner, "span");
        let host = DocumentHost::new(doc);

        let opts = options(Some(".scope"), None);
        assert_eq!(resolve_parent(&host, trigger, &opts), inner);
    }

    #[test]
    fn parent_falls_back_to_document_wide_lookup() {
        let mut doc = Document::new();
        let sidebar = doc.append(doc.root(), "aside");
        doc.add_class(sidebar, "scope");
        let elsewhere = doc.append(doc.root(), "div");
        let trigger = doc.append(elsewhere, "span");
        let host = DocumentHost::new(doc);

        let opts = options(Some(".scope"), None);
        assert_eq!(resolve_parent(&host, trigger, &opts), sidebar);
    }

    #[test]
    fn parent_falls_back_to_structural_parent() {
        let mut doc = Document::new();
        let wrapper = doc.append(doc.root(), "div");
        let trigger = doc.append(wrapper, "span");
        let host = DocumentHost::new(doc);

        // No selector configured.
        assert_eq!(resolve_parent(&host, trigger, &options(None, None)), wrapper);
        // Selector configured but matching nothing anywhere.
        assert_eq!(
            resolve_parent(&host, trigger, &options(Some(".absent"), None)),
            wrapper
        );
        // Empty selector behaves as absent.
        assert_eq!(
            resolve_parent(&host, trigger, &options(Some(""), None)),
            wrapper
        );
    }

    #[test]
    fn unique_target_is_used_directly() {
        let mut doc = Document::new();
        let parent = doc.append(doc.root(), "div");
        let panel = doc.append(doc.root(), "div");
        doc.add_class(panel, "panel");
        let host = DocumentHost::new(doc);

        let opts = options(None, Some(".panel"));
        assert_eq!(resolve_target(&host, parent, &opts), Some(panel));
    }

    #[test]
    fn ambiguous_target_narrows_to_parent_descendants() {
        let mut doc = Document::new();
        let parent = doc.append(doc.root(), "div");
        let outside = doc.append(doc.root(), "div");
        doc.add_class(outside, "panel");
        let inside = doc.append(parent, "div");
        doc.add_class(inside, "panel");
        let host = DocumentHost::new(doc);

        let opts = options(None, Some(".panel"));
        assert_eq!(resolve_target(&host, parent, &opts), Some(inside));
    }

    #[test]
    fn ambiguous_target_with_no_descendant_fails() {
        let mut doc = Document::new();
        let parent = doc.append(doc.root(), "div");
        for _ in 0..2 {
            let p = doc.append(doc.root(), "div");
            doc.add_class(p, "panel");
        }
        let host = DocumentHost::new(doc);

        let opts = options(None, Some(".panel"));
        assert_eq!(resolve_target(&host, parent, &opts), None);
    }

    #[test]
    fn absent_or_unmatched_target_fails() {
        let mut doc = Document::new();
        let parent = doc.append(doc.root(), "div");
        let host = DocumentHost::new(doc);

        assert_eq!(resolve_target(&host, parent, &options(None, None)), None);
        assert_eq!(
            resolve_target(&host, parent, &options(None, Some(".panel"))),
            None
        );
        assert_eq!(resolve_target(&host, parent, &options(None, Some(""))), None);
    }
}
