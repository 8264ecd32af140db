// Copyright 2025 the Disclose Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The exclusivity sweep: at most one active member per sibling group.
//!
//! Group membership is extensional, not registered anywhere: when a trigger
//! activates, every *other* currently-active trigger is visited and unset
//! unless it opts out. A persistent trigger survives the sweep unless it
//! matches the activating trigger's `sibling_selector` (which names the
//! group a persistent trigger still competes in); any trigger matching the
//! activating trigger's `skip_selector` is left alone entirely.
//!
//! The sweep iterates over a snapshot of the active set, so the unsets it
//! performs cannot invalidate the iteration.

use core::fmt;
use core::hash::Hash;

use crate::controller::Controller;
use crate::host::Dom;

impl<K: Copy + Eq + Hash + fmt::Debug> Controller<K> {
    /// Unset every active trigger other than `reference`, honoring the
    /// reference's skip and sibling selectors. Returns the number unset.
    ///
    /// Callable directly, but normally runs as part of [`Controller::set`]
    /// (gated there by the `before_unset_all` hook).
    pub fn unset_all<D: Dom<K>>(&mut self, dom: &mut D, reference: K) -> usize {
        let (skip, sibling) = match self.states.get(&reference) {
            Some(state) => (
                state.options.skip_selector.clone(),
                state.options.sibling_selector.clone(),
            ),
            None => (None, None),
        };

        let mut swept = 0;
        for other in self.active_snapshot() {
            if other == reference {
                continue;
            }
            if let Some(selector) = skip.as_deref()
                && !selector.is_empty()
                && dom.matches(&other, selector)
            {
                continue;
            }
            let persist = self
                .states
                .get(&other)
                .is_some_and(|s| s.options.persist);
            let in_group = sibling
                .as_deref()
                .is_some_and(|s| !s.is_empty() && dom.matches(&other, s));
            if persist && !in_group {
                continue;
            }
            if self.unset(dom, other) {
                swept += 1;
            }
        }
        swept
    }
}
