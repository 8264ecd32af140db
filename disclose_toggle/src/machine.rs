// Copyright 2025 the Disclose Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The set/unset/toggle state machine.
//!
//! ## States
//!
//! Inactive (initial) ⇄ Active. Transitions are synchronous and atomic from
//! the caller's perspective; within one `set` the exclusivity sweep always
//! completes before the new marker is applied, so a sibling group never
//! momentarily shows two active members.
//!
//! ## Guarantees
//!
//! - `before_set` veto aborts with no state change and no side effects.
//! - `active == true` implies the active class is present on trigger,
//!   parent, and target simultaneously; absent from all three otherwise.
//! - Deactivation by any path releases every armed dismissal handle.
//! - Re-activation releases the previous handles before arming fresh ones,
//!   so handles never accumulate.
//!
//! ## Policy edge cases
//!
//! Toggling on a hover-enter interaction never closes an already-open
//! trigger (prevents flicker while re-hovering). `unset_self: false`
//! disables the self-close branch of `toggle` entirely; such a trigger is
//! only closed by exclusivity, dismissal, or an explicit `unset`.

use core::fmt;
use core::hash::Hash;

use tracing::debug;

use crate::controller::Controller;
use crate::host::Dom;
use crate::types::{Interaction, PointerFamily};

impl<K: Copy + Eq + Hash + fmt::Debug> Controller<K> {
    /// Toggle a trigger: unset when active (subject to the hover-enter and
    /// `unset_self` policies), set when inactive.
    pub fn toggle<D: Dom<K>>(
        &mut self,
        dom: &mut D,
        trigger: K,
        interaction: Option<Interaction>,
        now: u64,
    ) -> bool {
        let Some(state) = self.states.get(&trigger) else {
            return false;
        };
        if state.active {
            // Re-hovering an open trigger must not close it.
            if interaction == Some(Interaction::HoverEnter) {
                return false;
            }
            if !state.options.unset_self {
                return false;
            }
            self.unset(dom, trigger)
        } else {
            self.set(dom, trigger, interaction, now)
        }
    }

    /// Activate a trigger.
    ///
    /// Runs the `before_set` guard, the exclusivity sweep (gated by
    /// `before_unset_all`), applies the active marker to trigger, parent,
    /// and target, arms the configured dismissal handles, and invokes
    /// `after_set`. Calling `set` on an already-active trigger re-arms its
    /// handles fresh.
    pub fn set<D: Dom<K>>(
        &mut self,
        dom: &mut D,
        trigger: K,
        interaction: Option<Interaction>,
        now: u64,
    ) -> bool {
        if !self.states.contains_key(&trigger) {
            return false;
        }
        if !self.run_before_set(trigger, interaction) {
            return false;
        }
        if self.run_before_unset_all(trigger) {
            self.unset_all(dom, trigger);
        }

        // Touch-originated activations bind the outside handle to the touch
        // family; everything else (click, keyboard, auto) binds to click.
        let family = match interaction.and_then(Interaction::family) {
            Some(PointerFamily::Touch) => PointerFamily::Touch,
            _ => PointerFamily::Click,
        };

        let Some(state) = self.states.get_mut(&trigger) else {
            return false;
        };
        state.dismissal.release();
        state.active = true;
        let class = state.options.active_class.clone();
        dom.add_class(&trigger, &class);
        dom.add_class(&state.parent, &class);
        dom.add_class(&state.target, &class);

        if !state.options.persist {
            state.dismissal.outside = Some(family);
        }
        if state.options.unset_on_hover_out {
            state.dismissal.hover_out = true;
        }
        if let Some(ms) = state.options.timeout {
            state.dismissal.deadline = Some(now.saturating_add(ms));
        }
        state.dismissal.inner_close = true;

        debug!(trigger = ?trigger, "toggle set");
        self.run_after_set(trigger);
        true
    }

    /// Deactivate a trigger.
    ///
    /// A no-op unless the trigger is active and `before_unset` passes. On
    /// success the active marker is stripped from all three elements, every
    /// dismissal handle is released, and `after_unset` runs.
    pub fn unset<D: Dom<K>>(&mut self, dom: &mut D, trigger: K) -> bool {
        if !self.states.get(&trigger).is_some_and(|s| s.active) {
            return false;
        }
        if !self.run_before_unset(trigger) {
            return false;
        }
        let Some(state) = self.states.get_mut(&trigger) else {
            return false;
        };
        state.active = false;
        state.dismissal.release();
        let class = state.options.active_class.clone();
        dom.remove_class(&trigger, &class);
        dom.remove_class(&state.parent, &class);
        dom.remove_class(&state.target, &class);

        debug!(trigger = ?trigger, "toggle unset");
        self.run_after_unset(trigger);
        true
    }
}
