// Copyright 2025 the Disclose Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lifecycle hooks consulted during state transitions.
//!
//! Every slot is optional; an absent slot always passes. Before-hooks return
//! a verdict: `false` vetoes the transition with no side effects (a normal
//! outcome, not an error). After-hooks observe a completed transition.
//!
//! `before_set` additionally receives the interaction that requested the
//! activation, when there was one (auto-activation and explicit API calls
//! pass `None`). `before_unset_all` gates the activating trigger's
//! exclusivity sweep.

use core::fmt;

use crate::types::Interaction;

/// Guard hook for `before_set`: trigger plus the requesting interaction.
pub type SetGuard<K> = Box<dyn FnMut(K, Option<Interaction>) -> bool>;

/// Guard hook for `before_unset` and `before_unset_all`.
pub type Guard<K> = Box<dyn FnMut(K) -> bool>;

/// Observer hook for `after_set` and `after_unset`.
pub type Observer<K> = Box<dyn FnMut(K)>;

/// The per-trigger hook record.
pub struct Hooks<K> {
    /// Consulted first by `set`; veto aborts with no side effects.
    pub before_set: Option<SetGuard<K>>,
    /// Invoked after a completed activation.
    pub after_set: Option<Observer<K>>,
    /// Consulted by `unset`; veto keeps the trigger active.
    pub before_unset: Option<Guard<K>>,
    /// Invoked after a completed deactivation.
    pub after_unset: Option<Observer<K>>,
    /// Consulted by `set` before the exclusivity sweep; veto skips the sweep.
    pub before_unset_all: Option<Guard<K>>,
}

impl<K> Default for Hooks<K> {
    fn default() -> Self {
        Self {
            before_set: None,
            after_set: None,
            before_unset: None,
            after_unset: None,
            before_unset_all: None,
        }
    }
}

impl<K: Copy> Hooks<K> {
    pub(crate) fn run_before_set(&mut self, trigger: K, interaction: Option<Interaction>) -> bool {
        match &mut self.before_set {
            Some(hook) => hook(trigger, interaction),
            None => true,
        }
    }

    pub(crate) fn run_after_set(&mut self, trigger: K) {
        if let Some(hook) = &mut self.after_set {
            hook(trigger);
        }
    }

    pub(crate) fn run_before_unset(&mut self, trigger: K) -> bool {
        match &mut self.before_unset {
            Some(hook) => hook(trigger),
            None => true,
        }
    }

    pub(crate) fn run_after_unset(&mut self, trigger: K) {
        if let Some(hook) = &mut self.after_unset {
            hook(trigger);
        }
    }

    pub(crate) fn run_before_unset_all(&mut self, trigger: K) -> bool {
        match &mut self.before_unset_all {
            Some(hook) => hook(trigger),
            None => true,
        }
    }
}

impl<K> fmt::Debug for Hooks<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("before_set", &self.before_set.is_some())
            .field("after_set", &self.after_set.is_some())
            .field("before_unset", &self.before_unset.is_some())
            .field("after_unset", &self.after_unset.is_some())
            .field("before_unset_all", &self.before_unset_all.is_some())
            .finish()
    }
}
