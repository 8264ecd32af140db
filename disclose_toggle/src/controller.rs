// Copyright 2025 the Disclose Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The controller: the explicit per-trigger registry and its setup path.
//!
//! ## Registry
//!
//! All per-trigger state lives here, keyed by the host's element handle:
//! a [`ToggleState`] per bound trigger, a separate hook table, and a
//! target → trigger back-reference. Nothing is ever attached to host
//! elements.
//!
//! ## Setup
//!
//! [`Controller::init`] resolves the trigger selector and binds each match:
//! parse the element's declarative payload, merge options, resolve parent
//! and target, register the state, evaluate auto-activation. The
//! configuration attribute is removed after a successful bind, which is what
//! makes re-running `init` idempotent: an already-bound trigger no longer
//! matches the default trigger selector, and explicit re-binding of a known
//! trigger is refused.
//!
//! Each trigger's setup is independent: a trigger with no resolvable target
//! is logged and skipped without affecting the others. Malformed payloads
//! are configuration errors and propagate (§ the error taxonomy on
//! [`ToggleError`]).

use core::fmt;
use core::hash::Hash;

use hashbrown::HashMap;
use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::binding;
use crate::hooks::Hooks;
use crate::host::Dom;
use crate::options::{self, Config};
use crate::state::{DismissalHandles, ToggleState};
use crate::types::{Interaction, ToggleError};

/// The toggle engine: registry, state machine, and event entry points.
///
/// Generic over the host's element handle `K`. All operations take the host
/// [`Dom`] explicitly; the controller holds no reference into the tree.
pub struct Controller<K> {
    pub(crate) config: Config,
    pub(crate) states: HashMap<K, ToggleState<K>>,
    pub(crate) hooks: HashMap<K, Hooks<K>>,
    pub(crate) targets: HashMap<K, K>,
    pub(crate) keyboard_installed: bool,
}

impl<K: Copy + Eq + Hash + fmt::Debug> Controller<K> {
    /// Create a controller around a process-wide configuration.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            states: HashMap::new(),
            hooks: HashMap::new(),
            targets: HashMap::new(),
            keyboard_installed: false,
        }
    }

    /// Discover and bind every trigger matching the configured selector.
    ///
    /// Returns the number of triggers bound. Binding failures (no
    /// resolvable target) are warned and skipped; malformed configuration
    /// payloads propagate. Also installs the keyboard bridge (idempotent).
    pub fn init<D: Dom<K>>(&mut self, dom: &mut D, now: u64) -> Result<usize, ToggleError> {
        self.install_keyboard_bridge();
        let selector = self.config.trigger_selector();
        let mut bound = 0;
        for trigger in dom.query_all(&selector) {
            if self.bind(dom, trigger, now)? {
                bound += 1;
            }
        }
        debug!(bound, selector = %selector, "toggle init complete");
        Ok(bound)
    }

    /// Bind a single trigger element.
    ///
    /// Returns `Ok(true)` when the trigger was bound, `Ok(false)` when it
    /// was skipped (already bound, or no resolvable target), and an error
    /// when its declarative payload is malformed.
    pub fn bind<D: Dom<K>>(
        &mut self,
        dom: &mut D,
        trigger: K,
        now: u64,
    ) -> Result<bool, ToggleError> {
        if self.states.contains_key(&trigger) {
            return Ok(false);
        }

        let attribute = self.config.attribute_name().to_owned();
        let inline = match dom.attribute(&trigger, &attribute) {
            Some(raw) => options::parse_payload(&raw)?,
            None => serde_json::Map::new(),
        };
        let opts = options::resolve_options(&inline, &self.config)?;

        let parent = binding::resolve_parent(dom, trigger, &opts);
        let Some(target) = binding::resolve_target(dom, parent, &opts) else {
            warn!(
                trigger = ?trigger,
                target = opts.target.as_deref().unwrap_or(""),
                "no resolvable toggle target; skipping trigger"
            );
            return Ok(false);
        };

        self.states.insert(
            trigger,
            ToggleState {
                options: opts,
                trigger,
                parent,
                target,
                active: false,
                dismissal: DismissalHandles::default(),
                auto_deadline: None,
            },
        );
        self.targets.insert(target, trigger);
        dom.remove_attribute(&trigger, &attribute);
        debug!(trigger = ?trigger, target = ?target, "toggle bound");

        self.apply_auto(dom, trigger, now);
        Ok(true)
    }

    /// Tear a trigger down: deactivate it and drop its registry entries.
    ///
    /// Teardown is unconditional; `before_unset` is not consulted, but the
    /// active marker is stripped and all dismissal handles released if the
    /// trigger was active.
    pub fn unbind<D: Dom<K>>(&mut self, dom: &mut D, trigger: K) -> bool {
        let Some(state) = self.states.remove(&trigger) else {
            return false;
        };
        if state.active {
            dom.remove_class(&trigger, &state.options.active_class);
            dom.remove_class(&state.parent, &state.options.active_class);
            dom.remove_class(&state.target, &state.options.active_class);
        }
        self.targets.remove(&state.target);
        self.hooks.remove(&trigger);
        true
    }

    /// Entry point for the trigger's own configured interaction events.
    pub fn on_trigger_interaction<D: Dom<K>>(
        &mut self,
        dom: &mut D,
        trigger: K,
        interaction: Interaction,
        now: u64,
    ) -> bool {
        self.toggle(dom, trigger, Some(interaction), now)
    }

    /// The registry record for a trigger, if bound.
    pub fn state(&self, trigger: K) -> Option<&ToggleState<K>> {
        self.states.get(&trigger)
    }

    /// Whether a bound trigger is currently active.
    pub fn is_active(&self, trigger: K) -> bool {
        self.states.get(&trigger).is_some_and(|s| s.active)
    }

    /// The trigger owning a target region, if any (the back-reference).
    pub fn trigger_of_target(&self, target: K) -> Option<K> {
        self.targets.get(&target).copied()
    }

    /// Mutable access to a bound trigger's lifecycle hooks.
    pub fn hooks_mut(&mut self, trigger: K) -> Option<&mut Hooks<K>> {
        if !self.states.contains_key(&trigger) {
            return None;
        }
        Some(self.hooks.entry(trigger).or_default())
    }

    /// Number of bound triggers.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Whether no triggers are bound.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// The process-wide configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Snapshot of all currently-active triggers. Sweeps iterate over this,
    /// never over the live registry, so unsetting during iteration is safe.
    pub(crate) fn active_snapshot(&self) -> SmallVec<[K; 8]> {
        self.states
            .iter()
            .filter(|(_, s)| s.active)
            .map(|(k, _)| *k)
            .collect()
    }

    pub(crate) fn run_before_set(&mut self, trigger: K, interaction: Option<Interaction>) -> bool {
        self.hooks
            .get_mut(&trigger)
            .is_none_or(|h| h.run_before_set(trigger, interaction))
    }

    pub(crate) fn run_after_set(&mut self, trigger: K) {
        if let Some(hooks) = self.hooks.get_mut(&trigger) {
            hooks.run_after_set(trigger);
        }
    }

    pub(crate) fn run_before_unset(&mut self, trigger: K) -> bool {
        self.hooks
            .get_mut(&trigger)
            .is_none_or(|h| h.run_before_unset(trigger))
    }

    pub(crate) fn run_after_unset(&mut self, trigger: K) {
        if let Some(hooks) = self.hooks.get_mut(&trigger) {
            hooks.run_after_unset(trigger);
        }
    }

    pub(crate) fn run_before_unset_all(&mut self, trigger: K) -> bool {
        self.hooks
            .get_mut(&trigger)
            .is_none_or(|h| h.run_before_unset_all(trigger))
    }
}

impl<K: Copy + Eq + Hash + fmt::Debug> fmt::Debug for Controller<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Controller")
            .field("bound", &self.states.len())
            .field("active", &self.states.values().filter(|s| s.active).count())
            .field("keyboard_installed", &self.keyboard_installed)
            .finish_non_exhaustive()
    }
}
