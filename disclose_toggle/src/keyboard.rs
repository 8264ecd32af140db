// Copyright 2025 the Disclose Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The keyboard bridge: Enter activates triggers that are not natively
//! activatable.
//!
//! Elements like buttons and links already translate Enter into an
//! activation; for them the bridge stays out of the way so a keypress never
//! toggles twice. For anything else bound as a trigger (a `span`, a `div`),
//! the bridge supplies the missing behavior.
//!
//! The bridge is conceptually a single document-level hook: installing it is
//! idempotent no matter how many triggers are bound, and it is installed as
//! part of [`Controller::init`](crate::Controller::init). Hosts feed it key
//! events via [`Controller::on_key_down`].

use core::fmt;
use core::hash::Hash;

use tracing::debug;

use crate::controller::Controller;
use crate::host::Dom;
use crate::types::{Interaction, Key};

impl<K: Copy + Eq + Hash + fmt::Debug> Controller<K> {
    /// Install the document-level key hook. Idempotent; returns whether this
    /// call actually installed it.
    pub fn install_keyboard_bridge(&mut self) -> bool {
        if self.keyboard_installed {
            return false;
        }
        self.keyboard_installed = true;
        debug!("keyboard bridge installed");
        true
    }

    /// Remove the document-level key hook.
    pub fn uninstall_keyboard_bridge(&mut self) {
        self.keyboard_installed = false;
    }

    /// Whether the bridge is currently installed.
    pub fn keyboard_bridge_installed(&self) -> bool {
        self.keyboard_installed
    }

    /// Feed a key-down occurring while `focused` has keyboard focus.
    ///
    /// Toggles the focused trigger when the bridge is installed, the key is
    /// Enter, and the element does not already activate natively on Enter.
    /// Returns whether a transition happened.
    pub fn on_key_down<D: Dom<K>>(
        &mut self,
        dom: &mut D,
        focused: K,
        key: Key,
        now: u64,
    ) -> bool {
        if !self.keyboard_installed || key != Key::Enter {
            return false;
        }
        if !self.states.contains_key(&focused) {
            return false;
        }
        if dom.activates_natively(&focused) {
            return false;
        }
        self.toggle(dom, focused, Some(Interaction::Key), now)
    }
}
