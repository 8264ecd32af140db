// Copyright 2025 the Disclose Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Auto-activation: opening triggers without a user interaction.
//!
//! The `auto` option takes one of three shapes:
//!
//! - a boolean: `true` activates immediately at bind time;
//! - a number: a delay in milliseconds, fired by [`Controller::on_tick`]
//!   once engine time reaches the recorded deadline;
//! - a string token: activates when the host's URL carries the token, or,
//!   failing that, when the process-wide breakpoint table maps the token to
//!   a viewport range containing the current width.
//!
//! Auto-activations pass `None` as the interaction, so `before_set` guards
//! can tell them apart from user-driven ones, and the outside-dismissal
//! handle falls back to the click family.
//!
//! Breakpoint-driven triggers can be re-evaluated after a viewport change
//! with [`Controller::refresh_auto`]; width rules are the only kind that
//! deactivates when its condition stops holding.

use core::fmt;
use core::hash::Hash;

use tracing::debug;

use crate::controller::Controller;
use crate::host::Dom;
use crate::types::AutoRule;

impl<K: Copy + Eq + Hash + fmt::Debug> Controller<K> {
    /// Evaluate a freshly-bound trigger's auto rule.
    pub(crate) fn apply_auto<D: Dom<K>>(&mut self, dom: &mut D, trigger: K, now: u64) {
        let Some(rule) = self
            .states
            .get(&trigger)
            .and_then(|s| s.options.auto.clone())
        else {
            return;
        };
        match rule {
            AutoRule::Immediate(true) => {
                self.set(dom, trigger, None, now);
            }
            AutoRule::Immediate(false) => {}
            AutoRule::Delay(ms) => {
                if let Some(state) = self.states.get_mut(&trigger) {
                    state.auto_deadline = Some(now.saturating_add(ms));
                }
            }
            AutoRule::Token(token) => self.apply_token(dom, trigger, &token, now),
        }
    }

    /// Re-evaluate every bound trigger's breakpoint rule against the current
    /// viewport width, activating those whose range now holds and
    /// deactivating those whose range no longer does. Returns the number of
    /// triggers whose state changed.
    ///
    /// Intended to be called by the host after a viewport resize. Immediate,
    /// delayed, and URL-token rules are one-time and are not re-run here.
    pub fn refresh_auto<D: Dom<K>>(&mut self, dom: &mut D, now: u64) -> usize {
        let width = dom.viewport_width();
        let ruled: Vec<(K, String)> = self
            .states
            .iter()
            .filter_map(|(k, s)| match &s.options.auto {
                Some(AutoRule::Token(token)) => Some((*k, token.clone())),
                _ => None,
            })
            .collect();

        let mut changed = 0;
        for (trigger, token) in ruled {
            if dom.has_url_token(&token) {
                continue;
            }
            let Some(range) = self
                .config
                .breakpoints
                .as_ref()
                .and_then(|table| table.get(&token))
                .copied()
            else {
                continue;
            };
            let should = range.contains(width);
            let is = self.is_active(trigger);
            let did = if should && !is {
                self.set(dom, trigger, None, now)
            } else if !should && is {
                self.unset(dom, trigger)
            } else {
                false
            };
            if did {
                changed += 1;
            }
        }
        if changed > 0 {
            debug!(changed, width, "breakpoint auto-activation refreshed");
        }
        changed
    }

    fn apply_token<D: Dom<K>>(&mut self, dom: &mut D, trigger: K, token: &str, now: u64) {
        if dom.has_url_token(token) {
            self.set(dom, trigger, None, now);
            return;
        }
        let Some(range) = self
            .config
            .breakpoints
            .as_ref()
            .and_then(|table| table.get(token))
            .copied()
        else {
            // Not a URL token and not a known breakpoint name.
            debug!(token, "auto token matched nothing; leaving trigger inactive");
            return;
        };
        if range.contains(dom.viewport_width()) {
            self.set(dom, trigger, None, now);
        } else {
            self.unset(dom, trigger);
        }
    }
}
