// Copyright 2025 the Disclose Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dismissal: the host-facing entry points that consume armed handles.
//!
//! ## Entry points
//!
//! The host forwards three kinds of occurrences:
//!
//! - [`Controller::on_document_interaction`]: any pointer interaction,
//!   wherever it landed. Runs the outside-dismissal pass first (an outside
//!   interaction closes before anything inside the page reacts), then the
//!   inner dismiss-control pass for interactions landing inside a target.
//! - [`Controller::on_hover_leave`]: the pointer left an element. Dismisses
//!   triggers whose hover-out handle is armed on that parent container.
//! - [`Controller::on_tick`]: time advanced to `now` (absolute
//!   milliseconds). Fires due timeout dismissals and due timed
//!   auto-activations. The engine never schedules anything itself; the host
//!   decides when to tick.
//!
//! ## One-shot handles
//!
//! The outside and hover-out handles are one-shot: they are cleared when
//! they fire, before the unset is attempted, so a `before_unset` veto leaves
//! the trigger open but disarmed. The inner dismiss-control handle is
//! delegated through the target and stays armed until deactivation.

use core::fmt;
use core::hash::Hash;

use crate::controller::Controller;
use crate::host::Dom;
use crate::options::CLOSE_DISCRIMINATOR_ATTRIBUTE;
use crate::types::Interaction;

impl<K: Copy + Eq + Hash + fmt::Debug> Controller<K> {
    /// Process a document-level pointer interaction landing on `node`.
    ///
    /// Returns the number of triggers dismissed.
    pub fn on_document_interaction<D: Dom<K>>(
        &mut self,
        dom: &mut D,
        node: K,
        interaction: Interaction,
    ) -> usize {
        let Some(family) = interaction.family() else {
            return 0;
        };

        let mut dismissed = 0;

        // Outside pass. An interaction counts as outside only when it hits
        // neither the trigger, the target subtree, nor the parent subtree.
        for trigger in self.active_snapshot() {
            let Some(state) = self.states.get(&trigger) else {
                continue;
            };
            if state.dismissal.outside != Some(family) {
                continue;
            }
            if node == trigger
                || dom.contains(&state.target, &node)
                || dom.contains(&state.parent, &node)
            {
                continue;
            }
            if let Some(state) = self.states.get_mut(&trigger) {
                state.dismissal.outside = None;
            }
            if self.unset(dom, trigger) {
                dismissed += 1;
            }
        }

        // Inner dismiss-control pass, for interactions landing inside a
        // still-open target.
        for trigger in self.active_snapshot() {
            let Some(state) = self.states.get(&trigger) else {
                continue;
            };
            if !state.dismissal.inner_close {
                continue;
            }
            let target = state.target;
            if !dom.contains(&target, &node) {
                continue;
            }
            let close_selector = state.options.close_selector.clone();
            let Some(control) = dom.closest(&node, &close_selector) else {
                continue;
            };
            if !dom.contains(&target, &control) {
                continue;
            }
            // A discriminator on the control restricts which trigger it
            // closes in a shared target; without one it closes any owner.
            if let Some(discriminator) = dom.attribute(&control, CLOSE_DISCRIMINATOR_ATTRIBUTE)
                && !discriminator.is_empty()
                && !dom.matches(&trigger, &discriminator)
            {
                continue;
            }
            if self.unset(dom, trigger) {
                dismissed += 1;
            }
        }

        dismissed
    }

    /// Process the pointer leaving `node`. Dismisses every active trigger
    /// whose hover-out handle is armed on that parent container. Returns
    /// the number dismissed.
    pub fn on_hover_leave<D: Dom<K>>(&mut self, dom: &mut D, node: K) -> usize {
        let mut dismissed = 0;
        for trigger in self.active_snapshot() {
            let armed = self
                .states
                .get(&trigger)
                .is_some_and(|s| s.dismissal.hover_out && s.parent == node);
            if !armed {
                continue;
            }
            if let Some(state) = self.states.get_mut(&trigger) {
                state.dismissal.hover_out = false;
            }
            if self.unset(dom, trigger) {
                dismissed += 1;
            }
        }
        dismissed
    }

    /// Advance engine time to `now` (absolute milliseconds, same clock as
    /// every other entry point). Fires due timeout dismissals and due timed
    /// auto-activations; returns the number of triggers whose state changed.
    pub fn on_tick<D: Dom<K>>(&mut self, dom: &mut D, now: u64) -> usize {
        let mut changed = 0;

        for trigger in self.active_snapshot() {
            let due = self
                .states
                .get(&trigger)
                .is_some_and(|s| s.dismissal.deadline.is_some_and(|d| d <= now));
            if !due {
                continue;
            }
            if let Some(state) = self.states.get_mut(&trigger) {
                state.dismissal.deadline = None;
            }
            if self.unset(dom, trigger) {
                changed += 1;
            }
        }

        let due_auto: Vec<K> = self
            .states
            .iter()
            .filter(|(_, s)| s.auto_deadline.is_some_and(|d| d <= now))
            .map(|(k, _)| *k)
            .collect();
        for trigger in due_auto {
            if let Some(state) = self.states.get_mut(&trigger) {
                state.auto_deadline = None;
            }
            if self.set(dom, trigger, None, now) {
                changed += 1;
            }
        }

        changed
    }
}

#[cfg(test)]
mod tests {
    use disclose_dom::{Document, NodeId};

    use crate::adapters::DocumentHost;
    use crate::controller::Controller;
    use crate::options::Config;
    use crate::types::Interaction;

    struct Page {
        host: DocumentHost,
        controller: Controller<NodeId>,
        trigger: NodeId,
        parent: NodeId,
        panel: NodeId,
        inside: NodeId,
        outside: NodeId,
    }

    fn page_with(payload: &str) -> Page {
        let mut doc = Document::new();
        let parent = doc.append(doc.root(), "div");
        doc.add_class(parent, "menu");
        let trigger = doc.append(parent, "span");
        doc.set_attribute(trigger, "data-toggle", payload);
        let panel = doc.append(parent, "div");
        doc.add_class(panel, "panel");
        let inside = doc.append(panel, "p");
        let outside = doc.append(doc.root(), "footer");

        let mut host = DocumentHost::new(doc);
        let mut controller = Controller::new(Config::default());
        assert_eq!(controller.init(&mut host, 0).unwrap(), 1);
        Page {
            host,
            controller,
            trigger,
            parent,
            panel,
            inside,
            outside,
        }
    }

    fn page() -> Page {
        page_with(r#"{"target": ".panel", "parent": ".menu"}"#)
    }

    #[test]
    fn outside_click_dismisses() {
        let mut p = page();
        p.controller.set(&mut p.host, p.trigger, Some(Interaction::Click), 0);
        let n = p
            .controller
            .on_document_interaction(&mut p.host, p.outside, Interaction::Click);
        assert_eq!(n, 1);
        assert!(!p.controller.is_active(p.trigger));
    }

    #[test]
    fn clicks_inside_trigger_parent_or_target_do_not_dismiss() {
        let mut p = page();
        p.controller.set(&mut p.host, p.trigger, Some(Interaction::Click), 0);
        for node in [p.trigger, p.parent, p.panel, p.inside] {
            let n = p
                .controller
                .on_document_interaction(&mut p.host, node, Interaction::Click);
            assert_eq!(n, 0);
            assert!(p.controller.is_active(p.trigger));
        }
    }

    #[test]
    fn outside_handle_is_bound_to_the_activating_pointer_family() {
        let mut p = page();
        p.controller.set(&mut p.host, p.trigger, Some(Interaction::Touch), 0);
        // A click does not consume a touch-armed handle.
        let n = p
            .controller
            .on_document_interaction(&mut p.host, p.outside, Interaction::Click);
        assert_eq!(n, 0);
        assert!(p.controller.is_active(p.trigger));
        let n = p
            .controller
            .on_document_interaction(&mut p.host, p.outside, Interaction::Touch);
        assert_eq!(n, 1);
        assert!(!p.controller.is_active(p.trigger));
    }

    #[test]
    fn persist_disarms_outside_dismissal() {
        let mut p = page_with(r#"{"target": ".panel", "persist": true}"#);
        p.controller.set(&mut p.host, p.trigger, Some(Interaction::Click), 0);
        let n = p
            .controller
            .on_document_interaction(&mut p.host, p.outside, Interaction::Click);
        assert_eq!(n, 0);
        assert!(p.controller.is_active(p.trigger));
    }

    #[test]
    fn outside_handle_is_one_shot_even_when_vetoed() {
        let mut p = page();
        p.controller.set(&mut p.host, p.trigger, Some(Interaction::Click), 0);
        let hooks = p.controller.hooks_mut(p.trigger).unwrap();
        hooks.before_unset = Some(Box::new(|_| false));
        let n = p
            .controller
            .on_document_interaction(&mut p.host, p.outside, Interaction::Click);
        assert_eq!(n, 0);
        assert!(p.controller.is_active(p.trigger), "veto keeps it open");
        assert_eq!(p.controller.state(p.trigger).unwrap().dismissal.outside, None);
    }

    #[test]
    fn outside_click_dismisses_only_the_trigger_it_is_outside_of() {
        // Two widgets that exempt each other from exclusivity; a click
        // inside one is outside the other.
        let mut doc = Document::new();
        let mut make = |doc: &mut Document, i: usize| {
            let parent = doc.append(doc.root(), "div");
            let trigger = doc.append(parent, "span");
            doc.add_class(trigger, "t");
            doc.set_attribute(
                trigger,
                "data-toggle",
                &format!(r##"{{"target": "#p{i}", "skipSelector": ".t"}}"##),
            );
            let panel = doc.append(parent, "div");
            doc.set_id(panel, &format!("p{i}"));
            (trigger, panel)
        };
        let (t0, panel0) = make(&mut doc, 0);
        let (t1, _panel1) = make(&mut doc, 1);
        let mut host = DocumentHost::new(doc);
        let mut c = Controller::new(Config::default());
        c.init(&mut host, 0).unwrap();

        c.set(&mut host, t0, Some(Interaction::Click), 0);
        c.set(&mut host, t1, Some(Interaction::Click), 0);
        assert!(c.is_active(t0) && c.is_active(t1));
        // panel0 is inside the first widget but outside the second.
        assert_eq!(
            c.on_document_interaction(&mut host, panel0, Interaction::Click),
            1
        );
        assert!(c.is_active(t0));
        assert!(!c.is_active(t1));
    }

    #[test]
    fn inner_close_control_dismisses() {
        let mut p = page();
        let close = p.host.doc.append(p.panel, "span");
        p.host.doc.set_attribute(close, "data-toggle-close", "");
        p.controller.set(&mut p.host, p.trigger, Some(Interaction::Click), 0);
        let n = p
            .controller
            .on_document_interaction(&mut p.host, close, Interaction::Click);
        assert_eq!(n, 1);
        assert!(!p.controller.is_active(p.trigger));
    }

    #[test]
    fn inner_close_matches_through_descendants() {
        // Clicking an icon inside the close control still dismisses.
        let mut p = page();
        let close = p.host.doc.append(p.panel, "span");
        p.host.doc.set_attribute(close, "data-toggle-close", "");
        let icon = p.host.doc.append(close, "i");
        p.controller.set(&mut p.host, p.trigger, Some(Interaction::Click), 0);
        let n = p
            .controller
            .on_document_interaction(&mut p.host, icon, Interaction::Click);
        assert_eq!(n, 1);
        assert!(!p.controller.is_active(p.trigger));
    }

    #[test]
    fn inner_close_discriminator_selects_its_trigger() {
        let mut p = page();
        p.host.doc.set_id(p.trigger, "opener");
        let close = p.host.doc.append(p.panel, "span");
        p.host.doc.set_attribute(close, "data-toggle-close", "#someone-else");
        p.controller.set(&mut p.host, p.trigger, Some(Interaction::Click), 0);
        assert_eq!(
            p.controller
                .on_document_interaction(&mut p.host, close, Interaction::Click),
            0
        );
        assert!(p.controller.is_active(p.trigger));

        p.host.doc.set_attribute(close, "data-toggle-close", "#opener");
        assert_eq!(
            p.controller
                .on_document_interaction(&mut p.host, close, Interaction::Click),
            1
        );
        assert!(!p.controller.is_active(p.trigger));
    }

    #[test]
    fn hover_out_dismisses_from_the_parent_only() {
        let mut p = page_with(
            r#"{"target": ".panel", "parent": ".menu", "unsetOnHoverOut": true}"#,
        );
        p.controller
            .set(&mut p.host, p.trigger, Some(Interaction::HoverEnter), 0);
        // Leaving some other element is not leaving the parent.
        assert_eq!(p.controller.on_hover_leave(&mut p.host, p.outside), 0);
        assert!(p.controller.is_active(p.trigger));
        assert_eq!(p.controller.on_hover_leave(&mut p.host, p.parent), 1);
        assert!(!p.controller.is_active(p.trigger));
    }

    #[test]
    fn hover_out_unarmed_without_the_option() {
        let mut p = page();
        p.controller
            .set(&mut p.host, p.trigger, Some(Interaction::HoverEnter), 0);
        assert_eq!(p.controller.on_hover_leave(&mut p.host, p.parent), 0);
        assert!(p.controller.is_active(p.trigger));
    }

    #[test]
    fn timeout_fires_at_the_deadline_not_before() {
        let mut p = page_with(r#"{"target": ".panel", "timeout": 300}"#);
        p.controller.set(&mut p.host, p.trigger, None, 1000);
        assert_eq!(p.controller.on_tick(&mut p.host, 1299), 0);
        assert!(p.controller.is_active(p.trigger));
        assert_eq!(p.controller.on_tick(&mut p.host, 1300), 1);
        assert!(!p.controller.is_active(p.trigger));
        // Nothing left to fire.
        assert_eq!(p.controller.on_tick(&mut p.host, 5000), 0);
    }

    #[test]
    fn manual_dismissal_cancels_a_pending_timeout() {
        let mut p = page_with(r#"{"target": ".panel", "timeout": 300}"#);
        p.controller.set(&mut p.host, p.trigger, None, 0);
        p.controller.unset(&mut p.host, p.trigger);
        p.controller.set(&mut p.host, p.trigger, None, 0);
        p.controller.unset(&mut p.host, p.trigger);
        // No stale deadline fires after the pair of manual round trips.
        assert_eq!(p.controller.on_tick(&mut p.host, 10_000), 0);
    }
}
