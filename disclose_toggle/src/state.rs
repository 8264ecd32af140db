// Copyright 2025 the Disclose Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-trigger state: the registry record and its armed dismissal handles.

use crate::options::ToggleOptions;
use crate::types::PointerFamily;

/// The registry record for one bound trigger.
///
/// Created at bind time and owned by the controller's registry; the `parent`
/// and `target` handles are lookups into the host tree, never owned. The
/// only true state variable is `active`; it is mirrored observably by the
/// configured active class on trigger, parent, and target, which the state
/// machine keeps in lockstep (all three or none).
#[derive(Clone, Debug)]
pub struct ToggleState<K> {
    /// Effective configuration for this trigger.
    pub options: ToggleOptions,
    /// The trigger element.
    pub trigger: K,
    /// The resolved parent container.
    pub parent: K,
    /// The resolved target region. Exactly one per trigger; the controller
    /// also records the reverse target → trigger lookup.
    pub target: K,
    /// Whether the trigger is currently active.
    pub active: bool,
    /// Armed transient dismissal handles; released on every deactivation
    /// path and re-armed fresh on every activation.
    pub(crate) dismissal: DismissalHandles,
    /// Pending timed auto-activation deadline (absolute milliseconds).
    pub(crate) auto_deadline: Option<u64>,
}

impl<K> ToggleState<K> {
    /// Whether any transient dismissal handle is currently armed.
    pub fn has_armed_dismissal(&self) -> bool {
        !self.dismissal.is_released()
    }
}

/// The armed transient listener handles of one active trigger.
///
/// Each field models one "listener" the original concept installs per
/// activation: arming is a plain field write, firing clears the field first
/// (one-shot semantics), and [`DismissalHandles::release`] drops all of them
/// at once so that deactivation by any path never leaves a handle dangling
/// or lets handles accumulate across repeated activations.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct DismissalHandles {
    /// Outside-interaction handle, bound to one pointer family.
    pub(crate) outside: Option<PointerFamily>,
    /// Hover-out handle on the parent container.
    pub(crate) hover_out: bool,
    /// Timeout dismissal deadline (absolute milliseconds).
    pub(crate) deadline: Option<u64>,
    /// Inner dismiss-control click handle on the target.
    pub(crate) inner_close: bool,
}

impl DismissalHandles {
    pub(crate) fn release(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn is_released(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_clears_every_handle() {
        let mut handles = DismissalHandles {
            outside: Some(PointerFamily::Touch),
            hover_out: true,
            deadline: Some(1500),
            inner_close: true,
        };
        assert!(!handles.is_released());
        handles.release();
        assert!(handles.is_released());
        assert_eq!(handles.outside, None);
        assert_eq!(handles.deadline, None);
    }
}
