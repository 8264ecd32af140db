// Copyright 2025 the Disclose Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core value types: interactions, auto-activation rules, breakpoints, and
//! the error taxonomy.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Classification of a host interaction event.
///
/// Hosts translate their raw event names into these kinds before feeding
/// them to the controller; [`Interaction::from_event_name`] covers the usual
/// DOM vocabulary.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Interaction {
    /// A click-family pointer interaction (mouse click, synthetic click).
    Click,
    /// A touch-family pointer interaction.
    Touch,
    /// The pointer entered the element (never closes an open trigger).
    HoverEnter,
    /// The pointer left the element.
    HoverLeave,
    /// A keyboard activation routed through the keyboard bridge.
    Key,
}

impl Interaction {
    /// Classify a DOM-style event name.
    ///
    /// `touch*` events map to [`Interaction::Touch`], `mouseenter`/`mouseover`
    /// to [`Interaction::HoverEnter`], `mouseleave`/`mouseout` to
    /// [`Interaction::HoverLeave`], and everything else to
    /// [`Interaction::Click`].
    pub fn from_event_name(name: &str) -> Self {
        if name.starts_with("touch") {
            Self::Touch
        } else {
            match name {
                "mouseenter" | "mouseover" => Self::HoverEnter,
                "mouseleave" | "mouseout" => Self::HoverLeave,
                _ => Self::Click,
            }
        }
    }

    /// The pointer family this interaction belongs to, if any.
    ///
    /// Outside-interaction dismissal handles are bound to one family: a
    /// touch-originated activation listens for touch events, everything else
    /// listens for clicks. Hover and key interactions belong to no family.
    pub fn family(self) -> Option<PointerFamily> {
        match self {
            Self::Click => Some(PointerFamily::Click),
            Self::Touch => Some(PointerFamily::Touch),
            Self::HoverEnter | Self::HoverLeave | Self::Key => None,
        }
    }
}

/// The event family an outside-interaction dismissal handle is bound to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PointerFamily {
    /// Click-family events.
    Click,
    /// Touch-family events.
    Touch,
}

/// Keys relevant to the keyboard bridge.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Enter/Return.
    Enter,
    /// Any other key; the bridge ignores these.
    Other,
}

/// A trigger's auto-activation rule, evaluated once at bind time.
///
/// In the declarative payload this is the `auto` key: `true` activates
/// immediately, a number schedules a one-shot activation after that many
/// milliseconds, and a string is first tried as a URL token and then as a
/// breakpoint name.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(untagged)]
pub enum AutoRule {
    /// `auto: true` activates at bind; `auto: false` does nothing.
    Immediate(bool),
    /// `auto: 250` activates 250ms after bind if untouched.
    Delay(u64),
    /// `auto: "name"` matches a URL token or a breakpoints-table entry.
    Token(String),
}

/// One entry of the process-level breakpoints table.
///
/// An absent bound is unbounded on that side.
#[derive(Copy, Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Breakpoint {
    /// Minimum viewport width, inclusive.
    pub min: Option<f64>,
    /// Maximum viewport width, inclusive.
    pub max: Option<f64>,
}

impl Breakpoint {
    /// Whether a viewport width satisfies both bounds.
    pub fn contains(self, width: f64) -> bool {
        self.min.is_none_or(|min| width >= min) && self.max.is_none_or(|max| width <= max)
    }
}

/// Errors surfaced by trigger setup.
///
/// Binding failures (no resolvable target) are not errors: they are logged
/// as warnings and the trigger is skipped, leaving other triggers
/// unaffected. Vetoed transitions are plain `false` returns.
#[derive(Debug, Error)]
pub enum ToggleError {
    /// The declarative configuration payload was not valid JSON, or a value
    /// had the wrong shape for its option.
    #[error("malformed toggle configuration: {0}")]
    Config(#[from] serde_json::Error),
    /// The payload parsed but was not a JSON object.
    #[error("toggle configuration must be a JSON object, got {0}")]
    ConfigShape(&'static str),
}
