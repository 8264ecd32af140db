// Copyright 2025 the Disclose Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Disclose Toggle: a headless, declarative show/hide controller.
//!
//! ## Overview
//!
//! This crate binds "trigger" elements to "target" content regions and runs
//! the set/unset/toggle state machine between them: a trigger activates or
//! deactivates its target, optionally scoped within a parent container, with
//! configurable dismissal, mutual exclusion among sibling triggers,
//! auto-activation rules, and lifecycle hooks.
//!
//! The engine is headless. It never owns an element tree; it is generic over
//! a small copyable element handle `K` and reaches the host exclusively
//! through the [`Dom`] trait (structure queries, selector matching, class
//! mutation, attribute access, environment queries). Per-trigger state lives
//! in an explicit registry inside [`Controller`], never on the elements
//! themselves, and every transient "listener" is an explicit armed handle
//! released on every deactivation path.
//!
//! ## Time
//!
//! The engine does not own a clock. Operations that schedule work take a
//! `now` timestamp in milliseconds, and the host drives pending deadlines by
//! calling [`Controller::on_tick`] with the current time. Timed
//! auto-activation and timeout dismissal are both modeled this way.
//!
//! ## Wiring
//!
//! 1. Build a [`Config`] (process-wide defaults, trigger selection, optional
//!    breakpoints table) and a [`Controller`] around it.
//! 2. Call [`Controller::init`] to discover triggers, parse each one's
//!    declarative configuration attribute, and bind it to its parent and
//!    target.
//! 3. Feed host events in: configured interaction events via
//!    [`Controller::on_trigger_interaction`], document-level pointer events
//!    via [`Controller::on_document_interaction`], hover-leave events via
//!    [`Controller::on_hover_leave`], key-down via
//!    [`Controller::on_key_down`], and the clock via
//!    [`Controller::on_tick`].
//!
//! ## Example
//!
//! ```
//! use disclose_dom::Document;
//! use disclose_toggle::adapters::DocumentHost;
//! use disclose_toggle::{Config, Controller, Interaction};
//!
//! let mut doc = Document::new();
//! let trigger = doc.append(doc.root(), "span");
//! doc.set_attribute(trigger, "data-toggle", r#"{"target": ".panel"}"#);
//! let panel = doc.append(doc.root(), "div");
//! doc.add_class(panel, "panel");
//!
//! let mut host = DocumentHost::new(doc);
//! let mut controller = Controller::new(Config::default());
//! assert_eq!(controller.init(&mut host, 0).unwrap(), 1);
//!
//! controller.on_trigger_interaction(&mut host, trigger, Interaction::Click, 0);
//! assert!(controller.is_active(trigger));
//! assert!(host.doc.has_class(panel, "active"));
//! ```

pub mod adapters;
pub mod auto;
pub mod binding;
pub mod controller;
pub mod dismiss;
pub mod exclusive;
pub mod hooks;
pub mod host;
pub mod keyboard;
pub mod machine;
pub mod options;
pub mod state;
pub mod types;

pub use controller::Controller;
pub use hooks::Hooks;
pub use host::Dom;
pub use options::{
    CLOSE_DISCRIMINATOR_ATTRIBUTE, Config, DEFAULT_ACTIVE_CLASS, DEFAULT_CLOSE_SELECTOR,
    DEFAULT_DATA_ATTRIBUTE, ToggleOptions,
};
pub use state::ToggleState;
pub use types::{AutoRule, Breakpoint, Interaction, Key, PointerFamily, ToggleError};
