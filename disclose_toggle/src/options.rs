// Copyright 2025 the Disclose Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration resolution: process-wide defaults merged with each
//! trigger's inline declarative payload.
//!
//! A trigger declares its behavior as a JSON object in its configuration
//! attribute (`data-toggle` by default). At bind time the object is merged
//! over the process-wide defaults from [`Config`]: inline keys win, and the
//! two reserved initializer keys (`triggers`, `dataAttribute`) are modeled as
//! dedicated [`Config`] fields so they can never leak into a per-trigger
//! result. Missing keys are back-filled from the option defaults.
//!
//! Unknown keys in either layer are ignored, matching the permissive
//! attribute-driven style of the declarative surface. Type mismatches are
//! not: a string `timeout` or an object `auto` is a configuration error and
//! propagates.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::{AutoRule, Breakpoint, ToggleError};

/// Default per-element configuration attribute name.
pub const DEFAULT_DATA_ATTRIBUTE: &str = "data-toggle";

/// Default selector for dismiss controls inside a target.
pub const DEFAULT_CLOSE_SELECTOR: &str = "[data-toggle-close]";

/// Default active marker class.
pub const DEFAULT_ACTIVE_CLASS: &str = "active";

/// Attribute on a dismiss control naming which triggers it closes.
///
/// Its value is a selector the *trigger* must match. A bare or empty
/// attribute closes any trigger whose target contains the control.
pub const CLOSE_DISCRIMINATOR_ATTRIBUTE: &str = "data-toggle-close";

/// Effective per-trigger configuration after merging and back-filling.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ToggleOptions {
    /// Selector for dismiss controls inside the target.
    pub close_selector: String,
    /// The shared active marker class applied to trigger, parent, and target.
    pub active_class: String,
    /// Whether toggling an active trigger closes it. When false the trigger
    /// can only be closed by exclusivity, dismissal, or an explicit unset.
    pub unset_self: bool,
    /// Parent container selector; empty or absent falls back to the
    /// structural parent.
    pub parent: Option<String>,
    /// Target region selector. Required: a trigger without a resolvable
    /// target is skipped at bind time.
    pub target: Option<String>,
    /// Space-separated interaction event names the host should wire to
    /// [`Controller::on_trigger_interaction`](crate::Controller::on_trigger_interaction).
    pub event: String,
    /// Exempts the trigger from outside-interaction dismissal and from
    /// exclusivity sweeps (unless grouped via `sibling_selector`).
    pub persist: bool,
    /// Arm a hover-out dismissal handle on the parent at activation.
    pub unset_on_hover_out: bool,
    /// Auto-dismiss this many milliseconds after activation.
    pub timeout: Option<u64>,
    /// Selector grouping mutually-exclusive sibling triggers.
    pub sibling_selector: Option<String>,
    /// Active triggers matching this selector are spared by this trigger's
    /// exclusivity sweep.
    pub skip_selector: Option<String>,
    /// Auto-activation rule, evaluated once at bind.
    pub auto: Option<AutoRule>,
}

impl Default for ToggleOptions {
    fn default() -> Self {
        Self {
            close_selector: DEFAULT_CLOSE_SELECTOR.to_owned(),
            active_class: DEFAULT_ACTIVE_CLASS.to_owned(),
            unset_self: true,
            parent: None,
            target: None,
            event: "click".to_owned(),
            persist: false,
            unset_on_hover_out: false,
            timeout: None,
            sibling_selector: None,
            skip_selector: None,
            auto: None,
        }
    }
}

impl ToggleOptions {
    /// The configured interaction event names.
    pub fn events(&self) -> impl Iterator<Item = &str> {
        self.event.split_whitespace()
    }
}

/// Process-wide initializer configuration.
///
/// `triggers` and `data_attribute` select and configure elements and are
/// never merged into per-trigger options. Any other keys (captured by
/// `defaults`) act as process-wide defaults for [`ToggleOptions`] and lose
/// to inline keys.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Selector for trigger elements; defaults to `[<data_attribute>]`.
    pub triggers: Option<String>,
    /// Name of the per-element configuration attribute.
    pub data_attribute: Option<String>,
    /// Breakpoints table for breakpoint-driven auto-activation.
    pub breakpoints: Option<BTreeMap<String, Breakpoint>>,
    /// Process-wide defaults for any per-trigger option key.
    #[serde(flatten)]
    pub defaults: Map<String, Value>,
}

impl Config {
    /// The effective configuration attribute name.
    pub fn attribute_name(&self) -> &str {
        self.data_attribute.as_deref().unwrap_or(DEFAULT_DATA_ATTRIBUTE)
    }

    /// The effective trigger selector.
    pub fn trigger_selector(&self) -> String {
        self.triggers
            .clone()
            .unwrap_or_else(|| format!("[{}]", self.attribute_name()))
    }
}

/// Merge a trigger's inline payload over the process-wide defaults and
/// deserialize the result, back-filling option defaults.
pub fn resolve_options(
    inline: &Map<String, Value>,
    config: &Config,
) -> Result<ToggleOptions, ToggleError> {
    let mut merged = config.defaults.clone();
    for (key, value) in inline {
        merged.insert(key.clone(), value.clone());
    }
    Ok(serde_json::from_value(Value::Object(merged))?)
}

/// Parse a raw configuration attribute payload into a JSON object.
pub(crate) fn parse_payload(raw: &str) -> Result<Map<String, Value>, ToggleError> {
    match serde_json::from_str::<Value>(raw)? {
        Value::Object(map) => Ok(map),
        other => Err(ToggleError::ConfigShape(value_kind(&other))),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
