// Copyright 2025 the Disclose Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host adapters bundled with the engine.
//!
//! The engine only ever talks to a [`Dom`](crate::host::Dom) implementation;
//! this module provides the in-memory one used for servers, tests, and
//! anywhere no real page exists.

mod document;

pub use document::DocumentHost;
