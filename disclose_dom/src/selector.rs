// Copyright 2025 the Disclose Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compound-selector parsing.
//!
//! A [`SelectorList`] is a comma-separated list of compound selectors. Each
//! compound is an optional type selector (or `*`) followed by any number of
//! id, class, and attribute simple selectors, with no whitespace between
//! them. An element matches the list when it matches at least one compound;
//! it matches a compound when it satisfies every simple selector in it.
//!
//! Matching itself lives on [`Document`](crate::Document), which owns the
//! element data; this module only produces the parsed representation.

use thiserror::Error;

/// Errors produced while parsing a selector.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SelectorError {
    /// The selector string (or one list item) was empty.
    #[error("empty selector")]
    Empty,
    /// An identifier was expected but missing, e.g. a bare `.` or `#`.
    #[error("expected an identifier at byte {0}")]
    EmptyName(usize),
    /// A character that cannot start a simple selector.
    #[error("unexpected character {0:?}")]
    UnexpectedChar(char),
    /// An attribute selector was not closed with `]`.
    #[error("unclosed attribute selector")]
    UnclosedAttribute,
    /// Whitespace inside a compound; combinators are not supported.
    #[error("combinators are not supported")]
    UnsupportedCombinator,
}

/// One attribute constraint inside a compound selector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct AttrMatch {
    pub(crate) name: String,
    /// `None` matches mere presence (`[name]`); `Some` requires equality.
    pub(crate) value: Option<String>,
}

/// One compound selector: every constraint must hold for a match.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Compound {
    /// Required tag name; `None` when omitted or `*`.
    pub(crate) tag: Option<String>,
    pub(crate) id: Option<String>,
    pub(crate) classes: Vec<String>,
    pub(crate) attrs: Vec<AttrMatch>,
}

/// A parsed, comma-separated selector list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectorList {
    pub(crate) parts: Vec<Compound>,
}

impl SelectorList {
    /// Parse a selector list from its textual form.
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        let mut parts = Vec::new();
        for chunk in input.split(',') {
            parts.push(parse_compound(chunk.trim())?);
        }
        Ok(Self { parts })
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

/// Read an identifier starting at `pos`, returning it and the byte offset
/// one past its end.
fn read_ident(s: &str, pos: usize) -> Result<(String, usize), SelectorError> {
    let rest = &s[pos..];
    let end = rest
        .char_indices()
        .find(|&(_, c)| !is_ident_char(c))
        .map_or(rest.len(), |(i, _)| i);
    if end == 0 {
        return Err(SelectorError::EmptyName(pos));
    }
    Ok((rest[..end].to_owned(), pos + end))
}

fn parse_attr(s: &str, pos: usize) -> Result<(AttrMatch, usize), SelectorError> {
    let (name, mut i) = read_ident(s, pos)?;
    let bytes = s.as_bytes();
    if i >= s.len() {
        return Err(SelectorError::UnclosedAttribute);
    }
    if bytes[i] == b']' {
        return Ok((AttrMatch { name, value: None }, i + 1));
    }
    if bytes[i] != b'=' {
        return Err(SelectorError::UnexpectedChar(s[i..].chars().next().unwrap_or(']')));
    }
    i += 1;
    // Optionally quoted value; unquoted values run to the closing bracket.
    let (value, after) = if i < s.len() && (bytes[i] == b'"' || bytes[i] == b'\'') {
        let quote = bytes[i] as char;
        let start = i + 1;
        let end = s[start..]
            .find(quote)
            .map(|off| start + off)
            .ok_or(SelectorError::UnclosedAttribute)?;
        (s[start..end].to_owned(), end + 1)
    } else {
        let end = s[i..]
            .find(']')
            .map(|off| i + off)
            .ok_or(SelectorError::UnclosedAttribute)?;
        (s[i..end].to_owned(), end)
    };
    if after >= s.len() || bytes[after] != b']' {
        return Err(SelectorError::UnclosedAttribute);
    }
    Ok((
        AttrMatch {
            name,
            value: Some(value),
        },
        after + 1,
    ))
}

fn parse_compound(s: &str) -> Result<Compound, SelectorError> {
    if s.is_empty() {
        return Err(SelectorError::Empty);
    }
    let mut out = Compound::default();
    let mut i = 0;

    // Leading type selector or `*`.
    match s.chars().next() {
        Some('*') => i = 1,
        Some(c) if is_ident_char(c) => {
            let (tag, next) = read_ident(s, 0)?;
            out.tag = Some(tag);
            i = next;
        }
        _ => {}
    }

    while i < s.len() {
        let c = s[i..].chars().next().unwrap_or(' ');
        match c {
            '.' => {
                let (class, next) = read_ident(s, i + 1)?;
                out.classes.push(class);
                i = next;
            }
            '#' => {
                let (id, next) = read_ident(s, i + 1)?;
                out.id = Some(id);
                i = next;
            }
            '[' => {
                let (attr, next) = parse_attr(s, i + 1)?;
                out.attrs.push(attr);
                i = next;
            }
            c if c.is_whitespace() => return Err(SelectorError::UnsupportedCombinator),
            other => return Err(SelectorError::UnexpectedChar(other)),
        }
    }
    Ok(out)
}
