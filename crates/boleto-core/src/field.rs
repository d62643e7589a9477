// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Fixed-width field descriptors.
//
// A stored field is either exactly `width` digits, or `width` digits followed
// by `-` and a single check character (e.g. `0278-0`). Fields declared
// alphanumeric accept letters in the number part as well.

use std::fmt::Display;

use crate::error::{EncodingError, Result};
use crate::numeric::pad_left;

/// Describes one slip attribute: its name, target width, and character set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub width: usize,
    pub alphanumeric: bool,
}

impl Field {
    /// A digits-only field.
    pub const fn new(name: &'static str, width: usize) -> Self {
        Self {
            name,
            width,
            alphanumeric: false,
        }
    }

    /// A field whose number part may contain ASCII letters (Caixa's `SR`).
    pub const fn alphanumeric(name: &'static str, width: usize) -> Self {
        Self {
            name,
            width,
            alphanumeric: true,
        }
    }

    /// Normalise `value` to this field's width, preserving a trailing `-DV`.
    ///
    /// `"123"`, `"00123"` and `123` all normalise to `"00123"` for width 5.
    pub fn normalize(&self, value: impl Display) -> Result<String> {
        let raw = value.to_string();
        let raw = raw.trim();
        let parts: Vec<&str> = raw.split('-').collect();
        match parts.as_slice() {
            [number] if self.accepts(number) => pad_left(self.name, number, self.width),
            [number, dv] if self.accepts(number) && is_check_char(dv) => {
                let padded = pad_left(self.name, number, self.width)?;
                Ok(format!("{padded}-{dv}"))
            }
            _ => Err(EncodingError::MalformedField {
                field: self.name,
                value: raw.to_owned(),
            }),
        }
    }

    fn accepts(&self, number: &str) -> bool {
        !number.is_empty()
            && number.bytes().all(|b| {
                b.is_ascii_digit() || (self.alphanumeric && b.is_ascii_alphabetic())
            })
    }
}

fn is_check_char(dv: &str) -> bool {
    let mut chars = dv.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_ascii_alphanumeric())
}

/// The value without its `-DV` suffix.
pub fn without_dv(stored: &str) -> &str {
    stored.split_once('-').map_or(stored, |(number, _)| number)
}

/// The `-DV` suffix of a stored value, if any.
pub fn dv_of(stored: &str) -> Option<&str> {
    stored.split_once('-').map(|(_, dv)| dv)
}
