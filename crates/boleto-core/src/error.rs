// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error type for boleto encoding.

use thiserror::Error;

/// Every way a slip can fail to encode.
///
/// Each variant names the field or invariant that was violated so callers
/// can surface it next to the offending input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    // -- Field normalisation --
    #[error("{field}: value {value:?} does not fit in {width} digits")]
    FieldTooLong {
        field: &'static str,
        width: usize,
        value: String,
    },

    #[error("{field}: wrong value format {value:?}")]
    MalformedField { field: &'static str, value: String },

    #[error("{0} is required to build the barcode")]
    MissingField(&'static str),

    #[error("{field}: at most {max} lines allowed, got {got}")]
    TooManyLines {
        field: &'static str,
        max: usize,
        got: usize,
    },

    // -- Amount / date --
    #[error("invalid document amount: {0:?}")]
    InvalidAmount(String),

    #[error("due date {date} has no factor under the {policy} policy")]
    DueDateOutOfRange { date: String, policy: &'static str },

    // -- Assembly / decoding --
    #[error("barcode must be 44 digits, got {0}")]
    BarcodeLength(usize),

    #[error("invalid barcode: {0}")]
    InvalidBarcode(String),

    #[error("invalid line digitable: {0}")]
    InvalidLine(String),

    #[error("{what}: check digit mismatch, expected {expected}, got {actual}")]
    CheckDigitMismatch {
        what: &'static str,
        expected: u32,
        actual: u32,
    },

    #[error("unsupported layout: {0}")]
    UnsupportedLayout(String),

    // -- Registry --
    #[error("encoder for bank {encoder} cannot be registered under {registered}")]
    BankCodeMismatch {
        registered: String,
        encoder: &'static str,
    },

    // -- Configuration --
    #[error("invalid encoder configuration: {0}")]
    InvalidConfig(String),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, EncodingError>;
