// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Boleto core — check digits, field descriptors, and slip assembly shared by
// every bank encoder.

pub mod config;
pub mod digitable;
pub mod error;
pub mod field;
pub mod numeric;
pub mod slip;
pub mod types;

pub use config::{EncoderConfig, FactorPolicy};
pub use digitable::{barcode_from_line, line_from_barcode, verify_barcode};
pub use error::{EncodingError, Result};
pub use field::Field;
pub use slip::{BankEncoder, FieldLayout, Slip};
pub use types::*;
