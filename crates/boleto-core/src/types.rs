// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for boleto encoding.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::EncoderConfig;
use crate::error::{EncodingError, Result};
use crate::numeric::pad_left;

/// Currency code for the Brazilian real, the only one the standard defines.
pub const CURRENCY_BRL: char = '9';

/// A non-negative document amount held as integer centavos.
///
/// Parsed from strings like `"2952.95"`, `"550"` or `"0.5"`; more than two
/// fractional digits are rejected rather than rounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Amount(u64);

impl Amount {
    pub const fn from_centavos(centavos: u64) -> Self {
        Self(centavos)
    }

    pub const fn centavos(&self) -> u64 {
        self.0
    }

    /// Zero-padded centavos, as written into the barcode (width 10).
    pub fn format(&self, width: usize) -> Result<String> {
        pad_left("document_amount", &self.0.to_string(), width)
    }
}

impl FromStr for Amount {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || EncodingError::InvalidAmount(s.to_owned());
        let trimmed = s.trim();
        let (units, cents) = match trimmed.split_once('.') {
            Some((units, cents)) => (units, cents),
            None => (trimmed, ""),
        };
        let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if units.is_empty() || cents.len() > 2 || !all_digits(units) || !all_digits(cents) {
            return Err(invalid());
        }
        let units: u64 = units.parse().map_err(|_| invalid())?;
        let cents: u64 = match cents.len() {
            0 => 0,
            1 => cents.parse::<u64>().map_err(|_| invalid())? * 10,
            _ => cents.parse().map_err(|_| invalid())?,
        };
        units
            .checked_mul(100)
            .and_then(|v| v.checked_add(cents))
            .map(Self)
            .ok_or_else(invalid)
    }
}

impl TryFrom<String> for Amount {
    type Error = EncodingError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Amount> for String {
    fn from(amount: Amount) -> Self {
        amount.to_string()
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

/// Attributes carried for rendering only; none of them enter the barcode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlipDetails {
    /// Beneficiary ("cedente") name.
    pub beneficiary: Option<String>,
    /// Beneficiary CPF/CNPJ, as printed.
    pub beneficiary_document: Option<String>,
    pub beneficiary_address: Option<String>,
    /// Payer ("sacado") name and address lines.
    pub payer_lines: Vec<String>,
    /// Free-text lines of the receipt stub.
    pub demonstrative: Vec<String>,
    /// Instructions to the cashier.
    pub instructions: Vec<String>,
    pub document_number: Option<String>,
    pub document_date: Option<NaiveDate>,
    pub processing_date: Option<NaiveDate>,
    /// Document kind, e.g. `DM` (duplicata mercantil).
    pub species: String,
    pub acceptance: String,
    pub species_label: String,
    pub quantity: Option<String>,
}

impl Default for SlipDetails {
    fn default() -> Self {
        Self {
            beneficiary: None,
            beneficiary_document: None,
            beneficiary_address: None,
            payer_lines: Vec::new(),
            demonstrative: Vec::new(),
            instructions: Vec::new(),
            document_number: None,
            document_date: None,
            processing_date: None,
            species: "DM".into(),
            acceptance: "N".into(),
            species_label: "R$".into(),
            quantity: None,
        }
    }
}

impl SlipDetails {
    /// Check the line-count limits configured for rendering.
    pub fn validate(&self, config: &EncoderConfig) -> Result<()> {
        check_lines("payer_lines", &self.payer_lines, config.max_payer_lines)?;
        check_lines(
            "instructions",
            &self.instructions,
            config.max_instruction_lines,
        )
    }
}

fn check_lines(field: &'static str, lines: &[String], max: usize) -> Result<()> {
    if lines.len() > max {
        return Err(EncodingError::TooManyLines {
            field,
            max,
            got: lines.len(),
        });
    }
    Ok(())
}

/// Keyword parameters for building a slip. Every field is optional here;
/// missing encoded fields surface as `MissingField` when the barcode is read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlipParams {
    pub due_date: Option<NaiveDate>,
    pub document_amount: Option<Amount>,
    pub agency: Option<String>,
    pub account: Option<String>,
    /// Carteira.
    pub portfolio: Option<String>,
    /// Nosso número.
    pub customer_number: Option<String>,
    /// Convênio (Banco do Brasil agreement number).
    pub convenio: Option<String>,
    /// Customer-number format for 6-digit convênios: 1 (5 digits) or 2 (17).
    pub nn_format: u8,
    pub details: SlipDetails,
}

impl Default for SlipParams {
    fn default() -> Self {
        Self {
            due_date: None,
            document_amount: None,
            agency: None,
            account: None,
            portfolio: None,
            customer_number: None,
            convenio: None,
            nn_format: 1,
            details: SlipDetails::default(),
        }
    }
}
