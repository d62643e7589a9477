// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// 041 — Banrisul.
//
// Banrisul closes its free field with a two-digit check pair ("NC"): a
// modulo-10 digit, then a modulo-11 digit (weights 2..7) over the value plus
// the first digit. A modulo-11 residue of 1 is not allowed; the first digit is
// bumped until the residue changes.

use boleto_core::error::{EncodingError, Result};
use boleto_core::field::Field;
use boleto_core::numeric::{modulo10, modulo11_residue};
use boleto_core::slip::{BankEncoder, FieldLayout, Slip};

/// The Banrisul two-digit check pair over `value`.
pub fn double_check_digits(value: &str) -> Result<String> {
    let mut first = modulo10(value)?;
    for _ in 0..10 {
        let residue = modulo11_residue(&format!("{value}{first}"), 7)?;
        if residue == 1 {
            first = (first + 1) % 10;
            continue;
        }
        let second = if residue == 0 { 0 } else { 11 - residue };
        return Ok(format!("{first}{second}"));
    }
    Err(EncodingError::UnsupportedLayout(format!(
        "no Banrisul check pair for {value}"
    )))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Banrisul;

impl BankEncoder for Banrisul {
    fn bank_code(&self) -> &'static str {
        "041"
    }

    fn bank_name(&self) -> &'static str {
        "Banrisul"
    }

    fn layout(&self) -> FieldLayout {
        FieldLayout {
            agency: Field::new("agency", 4),
            account: Field::new("account", 6),
            portfolio: None,
            customer_number: Field::new("customer_number", 8),
            convenio: None,
        }
    }

    fn free_field(&self, slip: &Slip) -> Result<String> {
        // Product "2" (free numbering), constant "1", then "0" and "40".
        let body = format!(
            "21{}{}0{}40",
            slip.agency_number()?,
            slip.account_number()?,
            slip.customer_number()?
        );
        let pair = double_check_digits(&body)?;
        Ok(format!("{body}{pair}"))
    }

    fn customer_number_dv(&self, slip: &Slip) -> Result<Option<String>> {
        double_check_digits(slip.customer_number()?).map(Some)
    }
}
