// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// 104 — Caixa Econômica Federal (SICOB layout, "80" customer-number range).

use boleto_core::error::Result;
use boleto_core::field::Field;
use boleto_core::numeric::{digit_char, modulo11_residue};
use boleto_core::slip::{BankEncoder, FieldLayout, Slip};

#[derive(Debug, Clone, Copy, Default)]
pub struct Caixa;

impl Caixa {
    /// The 10-digit customer number written to the barcode: `80` + 8 digits.
    fn full_customer_number(slip: &Slip) -> Result<String> {
        Ok(format!("80{}", slip.customer_number()?))
    }
}

impl BankEncoder for Caixa {
    fn bank_code(&self) -> &'static str {
        "104"
    }

    fn bank_name(&self) -> &'static str {
        "Caixa Econômica Federal"
    }

    fn layout(&self) -> FieldLayout {
        FieldLayout {
            agency: Field::new("agency", 4),
            account: Field::new("account", 11),
            portfolio: Some(Field::alphanumeric("portfolio", 2)),
            customer_number: Field::new("customer_number", 8),
            convenio: None,
        }
    }

    fn default_portfolio(&self) -> Option<&'static str> {
        Some("SR")
    }

    fn free_field(&self, slip: &Slip) -> Result<String> {
        Ok(format!(
            "{}{}{}",
            Self::full_customer_number(slip)?,
            slip.agency_number()?,
            slip.account_number()?
        ))
    }

    fn customer_number_dv(&self, slip: &Slip) -> Result<Option<String>> {
        let digit = 11 - modulo11_residue(&Self::full_customer_number(slip)?, 9)?;
        let dv = if digit >= 10 { 0 } else { digit };
        Ok(Some(digit_char(dv).to_string()))
    }

    fn formatted_customer_number(&self, slip: &Slip) -> Result<String> {
        let number = Self::full_customer_number(slip)?;
        Ok(match self.customer_number_dv(slip)? {
            Some(dv) => format!("{number}-{dv}"),
            None => number,
        })
    }
}
