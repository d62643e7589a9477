// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// 033 — Santander.

use boleto_core::error::Result;
use boleto_core::field::Field;
use boleto_core::numeric::{digit_char, modulo11_dv};
use boleto_core::slip::{BankEncoder, FieldLayout, Slip};

#[derive(Debug, Clone, Copy)]
pub struct Santander {
    /// IOS flag, only non-zero for insurance companies.
    pub ios: char,
}

impl Default for Santander {
    fn default() -> Self {
        Self { ios: '0' }
    }
}

impl BankEncoder for Santander {
    fn bank_code(&self) -> &'static str {
        "033"
    }

    fn bank_name(&self) -> &'static str {
        "Santander"
    }

    fn layout(&self) -> FieldLayout {
        FieldLayout {
            agency: Field::new("agency", 4),
            account: Field::new("account", 7),
            portfolio: Some(Field::new("portfolio", 3)),
            customer_number: Field::new("customer_number", 7),
            convenio: None,
        }
    }

    fn default_portfolio(&self) -> Option<&'static str> {
        Some("102")
    }

    fn free_field(&self, slip: &Slip) -> Result<String> {
        let dv = digit_char(modulo11_dv(slip.customer_number()?, 9)?);
        Ok(format!(
            "9{}00000{}{dv}{}{}",
            slip.account_number()?,
            slip.customer_number()?,
            self.ios,
            slip.portfolio()?
        ))
    }

    fn customer_number_dv(&self, slip: &Slip) -> Result<Option<String>> {
        let dv = modulo11_dv(slip.customer_number()?, 9)?;
        Ok(Some(digit_char(dv).to_string()))
    }
}
