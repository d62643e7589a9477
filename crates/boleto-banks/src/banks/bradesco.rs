// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// 237 — Bradesco.

use boleto_core::error::Result;
use boleto_core::field::Field;
use boleto_core::numeric::modulo11_residue;
use boleto_core::slip::{BankEncoder, FieldLayout, Slip};

#[derive(Debug, Clone, Copy, Default)]
pub struct Bradesco;

impl BankEncoder for Bradesco {
    fn bank_code(&self) -> &'static str {
        "237"
    }

    fn bank_name(&self) -> &'static str {
        "Bradesco"
    }

    fn layout(&self) -> FieldLayout {
        FieldLayout {
            agency: Field::new("agency", 4),
            account: Field::new("account", 7),
            portfolio: Some(Field::new("portfolio", 2)),
            customer_number: Field::new("customer_number", 11),
            convenio: None,
        }
    }

    fn default_portfolio(&self) -> Option<&'static str> {
        Some("06")
    }

    fn free_field(&self, slip: &Slip) -> Result<String> {
        Ok(format!(
            "{}{}{}{}0",
            slip.agency_number()?,
            slip.portfolio()?,
            slip.customer_number()?,
            slip.account_number()?
        ))
    }

    /// Modulo 11 with weights 2..7; a result of 10 prints as `P`.
    fn customer_number_dv(&self, slip: &Slip) -> Result<Option<String>> {
        let digit = 11 - modulo11_residue(slip.customer_number()?, 7)?;
        Ok(Some(match digit {
            10 => "P".to_owned(),
            11 => "0".to_owned(),
            d => d.to_string(),
        }))
    }

    fn formatted_customer_number(&self, slip: &Slip) -> Result<String> {
        let dv = self.customer_number_dv(slip)?.unwrap_or_default();
        Ok(format!(
            "{}/{}-{dv}",
            slip.portfolio()?,
            slip.customer_number()?
        ))
    }
}
