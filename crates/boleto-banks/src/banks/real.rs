// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// 356 — Banco Real.

use boleto_core::error::Result;
use boleto_core::field::Field;
use boleto_core::numeric::{digit_char, modulo10};
use boleto_core::slip::{BankEncoder, FieldLayout, Slip};

#[derive(Debug, Clone, Copy, Default)]
pub struct Real;

impl BankEncoder for Real {
    fn bank_code(&self) -> &'static str {
        "356"
    }

    fn bank_name(&self) -> &'static str {
        "Banco Real"
    }

    fn layout(&self) -> FieldLayout {
        FieldLayout {
            agency: Field::new("agency", 4),
            account: Field::new("account", 7),
            portfolio: None,
            customer_number: Field::new("customer_number", 13),
            convenio: None,
        }
    }

    fn free_field(&self, slip: &Slip) -> Result<String> {
        let agency = slip.agency_number()?;
        let account = slip.account_number()?;
        let customer = slip.customer_number()?;
        // "Dígito de cobrança" over customer number, agency and account.
        let dv = modulo10(&format!("{customer}{agency}{account}"))?;
        Ok(format!("{agency}{account}{}{customer}", digit_char(dv)))
    }
}
