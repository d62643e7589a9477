// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// 341 — Itaú.

use boleto_core::error::Result;
use boleto_core::field::Field;
use boleto_core::numeric::{digit_char, modulo10};
use boleto_core::slip::{BankEncoder, FieldLayout, Slip};

/// Portfolios whose customer-number DV leaves agency and account out.
const PORTFOLIOS_WITHOUT_ACCOUNT: [&str; 5] = ["126", "131", "146", "150", "168"];

#[derive(Debug, Clone, Copy, Default)]
pub struct Itau;

impl Itau {
    fn customer_dv(slip: &Slip) -> Result<u32> {
        let portfolio = slip.portfolio()?;
        let customer = slip.customer_number()?;
        if PORTFOLIOS_WITHOUT_ACCOUNT.contains(&portfolio) {
            return modulo10(&format!("{portfolio}{customer}"));
        }
        modulo10(&format!(
            "{}{}{portfolio}{customer}",
            slip.agency_number()?,
            slip.account_number()?
        ))
    }
}

impl BankEncoder for Itau {
    fn bank_code(&self) -> &'static str {
        "341"
    }

    fn bank_name(&self) -> &'static str {
        "Itaú"
    }

    fn layout(&self) -> FieldLayout {
        FieldLayout {
            agency: Field::new("agency", 4),
            account: Field::new("account", 5),
            portfolio: Some(Field::new("portfolio", 3)),
            customer_number: Field::new("customer_number", 8),
            convenio: None,
        }
    }

    fn free_field(&self, slip: &Slip) -> Result<String> {
        let agency = slip.agency_number()?;
        let account = slip.account_number()?;
        let account_dv = modulo10(&format!("{agency}{account}"))?;
        Ok(format!(
            "{}{}{}{agency}{account}{}000",
            slip.portfolio()?,
            slip.customer_number()?,
            digit_char(Self::customer_dv(slip)?),
            digit_char(account_dv)
        ))
    }

    fn customer_number_dv(&self, slip: &Slip) -> Result<Option<String>> {
        Ok(Some(digit_char(Self::customer_dv(slip)?).to_string()))
    }

    fn formatted_customer_number(&self, slip: &Slip) -> Result<String> {
        Ok(format!(
            "{}/{}-{}",
            slip.portfolio()?,
            slip.customer_number()?,
            digit_char(Self::customer_dv(slip)?)
        ))
    }
}
