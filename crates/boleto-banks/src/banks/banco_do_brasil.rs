// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// 001 — Banco do Brasil.
//
// The free field depends on the length of the beneficiary's agreement number
// ("convênio") and, for 6-digit agreements, on the customer-number format.
// The registered encoder resolves that layout from each slip's parameters.

use std::sync::Arc;

use boleto_core::error::{EncodingError, Result};
use boleto_core::field::Field;
use boleto_core::numeric::{digit_char, modulo11_dv};
use boleto_core::slip::{BankEncoder, FieldLayout, Slip};
use boleto_core::types::SlipParams;
use tracing::debug;

/// Convênio length and customer-number format pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConvenioLayout {
    /// 4-digit convênio, 7-digit customer number.
    Four,
    /// 6-digit convênio, 5-digit customer number, agency and account encoded.
    SixShort,
    /// 6-digit convênio, 17-digit customer number, service code `21`.
    SixLong,
    /// 7-digit convênio, 10-digit customer number.
    #[default]
    Seven,
    /// 8-digit convênio, 9-digit customer number.
    Eight,
}

impl ConvenioLayout {
    /// Pick the layout from the convênio length; `format` only matters for 6.
    pub fn from_length(len: usize, format: u8) -> Option<Self> {
        match (len, format) {
            (4, _) => Some(Self::Four),
            (6, 1) => Some(Self::SixShort),
            (6, 2) => Some(Self::SixLong),
            (7, _) => Some(Self::Seven),
            (8, _) => Some(Self::Eight),
            _ => None,
        }
    }

    /// Layout for `convenio`, or `UnsupportedLayout` when none matches.
    pub fn resolve(convenio: &str, format: u8) -> Result<Self> {
        Self::from_length(convenio.chars().count(), format).ok_or_else(|| {
            EncodingError::UnsupportedLayout(format!(
                "Banco do Brasil convenio {convenio:?} with customer-number format {format}"
            ))
        })
    }

    fn convenio_width(&self) -> usize {
        match self {
            Self::Four => 4,
            Self::SixShort | Self::SixLong => 6,
            Self::Seven => 7,
            Self::Eight => 8,
        }
    }

    fn customer_number_width(&self) -> usize {
        match self {
            Self::Four => 7,
            Self::SixShort => 5,
            Self::SixLong => 17,
            Self::Seven => 10,
            Self::Eight => 9,
        }
    }

    /// Layouts whose customer number is short enough to carry a check digit.
    fn has_customer_dv(&self) -> bool {
        matches!(self, Self::Four | Self::SixShort)
    }
}

/// Banco do Brasil encoder. With no fixed layout, `Slip::new` picks one from
/// the convênio length and `nn_format`; otherwise the 7-digit layout applies.
#[derive(Debug, Clone, Copy, Default)]
pub struct BancoDoBrasil {
    pub convenio_layout: Option<ConvenioLayout>,
}

impl BancoDoBrasil {
    /// An encoder pinned to `convenio_layout`.
    pub fn new(convenio_layout: ConvenioLayout) -> Self {
        Self {
            convenio_layout: Some(convenio_layout),
        }
    }

    fn resolved_layout(&self) -> ConvenioLayout {
        self.convenio_layout.unwrap_or_default()
    }

    /// Convênio followed by the customer number, as encoded in the barcode.
    fn full_customer_number(&self, slip: &Slip) -> Result<String> {
        Ok(format!("{}{}", slip.convenio()?, slip.customer_number()?))
    }
}

impl BankEncoder for BancoDoBrasil {
    fn bank_code(&self) -> &'static str {
        "001"
    }

    fn bank_name(&self) -> &'static str {
        "Banco do Brasil"
    }

    fn layout(&self) -> FieldLayout {
        let convenio_layout = self.resolved_layout();
        FieldLayout {
            agency: Field::new("agency", 4),
            account: Field::new("account", 8),
            portfolio: Some(Field::new("portfolio", 2)),
            customer_number: Field::new(
                "customer_number",
                convenio_layout.customer_number_width(),
            ),
            convenio: Some(Field::new("convenio", convenio_layout.convenio_width())),
        }
    }

    fn default_portfolio(&self) -> Option<&'static str> {
        Some("18")
    }

    fn specialize(&self, params: &SlipParams) -> Result<Option<Arc<dyn BankEncoder>>> {
        if self.convenio_layout.is_some() {
            return Ok(None);
        }
        let Some(convenio) = params.convenio.as_deref().map(str::trim) else {
            return Ok(None);
        };
        let layout = ConvenioLayout::resolve(convenio, params.nn_format)?;
        debug!(?layout, nn_format = params.nn_format, "convenio layout resolved");
        Ok(Some(Arc::new(Self::new(layout))))
    }

    fn free_field(&self, slip: &Slip) -> Result<String> {
        let number = self.full_customer_number(slip)?;
        Ok(match self.resolved_layout() {
            ConvenioLayout::Seven | ConvenioLayout::Eight => {
                format!("000000{number}{}", slip.portfolio()?)
            }
            ConvenioLayout::Four | ConvenioLayout::SixShort => format!(
                "{number}{}{}{}",
                slip.agency_number()?,
                slip.account_number()?,
                slip.portfolio()?
            ),
            ConvenioLayout::SixLong => format!("{number}21"),
        })
    }

    fn customer_number_dv(&self, slip: &Slip) -> Result<Option<String>> {
        if !self.resolved_layout().has_customer_dv() {
            return Ok(None);
        }
        let dv = modulo11_dv(&self.full_customer_number(slip)?, 9)?;
        Ok(Some(digit_char(dv).to_string()))
    }

    fn formatted_customer_number(&self, slip: &Slip) -> Result<String> {
        let number = self.full_customer_number(slip)?;
        Ok(match self.customer_number_dv(slip)? {
            Some(dv) => format!("{number}-{dv}"),
            None => number,
        })
    }
}
