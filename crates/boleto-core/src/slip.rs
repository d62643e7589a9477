// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The base slip: common attributes, barcode assembly, due-date factor, and
// the typeable line.
//
// Bank-specific behaviour lives behind `BankEncoder`; a `Slip` owns the
// normalised field values and asks its encoder for the 25-digit free field.

use std::fmt::{self, Display};
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::debug;

use crate::config::{EncoderConfig, FactorPolicy};
use crate::digitable::line_from_barcode;
use crate::error::{EncodingError, Result};
use crate::field::{Field, without_dv};
use crate::numeric::{barcode_dv, digit_char, modulo11_dv};
use crate::types::{Amount, CURRENCY_BRL, SlipDetails, SlipParams};

/// Length of the FEBRABAN barcode.
pub const BARCODE_LEN: usize = 44;
/// Length of the bank-defined free field ("campo livre").
pub const FREE_FIELD_LEN: usize = 25;

/// Day zero of the due-date factor (factor 1000 falls on 2000-07-03).
pub const FACTOR_BASE_DATE: NaiveDate = match NaiveDate::from_ymd_opt(1997, 10, 7) {
    Some(date) => date,
    None => panic!("invalid due-date factor base"),
};

/// Four-digit due-date factor for `date`.
pub fn due_date_factor(date: NaiveDate, policy: FactorPolicy) -> Result<u32> {
    let days = (date - FACTOR_BASE_DATE).num_days();
    let out_of_range = || EncodingError::DueDateOutOfRange {
        date: date.to_string(),
        policy: policy.name(),
    };
    let factor = match (policy, days) {
        (_, d) if d < 0 => return Err(out_of_range()),
        (_, d) if d <= 9999 => d,
        (FactorPolicy::Legacy, _) => return Err(out_of_range()),
        (FactorPolicy::Rollover, d) => 1000 + (d - 10_000) % 9000,
    };
    u32::try_from(factor).map_err(|_| out_of_range())
}

/// Field widths a bank applies when a slip attribute is assigned.
///
/// `None` means the bank does not encode that attribute; values assigned to
/// it are kept verbatim for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldLayout {
    pub agency: Field,
    pub account: Field,
    pub portfolio: Option<Field>,
    pub customer_number: Field,
    pub convenio: Option<Field>,
}

/// What one bank contributes to a slip.
pub trait BankEncoder: fmt::Debug + Send + Sync {
    /// Three-digit FEBRABAN bank code.
    fn bank_code(&self) -> &'static str;

    fn bank_name(&self) -> &'static str;

    fn layout(&self) -> FieldLayout;

    /// Portfolio assigned when a slip is created, if the bank has one.
    fn default_portfolio(&self) -> Option<&'static str> {
        None
    }

    /// An encoder better suited to `params`, when the bank's layout depends on
    /// the slip's own values. `None` keeps this encoder.
    fn specialize(&self, _params: &SlipParams) -> Result<Option<Arc<dyn BankEncoder>>> {
        Ok(None)
    }

    /// The 25-digit free field written at barcode positions 19..44.
    fn free_field(&self, slip: &Slip) -> Result<String>;

    /// Check digit of the customer number, for banks that define one.
    fn customer_number_dv(&self, _slip: &Slip) -> Result<Option<String>> {
        Ok(None)
    }

    /// Customer number as printed on the slip.
    fn formatted_customer_number(&self, slip: &Slip) -> Result<String> {
        let number = slip.customer_number()?;
        Ok(match self.customer_number_dv(slip)? {
            Some(dv) => format!("{number}-{dv}"),
            None => number.to_owned(),
        })
    }
}

/// One payment instruction for a specific bank.
#[derive(Debug, Clone)]
pub struct Slip {
    encoder: Arc<dyn BankEncoder>,
    config: EncoderConfig,
    due_date: Option<NaiveDate>,
    document_amount: Option<Amount>,
    agency: Option<String>,
    account: Option<String>,
    portfolio: Option<String>,
    customer_number: Option<String>,
    convenio: Option<String>,
    /// Attributes carried for rendering only.
    pub details: SlipDetails,
}

impl Slip {
    /// An empty slip for `encoder`, with the bank's default portfolio.
    pub fn with_config(encoder: Arc<dyn BankEncoder>, config: EncoderConfig) -> Self {
        let portfolio = encoder.default_portfolio().map(str::to_owned);
        Self {
            encoder,
            config,
            due_date: None,
            document_amount: None,
            agency: None,
            account: None,
            portfolio,
            customer_number: None,
            convenio: None,
            details: SlipDetails::default(),
        }
    }

    /// Build a slip from keyword parameters, normalising each field.
    pub fn new(
        encoder: Arc<dyn BankEncoder>,
        params: SlipParams,
        config: EncoderConfig,
    ) -> Result<Self> {
        params.details.validate(&config)?;
        let encoder = encoder.specialize(&params)?.unwrap_or(encoder);
        let mut slip = Self::with_config(encoder, config);
        if let Some(date) = params.due_date {
            slip.set_due_date(date);
        }
        if let Some(amount) = params.document_amount {
            slip.set_document_amount(amount);
        }
        if let Some(convenio) = params.convenio {
            slip.set_convenio(convenio)?;
        }
        if let Some(agency) = params.agency {
            slip.set_agency(agency)?;
        }
        if let Some(account) = params.account {
            slip.set_account(account)?;
        }
        if let Some(portfolio) = params.portfolio {
            slip.set_portfolio(portfolio)?;
        }
        if let Some(customer_number) = params.customer_number {
            slip.set_customer_number(customer_number)?;
        }
        slip.details = params.details;
        Ok(slip)
    }

    // -- Setters --

    pub fn set_due_date(&mut self, date: NaiveDate) {
        self.due_date = Some(date);
    }

    pub fn set_document_amount(&mut self, amount: Amount) {
        self.document_amount = Some(amount);
    }

    pub fn set_agency(&mut self, value: impl Display) -> Result<()> {
        self.agency = Some(self.encoder.layout().agency.normalize(value)?);
        Ok(())
    }

    pub fn set_account(&mut self, value: impl Display) -> Result<()> {
        self.account = Some(self.encoder.layout().account.normalize(value)?);
        Ok(())
    }

    pub fn set_portfolio(&mut self, value: impl Display) -> Result<()> {
        self.portfolio = Some(normalize_optional(self.encoder.layout().portfolio, value)?);
        Ok(())
    }

    pub fn set_customer_number(&mut self, value: impl Display) -> Result<()> {
        self.customer_number = Some(self.encoder.layout().customer_number.normalize(value)?);
        Ok(())
    }

    pub fn set_convenio(&mut self, value: impl Display) -> Result<()> {
        self.convenio = Some(normalize_optional(self.encoder.layout().convenio, value)?);
        Ok(())
    }

    // -- Accessors --

    pub fn encoder(&self) -> &dyn BankEncoder {
        self.encoder.as_ref()
    }

    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    pub fn bank_code(&self) -> &'static str {
        self.encoder.bank_code()
    }

    pub fn currency_code(&self) -> char {
        CURRENCY_BRL
    }

    pub fn due_date(&self) -> Result<NaiveDate> {
        self.due_date.ok_or(EncodingError::MissingField("due_date"))
    }

    pub fn document_amount(&self) -> Result<Amount> {
        self.document_amount
            .ok_or(EncodingError::MissingField("document_amount"))
    }

    /// Agency as stored, possibly with its `-DV` suffix.
    pub fn agency(&self) -> Result<&str> {
        required("agency", &self.agency)
    }

    pub fn account(&self) -> Result<&str> {
        required("account", &self.account)
    }

    pub fn portfolio(&self) -> Result<&str> {
        required("portfolio", &self.portfolio)
    }

    pub fn customer_number(&self) -> Result<&str> {
        required("customer_number", &self.customer_number)
    }

    pub fn convenio(&self) -> Result<&str> {
        required("convenio", &self.convenio)
    }

    /// Agency digits without the check digit.
    pub fn agency_number(&self) -> Result<&str> {
        self.agency().map(without_dv)
    }

    /// Account digits without the check digit.
    pub fn account_number(&self) -> Result<&str> {
        self.account().map(without_dv)
    }

    // -- Derived values --

    pub fn due_date_factor(&self) -> Result<u32> {
        due_date_factor(self.due_date()?, self.config.factor_policy)
    }

    /// Bank code followed by its modulo-11 check digit, e.g. `001-9`.
    pub fn bank_code_with_dv(&self) -> Result<String> {
        let code = self.bank_code();
        Ok(format!("{code}-{}", modulo11_dv(code, 9)?))
    }

    /// `agency/account` as printed in the beneficiary box.
    pub fn agency_account_display(&self) -> Result<String> {
        Ok(format!("{}/{}", self.agency()?, self.account()?))
    }

    pub fn customer_number_dv(&self) -> Result<Option<String>> {
        self.encoder.customer_number_dv(self)
    }

    pub fn formatted_customer_number(&self) -> Result<String> {
        self.encoder.formatted_customer_number(self)
    }

    pub fn free_field(&self) -> Result<String> {
        self.encoder.free_field(self)
    }

    /// The 44-digit FEBRABAN barcode. Recomputed on every call.
    pub fn barcode(&self) -> Result<String> {
        let bank = self.bank_code();
        let factor = self.due_date_factor()?;
        let amount = self.document_amount()?.format(10)?;
        let free = self.free_field()?;

        let body = format!("{bank}{}{factor:04}{amount}{free}", self.currency_code());
        if body.len() != BARCODE_LEN - 1 {
            return Err(EncodingError::BarcodeLength(body.len() + 1));
        }
        if !body.bytes().all(|b| b.is_ascii_digit()) {
            return Err(EncodingError::InvalidBarcode(format!(
                "non-digit characters in {body}"
            )));
        }

        let mut barcode = body;
        barcode.insert(4, digit_char(barcode_dv(&barcode)?));
        debug!(bank, factor, barcode = %barcode, "barcode assembled");
        Ok(barcode)
    }

    /// The 47-digit typeable line derived from the barcode.
    pub fn line_digitable(&self) -> Result<String> {
        line_from_barcode(&self.barcode()?)
    }
}

fn required<'a>(field: &'static str, value: &'a Option<String>) -> Result<&'a str> {
    value
        .as_deref()
        .ok_or(EncodingError::MissingField(field))
}

fn normalize_optional(field: Option<Field>, value: impl Display) -> Result<String> {
    match field {
        Some(field) => field.normalize(value),
        None => Ok(value.to_string().trim().to_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::pad_left;

    /// Minimal bank used to exercise the shared assembly path.
    #[derive(Debug)]
    struct TestBank;

    impl BankEncoder for TestBank {
        fn bank_code(&self) -> &'static str {
            "999"
        }

        fn bank_name(&self) -> &'static str {
            "Test"
        }

        fn layout(&self) -> FieldLayout {
            FieldLayout {
                agency: Field::new("agency", 4),
                account: Field::new("account", 8),
                portfolio: Some(Field::new("portfolio", 2)),
                customer_number: Field::new("customer_number", 11),
                convenio: None,
            }
        }

        fn default_portfolio(&self) -> Option<&'static str> {
            Some("18")
        }

        fn free_field(&self, slip: &Slip) -> Result<String> {
            pad_left(
                "free_field",
                &format!(
                    "{}{}{}",
                    slip.customer_number()?,
                    slip.agency_number()?,
                    slip.account_number()?
                ),
                FREE_FIELD_LEN,
            )
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn test_slip() -> Slip {
        let mut slip = Slip::with_config(Arc::new(TestBank), EncoderConfig::default());
        slip.set_due_date(date(2011, 3, 8));
        slip.set_document_amount("100.00".parse().unwrap());
        slip.set_agency("1234-5").unwrap();
        slip.set_account("987654").unwrap();
        slip.set_customer_number("42").unwrap();
        slip
    }

    #[test]
    fn factor_matches_historical_anchor() {
        assert_eq!(
            due_date_factor(date(2000, 7, 3), FactorPolicy::Legacy).unwrap(),
            1000
        );
        assert_eq!(
            due_date_factor(date(2000, 7, 4), FactorPolicy::Rollover).unwrap(),
            1001
        );
        assert_eq!(
            due_date_factor(date(2011, 3, 8), FactorPolicy::Rollover).unwrap(),
            4900
        );
    }

    #[test]
    fn factor_rollover() {
        let last = date(2025, 2, 21);
        let first = date(2025, 2, 22);
        assert_eq!(due_date_factor(last, FactorPolicy::Legacy).unwrap(), 9999);
        assert_eq!(due_date_factor(last, FactorPolicy::Rollover).unwrap(), 9999);
        assert_eq!(due_date_factor(first, FactorPolicy::Rollover).unwrap(), 1000);
        assert_eq!(
            due_date_factor(date(2049, 10, 13), FactorPolicy::Rollover).unwrap(),
            9999
        );
        assert_eq!(
            due_date_factor(date(2049, 10, 14), FactorPolicy::Rollover).unwrap(),
            1000
        );
        assert!(matches!(
            due_date_factor(first, FactorPolicy::Legacy),
            Err(EncodingError::DueDateOutOfRange { .. })
        ));
    }

    #[test]
    fn factor_base_is_day_zero() {
        assert_eq!(FACTOR_BASE_DATE, date(1997, 10, 7));
        assert_eq!(
            due_date_factor(FACTOR_BASE_DATE, FactorPolicy::Legacy).unwrap(),
            0
        );
    }

    #[test]
    fn factor_before_base_is_rejected() {
        assert!(due_date_factor(date(1997, 10, 6), FactorPolicy::Rollover).is_err());
    }

    #[test]
    fn barcode_layout() {
        let slip = test_slip();
        let barcode = slip.barcode().unwrap();
        assert_eq!(barcode.len(), BARCODE_LEN);
        assert!(barcode.bytes().all(|b| b.is_ascii_digit()));
        assert_eq!(&barcode[0..3], "999");
        assert_eq!(&barcode[3..4], "9");
        assert_eq!(&barcode[5..9], "4900");
        assert_eq!(&barcode[9..19], "0000010000");
        assert_eq!(&barcode[19..], slip.free_field().unwrap());

        let without_dv = format!("{}{}", &barcode[..4], &barcode[5..]);
        let dv = barcode_dv(&without_dv).unwrap();
        assert_eq!(barcode.as_bytes()[4], digit_char(dv) as u8);
    }

    #[test]
    fn default_portfolio_and_accessors() {
        let slip = test_slip();
        assert_eq!(slip.portfolio().unwrap(), "18");
        assert_eq!(slip.agency().unwrap(), "1234-5");
        assert_eq!(slip.agency_number().unwrap(), "1234");
        assert_eq!(slip.account().unwrap(), "00987654");
        assert_eq!(slip.agency_account_display().unwrap(), "1234-5/00987654");
        assert_eq!(slip.formatted_customer_number().unwrap(), "00000000042");
        assert_eq!(slip.bank_code_with_dv().unwrap(), "999-7");
    }

    #[test]
    fn missing_fields_are_reported() {
        let mut slip = test_slip();
        slip.customer_number = None;
        assert_eq!(
            slip.barcode(),
            Err(EncodingError::MissingField("customer_number"))
        );

        let empty = Slip::with_config(Arc::new(TestBank), EncoderConfig::default());
        assert_eq!(empty.barcode(), Err(EncodingError::MissingField("due_date")));
    }

    #[test]
    fn setters_normalise_and_reject() {
        let mut slip = test_slip();
        assert!(matches!(
            slip.set_account("123456789"),
            Err(EncodingError::FieldTooLong { field: "account", .. })
        ));
        slip.set_portfolio(6).unwrap();
        assert_eq!(slip.portfolio().unwrap(), "06");
    }

    #[test]
    fn setters_name_the_field_with_non_digits() {
        let mut slip = test_slip();
        assert_eq!(
            slip.set_agency("27a0"),
            Err(EncodingError::MalformedField {
                field: "agency",
                value: "27a0".into(),
            })
        );
        assert_eq!(slip.agency().unwrap(), "1234-5");
        assert!(matches!(
            slip.set_customer_number("4 2"),
            Err(EncodingError::MalformedField {
                field: "customer_number",
                ..
            })
        ));
    }

    #[test]
    fn new_applies_params() {
        let params = SlipParams {
            due_date: Some(date(2011, 3, 8)),
            document_amount: Some("100.00".parse().unwrap()),
            agency: Some("1234-5".into()),
            account: Some("987654".into()),
            customer_number: Some("42".into()),
            ..SlipParams::default()
        };
        let slip = Slip::new(Arc::new(TestBank), params, EncoderConfig::default()).unwrap();
        assert_eq!(slip.barcode().unwrap(), test_slip().barcode().unwrap());
    }

    #[test]
    fn new_rejects_too_many_instruction_lines() {
        let mut params = SlipParams::default();
        params.details.instructions = vec![String::new(); 8];
        let err = Slip::new(Arc::new(TestBank), params, EncoderConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            EncodingError::TooManyLines {
                field: "instructions",
                ..
            }
        ));
    }
}
