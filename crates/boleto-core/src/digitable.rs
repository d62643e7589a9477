// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Conversions between the 44-digit barcode and the 47-digit typeable line
// ("linha digitável"), with check-digit verification in both directions.
//
// Line layout:
//   AAAAA.AAAAA BBBBB.BBBBBB CCCCC.CCCCCC D EEEEEEEEEEEEEE
// where A = barcode[0..4] + barcode[19..24] + dv10, B = barcode[24..34] + dv10,
// C = barcode[34..44] + dv10, D = barcode[4], E = barcode[5..19].

use crate::error::{EncodingError, Result};
use crate::numeric::{barcode_dv, digit_char, modulo10};
use crate::slip::BARCODE_LEN;

/// Number of digits in a typeable line, separators excluded.
pub const LINE_DIGITS: usize = 47;

/// Check that `barcode` is 44 digits with a valid position-4 check digit.
pub fn verify_barcode(barcode: &str) -> Result<()> {
    if barcode.len() != BARCODE_LEN {
        return Err(EncodingError::BarcodeLength(barcode.len()));
    }
    if !barcode.bytes().all(|b| b.is_ascii_digit()) {
        return Err(EncodingError::InvalidBarcode(format!(
            "non-digit characters in {barcode}"
        )));
    }
    let expected = barcode_dv(&format!("{}{}", &barcode[..4], &barcode[5..]))?;
    let actual = u32::from(barcode.as_bytes()[4] - b'0');
    if expected != actual {
        return Err(EncodingError::CheckDigitMismatch {
            what: "barcode",
            expected,
            actual,
        });
    }
    Ok(())
}

/// Append the modulo-10 digit to `field` and split it as `first5.rest`.
fn checked_group(field: &str) -> Result<String> {
    let with_dv = format!("{field}{}", digit_char(modulo10(field)?));
    Ok(format!("{}.{}", &with_dv[..5], &with_dv[5..]))
}

/// Reshape a verified barcode into its typeable line.
pub fn line_from_barcode(barcode: &str) -> Result<String> {
    verify_barcode(barcode)?;
    let first = checked_group(&format!("{}{}", &barcode[0..4], &barcode[19..24]))?;
    let second = checked_group(&barcode[24..34])?;
    let third = checked_group(&barcode[34..44])?;
    Ok(format!(
        "{first} {second} {third} {} {}",
        &barcode[4..5],
        &barcode[5..19]
    ))
}

/// Rebuild the barcode from a typeable line, verifying every check digit.
///
/// Dots, spaces and other separators are ignored.
pub fn barcode_from_line(line: &str) -> Result<String> {
    let digits: String = line
        .chars()
        .filter(|c| !matches!(c, '.' | ' ' | '-' | '\t'))
        .collect();
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(EncodingError::InvalidLine(format!(
            "non-digit characters in {line:?}"
        )));
    }
    if digits.len() != LINE_DIGITS {
        return Err(EncodingError::InvalidLine(format!(
            "expected {LINE_DIGITS} digits, got {}",
            digits.len()
        )));
    }

    let groups = [
        ("field 1", &digits[0..9], &digits[9..10]),
        ("field 2", &digits[10..20], &digits[20..21]),
        ("field 3", &digits[21..31], &digits[31..32]),
    ];
    for (what, body, dv) in groups {
        let expected = modulo10(body)?;
        let actual = u32::from(dv.as_bytes()[0] - b'0');
        if expected != actual {
            return Err(EncodingError::CheckDigitMismatch {
                what,
                expected,
                actual,
            });
        }
    }

    let barcode = format!(
        "{}{}{}{}{}{}",
        &digits[0..4],
        &digits[32..33],
        &digits[33..47],
        &digits[4..9],
        &digits[10..20],
        &digits[21..31]
    );
    verify_barcode(&barcode)?;
    Ok(barcode)
}
