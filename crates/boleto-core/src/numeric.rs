// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Numeric primitives shared by every bank layout: zero padding and the two
// check-digit families (modulo 10 and modulo 11) used by FEBRABAN titles.

use crate::error::{EncodingError, Result};

/// Left-pad `value` with zeros to exactly `width` characters.
///
/// Fails with `FieldTooLong` when the value is already wider than `width`.
/// The value is not required to be numeric (Caixa's `SR` portfolio is not).
pub fn pad_left(field: &'static str, value: &str, width: usize) -> Result<String> {
    let len = value.chars().count();
    if len > width {
        return Err(EncodingError::FieldTooLong {
            field,
            width,
            value: value.to_owned(),
        });
    }
    let mut out = String::with_capacity(width);
    out.extend(std::iter::repeat_n('0', width - len));
    out.push_str(value);
    Ok(out)
}

/// Right-pad `value` with zeros to `width` characters, keeping it left-justified.
pub fn pad_right(field: &'static str, value: &str, width: usize) -> Result<String> {
    let len = value.chars().count();
    if len > width {
        return Err(EncodingError::FieldTooLong {
            field,
            width,
            value: value.to_owned(),
        });
    }
    let mut out = String::with_capacity(width);
    out.push_str(value);
    out.extend(std::iter::repeat_n('0', width - len));
    Ok(out)
}

/// Decimal digits of `value`, right-to-left.
fn digits_rev(value: &str) -> Result<Vec<u32>> {
    value
        .chars()
        .rev()
        .map(|c| {
            c.to_digit(10).ok_or_else(|| EncodingError::MalformedField {
                field: "digits",
                value: value.to_owned(),
            })
        })
        .collect()
}

/// Weighted sum used by the modulo-10 family: weights 2,1,2,1… from the
/// rightmost digit, two-digit products folded into the sum of their digits.
fn luhn_sum(value: &str) -> Result<u32> {
    let mut sum = 0;
    for (i, d) in digits_rev(value)?.into_iter().enumerate() {
        let product = if i % 2 == 0 { d * 2 } else { d };
        sum += product / 10 + product % 10;
    }
    Ok(sum)
}

/// Modulo-10 check digit (`0` when the sum is a multiple of ten, else `10 - r`).
pub fn modulo10(value: &str) -> Result<u32> {
    let r = luhn_sum(value)? % 10;
    Ok(if r == 0 { 0 } else { 10 - r })
}

/// Weighted sum used by the modulo-11 family: weights 2..=base from the
/// rightmost digit, wrapping back to 2 after `base`.
fn weighted_sum(value: &str, base: u32) -> Result<u32> {
    let mut factor = 2;
    let mut sum = 0;
    for d in digits_rev(value)? {
        sum += d * factor;
        factor = if factor == base { 2 } else { factor + 1 };
    }
    Ok(sum)
}

/// Modulo-11 check digit: `(sum * 10) mod 11`, with `10` mapped to `0`.
pub fn modulo11_dv(value: &str, base: u32) -> Result<u32> {
    let d = weighted_sum(value, base)? * 10 % 11;
    Ok(if d == 10 { 0 } else { d })
}

/// Raw modulo-11 residue (`sum mod 11`); banks apply their own exceptions.
pub fn modulo11_residue(value: &str, base: u32) -> Result<u32> {
    Ok(weighted_sum(value, base)? % 11)
}

/// Barcode general check digit (position 4): residue 0, 1 or 10 maps to `1`.
pub fn barcode_dv(value: &str) -> Result<u32> {
    let r = modulo11_residue(value, 9)?;
    Ok(match r {
        0 | 1 | 10 => 1,
        _ => 11 - r,
    })
}

/// Single ASCII digit for a value known to be below ten.
pub fn digit_char(d: u32) -> char {
    char::from_digit(d % 10, 10).unwrap_or('0')
}
