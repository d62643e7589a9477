// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Encoder configuration.

use serde::{Deserialize, Serialize};

use crate::error::{EncodingError, Result};

/// How the four-digit due-date factor is derived once it passes 9999.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorPolicy {
    /// Plain day count since 1997-10-07; dates past 2025-02-21 are rejected.
    Legacy,
    /// FEBRABAN rollover: after 9999 the factor restarts at 1000.
    #[default]
    Rollover,
}

impl FactorPolicy {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Legacy => "legacy",
            Self::Rollover => "rollover",
        }
    }
}

/// Settings shared by every slip built through the encoder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    /// Due-date factor rule.
    pub factor_policy: FactorPolicy,
    /// Maximum payer ("sacado") lines carried for rendering.
    pub max_payer_lines: usize,
    /// Maximum instruction lines carried for rendering.
    pub max_instruction_lines: usize,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            factor_policy: FactorPolicy::Rollover,
            max_payer_lines: 3,
            max_instruction_lines: 7,
        }
    }
}

impl EncoderConfig {
    /// Parse a configuration from JSON; absent keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| EncodingError::InvalidConfig(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = EncoderConfig::default();
        assert_eq!(config.factor_policy, FactorPolicy::Rollover);
        assert_eq!(config.max_payer_lines, 3);
        assert_eq!(config.max_instruction_lines, 7);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = EncoderConfig::from_json(r#"{"factor_policy":"legacy"}"#).unwrap();
        assert_eq!(config.factor_policy, FactorPolicy::Legacy);
        assert_eq!(config.max_payer_lines, 3);
    }

    #[test]
    fn bad_json_is_an_error() {
        assert!(EncoderConfig::from_json(r#"{"factor_policy":"sometimes"}"#).is_err());
    }
}
