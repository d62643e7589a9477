// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bank registry: three-digit bank code -> encoder factory.
//
// The process-wide registry is populated with the built-in banks the first
// time it is touched and is read-only after that, apart from explicit
// `register` calls which replace existing entries (last wins).

use std::collections::BTreeMap;
use std::sync::{LazyLock, PoisonError, RwLock};

use boleto_core::config::EncoderConfig;
use boleto_core::error::{EncodingError, Result};
use boleto_core::slip::Slip;
use boleto_core::types::SlipParams;
use tracing::{debug, warn};

use crate::banks::{EncoderFactory, builtin_banks};

/// A set of bank encoders keyed by bank code.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: BTreeMap<String, EncoderFactory>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every bank shipped with the crate.
    pub fn with_builtin_banks() -> Self {
        let mut registry = Self::new();
        for (code, factory) in builtin_banks() {
            registry.insert(code, factory);
        }
        debug!(banks = registry.entries.len(), "bank registry populated");
        registry
    }

    /// Register `factory` under `bank_code`, replacing any earlier entry.
    ///
    /// The encoder the factory builds must report the same bank code.
    pub fn register(&mut self, bank_code: &str, factory: EncoderFactory) -> Result<()> {
        if bank_code.len() != 3 || !bank_code.bytes().all(|b| b.is_ascii_digit()) {
            return Err(EncodingError::MalformedField {
                field: "bank_code",
                value: bank_code.to_owned(),
            });
        }
        let encoder = factory().bank_code();
        if encoder != bank_code {
            warn!(bank = bank_code, encoder, "registration refused: bank code mismatch");
            return Err(EncodingError::BankCodeMismatch {
                registered: bank_code.to_owned(),
                encoder,
            });
        }
        self.insert(bank_code, factory);
        Ok(())
    }

    fn insert(&mut self, bank_code: &str, factory: EncoderFactory) {
        if self.entries.insert(bank_code.to_owned(), factory).is_some() {
            warn!(bank = bank_code, "bank encoder replaced by later registration");
        }
    }

    pub fn lookup(&self, bank_code: &str) -> Option<EncoderFactory> {
        self.entries.get(bank_code).copied()
    }

    /// Registered bank codes in ascending order.
    pub fn bank_codes(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build a slip for `bank_code`; `Ok(None)` when the bank is unknown.
    pub fn slip_for(
        &self,
        bank_code: &str,
        params: SlipParams,
        config: EncoderConfig,
    ) -> Result<Option<Slip>> {
        self.lookup(bank_code)
            .map(|factory| Slip::new(factory(), params, config))
            .transpose()
    }
}

static GLOBAL: LazyLock<RwLock<Registry>> =
    LazyLock::new(|| RwLock::new(Registry::with_builtin_banks()));

/// Register a bank encoder in the process-wide registry.
pub fn register(bank_code: &str, factory: EncoderFactory) -> Result<()> {
    GLOBAL
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .register(bank_code, factory)
}

/// Look up a bank encoder in the process-wide registry.
pub fn lookup(bank_code: &str) -> Option<EncoderFactory> {
    GLOBAL
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .lookup(bank_code)
}

/// Snapshot of the process-wide registry.
pub fn global() -> Registry {
    GLOBAL
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Build a slip through the process-wide registry.
pub fn slip_for(
    bank_code: &str,
    params: SlipParams,
    config: EncoderConfig,
) -> Result<Option<Slip>> {
    lookup(bank_code)
        .map(|factory| Slip::new(factory(), params, config))
        .transpose()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use boleto_core::slip::BankEncoder;

    use super::*;
    use crate::banks::Itau;

    /// Itaú with a different display name, to observe replacement.
    #[derive(Debug)]
    struct PatchedItau;

    impl BankEncoder for PatchedItau {
        fn bank_code(&self) -> &'static str {
            "341"
        }

        fn bank_name(&self) -> &'static str {
            "Itaú (patched)"
        }

        fn layout(&self) -> boleto_core::FieldLayout {
            Itau.layout()
        }

        fn free_field(&self, slip: &Slip) -> Result<String> {
            Itau.free_field(slip)
        }
    }

    #[test]
    fn empty_registry_has_no_banks() {
        let registry = Registry::new();
        assert!(registry.is_empty());
        assert!(registry.lookup("999").is_none());
        assert!(
            registry
                .slip_for("999", SlipParams::default(), EncoderConfig::default())
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn builtin_banks_are_registered_under_their_code() {
        let registry = Registry::with_builtin_banks();
        assert_eq!(registry.len(), 7);
        let codes: Vec<&str> = registry.bank_codes().collect();
        assert_eq!(codes, ["001", "033", "041", "104", "237", "341", "356"]);
        for code in codes {
            let factory = registry.lookup(code).expect("registered");
            assert_eq!(factory().bank_code(), code);
        }
    }

    #[test]
    fn later_registration_wins() {
        let mut registry = Registry::with_builtin_banks();
        registry
            .register("341", || Arc::new(PatchedItau))
            .unwrap();
        let factory = registry.lookup("341").expect("registered");
        assert_eq!(factory().bank_name(), "Itaú (patched)");
        assert_eq!(registry.len(), 7);
    }

    #[test]
    fn malformed_bank_codes_are_rejected() {
        let mut registry = Registry::new();
        for bad in ["34", "3411", "abc", ""] {
            assert!(registry.register(bad, || Arc::new(Itau)).is_err());
        }
        assert!(registry.is_empty());
    }

    #[test]
    fn encoder_must_match_its_bank_code() {
        let mut registry = Registry::with_builtin_banks();
        assert_eq!(
            registry.register("237", || Arc::new(Itau)),
            Err(EncodingError::BankCodeMismatch {
                registered: "237".into(),
                encoder: "341",
            })
        );
        let factory = registry.lookup("237").expect("registered");
        assert_eq!(factory().bank_code(), "237");
    }

    #[test]
    fn global_registry_is_populated_on_first_use() {
        assert!(lookup("237").is_some());
        assert!(lookup("999").is_none());
        assert!(global().len() >= 7);
    }
}
