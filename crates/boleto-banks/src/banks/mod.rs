// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// One encoder per participating bank.

use std::sync::Arc;

use boleto_core::slip::BankEncoder;

pub mod banco_do_brasil;
pub mod banrisul;
pub mod bradesco;
pub mod caixa;
pub mod itau;
pub mod real;
pub mod santander;

pub use banco_do_brasil::{BancoDoBrasil, ConvenioLayout};
pub use banrisul::Banrisul;
pub use bradesco::Bradesco;
pub use caixa::Caixa;
pub use itau::Itau;
pub use real::Real;
pub use santander::Santander;

/// Produces a fresh encoder for one bank.
pub type EncoderFactory = fn() -> Arc<dyn BankEncoder>;

fn factory<E: BankEncoder + Default + 'static>() -> Arc<dyn BankEncoder> {
    Arc::new(E::default())
}

/// Every bank shipped with the crate, in registration order.
pub fn builtin_banks() -> [(&'static str, EncoderFactory); 7] {
    [
        ("001", factory::<BancoDoBrasil>),
        ("033", factory::<Santander>),
        ("041", factory::<Banrisul>),
        ("104", factory::<Caixa>),
        ("237", factory::<Bradesco>),
        ("341", factory::<Itau>),
        ("356", factory::<Real>),
    ]
}
