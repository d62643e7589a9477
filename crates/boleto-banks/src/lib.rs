// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Boleto banks — per-bank free-field layouts and the registry that maps a
// three-digit bank code to its encoder.

pub mod banks;
pub mod registry;

pub use banks::{
    BancoDoBrasil, Banrisul, Bradesco, Caixa, ConvenioLayout, EncoderFactory, Itau, Real,
    Santander,
};
pub use registry::{Registry, global, lookup, register, slip_for};
