// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Errors surfaced by the command-line encoder.

use boleto_core::EncodingError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed JSON input: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Encoding(#[from] EncodingError),

    #[error("no encoder registered for bank {0}")]
    UnknownBank(String),
}
