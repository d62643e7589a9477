// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// boleto — encode slip requests from a JSON file into barcodes and typeable
// lines.
//
// Entry point. Initialises logging, loads configuration and requests, and
// prints one result per request.

mod error;
mod request;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use error::CliError;
use request::{Encoded, encode, load_config, load_requests};

#[derive(Parser, Debug)]
#[command(name = "boleto", version, about = "Encode Brazilian bank slips (boletos)")]
struct Cli {
    /// Encoder configuration (JSON); defaults apply when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print results as a JSON array
    #[arg(long)]
    json: bool,

    /// Request file: one slip request or an array of them (JSON)
    request: PathBuf,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "encoding failed");
            eprintln!("boleto: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let config = load_config(cli.config.as_deref())?;
    let registry = boleto_banks::registry::global();

    let encoded = load_requests(&cli.request)?
        .into_iter()
        .map(|request| encode(&registry, request, &config))
        .collect::<Result<Vec<Encoded>, _>>()?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&encoded)?);
    } else {
        for slip in &encoded {
            println!("{}  {}", slip.bank, slip.barcode);
            println!("       {}", slip.line_digitable);
        }
    }
    Ok(())
}
