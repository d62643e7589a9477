// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Slip requests read from JSON files, and their encoded output.

use std::fs;
use std::path::Path;

use boleto_banks::Registry;
use boleto_core::{EncoderConfig, SlipParams};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::CliError;

/// One slip to encode: the bank plus its keyword parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct SlipRequest {
    pub bank_code: String,
    #[serde(flatten)]
    pub params: SlipParams,
}

/// A request file holds either a single request or a list of them.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RequestFile {
    One(SlipRequest),
    Many(Vec<SlipRequest>),
}

/// What the binary prints for each request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Encoded {
    pub bank: String,
    pub barcode: String,
    pub line_digitable: String,
    pub customer_number: String,
}

pub fn parse_requests(json: &str) -> Result<Vec<SlipRequest>, CliError> {
    Ok(match serde_json::from_str(json)? {
        RequestFile::One(request) => vec![request],
        RequestFile::Many(requests) => requests,
    })
}

pub fn load_requests(path: &Path) -> Result<Vec<SlipRequest>, CliError> {
    let requests = parse_requests(&fs::read_to_string(path)?)?;
    info!(path = %path.display(), count = requests.len(), "loaded slip requests");
    Ok(requests)
}

/// Load the encoder configuration, or the defaults when no file is given.
pub fn load_config(path: Option<&Path>) -> Result<EncoderConfig, CliError> {
    match path {
        Some(path) => {
            debug!(path = %path.display(), "loading encoder configuration");
            Ok(EncoderConfig::from_json(&fs::read_to_string(path)?)?)
        }
        None => Ok(EncoderConfig::default()),
    }
}

pub fn encode(
    registry: &Registry,
    request: SlipRequest,
    config: &EncoderConfig,
) -> Result<Encoded, CliError> {
    let slip = registry
        .slip_for(&request.bank_code, request.params, config.clone())?
        .ok_or(CliError::UnknownBank(request.bank_code))?;
    Ok(Encoded {
        bank: slip.bank_code_with_dv()?,
        barcode: slip.barcode()?,
        line_digitable: slip.line_digitable()?,
        customer_number: slip.formatted_customer_number()?,
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use boleto_core::{EncodingError, FactorPolicy};

    use super::*;

    const ITAU: &str = r#"{
        "bank_code": "341",
        "due_date": "2011-03-09",
        "document_amount": "2952.95",
        "agency": "1565",
        "account": "13877-4",
        "portfolio": "175",
        "customer_number": "12345678",
        "details": { "payer_lines": ["Fulano de Tal", "Rua X, 1"] }
    }"#;

    #[test]
    fn single_request_is_encoded() {
        let requests = parse_requests(ITAU).unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].params.details.payer_lines.len(), 2);

        let registry = Registry::with_builtin_banks();
        let encoded = encode(
            &registry,
            requests.into_iter().next().unwrap(),
            &EncoderConfig::default(),
        )
        .unwrap();
        assert_eq!(
            encoded,
            Encoded {
                bank: "341-7".into(),
                barcode: "34193490100002952951751234567861565138771000".into(),
                line_digitable: "34191.75124 34567.861561 51387.710000 3 49010000295295"
                    .into(),
                customer_number: "175/12345678-6".into(),
            }
        );
    }

    #[test]
    fn request_list_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{ITAU}, {{"bank_code": "041", "due_date": "2000-07-04",
                "document_amount": "550.00", "agency": "1102",
                "account": "900015", "customer_number": "22832563"}}]"#
        )
        .unwrap();

        let requests = load_requests(file.path()).unwrap();
        let codes: Vec<&str> = requests.iter().map(|r| r.bank_code.as_str()).collect();
        assert_eq!(codes, ["341", "041"]);

        let registry = Registry::with_builtin_banks();
        let banrisul = encode(&registry, requests[1].clone(), &EncoderConfig::default()).unwrap();
        assert_eq!(
            banrisul.barcode,
            "04198100100000550002111029000150228325634059"
        );
    }

    #[test]
    fn banco_do_brasil_layout_follows_request() {
        let request = parse_requests(
            r#"{"bank_code": "001", "due_date": "2011-03-08",
                "document_amount": "2952.95", "agency": "9999",
                "account": "99999", "convenio": "123456", "nn_format": 2,
                "customer_number": "1"}"#,
        )
        .unwrap()
        .remove(0);
        assert_eq!(request.params.nn_format, 2);

        let encoded = encode(
            &Registry::with_builtin_banks(),
            request,
            &EncoderConfig::default(),
        )
        .unwrap();
        assert_eq!(&encoded.barcode[19..], "1234560000000000000000121");
        assert_eq!(encoded.customer_number, "12345600000000000000001");
    }

    #[test]
    fn unknown_bank_is_reported() {
        let request = SlipRequest {
            bank_code: "999".into(),
            params: SlipParams::default(),
        };
        let err = encode(
            &Registry::with_builtin_banks(),
            request,
            &EncoderConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, CliError::UnknownBank(code) if code == "999"));
    }

    #[test]
    fn missing_field_is_reported() {
        let request = parse_requests(r#"{"bank_code": "237", "agency": "278-0"}"#)
            .unwrap()
            .remove(0);
        let err = encode(
            &Registry::with_builtin_banks(),
            request,
            &EncoderConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CliError::Encoding(EncodingError::MissingField(_))
        ));
    }

    #[test]
    fn config_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("boleto.json");
        fs::write(&path, r#"{"factor_policy": "legacy", "max_payer_lines": 2}"#).unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.factor_policy, FactorPolicy::Legacy);
        assert_eq!(config.max_payer_lines, 2);
        assert_eq!(load_config(None).unwrap(), EncoderConfig::default());
    }

    #[test]
    fn malformed_json_is_reported() {
        assert!(matches!(parse_requests("{"), Err(CliError::Json(_))));
    }
}
