use crate::{
    decoder_configuration::with_configuration, error::Error, headers::Headers,
    DecoderConfiguration,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{error::Category, value::RawValue, Map, Value};
use std::{io::Read, str::FromStr};
use tracing::debug;

const HEADER_POINTERS: [&str; 2] = ["/request/headers", "/real/headers"];

/// A Dredd transaction as exchanged with hook scripts.
///
/// See <http://dredd.readthedocs.io/en/latest/data-structures/#transaction>.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_path: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub request: Option<Request>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<Expected>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub real: Option<Real>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<Box<RawValue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test: Option<Box<RawValue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<Box<RawValue>>,

    #[serde(default)]
    pub skip: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fail: Option<Value>,

    /// Hook checkpoints visited for this transaction, in order.
    #[serde(
        rename = "hooks_modifications",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub test_order: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Headers::is_empty")]
    pub headers: Headers,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expected {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Header expectations, kept as loose JSON.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<Map<String, Value>>,
    #[serde(rename = "bodySchema", skip_serializing_if = "Option::is_none")]
    pub schema: Option<Box<RawValue>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Real {
    pub body: String,
    pub headers: Headers,
    /// Taken as recorded; not checked against the HTTP status range.
    pub status_code: i64,
}

impl Transaction {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, Error> {
        decode_document(bytes)
    }

    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, Error> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Self::from_slice(&bytes)
    }

    /// Decodes with non-default header options.
    pub fn from_slice_with(bytes: &[u8], config: &DecoderConfiguration) -> Result<Self, Error> {
        decode_document_with(bytes, config)
    }

    pub fn to_vec(&self) -> Result<Vec<u8>, Error> {
        serde_json::to_vec(self).map_err(Error::EncodeError)
    }

    pub fn to_json(&self) -> Result<String, Error> {
        serde_json::to_string(self).map_err(Error::EncodeError)
    }

    pub fn to_json_pretty(&self) -> Result<String, Error> {
        serde_json::to_string_pretty(self).map_err(Error::EncodeError)
    }

    /// Records a hook checkpoint under `hooks_modifications`.
    pub fn add_test_order_point<S: Into<String>>(&mut self, value: S) {
        self.test_order.push(value.into());
    }
}

impl FromStr for Transaction {
    type Err = Error;

    fn from_str(json: &str) -> Result<Self, Self::Err> {
        Self::from_slice(json.as_bytes())
    }
}

/// Decodes a JSON array of transactions, as sent for `beforeAll`/`afterAll`.
pub fn transactions_from_slice(bytes: &[u8]) -> Result<Vec<Transaction>, Error> {
    decode_document(bytes)
}

pub fn transactions_from_slice_with(
    bytes: &[u8],
    config: &DecoderConfiguration,
) -> Result<Vec<Transaction>, Error> {
    decode_document_with(bytes, config)
}

fn decode_document<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, Error> {
    decode_document_with(bytes, &DecoderConfiguration::default())
}

fn decode_document_with<T: DeserializeOwned>(
    bytes: &[u8],
    config: &DecoderConfiguration,
) -> Result<T, Error> {
    with_configuration(config, || serde_json::from_slice::<T>(bytes))
        .map_err(|e| classify(bytes, e, config))
}

// serde only carries header failures as text; rerun the header pass to get the
// typed error back
fn classify(bytes: &[u8], error: serde_json::Error, config: &DecoderConfiguration) -> Error {
    if error.classify() != Category::Data {
        return Error::MalformedInput(error);
    }

    let document: Value = match serde_json::from_slice(bytes) {
        Ok(document) => document,
        Err(_) => return Error::MalformedInput(error),
    };

    let transactions: Vec<&Value> = match &document {
        Value::Array(items) => items.iter().collect(),
        single => vec![single],
    };

    for transaction in transactions {
        for pointer in HEADER_POINTERS.iter() {
            if let Some(Value::Object(raw)) = transaction.pointer(pointer) {
                if let Err(header_error) = Headers::from_map_with(raw, config) {
                    return header_error;
                }
            }
        }
    }

    debug!(error = %error, "transaction document doesn't match the transaction shape");
    Error::MalformedInput(error)
}
