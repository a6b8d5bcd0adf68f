use super::{Headers, ValueKind};
use crate::{error::Error, DecoderConfiguration};
use serde::de::Unexpected;
use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;
use tracing::{debug, trace, warn};

/// Turns a raw JSON object into [`Headers`].
///
/// Strings and numbers become single-element lists, arrays of strings and
/// numbers keep their order. Anything else is a contract violation and fails
/// with [`Error::UnsupportedHeaderValueShape`].
pub(crate) fn normalize(
    raw: &Map<String, Value>,
    config: &DecoderConfiguration,
) -> Result<Headers, Error> {
    debug!(headers = raw.len(), "normalizing header values");
    let mut headers = BTreeMap::new();

    for (name, value) in raw {
        let values = match value {
            Value::Array(elements) => {
                check_value_count(name, elements.len(), config)?;
                elements
                    .iter()
                    .map(|element| scalar_to_string(name, element, config))
                    .collect::<Result<Vec<_>, _>>()?
            }
            scalar => {
                check_value_count(name, 1, config)?;
                vec![scalar_to_string(name, scalar, config)?]
            }
        };

        trace!(header = %name, values = values.len(), "normalized header");
        headers.insert(name.clone(), values);
    }

    Ok(Headers(headers))
}

fn scalar_to_string(
    name: &str,
    value: &Value,
    config: &DecoderConfiguration,
) -> Result<String, Error> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(number_to_string(n)),
        Value::Bool(b) if config.accept_boolean_values() => Ok(b.to_string()),
        other => {
            let kind = ValueKind::of(other);
            warn!(header = %name, %kind, "unsupported header value shape");

            Err(Error::UnsupportedHeaderValueShape {
                name: name.into(),
                kind,
            })
        }
    }
}

fn check_value_count(
    name: &str,
    count: usize,
    config: &DecoderConfiguration,
) -> Result<(), Error> {
    match config.max_values_per_header() {
        Some(limit) if count > limit => {
            warn!(header = %name, count, limit, "too many header values");

            Err(Error::TooManyHeaderValues {
                name: name.into(),
                count,
                limit,
            })
        }
        _ => Ok(()),
    }
}

// floats go through f64's Display so 1.0 renders as "1"
fn number_to_string(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() => f.to_string(),
        _ => n.to_string(),
    }
}

pub(crate) fn unexpected(value: &Value) -> Unexpected<'_> {
    match value {
        Value::Null => Unexpected::Unit,
        Value::Bool(b) => Unexpected::Bool(*b),
        Value::Number(n) => match (n.as_u64(), n.as_i64(), n.as_f64()) {
            (Some(u), _, _) => Unexpected::Unsigned(u),
            (_, Some(i), _) => Unexpected::Signed(i),
            (_, _, Some(f)) => Unexpected::Float(f),
            _ => Unexpected::Other("number"),
        },
        Value::String(s) => Unexpected::Str(s),
        Value::Array(_) => Unexpected::Seq,
        Value::Object(_) => Unexpected::Map,
    }
}
