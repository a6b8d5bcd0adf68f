mod decode;

use decode::normalize;

use crate::{decoder_configuration::active_configuration, error::Error, DecoderConfiguration};
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::{
    collections::{btree_map, BTreeMap},
    fmt::{self, Display},
    iter::FromIterator,
};

/// JSON type of a header value, reported when a value can't be turned into
/// header strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    String,
    Number,
    Boolean,
    Null,
    Array,
    Object,
}

impl ValueKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::String(_) => ValueKind::String,
            Value::Number(_) => ValueKind::Number,
            Value::Bool(_) => ValueKind::Boolean,
            Value::Null => ValueKind::Null,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
        }
    }
}

impl Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::String => "string",
            ValueKind::Number => "number",
            ValueKind::Boolean => "boolean",
            ValueKind::Null => "null",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
        };

        write!(f, "{}", name)
    }
}

/// Header name to the ordered list of its values.
///
/// On input every value may be a string, a number or an array of those; on
/// output it is always an array of strings. Names are kept exactly as they
/// were received.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Headers(BTreeMap<String, Vec<String>>);

impl Headers {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Decode a JSON object of header values using the strict configuration.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, Error> {
        Self::from_slice_with(bytes, &DecoderConfiguration::default())
    }

    pub fn from_slice_with(bytes: &[u8], config: &DecoderConfiguration) -> Result<Self, Error> {
        let raw: Map<String, Value> = serde_json::from_slice(bytes)?;
        normalize(&raw, config)
    }

    pub fn from_value(value: &Value) -> Result<Self, Error> {
        Self::from_value_with(value, &DecoderConfiguration::default())
    }

    pub fn from_value_with(value: &Value, config: &DecoderConfiguration) -> Result<Self, Error> {
        match value {
            Value::Object(raw) => normalize(raw, config),
            other => Err(Error::MalformedInput(de::Error::invalid_type(
                decode::unexpected(other),
                &"a JSON object of header values",
            ))),
        }
    }

    pub fn from_map(raw: &Map<String, Value>) -> Result<Self, Error> {
        Self::from_map_with(raw, &DecoderConfiguration::default())
    }

    pub fn from_map_with(
        raw: &Map<String, Value>,
        config: &DecoderConfiguration,
    ) -> Result<Self, Error> {
        normalize(raw, config)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.0.get(name).map(Vec::as_slice)
    }

    pub fn get_first(&self, name: &str) -> Option<&str> {
        self.get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Looks a header up ignoring ASCII case, returning the first matching name.
    pub fn get_ignore_case(&self, name: &str) -> Option<&[String]> {
        self.0
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, values)| values.as_slice())
    }

    /// Adds a value after any values the header already has.
    pub fn append<S1: Into<String>, S2: Into<String>>(&mut self, name: S1, value: S2) {
        self.0.entry(name.into()).or_default().push(value.into());
    }

    pub fn insert<S: Into<String>>(&mut self, name: S, values: Vec<String>) -> Option<Vec<String>> {
        self.0.insert(name.into(), values)
    }

    pub fn remove(&mut self, name: &str) -> Option<Vec<String>> {
        self.0.remove(name)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Vec<String>> {
        self.0.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl<'de> Deserialize<'de> for Headers {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Map::<String, Value>::deserialize(deserializer)?;
        normalize(&raw, &active_configuration()).map_err(de::Error::custom)
    }
}

impl<'a> IntoIterator for &'a Headers {
    type Item = (&'a String, &'a Vec<String>);
    type IntoIter = btree_map::Iter<'a, String, Vec<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Headers {
    type Item = (String, Vec<String>);
    type IntoIter = btree_map::IntoIter<String, Vec<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Headers {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = Headers::new();
        for (name, value) in iter {
            headers.append(name, value);
        }

        headers
    }
}

impl From<BTreeMap<String, Vec<String>>> for Headers {
    fn from(map: BTreeMap<String, Vec<String>>) -> Self {
        Self(map)
    }
}

impl From<Headers> for BTreeMap<String, Vec<String>> {
    fn from(headers: Headers) -> Self {
        headers.0
    }
}
