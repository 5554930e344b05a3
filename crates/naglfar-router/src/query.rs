//! Query string decoding with type coercion
//!
//! Parses the `key=value&key2=value2` fragment of a location into typed
//! values. Numbers and `true`/`false` literals are coerced, comma separated
//! values become lists. Malformed input never fails: anything that cannot be
//! decoded is kept as the raw text.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;

/// Decoded query parameters, ordered by key
pub type Query = BTreeMap<String, QueryValue>;

/// A single coerced query value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QueryValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<QueryValue>),
}

impl QueryValue {
    /// Returns the string value, if this is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            QueryValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer value, if this is an integer
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            QueryValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the boolean value, if this is a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            QueryValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the list items, if this is a list
    pub fn as_list(&self) -> Option<&[QueryValue]> {
        match self {
            QueryValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Appends another value for the same key, turning this value into a list
    fn accumulate(self, next: QueryValue) -> QueryValue {
        let mut items = match self {
            QueryValue::List(items) => items,
            single => vec![single],
        };
        match next {
            QueryValue::List(more) => items.extend(more),
            single => items.push(single),
        }
        QueryValue::List(items)
    }
}

impl From<&str> for QueryValue {
    fn from(s: &str) -> Self {
        QueryValue::Str(s.to_string())
    }
}

impl From<i64> for QueryValue {
    fn from(n: i64) -> Self {
        QueryValue::Int(n)
    }
}

impl From<bool> for QueryValue {
    fn from(b: bool) -> Self {
        QueryValue::Bool(b)
    }
}

/// Parses a query fragment (the text after `?`) into typed values
///
/// A leading `?` is tolerated. Repeated keys accumulate into a list.
///
/// # Examples
///
/// ```
/// use naglfar_router::query::{parse_query, QueryValue};
///
/// let query = parse_query("a=1&b=true&c=x,y,z");
/// assert_eq!(query["a"], QueryValue::Int(1));
/// assert_eq!(query["b"], QueryValue::Bool(true));
/// assert_eq!(
///     query["c"],
///     QueryValue::List(vec!["x".into(), "y".into(), "z".into()])
/// );
///
/// assert!(parse_query("").is_empty());
/// ```
pub fn parse_query(fragment: &str) -> Query {
    let fragment = fragment.strip_prefix('?').unwrap_or(fragment);

    fragment
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_component(key).into_owned(), parse_value(value))
        })
        .fold(Query::new(), |mut query, (key, value)| {
            let merged = match query.remove(&key) {
                Some(existing) => existing.accumulate(value),
                None => value,
            };
            query.insert(key, merged);
            query
        })
}

/// Splits on commas before decoding so an encoded `%2C` stays part of the value
fn parse_value(raw: &str) -> QueryValue {
    if raw.contains(',') {
        QueryValue::List(
            raw.split(',')
                .map(|part| coerce(&decode_component(part)))
                .collect(),
        )
    } else {
        coerce(&decode_component(raw))
    }
}

fn decode_component(raw: &str) -> Cow<'_, str> {
    if !raw.contains(['%', '+']) {
        return Cow::Borrowed(raw);
    }

    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => Cow::Owned(decoded.into_owned()),
        Err(_) => Cow::Owned(spaced),
    }
}

fn coerce(value: &str) -> QueryValue {
    if let Some(number) = parse_number(value) {
        return number;
    }

    match value {
        "true" => QueryValue::Bool(true),
        "false" => QueryValue::Bool(false),
        _ => QueryValue::Str(value.to_string()),
    }
}

fn parse_number(value: &str) -> Option<QueryValue> {
    let trimmed = value.trim();
    let numeric_chars = trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'));

    if trimmed.is_empty() || !numeric_chars {
        return None;
    }

    if let Ok(n) = trimmed.parse::<i64>() {
        return Some(QueryValue::Int(n));
    }

    trimmed
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .map(QueryValue::Float)
}
