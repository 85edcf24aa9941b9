//! Property value coercion.
//!
//! Every value in a `.vents` block is plain text. The tokenizer narrows it to
//! the most specific primitive it looks like, testing shapes in a fixed order:
//! boolean, integer, float, float tuple, and finally plain text.

use std::fmt;

use serde::Serialize;

/// A typed property value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// Anything that matched no other shape: `classname info_player_terrorist`
    Text(String),

    /// `priority 0`
    Integer(i64),

    /// `angle 90.5`
    Float(f64),

    /// `enabled True`
    Boolean(bool),

    /// Two or more floats: `origin 1.0 2.0 3.0`
    FloatTuple(Vec<f64>),
}

impl PropertyValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            PropertyValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            PropertyValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropertyValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_tuple(&self) -> Option<&[f64]> {
        match self {
            PropertyValue::FloatTuple(values) => Some(values.as_slice()),
            _ => None,
        }
    }

    /// Loose truthiness: `True`, non-zero numbers, and non-empty text or tuples.
    pub fn is_truthy(&self) -> bool {
        match self {
            PropertyValue::Text(s) => !s.is_empty(),
            PropertyValue::Integer(n) => *n != 0,
            PropertyValue::Float(f) => *f != 0.0,
            PropertyValue::Boolean(b) => *b,
            PropertyValue::FloatTuple(values) => !values.is_empty(),
        }
    }

    /// Numeric equality with an integer, the way `0 == 0.0 == False` holds:
    /// floats compare by value and booleans count as 0 or 1.
    pub fn eq_int(&self, n: i64) -> bool {
        match self {
            PropertyValue::Integer(m) => *m == n,
            PropertyValue::Float(f) => *f == n as f64,
            PropertyValue::Boolean(b) => i64::from(*b) == n,
            PropertyValue::Text(_) | PropertyValue::FloatTuple(_) => false,
        }
    }

    /// Short name of the variant, for messages.
    pub fn kind(&self) -> &'static str {
        match self {
            PropertyValue::Text(_) => "text",
            PropertyValue::Integer(_) => "integer",
            PropertyValue::Float(_) => "float",
            PropertyValue::Boolean(_) => "boolean",
            PropertyValue::FloatTuple(_) => "float tuple",
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Text(s) => write!(f, "{}", s),
            PropertyValue::Integer(n) => write!(f, "{}", n),
            PropertyValue::Float(v) => write!(f, "{:?}", v),
            PropertyValue::Boolean(true) => write!(f, "True"),
            PropertyValue::Boolean(false) => write!(f, "False"),
            PropertyValue::FloatTuple(values) => {
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{:?}", v)?;
                }
                Ok(())
            }
        }
    }
}

/// Coerce raw value text into a [`PropertyValue`].
///
/// The input is trimmed first. Values that look numeric but do not fit the
/// target type are kept as text.
pub fn coerce_value(raw: &str) -> PropertyValue {
    let value = raw.trim();

    match value {
        "True" => return PropertyValue::Boolean(true),
        "False" => return PropertyValue::Boolean(false),
        _ => {}
    }

    if is_integer_token(value) {
        if let Ok(n) = value.parse::<i64>() {
            return PropertyValue::Integer(n);
        }
        return PropertyValue::Text(value.to_string());
    }

    if is_float_token(value) {
        if let Some(f) = parse_float(value) {
            return PropertyValue::Float(f);
        }
    }

    if let Some(values) = parse_float_tuple(value) {
        return PropertyValue::FloatTuple(values);
    }

    PropertyValue::Text(value.to_string())
}

/// `-?[0-9]+`
fn is_integer_token(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// `-?[0-9]*\.[0-9]+`
fn is_float_token(s: &str) -> bool {
    let unsigned = s.strip_prefix('-').unwrap_or(s);
    match unsigned.split_once('.') {
        Some((whole, frac)) => {
            whole.bytes().all(|b| b.is_ascii_digit())
                && !frac.is_empty()
                && frac.bytes().all(|b| b.is_ascii_digit())
        }
        None => false,
    }
}

fn parse_float(s: &str) -> Option<f64> {
    s.parse::<f64>().ok()
}

/// Two or more float tokens, each separated by exactly one whitespace character.
fn parse_float_tuple(s: &str) -> Option<Vec<f64>> {
    let mut values = Vec::new();

    for token in s.split(char::is_whitespace) {
        if !is_float_token(token) {
            return None;
        }
        values.push(parse_float(token)?);
    }

    if values.len() >= 2 {
        Some(values)
    } else {
        None
    }
}
