//! Lenient numeric access to loosely-typed input records.
//!
//! Input arrives as JSON-shaped bags from a form or a project file. Every
//! numeric read goes through [`Fields`], which never fails: a missing or
//! unparsable value reads as `0.0`. The one exception is the waste percentage,
//! which keeps "absent" and "explicitly zero" apart via [`Fields::opt_number`].

#[cfg(test)]
#[path = "fields_test.rs"]
mod fields_test;

use serde_json::Value;

/// Parse a raw numeric value, returning `None` when it is absent or unusable.
///
/// Accepts JSON numbers and numeric strings. Strings may carry surrounding
/// whitespace and use a comma as decimal separator. Non-finite results are
/// rejected.
#[must_use]
pub fn parse_number(raw: Option<&Value>) -> Option<f64> {
    let v = match raw? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            match trimmed.replace(',', ".").parse::<f64>() {
                Ok(v) => v,
                Err(_) => return None,
            }
        }
        _ => return None,
    };
    v.is_finite().then_some(v)
}

/// Typed access to numeric fields in a JSON object.
pub struct Fields<'a> {
    value: &'a Value,
}

impl<'a> Fields<'a> {
    /// Wrap a reference to a JSON value for lenient access.
    #[must_use]
    pub fn new(value: &'a Value) -> Self {
        Self { value }
    }

    /// Numeric field, `0.0` when missing or unparsable.
    #[must_use]
    pub fn number(&self, key: &str) -> f64 {
        self.opt_number(key).unwrap_or(0.0)
    }

    /// Numeric field, `None` when missing or unparsable.
    #[must_use]
    pub fn opt_number(&self, key: &str) -> Option<f64> {
        parse_number(self.value.get(key))
    }

    /// Non-negative integer field, `None` when missing, negative or fractional.
    #[must_use]
    pub fn index(&self, key: &str) -> Option<usize> {
        let n = self.opt_number(key)?;
        if n < 0.0 || n.fract() != 0.0 {
            return None;
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Some(n as usize)
    }

    /// String field, `None` when missing or not a string.
    #[must_use]
    pub fn text(&self, key: &str) -> Option<&'a str> {
        self.value.get(key).and_then(Value::as_str)
    }

    /// Nested object under `key`, as another field bag.
    #[must_use]
    pub fn nested(&self, key: &str) -> Option<Fields<'a>> {
        self.value.get(key).filter(|v| v.is_object()).map(Fields::new)
    }

    /// Elements of the array under `key`; empty when absent.
    #[must_use]
    pub fn list(&self, key: &str) -> Vec<Fields<'a>> {
        self.value
            .get(key)
            .and_then(Value::as_array)
            .map(|items| items.iter().map(Fields::new).collect())
            .unwrap_or_default()
    }
}
