//! Ordered option collections used for initial and default options

use serde_json::Value;

use super::OptionValue;
use crate::error::BuilderError;

/// An ordered list of `(option name, value)` pairs.
///
/// Order is preserved when the set is applied, so it decides the order of the
/// path segments in the built URL.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionSet {
    entries: Vec<(String, OptionValue)>,
}

impl OptionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an option (builder style)
    pub fn with(mut self, name: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.push(name, value);
        self
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<OptionValue>) {
        self.entries.push((name.into(), value.into()));
    }

    /// Decode a JSON object of options, keeping key order.
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` when `value` is not an object or an entry does
    /// not fit its option's shape.
    pub fn from_json(value: &Value) -> Result<Self, BuilderError> {
        let map = value.as_object().ok_or_else(|| {
            BuilderError::invalid_config(format!("options must be an object, got {}", value))
        })?;

        let mut set = Self::new();
        for (name, raw) in map {
            set.push(name.clone(), OptionValue::from_json(name, raw)?);
        }
        Ok(set)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TryFrom<&Value> for OptionSet {
    type Error = BuilderError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        Self::from_json(value)
    }
}

impl<N: Into<String>, V: Into<OptionValue>> FromIterator<(N, V)> for OptionSet {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (name, value) in iter {
            set.push(name, value);
        }
        set
    }
}
