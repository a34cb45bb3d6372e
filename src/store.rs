//! Option store: live option entries plus the default baseline
//!
//! Entries are kept in insertion order because that order becomes the order of
//! the path segments. Overwriting an option keeps its first position.

use tracing::{debug, warn};

use crate::options::{wire_key, OptionSet, OptionValue};

#[derive(Debug, Clone, PartialEq, Eq)]
struct OptionEntry {
    /// Canonical option name, the store key
    name: String,
    /// Abbreviated key written to the URL
    key: String,
    /// Serialized argument list
    value: String,
}

impl OptionEntry {
    fn segment(&self) -> String {
        format!("{}:{}", self.key, self.value)
    }
}

/// Insertion-ordered option entries with a resettable default baseline
#[derive(Debug, Clone, Default)]
pub struct OptionStore {
    entries: Vec<OptionEntry>,
    defaults: OptionSet,
}

impl OptionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialize and store `value` under `name`; `Absent` removes the option.
    pub fn set(&mut self, name: &str, value: &OptionValue) {
        if value.is_absent() {
            self.remove(name);
            return;
        }
        if let Err(e) = value.validate(name) {
            warn!(option = %name, error = %e, "option value rejected");
            return;
        }

        let entry = OptionEntry {
            name: name.to_string(),
            key: wire_key(name).to_string(),
            value: value.to_wire(name),
        };
        debug!(option = %name, key = %entry.key, value = %entry.value, "option set");

        match self.entries.iter_mut().find(|e| e.name == name) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    /// Apply every entry of `options` in order
    pub fn apply(&mut self, options: &OptionSet) {
        for (name, value) in options.iter() {
            self.set(name, value);
        }
    }

    /// Last positional field of the stored value.
    ///
    /// This mirrors the proxy's "split on the last colon" read-back and is lossy
    /// for multi-field values: a stored `size:40:40:true:false` yields `false`.
    /// Use [`OptionStore::get_value`] for the complete argument list.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.get_value(name)
            .and_then(|value| value.rsplit(':').next())
    }

    /// Full serialized argument list of an option, without its key
    pub fn get_value(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name == name)
    }

    /// Remove an option by canonical name; returns whether it was present
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.name != name);
        let removed = self.entries.len() != before;
        if removed {
            debug!(option = %name, "option reset");
        }
        removed
    }

    /// `key:value` segments in insertion order
    pub fn segments(&self) -> impl Iterator<Item = String> + '_ {
        self.entries.iter().map(OptionEntry::segment)
    }

    /// Option names in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn defaults(&self) -> &OptionSet {
        &self.defaults
    }

    /// Replace the baseline and apply it on top of the live entries
    pub fn set_defaults(&mut self, defaults: OptionSet) {
        self.defaults = defaults;
        let defaults = self.defaults.clone();
        self.apply(&defaults);
    }

    /// Forget the baseline; live entries are untouched
    pub fn clear_defaults(&mut self) {
        self.defaults = OptionSet::new();
    }

    /// Drop every live entry and re-apply the baseline
    pub fn reset(&mut self) {
        self.entries.clear();
        let defaults = self.defaults.clone();
        self.apply(&defaults);
        debug!(restored = self.entries.len(), "options reset to defaults");
    }
}
