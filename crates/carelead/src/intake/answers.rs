use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single accumulated answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Flag(bool),
    Text(String),
    Multi(Vec<String>),
}

/// Answers collected by a wizard, keyed by the backend field name.
///
/// Values are only ever inserted or overwritten; nothing is cleared until the
/// owning wizard is reset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Answers {
    values: BTreeMap<String, AnswerValue>,
}

impl Answers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> Option<&AnswerValue> {
        self.values.get(field)
    }

    pub fn text(&self, field: &str) -> Option<&str> {
        match self.values.get(field) {
            Some(AnswerValue::Text(value)) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn flag(&self, field: &str) -> bool {
        matches!(self.values.get(field), Some(AnswerValue::Flag(true)))
    }

    pub fn selections(&self, field: &str) -> &[String] {
        match self.values.get(field) {
            Some(AnswerValue::Multi(values)) => values,
            _ => &[],
        }
    }

    pub fn set_text(&mut self, field: &str, value: impl Into<String>) {
        self.values
            .insert(field.to_string(), AnswerValue::Text(value.into()));
    }

    pub fn set_flag(&mut self, field: &str, value: bool) {
        self.values.insert(field.to_string(), AnswerValue::Flag(value));
    }

    /// Adds `value` to the selection set for `field`, or removes it when it is already there.
    /// Returns whether the value is selected afterwards.
    pub fn toggle(&mut self, field: &str, value: &str) -> bool {
        let entry = self
            .values
            .entry(field.to_string())
            .or_insert_with(|| AnswerValue::Multi(Vec::new()));

        if !matches!(entry, AnswerValue::Multi(_)) {
            *entry = AnswerValue::Multi(Vec::new());
        }

        match entry {
            AnswerValue::Multi(selected) => match selected.iter().position(|item| item == value) {
                Some(index) => {
                    selected.remove(index);
                    false
                }
                None => {
                    selected.push(value.to_string());
                    true
                }
            },
            _ => false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AnswerValue)> {
        self.values.iter().map(|(key, value)| (key.as_str(), value))
    }
}
