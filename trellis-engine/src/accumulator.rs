//! The result record threaded through dispatch
//!
//! Every node of the tree gets its own accumulator. A terminal's
//! accumulator carries the aligned token and its lexical renderings; a
//! nonterminal's starts as the merge of its children's and may then be
//! refined by the nonterminal's handler.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use trellis_core::Gender;

/// Field holding the query type
pub const QTYPE: &str = "qtype";

/// Field holding the query key
pub const QKEY: &str = "qkey";

/// Renderings of the span an accumulator covers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Derived {
    /// Surface text
    pub text: String,
    /// Canonical (lemma) form
    pub canonical: String,
    /// Nominative-case rendering
    pub nominative: String,
    /// Indefinite rendering
    pub indefinite: String,
    /// Gender guess for personal names
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
}

impl Derived {
    /// Append a following span, separated by a single space
    fn extend(&mut self, next: &Derived) {
        append(&mut self.text, &next.text);
        append(&mut self.canonical, &next.canonical);
        append(&mut self.nominative, &next.nominative);
        append(&mut self.indefinite, &next.indefinite);
        if self.gender.is_none() {
            self.gender = next.gender;
        }
    }
}

fn append(target: &mut String, next: &str) {
    if next.is_empty() {
        return;
    }
    if !target.is_empty() {
        target.push(' ');
    }
    target.push_str(next);
}

/// Mutable key-value record for one node of the tree
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Accumulator {
    fields: BTreeMap<String, Value>,
    derived: Derived,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl Accumulator {
    /// Create an empty accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an accumulator for a span with the given renderings
    pub fn with_derived(derived: Derived) -> Self {
        Self {
            derived,
            ..Self::default()
        }
    }

    /// A fresh accumulator carrying only an error
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::default()
        }
    }

    /// Read a field
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Read a string field
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    /// Read an integer field
    pub fn get_i64(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_i64)
    }

    /// Whether a field is set
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Set a field, replacing any previous value
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Remove a field
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.fields.remove(name)
    }

    /// All fields in name order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The query type, if a handler set one
    pub fn qtype(&self) -> Option<&str> {
        self.get_str(QTYPE)
    }

    /// Set the query type
    pub fn set_qtype(&mut self, qtype: impl Into<String>) {
        self.set(QTYPE, qtype.into());
    }

    /// The query key
    pub fn qkey(&self) -> Option<&Value> {
        self.get(QKEY)
    }

    /// Set the query key
    pub fn set_qkey(&mut self, qkey: impl Into<Value>) {
        self.set(QKEY, qkey);
    }

    /// Whether a query type was determined
    pub fn is_understood(&self) -> bool {
        self.qtype().is_some()
    }

    /// Renderings of the covered span
    pub fn derived(&self) -> &Derived {
        &self.derived
    }

    /// Surface text of the covered span
    pub fn text(&self) -> &str {
        &self.derived.text
    }

    /// Canonical form of the covered span
    pub fn canonical(&self) -> &str {
        &self.derived.canonical
    }

    /// Nominative rendering of the covered span
    pub fn nominative(&self) -> &str {
        &self.derived.nominative
    }

    /// Indefinite rendering of the covered span
    pub fn indefinite(&self) -> &str {
        &self.derived.indefinite
    }

    /// Gender guess for a personal name in the span
    pub fn gender(&self) -> Option<Gender> {
        self.derived.gender
    }

    /// Recorded error
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Fold in the accumulator of the next child to the right
    ///
    /// Same-named fields are overwritten; renderings are appended.
    pub fn merge(&mut self, child: &Accumulator) {
        for (name, value) in &child.fields {
            self.fields.insert(name.clone(), value.clone());
        }
        self.derived.extend(&child.derived);
        if child.error.is_some() {
            self.error.clone_from(&child.error);
        }
    }

    /// Merge children left to right into a fresh accumulator
    pub fn merged<'a>(children: impl IntoIterator<Item = &'a Accumulator>) -> Self {
        let mut acc = Self::new();
        for child in children {
            acc.merge(child);
        }
        acc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn span(text: &str) -> Accumulator {
        Accumulator::with_derived(Derived {
            text: text.to_string(),
            canonical: text.to_lowercase(),
            nominative: text.to_string(),
            indefinite: text.to_string(),
            gender: None,
        })
    }

    #[test]
    fn test_fields() {
        let mut acc = Accumulator::new();
        assert!(!acc.is_understood());
        acc.set_qtype("ArrivalTime");
        acc.set_qkey(5);
        acc.set("bus_name", "fimman");

        assert_eq!(acc.qtype(), Some("ArrivalTime"));
        assert_eq!(acc.qkey(), Some(&json!(5)));
        assert_eq!(acc.get_str("bus_name"), Some("fimman"));
        assert_eq!(acc.get_i64(QKEY), Some(5));
        assert!(acc.contains("bus_name"));
        assert_eq!(acc.remove("bus_name"), Some(json!("fimman")));
        assert!(!acc.contains("bus_name"));
    }

    #[test]
    fn test_merge_last_write_wins() {
        let mut left = span("Hvenær");
        left.set("x", 1);
        left.set("only_left", true);
        let mut right = span("kemur");
        right.set("x", 2);

        let merged = Accumulator::merged([&left, &right]);
        assert_eq!(merged.get_i64("x"), Some(2));
        assert_eq!(merged.get("only_left"), Some(&json!(true)));
        assert_eq!(merged.text(), "Hvenær kemur");
        assert_eq!(merged.canonical(), "hvenær kemur");
    }

    #[test]
    fn test_merge_skips_empty_text() {
        let merged = Accumulator::merged([&span("á"), &span(""), &span("morgun")]);
        assert_eq!(merged.text(), "á morgun");
    }

    #[test]
    fn test_merge_keeps_first_gender() {
        let mut first = span("Ingibjörg");
        first.derived.gender = Some(Gender::Feminine);
        let mut second = span("Jón");
        second.derived.gender = Some(Gender::Masculine);

        let merged = Accumulator::merged([&span("og"), &first, &second]);
        assert_eq!(merged.gender(), Some(Gender::Feminine));
    }

    #[test]
    fn test_failed() {
        let acc = Accumulator::failed("E_EXCEPTION: boom");
        assert_eq!(acc.error(), Some("E_EXCEPTION: boom"));
        assert_eq!(acc.fields().count(), 0);
        assert_eq!(acc.text(), "");
    }

    #[test]
    fn test_serialize() {
        let mut acc = span("ásinn");
        acc.set_qtype("ArrivalTime");
        let value = serde_json::to_value(&acc).unwrap();
        assert_eq!(value["fields"]["qtype"], json!("ArrivalTime"));
        assert_eq!(value["derived"]["text"], json!("ásinn"));
        assert!(value.get("error").is_none());
    }
}
