//! Declarative form validation.
//!
//! A [`RuleSet`] is an ordered list of [`FieldRule`]s, each a field name plus
//! `(predicate, message)` checks. Every value is trimmed before it is checked.
//! All checks run independently and every failure is collected, in rule order,
//! so a form re-render can show the complete list at once.

pub mod rules;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub use rules::parse_date;

/// Raw form submission as received from the client (field name → text)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormInput(BTreeMap<String, String>);

impl FormInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.0.insert(field.into(), value.into());
    }

    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(field, value);
        self
    }
}

/// One failed check on one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
    /// The trimmed value that failed
    pub value: String,
}

pub type Predicate = fn(&str) -> bool;

#[derive(Clone)]
struct Check {
    predicate: Predicate,
    message: &'static str,
}

/// Checks for a single named field
#[derive(Clone)]
pub struct FieldRule {
    field: &'static str,
    optional: bool,
    checks: Vec<Check>,
}

impl FieldRule {
    pub fn new(field: &'static str) -> Self {
        Self {
            field,
            optional: false,
            checks: Vec::new(),
        }
    }

    /// Skip all checks when the value is absent or empty after trimming
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn check(mut self, predicate: Predicate, message: &'static str) -> Self {
        self.checks.push(Check { predicate, message });
        self
    }
}

/// Ordered rules for one form
#[derive(Clone)]
pub struct RuleSet {
    rules: Vec<FieldRule>,
}

impl RuleSet {
    pub fn new(rules: Vec<FieldRule>) -> Self {
        Self { rules }
    }

    /// Trim every ruled field and run its checks.
    ///
    /// Returns the trimmed values when nothing fails, otherwise every failure
    /// in rule order.
    pub fn apply(&self, input: &FormInput) -> Result<CleanForm, Vec<FieldError>> {
        let mut values = BTreeMap::new();
        let mut errors = Vec::new();

        for rule in &self.rules {
            let value = input.get(rule.field).unwrap_or_default().trim().to_string();

            if !(rule.optional && value.is_empty()) {
                for check in &rule.checks {
                    if !(check.predicate)(&value) {
                        errors.push(FieldError {
                            field: rule.field.to_string(),
                            message: check.message.to_string(),
                            value: value.clone(),
                        });
                    }
                }
            }

            values.insert(rule.field, value);
        }

        if errors.is_empty() {
            Ok(CleanForm(values))
        } else {
            Err(errors)
        }
    }
}

/// Trimmed values of a form that passed its rule set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanForm(BTreeMap<&'static str, String>);

impl CleanForm {
    /// Trimmed value, empty when the field was not submitted
    pub fn value(&self, field: &str) -> &str {
        self.0.get(field).map(String::as_str).unwrap_or_default()
    }

    /// Trimmed value, `None` when absent or empty
    pub fn optional(&self, field: &str) -> Option<&str> {
        Some(self.value(field)).filter(|v| !v.is_empty())
    }
}

/// Outcome of validating a form into a draft
#[derive(Debug, Clone, PartialEq)]
pub enum Validated<T> {
    Valid(T),
    Invalid(Vec<FieldError>),
}

/// A draft payload that can be built from a validated form
pub trait DraftForm: Sized {
    fn rules() -> &'static RuleSet;

    /// Build the draft from values that already passed [`DraftForm::rules`]
    fn from_clean(form: &CleanForm) -> Self;

    fn validate(input: &FormInput) -> Validated<Self> {
        match Self::rules().apply(input) {
            Ok(clean) => Validated::Valid(Self::from_clean(&clean)),
            Err(errors) => Validated::Invalid(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn not_empty(v: &str) -> bool {
        !v.is_empty()
    }

    fn short(v: &str) -> bool {
        v.len() <= 3
    }

    #[test]
    fn trims_values_before_checking() {
        let rules = RuleSet::new(vec![FieldRule::new("code").check(short, "too long")]);
        let input = FormInput::new().with("code", "  abc  ");

        let clean = rules.apply(&input).expect("trimmed value passes");
        assert_eq!(clean.value("code"), "abc");
    }

    #[test]
    fn collects_every_failure_in_rule_order() {
        let rules = RuleSet::new(vec![
            FieldRule::new("a").check(not_empty, "a required").check(short, "a too long"),
            FieldRule::new("b").check(not_empty, "b required"),
        ]);
        let input = FormInput::new().with("a", "");

        let errors = rules.apply(&input).unwrap_err();
        let messages: Vec<_> = errors.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["a required", "b required"]);
        assert_eq!(errors[0].field, "a");
        assert_eq!(errors[1].field, "b");
    }

    #[test]
    fn optional_fields_skip_checks_when_blank() {
        let rules = RuleSet::new(vec![FieldRule::new("note").optional().check(short, "too long")]);

        let blank = FormInput::new().with("note", "   ");
        let clean = rules.apply(&blank).expect("blank optional passes");
        assert_eq!(clean.optional("note"), None);

        let long = FormInput::new().with("note", "longer");
        assert_eq!(rules.apply(&long).unwrap_err().len(), 1);
    }
}
