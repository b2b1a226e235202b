use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use super::record::{Field, FieldValue, FormRecord};

/// A field value that violates one of its schema rules.
///
/// Displays as the rule's message, which is what the form shows inline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub field: Field,
    pub message: String,
}

// WHATWG "valid e-mail address" grammar, as browsers apply it to email inputs.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("valid hardcoded regex")
});

/// Returns `true` if `s` is a syntactically valid email address.
pub fn is_valid_email(s: &str) -> bool {
    EMAIL_RE.is_match(s)
}

/// A single constraint on a field value, with the message shown when it fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// Text must be non-empty; a checkbox must be checked.
    Required(&'static str),
    /// Non-empty text must be a valid email address. Empty text passes.
    Email(&'static str),
    /// Value must be exactly a checked checkbox.
    MustBeTrue(&'static str),
}

impl Rule {
    fn check(&self, value: &FieldValue) -> Result<(), &'static str> {
        let ok = match (self, value) {
            (Rule::Required(_), FieldValue::Text(s)) => !s.is_empty(),
            (Rule::Required(_), FieldValue::Checked(b)) => *b,
            (Rule::Email(_), FieldValue::Text(s)) => s.is_empty() || is_valid_email(s),
            (Rule::Email(_), FieldValue::Checked(_)) => false,
            (Rule::MustBeTrue(_), v) => *v == FieldValue::Checked(true),
        };
        if ok { Ok(()) } else { Err(self.message()) }
    }

    fn message(&self) -> &'static str {
        match self {
            Rule::Required(m) | Rule::Email(m) | Rule::MustBeTrue(m) => *m,
        }
    }
}

/// Declarative rule set: an ordered list of rules per field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    rules: [Vec<Rule>; Field::COUNT],
}

impl Default for Schema {
    fn default() -> Self {
        Self::onboarding()
    }
}

impl Schema {
    /// Creates a schema with no rules on any field.
    pub fn empty() -> Self {
        Self {
            rules: Default::default(),
        }
    }

    /// The onboarding form's schema.
    pub fn onboarding() -> Self {
        Self::empty()
            .rule(Field::Name, Rule::Required("name is a required field."))
            .rule(Field::Email, Rule::Required("Must include email address."))
            .rule(Field::Email, Rule::Email("Must be a valid email address."))
            .rule(Field::Password, Rule::Required("Must include password."))
            .rule(
                Field::Terms,
                Rule::MustBeTrue("Please agree to the Terms & Conditions."),
            )
    }

    /// Appends `rule` to the rules for `field`.
    pub fn rule(mut self, field: Field, rule: Rule) -> Self {
        self.rules[field.index()].push(rule);
        self
    }

    /// Returns the rules for `field`, in evaluation order.
    pub fn rules(&self, field: Field) -> &[Rule] {
        &self.rules[field.index()]
    }

    /// Validates a candidate value for one field, returning the first violation.
    pub fn validate_field(&self, field: Field, value: &FieldValue) -> Result<(), ValidationError> {
        self.rules(field)
            .iter()
            .try_for_each(|rule| rule.check(value))
            .map_err(|message| ValidationError {
                field,
                message: message.to_string(),
            })
    }

    /// Returns `true` if every field of `record` satisfies its rules.
    pub fn is_valid(&self, record: &FormRecord) -> bool {
        Field::all()
            .iter()
            .all(|&field| self.validate_field(field, &record.value(field)).is_ok())
    }
}
