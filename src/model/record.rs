use std::fmt;

use serde::{Deserialize, Serialize};

/// The roles offered by the role dropdown. The empty string means "no selection".
pub static ROLE_OPTIONS: &[&str] = &[
    "",
    "Front-End Developer",
    "Back-End Developer",
    "Full-Stack Developer",
    "UI/UX Developer",
    "Team Lead",
];

/// A key of the [`FormRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Name,
    Email,
    Password,
    Role,
    Terms,
}

static ALL_FIELDS: &[Field] = &[
    Field::Name,
    Field::Email,
    Field::Password,
    Field::Role,
    Field::Terms,
];

impl Field {
    /// Number of fields in a record.
    pub const COUNT: usize = 5;

    /// Returns all fields in form order.
    pub fn all() -> &'static [Field] {
        ALL_FIELDS
    }

    /// Returns the JSON key used for this field on the wire.
    pub fn key(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Password => "password",
            Field::Role => "role",
            Field::Terms => "terms",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

#[mutants::skip]
impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// The value carried by a single input change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Text inputs and the role dropdown.
    Text(String),
    /// Checkbox inputs.
    Checked(bool),
}

impl FieldValue {
    /// Coerces the value to a string.
    pub fn into_text(self) -> String {
        match self {
            FieldValue::Text(s) => s,
            FieldValue::Checked(b) => b.to_string(),
        }
    }

    /// Coerces the value to a boolean; text is truthy when non-empty.
    pub fn is_truthy(&self) -> bool {
        match self {
            FieldValue::Text(s) => !s.is_empty(),
            FieldValue::Checked(b) => *b,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Checked(b)
    }
}

/// Current values of every form field. This is also the POST body.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FormRecord {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
    pub terms: bool,
}

impl FormRecord {
    /// Returns the value of `field` as an input would report it.
    pub fn value(&self, field: Field) -> FieldValue {
        match field {
            Field::Name => FieldValue::Text(self.name.clone()),
            Field::Email => FieldValue::Text(self.email.clone()),
            Field::Password => FieldValue::Text(self.password.clone()),
            Field::Role => FieldValue::Text(self.role.clone()),
            Field::Terms => FieldValue::Checked(self.terms),
        }
    }

    /// Returns the string value of a text field, or `""` for `terms`.
    pub fn text(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Password => &self.password,
            Field::Role => &self.role,
            Field::Terms => "",
        }
    }

    /// Writes `value` into `field`, coercing it to the field's type.
    pub fn set(&mut self, field: Field, value: FieldValue) {
        match field {
            Field::Name => self.name = value.into_text(),
            Field::Email => self.email = value.into_text(),
            Field::Password => self.password = value.into_text(),
            Field::Role => self.role = value.into_text(),
            Field::Terms => self.terms = value.is_truthy(),
        }
    }
}

/// Per-field error messages. An empty string means the field has no error.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ErrorMap {
    entries: [String; Field::COUNT],
}

impl ErrorMap {
    /// Returns the message for `field` (empty when clean).
    pub fn get(&self, field: Field) -> &str {
        &self.entries[field.index()]
    }

    /// Sets the message for `field`.
    pub fn set(&mut self, field: Field, message: impl Into<String>) {
        self.entries[field.index()] = message.into();
    }

    /// Clears the message for `field`.
    pub fn clear(&mut self, field: Field) {
        self.entries[field.index()].clear();
    }

}
