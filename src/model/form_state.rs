//! Form state holder: current record, per-field errors, submit enablement.

use serde_json::Value;

use super::record::{ErrorMap, Field, FieldValue, FormRecord};
use super::schema::Schema;

/// Holds the form's record and errors and derives submit-button enablement.
///
/// Field changes are validated and committed immediately. The whole-record
/// check that drives [`submit_enabled`](Self::submit_enabled) is only
/// scheduled by a change and performed by [`settle`](Self::settle), so several
/// changes between two settles cost one recomputation. The app settles before
/// every render.
#[derive(Debug, Clone)]
pub struct FormState {
    schema: Schema,
    record: FormRecord,
    errors: ErrorMap,
    submit_enabled: bool,
    revalidate_pending: bool,
    result: Value,
}

impl Default for FormState {
    fn default() -> Self {
        Self::new(Schema::onboarding())
    }
}

impl FormState {
    /// Creates an empty form validated by `schema`.
    pub fn new(schema: Schema) -> Self {
        let mut state = Self {
            schema,
            record: FormRecord::default(),
            errors: ErrorMap::default(),
            submit_enabled: false,
            revalidate_pending: true,
            result: Value::Array(Vec::new()),
        };
        state.settle();
        state
    }

    /// Applies one input change: validate the new value, then commit it.
    pub fn change(&mut self, field: Field, value: FieldValue) {
        self.validate_field(field, &value);
        self.record.set(field, value);
        self.revalidate_pending = true;
    }

    /// Re-validates the committed value of `field`, updating its error entry.
    pub fn revalidate(&mut self, field: Field) {
        let value = self.record.value(field);
        self.validate_field(field, &value);
    }

    fn validate_field(&mut self, field: Field, value: &FieldValue) {
        match self.schema.validate_field(field, value) {
            Ok(()) => self.errors.clear(field),
            Err(e) => self.errors.set(field, e.message),
        }
    }

    /// Performs a scheduled whole-record recomputation, if any.
    pub fn settle(&mut self) {
        if self.revalidate_pending {
            self.submit_enabled = self.schema.is_valid(&self.record);
            self.revalidate_pending = false;
        }
    }

    /// Returns `true` if a recomputation is scheduled but not yet performed.
    pub fn is_settled(&self) -> bool {
        !self.revalidate_pending
    }

    /// Whether the submit button is enabled, as of the last settle.
    pub fn submit_enabled(&self) -> bool {
        self.submit_enabled
    }

    /// Returns a snapshot of the record to send, or `None` while submit is disabled.
    pub fn submission(&self) -> Option<FormRecord> {
        self.submit_enabled.then(|| self.record.clone())
    }

    /// Restores the record to its defaults. Errors and the last result are kept.
    pub fn reset(&mut self) {
        self.record = FormRecord::default();
        self.revalidate_pending = true;
    }

    /// Stores a successful response body and resets the record.
    pub fn submission_succeeded(&mut self, body: Value) {
        self.result = body;
        self.reset();
    }

    pub fn record(&self) -> &FormRecord {
        &self.record
    }

    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    /// The last successful response body (`[]` until the first success).
    pub fn result(&self) -> &Value {
        &self.result
    }
}
