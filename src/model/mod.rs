//! Form data: record, error map, validation schema, state holder.

mod form_state;
mod record;
mod schema;

pub use form_state::FormState;
pub use record::{ErrorMap, Field, FieldValue, FormRecord, ROLE_OPTIONS};
pub use schema::{Rule, Schema, ValidationError, is_valid_email};
