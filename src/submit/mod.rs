//! Submission client: posts the form record as JSON to a fixed endpoint.
//!
//! One request per call. There is no retry, no timeout and no cancellation;
//! a caller that wants to submit again simply calls [`SubmissionClient::submit`]
//! again.

mod client;
mod error;

pub use client::{DEFAULT_ENDPOINT, SubmissionClient};
pub use error::SubmitError;
