#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Terminal onboarding form: validates a small record against a declarative
//! schema and posts it as JSON to a fixed endpoint.

pub mod config;
pub mod logging;
pub mod model;
pub mod submit;
pub mod tui;
