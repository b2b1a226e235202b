//! TUI screen implementations.

pub mod help;
pub mod onboarding;

pub use help::{HelpState, draw_help};
pub use onboarding::{OnboardingState, draw_onboarding};
