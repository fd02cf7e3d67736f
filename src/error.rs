//! Error types for building a wizard from its definition.

use thiserror::Error;

/// Errors raised while constructing or validating a wizard.
///
/// Navigation itself never fails: moving past either end of the step list is
/// a no-op, so these only surface at construction time.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WizardError {
    #[error("a wizard needs at least one step")]
    NoSteps,

    #[error("step {index} has an empty title")]
    EmptyTitle { index: usize },

    #[error("timer tick interval must be greater than zero")]
    ZeroTickInterval,

    #[error("ui refresh rate must be greater than zero")]
    ZeroRefreshRate,
}
