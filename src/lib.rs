//! Wizard - a multi-step stepper with an elapsed-time counter for the terminal
//!
//! The binary drives [`app::App`]; the library exposes the components so they
//! can be composed and tested without a real terminal.

pub mod app;
pub mod config;
pub mod error;
pub mod logging;
pub mod ui;

pub use error::WizardError;
