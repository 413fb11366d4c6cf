//! Validation Engine
//!
//! Rule-based structural checks for the three configuration kinds.

pub mod engine;
mod report;
pub mod rules;

pub use engine::{
    Finding, Severity, ValidationResult, Validator, parse_failure, validate, validate_document,
};
