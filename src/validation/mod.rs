//! Validation - field-level failures collected before a handler runs.
//!
//! A `Validator<C>` inspects a request and reports every failing field.
//! Validators are registered on the mediator per request type; the mediator
//! concatenates their failures and refuses to run the handler when any are
//! reported.

mod rules;

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub use rules::{Cascade, RuleSet};
pub(crate) use rules::not_blank;

/// One failing field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationFailure {
    /// Dotted path of the field, e.g. `game.title`.
    pub field_path: String,
    pub message: String,
}

impl ValidationFailure {
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field_path: field_path.into(),
            message: message.into(),
        }
    }

    /// Last segment of the field path (`game.title` -> `title`).
    pub fn field(&self) -> &str {
        self.field_path
            .rsplit('.')
            .next()
            .unwrap_or(&self.field_path)
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field_path, self.message)
    }
}

/// A request was rejected by its validators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("validation failed: {}", join_failures(.failures))]
pub struct ValidationError {
    failures: Vec<ValidationFailure>,
}

impl ValidationError {
    pub fn new(failures: Vec<ValidationFailure>) -> Self {
        Self { failures }
    }

    pub fn single(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(vec![ValidationFailure::new(field_path, message)])
    }

    pub fn failures(&self) -> &[ValidationFailure] {
        &self.failures
    }

    pub fn into_failures(self) -> Vec<ValidationFailure> {
        self.failures
    }
}

fn join_failures(failures: &[ValidationFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Inspects a request and reports failing fields, in field order.
pub trait Validator<C>: Send + Sync {
    fn validate(&self, request: &C) -> Vec<ValidationFailure>;
}

impl<C, F> Validator<C> for F
where
    F: Fn(&C) -> Vec<ValidationFailure> + Send + Sync,
{
    fn validate(&self, request: &C) -> Vec<ValidationFailure> {
        self(request)
    }
}
