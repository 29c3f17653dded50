//! Validation errors for the operation lifecycle.
//!
//! Every rejected transition leaves state untouched; the command layer turns
//! these into blocking console messages.

use std::fmt;
use thiserror::Error;

/// The tracked phases of an operation cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Displacement,
    Mobilization,
    Demobilization,
    Waiting,
    Lunch,
    Refueling,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Displacement => "displacement",
            Phase::Mobilization => "mobilization",
            Phase::Demobilization => "demobilization",
            Phase::Waiting => "waiting period",
            Phase::Lunch => "lunch break",
            Phase::Refueling => "refueling",
        };
        write!(f, "{}", name)
    }
}

/// A rejected lifecycle transition.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LogbookError {
    #[error("{0} is already in progress")]
    AlreadyInProgress(Phase),

    #[error("{0} has not been started")]
    NotStarted(Phase),

    #[error("{0} was already completed in this cycle")]
    AlreadyCompleted(Phase),

    #[error("end time precedes start time")]
    EndBeforeStart,

    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("invalid numeric value for {field}: '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    #[error("end km ({end}) cannot be less than start km ({start})")]
    KmRegression { start: f64, end: f64 },

    #[error("complete the displacement before starting mobilization")]
    DisplacementNotCompleted,

    #[error("start the operation first")]
    OperationNotStarted,

    #[error("operation already started")]
    OperationAlreadyStarted,

    #[error("save an operation before recording this event")]
    NoSavedOperation,
}
