
use std::fmt;

use thiserror::Error;

use super::tac::Var;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GenError {
    #[error("integer constant {0} does not fit in 64 bits")]
    InvalidConstant(String),
    #[error("no value to use for \"{0}\"")]
    MissingValue(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EmulatorError {
    #[error("variable {0} is read before being assigned")]
    Unassigned(Var),
    #[error("division by zero in {0}")]
    DivisionByZero(String),
    #[error("arithmetic overflow in {0}")]
    Overflow(String),
}

#[derive(Debug, Error)]
pub enum AsmError {
    #[error("immediate of {0} does not fit in 32 bits")]
    ImmediateOutOfRange(String),
    #[error("no free register for {0}")]
    OutOfRegisters(String),
    #[error("variable {0} is read before being assigned")]
    Unassigned(Var),
    #[error(transparent)]
    Fmt(#[from] fmt::Error),
}
