//! Entity interpreter: condition phrases to query parameters.
//!
//! Three independent mappings from the raw `condition` entity value to the
//! measured variable, the aggregation operation, and the comparator. The
//! substring matches are deliberately permissive - the NLU emits phrases
//! like "average temperature" that are not in the literal word set.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Measured variable a query is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variable {
    Temperature,
}

impl Variable {
    pub fn as_str(self) -> &'static str {
        match self {
            Variable::Temperature => "temperature",
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregation applied over the historical period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Max,
    Min,
    Mean,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Max => "max",
            Operation::Min => "min",
            Operation::Mean => "mean",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction of a compare-to-past comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparator {
    Greater,
    Less,
}

impl Comparator {
    pub fn apply(self, lhs: f64, rhs: f64) -> bool {
        match self {
            Comparator::Greater => lhs > rhs,
            Comparator::Less => lhs < rhs,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InterpretError {
    #[error("no comparison is implied by {0:?}")]
    UnknownComparator(String),
    #[error("no measured variable is implied by {0:?}")]
    UnknownVariable(String),
    #[error("no aggregation is implied by {0:?}")]
    UnknownOperation(String),
}

pub fn comparator(condition: &str) -> Result<Comparator, InterpretError> {
    let condition = condition.trim().to_lowercase();
    match condition.as_str() {
        "hotter" | "warmer" => Ok(Comparator::Greater),
        "colder" => Ok(Comparator::Less),
        _ => Err(InterpretError::UnknownComparator(condition)),
    }
}

pub fn variable(condition: &str) -> Result<Variable, InterpretError> {
    let condition = condition.trim().to_lowercase();
    match condition.as_str() {
        "hotter" | "hottest" | "warmer" | "warmest" | "colder" | "coldest" => {
            Ok(Variable::Temperature)
        }
        other if other.contains("temperature") => Ok(Variable::Temperature),
        _ => Err(InterpretError::UnknownVariable(condition)),
    }
}

pub fn operation(condition: &str) -> Result<Operation, InterpretError> {
    let condition = condition.trim().to_lowercase();
    match condition.as_str() {
        "hottest" | "warmest" => Ok(Operation::Max),
        "coldest" => Ok(Operation::Min),
        "hotter" | "warmer" | "colder" => Ok(Operation::Mean),
        other if other.contains("average") => Ok(Operation::Mean),
        _ => Err(InterpretError::UnknownOperation(condition)),
    }
}
