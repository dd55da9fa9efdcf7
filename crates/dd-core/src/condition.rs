//! Condition evaluation for gated dialogue elements.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::keys::KeyStore;

/// Integer comparison applied between a key's value and a constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparison {
    /// `value == number`
    Equals,
    /// `value != number`
    NotEquals,
    /// `value >= number`
    GreaterOrEqual,
    /// `value <= number`
    LessOrEqual,
    /// `value < number`
    LessThan,
    /// `value > number`
    GreaterThan,
}

impl Comparison {
    /// Compare `lhs` against `rhs`.
    pub fn compare(self, lhs: i32, rhs: i32) -> bool {
        match self {
            Self::Equals => lhs == rhs,
            Self::NotEquals => lhs != rhs,
            Self::GreaterOrEqual => lhs >= rhs,
            Self::LessOrEqual => lhs <= rhs,
            Self::LessThan => lhs < rhs,
            Self::GreaterThan => lhs > rhs,
        }
    }

    /// The operator as written in source code.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Equals => "==",
            Self::NotEquals => "!=",
            Self::GreaterOrEqual => ">=",
            Self::LessOrEqual => "<=",
            Self::LessThan => "<",
            Self::GreaterThan => ">",
        }
    }
}

/// A test of one key against a constant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    /// The key to read.
    pub name: String,
    /// How to compare.
    pub operation: Comparison,
    /// The constant to compare against.
    pub number: i32,
}

impl Condition {
    /// Create a new condition.
    pub fn new(name: impl Into<String>, operation: Comparison, number: i32) -> Self {
        Self {
            name: name.into(),
            operation,
            number,
        }
    }

    /// Evaluate against the current key values. Missing keys read as 0.
    pub fn evaluate(&self, keys: &KeyStore) -> bool {
        self.operation.compare(keys.get(&self.name), self.number)
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.name, self.operation.symbol(), self.number)
    }
}
