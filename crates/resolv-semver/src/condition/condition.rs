//! Single relational version condition

use std::fmt;

use super::Operator;
use crate::version::{FormatError, VersionValue};

/// A single relational condition on a version (e.g., ">= 1.0.0")
///
/// The operand is always a fully concrete version; a wildcard field has
/// no meaning as a relational bound and is rejected at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    operator: Operator,
    operand: VersionValue,
}

impl Condition {
    /// Create a new condition from a parsed operand
    pub fn new(operator: Operator, operand: VersionValue) -> Result<Self, FormatError> {
        if !operand.is_concrete() {
            return Err(FormatError::WildcardOperand(operand.to_string()));
        }
        Ok(Condition { operator, operand })
    }

    /// Create a condition from operator and version strings
    pub fn from_str_pair(operator: &str, version: &str) -> Result<Self, FormatError> {
        let operator = Operator::from_str(operator)?;
        let operand = VersionValue::parse(version)?;
        Self::new(operator, operand)
    }

    /// Get the operator
    pub fn operator(&self) -> Operator {
        self.operator
    }

    /// Get the version operand
    pub fn version(&self) -> &VersionValue {
        &self.operand
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.operator, self.operand)
    }
}
