//! Relational operators for version conditions

use std::fmt;

use crate::version::FormatError;

/// Comparison operators for version conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Equal (==)
    Equal,
    /// Less than (<)
    LessThan,
    /// Less than or equal (<=)
    LessThanOrEqual,
    /// Greater than (>)
    GreaterThan,
    /// Greater than or equal (>=)
    GreaterThanOrEqual,
    /// Not equal (!=)
    NotEqual,
}

impl Operator {
    /// Parse operator from string
    pub fn from_str(s: &str) -> Result<Self, FormatError> {
        match s {
            "=" | "==" => Ok(Operator::Equal),
            "<" => Ok(Operator::LessThan),
            "<=" => Ok(Operator::LessThanOrEqual),
            ">" => Ok(Operator::GreaterThan),
            ">=" => Ok(Operator::GreaterThanOrEqual),
            "!=" | "<>" => Ok(Operator::NotEqual),
            _ => Err(FormatError::InvalidOperator {
                operator: s.to_string(),
                expected: Self::supported_operators().join(", "),
            }),
        }
    }

    /// Get the string representation of the operator
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Equal => "==",
            Operator::LessThan => "<",
            Operator::LessThanOrEqual => "<=",
            Operator::GreaterThan => ">",
            Operator::GreaterThanOrEqual => ">=",
            Operator::NotEqual => "!=",
        }
    }

    /// Get all supported operator spellings
    pub fn supported_operators() -> &'static [&'static str] {
        &["=", "==", "<", "<=", ">", ">=", "!=", "<>"]
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
