//! Boolean composition of conditions, for text rendering only

use std::fmt;

use super::Condition;

/// A boolean tree of conditions
///
/// Internal nodes exist only so a caller can render a composed
/// requirement as text; the selector never descends into or produces
/// tree nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConditionExpr {
    /// A single relational condition
    Leaf(Condition),
    /// All children must hold
    And(Vec<ConditionExpr>),
    /// At least one child must hold
    Or(Vec<ConditionExpr>),
    /// No child may hold
    Not(Vec<ConditionExpr>),
}

impl ConditionExpr {
    fn join(children: &[ConditionExpr]) -> String {
        let rendered: Vec<String> = children.iter().map(|c| c.to_string()).collect();
        rendered.join(", ")
    }
}

impl fmt::Display for ConditionExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConditionExpr::Leaf(condition) => write!(f, "{}", condition),
            ConditionExpr::And(children) => write!(f, "AND ({})", Self::join(children)),
            ConditionExpr::Or(children) => write!(f, "OR ({})", Self::join(children)),
            ConditionExpr::Not(children) => write!(f, "NOT ({})", Self::join(children)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(operator: &str, version: &str) -> ConditionExpr {
        ConditionExpr::Leaf(Condition::from_str_pair(operator, version).unwrap())
    }

    #[test]
    fn test_leaf_rendering() {
        assert_eq!(leaf(">=", "1.2.0").to_string(), ">= 1.2.0");
    }

    #[test]
    fn test_and_rendering() {
        let expr = ConditionExpr::And(vec![leaf(">=", "1.2.0"), leaf("<", "2.0.0")]);
        assert_eq!(expr.to_string(), "AND (>= 1.2.0, < 2.0.0)");
    }

    #[test]
    fn test_nested_rendering() {
        let expr = ConditionExpr::Or(vec![
            ConditionExpr::And(vec![leaf(">", "1.0.0"), leaf("<", "3.0.0")]),
            ConditionExpr::Not(vec![leaf("==", "2.5.0")]),
        ]);
        assert_eq!(
            expr.to_string(),
            "OR (AND (> 1.0.0, < 3.0.0), NOT (== 2.5.0))"
        );
    }
}
