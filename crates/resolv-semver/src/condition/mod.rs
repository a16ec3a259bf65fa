//! Condition types for version constraints

mod condition;
mod expr;
mod operator;

pub use condition::Condition;
pub use expr::ConditionExpr;
pub use operator::Operator;
