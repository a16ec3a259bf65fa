//! Semantic version comparison and range-constraint arbitration
//!
//! This crate decides which version bound "wins" when multiple packages
//! impose overlapping requirements on the same dependency. It provides
//! SemVer 2.0 parsing and precedence ordering (with a wildcard pattern
//! variant for range matching) and a pairwise selector that folds
//! same-direction constraints into one effective bound.

pub mod condition;
mod selector;
mod version;

pub use condition::{Condition, ConditionExpr, Operator};
pub use selector::{ConstraintSelector, SelectorError};
pub use version::{FormatError, Identifier, VersionValue};
