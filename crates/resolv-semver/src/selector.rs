//! Pairwise arbitration between version conditions

use std::cmp::Ordering;

use thiserror::Error;

use crate::condition::{Condition, Operator};

/// Error type for undefined operator pairings
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectorError {
    #[error("No merge policy for operator pairing \"{left}\" / \"{right}\"")]
    UnsupportedOperatorPair { left: Operator, right: Operator },
}

/// Which bound axis an operator belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BoundAxis {
    Lower,
    Upper,
}

fn bound_axis(operator: Operator) -> Option<BoundAxis> {
    match operator {
        Operator::GreaterThan | Operator::GreaterThanOrEqual => Some(BoundAxis::Lower),
        Operator::LessThan | Operator::LessThanOrEqual => Some(BoundAxis::Upper),
        _ => None,
    }
}

/// Stateless pairwise reducer over same-family conditions
///
/// Given two conditions from the same operator family, picks the one
/// whose effective threshold is looser or tighter, so a resolver can
/// fold a list of same-direction constraints into one representative
/// bound. Mixed families (a lower bound against an upper bound, or a
/// relational bound against `==`/`!=`) have no merge semantics here and
/// are rejected.
pub struct ConstraintSelector;

impl ConstraintSelector {
    /// Return the condition with the greater effective threshold
    ///
    /// For `>`/`>=` pairs this is the higher effective minimum, the one
    /// that stays binding under conjunction; for `<`/`<=` pairs it is
    /// the looser cap. At an equal version the exclusive bound sits one
    /// epsilon toward its axis extreme, so `> v` beats `>= v` and
    /// `<= v` beats `< v`. `==` pairs compare by version; `!=` pairs
    /// prefer the second condition when the versions differ. On an
    /// exact tie the first condition is returned.
    pub fn prefer_looser<'a>(
        a: &'a Condition,
        b: &'a Condition,
    ) -> Result<&'a Condition, SelectorError> {
        if a.operator() == Operator::NotEqual && b.operator() == Operator::NotEqual {
            return Ok(Self::select_exclusion(a, b));
        }
        match Self::threshold_cmp(a, b)? {
            Ordering::Less => Ok(b),
            _ => Ok(a),
        }
    }

    /// Return the condition with the smaller effective threshold
    ///
    /// The dual of [`prefer_looser`]: for `<`/`<=` pairs this is the
    /// tighter cap (`< v` beats `<= v` at an equal version), for
    /// `>`/`>=` pairs the lower effective minimum. `==` pairs take the
    /// smaller version; the `!=` and exact-tie rules mirror
    /// [`prefer_looser`].
    ///
    /// [`prefer_looser`]: ConstraintSelector::prefer_looser
    pub fn prefer_tighter<'a>(
        a: &'a Condition,
        b: &'a Condition,
    ) -> Result<&'a Condition, SelectorError> {
        if a.operator() == Operator::NotEqual && b.operator() == Operator::NotEqual {
            return Ok(Self::select_exclusion(a, b));
        }
        match Self::threshold_cmp(a, b)? {
            Ordering::Greater => Ok(b),
            _ => Ok(a),
        }
    }

    /// Two exclusions merge only when they name the same version
    fn select_exclusion<'a>(a: &'a Condition, b: &'a Condition) -> &'a Condition {
        if a.version() != b.version() {
            b
        } else {
            a
        }
    }

    /// Compare effective thresholds within one operator family
    ///
    /// The version decides first; on an equal version the operators
    /// break the tie, because `> v` and `>= v` are not equal as sets —
    /// the inclusive bound admits one more point. On the lower axis the
    /// exclusive bound orders above the inclusive one, on the upper
    /// axis below it. `==` thresholds order by version only.
    fn threshold_cmp(a: &Condition, b: &Condition) -> Result<Ordering, SelectorError> {
        let version_cmp = a.version().precedence(b.version());

        match (bound_axis(a.operator()), bound_axis(b.operator())) {
            (Some(BoundAxis::Lower), Some(BoundAxis::Lower)) => Ok(version_cmp.then(
                exclusivity(a.operator()).cmp(&exclusivity(b.operator())),
            )),
            (Some(BoundAxis::Upper), Some(BoundAxis::Upper)) => Ok(version_cmp.then(
                exclusivity(b.operator()).cmp(&exclusivity(a.operator())),
            )),
            _ if a.operator() == Operator::Equal && b.operator() == Operator::Equal => {
                Ok(version_cmp)
            }
            _ => Err(SelectorError::UnsupportedOperatorPair {
                left: a.operator(),
                right: b.operator(),
            }),
        }
    }
}

fn exclusivity(operator: Operator) -> u8 {
    match operator {
        Operator::GreaterThan | Operator::LessThan => 1,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cond(operator: &str, version: &str) -> Condition {
        Condition::from_str_pair(operator, version).unwrap()
    }

    #[test]
    fn test_prefer_looser_same_operator() {
        let a = cond(">", "1.8.0");
        let b = cond(">", "1.8.1");
        assert_eq!(ConstraintSelector::prefer_looser(&a, &b).unwrap(), &b);
        assert_eq!(ConstraintSelector::prefer_looser(&b, &a).unwrap(), &b);
    }

    #[test]
    fn test_prefer_looser_version_decides_before_epsilon() {
        // >= at 1.8.0 has a higher effective minimum than > at 1.8.0-beta
        let a = cond(">=", "1.8.0");
        let b = cond(">", "1.8.0-beta");
        assert_eq!(ConstraintSelector::prefer_looser(&a, &b).unwrap(), &a);
    }

    #[test]
    fn test_prefer_looser_equal_version_tie_break() {
        // At an equal version the exclusive lower bound wins
        let a = cond(">=", "1.8.0");
        let b = cond(">", "1.8.0");
        assert_eq!(ConstraintSelector::prefer_looser(&a, &b).unwrap(), &b);
        assert_eq!(ConstraintSelector::prefer_looser(&b, &a).unwrap(), &b);
    }

    #[test]
    fn test_prefer_looser_upper_bounds() {
        // Among caps, the looser one admits more versions
        let a = cond("<", "2.0.0");
        let b = cond("<=", "2.0.0");
        assert_eq!(ConstraintSelector::prefer_looser(&a, &b).unwrap(), &b);

        let c = cond("<=", "1.9.0");
        assert_eq!(ConstraintSelector::prefer_looser(&a, &c).unwrap(), &a);
    }

    #[test]
    fn test_prefer_tighter_upper_bounds() {
        let a = cond("<=", "1.8.0-beta");
        let b = cond("<", "1.8.0");
        assert_eq!(ConstraintSelector::prefer_tighter(&a, &b).unwrap(), &a);
    }

    #[test]
    fn test_prefer_tighter_equal_version_tie_break() {
        // At an equal version the exclusive upper bound is the tighter cap
        let a = cond("<=", "1.8.0");
        let b = cond("<", "1.8.0");
        assert_eq!(ConstraintSelector::prefer_tighter(&a, &b).unwrap(), &b);
        assert_eq!(ConstraintSelector::prefer_tighter(&b, &a).unwrap(), &b);
    }

    #[test]
    fn test_equality_pairs() {
        let a = cond("==", "1.2.0");
        let b = cond("==", "1.4.0");
        assert_eq!(ConstraintSelector::prefer_looser(&a, &b).unwrap(), &b);
        assert_eq!(ConstraintSelector::prefer_tighter(&a, &b).unwrap(), &a);

        let same = cond("==", "1.2.0");
        assert_eq!(ConstraintSelector::prefer_looser(&a, &same).unwrap(), &a);
    }

    #[test]
    fn test_inequality_pairs() {
        let a = cond("!=", "1.2.0");
        let b = cond("!=", "1.4.0");
        // Differing exclusions prefer the second condition
        assert_eq!(ConstraintSelector::prefer_looser(&a, &b).unwrap(), &b);
        assert_eq!(ConstraintSelector::prefer_tighter(&a, &b).unwrap(), &b);

        let same = cond("!=", "1.2.0");
        assert_eq!(ConstraintSelector::prefer_looser(&a, &same).unwrap(), &a);
        assert_eq!(ConstraintSelector::prefer_tighter(&a, &same).unwrap(), &a);
    }

    #[test]
    fn test_pre_release_thresholds() {
        let a = cond(">", "1.8.0-alpha");
        let b = cond(">", "1.8.0-alpha.1");
        assert_eq!(ConstraintSelector::prefer_looser(&a, &b).unwrap(), &b);
        assert_eq!(ConstraintSelector::prefer_tighter(&a, &b).unwrap(), &a);
    }

    #[test]
    fn test_unsupported_pairings_are_rejected() {
        let pairs = [
            (cond("<", "1.0.0"), cond(">", "2.0.0")),
            (cond("==", "1.0.0"), cond(">", "1.0.0")),
            (cond("!=", "1.0.0"), cond("<=", "2.0.0")),
            (cond("==", "1.0.0"), cond("!=", "1.0.0")),
        ];
        for (a, b) in &pairs {
            assert!(matches!(
                ConstraintSelector::prefer_looser(a, b),
                Err(SelectorError::UnsupportedOperatorPair { .. })
            ));
            assert!(matches!(
                ConstraintSelector::prefer_tighter(a, b),
                Err(SelectorError::UnsupportedOperatorPair { .. })
            ));
        }
    }

    #[test]
    fn test_fold_is_order_insensitive() {
        let conditions = [
            cond(">=", "1.2.0"),
            cond(">", "1.1.0"),
            cond(">=", "1.4.0-rc.1"),
            cond(">", "1.4.0-rc.1"),
            cond(">=", "0.9.0"),
        ];

        let fold = |order: &[usize]| -> String {
            let mut winner = &conditions[order[0]];
            for &i in &order[1..] {
                winner = ConstraintSelector::prefer_looser(winner, &conditions[i]).unwrap();
            }
            winner.to_string()
        };

        let forward = fold(&[0, 1, 2, 3, 4]);
        assert_eq!(forward, "> 1.4.0-rc.1");
        assert_eq!(fold(&[4, 3, 2, 1, 0]), forward);
        assert_eq!(fold(&[2, 0, 4, 1, 3]), forward);
    }
}
