//! Tests for score types.

use super::*;

// ============================================================================
// SimpleScore Tests
// ============================================================================

mod simple_score {
    use super::*;

    #[test]
    fn test_creation() {
        let score = SimpleScore::of(-5);
        assert_eq!(score.score(), -5);
        assert_eq!(score.init_score(), 0);
    }

    #[test]
    fn test_feasibility() {
        assert!(SimpleScore::of(0).is_feasible());
        assert!(SimpleScore::of(-10).is_feasible());
        assert!(!SimpleScore::of_uninitialized(-1, 0).is_feasible());
    }

    #[test]
    fn test_comparison() {
        let s1 = SimpleScore::of(-10);
        let s2 = SimpleScore::of(-5);
        let s3 = SimpleScore::of(0);

        assert!(s3 > s2);
        assert!(s2 > s1);
        assert!(s1 < s2);
    }

    #[test]
    fn test_multiply_divide_floor() {
        let score = SimpleScore::of(-7);

        assert_eq!(score.multiply(0.5), SimpleScore::of(-4));
        assert_eq!(score.divide(2.0), SimpleScore::of(-4));
        assert_eq!(SimpleScore::of(7).divide(2.0), SimpleScore::of(3));
    }

    #[test]
    #[should_panic(expected = "attempt to divide by zero")]
    fn test_divide_by_zero_panics() {
        let _ = SimpleScore::of(10).divide(0.0);
    }

    #[test]
    fn test_parse() {
        assert_eq!(SimpleScore::parse("42").unwrap(), SimpleScore::of(42));
        assert_eq!(SimpleScore::parse("-10").unwrap(), SimpleScore::of(-10));
        assert_eq!(
            SimpleScore::parse("-3init/-10").unwrap(),
            SimpleScore::of_uninitialized(-3, -10)
        );
        assert!(SimpleScore::parse("abc").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(SimpleScore::of(-4).to_string(), "-4");
        assert_eq!(SimpleScore::of_uninitialized(-2, -4).to_string(), "-2init/-4");
    }
}

// ============================================================================
// HardSoftScore Tests
// ============================================================================

mod hard_soft_score {
    use super::*;

    #[test]
    fn test_creation() {
        let score = HardSoftScore::of(-2, -100);
        assert_eq!(score.hard(), -2);
        assert_eq!(score.soft(), -100);
        assert_eq!(score.with_init_score(-3).init_score(), -3);
    }

    #[test]
    fn test_feasibility() {
        assert!(HardSoftScore::of(0, -1000).is_feasible());
        assert!(HardSoftScore::of(10, -50).is_feasible());
        assert!(!HardSoftScore::of(-1, 0).is_feasible());
        assert!(!HardSoftScore::of_uninitialized(-1, 0, 0).is_feasible());
    }

    #[test]
    fn test_comparison() {
        use std::cmp::Ordering;

        let infeasible = HardSoftScore::of(-1, 0);
        let feasible = HardSoftScore::of(0, -1000);
        assert!(feasible > infeasible);
        assert!(feasible.is_better_than(&infeasible));
        assert!(infeasible.is_worse_than(&feasible));

        let s1 = HardSoftScore::of(0, -100);
        let s2 = HardSoftScore::of(0, -50);
        assert_eq!(s2.compare(&s1), Ordering::Greater);
    }

    #[test]
    fn test_init_score_compares_first() {
        let uninitialized = HardSoftScore::of_uninitialized(-7, 100, 100);
        let initialized = HardSoftScore::of(-147, -258);
        assert!(initialized > uninitialized);
        assert!(HardSoftScore::of_uninitialized(-1, -5, -5) > uninitialized);
    }

    #[test]
    fn test_arithmetic() {
        let s1 = HardSoftScore::of_uninitialized(-1, -1, -100);
        let s2 = HardSoftScore::of(-1, -50);

        assert_eq!(s1 + s2, HardSoftScore::of_uninitialized(-1, -2, -150));
        assert_eq!(s1 - s2, HardSoftScore::of_uninitialized(-1, 0, -50));
        assert_eq!(-s1, HardSoftScore::of_uninitialized(1, 1, 100));
        assert_eq!(s1.abs(), HardSoftScore::of_uninitialized(1, 1, 100));
    }

    #[test]
    fn test_power_floors() {
        let score = HardSoftScore::of(-3, 5);
        assert_eq!(score.power(2.0), HardSoftScore::of(9, 25));
        assert_eq!(HardSoftScore::of(4, 10).power(0.5), HardSoftScore::of(2, 3));
    }

    #[test]
    fn test_parse() {
        assert_eq!(
            HardSoftScore::parse("0hard/-100soft").unwrap(),
            HardSoftScore::of(0, -100)
        );
        assert_eq!(
            HardSoftScore::parse("-5init/-1hard/0soft").unwrap(),
            HardSoftScore::of_uninitialized(-5, -1, 0)
        );
        assert!(HardSoftScore::parse("-1hard").is_err());
        assert!(HardSoftScore::parse("-1x/-1hard/0soft").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(HardSoftScore::of(-1, -100).to_string(), "-1hard/-100soft");
        assert_eq!(
            format!("{:?}", HardSoftScore::of_uninitialized(-2, 0, -3)),
            "HardSoftScore(-2init/0hard/-3soft)"
        );
    }

    #[test]
    fn test_level_numbers() {
        let score = HardSoftScore::of_uninitialized(-9, -2, -50);
        assert_eq!(score.to_level_numbers(), vec![-2, -50]);
        assert_eq!(
            HardSoftScore::from_level_numbers(&[-2, -50]),
            HardSoftScore::of(-2, -50)
        );
    }
}

// ============================================================================
// HardMediumSoftScore Tests
// ============================================================================

mod hard_medium_soft_score {
    use super::*;

    #[test]
    fn test_comparison_by_level() {
        assert!(HardMediumSoftScore::of(0, -1, 0) < HardMediumSoftScore::of(0, 0, -1000));
        assert!(HardMediumSoftScore::of(-1, 0, 0) < HardMediumSoftScore::of(0, -1000, 0));
    }

    #[test]
    fn test_parse_and_display() {
        let score = HardMediumSoftScore::parse("-1init/0hard/-2medium/-3soft").unwrap();
        assert_eq!(score, HardMediumSoftScore::of_uninitialized(-1, 0, -2, -3));
        assert_eq!(score.to_string(), "-1init/0hard/-2medium/-3soft");
    }

    #[test]
    fn test_levels_count() {
        assert_eq!(HardMediumSoftScore::levels_count(), 3);
    }
}

// ============================================================================
// BendableScore Tests
// ============================================================================

mod bendable_score {
    use super::*;

    type Score23 = BendableScore<2, 3>;

    #[test]
    fn test_feasibility() {
        assert!(Score23::of([0, 0], [-1, -2, -3]).is_feasible());
        assert!(!Score23::of([0, -1], [0, 0, 0]).is_feasible());
        assert!(!Score23::of_uninitialized(-1, [0, 0], [0, 0, 0]).is_feasible());
    }

    #[test]
    fn test_comparison() {
        let a = Score23::of([0, -1], [0, 0, 0]);
        let b = Score23::of([0, 0], [-100, 0, 0]);
        let c = Score23::of_uninitialized(-1, [5, 5], [5, 5, 5]);
        assert!(b > a);
        assert!(a > c);
    }

    #[test]
    fn test_arithmetic() {
        let a = Score23::of([1, 2], [3, 4, 5]);
        let b = Score23::of([1, 1], [1, 1, 1]);
        assert_eq!(a - b, Score23::of([0, 1], [2, 3, 4]));
        assert_eq!(a + Score23::zero(), a);
        assert_eq!(a.multiply(1.5), Score23::of([1, 3], [4, 6, 7]));
    }

    #[test]
    fn test_parse_and_display() {
        let score = Score23::parse("-2init/[-1/0]hard/[0/-3/-4]soft").unwrap();
        assert_eq!(score, Score23::of_uninitialized(-2, [-1, 0], [0, -3, -4]));
        assert_eq!(score.to_string(), "-2init/[-1/0]hard/[0/-3/-4]soft");
        assert!(Score23::parse("[0]hard/[0/0/0]soft").is_err());
    }

    #[test]
    fn test_level_numbers() {
        let score = Score23::of([1, 2], [3, 4, 5]);
        assert_eq!(score.to_level_numbers(), vec![1, 2, 3, 4, 5]);
        assert_eq!(Score23::from_level_numbers(&[1, 2, 3, 4, 5]), score);
    }
}

// ============================================================================
// Algebraic properties
// ============================================================================

mod algebra {
    use super::*;
    use proptest::prelude::*;

    fn hard_soft() -> impl Strategy<Value = HardSoftScore> {
        (-1000i64..=0, -100_000i64..100_000, -100_000i64..100_000)
            .prop_map(|(init, hard, soft)| HardSoftScore::of_uninitialized(init, hard, soft))
    }

    proptest! {
        #[test]
        fn add_then_subtract_is_identity(a in hard_soft(), b in hard_soft()) {
            prop_assert_eq!((a + b) - b, a);
        }

        #[test]
        fn double_negation_is_identity(a in hard_soft()) {
            prop_assert_eq!(-(-a), a);
        }

        #[test]
        fn zero_is_additive_identity(a in hard_soft()) {
            prop_assert_eq!(HardSoftScore::zero() + a, a);
        }

        #[test]
        fn ordering_is_lexicographic(a in hard_soft(), b in hard_soft()) {
            let expected = (a.init_score(), a.hard(), a.soft())
                .cmp(&(b.init_score(), b.hard(), b.soft()));
            prop_assert_eq!(a.cmp(&b), expected);
        }

        #[test]
        fn uninitialized_is_worse_than_initialized(
            init in -1000i64..0,
            a in -100_000i64..100_000,
            b in -100_000i64..100_000,
        ) {
            prop_assert!(
                HardSoftScore::of_uninitialized(init, a, a) < HardSoftScore::of(b, b)
            );
        }
    }

    #[test]
    fn init_score_dominates_levels() {
        assert!(
            HardSoftScore::of_uninitialized(-7, -147, -258) < HardSoftScore::of(-147, -258)
        );
    }
}
