//! Tests for the simple score director.

use planforge_core::{PlanningSolution, SimpleScore};

use super::*;

#[derive(Clone, Debug)]
struct Counters {
    values: Vec<i64>,
    score: Option<SimpleScore>,
}

impl PlanningSolution for Counters {
    type Score = SimpleScore;

    fn score(&self) -> Option<Self::Score> {
        self.score
    }

    fn set_score(&mut self, score: Option<Self::Score>) {
        self.score = score;
    }
}

fn sum_penalty(s: &Counters) -> SimpleScore {
    SimpleScore::of(-s.values.iter().sum::<i64>())
}

fn director(values: Vec<i64>) -> SimpleScoreDirector<Counters, fn(&Counters) -> SimpleScore> {
    SimpleScoreDirector::new(
        Counters {
            values,
            score: None,
        },
        sum_penalty,
    )
}

#[test]
fn test_calculate_score_sets_solution_score() {
    let mut director = director(vec![1, 2, 3]);
    let score = director.calculate_score();
    assert_eq!(score, SimpleScore::of(-6));
    assert_eq!(director.working_solution().score(), Some(score));
}

#[test]
fn test_score_is_cached_until_variable_change() {
    let mut director = director(vec![1, 2]);
    director.calculate_score();
    director.calculate_score();
    assert_eq!(director.calculation_count(), 1);

    director.before_variable_changed(0, 0, "value");
    director.working_solution_mut().values[0] = 10;
    director.after_variable_changed(0, 0, "value");

    assert_eq!(director.calculate_score(), SimpleScore::of(-12));
    assert_eq!(director.calculation_count(), 2);
}

#[test]
fn test_set_working_solution_marks_dirty() {
    let mut director = director(vec![1]);
    director.calculate_score();
    director.set_working_solution(Counters {
        values: vec![5, 5],
        score: None,
    });
    assert_eq!(director.calculate_score(), SimpleScore::of(-10));
    assert_eq!(director.clone_working_solution().values, vec![5, 5]);
}
