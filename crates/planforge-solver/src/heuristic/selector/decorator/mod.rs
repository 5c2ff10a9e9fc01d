//! Move selector decorators.
//!
//! Decorators wrap other selectors to combine, reorder or filter the
//! moves they yield:
//!
//! - [`UnionMoveSelector`]: concatenates or randomly interleaves two selectors
//! - [`ShufflingMoveSelector`]: yields the inner moves in random order
//! - [`ProbabilityMoveSelector`]: weighted sampling without replacement
//! - [`FilteringMoveSelector`]: drops moves rejected by a predicate

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Forwards `size`, `problem_size` and the lifecycle hooks to the `inner` field.
macro_rules! delegate_to_inner {
    () => {
        fn size<D: ScoreDirector<S>>(&self, score_director: &D) -> usize {
            self.inner.size(score_director)
        }

        fn problem_size<D: ScoreDirector<S>>(
            &self,
            score_director: &D,
        ) -> crate::heuristic::selector::ProblemSize {
            self.inner.problem_size(score_director)
        }

        fn phase_started(&mut self) {
            self.inner.phase_started();
        }

        fn step_ended(&mut self) {
            self.inner.step_ended();
        }

        fn phase_ended(&mut self) {
            self.inner.phase_ended();
        }
    };
}

mod filtering;
mod probability;
mod shuffling;
mod union;

pub use filtering::FilteringMoveSelector;
pub use probability::ProbabilityMoveSelector;
pub use shuffling::ShufflingMoveSelector;
pub use union::UnionMoveSelector;

fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}
