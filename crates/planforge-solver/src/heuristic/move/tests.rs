//! Tests for the move system.

use std::collections::HashSet;

use planforge_core::SimpleScore;
use planforge_scoring::ScoreDirector;
use planforge_test::nqueens::{
    create_nqueens_director, create_nqueens_director_optional, get_queen_row, set_queen_row,
    NQueensSolution,
};

use super::*;

type QueenChange = ChangeMove<NQueensSolution, i64>;
type QueenSwap = SwapMove<NQueensSolution, i64>;

fn change(entity_index: usize, row: i64) -> QueenChange {
    ChangeMove::new(entity_index, Some(row), get_queen_row, set_queen_row, "row", 0)
}

fn swap(left: usize, right: usize) -> QueenSwap {
    SwapMove::new(left, right, get_queen_row, set_queen_row, "row", 0)
}

mod change {
    use super::*;

    #[test]
    fn test_is_doable() {
        let director = create_nqueens_director(&[0, 1, 2, 3]);
        assert!(change(0, 2).is_doable(&director));
        assert!(!change(0, 0).is_doable(&director));

        let unassign = ChangeMove::new(0, None, get_queen_row, set_queen_row, "row", 0);
        assert!(unassign.is_doable(&director));
    }

    #[test]
    fn test_do_and_undo_restores_state() {
        let mut director = create_nqueens_director(&[0, 0, 0, 0]);
        let before = director.calculate_score();

        let m = change(1, 2);
        let undo = m.create_undo_move(&director);
        m.do_move(&mut director);
        assert_eq!(get_queen_row(director.working_solution(), 1), Some(2));
        assert_ne!(director.calculate_score(), before);

        undo.do_move(&mut director);
        assert_eq!(director.working_solution().rows(), vec![Some(0); 4]);
        assert_eq!(director.calculate_score(), before);
    }

    #[test]
    fn test_undo_of_assignment_unassigns() {
        let mut director = create_nqueens_director_optional(&[None, Some(1)]);
        let m = change(0, 0);
        let undo = m.create_undo_move(&director);
        assert_eq!(undo.to_value(), None);

        m.do_move(&mut director);
        undo.do_move(&mut director);
        assert_eq!(get_queen_row(director.working_solution(), 0), None);
    }

    #[test]
    fn test_equality_ignores_accessors() {
        assert_eq!(change(1, 3), change(1, 3));
        assert_ne!(change(1, 3), change(1, 2));
        assert_ne!(change(1, 3), change(2, 3));

        let set: HashSet<_> = [change(1, 3), change(1, 3), change(0, 3)].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_planning_values() {
        let solution = NQueensSolution::with_rows(&[0, 0]);
        assert_eq!(change(0, 1).planning_values(&solution).len(), 1);
        assert_eq!(
            change(0, 1).planning_values(&solution),
            change(1, 1).planning_values(&solution)
        );
        assert_eq!(change(0, 1).entity_indices(), &[0]);
    }
}

mod swap {
    use super::*;

    #[test]
    fn test_is_doable() {
        let director = create_nqueens_director(&[0, 1, 1]);
        assert!(swap(0, 1).is_doable(&director));
        assert!(!swap(1, 2).is_doable(&director));
        assert!(!swap(0, 0).is_doable(&director));
    }

    #[test]
    fn test_swap_is_its_own_undo() {
        let mut director = create_nqueens_director(&[0, 3, 1, 2]);
        let before = director.calculate_score();

        let m = swap(0, 1);
        let undo = m.create_undo_move(&director);
        assert_eq!(undo, m);

        m.do_move(&mut director);
        assert_eq!(
            director.working_solution().rows(),
            vec![Some(3), Some(0), Some(1), Some(2)]
        );

        undo.do_move(&mut director);
        assert_eq!(director.calculate_score(), before);
        assert_eq!(m.entity_indices(), &[0, 1]);
    }

    #[test]
    fn test_planning_values_read_current_state() {
        let solution = NQueensSolution::with_rows(&[2, 3]);
        let values = swap(0, 1).planning_values(&solution);
        assert_eq!(values.as_slice(), &[value_hash(&2i64), value_hash(&3i64)]);
    }
}

mod composite {
    use super::*;

    #[test]
    fn test_composite_round_trip() {
        let mut director = create_nqueens_director(&[0, 0, 0, 0]);
        let before = director.calculate_score();

        let m = CompositeMove::new(vec![change(0, 1), change(2, 3), change(0, 1)]);
        assert!(m.is_doable(&director));
        assert_eq!(m.entity_indices(), &[0, 2]);

        let undo = m.create_undo_move(&director);
        m.do_move(&mut director);
        assert_eq!(
            director.working_solution().rows(),
            vec![Some(1), Some(0), Some(3), Some(0)]
        );

        undo.do_move(&mut director);
        assert_eq!(director.working_solution().rows(), vec![Some(0); 4]);
        assert_eq!(director.calculate_score(), before);
    }

    #[test]
    fn test_not_doable_when_no_child_is() {
        let director = create_nqueens_director(&[0, 1]);
        let m = CompositeMove::new(vec![change(0, 0), change(1, 1)]);
        assert!(!m.is_doable(&director));
    }
}

mod either {
    use super::*;

    #[test]
    fn test_either_forwards() {
        let mut director = create_nqueens_director(&[0, 1, 2]);
        let moves: Vec<EitherMove<NQueensSolution, i64>> =
            vec![change(0, 2).into(), swap(1, 2).into()];

        for m in &moves {
            assert!(m.is_doable(&director));
            let undo = m.create_undo_move(&director);
            m.do_move(&mut director);
            undo.do_move(&mut director);
        }
        assert_eq!(
            director.working_solution().rows(),
            vec![Some(0), Some(1), Some(2)]
        );
        assert_ne!(moves[0], moves[1]);
    }
}

mod round_trip {
    use super::*;

    #[test]
    fn test_every_doable_move_round_trips() {
        let rows = [0, 2, 2, 1, 4];
        let mut director = create_nqueens_director(&rows);
        let before = director.calculate_score();
        let snapshot = director.working_solution().clone();

        let mut moves: Vec<EitherMove<NQueensSolution, i64>> = Vec::new();
        for entity in 0..rows.len() {
            for row in 0..rows.len() as i64 {
                moves.push(change(entity, row).into());
            }
            for other in (entity + 1)..rows.len() {
                moves.push(swap(entity, other).into());
            }
        }

        let doable: Vec<_> = moves
            .iter()
            .filter(|m| m.is_doable(&director))
            .cloned()
            .collect();
        assert!(!doable.is_empty());
        for m in &doable {
            let undo = m.create_undo_move(&director);
            m.do_move(&mut director);
            undo.do_move(&mut director);
            assert_eq!(director.calculate_score(), before, "after {:?}", m);
        }
        assert_eq!(director.working_solution().rows(), snapshot.rows());
        assert!(before < SimpleScore::of(0));
    }
}

mod arena {
    use super::*;

    #[test]
    fn test_take_and_reset() {
        let mut arena = MoveArena::with_capacity(4);
        arena.push(change(0, 1));
        arena.push(change(1, 2));
        assert_eq!(arena.len(), 2);

        assert_eq!(arena.take(0), Some(change(0, 1)));
        assert_eq!(arena.take(0), None);
        assert_eq!(arena.iter().count(), 1);

        arena.reset();
        assert!(arena.is_empty());
        assert_eq!(arena.get(1), None);
    }
}
