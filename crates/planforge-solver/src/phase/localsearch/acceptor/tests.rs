//! Tests for acceptors.

use planforge_core::{PlanforgeError, Result, SimpleScore};
use planforge_test::nqueens::{get_queen_row, set_queen_row, NQueensSolution};

use super::*;
use crate::heuristic::r#move::{ChangeMove, SwapMove};
use crate::heuristic::selector::ProblemSize;

type QueenChange = ChangeMove<NQueensSolution, i64>;

fn change(entity_index: usize, row: i64) -> QueenChange {
    ChangeMove::new(entity_index, Some(row), get_queen_row, set_queen_row, "row", 0)
}

fn candidate<'a, M>(
    step_index: u64,
    mov: &'a M,
    score: i64,
    solution: &'a NQueensSolution,
) -> MoveCandidate<'a, NQueensSolution, M> {
    MoveCandidate {
        step_index,
        mov,
        score: SimpleScore::of(score),
        last_step_score: SimpleScore::of(-10),
        best_score: SimpleScore::of(0),
        solution,
    }
}

fn outcome<'a, M>(
    step_index: u64,
    step: &'a M,
    undo_step: &'a M,
    score: i64,
    solution: &'a NQueensSolution,
) -> StepOutcome<'a, NQueensSolution, M> {
    StepOutcome {
        step_index,
        step,
        undo_step,
        score: SimpleScore::of(score),
        best_score: SimpleScore::of(0),
        solution,
    }
}

fn board() -> NQueensSolution {
    NQueensSolution::with_rows(&[0, 1, 2, 3])
}

mod hill_climbing {
    use super::*;

    #[test]
    fn test_accepts_improving_and_equal() {
        let solution = board();
        let mov = change(0, 1);
        let mut acceptor = HillClimbingAcceptor::new();

        assert!(Acceptor::<NQueensSolution, QueenChange>::is_accepted(
            &mut acceptor,
            &candidate(0, &mov, -5, &solution)
        ));
        assert!(Acceptor::<NQueensSolution, QueenChange>::is_accepted(
            &mut acceptor,
            &candidate(0, &mov, -10, &solution)
        ));
    }

    #[test]
    fn test_rejects_worsening() {
        let solution = board();
        let mov = change(0, 1);
        let mut acceptor: Box<dyn Acceptor<NQueensSolution, QueenChange>> =
            Box::new(HillClimbingAcceptor::new());

        assert!(!acceptor.is_accepted(&candidate(0, &mov, -11, &solution)));
    }
}

mod tabu {
    use super::*;

    type QueenMoveTabu = MoveTabuAcceptor<NQueensSolution, QueenChange>;

    #[test]
    fn test_tabu_decay_without_fading() {
        let solution = board();
        let tabu_move = change(0, 2);
        let other = change(1, 3);
        let mut acceptor: QueenMoveTabu =
            TabuAcceptor::new(MoveTabuKeys::new(UndoMovePolicy::TabuStep), 3);
        acceptor.phase_started(&SimpleScore::of(-10)).unwrap();

        assert!(acceptor.is_accepted(&candidate(0, &tabu_move, -10, &solution)));
        acceptor.step_ended(&outcome(0, &tabu_move, &tabu_move, -10, &solution));
        assert!(!acceptor.is_accepted(&candidate(0, &tabu_move, -10, &solution)));

        // Forbidden through step 2, free from step 3; `other` is never taken.
        let mut verdicts = Vec::new();
        for step_index in 1..=5 {
            verdicts.push((
                acceptor.is_accepted(&candidate(step_index, &tabu_move, -10, &solution)),
                acceptor.is_accepted(&candidate(step_index, &other, -10, &solution)),
            ));
            let taken = change(2 + step_index as usize % 2, step_index as i64);
            acceptor.step_ended(&outcome(step_index, &taken, &taken, -10, &solution));
        }
        assert_eq!(
            verdicts,
            [(false, true), (false, true), (true, true), (true, true), (true, true)]
        );
    }

    #[test]
    fn test_complete_window_ends_after_tabu_size_steps() {
        let solution = board();
        let tabu_move = change(0, 2);
        let mut acceptor: QueenMoveTabu =
            TabuAcceptor::new(MoveTabuKeys::new(UndoMovePolicy::TabuStep), 3)
                .with_aspiration(false);
        acceptor.phase_started(&SimpleScore::of(0)).unwrap();
        acceptor.step_ended(&outcome(0, &tabu_move, &tabu_move, -1, &solution));

        let verdicts: Vec<bool> = (0..=4)
            .map(|step_index| {
                acceptor.is_accepted(&candidate(step_index, &tabu_move, -1, &solution))
            })
            .collect();
        assert_eq!(verdicts, [false, false, false, true, true]);
    }

    #[test]
    fn test_value_tabu_size_two() {
        let solution = board();
        let v: Vec<QueenChange> = (0..5).map(|row| change(0, row)).collect();
        let mut acceptor: ValueTabuAcceptor<NQueensSolution, QueenChange> =
            TabuAcceptor::new(ValueTabuKeys, 2);
        acceptor.phase_started(&SimpleScore::of(0)).unwrap();

        // (step, taken value, expected verdicts for v0..v4 before the step ends)
        let script: [(u64, usize, [bool; 5]); 5] = [
            (0, 1, [true, true, true, true, true]),
            (1, 2, [true, false, true, true, true]),
            (2, 4, [true, true, false, true, true]),
            (3, 3, [true, true, true, true, false]),
            (4, 1, [true, true, true, false, true]),
        ];
        for (step_index, taken, expected) in script {
            for (value, &verdict) in expected.iter().enumerate() {
                let offered = candidate(step_index, &v[value], -1, &solution);
                assert_eq!(
                    acceptor.is_accepted(&offered),
                    verdict,
                    "step {step_index}, value {value}"
                );
            }
            // Asking again gives the same answer.
            let repeated = candidate(step_index, &v[2], -1, &solution);
            assert_eq!(acceptor.is_accepted(&repeated), expected[2]);

            acceptor.step_ended(&outcome(step_index, &v[taken], &v[taken], -1, &solution));
        }
    }

    #[test]
    fn test_entity_tabu_covers_every_entity_of_a_move() {
        type QueenSwap = SwapMove<NQueensSolution, i64>;
        let solution = board();
        let swap: QueenSwap = SwapMove::new(0, 2, get_queen_row, set_queen_row, "row", 0);
        let touches_2: QueenSwap = SwapMove::new(2, 3, get_queen_row, set_queen_row, "row", 0);
        let untouched: QueenSwap = SwapMove::new(1, 3, get_queen_row, set_queen_row, "row", 0);
        let mut acceptor: EntityTabuAcceptor<NQueensSolution, QueenSwap> =
            TabuAcceptor::new(EntityTabuKeys, 2);
        acceptor.phase_started(&SimpleScore::of(0)).unwrap();

        acceptor.step_ended(&outcome(0, &swap, &swap, -1, &solution));
        assert_eq!(acceptor.tabu_count(), 2);
        assert!(!acceptor.is_accepted(&candidate(1, &touches_2, -1, &solution)));
        assert!(acceptor.is_accepted(&candidate(1, &untouched, -1, &solution)));
    }

    #[test]
    fn test_fading_band_accept_chance() {
        let solution = board();
        let tabu_move = change(0, 2);
        let other = change(1, 3);
        let mut acceptor: QueenMoveTabu =
            TabuAcceptor::new(MoveTabuKeys::new(UndoMovePolicy::TabuStep), 1)
                .with_fading_tabu_size(3)
                .with_seed(7);
        acceptor.phase_started(&SimpleScore::of(0)).unwrap();
        acceptor.step_ended(&outcome(0, &tabu_move, &other, -1, &solution));

        let acceptance_rate = |acceptor: &mut QueenMoveTabu, step_index: u64| {
            let offered = candidate(step_index, &tabu_move, -1, &solution);
            let accepted = (0..4000).filter(|_| acceptor.is_accepted(&offered)).count();
            accepted as f64 / 4000.0
        };

        assert_eq!(acceptance_rate(&mut acceptor, 0), 0.0);
        let quarter = acceptance_rate(&mut acceptor, 1);
        let half = acceptance_rate(&mut acceptor, 2);
        let three_quarters = acceptance_rate(&mut acceptor, 3);
        assert!((quarter - 0.25).abs() < 0.05, "{quarter}");
        assert!((half - 0.5).abs() < 0.05, "{half}");
        assert!((three_quarters - 0.75).abs() < 0.05, "{three_quarters}");
        assert_eq!(acceptance_rate(&mut acceptor, 4), 1.0);

        for step_index in 1..=3 {
            acceptor.step_ended(&outcome(step_index, &other, &other, -1, &solution));
        }
        assert_eq!(acceptor.tabu_count(), 1);
        assert_eq!(acceptance_rate(&mut acceptor, 4), 1.0);
    }

    #[test]
    fn test_aspiration_accepts_new_best() {
        let solution = board();
        let tabu_move = change(0, 2);
        let mut acceptor: QueenMoveTabu =
            TabuAcceptor::new(MoveTabuKeys::new(UndoMovePolicy::TabuStep), 5);
        acceptor.phase_started(&SimpleScore::of(-10)).unwrap();
        acceptor.step_ended(&outcome(0, &tabu_move, &tabu_move, -1, &solution));

        assert!(!acceptor.is_accepted(&candidate(1, &tabu_move, 0, &solution)));
        assert!(acceptor.is_accepted(&candidate(1, &tabu_move, 1, &solution)));

        let mut strict: QueenMoveTabu =
            TabuAcceptor::new(MoveTabuKeys::new(UndoMovePolicy::TabuStep), 5)
                .with_aspiration(false);
        strict.phase_started(&SimpleScore::of(-10)).unwrap();
        strict.step_ended(&outcome(0, &tabu_move, &tabu_move, -1, &solution));
        assert!(!strict.is_accepted(&candidate(1, &tabu_move, 1, &solution)));
    }

    #[test]
    fn test_undo_move_policy() {
        let solution = board();
        let step = change(0, 3);
        let undo = change(0, 0);

        let mut undo_tabu: QueenMoveTabu = TabuAcceptor::new(MoveTabuKeys::default(), 2);
        undo_tabu.phase_started(&SimpleScore::of(0)).unwrap();
        undo_tabu.step_ended(&outcome(0, &step, &undo, -1, &solution));
        assert!(!undo_tabu.is_accepted(&candidate(1, &undo, -1, &solution)));
        assert!(undo_tabu.is_accepted(&candidate(1, &step, -1, &solution)));

        let mut step_tabu: QueenMoveTabu =
            TabuAcceptor::new(MoveTabuKeys::new(UndoMovePolicy::TabuStep), 2);
        step_tabu.phase_started(&SimpleScore::of(0)).unwrap();
        step_tabu.step_ended(&outcome(0, &step, &undo, -1, &solution));
        assert!(step_tabu.is_accepted(&candidate(1, &undo, -1, &solution)));
        assert!(!step_tabu.is_accepted(&candidate(1, &step, -1, &solution)));
    }

    #[test]
    fn test_solution_tabu_ignores_score_field() {
        let visited = board();
        let mut revisit = board();
        revisit.score = Some(SimpleScore::of(-3));
        let elsewhere = NQueensSolution::with_rows(&[1, 3, 0, 2]);
        let mov = change(0, 1);

        let mut acceptor: SolutionTabuAcceptor<NQueensSolution, QueenChange> =
            TabuAcceptor::new(SolutionTabuKeys::new(), 3);
        acceptor.phase_started(&SimpleScore::of(0)).unwrap();
        acceptor.step_ended(&outcome(0, &mov, &mov, -1, &visited));

        assert!(!acceptor.is_accepted(&candidate(1, &mov, -1, &revisit)));
        assert!(acceptor.is_accepted(&candidate(1, &mov, -1, &elsewhere)));
    }

    #[test]
    fn test_phase_lifecycle_clears_tabu() {
        let solution = board();
        let mov = change(0, 2);
        let mut acceptor: QueenMoveTabu = TabuAcceptor::new(MoveTabuKeys::default(), 4);
        acceptor.phase_started(&SimpleScore::of(0)).unwrap();
        acceptor.step_ended(&outcome(0, &mov, &mov, -1, &solution));
        assert_eq!(acceptor.tabu_count(), 1);

        acceptor.phase_ended();
        assert_eq!(acceptor.tabu_count(), 0);
    }

    #[test]
    fn test_zero_window_is_a_config_error() {
        let mut acceptor: EntityTabuAcceptor<NQueensSolution, QueenChange> =
            TabuAcceptor::new(EntityTabuKeys, 0);
        let result = acceptor.phase_started(&SimpleScore::of(0));
        assert!(matches!(result, Err(PlanforgeError::Config(_))));

        let mut fading_only: EntityTabuAcceptor<NQueensSolution, QueenChange> =
            TabuAcceptor::new(EntityTabuKeys, 0).with_fading_tabu_size(2);
        assert!(fading_only.phase_started(&SimpleScore::of(0)).is_ok());
    }
}

mod tabu_size {
    use super::*;

    fn size(entity_count: usize, value_count: usize) -> ProblemSize {
        ProblemSize {
            entity_count,
            value_count,
        }
    }

    #[test]
    fn test_resolve() {
        assert_eq!(TabuSizeStrategy::Fixed(5).resolve(size(100, 100)), 5);
        assert_eq!(TabuSizeStrategy::EntityRatio(0.1).resolve(size(40, 7)), 4);
        assert_eq!(TabuSizeStrategy::ValueRatio(0.5).resolve(size(40, 6)), 3);
        // At least one, but never every entity.
        assert_eq!(TabuSizeStrategy::EntityRatio(0.01).resolve(size(10, 0)), 1);
        assert_eq!(TabuSizeStrategy::EntityRatio(0.9).resolve(size(3, 0)), 2);
    }

    #[test]
    fn test_ratio_is_resolved_when_a_step_starts() {
        let mut acceptor: EntityTabuAcceptor<NQueensSolution, QueenChange> =
            TabuAcceptor::new(EntityTabuKeys, 0)
                .with_tabu_size_strategy(TabuSizeStrategy::EntityRatio(0.5));
        acceptor.phase_started(&SimpleScore::of(0)).unwrap();
        assert_eq!(acceptor.tabu_size(), 0);

        acceptor.step_started(size(8, 3));
        assert_eq!(acceptor.tabu_size(), 4);
        acceptor.step_started(size(4, 3));
        assert_eq!(acceptor.tabu_size(), 2);
    }

    #[test]
    fn test_ratio_out_of_range_is_a_config_error() {
        let mut acceptor: ValueTabuAcceptor<NQueensSolution, QueenChange> =
            TabuAcceptor::new(ValueTabuKeys, 0)
                .with_tabu_size_strategy(TabuSizeStrategy::ValueRatio(1.5));
        let result = acceptor.phase_started(&SimpleScore::of(0));
        assert!(matches!(result, Err(PlanforgeError::Config(_))));
    }
}

mod simulated_annealing {
    use super::*;

    type QueenAnnealing = SimulatedAnnealingAcceptor<NQueensSolution>;

    fn start(acceptor: &mut QueenAnnealing) -> Result<()> {
        Acceptor::<NQueensSolution, QueenChange>::phase_started(acceptor, &SimpleScore::of(-10))
    }

    fn accepts(acceptor: &mut QueenAnnealing, score: i64) -> bool {
        let solution = board();
        let mov = change(0, 1);
        Acceptor::<NQueensSolution, QueenChange>::is_accepted(
            acceptor,
            &candidate(0, &mov, score, &solution),
        )
    }

    fn take_step(acceptor: &mut QueenAnnealing) {
        let solution = board();
        let mov = change(0, 1);
        Acceptor::<NQueensSolution, QueenChange>::step_ended(
            acceptor,
            &outcome(0, &mov, &mov, -10, &solution),
        );
    }

    #[test]
    fn test_never_rejects_equal_or_better() {
        let mut acceptor = QueenAnnealing::new(vec![0.0], 0.9).with_seed(3);
        start(&mut acceptor).unwrap();
        for _ in 0..20 {
            assert!(accepts(&mut acceptor, -10));
            assert!(accepts(&mut acceptor, -4));
        }
    }

    #[test]
    fn test_temperature_controls_worsening_moves() {
        // A frozen search takes no worsening move at all.
        let mut frozen = QueenAnnealing::new(vec![0.0], 0.9).with_seed(3);
        start(&mut frozen).unwrap();
        assert!((0..50).all(|_| !accepts(&mut frozen, -11)));

        let mut hot = QueenAnnealing::new(vec![1.0e12], 0.9).with_seed(3);
        start(&mut hot).unwrap();
        assert!((0..50).all(|_| accepts(&mut hot, -11)));
    }

    #[test]
    fn test_cools_every_step_and_resets_per_phase() {
        let mut acceptor = QueenAnnealing::new(vec![4.0], 0.5);
        start(&mut acceptor).unwrap();
        take_step(&mut acceptor);
        assert_eq!(acceptor.temperatures(), &[2.0]);
        take_step(&mut acceptor);
        assert_eq!(acceptor.temperatures(), &[1.0]);

        Acceptor::<NQueensSolution, QueenChange>::phase_ended(&mut acceptor);
        assert_eq!(acceptor.temperatures(), &[4.0]);
    }

    #[test]
    fn test_invalid_settings_are_config_errors() {
        let wrong_levels = QueenAnnealing::new(vec![1.0, 1.0], 0.9);
        let negative = QueenAnnealing::new(vec![-1.0], 0.9);
        let bad_decay = QueenAnnealing::new(vec![1.0], 1.5);
        for mut acceptor in [wrong_levels, negative, bad_decay] {
            assert!(matches!(start(&mut acceptor), Err(PlanforgeError::Config(_))));
        }
    }
}

mod step_counting {
    use super::*;

    type QueenStepCounting = StepCountingHillClimbingAcceptor<NQueensSolution>;

    fn accepts(acceptor: &mut QueenStepCounting, score: i64, last_step_score: i64) -> bool {
        let solution = board();
        let mov = change(0, 1);
        Acceptor::<NQueensSolution, QueenChange>::is_accepted(
            acceptor,
            &MoveCandidate {
                step_index: 0,
                mov: &mov,
                score: SimpleScore::of(score),
                last_step_score: SimpleScore::of(last_step_score),
                best_score: SimpleScore::of(0),
                solution: &solution,
            },
        )
    }

    fn take_step(acceptor: &mut QueenStepCounting, score: i64) {
        let solution = board();
        let mov = change(0, 1);
        Acceptor::<NQueensSolution, QueenChange>::step_ended(
            acceptor,
            &outcome(0, &mov, &mov, score, &solution),
        );
    }

    fn start(acceptor: &mut QueenStepCounting, score: i64) -> Result<()> {
        Acceptor::<NQueensSolution, QueenChange>::phase_started(acceptor, &SimpleScore::of(score))
    }

    #[test]
    fn test_threshold_moves_every_limit_steps() {
        let mut acceptor = QueenStepCounting::new(2);
        start(&mut acceptor, -100).unwrap();
        assert_eq!(acceptor.threshold_score(), Some(SimpleScore::of(-100)));
        assert!(accepts(&mut acceptor, -95, -80));

        take_step(&mut acceptor, -80);
        assert_eq!(acceptor.threshold_score(), Some(SimpleScore::of(-100)));
        take_step(&mut acceptor, -90);
        assert_eq!(acceptor.threshold_score(), Some(SimpleScore::of(-90)));

        assert!(!accepts(&mut acceptor, -95, -80));
        assert!(accepts(&mut acceptor, -90, -80));
        assert!(accepts(&mut acceptor, -95, -95));
    }

    #[test]
    fn test_improving_step_counting_skips_worse_steps() {
        let mut acceptor =
            QueenStepCounting::new(1).with_counting_type(StepCountingType::ImprovingStep);
        start(&mut acceptor, -100).unwrap();

        take_step(&mut acceptor, -110);
        assert_eq!(acceptor.threshold_score(), Some(SimpleScore::of(-100)));
        take_step(&mut acceptor, -105);
        assert_eq!(acceptor.threshold_score(), Some(SimpleScore::of(-105)));
    }

    #[test]
    fn test_zero_limit_is_a_config_error() {
        let mut acceptor = QueenStepCounting::new(0);
        assert!(matches!(start(&mut acceptor, 0), Err(PlanforgeError::Config(_))));
    }
}

mod great_deluge {
    use super::*;

    type QueenDeluge = GreatDelugeAcceptor<NQueensSolution>;

    fn accepts(acceptor: &mut QueenDeluge, score: i64, last_step_score: i64) -> bool {
        let solution = board();
        let mov = change(0, 1);
        Acceptor::<NQueensSolution, QueenChange>::is_accepted(
            acceptor,
            &MoveCandidate {
                step_index: 0,
                mov: &mov,
                score: SimpleScore::of(score),
                last_step_score: SimpleScore::of(last_step_score),
                best_score: SimpleScore::of(0),
                solution: &solution,
            },
        )
    }

    fn start(acceptor: &mut QueenDeluge, score: i64) -> Result<()> {
        Acceptor::<NQueensSolution, QueenChange>::phase_started(acceptor, &SimpleScore::of(score))
    }

    #[test]
    fn test_water_level_rises_every_step() {
        let mut acceptor = QueenDeluge::new(0.25);
        start(&mut acceptor, -100).unwrap();
        assert_eq!(acceptor.water_level(), Some(SimpleScore::of(-100)));
        assert!(accepts(&mut acceptor, -100, -90));
        assert!(!accepts(&mut acceptor, -101, -90));

        let solution = board();
        let mov = change(0, 1);
        Acceptor::<NQueensSolution, QueenChange>::step_ended(
            &mut acceptor,
            &outcome(0, &mov, &mov, -90, &solution),
        );
        assert_eq!(acceptor.water_level(), Some(SimpleScore::of(-75)));
        assert!(!accepts(&mut acceptor, -80, -70));
        assert!(accepts(&mut acceptor, -75, -70));
        // Beating the last step is enough, even under water.
        assert!(accepts(&mut acceptor, -79, -80));
    }

    #[test]
    fn test_rain_speed_must_be_positive() {
        let mut acceptor = QueenDeluge::new(0.0);
        assert!(matches!(start(&mut acceptor, -10), Err(PlanforgeError::Config(_))));
        Acceptor::<NQueensSolution, QueenChange>::phase_ended(&mut acceptor);
        assert_eq!(acceptor.water_level(), None);
    }
}

mod late_acceptance {
    use super::*;

    type QueenLateAcceptance = LateAcceptanceAcceptor<NQueensSolution>;

    fn accepts(acceptor: &mut QueenLateAcceptance, step_index: u64, score: i64) -> bool {
        let solution = board();
        let mov = change(0, 1);
        Acceptor::<NQueensSolution, QueenChange>::is_accepted(
            acceptor,
            &candidate(step_index, &mov, score, &solution),
        )
    }

    fn take_step(acceptor: &mut QueenLateAcceptance, step_index: u64, score: i64) {
        let solution = board();
        let mov = change(0, 1);
        Acceptor::<NQueensSolution, QueenChange>::step_ended(
            acceptor,
            &outcome(step_index, &mov, &mov, score, &solution),
        );
    }

    #[test]
    fn test_compares_against_step_size_steps_ago() {
        let mut acceptor = QueenLateAcceptance::new(3);
        Acceptor::<NQueensSolution, QueenChange>::phase_started(
            &mut acceptor,
            &SimpleScore::of(-1000),
        )
        .unwrap();

        for step_index in 0..3 {
            assert!(accepts(&mut acceptor, step_index, -1000));
            assert!(!accepts(&mut acceptor, step_index, -1001));
            take_step(&mut acceptor, step_index, -1000);
        }

        // Step 3 wraps to the slot written by step 0.
        assert!(accepts(&mut acceptor, 3, -1000));
        take_step(&mut acceptor, 3, -500);

        // Step 4 still compares against step 1, not the best score.
        assert!(accepts(&mut acceptor, 4, -900));
        assert!(!accepts(&mut acceptor, 4, -1001));

        // Step 6 wraps onto the -500 written by step 3.
        take_step(&mut acceptor, 4, -900);
        take_step(&mut acceptor, 5, -900);
        assert!(!accepts(&mut acceptor, 6, -900));
        assert!(accepts(&mut acceptor, 6, -500));
    }

    #[test]
    fn test_records_taken_score_not_best() {
        let mut acceptor = QueenLateAcceptance::new(2);
        Acceptor::<NQueensSolution, QueenChange>::phase_started(
            &mut acceptor,
            &SimpleScore::of(-100),
        )
        .unwrap();

        take_step(&mut acceptor, 0, -150);
        take_step(&mut acceptor, 1, -50);
        assert!(accepts(&mut acceptor, 2, -140));
    }

    #[test]
    fn test_repeated_query_is_idempotent() {
        let mut acceptor = QueenLateAcceptance::new(4);
        Acceptor::<NQueensSolution, QueenChange>::phase_started(
            &mut acceptor,
            &SimpleScore::of(-20),
        )
        .unwrap();

        let first = accepts(&mut acceptor, 0, -21);
        for _ in 0..5 {
            assert_eq!(accepts(&mut acceptor, 0, -21), first);
            assert!(accepts(&mut acceptor, 0, -20));
        }
    }

    #[test]
    fn test_hill_climbing_option() {
        let mut acceptor = QueenLateAcceptance::new(1).with_hill_climbing(true);
        Acceptor::<NQueensSolution, QueenChange>::phase_started(
            &mut acceptor,
            &SimpleScore::of(0),
        )
        .unwrap();

        // Worse than the late score but not worse than the last step (-10).
        assert!(accepts(&mut acceptor, 0, -10));
        assert!(!accepts(&mut acceptor, 0, -11));

        let mut plain = QueenLateAcceptance::new(1);
        Acceptor::<NQueensSolution, QueenChange>::phase_started(&mut plain, &SimpleScore::of(0))
            .unwrap();
        assert!(!accepts(&mut plain, 0, -10));
    }

    #[test]
    fn test_zero_size_is_a_config_error() {
        let mut acceptor = QueenLateAcceptance::new(0);
        let result = Acceptor::<NQueensSolution, QueenChange>::phase_started(
            &mut acceptor,
            &SimpleScore::of(0),
        );
        assert!(matches!(result, Err(PlanforgeError::Config(_))));
        assert!(!accepts(&mut acceptor, 0, 0));
    }
}

mod composite {
    use super::*;

    #[test]
    fn test_all_children_must_accept() {
        let solution = board();
        let step = change(0, 2);
        let same_value_other_queen = change(1, 2);
        let other_value_same_queen = change(0, 3);
        let fresh = change(2, 0);

        let mut acceptor: CompositeAcceptor<NQueensSolution, QueenChange> =
            CompositeAcceptor::new(vec![
                Box::new(EntityTabuAcceptor::<NQueensSolution, QueenChange>::new(
                    EntityTabuKeys,
                    2,
                )),
                Box::new(ValueTabuAcceptor::<NQueensSolution, QueenChange>::new(
                    ValueTabuKeys,
                    2,
                )),
            ]);
        assert_eq!(acceptor.len(), 2);
        acceptor.phase_started(&SimpleScore::of(0)).unwrap();
        acceptor.step_ended(&outcome(0, &step, &step, -1, &solution));

        assert!(!acceptor.is_accepted(&candidate(1, &same_value_other_queen, -1, &solution)));
        assert!(!acceptor.is_accepted(&candidate(1, &other_value_same_queen, -1, &solution)));
        assert!(acceptor.is_accepted(&candidate(1, &fresh, -1, &solution)));
    }

    #[test]
    fn test_config_error_propagates() {
        let mut acceptor: CompositeAcceptor<NQueensSolution, QueenChange> =
            CompositeAcceptor::new(vec![
                Box::new(HillClimbingAcceptor::new()),
                Box::new(LateAcceptanceAcceptor::<NQueensSolution>::new(0)),
            ]);
        assert!(acceptor.phase_started(&SimpleScore::of(0)).is_err());
    }
}
