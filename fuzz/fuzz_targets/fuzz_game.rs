#![no_main]

//! Full game fuzzer.
//!
//! Drives the move pipeline with an arbitrary seed, rule set and input
//! sequence, checking grid invariants after every input and that a replay
//! of the inputs lands on the same state.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tilemerge::game::check_invariants;
use tilemerge::replay::{Recording, ReplayEngine};
use tilemerge::{Direction, GameConfig, GameState, MoveOutcome, Rules, SeededRng};

#[derive(Arbitrary, Debug, Clone, Copy)]
enum FuzzDirection {
    Up,
    Down,
    Left,
    Right,
}

impl From<FuzzDirection> for Direction {
    fn from(d: FuzzDirection) -> Self {
        match d {
            FuzzDirection::Up => Direction::Up,
            FuzzDirection::Down => Direction::Down,
            FuzzDirection::Left => Direction::Left,
            FuzzDirection::Right => Direction::Right,
        }
    }
}

#[derive(Arbitrary, Debug)]
struct FuzzGame {
    seed: u64,
    classic: bool,
    inputs: Vec<FuzzDirection>,
}

fuzz_target!(|game: FuzzGame| {
    let config = GameConfig {
        rules: if game.classic { Rules::Classic } else { Rules::Standard },
        ..GameConfig::default()
    };
    let mut rng = SeededRng::new(game.seed);
    let mut state = GameState::new(&config);
    let moves: Vec<Direction> = game.inputs.iter().take(2000).map(|&d| d.into()).collect();

    for &direction in &moves {
        let before = state;
        let turn = state.advance(direction, &config, &mut rng);
        state = turn.state;

        let violations = check_invariants(&state.grid);
        assert!(violations.is_empty(), "{violations:?}");
        assert!(state.score >= before.score);

        match turn.outcome {
            MoveOutcome::Ignored => {
                assert!(before.is_finished());
                assert_eq!(state, before);
            }
            MoveOutcome::Unchanged => assert_eq!(state.grid, before.grid),
            MoveOutcome::Moved { gained, .. } => {
                assert_eq!(state.score, before.score + gained);
                assert_eq!(state.moves, before.moves + 1);
            }
        }
    }

    let len = moves.len();
    let engine = ReplayEngine::new_at_move(Recording::with_moves(game.seed, config, moves), len)
        .expect("target is the recording length");
    assert_eq!(engine.state(), &state);
});
