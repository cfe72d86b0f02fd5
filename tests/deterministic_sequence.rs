use snake_arcade::config::GameConfig;
use snake_arcade::difficulty::Difficulty;
use snake_arcade::game::{Control, EndReason, GameState, GameStatus, StepOutcome};
use snake_arcade::input::{Direction, GameInput};
use snake_arcade::snake::{Position, Snake};

fn snake(cells: &[(i32, i32)], direction: Direction) -> Snake {
    Snake::from_segments(
        cells.iter().map(|&(x, y)| Position::new(x, y)).collect(),
        direction,
    )
}

fn cells(state: &GameState) -> Vec<Position> {
    state.snake().segments().copied().collect()
}

#[test]
fn eating_on_a_five_by_five_board() {
    let mut config = GameConfig::with_grid(5, 5);
    config.difficulty = Difficulty::Easy;
    let mut state = GameState::new_with_seed(config, 42)
        .expect("valid config")
        .with_layout(
            snake(&[(2, 2), (1, 2), (0, 2)], Direction::Right),
            Position::new(3, 2),
        )
        .expect("valid layout");

    assert_eq!(state.step(), StepOutcome::Ate);

    assert_eq!(
        cells(&state)[..3],
        [
            Position::new(3, 2),
            Position::new(2, 2),
            Position::new(1, 2)
        ]
    );
    assert_eq!(state.snake().len(), 4);
    assert_eq!(state.score(), 10);
    assert_eq!(state.status(), GameStatus::Running);
    let food = state.food().expect("board has room");
    assert!(!state.snake().occupies(food));
}

#[test]
fn left_wall_ends_the_round() {
    let mut state = GameState::new_with_seed(GameConfig::with_grid(5, 5), 1)
        .expect("valid config")
        .with_layout(
            snake(&[(1, 2), (2, 2), (3, 2)], Direction::Left),
            Position::new(0, 2),
        )
        .expect("valid layout");

    assert_eq!(state.step(), StepOutcome::Ate);
    assert_eq!(state.score(), 20);

    assert_eq!(state.step(), StepOutcome::Ended(EndReason::Wall));
    assert_eq!(state.status(), GameStatus::Over);
    assert_eq!(state.score(), 20);
    assert_eq!(state.high_score(), 20);
}

#[test]
fn reversal_guard_blocks_the_only_instant_self_collision() {
    let mut state = GameState::new_with_seed(GameConfig::with_grid(6, 6), 2)
        .expect("valid config")
        .with_layout(
            snake(&[(2, 2), (3, 2), (4, 2), (4, 1)], Direction::Left),
            Position::new(0, 5),
        )
        .expect("valid layout");

    // Right would turn straight back into (3, 2).
    assert_eq!(
        state.handle_input(GameInput::Direction(Direction::Right)),
        Control::Continue
    );
    assert_eq!(state.snake().pending_direction(), Direction::Left);

    assert_eq!(state.step(), StepOutcome::Moved);
    assert_eq!(state.snake().head(), Position::new(1, 2));
    assert_eq!(state.status(), GameStatus::Running);
}

#[test]
fn full_session_with_pause_restart_and_difficulty() {
    let mut state = GameState::new_with_seed(GameConfig::with_grid(6, 4), 7)
        .expect("valid config")
        .with_layout(snake(&[(1, 1)], Direction::Right), Position::new(2, 1))
        .expect("valid layout");

    state.step();
    assert_eq!(state.score(), 20);
    assert_eq!(state.snake().len(), 2);
    let grown = state.snake().clone();
    state = state
        .with_layout(grown, Position::new(5, 3))
        .expect("food away from the grown snake");

    state.handle_input(GameInput::TogglePause);
    state.handle_input(GameInput::Direction(Direction::Up));
    assert_eq!(state.step(), StepOutcome::Idle);
    assert_eq!(state.snake().head(), Position::new(2, 1));

    state.handle_input(GameInput::SetDifficulty(Difficulty::Hard));
    assert_eq!(state.tick_rate(), 18);

    state.handle_input(GameInput::TogglePause);
    state.handle_input(GameInput::Direction(Direction::Up));
    state.step();
    assert_eq!(state.snake().head(), Position::new(2, 0));

    assert_eq!(state.step(), StepOutcome::Ended(EndReason::Wall));
    assert_eq!(state.high_score(), 20);

    // Direction input is dropped after game over; restart is not.
    state.handle_input(GameInput::Direction(Direction::Down));
    state.handle_input(GameInput::Restart);
    let snapshot = state.snapshot();
    assert_eq!(snapshot.status, GameStatus::Running);
    assert_eq!(snapshot.score, 0);
    assert_eq!(snapshot.high_score, 20);
    assert_eq!(snapshot.difficulty, Difficulty::Hard);
    assert_eq!(snapshot.snake.len(), 3);
    assert_eq!(snapshot.direction, Direction::Right);
}

#[test]
fn same_seed_replays_identically() {
    let turns = [
        Direction::Down,
        Direction::Left,
        Direction::Up,
        Direction::Right,
    ];
    let play = |seed: u64| {
        let mut state =
            GameState::new_with_seed(GameConfig::with_grid(12, 12), seed).expect("valid config");
        let mut foods = Vec::new();
        for tick in 0..60 {
            state.apply_input(turns[(tick / 4) % turns.len()]);
            state.step();
            foods.push(state.food());
        }
        (foods, state.snapshot())
    };

    assert_eq!(play(5), play(5));
}
