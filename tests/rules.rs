use std::collections::HashSet;

use grid_snake::{
    Cell, Direction, GameConfig, GameOverReason, GameState, GameStatus, Heading, Input, Snake,
};

fn game_at(head: Cell, body: &[Cell], heading: Heading, food: Cell) -> GameState {
    let snake = Snake::from_cells(head, body.iter().copied(), heading);
    GameState::from_layout(GameConfig::default(), snake, food, 3).unwrap()
}

fn cells(game: &GameState) -> Vec<Cell> {
    game.occupied().collect()
}

#[test]
fn first_food_scenario() {
    let mut game = game_at(Cell::new(0, 0), &[], Heading::PosX, Cell::new(2, 0));

    let out = game.tick();
    assert_eq!(game.head(), Cell::new(1, 0));
    assert_eq!(out.status, GameStatus::Running);
    assert_eq!(out.score, 0);
    assert!(!out.ate_food);

    let out = game.tick();
    assert!(out.ate_food);
    assert_eq!(out.score, 1);
    assert_eq!(cells(&game), vec![Cell::new(2, 0), Cell::new(1, 0)]);
    let food = game.food().unwrap();
    assert!(food != Cell::new(2, 0) && food != Cell::new(1, 0));
}

#[test]
fn wall_is_hit_on_the_exact_tick() {
    // Max coordinate on a 12-wide field is 5.
    let mut game = game_at(Cell::new(3, 0), &[], Heading::PosX, Cell::new(-5, -5));
    assert_eq!(game.tick().status, GameStatus::Running);
    assert_eq!(game.tick().status, GameStatus::Running);
    assert_eq!(game.head(), Cell::new(5, 0));
    assert_eq!(
        game.tick().status,
        GameStatus::GameOver(GameOverReason::OutOfBounds)
    );
    assert_eq!(game.head(), Cell::new(5, 0));
}

#[test]
fn lower_edge_is_also_a_wall() {
    let mut game = game_at(Cell::new(0, -6), &[], Heading::NegZ, Cell::new(3, 3));
    assert_eq!(
        game.tick().status,
        GameStatus::GameOver(GameOverReason::OutOfBounds)
    );
}

#[test]
fn turning_into_own_body_ends_the_game() {
    // Coiled snake: head came up from (1, 1); turning left lands on (0, 0).
    let body = [Cell::new(1, 1), Cell::new(0, 1), Cell::new(0, 0), Cell::new(-1, 0)];
    let mut game = game_at(Cell::new(1, 0), &body, Heading::NegZ, Cell::new(4, 4));
    let before = cells(&game);

    assert!(game.queue_direction(Direction::Left));
    let out = game.tick();
    assert_eq!(out.status, GameStatus::GameOver(GameOverReason::SelfCollision));
    assert_eq!(out.score, 4);
    assert_eq!(cells(&game), before, "losing tick must not move the snake");
}

#[test]
fn reversal_requests_do_not_change_heading() {
    let body = [Cell::new(-1, 0), Cell::new(-2, 0)];
    let mut game = game_at(Cell::new(0, 0), &body, Heading::PosX, Cell::new(4, 4));
    assert!(!game.queue_direction(Direction::Left));
    assert_eq!(game.snake().heading(), Some(Heading::PosX));
    game.tick();
    assert_eq!(game.head(), Cell::new(1, 0));
    assert_eq!(game.status(), GameStatus::Running);
}

#[test]
fn last_direction_before_a_tick_wins() {
    let mut game = game_at(Cell::new(0, 0), &[Cell::new(-1, 0)], Heading::PosX, Cell::new(4, 4));
    game.handle(Input::Direction(Direction::Up));
    game.handle(Input::Direction(Direction::Right));
    game.handle(Input::Tick);
    assert_eq!(game.head(), Cell::new(1, 0));

    game.handle(Input::Direction(Direction::Up));
    // Reverses the last step, so Up stands.
    game.handle(Input::Direction(Direction::Left));
    game.handle(Input::Tick);
    assert_eq!(game.head(), Cell::new(1, -1));
}

#[test]
fn length_only_changes_when_eating() {
    let cfg = GameConfig {
        start_heading: Some(Heading::PosX),
        ..GameConfig::default()
    };
    let mut game = GameState::with_seed(cfg, 2024).unwrap();
    let turns = [Direction::Down, Direction::Left, Direction::Up, Direction::Right];

    for step in 0..400 {
        if game.status().is_terminal() {
            game.handle(Input::Reset);
        }
        if step % 3 == 0 {
            game.queue_direction(turns[(step / 3) % turns.len()]);
        }
        let len_before = game.occupied().count();
        let out = game.tick();
        let len_after = game.occupied().count();

        if out.ate_food {
            assert_eq!(len_after, len_before + 1);
        } else {
            assert_eq!(len_after, len_before);
        }
        assert_eq!(out.score as usize, len_after - 1);

        let occupied: HashSet<Cell> = game.occupied().collect();
        assert_eq!(occupied.len(), len_after, "snake cells are distinct");
        if let Some(food) = game.food() {
            assert!(!occupied.contains(&food));
            assert!(game.grid().is_valid(food));
        }
    }
}

#[test]
fn reset_twice_gives_a_fresh_game() {
    let mut game = game_at(
        Cell::new(0, 0),
        &[Cell::new(-1, 0), Cell::new(-2, 0)],
        Heading::PosX,
        Cell::new(4, 4),
    );
    for _ in 0..2 {
        let out = game.handle(Input::Reset);
        assert_eq!(out.status, GameStatus::Running);
        assert_eq!(out.score, 0);
        assert_eq!(game.occupied().count(), 1);
        assert!(game.grid().is_valid(game.head()));
        assert_ne!(game.food(), Some(game.head()));
        assert_eq!(game.snake().heading(), None);
    }
}

#[test]
fn config_errors_surface_at_construction() {
    let cfg = GameConfig {
        cell_size: -1.0,
        ..GameConfig::default()
    };
    assert!(GameState::with_seed(cfg, 0).is_err());
}
