use super::{
    direction::Direction,
    food::FoodPlacer,
    grid::{GridSpec, Position},
    state::{CollisionType, Snake},
};

/// Result of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The snake moved one cell; `scored` is set when it ate the food
    Continue { scored: bool },
    /// The new head left the grid or hit the body. Snake and food are untouched.
    Collided(CollisionType),
    /// The snake ate the last food and covers every cell
    BoardFilled,
}

impl TickOutcome {
    /// Whether this outcome ends the session
    pub fn is_terminal(&self) -> bool {
        !matches!(self, TickOutcome::Continue { .. })
    }

    /// Whether food was eaten this tick
    pub fn scored(&self) -> bool {
        matches!(
            self,
            TickOutcome::Continue { scored: true } | TickOutcome::BoardFilled
        )
    }
}

/// Advances the snake one cell per tick and replaces eaten food
pub struct TickEngine {
    placer: FoodPlacer,
}

impl TickEngine {
    pub fn new(placer: FoodPlacer) -> Self {
        Self { placer }
    }

    /// Place food anywhere the snake is not
    pub fn spawn_food(&mut self, grid: &GridSpec, snake: &Snake) -> Option<Position> {
        self.placer.place(grid, &snake.occupancy())
    }

    /// Execute one step of the game
    pub fn tick(
        &mut self,
        grid: &GridSpec,
        snake: &mut Snake,
        food: &mut Position,
        heading: Direction,
    ) -> TickOutcome {
        let new_head = snake.head().moved_in_direction(heading);

        if let Some(collision) = check_collision(grid, snake, new_head) {
            return TickOutcome::Collided(collision);
        }

        snake.direction = heading;

        if new_head != *food {
            snake.slide_to(new_head);
            return TickOutcome::Continue { scored: false };
        }

        snake.grow_to(new_head);
        match self.spawn_food(grid, snake) {
            Some(next) => {
                *food = next;
                TickOutcome::Continue { scored: true }
            }
            None => TickOutcome::BoardFilled,
        }
    }
}

impl Default for TickEngine {
    fn default() -> Self {
        Self::new(FoodPlacer::new())
    }
}

/// Wall first, then body. Evaluated against the snake before it moves, so the
/// tail cell counts as occupied.
fn check_collision(grid: &GridSpec, snake: &Snake, pos: Position) -> Option<CollisionType> {
    if !grid.contains(pos) {
        return Some(CollisionType::Wall);
    }

    if snake.occupies(pos) {
        return Some(CollisionType::SelfCollision);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> TickEngine {
        TickEngine::new(FoodPlacer::seeded(3))
    }

    fn grid() -> GridSpec {
        GridSpec::new(10, 10).unwrap()
    }

    #[test]
    fn test_basic_movement() {
        let mut engine = engine();
        let mut snake = Snake::new(Position::new(2, 8), Direction::Left, 1);
        let mut food = Position::new(7, 7);

        let outcome = engine.tick(&grid(), &mut snake, &mut food, Direction::Left);

        assert_eq!(outcome, TickOutcome::Continue { scored: false });
        assert_eq!(snake.segments().collect::<Vec<_>>(), vec![Position::new(2, 7)]);
        assert_eq!(food, Position::new(7, 7));
    }

    #[test]
    fn test_food_consumption() {
        let mut engine = engine();
        let mut snake =
            Snake::from_segments([Position::new(2, 8), Position::new(2, 9)], Direction::Left)
                .unwrap();
        let mut food = Position::new(2, 7);

        let outcome = engine.tick(&grid(), &mut snake, &mut food, Direction::Left);

        assert_eq!(outcome, TickOutcome::Continue { scored: true });
        assert_eq!(
            snake.segments().collect::<Vec<_>>(),
            vec![Position::new(2, 7), Position::new(2, 8), Position::new(2, 9)]
        );
        assert!(!snake.occupies(food));
        assert!(grid().contains(food));
    }

    #[test]
    fn test_wall_collision() {
        let mut engine = engine();
        let mut snake = Snake::new(Position::new(0, 0), Direction::Up, 1);
        let mut food = Position::new(5, 5);
        let before = snake.clone();

        let outcome = engine.tick(&grid(), &mut snake, &mut food, Direction::Up);

        assert_eq!(outcome, TickOutcome::Collided(CollisionType::Wall));
        assert!(outcome.is_terminal());
        assert_eq!(snake, before);
    }

    #[test]
    fn test_self_collision() {
        let mut engine = engine();
        // Head at (5,5) going Right, body trailing to the left
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right, 5);
        let mut food = Position::new(9, 9);

        engine.tick(&grid(), &mut snake, &mut food, Direction::Down);
        engine.tick(&grid(), &mut snake, &mut food, Direction::Left);
        let outcome = engine.tick(&grid(), &mut snake, &mut food, Direction::Up);

        assert_eq!(outcome, TickOutcome::Collided(CollisionType::SelfCollision));
    }

    #[test]
    fn test_moving_into_tail_cell_collides() {
        let mut engine = engine();
        // 2x2 loop: head (0,0), then (0,1), (1,1), tail (1,0)
        let mut snake = Snake::from_segments(
            [
                Position::new(0, 0),
                Position::new(0, 1),
                Position::new(1, 1),
                Position::new(1, 0),
            ],
            Direction::Left,
        )
        .unwrap();
        let mut food = Position::new(5, 5);

        let outcome = engine.tick(&grid(), &mut snake, &mut food, Direction::Down);

        assert_eq!(outcome, TickOutcome::Collided(CollisionType::SelfCollision));
    }

    #[test]
    fn test_board_filled() {
        let grid = GridSpec::new(1, 3).unwrap();
        let mut engine = engine();
        let mut snake =
            Snake::from_segments([Position::new(0, 1), Position::new(0, 2)], Direction::Left)
                .unwrap();
        let mut food = Position::new(0, 0);

        let outcome = engine.tick(&grid, &mut snake, &mut food, Direction::Left);

        assert_eq!(outcome, TickOutcome::BoardFilled);
        assert!(outcome.scored());
        assert_eq!(snake.len(), 3);
    }

    #[test]
    fn test_heading_recorded_on_snake() {
        let mut engine = engine();
        let mut snake = Snake::new(Position::new(5, 5), Direction::Left, 1);
        let mut food = Position::new(0, 0);

        engine.tick(&grid(), &mut snake, &mut food, Direction::Down);

        assert_eq!(snake.direction, Direction::Down);
        assert_eq!(snake.head(), Position::new(6, 5));
    }
}
