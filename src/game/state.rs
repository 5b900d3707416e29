use std::collections::{HashSet, VecDeque};

use super::direction::Direction;
use super::grid::Position;

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at the front
    body: VecDeque<Position>,
    /// Current direction of movement
    pub direction: Direction,
}

impl Snake {
    /// Create a new snake with given head position and direction.
    /// Extra segments trail behind the head, away from `direction`.
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let back = direction.opposite();
        let mut body = VecDeque::with_capacity(length.max(1));
        body.push_back(head);

        for _ in 1..length {
            let prev = body[body.len() - 1];
            body.push_back(prev.moved_in_direction(back));
        }

        Self { body, direction }
    }

    /// Build a snake from explicit segments, head first.
    ///
    /// Returns `None` when `segments` is empty.
    pub fn from_segments<I>(segments: I, direction: Direction) -> Option<Self>
    where
        I: IntoIterator<Item = Position>,
    {
        let body: VecDeque<Position> = segments.into_iter().collect();
        if body.is_empty() {
            return None;
        }
        Some(Self { body, direction })
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    pub fn segments(&self) -> impl Iterator<Item = Position> + '_ {
        self.body.iter().copied()
    }

    /// Check if any segment, head and tail included, sits on `pos`
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Set of cells covered by the body
    pub fn occupancy(&self) -> HashSet<Position> {
        self.body.iter().copied().collect()
    }

    /// Prepend a new head, keeping the tail (length grows by one)
    pub(crate) fn grow_to(&mut self, new_head: Position) {
        self.body.push_front(new_head);
    }

    /// Prepend a new head and drop the tail (length unchanged)
    pub(crate) fn slide_to(&mut self, new_head: Position) -> Option<Position> {
        self.body.push_front(new_head);
        self.body.pop_back()
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; a snake keeps at least its head
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snake_creation() {
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(5, 5));
        assert_eq!(
            snake.segments().collect::<Vec<_>>(),
            vec![Position::new(5, 5), Position::new(5, 4), Position::new(5, 3)]
        );
        assert_eq!(snake.tail(), Position::new(5, 3));
    }

    #[test]
    fn test_zero_length_still_has_head() {
        let snake = Snake::new(Position::new(2, 8), Direction::Left, 0);
        assert_eq!(snake.len(), 1);
        assert!(!snake.is_empty());
    }

    #[test]
    fn test_from_segments() {
        assert!(Snake::from_segments(Vec::new(), Direction::Up).is_none());

        let snake =
            Snake::from_segments([Position::new(2, 8), Position::new(2, 9)], Direction::Left)
                .unwrap();
        assert_eq!(snake.head(), Position::new(2, 8));
        assert_eq!(snake.tail(), Position::new(2, 9));
    }

    #[test]
    fn test_slide_and_grow() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right, 3);

        let dropped = snake.slide_to(Position::new(5, 6));
        assert_eq!(dropped, Some(Position::new(5, 3)));
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(5, 6));

        snake.grow_to(Position::new(5, 7));
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.tail(), Position::new(5, 4));
    }

    #[test]
    fn test_occupancy() {
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        assert!(snake.occupies(Position::new(5, 5)));
        assert!(snake.occupies(Position::new(5, 3)));
        assert!(!snake.occupies(Position::new(9, 9)));
        assert_eq!(snake.occupancy().len(), 3);
    }
}
