use std::collections::{HashSet, VecDeque};

use crate::config::GridSize;
use crate::input::{Direction, direction_change_is_valid};

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns true when the position lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(bounds.width)
            && self.y < i32::from(bounds.height)
    }

    /// Returns the neighbouring cell one unit along `direction`.
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Snake body plus its active and pending heading.
///
/// Segments live in a deque (front is head) mirrored by a set so that
/// occupancy checks stay O(1) on large boards.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Position>,
    occupied: HashSet<Position>,
    direction: Direction,
    pending_direction: Direction,
}

impl Snake {
    /// Creates a straight snake of `length` cells with its head at `head`,
    /// the body trailing away from `direction`.
    #[must_use]
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let behind = direction.opposite();
        let mut segments = Vec::with_capacity(length.max(1));
        let mut cursor = head;
        for _ in 0..length.max(1) {
            segments.push(cursor);
            cursor = cursor.step(behind);
        }

        Self::from_segments(segments, direction)
    }

    /// Creates a snake from explicit body segments (front is head).
    ///
    /// Repeated cells are dropped so the occupancy mirror stays in sync. No
    /// shape checks happen here; `GameState::with_layout` rejects empty or
    /// disconnected bodies before they reach a running game.
    #[must_use]
    pub fn from_segments(segments: Vec<Position>, direction: Direction) -> Self {
        let mut body = VecDeque::with_capacity(segments.len());
        let mut occupied = HashSet::with_capacity(segments.len());
        for segment in segments {
            if occupied.insert(segment) {
                body.push_back(segment);
            }
        }

        Self {
            body,
            occupied,
            direction,
            pending_direction: direction,
        }
    }

    /// Records a turn for the next tick, rejecting reversals of the active
    /// direction. Returns whether the request was accepted.
    pub fn buffer_direction(&mut self, direction: Direction) -> bool {
        if !direction_change_is_valid(self.direction, direction) {
            return false;
        }
        self.pending_direction = direction;
        true
    }

    /// Promotes the pending direction and returns the cell the head moves to.
    pub fn commit_direction(&mut self) -> Position {
        self.direction = self.pending_direction;
        self.next_head_position()
    }

    /// Returns the head position for the next movement tick.
    #[must_use]
    pub fn next_head_position(&self) -> Position {
        self.head().step(self.pending_direction)
    }

    /// Prepends a new head segment.
    pub fn push_head(&mut self, position: Position) {
        self.occupied.insert(position);
        self.body.push_front(position);
    }

    /// Removes the tail segment, never shrinking below one cell.
    pub fn pop_tail(&mut self) -> Option<Position> {
        if self.body.len() <= 1 {
            return None;
        }
        let tail = self.body.pop_back()?;
        self.occupied.remove(&tail);
        Some(tail)
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        self.body.front().copied().unwrap_or(Position { x: 0, y: 0 })
    }

    /// Returns the current tail position.
    #[must_use]
    pub fn tail(&self) -> Position {
        self.body.back().copied().unwrap_or_else(|| self.head())
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.occupied.contains(&position)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Returns the direction used by the last movement tick.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns the direction the next tick will use.
    #[must_use]
    pub fn pending_direction(&self) -> Direction {
        self.pending_direction
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::config::GridSize;
    use crate::input::Direction;

    use super::{Position, Snake};

    #[test]
    fn new_snake_trails_behind_its_heading() {
        let snake = Snake::new(Position::new(15, 10), Direction::Right, 3);
        let cells: Vec<Position> = snake.segments().copied().collect();

        assert_eq!(
            cells,
            vec![
                Position::new(15, 10),
                Position::new(14, 10),
                Position::new(13, 10),
            ]
        );
        assert_eq!(snake.tail(), Position::new(13, 10));
    }

    #[test]
    fn bounds_check_covers_every_edge() {
        let bounds = GridSize {
            width: 5,
            height: 4,
        };

        assert!(Position::new(0, 0).is_within_bounds(bounds));
        assert!(Position::new(4, 3).is_within_bounds(bounds));
        assert!(!Position::new(-1, 0).is_within_bounds(bounds));
        assert!(!Position::new(5, 0).is_within_bounds(bounds));
        assert!(!Position::new(0, 4).is_within_bounds(bounds));
    }

    #[test]
    fn direction_buffer_rejects_reverse() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Up, 3);

        assert!(!snake.buffer_direction(Direction::Down));
        assert_eq!(snake.pending_direction(), Direction::Up);
        assert_eq!(snake.commit_direction(), Position::new(5, 4));
    }

    #[test]
    fn latest_accepted_turn_wins() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right, 3);

        assert!(snake.buffer_direction(Direction::Up));
        assert!(snake.buffer_direction(Direction::Down));
        // Still compared against the active heading, so Left stays illegal.
        assert!(!snake.buffer_direction(Direction::Left));

        assert_eq!(snake.commit_direction(), Position::new(5, 6));
        assert_eq!(snake.direction(), Direction::Down);
    }

    #[test]
    fn occupancy_tracks_head_and_tail_changes() {
        let mut snake = Snake::new(Position::new(2, 2), Direction::Right, 2);

        snake.push_head(Position::new(3, 2));
        assert!(snake.occupies(Position::new(3, 2)));

        assert_eq!(snake.pop_tail(), Some(Position::new(1, 2)));
        assert!(!snake.occupies(Position::new(1, 2)));
        assert_eq!(snake.len(), 2);
    }

    #[test]
    fn pop_tail_keeps_last_segment() {
        let mut snake = Snake::new(Position::new(0, 0), Direction::Down, 1);

        assert_eq!(snake.pop_tail(), None);
        assert_eq!(snake.len(), 1);
    }

    #[test]
    fn duplicate_segments_are_collapsed() {
        let snake = Snake::from_segments(
            vec![Position::new(1, 1), Position::new(1, 1), Position::new(2, 1)],
            Direction::Left,
        );

        assert_eq!(snake.len(), 2);
    }
}
