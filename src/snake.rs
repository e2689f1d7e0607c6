use crate::Coords;
use Direction::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub fn is_opposite(&self, other: Direction) -> bool {
        matches!((self, other), (Up, Down) | (Down, Up) | (Left, Right) | (Right, Left))
    }

    /// The cell one step away from `pos` in this direction.
    pub fn advance(&self, pos: Coords) -> Coords {
        match self {
            Up => (pos.0, pos.1 - 1),
            Down => (pos.0, pos.1 + 1),
            Left => (pos.0 - 1, pos.1),
            Right => (pos.0 + 1, pos.1),
        }
    }
}

/// Segment chain of the player, head first. Never empty.
#[derive(Clone, Debug)]
pub struct Player {
    body: Vec<Coords>,
}

impl Player {
    pub fn new(head: Coords) -> Self {
        Player { body: vec![head] }
    }

    #[cfg(test)]
    pub fn from_segments(body: Vec<Coords>) -> Self {
        assert!(!body.is_empty());
        Player { body }
    }

    pub fn body(&self) -> &[Coords] {
        &self.body
    }

    pub fn head(&self) -> Coords {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Moves every segment into its predecessor's old cell, tail first,
    /// then moves the head one cell towards `direction`.
    pub fn step(&mut self, direction: Direction) {
        for i in (1..self.body.len()).rev() {
            self.body[i] = self.body[i - 1];
        }

        self.body[0] = direction.advance(self.body[0]);
    }

    /// Grows by one segment placed ahead of the current head.
    pub fn grow(&mut self, direction: Direction) {
        let new_head = direction.advance(self.head());
        self.body.insert(0, new_head);
    }

    pub fn is_head(&self, pos: Coords) -> bool {
        self.head() == pos
    }

    pub fn is_tail(&self, pos: Coords) -> bool {
        self.body()[1..].contains(&pos)
    }

    pub fn occupies(&self, pos: Coords) -> bool {
        self.body.contains(&pos)
    }

    pub fn hit_itself(&self) -> bool {
        self.is_tail(self.head())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposites() {
        assert!(Left.is_opposite(Right));
        assert!(Right.is_opposite(Left));
        assert!(Up.is_opposite(Down));
        assert!(Down.is_opposite(Up));
        assert!(!Left.is_opposite(Up));
        assert!(!Left.is_opposite(Left));
    }

    #[test]
    fn advance_moves_one_cell() {
        assert_eq!(Left.advance((5, 5)), (4, 5));
        assert_eq!(Right.advance((5, 5)), (6, 5));
        assert_eq!(Up.advance((5, 5)), (5, 4));
        assert_eq!(Down.advance((5, 5)), (5, 6));
    }

    #[test]
    fn step_follows_the_leader() {
        let mut player = Player::from_segments(vec![(5, 5), (6, 5), (7, 5)]);
        player.step(Up);
        assert_eq!(player.body(), &[(5, 4), (5, 5), (6, 5)]);
    }

    #[test]
    fn grow_prepends_ahead_of_head() {
        let mut player = Player::new((10, 10));
        player.grow(Left);
        assert_eq!(player.body(), &[(9, 10), (10, 10)]);
        assert_eq!(player.len(), 2);
    }

    #[test]
    fn head_is_not_tail() {
        let player = Player::from_segments(vec![(3, 3), (4, 3)]);
        assert!(player.is_head((3, 3)));
        assert!(!player.is_tail((3, 3)));
        assert!(player.is_tail((4, 3)));
        assert!(player.occupies((4, 3)));
        assert!(!player.hit_itself());
    }

    #[test]
    fn detects_self_hit() {
        let player = Player::from_segments(vec![(3, 3), (4, 3), (4, 4), (3, 4), (3, 3)]);
        assert!(player.hit_itself());
    }
}
