//! Player seats and per-seat data.
//!
//! ## PlayerId
//!
//! A 0-based seat index. Seat 0 always moves first; turns advance
//! round-robin with [`PlayerId::next`].
//!
//! ## PlayerMap
//!
//! One value per seat, backed by a `Vec` and indexable by `PlayerId`.
//! Used for per-player rule-set scratch data (scores, barrier stock, ...).

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Most seats a game may have.
pub const MAX_PLAYERS: usize = 255;

/// Player seat, 0-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Raw seat index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The seat that moves after this one.
    ///
    /// ```
    /// use board_rules::core::PlayerId;
    ///
    /// assert_eq!(PlayerId::new(0).next(3), PlayerId::new(1));
    /// assert_eq!(PlayerId::new(2).next(3), PlayerId::new(0));
    /// ```
    #[must_use]
    pub fn next(self, player_count: usize) -> Self {
        Self(((self.index() + 1) % player_count) as u8)
    }

    /// Check whether this seat exists in a game of `player_count` players.
    #[must_use]
    pub fn is_valid(self, player_count: usize) -> bool {
        self.index() < player_count
    }

    /// Iterate over every seat of a `player_count`-player game.
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Per-seat storage with O(1) access.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Build a map by calling `factory` once per seat.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= MAX_PLAYERS, "At most 255 players supported");

        let data = PlayerId::all(player_count).map(factory).collect();
        Self { data }
    }

    /// Build a map with `T::default()` for every seat.
    pub fn with_default(player_count: usize) -> Self
    where
        T: Default,
    {
        Self::new(player_count, |_| T::default())
    }

    /// Number of seats.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over `(PlayerId, &T)` pairs in seat order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_round_robin() {
        let mut seat = PlayerId::new(0);
        let mut seen = Vec::new();
        for _ in 0..5 {
            seen.push(seat.0);
            seat = seat.next(3);
        }
        assert_eq!(seen, vec![0, 1, 2, 0, 1]);
    }

    #[test]
    fn test_player_id_validity() {
        assert!(PlayerId::new(1).is_valid(2));
        assert!(!PlayerId::new(2).is_valid(2));
        assert_eq!(format!("{}", PlayerId::new(1)), "Player 1");
    }

    #[test]
    fn test_player_map_indexing() {
        let mut scores: PlayerMap<i64> = PlayerMap::new(3, |p| p.index() as i64);
        scores[PlayerId::new(2)] += 10;

        assert_eq!(scores[PlayerId::new(0)], 0);
        assert_eq!(scores[PlayerId::new(2)], 12);
        assert_eq!(scores.player_count(), 3);

        let pairs: Vec<_> = scores.iter().map(|(p, v)| (p.0, *v)).collect();
        assert_eq!(pairs, vec![(0, 0), (1, 1), (2, 12)]);
    }

    #[test]
    #[should_panic(expected = "Must have at least 1 player")]
    fn test_player_map_zero_players() {
        let _: PlayerMap<u32> = PlayerMap::with_default(0);
    }
}
