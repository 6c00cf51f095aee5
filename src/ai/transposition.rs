use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use crate::game::Board;

/// How a cached score relates to the true value of the position: an exact
/// value, or a bound left behind by an alpha-beta cutoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Exact,
    Lower,
    Upper,
}

#[derive(Debug, Clone, Copy)]
pub struct TtEntry {
    pub score: i32,
    /// Remaining search depth the score was computed at. Entries from
    /// shallower searches than the current need are ignored on probe.
    pub depth: u32,
    pub bound: Bound,
}

/// Fingerprint of a position: every cell's occupant (the board hashes its
/// cells in row-major order) plus which side is to move. Identical states
/// always produce the same key; distinct states practically never collide.
pub fn fingerprint(board: &Board, maximizing: bool) -> u64 {
    let mut hasher = DefaultHasher::new();
    board.hash(&mut hasher);
    maximizing.hash(&mut hasher);
    hasher.finish()
}

/// Cache of already-searched positions, private to one move decision.
///
/// Cleared at the start of every top-level search, so it only accelerates
/// transpositions within a single decision and memory stays bounded.
#[derive(Debug, Default)]
pub struct TranspositionTable {
    entries: HashMap<u64, TtEntry>,
}

impl TranspositionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a position, requiring at least `depth` remaining plies of
    /// search behind the stored score.
    pub fn get(&self, key: u64, depth: u32) -> Option<TtEntry> {
        self.entries.get(&key).copied().filter(|entry| entry.depth >= depth)
    }

    /// Store a score, keeping whichever entry was searched deeper.
    pub fn insert(&mut self, key: u64, entry: TtEntry) {
        match self.entries.get(&key) {
            Some(existing) if existing.depth > entry.depth => {}
            _ => {
                self.entries.insert(key, entry);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Cell, Player};

    fn entry(score: i32, depth: u32) -> TtEntry {
        TtEntry { score, depth, bound: Bound::Exact }
    }

    #[test]
    fn test_identical_states_share_a_fingerprint() {
        let mut a = Board::default();
        let mut b = Board::default();
        a.set(5, 3, Player::Red.to_cell());
        b.set(5, 3, Player::Red.to_cell());

        assert_eq!(fingerprint(&a, true), fingerprint(&b, true));
        assert_eq!(fingerprint(&a, false), fingerprint(&b, false));
    }

    #[test]
    fn test_fingerprint_depends_on_side_to_move() {
        let board = Board::default();
        assert_ne!(fingerprint(&board, true), fingerprint(&board, false));
    }

    #[test]
    fn test_fingerprint_distinguishes_positions() {
        let empty = Board::default();
        let mut one = Board::default();
        one.set(5, 3, Cell::Red);
        let mut other = Board::default();
        other.set(5, 3, Cell::Yellow);

        assert_ne!(fingerprint(&empty, true), fingerprint(&one, true));
        assert_ne!(fingerprint(&one, true), fingerprint(&other, true));
    }

    #[test]
    fn test_depth_guard_ignores_shallow_entries() {
        let mut table = TranspositionTable::new();
        table.insert(42, entry(7, 3));

        assert!(table.get(42, 4).is_none(), "shallower entry must be ignored");
        assert_eq!(table.get(42, 3).unwrap().score, 7);
        assert_eq!(table.get(42, 2).unwrap().score, 7);
    }

    #[test]
    fn test_insert_keeps_deeper_entry() {
        let mut table = TranspositionTable::new();
        table.insert(42, entry(7, 5));
        table.insert(42, entry(9, 2));

        assert_eq!(table.get(42, 0).unwrap().score, 7);

        table.insert(42, entry(11, 6));
        assert_eq!(table.get(42, 0).unwrap().score, 11);
    }

    #[test]
    fn test_clear_empties_table() {
        let mut table = TranspositionTable::new();
        table.insert(1, entry(0, 0));
        assert_eq!(table.len(), 1);
        table.clear();
        assert!(table.is_empty());
    }
}
