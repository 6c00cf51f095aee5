use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::game::{Board, Cell, GameSession, Move, PlacementMode, Player};

use super::difficulty::Difficulty;
use super::transposition::{fingerprint, Bound, TranspositionTable, TtEntry};

/// Score of a forced win, biased by remaining depth so that among forced
/// wins the quickest scores highest, and among forced losses the most
/// delayed scores highest.
pub const WIN_SCORE: i32 = 1_000_000;

/// Hints always search at this fixed shallow depth, independent of the
/// configured difficulty.
const HINT_DEPTH: u32 = 4;
const HINT_BUDGET: Duration = Duration::from_millis(150);

/// Move-selection AI.
///
/// Easy picks moves with a three-tier heuristic and no search; the other
/// levels run depth-limited minimax with alpha-beta pruning, center-first
/// move ordering and a per-decision transposition cache, under the
/// difficulty's wall-clock budget.
///
/// Search runs on a private copy of the board, so speculative exploration
/// can never perturb the session's history or turn state.
pub struct AiPlayer {
    difficulty: Difficulty,
    table: TranspositionTable,
    rng: StdRng,
}

impl AiPlayer {
    pub fn new(difficulty: Difficulty) -> Self {
        AiPlayer {
            difficulty,
            table: TranspositionTable::new(),
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic RNG for tests.
    pub fn with_rng(difficulty: Difficulty, rng: StdRng) -> Self {
        AiPlayer {
            difficulty,
            table: TranspositionTable::new(),
            rng,
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Switch strategy and drop any cached search state.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        self.table.clear();
    }

    #[cfg(test)]
    pub(crate) fn table(&self) -> &TranspositionTable {
        &self.table
    }

    /// Choose a move for `player`. Returns `None` only when no legal move
    /// exists; ties keep the first move found in scan order.
    pub fn get_best_move(
        &mut self,
        session: &GameSession,
        player: Player,
    ) -> Option<(usize, usize)> {
        match self.difficulty {
            Difficulty::Easy => self.easy_move(session, player),
            level => {
                self.table.clear();
                let mut searcher = Searcher {
                    board: session.board().clone(),
                    mode: session.mode(),
                    root_player: player,
                    deadline: Instant::now() + level.time_budget(),
                    table: &mut self.table,
                };
                searcher
                    .best_move(level.search_depth())
                    .map(|choice| (choice.row, choice.col))
            }
        }
    }

    /// On-demand suggestion for `player`: the same search at a fixed shallow
    /// depth and a short budget, with its own throwaway cache. Configured
    /// difficulty state is untouched.
    pub fn get_hint(&mut self, session: &GameSession, player: Player) -> Option<(usize, usize)> {
        let mut table = TranspositionTable::new();
        let mut searcher = Searcher {
            board: session.board().clone(),
            mode: session.mode(),
            root_player: player,
            deadline: Instant::now() + HINT_BUDGET,
            table: &mut table,
        };
        searcher
            .best_move(HINT_DEPTH)
            .map(|choice| (choice.row, choice.col))
    }

    /// Easy mode: three tiers, first match wins.
    ///
    /// 1. An immediate winning move is always taken.
    /// 2. With probability 0.5, a move that would complete the opponent's
    ///    four is blocked. Missing blocks half the time is what keeps easy
    ///    beatable.
    /// 3. A uniform-random legal move.
    fn easy_move(&mut self, session: &GameSession, player: Player) -> Option<(usize, usize)> {
        let moves = session.valid_moves();
        if moves.is_empty() {
            return None;
        }
        let mut board = session.board().clone();

        for &(row, col) in &moves {
            board.set(row, col, player.to_cell());
            let wins = board.check_win(row, col).is_some();
            board.set(row, col, Cell::Empty);
            if wins {
                return Some((row, col));
            }
        }

        if self.rng.random_bool(0.5) {
            let opponent = player.other();
            for &(row, col) in &moves {
                board.set(row, col, opponent.to_cell());
                let wins = board.check_win(row, col).is_some();
                board.set(row, col, Cell::Empty);
                if wins {
                    return Some((row, col));
                }
            }
        }

        Some(moves[self.rng.random_range(0..moves.len())])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RootChoice {
    row: usize,
    col: usize,
    score: i32,
}

/// One move decision: a scratch board, a deadline and a cache, separate from
/// the session the decision is about.
struct Searcher<'a> {
    board: Board,
    mode: PlacementMode,
    root_player: Player,
    deadline: Instant,
    table: &'a mut TranspositionTable,
}

impl Searcher<'_> {
    /// Top-level search over all legal moves. Strict `>` keeps the first
    /// maximum in center-first scan order.
    fn best_move(&mut self, depth: u32) -> Option<RootChoice> {
        let moves = center_ordered_moves(&self.board, self.mode);
        if moves.is_empty() {
            return None;
        }

        // an immediate win ends the game; take the first one found before
        // spending any of the budget on search
        if let Some((row, col)) = self.winning_move(self.root_player, &moves) {
            let score = WIN_SCORE + depth.saturating_sub(1) as i32;
            return Some(RootChoice { row, col, score });
        }

        let mut alpha = i32::MIN;
        let beta = i32::MAX;
        let mut best: Option<RootChoice> = None;

        for (row, col) in moves {
            self.board.set(row, col, self.root_player.to_cell());
            let last = Move { row, col, player: self.root_player };
            let score = self.minimax(last, depth.saturating_sub(1), alpha, beta, false);
            self.board.set(row, col, Cell::Empty);

            if best.map_or(true, |b| score > b.score) {
                best = Some(RootChoice { row, col, score });
            }
            if score > alpha {
                alpha = score;
            }
        }

        best
    }

    /// First move in `moves` that completes a four for `player`, if any.
    fn winning_move(&mut self, player: Player, moves: &[(usize, usize)]) -> Option<(usize, usize)> {
        for &(row, col) in moves {
            self.board.set(row, col, player.to_cell());
            let wins = self.board.check_win(row, col).is_some();
            self.board.set(row, col, Cell::Empty);
            if wins {
                return Some((row, col));
            }
        }
        None
    }

    /// Depth-limited minimax with alpha-beta pruning.
    ///
    /// `last` is the move that produced this node (only its cell can have
    /// completed a win). `depth` is remaining plies. Scores are always from
    /// the root player's perspective; `maximizing` says whose turn it is.
    fn minimax(&mut self, last: Move, depth: u32, mut alpha: i32, mut beta: i32, maximizing: bool) -> i32 {
        // time escape: once the budget is gone, degrade to the static
        // heuristic so the caller always gets an answer
        if Instant::now() >= self.deadline {
            return self.board.evaluate(self.root_player);
        }

        let key = fingerprint(&self.board, maximizing);
        if let Some(entry) = self.table.get(key, depth) {
            match entry.bound {
                Bound::Exact => return entry.score,
                Bound::Lower => alpha = alpha.max(entry.score),
                Bound::Upper => beta = beta.min(entry.score),
            }
            if alpha >= beta {
                return entry.score;
            }
        }
        // bound classification is relative to the window actually searched
        let (alpha0, beta0) = (alpha, beta);

        if let Some(line) = self.board.check_win(last.row, last.col) {
            // quicker wins and more delayed losses score higher
            return if line.player == self.root_player {
                WIN_SCORE + depth as i32
            } else {
                -WIN_SCORE - depth as i32
            };
        }

        if self.board.is_full(self.mode) {
            return 0;
        }

        if depth == 0 {
            return self.board.evaluate(self.root_player);
        }

        let mover = if maximizing { self.root_player } else { self.root_player.other() };
        let mut best = if maximizing { i32::MIN } else { i32::MAX };

        for (row, col) in center_ordered_moves(&self.board, self.mode) {
            self.board.set(row, col, mover.to_cell());
            let child = Move { row, col, player: mover };
            let score = self.minimax(child, depth - 1, alpha, beta, !maximizing);
            // un-apply before the score is acted on, so no simulation state
            // leaks between siblings
            self.board.set(row, col, Cell::Empty);

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(score);
            } else {
                best = best.min(score);
                beta = beta.min(score);
            }
            if beta <= alpha {
                break;
            }
        }

        let bound = if best <= alpha0 {
            Bound::Upper
        } else if best >= beta0 {
            Bound::Lower
        } else {
            Bound::Exact
        };
        self.table.insert(key, TtEntry { score: best, depth, bound });
        best
    }
}

/// All placeable cells of `board` in canonical order (ascending column,
/// then row).
fn legal_moves_on(board: &Board, mode: PlacementMode) -> Vec<(usize, usize)> {
    match mode {
        PlacementMode::Gravity => (0..board.cols())
            .filter_map(|col| board.lowest_empty_row(col).map(|row| (row, col)))
            .collect(),
        PlacementMode::Free => {
            let mut cells = Vec::new();
            for col in 0..board.cols() {
                for row in 0..board.rows() {
                    if board.get(row, col) == Cell::Empty {
                        cells.push((row, col));
                    }
                }
            }
            cells
        }
    }
}

/// Legal moves sorted by distance from the board center, closest first.
/// Center-biased ordering is what makes alpha-beta pruning effective at this
/// branching factor. The sort is stable, so equidistant moves keep their
/// canonical order.
fn center_ordered_moves(board: &Board, mode: PlacementMode) -> Vec<(usize, usize)> {
    let mut moves = legal_moves_on(board, mode);
    let rows = board.rows() as i32;
    let cols = board.cols() as i32;
    // doubled offsets keep the distance integral for even dimensions
    match mode {
        PlacementMode::Gravity => {
            moves.sort_by_key(|&(_, col)| (2 * col as i32 + 1 - cols).abs());
        }
        PlacementMode::Free => {
            moves.sort_by_key(|&(row, col)| {
                (2 * col as i32 + 1 - cols).abs() + (2 * row as i32 + 1 - rows).abs()
            });
        }
    }
    moves
}
