use super::board::{Board, Cell, PlacementMode, WinLine};
use super::player::Player;
use crate::error::MoveError;

/// One placed piece, in play order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub row: usize,
    pub col: usize,
    pub player: Player,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameStatus {
    Active,
    Won(WinLine),
    Draw,
}

/// A single game: board, move history, whose turn it is, and whether the
/// game is still running.
///
/// The history exactly reconstructs the board: replaying it from an empty
/// board reproduces the current position, and [`undo_move`] restores the
/// previous position cell-for-cell. Sessions are plain owned values, so any
/// number of games (or tests) can run side by side.
///
/// [`undo_move`]: GameSession::undo_move
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    board: Board,
    history: Vec<Move>,
    current_player: Player,
    status: GameStatus,
    mode: PlacementMode,
}

impl GameSession {
    /// Create a fresh session. Red moves first.
    pub fn new(rows: usize, cols: usize, mode: PlacementMode) -> Self {
        GameSession {
            board: Board::new(rows, cols),
            history: Vec::new(),
            current_player: Player::Red,
            status: GameStatus::Active,
            mode,
        }
    }

    /// Clear the board and history for a new game on the same dimensions.
    pub fn reset(&mut self) {
        self.board = Board::new(self.board.rows(), self.board.cols());
        self.history.clear();
        self.current_player = Player::Red;
        self.status = GameStatus::Active;
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn mode(&self) -> PlacementMode {
        self.mode
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn status(&self) -> &GameStatus {
        &self.status
    }

    pub fn is_active(&self) -> bool {
        self.status == GameStatus::Active
    }

    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Whether (row, col) is in bounds and empty.
    ///
    /// Gravity-mode callers are expected to obtain the row from
    /// [`lowest_empty_row`]; this check alone does not reject floating
    /// placements.
    ///
    /// [`lowest_empty_row`]: GameSession::lowest_empty_row
    pub fn is_valid_move(&self, row: usize, col: usize) -> bool {
        self.board.in_bounds(row as i32, col as i32) && self.board.get(row, col) == Cell::Empty
    }

    pub fn lowest_empty_row(&self, col: usize) -> Option<usize> {
        self.board.lowest_empty_row(col)
    }

    /// Occupy (row, col) for `player` and record it in the history.
    ///
    /// Fails without mutating anything when the game is over or the cell is
    /// unavailable. Does not switch the turn; callers resolve win/draw first
    /// and then call [`switch_player`].
    ///
    /// [`switch_player`]: GameSession::switch_player
    pub fn make_move(&mut self, row: usize, col: usize, player: Player) -> Result<(), MoveError> {
        if !self.is_active() {
            return Err(MoveError::GameOver);
        }
        if !self.board.in_bounds(row as i32, col as i32) {
            return Err(MoveError::OutOfBounds { row, col });
        }
        if self.board.get(row, col) != Cell::Empty {
            return Err(MoveError::Occupied { row, col });
        }

        self.board.set(row, col, player.to_cell());
        self.history.push(Move { row, col, player });
        Ok(())
    }

    /// Pop the last move and clear its cell, restoring the previous board
    /// exactly. Returns `None` when there is nothing to undo.
    ///
    /// Side effects, relied on by callers: the active player becomes the
    /// player who made the undone move, and the session is forced back to
    /// `Active` (undoing the final move of a finished game reopens it). O(1).
    pub fn undo_move(&mut self) -> Option<Move> {
        let mv = self.history.pop()?;
        self.board.set(mv.row, mv.col, Cell::Empty);
        self.current_player = mv.player;
        self.status = GameStatus::Active;
        Some(mv)
    }

    pub fn switch_player(&mut self) {
        self.current_player = self.current_player.other();
    }

    /// Every cell a piece may currently be placed in, in a fixed
    /// deterministic order: one entry per open column in gravity mode, every
    /// empty cell in free-placement mode, ascending column then row. Empty
    /// once the game is over.
    pub fn valid_moves(&self) -> Vec<(usize, usize)> {
        if !self.is_active() {
            return Vec::new();
        }

        match self.mode {
            PlacementMode::Gravity => (0..self.board.cols())
                .filter_map(|col| self.board.lowest_empty_row(col).map(|row| (row, col)))
                .collect(),
            PlacementMode::Free => {
                let mut cells = Vec::new();
                for col in 0..self.board.cols() {
                    for row in 0..self.board.rows() {
                        if self.board.get(row, col) == Cell::Empty {
                            cells.push((row, col));
                        }
                    }
                }
                cells
            }
        }
    }

    pub fn check_win(&self, row: usize, col: usize) -> Option<WinLine> {
        self.board.check_win(row, col)
    }

    pub fn is_board_full(&self) -> bool {
        self.board.is_full(self.mode)
    }

    pub fn mark_won(&mut self, line: WinLine) {
        self.status = GameStatus::Won(line);
    }

    pub fn mark_draw(&mut self) {
        self.status = GameStatus::Draw;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drop_piece(session: &mut GameSession, col: usize) -> (usize, Player) {
        let player = session.current_player();
        let row = session.lowest_empty_row(col).expect("column full");
        session.make_move(row, col, player).expect("legal move");
        session.switch_player();
        (row, player)
    }

    #[test]
    fn test_initial_state() {
        let session = GameSession::new(6, 7, PlacementMode::Gravity);
        assert_eq!(session.current_player(), Player::Red);
        assert!(session.is_active());
        assert!(session.history().is_empty());
        assert_eq!(session.valid_moves().len(), 7);
    }

    #[test]
    fn test_make_move_records_history() {
        let mut session = GameSession::new(6, 7, PlacementMode::Gravity);
        session.make_move(5, 3, Player::Red).unwrap();
        assert_eq!(session.board().get(5, 3), Cell::Red);
        assert_eq!(
            session.history(),
            &[Move { row: 5, col: 3, player: Player::Red }]
        );
    }

    #[test]
    fn test_make_move_rejects_occupied_cell() {
        let mut session = GameSession::new(6, 7, PlacementMode::Gravity);
        session.make_move(5, 3, Player::Red).unwrap();
        let before = session.clone();

        assert_eq!(
            session.make_move(5, 3, Player::Yellow),
            Err(MoveError::Occupied { row: 5, col: 3 })
        );
        assert_eq!(session, before, "failed move must not mutate the session");
    }

    #[test]
    fn test_make_move_rejects_out_of_bounds() {
        let mut session = GameSession::new(6, 7, PlacementMode::Gravity);
        assert_eq!(
            session.make_move(0, 7, Player::Red),
            Err(MoveError::OutOfBounds { row: 0, col: 7 })
        );
    }

    #[test]
    fn test_make_move_rejects_finished_game() {
        let mut session = GameSession::new(6, 7, PlacementMode::Gravity);
        session.mark_draw();
        assert_eq!(session.make_move(5, 3, Player::Red), Err(MoveError::GameOver));
    }

    #[test]
    fn test_undo_is_exact_inverse_of_move() {
        let mut session = GameSession::new(6, 7, PlacementMode::Gravity);
        drop_piece(&mut session, 3);
        drop_piece(&mut session, 2);
        let before = session.clone();

        let row = session.lowest_empty_row(4).unwrap();
        session.make_move(row, 4, Player::Red).unwrap();
        let undone = session.undo_move().expect("history not empty");

        assert_eq!(undone, Move { row, col: 4, player: Player::Red });
        assert_eq!(session, before);
    }

    #[test]
    fn test_undo_on_empty_history() {
        let mut session = GameSession::new(6, 7, PlacementMode::Gravity);
        assert_eq!(session.undo_move(), None);
    }

    #[test]
    fn test_undo_restores_mover_and_reopens_game() {
        let mut session = GameSession::new(6, 7, PlacementMode::Gravity);
        // vertical four for Red in column 3, Yellow ignored for the test
        let mut last = (0, 0);
        for _ in 0..4 {
            let row = session.lowest_empty_row(3).unwrap();
            session.make_move(row, 3, Player::Red).unwrap();
            last = (row, 3);
        }
        let line = session.check_win(last.0, last.1).expect("vertical win");
        session.mark_won(line);
        session.switch_player();
        assert!(!session.is_active());

        let undone = session.undo_move().unwrap();
        assert_eq!(undone.player, Player::Red);
        assert_eq!(session.current_player(), Player::Red);
        assert!(session.is_active());
    }

    #[test]
    fn test_replaying_history_reconstructs_board() {
        let mut session = GameSession::new(6, 7, PlacementMode::Gravity);
        for col in [3, 3, 2, 4, 1, 5] {
            drop_piece(&mut session, col);
        }

        let mut replay = GameSession::new(6, 7, PlacementMode::Gravity);
        for mv in session.history().to_vec() {
            replay.make_move(mv.row, mv.col, mv.player).unwrap();
        }
        assert_eq!(replay.board(), session.board());
    }

    #[test]
    fn test_valid_moves_gravity_order() {
        let mut session = GameSession::new(6, 7, PlacementMode::Gravity);
        drop_piece(&mut session, 0);
        let moves = session.valid_moves();
        assert_eq!(moves[0], (4, 0), "column 0 stacks upward");
        assert_eq!(&moves[1..], &[(5, 1), (5, 2), (5, 3), (5, 4), (5, 5), (5, 6)]);
    }

    #[test]
    fn test_valid_moves_free_order_is_column_then_row() {
        let mut session = GameSession::new(2, 2, PlacementMode::Free);
        session.make_move(1, 0, Player::Red).unwrap();
        assert_eq!(session.valid_moves(), vec![(0, 0), (0, 1), (1, 1)]);
    }

    #[test]
    fn test_valid_moves_empty_when_game_over() {
        let mut session = GameSession::new(6, 7, PlacementMode::Gravity);
        session.mark_draw();
        assert!(session.valid_moves().is_empty());
    }

    #[test]
    fn test_vertical_four_end_to_end() {
        let mut session = GameSession::new(6, 7, PlacementMode::Gravity);
        let mut last_row = 0;
        for _ in 0..4 {
            let row = session.lowest_empty_row(3).unwrap();
            session.make_move(row, 3, Player::Red).unwrap();
            last_row = row;
        }

        let line = session.check_win(last_row, 3).expect("vertical win");
        assert_eq!(line.player, Player::Red);
        assert_eq!(line.direction, (1, 0));
        assert_eq!(line.cells.len(), 4);
        assert_eq!(line.cells, vec![(2, 3), (3, 3), (4, 3), (5, 3)]);
    }

    #[test]
    fn test_degenerate_one_by_four_draw() {
        let mut session = GameSession::new(1, 4, PlacementMode::Gravity);
        for col in 0..4 {
            let player = if col % 2 == 0 { Player::Red } else { Player::Yellow };
            session.make_move(0, col, player).unwrap();
            assert!(session.check_win(0, col).is_none());
        }

        assert!(session.is_board_full());
        session.mark_draw();
        assert_eq!(session.status(), &GameStatus::Draw);
    }

    #[test]
    fn test_reset_keeps_dimensions_and_mode() {
        let mut session = GameSession::new(8, 9, PlacementMode::Free);
        session.make_move(0, 0, Player::Red).unwrap();
        session.reset();

        assert!(session.history().is_empty());
        assert!(session.is_active());
        assert_eq!(session.current_player(), Player::Red);
        assert_eq!(session.board().rows(), 8);
        assert_eq!(session.board().cols(), 9);
        assert_eq!(session.mode(), PlacementMode::Free);
    }
}
