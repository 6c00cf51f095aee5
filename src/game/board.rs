use super::player::Player;

pub const DEFAULT_ROWS: usize = 6;
pub const DEFAULT_COLS: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Red,
    Yellow,
}

/// How pieces enter the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlacementMode {
    /// Pieces drop to the lowest open cell of a column.
    Gravity,
    /// Pieces may be placed in any open cell.
    Free,
}

/// The four axes a winning line can lie on, in the order they are checked:
/// horizontal, vertical, diagonal \, diagonal /.
const DIRECTIONS: [(i32, i32); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// A completed line of four or more pieces.
///
/// `cells` is the full contiguous run (not just four of it), ordered from the
/// backward-most cell to the forward-most along `direction`, so a renderer
/// can read exact endpoints from the first and last entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WinLine {
    pub player: Player,
    pub cells: Vec<(usize, usize)>,
    /// (dr, dc) of the axis the line lies on.
    pub direction: (i32, i32),
}

/// A fixed-dimension grid of cells. Row 0 is the top, row `rows - 1` the
/// bottom. Dimensions never change for the lifetime of a board.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board
    pub fn new(rows: usize, cols: usize) -> Self {
        debug_assert!(rows > 0 && cols > 0);
        Board {
            rows,
            cols,
            cells: vec![Cell::Empty; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Get the cell at a specific position
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row * self.cols + col]
    }

    pub(crate) fn set(&mut self, row: usize, col: usize, cell: Cell) {
        self.cells[row * self.cols + col] = cell;
    }

    pub fn in_bounds(&self, row: i32, col: i32) -> bool {
        row >= 0 && row < self.rows as i32 && col >= 0 && col < self.cols as i32
    }

    /// Lowest empty row of a column, scanning from the bottom. `None` if the
    /// column is full. Only meaningful in gravity mode.
    pub fn lowest_empty_row(&self, col: usize) -> Option<usize> {
        if col >= self.cols {
            return None;
        }
        (0..self.rows).rev().find(|&row| self.get(row, col) == Cell::Empty)
    }

    /// Whether no further piece can be placed.
    ///
    /// In gravity mode scanning the top row suffices; in free-placement mode
    /// every cell must be checked.
    pub fn is_full(&self, mode: PlacementMode) -> bool {
        match mode {
            PlacementMode::Gravity => (0..self.cols).all(|col| self.get(0, col) != Cell::Empty),
            PlacementMode::Free => self.cells.iter().all(|&cell| cell != Cell::Empty),
        }
    }

    /// Check whether the piece at (row, col) completes a line of four.
    ///
    /// Only the four axes through (row, col) are examined, since a win can
    /// only just have been completed through the most recently placed piece.
    /// Axes are checked in a fixed order and the first satisfying one is
    /// returned; simultaneous lines are not aggregated.
    pub fn check_win(&self, row: usize, col: usize) -> Option<WinLine> {
        let cell = self.get(row, col);
        if cell == Cell::Empty {
            return None;
        }

        for &(dr, dc) in &DIRECTIONS {
            let count = 1
                + self.count_direction(row, col, dr, dc, cell)
                + self.count_direction(row, col, -dr, -dc, cell);

            if count >= 4 {
                let player = match cell {
                    Cell::Red => Player::Red,
                    Cell::Yellow => Player::Yellow,
                    Cell::Empty => unreachable!(),
                };
                return Some(WinLine {
                    player,
                    cells: self.winning_run(row, col, dr, dc, cell),
                    direction: (dr, dc),
                });
            }
        }

        None
    }

    /// Number of same-colored pieces extending from (row, col) along
    /// (dr, dc), excluding (row, col) itself.
    fn count_direction(&self, row: usize, col: usize, dr: i32, dc: i32, cell: Cell) -> usize {
        let mut count = 0;
        let mut r = row as i32 + dr;
        let mut c = col as i32 + dc;

        while self.in_bounds(r, c) && self.get(r as usize, c as usize) == cell {
            count += 1;
            r += dr;
            c += dc;
        }

        count
    }

    /// Collect the full contiguous run through (row, col) along (dr, dc),
    /// ordered from the backward-most cell to the forward-most.
    fn winning_run(&self, row: usize, col: usize, dr: i32, dc: i32, cell: Cell) -> Vec<(usize, usize)> {
        // walk to the backward end of the run
        let mut r = row as i32;
        let mut c = col as i32;
        while self.in_bounds(r - dr, c - dc) && self.get((r - dr) as usize, (c - dc) as usize) == cell
        {
            r -= dr;
            c -= dc;
        }

        // then collect forward
        let mut run = Vec::new();
        while self.in_bounds(r, c) && self.get(r as usize, c as usize) == cell {
            run.push((r as usize, c as usize));
            r += dr;
            c += dc;
        }

        run
    }

    /// Static heuristic: sum the score of every possible 4-cell window on the
    /// board (all four axes, all starting positions) from `player`'s
    /// perspective. No search, O(cells × 4 axes).
    pub fn evaluate(&self, player: Player) -> i32 {
        let own = player.to_cell();
        let opp = player.other().to_cell();
        let mut score = 0;

        for row in 0..self.rows {
            for col in 0..self.cols {
                for &(dr, dc) in &DIRECTIONS {
                    score += self.window_score(row, col, dr, dc, own, opp);
                }
            }
        }

        score
    }

    /// Score of the 4-cell window starting at (row, col) along (dr, dc);
    /// 0 if the window runs out of bounds or holds pieces of both players.
    fn window_score(&self, row: usize, col: usize, dr: i32, dc: i32, own: Cell, opp: Cell) -> i32 {
        let mut own_count = 0;
        let mut opp_count = 0;
        let mut empty_count = 0;

        for i in 0..4 {
            let r = row as i32 + dr * i;
            let c = col as i32 + dc * i;
            if !self.in_bounds(r, c) {
                return 0;
            }
            match self.get(r as usize, c as usize) {
                cell if cell == own => own_count += 1,
                cell if cell == opp => opp_count += 1,
                _ => empty_count += 1,
            }
        }

        match (own_count, opp_count, empty_count) {
            (4, _, _) => 100,
            (_, 4, _) => -100,
            (3, 0, 1) => 5,
            (2, 0, 2) => 2,
            (0, 3, 1) => -4,
            _ => 0,
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(DEFAULT_ROWS, DEFAULT_COLS)
    }
}
