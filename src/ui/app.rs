use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::ai::{AiPlayer, Difficulty};
use crate::config::GameConfig;
use crate::coordinator::{SilentObserver, TurnCoordinator, TurnOutcome};
use crate::game::{GameSession, PlacementMode, Player};

use super::game_view::{self, ViewState};

pub struct App {
    coordinator: TurnCoordinator,
    selected_column: usize,
    selected_row: usize,
    message: Option<String>,
    hint: Option<(usize, usize)>,
    /// Win tally shown in the header; this layer owns it, not the game core.
    wins: (u32, u32),
    should_quit: bool,
}

impl App {
    pub fn new(config: &GameConfig, vs_ai: bool) -> Self {
        let session = GameSession::new(config.rows, config.cols, config.placement);
        let ai = AiPlayer::new(config.difficulty);
        let ai_side = if vs_ai { Some(Player::Yellow) } else { None };
        let coordinator = TurnCoordinator::new(session, ai, ai_side).with_pacing(
            Duration::from_millis(config.settle_ms),
            config.thinking_delay && vs_ai,
        );

        App {
            coordinator,
            selected_column: config.cols / 2,
            selected_row: config.rows / 2,
            message: None,
            hint: None,
            wins: (0, 0),
            should_quit: false,
        }
    }

    /// Main application loop
    pub fn run(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
        }
        Ok(())
    }

    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                self.handle_key(key);
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        self.message = None;

        let rows = self.coordinator.session().board().rows();
        let cols = self.coordinator.session().board().cols();
        let free_mode = self.coordinator.session().mode() == PlacementMode::Free;

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => {
                self.selected_column = self.selected_column.saturating_sub(1);
            }
            KeyCode::Right => {
                if self.selected_column + 1 < cols {
                    self.selected_column += 1;
                }
            }
            KeyCode::Up if free_mode => {
                self.selected_row = self.selected_row.saturating_sub(1);
            }
            KeyCode::Down if free_mode => {
                if self.selected_row + 1 < rows {
                    self.selected_row += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.place_piece();
            }
            KeyCode::Char('h') => {
                self.show_hint();
            }
            KeyCode::Char('r') => {
                self.coordinator.reset();
                self.hint = None;
                self.message = Some("New game started!".to_string());
            }
            KeyCode::Char(c @ '1'..='4') => {
                let level = match c {
                    '1' => Difficulty::Easy,
                    '2' => Difficulty::Medium,
                    '3' => Difficulty::Hard,
                    _ => Difficulty::Extreme,
                };
                self.coordinator.set_difficulty(level);
                self.message = Some(format!("Difficulty: {}", level.name()));
            }
            _ => {}
        }
    }

    /// Place a piece at the cursor for the side to move, then let the AI
    /// answer if it is next.
    fn place_piece(&mut self) {
        if !self.coordinator.session().is_active() {
            self.message = Some("Game over! Press 'r' to restart.".to_string());
            return;
        }

        let col = self.selected_column;
        let row = match self.coordinator.session().mode() {
            PlacementMode::Free => self.selected_row,
            PlacementMode::Gravity => match self.coordinator.session().lowest_empty_row(col) {
                Some(row) => row,
                None => {
                    self.message = Some("Column is full!".to_string());
                    return;
                }
            },
        };

        self.hint = None;
        let outcome = self
            .coordinator
            .human_move(row, col, &mut SilentObserver)
            .unwrap_or(TurnOutcome::Rejected);
        self.apply_outcome(&outcome);

        if matches!(outcome, TurnOutcome::Continuing) && self.coordinator.is_ai_turn() {
            let outcome = self
                .coordinator
                .ai_turn(&mut SilentObserver)
                .unwrap_or(TurnOutcome::Rejected);
            self.apply_outcome(&outcome);
        }
    }

    fn apply_outcome(&mut self, outcome: &TurnOutcome) {
        match outcome {
            TurnOutcome::Rejected => {
                self.message = Some("That cell is not available.".to_string());
            }
            TurnOutcome::Continuing => {}
            TurnOutcome::Won(line) => {
                match line.player {
                    Player::Red => self.wins.0 += 1,
                    Player::Yellow => self.wins.1 += 1,
                }
                self.message = Some(format!("{} wins! Press 'r' for a rematch.", line.player.name()));
            }
            TurnOutcome::Draw => {
                self.message = Some("It's a draw! Press 'r' for a rematch.".to_string());
            }
        }
    }

    fn show_hint(&mut self) {
        match self.coordinator.hint() {
            Some(cell) => {
                self.hint = Some(cell);
                self.message = Some("Hint: the marked cell looks best.".to_string());
            }
            None => {
                self.message = Some("No hint available right now.".to_string());
            }
        }
    }

    fn render(&self, frame: &mut ratatui::Frame) {
        let view = ViewState {
            session: self.coordinator.session(),
            selected_column: self.selected_column,
            selected_row: self.selected_row,
            message: &self.message,
            hint: self.hint,
            tally: self.wins,
            difficulty: self.coordinator.ai().difficulty(),
            vs_ai: self.coordinator.ai_side().is_some(),
        };
        game_view::render(frame, &view);
    }
}
