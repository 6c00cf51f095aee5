use crate::ai::Difficulty;
use crate::game::{Cell, GameSession, GameStatus, PlacementMode, Player};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Everything the game screen needs for one frame.
pub struct ViewState<'a> {
    pub session: &'a GameSession,
    pub selected_column: usize,
    pub selected_row: usize,
    pub message: &'a Option<String>,
    pub hint: Option<(usize, usize)>,
    /// (red wins, yellow wins), owned by the UI rather than the game core.
    pub tally: (u32, u32),
    pub difficulty: Difficulty,
    pub vs_ai: bool,
}

pub fn render(frame: &mut Frame, view: &ViewState) {
    let board_height = view.session.board().rows() as u16 + 4;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),            // Header
            Constraint::Min(board_height),    // Board
            Constraint::Length(3),            // Message
            Constraint::Length(4),            // Controls
        ])
        .split(frame.area());

    render_header(frame, view, chunks[0]);
    render_board(frame, view, chunks[1]);
    render_message(frame, view.message, chunks[2]);
    render_controls(frame, view, chunks[3]);
}

fn player_color(player: Player) -> Color {
    match player {
        Player::Red => Color::Red,
        Player::Yellow => Color::Yellow,
    }
}

fn render_header(frame: &mut Frame, view: &ViewState, area: ratatui::layout::Rect) {
    let (status, color) = match view.session.status() {
        GameStatus::Active => {
            let player = view.session.current_player();
            (format!("Current Player: {}", player.name()), player_color(player))
        }
        GameStatus::Won(line) => (format!("{} wins!", line.player.name()), player_color(line.player)),
        GameStatus::Draw => ("Draw!".to_string(), Color::Gray),
    };

    let opponent = if view.vs_ai {
        format!("vs AI ({})", view.difficulty.name())
    } else {
        "Two Players".to_string()
    };
    let text = format!(
        "{status}  |  {opponent}  |  Red {} : {} Yellow",
        view.tally.0, view.tally.1
    );

    let header = Paragraph::new(text)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Connect Four"));

    frame.render_widget(header, area);
}

fn render_board(frame: &mut Frame, view: &ViewState, area: ratatui::layout::Rect) {
    let board = view.session.board();
    let rows = board.rows();
    let cols = board.cols();
    let free_mode = view.session.mode() == PlacementMode::Free;

    let win_cells: &[(usize, usize)] = match view.session.status() {
        GameStatus::Won(line) => &line.cells,
        _ => &[],
    };

    let mut lines = Vec::new();

    // column numbers with selection indicator
    let mut col_line = vec![Span::raw("   ")];
    for col in 0..cols {
        let label = format!(" {} ", (col + 1) % 10);
        if col == view.selected_column {
            col_line.push(Span::styled(
                label,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            ));
        } else {
            col_line.push(Span::raw(label));
        }
    }
    lines.push(Line::from(col_line));

    let horizontal = "═".repeat(cols * 3 + 1);
    lines.push(Line::from(format!("  ╔{horizontal}╗")));

    for row in 0..rows {
        let mut row_spans = vec![Span::raw("  ║")];

        for col in 0..cols {
            let cell = board.get(row, col);
            let is_win = win_cells.contains(&(row, col));
            let is_hint = view.hint == Some((row, col));
            let is_cursor = free_mode && (row, col) == (view.selected_row, view.selected_column);

            let span = if is_win {
                Span::styled(
                    " ● ",
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                )
            } else {
                match cell {
                    Cell::Red => Span::styled(" ● ", Style::default().fg(Color::Red)),
                    Cell::Yellow => Span::styled(" ● ", Style::default().fg(Color::Yellow)),
                    Cell::Empty if is_hint => {
                        Span::styled(" ◌ ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                    }
                    Cell::Empty if is_cursor => {
                        Span::styled(" . ", Style::default().fg(Color::Cyan).add_modifier(Modifier::REVERSED))
                    }
                    Cell::Empty => Span::styled(" . ", Style::default().fg(Color::DarkGray)),
                }
            };
            row_spans.push(span);
        }

        row_spans.push(Span::raw(" ║"));
        lines.push(Line::from(row_spans));
    }

    lines.push(Line::from(format!("  ╚{horizontal}╝")));

    // drop indicator under the selected column (gravity mode)
    if !free_mode {
        let mut indicator = vec![Span::raw("   ")];
        for col in 0..cols {
            if col == view.selected_column {
                indicator.push(Span::styled(" ▲ ", Style::default().fg(Color::Cyan)));
            } else {
                indicator.push(Span::raw("   "));
            }
        }
        lines.push(Line::from(indicator));
    }

    let board_widget = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(board_widget, area);
}

fn render_message(frame: &mut Frame, message: &Option<String>, area: ratatui::layout::Rect) {
    let text = message.as_deref().unwrap_or("");
    let msg_widget = Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, view: &ViewState, area: ratatui::layout::Rect) {
    let movement = if view.session.mode() == PlacementMode::Free {
        "←/→/↑/↓: Move  |  Enter: Place"
    } else {
        "←/→: Move  |  Enter: Drop"
    };
    let line1 = Line::from(format!("{movement}  |  H: Hint  |  R: Restart  |  Q: Quit"));
    let line2 = Line::from("1: Easy  2: Medium  3: Hard  4: Extreme");

    let controls = Paragraph::new(vec![line1, line2])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Controls"));

    frame.render_widget(controls, area);
}
