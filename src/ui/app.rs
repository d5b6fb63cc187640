use crate::config::AppConfig;
use crate::error::{ConfigError, MoveError};
use crate::game::{DropResult, GameEngine};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};
use std::io;

/// Interactive host: translates key presses into engine calls and keeps the
/// last result as a status message.
pub struct App {
    engine: GameEngine,
    start_column: usize,
    selected_column: usize,
    should_quit: bool,
    message: Option<String>,
}

impl App {
    pub fn new(config: &AppConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let engine = GameEngine::new(config.board.height, config.board.width)?;
        let start_column = config.start_column();
        Ok(App {
            engine,
            start_column,
            selected_column: start_column,
            should_quit: false,
            message: None,
        })
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    pub fn selected_column(&self) -> usize {
        self.selected_column
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()>
    where
        B::Error: Into<io::Error>,
    {
        loop {
            terminal
                .draw(|f| self.render(f))
                .map_err(Into::<io::Error>::into)?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
        }
        Ok(())
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    /// Handle key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        // Clear message on any key press
        self.message = None;

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => {
                self.selected_column = self.selected_column.saturating_sub(1);
            }
            KeyCode::Right => {
                if self.selected_column + 1 < self.engine.width() {
                    self.selected_column += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.drop_piece();
            }
            KeyCode::Char('r') => self.restart(),
            _ => {}
        }
    }

    fn restart(&mut self) {
        let (height, width) = (self.engine.height(), self.engine.width());
        self.message = Some(match self.engine.reset(height, width) {
            Ok(()) => {
                self.selected_column = self.start_column;
                "New game started!".to_string()
            }
            Err(err) => err.to_string(),
        });
    }

    /// Drop piece in selected column
    fn drop_piece(&mut self) {
        self.message = match self.engine.drop_piece(self.selected_column) {
            Ok(DropResult::Accepted { .. }) => None,
            Ok(DropResult::Win { player, .. }) => Some(format!("{player} wins!")),
            Ok(DropResult::Draw { .. }) => Some("It's a draw!".to_string()),
            Err(MoveError::ColumnFull { .. }) => Some("Column is full!".to_string()),
            Err(MoveError::InvalidColumn { .. }) => Some("Invalid column!".to_string()),
            Err(MoveError::GameOver) => Some("Game over! Press 'r' to restart.".to_string()),
        };
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        super::game_view::render(frame, &self.engine, self.selected_column, &self.message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Cell, Outcome, Player};

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::from(code));
    }

    #[test]
    fn test_starts_in_middle_column() {
        let app = App::new(&AppConfig::default()).unwrap();
        assert_eq!(app.selected_column(), 3);
        assert_eq!(app.engine().current_player(), Player::One);
    }

    #[test]
    fn test_rejects_invalid_config() {
        let mut config = AppConfig::default();
        config.board.width = 3;
        assert!(App::new(&config).is_err());
    }

    #[test]
    fn test_selector_stays_on_board() {
        let mut app = App::new(&AppConfig::default()).unwrap();
        for _ in 0..10 {
            press(&mut app, KeyCode::Right);
        }
        assert_eq!(app.selected_column(), 6);
        for _ in 0..10 {
            press(&mut app, KeyCode::Left);
        }
        assert_eq!(app.selected_column(), 0);
    }

    #[test]
    fn test_enter_drops_piece() {
        let mut app = App::new(&AppConfig::default()).unwrap();
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.engine().cell(5, 3), Some(Cell::Player1));
        assert_eq!(app.engine().current_player(), Player::Two);
        assert_eq!(app.message(), None);
    }

    #[test]
    fn test_full_column_message() {
        let mut app = App::new(&AppConfig::default()).unwrap();
        for _ in 0..6 {
            press(&mut app, KeyCode::Char(' '));
        }
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.message(), Some("Column is full!"));
    }

    #[test]
    fn test_win_message_and_restart() {
        let mut app = App::new(&AppConfig::default()).unwrap();
        // Player 1 stacks column 3, Player 2 stacks column 4
        for _ in 0..3 {
            press(&mut app, KeyCode::Enter);
            press(&mut app, KeyCode::Right);
            press(&mut app, KeyCode::Enter);
            press(&mut app, KeyCode::Left);
        }
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.message(), Some("Player 1 wins!"));
        assert_eq!(app.engine().outcome(), Outcome::Win(Player::One));

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.message(), Some("Game over! Press 'r' to restart."));

        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.message(), Some("New game started!"));
        assert_eq!(app.engine().outcome(), Outcome::InProgress);
        assert_eq!(app.selected_column(), 3);
    }

    #[test]
    fn test_restart_keeps_configured_size() {
        let mut config = AppConfig::default();
        config.board.height = 5;
        config.board.width = 9;
        let mut app = App::new(&config).unwrap();
        press(&mut app, KeyCode::Enter);

        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.engine().height(), 5);
        assert_eq!(app.engine().width(), 9);
        assert_eq!(app.engine().cell(4, 4), Some(Cell::Empty));
        for _ in 0..20 {
            press(&mut app, KeyCode::Right);
        }
        assert_eq!(app.selected_column(), 8);
    }

    #[test]
    fn test_quit() {
        let mut app = App::new(&AppConfig::default()).unwrap();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit());
    }
}
