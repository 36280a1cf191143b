use crate::log;
use super::board::Board;
use super::bot_controller::{BotInput, SearchResult, calculate_move};
use super::types::{GameError, GameMode, GameStatus, Player, WinningLine};
use super::win_detector::check_win_with_line;

/// One game between two seats. Owns the authoritative board; the engine
/// only ever sees copies of it.
#[derive(Debug, Clone)]
pub struct TicTacToeGameState {
    board: Board,
    mode: GameMode,
    first_player: Player,
    current_player: Player,
    status: GameStatus,
    last_move: Option<usize>,
}

impl TicTacToeGameState {
    pub fn new(mode: GameMode, first_player: Player) -> Self {
        Self {
            board: Board::new(),
            mode,
            first_player,
            current_player: first_player,
            status: GameStatus::InProgress,
            last_move: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn first_player(&self) -> Player {
        self.first_player
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn last_move(&self) -> Option<usize> {
        self.last_move
    }

    pub fn is_over(&self) -> bool {
        self.status != GameStatus::InProgress
    }

    pub fn restart(&mut self, first_player: Player) {
        *self = Self::new(self.mode, first_player);
    }

    pub fn is_computer_turn(&self) -> bool {
        match self.mode {
            GameMode::VsComputer { computer } => !self.is_over() && computer == self.current_player,
            GameMode::VsFriend => false,
        }
    }

    /// Applies a move for the side to move. Human and computer moves both
    /// go through here.
    pub fn place_mark(&mut self, index: usize) -> Result<GameStatus, GameError> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }

        if !self.board.is_empty(index)? {
            return Err(GameError::CellOccupied { index });
        }

        self.board.set_cell(index, self.current_player)?;
        self.last_move = Some(index);
        debug_assert!(
            self.board
                .mark_count(Player::X)
                .abs_diff(self.board.mark_count(Player::O))
                <= 1
        );
        log!("{} marks cell {}", self.current_player, index + 1);

        self.status = GameStatus::from_outcome(self.board.evaluate());

        if self.status == GameStatus::InProgress {
            self.current_player = self.current_player.opponent();
        } else {
            log!("Game over: {:?}", self.status);
        }

        Ok(self.status)
    }

    /// Human move. Rejected while the computer is to move.
    pub fn place_human_mark(&mut self, index: usize) -> Result<GameStatus, GameError> {
        if self.is_computer_turn() {
            return Err(GameError::NotHumanTurn);
        }
        self.place_mark(index)
    }

    /// Searches the current position without changing it.
    pub fn computer_move(&self) -> Result<SearchResult, GameError> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }
        Ok(calculate_move(&BotInput::from_game_state(self))?)
    }

    pub fn play_computer_turn(&mut self) -> Result<GameStatus, GameError> {
        let result = self.computer_move()?;
        self.place_mark(result.cell)
    }

    pub fn winning_line(&self) -> Option<WinningLine> {
        match self.status {
            GameStatus::XWon | GameStatus::OWon => check_win_with_line(&self.board),
            GameStatus::InProgress | GameStatus::Draw => None,
        }
    }

    pub fn status_text(&self) -> String {
        match (self.status, self.mode) {
            (GameStatus::InProgress, _) => format!("Player {}'s turn", self.current_player),
            (GameStatus::Draw, GameMode::VsComputer { .. }) => "It's a Draw!".to_string(),
            (GameStatus::Draw, GameMode::VsFriend) => "Game ended in a Draw!".to_string(),
            (status, GameMode::VsComputer { computer }) => {
                if status.winner() == Some(computer) {
                    "Computer Wins!".to_string()
                } else {
                    "You Win!".to_string()
                }
            }
            (status, GameMode::VsFriend) => match status.winner() {
                Some(winner) => format!("Player {} Wins!", winner),
                None => "Game ended in a Draw!".to_string(),
            },
        }
    }
}
