mod board;
mod bot_controller;
mod game_state;
mod types;
mod win_detector;

pub use board::{Board, ParseBoardError, PlacedMark};
pub use bot_controller::{BotInput, Minimax, SearchResult, WIN_SCORE, best_move, calculate_move};
pub use game_state::TicTacToeGameState;
pub use types::{
    BOARD_SIZE, BoardError, CELL_COUNT, EngineError, FirstPlayerMode, GameError, GameMode,
    GameStatus, Line, Mark, Outcome, Player, WinningLine,
};
pub use win_detector::{LINES, check_win, check_win_with_line, evaluate, winning_line};
