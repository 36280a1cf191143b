use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};

pub const BOARD_SIZE: usize = 3;
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// Side to move. Unlike [`Mark`] it can never be empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    pub fn opponent(&self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    pub fn mark(&self) -> Mark {
        match self {
            Player::X => Mark::X,
            Player::O => Mark::O,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mark {
    #[default]
    Empty,
    X,
    O,
}

impl Mark {
    pub fn player(&self) -> Option<Player> {
        match self {
            Mark::Empty => None,
            Mark::X => Some(Player::X),
            Mark::O => Some(Player::O),
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Mark::Empty => '.',
            Mark::X => 'X',
            Mark::O => 'O',
        }
    }
}

impl From<Player> for Mark {
    fn from(player: Player) -> Self {
        player.mark()
    }
}

/// Three cell indices that win when uniformly marked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Line(pub [usize; 3]);

impl Line {
    pub fn cells(&self) -> [usize; 3] {
        self.0
    }

    pub fn contains(&self, index: usize) -> bool {
        self.0.contains(&index)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WinningLine {
    pub player: Player,
    pub line: Line,
}

impl WinningLine {
    pub fn new(player: Player, line: Line) -> Self {
        Self { player, line }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
pub enum Outcome {
    #[display("{_0} wins")]
    Win(Player),
    #[display("draw")]
    Draw,
    #[display("undecided")]
    Undecided,
}

impl Outcome {
    pub fn is_decided(&self) -> bool {
        !matches!(self, Outcome::Undecided)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    XWon,
    OWon,
    Draw,
}

impl GameStatus {
    pub fn from_outcome(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Win(Player::X) => GameStatus::XWon,
            Outcome::Win(Player::O) => GameStatus::OWon,
            Outcome::Draw => GameStatus::Draw,
            Outcome::Undecided => GameStatus::InProgress,
        }
    }

    pub fn winner(&self) -> Option<Player> {
        match self {
            GameStatus::XWon => Some(Player::X),
            GameStatus::OWon => Some(Player::O),
            GameStatus::InProgress | GameStatus::Draw => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FirstPlayerMode {
    /// X always opens.
    X,
    Random,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameMode {
    VsFriend,
    VsComputer { computer: Player },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, Error)]
pub enum BoardError {
    #[display("cell index {index} is out of range 0..9")]
    IndexOutOfRange { index: usize },
    #[display("cell {index} is already marked")]
    CellOccupied { index: usize },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, Error)]
pub enum EngineError {
    #[display("search requested on a finished board ({_0})")]
    PreconditionViolated(#[error(not(source))] Outcome),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, Error)]
pub enum GameError {
    #[display("Game is already over")]
    GameOver,
    #[display("Cell {} is already marked", index + 1)]
    CellOccupied { index: usize },
    #[display("It is the computer's turn")]
    NotHumanTurn,
    #[display("{_0}")]
    Board(BoardError),
    #[display("{_0}")]
    Engine(EngineError),
}

impl From<BoardError> for GameError {
    fn from(err: BoardError) -> Self {
        GameError::Board(err)
    }
}

impl From<EngineError> for GameError {
    fn from(err: EngineError) -> Self {
        GameError::Engine(err)
    }
}
