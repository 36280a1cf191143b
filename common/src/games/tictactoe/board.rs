use std::fmt;
use std::ops::{Deref, DerefMut};
use std::str::FromStr;

use derive_more::{Display, Error};

use super::types::{BOARD_SIZE, BoardError, CELL_COUNT, Line, Mark, Outcome, Player};
use super::win_detector;

/// Row-major 3x3 grid. Index 0 is the top-left cell, 8 the bottom-right.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Mark; CELL_COUNT],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cells(&self) -> &[Mark; CELL_COUNT] {
        &self.cells
    }

    pub fn get(&self, index: usize) -> Result<Mark, BoardError> {
        check_index(index)?;
        Ok(self.cells[index])
    }

    pub fn is_empty(&self, index: usize) -> Result<bool, BoardError> {
        Ok(self.get(index)? == Mark::Empty)
    }

    /// Marks a cell for `player`. The cell must be empty; this is only
    /// asserted in debug builds.
    pub fn set_cell(&mut self, index: usize, player: Player) -> Result<(), BoardError> {
        check_index(index)?;
        debug_assert_eq!(self.cells[index], Mark::Empty, "cell {index} is already marked");
        self.cells[index] = player.mark();
        Ok(())
    }

    pub fn clear_cell(&mut self, index: usize) -> Result<(), BoardError> {
        check_index(index)?;
        self.cells[index] = Mark::Empty;
        Ok(())
    }

    /// Marks an empty cell for the lifetime of the returned guard. The cell
    /// is cleared again when the guard is dropped.
    pub fn place(&mut self, index: usize, player: Player) -> Result<PlacedMark<'_>, BoardError> {
        if !self.is_empty(index)? {
            return Err(BoardError::CellOccupied { index });
        }
        Ok(self.place_empty(index, player))
    }

    /// `index` must come from [`Board::empty_cells`].
    pub(crate) fn place_empty(&mut self, index: usize, player: Player) -> PlacedMark<'_> {
        debug_assert_eq!(self.cells[index], Mark::Empty, "cell {index} is already marked");
        let previous = self.cells[index];
        self.cells[index] = player.mark();
        PlacedMark {
            board: self,
            index,
            previous,
        }
    }

    /// Indices of empty cells in ascending order, taken from a snapshot of
    /// the board so the caller may keep mutating it while iterating.
    pub fn empty_cells(&self) -> impl Iterator<Item = usize> + use<> {
        let cells = self.cells;
        (0..CELL_COUNT).filter(move |&index| cells[index] == Mark::Empty)
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&cell| cell != Mark::Empty)
    }

    pub fn mark_count(&self, player: Player) -> usize {
        let mark = player.mark();
        self.cells.iter().filter(|&&cell| cell == mark).count()
    }

    pub fn winning_line(&self, player: Player) -> Option<Line> {
        win_detector::winning_line(self, player)
    }

    pub fn evaluate(&self) -> Outcome {
        win_detector::evaluate(self)
    }
}

fn check_index(index: usize) -> Result<(), BoardError> {
    if index >= CELL_COUNT {
        return Err(BoardError::IndexOutOfRange { index });
    }
    Ok(())
}

/// Scoped mark placed by [`Board::place`]. Dereferences to the board it
/// borrows and puts back the cell's previous mark on every exit path.
pub struct PlacedMark<'a> {
    board: &'a mut Board,
    index: usize,
    previous: Mark,
}

impl PlacedMark<'_> {
    pub fn index(&self) -> usize {
        self.index
    }
}

impl Deref for PlacedMark<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for PlacedMark<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for PlacedMark<'_> {
    fn drop(&mut self) {
        self.board.cells[self.index] = self.previous;
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row_index, row) in self.cells.chunks(BOARD_SIZE).enumerate() {
            if row_index > 0 {
                writeln!(f)?;
            }
            let symbols: Vec<String> = row.iter().map(|cell| cell.symbol().to_string()).collect();
            write!(f, "{}", symbols.join(" "))?;
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, Error)]
pub enum ParseBoardError {
    #[display("unexpected board symbol '{_0}'")]
    InvalidSymbol(#[error(not(source))] char),
    #[display("expected 9 cells, got {_0}")]
    WrongLength(#[error(not(source))] usize),
}

impl FromStr for Board {
    type Err = ParseBoardError;

    /// Reads nine cells from `X`, `O` and `.`/`_`/`-` (empty). Whitespace
    /// and `|` separators are skipped.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cells = [Mark::Empty; CELL_COUNT];
        let mut count = 0;
        for ch in s.chars().filter(|ch| !ch.is_whitespace() && *ch != '|') {
            let mark = match ch {
                'X' | 'x' => Mark::X,
                'O' | 'o' => Mark::O,
                '.' | '_' | '-' => Mark::Empty,
                other => return Err(ParseBoardError::InvalidSymbol(other)),
            };
            if count < CELL_COUNT {
                cells[count] = mark;
            }
            count += 1;
        }
        if count != CELL_COUNT {
            return Err(ParseBoardError::WrongLength(count));
        }
        Ok(Self { cells })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        assert!((0..CELL_COUNT).all(|i| board.is_empty(i).unwrap()));
        assert!(!board.is_full());
        assert_eq!(board.empty_cells().count(), CELL_COUNT);
    }

    #[test]
    fn test_is_empty_out_of_range() {
        let board = Board::new();
        assert_eq!(board.is_empty(9), Err(BoardError::IndexOutOfRange { index: 9 }));
        assert_eq!(board.get(100), Err(BoardError::IndexOutOfRange { index: 100 }));
    }

    #[test]
    fn test_set_and_clear_cell() {
        let mut board = Board::new();
        board.set_cell(4, Player::X).unwrap();
        assert_eq!(board.get(4), Ok(Mark::X));
        assert!(!board.is_empty(4).unwrap());
        assert_eq!(board.mark_count(Player::X), 1);
        assert_eq!(board.mark_count(Player::O), 0);

        board.clear_cell(4).unwrap();
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_set_and_clear_cell_out_of_range() {
        let mut board = Board::new();
        assert!(board.set_cell(9, Player::O).is_err());
        assert!(board.clear_cell(12).is_err());
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_empty_cells_ascending() {
        let board = board("X.O .X. O..");
        let cells: Vec<usize> = board.empty_cells().collect();
        assert_eq!(cells, vec![1, 3, 5, 7, 8]);
    }

    #[test]
    fn test_placed_mark_reverts_on_drop() {
        let mut board = board("X.. ... ...");
        let before = board;
        {
            let placed = board.place(4, Player::O).unwrap();
            assert_eq!(placed.get(4), Ok(Mark::O));
            assert_eq!(placed.index(), 4);
        }
        assert_eq!(board, before);
    }

    #[test]
    fn test_placed_marks_nest() {
        let mut board = Board::new();
        {
            let mut first = board.place(0, Player::X).unwrap();
            {
                let second = first.place(8, Player::O).unwrap();
                assert_eq!(second.mark_count(Player::X), 1);
                assert_eq!(second.mark_count(Player::O), 1);
            }
            assert_eq!(first.get(8), Ok(Mark::Empty));
            assert_eq!(first.get(0), Ok(Mark::X));
        }
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_place_on_occupied_cell_is_rejected() {
        let mut board = Board::new();
        board.set_cell(4, Player::X).unwrap();
        let before = board;
        {
            let placed = board.place(4, Player::O);
            assert!(matches!(placed, Err(BoardError::CellOccupied { index: 4 })));
        }
        assert_eq!(board, before);
        assert_eq!(board.get(4), Ok(Mark::X));
    }

    #[test]
    #[should_panic(expected = "cell 4 is already marked")]
    #[cfg(debug_assertions)]
    fn test_set_cell_twice_panics_in_debug() {
        let mut board = Board::new();
        board.set_cell(4, Player::X).unwrap();
        let _ = board.set_cell(4, Player::O);
    }

    #[test]
    #[should_panic(expected = "cell 0 is already marked")]
    #[cfg(debug_assertions)]
    fn test_place_empty_on_occupied_cell_panics_in_debug() {
        let mut board: Board = "X.. ... ...".parse().unwrap();
        let _placed = board.place_empty(0, Player::O);
    }

    #[test]
    #[cfg(not(debug_assertions))]
    fn test_place_empty_restores_previous_mark() {
        let mut board: Board = "X.. ... ...".parse().unwrap();
        let before = board;
        {
            let placed = board.place_empty(0, Player::O);
            assert_eq!(placed.get(0), Ok(Mark::O));
        }
        assert_eq!(board, before);
    }

    #[test]
    fn test_place_out_of_range() {
        let mut board = Board::new();
        assert!(board.place(9, Player::X).is_err());
    }

    #[test]
    fn test_is_full() {
        assert!(board("XOX OXO OXO").is_full());
        assert!(!board("XOX OXO OX.").is_full());
    }

    #[test]
    fn test_parse_and_display() {
        let board = board("X|O|. _ X - o x .");
        assert_eq!(board.to_string(), "X O .\n. X .\nO X .");
        assert_eq!(board.to_string().parse::<Board>(), Ok(board));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("XO?......".parse::<Board>(), Err(ParseBoardError::InvalidSymbol('?')));
        assert_eq!("XO".parse::<Board>(), Err(ParseBoardError::WrongLength(2)));
        assert_eq!("..........".parse::<Board>(), Err(ParseBoardError::WrongLength(10)));
    }
}
