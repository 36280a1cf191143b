use super::board::Board;
use super::types::{Line, Outcome, Player, WinningLine};

/// Rows, then columns, then diagonals. Highlighting depends on this order.
pub const LINES: [Line; 8] = [
    Line([0, 1, 2]),
    Line([3, 4, 5]),
    Line([6, 7, 8]),
    Line([0, 3, 6]),
    Line([1, 4, 7]),
    Line([2, 5, 8]),
    Line([0, 4, 8]),
    Line([2, 4, 6]),
];

pub fn winning_line(board: &Board, player: Player) -> Option<Line> {
    let mark = player.mark();
    let cells = board.cells();
    LINES
        .iter()
        .find(|line| line.cells().iter().all(|&index| cells[index] == mark))
        .copied()
}

pub fn check_win_with_line(board: &Board) -> Option<WinningLine> {
    let cells = board.cells();
    LINES.iter().find_map(|line| {
        let [a, b, c] = line.cells();
        let player = cells[a].player()?;
        if cells[b] == cells[a] && cells[c] == cells[a] {
            Some(WinningLine::new(player, *line))
        } else {
            None
        }
    })
}

pub fn check_win(board: &Board) -> Option<Player> {
    check_win_with_line(board).map(|winning| winning.player)
}

pub fn evaluate(board: &Board) -> Outcome {
    if let Some(player) = check_win(board) {
        return Outcome::Win(player);
    }
    if board.is_full() {
        Outcome::Draw
    } else {
        Outcome::Undecided
    }
}
