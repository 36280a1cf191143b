use tictactoe_common::tictactoe::{BOARD_SIZE, Mark, TicTacToeGameState};

pub const MENU_TEXT: &str = "Choose a mode:\n  1) Play vs Computer\n  2) Play vs Friend\n  q) Quit";
pub const GAME_HELP: &str = "Enter a cell 1-9, r to restart, m for menu, q to quit";
pub const GAME_OVER_HELP: &str = "r to restart, m for menu, q to quit";

/// Text grid. Empty cells show their number; the winning line is
/// bracketed.
pub fn render_board(game: &TicTacToeGameState) -> String {
    let winning_line = game.winning_line().map(|winning| winning.line);
    let cells = game.board().cells();

    let rows: Vec<String> = cells
        .chunks(BOARD_SIZE)
        .enumerate()
        .map(|(row, marks)| {
            let rendered: Vec<String> = marks
                .iter()
                .enumerate()
                .map(|(col, mark)| {
                    let index = row * BOARD_SIZE + col;
                    let symbol = match mark {
                        Mark::Empty => char::from_digit((index + 1) as u32, 10).unwrap_or('?'),
                        _ => mark.symbol(),
                    };
                    if winning_line.is_some_and(|line| line.contains(index)) {
                        format!("[{}]", symbol)
                    } else {
                        format!(" {} ", symbol)
                    }
                })
                .collect();
            rendered.join("|")
        })
        .collect();

    rows.join("\n---+---+---\n")
}

pub fn render_game(game: &TicTacToeGameState) -> String {
    format!("\n{}\n\n{}", render_board(game), game.status_text())
}
