use crate::debug;
use super::board::Board;
use super::game_state::TicTacToeGameState;
use super::types::{EngineError, Outcome, Player};

pub const WIN_SCORE: i32 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchResult {
    pub cell: usize,
    pub value: i32,
    pub nodes_visited: u64,
    pub terminal_nodes: u64,
}

pub struct BotInput {
    pub board: Board,
    pub current_player: Player,
}

impl BotInput {
    pub fn from_game_state(state: &TicTacToeGameState) -> Self {
        Self {
            board: *state.board(),
            current_player: state.current_player(),
        }
    }
}

pub fn calculate_move(input: &BotInput) -> Result<SearchResult, EngineError> {
    best_move(&input.board, input.current_player)
}

/// Picks the cell with the greatest minimax value for `player`. Ties go to
/// the lowest index. The caller's board is never touched; the search runs
/// on a copy.
pub fn best_move(board: &Board, player: Player) -> Result<SearchResult, EngineError> {
    let outcome = board.evaluate();
    if outcome.is_decided() {
        return Err(EngineError::PreconditionViolated(outcome));
    }

    let mut scratch = *board;
    let mut minimax = Minimax::new(player);
    let mut best: Option<(usize, i32)> = None;

    for cell in scratch.empty_cells() {
        let mut child = scratch.place_empty(cell, player);
        let value = minimax.value(&mut child, 1, false);
        if best.is_none_or(|(_, best_value)| value > best_value) {
            best = Some((cell, value));
        }
    }

    // An undecided board always has an empty cell.
    let (cell, value) = best.ok_or(EngineError::PreconditionViolated(Outcome::Draw))?;
    debug!(
        "{} plays cell {} (value {}, {} nodes, {} terminal)",
        player,
        cell,
        value,
        minimax.nodes_visited(),
        minimax.terminal_nodes()
    );

    Ok(SearchResult {
        cell,
        value,
        nodes_visited: minimax.nodes_visited(),
        terminal_nodes: minimax.terminal_nodes(),
    })
}

/// Exhaustive minimax scoring positions from `maximizer`'s point of view.
/// Every reachable position is visited, with no pruning and no
/// transposition table. Scores are depth adjusted so the maximizer prefers
/// the quickest win and, when losing, the longest game.
pub struct Minimax {
    maximizer: Player,
    nodes_visited: u64,
    terminal_nodes: u64,
}

impl Minimax {
    pub fn new(maximizer: Player) -> Self {
        Self {
            maximizer,
            nodes_visited: 0,
            terminal_nodes: 0,
        }
    }

    pub fn nodes_visited(&self) -> u64 {
        self.nodes_visited
    }

    pub fn terminal_nodes(&self) -> u64 {
        self.terminal_nodes
    }

    /// Game-theoretic value of `board` at ply `depth`. When `maximizing`
    /// the maximizer is to move, otherwise its opponent. Every mark placed
    /// while exploring is removed again before returning.
    pub fn value(&mut self, board: &mut Board, depth: i32, maximizing: bool) -> i32 {
        self.nodes_visited += 1;

        match board.evaluate() {
            Outcome::Win(winner) => {
                self.terminal_nodes += 1;
                return if winner == self.maximizer {
                    WIN_SCORE - depth
                } else {
                    depth - WIN_SCORE
                };
            }
            Outcome::Draw => {
                self.terminal_nodes += 1;
                return 0;
            }
            Outcome::Undecided => {}
        }

        let mover = if maximizing {
            self.maximizer
        } else {
            self.maximizer.opponent()
        };

        let mut best = if maximizing { i32::MIN } else { i32::MAX };
        for cell in board.empty_cells() {
            let mut child = board.place_empty(cell, mover);
            let score = self.value(&mut child, depth + 1, !maximizing);
            best = if maximizing {
                best.max(score)
            } else {
                best.min(score)
            };
        }

        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    fn play_out(board: &mut Board, bot: Player, to_move: Player) {
        match board.evaluate() {
            Outcome::Win(winner) => {
                assert_eq!(winner, bot, "bot lost on\n{}", board);
                return;
            }
            Outcome::Draw => return,
            Outcome::Undecided => {}
        }

        if to_move == bot {
            let result = best_move(board, bot).unwrap();
            let mut child = board.place(result.cell, bot).unwrap();
            play_out(&mut child, bot, bot.opponent());
        } else {
            for cell in board.empty_cells() {
                let mut child = board.place(cell, to_move).unwrap();
                play_out(&mut child, bot, bot);
            }
        }
    }

    #[test]
    fn test_never_loses_as_second_player() {
        let mut board = Board::new();
        play_out(&mut board, Player::O, Player::X);
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_never_loses_as_first_player() {
        let mut board = Board::new();
        play_out(&mut board, Player::X, Player::X);
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_takes_fastest_win() {
        // Cell 2 also wins, two plies later.
        let result = best_move(&board("XX. .OO ..X"), Player::O).unwrap();
        assert_eq!(result.cell, 3);
        assert_eq!(result.value, WIN_SCORE - 1);
    }

    #[test]
    fn test_delays_unavoidable_loss() {
        let result = best_move(&board("... .XX .O."), Player::O).unwrap();
        assert_eq!(result.cell, 3);
        assert_eq!(result.value, 4 - WIN_SCORE);
    }

    #[test]
    fn test_blocks_immediate_threat() {
        let result = best_move(&board("XX. .O. ..."), Player::O).unwrap();
        assert_eq!(result.cell, 2);
        assert_eq!(result.value, 0);
    }

    #[test]
    fn test_center_opening_reply_is_first_corner() {
        let result = best_move(&board("... .X. ..."), Player::O).unwrap();
        assert!([0, 2, 6, 8].contains(&result.cell));
        assert_eq!(result.cell, 0);
        assert_eq!(result.value, 0);
    }

    #[test]
    fn test_empty_board_search_is_exhaustive_and_bounded() {
        let result = best_move(&Board::new(), Player::X).unwrap();
        assert_eq!(result.cell, 0);
        assert_eq!(result.value, 0);
        assert_eq!(result.terminal_nodes, 255_168);
        assert_eq!(result.nodes_visited, 549_945);
        assert!(result.terminal_nodes <= (1..=9).product::<u64>());
    }

    #[test]
    fn test_best_move_is_deterministic() {
        let board = board("X.. ... ..O");
        let first = best_move(&board, Player::X).unwrap();
        let second = best_move(&board, Player::X).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_best_move_leaves_board_unchanged() {
        let board = board("X.O .X. ...");
        let before = board;
        best_move(&board, Player::O).unwrap();
        assert_eq!(board, before);
    }

    #[test]
    fn test_value_leaves_board_unchanged() {
        let mut board = board("X.. .O. ...");
        let before = board;
        let mut minimax = Minimax::new(Player::X);
        minimax.value(&mut board, 0, true);
        assert_eq!(board, before);
        assert!(minimax.nodes_visited() > 1);
    }

    #[test]
    fn test_terminal_scores_are_depth_adjusted() {
        let mut won = board("XXX OO. ...");
        assert_eq!(Minimax::new(Player::X).value(&mut won, 3, false), WIN_SCORE - 3);
        assert_eq!(Minimax::new(Player::O).value(&mut won, 3, true), 3 - WIN_SCORE);

        let mut drawn = board("XOX OXO OXO");
        assert_eq!(Minimax::new(Player::X).value(&mut drawn, 9, true), 0);
    }

    #[test]
    fn test_best_move_on_finished_board() {
        assert_eq!(
            best_move(&board("XXX OO. ..."), Player::O),
            Err(EngineError::PreconditionViolated(Outcome::Win(Player::X)))
        );
        assert_eq!(
            best_move(&board("XOX OXO OXO"), Player::X),
            Err(EngineError::PreconditionViolated(Outcome::Draw))
        );
    }

    #[test]
    fn test_calculate_move_from_bot_input() {
        let input = BotInput {
            board: board("OO. XX. X.."),
            current_player: Player::O,
        };
        assert_eq!(calculate_move(&input).unwrap().cell, 2);
    }
}
