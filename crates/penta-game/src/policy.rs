//! Move selection for the built-in bot opponent.

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::{Board, CELLS, Selection};

/// Picks the bot's next claim: a uniformly random number among the
/// bot's own unmarked cells, or `None` when every cell is marked.
///
/// The policy never looks at the human player's board or marks. Whether
/// the chosen number is still claimable game-wide is the room's call —
/// this function only answers "what would I like to claim next?".
pub fn choose_claim<R: Rng + ?Sized>(
    board: &Board,
    selection: &Selection,
    rng: &mut R,
) -> Option<u8> {
    let open: Vec<usize> = (0..CELLS).filter(|&i| !selection.is_marked(i)).collect();
    open.choose(rng).map(|&i| board.number_at(i))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_choice_is_an_unmarked_cell_of_the_board() {
        let mut rng = StdRng::seed_from_u64(11);
        let board = Board::generate(&mut rng);
        let mut sel = Selection::new();
        for i in 0..10 {
            sel.mark(i);
        }

        for _ in 0..50 {
            let n = choose_claim(&board, &sel, &mut rng).expect("cells remain open");
            let idx = board.position_of(n).expect("picked number must be on the board");
            assert!(!sel.is_marked(idx), "picked an already-marked cell");
        }
    }

    #[test]
    fn test_single_open_cell_is_forced() {
        let mut rng = StdRng::seed_from_u64(12);
        let board = Board::generate(&mut rng);
        let mut sel = Selection::new();
        for i in 0..CELLS - 1 {
            sel.mark(i);
        }

        let n = choose_claim(&board, &sel, &mut rng);
        assert_eq!(n, Some(board.number_at(CELLS - 1)));
    }

    #[test]
    fn test_exhausted_board_yields_none() {
        let mut rng = StdRng::seed_from_u64(13);
        let board = Board::generate(&mut rng);
        let mut sel = Selection::new();
        for i in 0..CELLS {
            sel.mark(i);
        }

        assert_eq!(choose_claim(&board, &sel, &mut rng), None);
    }
}
