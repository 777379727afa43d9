//! Node counting over the pseudo-legal move tree.

use crate::error::Error;
use crate::model::board::Board;

/// Count the leaves of the pseudo-legal tree `depth` plies deep.
///
/// Branches by cloning, so the input board is untouched. Counts
/// pseudo-legal continuations, not legal ones; the numbers match the
/// classical perft tables only at depths where king-safety filtering
/// has not yet pruned anything.
pub fn perft(board: &Board, depth: u32) -> Result<u64, Error> {
    if depth == 0 {
        return Ok(1);
    }
    let moves = board.moves_for(board.turn);
    if depth == 1 {
        return Ok(moves.len() as u64);
    }
    let mut nodes = 0;
    for mv in moves {
        let mut branch = board.clone();
        branch.play(mv)?;
        nodes += perft(&branch, depth - 1)?;
    }
    Ok(nodes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startpos_shallow_counts() {
        let board = Board::start();
        assert_eq!(perft(&board, 0), Ok(1));
        assert_eq!(perft(&board, 1), Ok(20));
        assert_eq!(perft(&board, 2), Ok(400));
    }
}
