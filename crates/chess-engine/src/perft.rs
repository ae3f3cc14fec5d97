//! Perft (performance test) for move generator validation.
//!
//! Perft counts the positions reachable in exactly `depth` moves, which can
//! be compared against known-correct values. Promotions are generated as
//! queen moves only, so counts diverge from published tables once
//! promotions occur.

use crate::{BoardError, Position};

/// Counts the leaf nodes at the given depth.
///
/// Only moves that [`Player::make_move`](crate::Player::make_move) accepts
/// are counted.
pub fn perft(position: &Position, depth: u32) -> Result<u64, BoardError> {
    if depth == 0 {
        return Ok(1);
    }

    let player = position.current_player();
    let mut nodes = 0u64;
    for mv in player.legal_moves() {
        let transition = player.make_move(mv)?;
        if !transition.status().is_done() {
            continue;
        }
        nodes += if depth == 1 {
            1
        } else {
            perft(transition.position(), depth - 1)?
        };
    }
    Ok(nodes)
}

/// Perft with divide: the node count below each root move, keyed by its
/// coordinates (`e2e4`) and sorted.
pub fn perft_divide(position: &Position, depth: u32) -> Result<Vec<(String, u64)>, BoardError> {
    let player = position.current_player();
    let mut results = Vec::with_capacity(player.legal_moves().len());

    for mv in player.legal_moves() {
        let transition = player.make_move(mv)?;
        if !transition.status().is_done() {
            continue;
        }
        let nodes = if depth > 1 {
            perft(transition.position(), depth - 1)?
        } else {
            1
        };
        results.push((mv.to_coordinates(), nodes));
    }

    results.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

    #[test]
    fn perft_startpos_depth_0() {
        assert_eq!(perft(&Position::standard(), 0), Ok(1));
    }

    #[test]
    fn perft_startpos_depth_1() {
        assert_eq!(perft(&Position::standard(), 1), Ok(20));
    }

    #[test]
    fn perft_startpos_depth_2() {
        assert_eq!(perft(&Position::standard(), 2), Ok(400));
    }

    #[test]
    fn perft_startpos_depth_3() {
        assert_eq!(perft(&Position::standard(), 3), Ok(8902));
    }

    #[test]
    #[ignore] // Slow without release optimizations
    fn perft_startpos_depth_4() {
        assert_eq!(perft(&Position::standard(), 4), Ok(197_281));
    }

    #[test]
    fn perft_kiwipete_depth_1() {
        let position = Position::from_fen(KIWIPETE).unwrap();
        assert_eq!(perft(&position, 1), Ok(48));
    }

    #[test]
    fn perft_kiwipete_depth_2() {
        let position = Position::from_fen(KIWIPETE).unwrap();
        assert_eq!(perft(&position, 2), Ok(2039));
    }

    #[test]
    fn divide_sums_to_perft() {
        let position = Position::standard();
        let divide = perft_divide(&position, 2).unwrap();
        assert_eq!(divide.len(), 20);
        assert_eq!(divide.iter().map(|(_, n)| n).sum::<u64>(), 400);
        assert!(divide.iter().all(|(_, n)| *n == 20));
        assert!(divide.windows(2).all(|w| w[0].0 < w[1].0));
        assert!(divide.iter().any(|(m, _)| m == "g1f3"));
    }
}
