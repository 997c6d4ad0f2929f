//! Checkers movements: diagonal steps and chained jump captures.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use super::{Movement, Piece, PieceKind};
use crate::board::Board;
use crate::position::{Offset, Position};
use crate::variants::VariantRules;

/// Uncrowned piece: moves and jumps diagonally forward only.
pub struct Man;

/// Crowned piece: moves and jumps in all four diagonal directions.
pub struct CrownedKing;

/// Directions a checkers piece may travel in.
pub fn directions(piece: Piece, board: &Board) -> &'static [Offset] {
    let topology = board.topology();
    match piece.kind {
        PieceKind::Man => topology.forward_diagonals(piece.color),
        _ => topology.diagonals(),
    }
}

/// Every square reachable by one or more jumps, with the squares of the
/// pieces jumped on the way there.
///
/// Breadth-first, so each landing square maps to its shortest chain. No
/// piece is jumped twice in one chain and the origin is never a landing.
pub fn jump_paths(piece: Piece, origin: Position, board: &Board) -> BTreeMap<Position, Vec<Position>> {
    let topology = board.topology();
    let dirs = directions(piece, board);

    let mut paths: BTreeMap<Position, Vec<Position>> = BTreeMap::new();
    let mut queue = VecDeque::from([(origin, Vec::new())]);

    while let Some((from, jumped)) = queue.pop_front() {
        for &dir in dirs {
            let Some(over) = topology.step(from, dir) else {
                continue;
            };
            let Some(landing) = topology.step(over, dir) else {
                continue;
            };
            let enemy = board.piece_at(over).is_some_and(|p| p.color != piece.color);
            if !enemy || jumped.contains(&over) || !board.is_empty(landing) || landing == origin {
                continue;
            }
            if paths.contains_key(&landing) {
                continue;
            }
            let mut chain = jumped.clone();
            chain.push(over);
            paths.insert(landing, chain.clone());
            queue.push_back((landing, chain));
        }
    }

    paths
}

fn step_and_jump(piece: Piece, origin: Position, board: &Board) -> BTreeSet<Position> {
    let topology = board.topology();
    let mut out: BTreeSet<Position> = directions(piece, board)
        .iter()
        .filter_map(|&dir| topology.step(origin, dir))
        .filter(|pos| board.is_empty(*pos))
        .collect();
    out.extend(jump_paths(piece, origin, board).into_keys());
    out
}

impl Movement for Man {
    fn destinations(&self, piece: Piece, origin: Position, board: &Board, _: &dyn VariantRules) -> BTreeSet<Position> {
        step_and_jump(piece, origin, board)
    }
}

impl Movement for CrownedKing {
    fn destinations(&self, piece: Piece, origin: Position, board: &Board, _: &dyn VariantRules) -> BTreeSet<Position> {
        step_and_jump(piece, origin, board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::topology::{SquareGrid, Topology};
    use crate::variants::Checkers;
    use std::sync::Arc;

    fn board_with(pieces: &[(&str, Piece)]) -> Board {
        let grid = SquareGrid::standard();
        let layout = pieces.iter().map(|(name, p)| (grid.parse(name).unwrap(), *p));
        Board::with_layout(Arc::new(grid), layout).unwrap()
    }

    fn at(name: &str) -> Position {
        SquareGrid::standard().parse(name).unwrap()
    }

    fn names(set: &BTreeSet<Position>) -> Vec<String> {
        set.iter().map(|p| p.to_string()).collect()
    }

    const WHITE_MAN: Piece = Piece::new(PieceKind::Man, Color::White);
    const BLACK_MAN: Piece = Piece::new(PieceKind::Man, Color::Black);
    const WHITE_KING: Piece = Piece::new(PieceKind::CrownedKing, Color::White);

    #[test]
    fn test_man_steps_forward_only() {
        let board = board_with(&[("c3", WHITE_MAN)]);
        let dests = Man.destinations(WHITE_MAN, at("c3"), &board, &Checkers);
        assert_eq!(names(&dests), ["b4", "d4"]);
    }

    #[test]
    fn test_man_single_jump() {
        let board = board_with(&[("c3", WHITE_MAN), ("d4", BLACK_MAN)]);
        let dests = Man.destinations(WHITE_MAN, at("c3"), &board, &Checkers);
        assert_eq!(names(&dests), ["b4", "e5"]);

        let paths = jump_paths(WHITE_MAN, at("c3"), &board);
        assert_eq!(paths.get(&at("e5")), Some(&vec![at("d4")]));
    }

    #[test]
    fn test_man_cannot_jump_own_piece_or_onto_occupied() {
        let board = board_with(&[("c3", WHITE_MAN), ("d4", WHITE_MAN), ("b4", BLACK_MAN), ("a5", BLACK_MAN)]);
        let dests = Man.destinations(WHITE_MAN, at("c3"), &board, &Checkers);
        assert!(dests.is_empty());
    }

    #[test]
    fn test_man_multi_jump() {
        let board = board_with(&[("a1", WHITE_MAN), ("b2", BLACK_MAN), ("d4", BLACK_MAN)]);
        let paths = jump_paths(WHITE_MAN, at("a1"), &board);

        // a1 x c3 x e5; every landing is a candidate
        assert_eq!(paths.get(&at("c3")), Some(&vec![at("b2")]));
        assert_eq!(paths.get(&at("e5")), Some(&vec![at("b2"), at("d4")]));

        let dests = Man.destinations(WHITE_MAN, at("a1"), &board, &Checkers);
        assert_eq!(names(&dests), ["c3", "e5"]);
    }

    #[test]
    fn test_man_does_not_jump_backwards() {
        let board = board_with(&[("d4", WHITE_MAN), ("c3", BLACK_MAN)]);
        let dests = Man.destinations(WHITE_MAN, at("d4"), &board, &Checkers);
        assert_eq!(names(&dests), ["c5", "e5"]);
    }

    #[test]
    fn test_crowned_king_moves_backwards() {
        let board = board_with(&[("d4", WHITE_KING), ("c3", BLACK_MAN)]);
        let dests = CrownedKing.destinations(WHITE_KING, at("d4"), &board, &Checkers);
        assert_eq!(names(&dests), ["b2", "c5", "e3", "e5"]);
    }

    #[test]
    fn test_king_chain_never_rejumps() {
        // A ring of four men around e5: the king can circle once
        let board = board_with(&[
            ("c3", WHITE_KING),
            ("d4", BLACK_MAN),
            ("f4", BLACK_MAN),
            ("f6", BLACK_MAN),
            ("d6", BLACK_MAN),
        ]);
        let paths = jump_paths(WHITE_KING, at("c3"), &board);
        for chain in paths.values() {
            let unique: BTreeSet<_> = chain.iter().collect();
            assert_eq!(unique.len(), chain.len());
        }
        // Origin is never a landing square
        assert!(!paths.contains_key(&at("c3")));
    }
}
