//! A new piece and a new variant built entirely outside the crate.

use std::collections::BTreeSet;
use std::sync::Arc;

use tabula_core::pieces::{chess, leap, Movement};
use tabula_core::{
    Board, Color, Game, GameError, Move, Offset, Outcome, Piece, PieceKind, Position, SquareGrid, Topology,
    VariantRules,
};

const CAMEL: PieceKind = PieceKind::Custom(0);

const CAMEL_LEAPS: [Offset; 8] = [
    Offset { df: 1, dr: 3 },
    Offset { df: 3, dr: 1 },
    Offset { df: 3, dr: -1 },
    Offset { df: 1, dr: -3 },
    Offset { df: -1, dr: -3 },
    Offset { df: -3, dr: -1 },
    Offset { df: -3, dr: 1 },
    Offset { df: -1, dr: 3 },
];

/// (1, 3) leaper.
struct Camel;

impl Movement for Camel {
    fn destinations(&self, piece: Piece, origin: Position, board: &Board, _: &dyn VariantRules) -> BTreeSet<Position> {
        let mut out = BTreeSet::new();
        leap(piece, origin, board, &CAMEL_LEAPS, &mut out);
        out
    }
}

/// Camels and kings on a 6×6 board; capturing the enemy king wins.
#[derive(Debug)]
struct CamelHunt;

impl VariantRules for CamelHunt {
    fn name(&self) -> &str {
        "camel-hunt"
    }

    fn topology(&self) -> Arc<dyn Topology> {
        Arc::new(SquareGrid::new(6, 6))
    }

    fn initial_layout(&self) -> Vec<(Position, Piece)> {
        vec![
            (Position::new(0, 0), Piece::new(CAMEL, Color::White)),
            (Position::new(5, 0), Piece::new(PieceKind::King, Color::White)),
            (Position::new(5, 5), Piece::new(CAMEL, Color::Black)),
            (Position::new(0, 5), Piece::new(PieceKind::King, Color::Black)),
        ]
    }

    fn movement(&self, kind: PieceKind) -> Option<&dyn Movement> {
        match kind {
            CAMEL => Some(&Camel),
            PieceKind::King => Some(&chess::King),
            _ => None,
        }
    }

    fn symbol(&self, piece: Piece) -> char {
        match (piece.kind, piece.color) {
            (CAMEL, Color::White) => 'C',
            (CAMEL, Color::Black) => 'c',
            (kind, Color::White) => kind.letter(),
            (kind, Color::Black) => kind.letter().to_ascii_lowercase(),
        }
    }

    fn check_move(&self, _board_after: &Board, mv: &Move) -> Result<(), String> {
        // Kings may not leave the two edge files
        let edge = mv.destination().file == 0 || mv.destination().file == 5;
        if mv.piece().kind == PieceKind::King && !edge {
            Err("kings stay on the edge files".to_string())
        } else {
            Ok(())
        }
    }

    fn outcome(&self, board: &Board, to_move: Color) -> Option<Outcome> {
        let has_king = board
            .pieces()
            .any(|(_, p)| p.kind == PieceKind::King && p.color == to_move);
        (!has_king).then_some(Outcome::Decided {
            winner: to_move.opponent(),
        })
    }
}

#[test]
fn test_custom_piece_moves() {
    let mut game = Game::new(Arc::new(CamelHunt)).unwrap();
    let candidates = game.select_origin(Position::new(0, 0)).unwrap();
    let expected: BTreeSet<Position> = [Position::new(1, 3), Position::new(3, 1)].into();
    assert_eq!(candidates, expected);
}

#[test]
fn test_custom_hook_rejects() {
    let mut game = Game::new(Arc::new(CamelHunt)).unwrap();
    let err = game.submit_move(Position::new(5, 0), Position::new(4, 0)).unwrap_err();
    assert!(matches!(err, GameError::RuleViolation { .. }));

    let legal = game.legal_destinations(Position::new(5, 0)).unwrap();
    assert_eq!(legal, [Position::new(5, 1)].into());
}

#[test]
fn test_custom_termination_and_rollback() {
    let layout = [
        (Position::new(2, 2), Piece::new(CAMEL, Color::White)),
        (Position::new(5, 5), Piece::new(PieceKind::King, Color::Black)),
        (Position::new(0, 0), Piece::new(PieceKind::King, Color::White)),
    ];
    let mut game = Game::from_position(Arc::new(CamelHunt), layout, Color::White).unwrap();

    // c3 to f6 is a (3, 3) jump: not a camel move
    assert!(game.submit_move(Position::new(2, 2), Position::new(5, 5)).is_err());

    let mut game = Game::from_position(
        Arc::new(CamelHunt),
        [
            (Position::new(2, 2), Piece::new(CAMEL, Color::White)),
            (Position::new(5, 3), Piece::new(PieceKind::King, Color::Black)),
            (Position::new(0, 0), Piece::new(PieceKind::King, Color::White)),
        ],
        Color::White,
    )
    .unwrap();
    let mv = game.submit_move(Position::new(2, 2), Position::new(5, 3)).unwrap();
    assert_eq!(mv.captured(), Some(Piece::new(PieceKind::King, Color::Black)));
    assert_eq!(game.outcome(), Some(Outcome::Decided { winner: Color::White }));

    game.rollback(1).unwrap();
    assert!(game.outcome().is_none());
    assert_eq!(game.active_color(), Color::White);
}

#[test]
fn test_custom_symbols_in_view() {
    let game = Game::new(Arc::new(CamelHunt)).unwrap();
    let view = game.board_view();
    let symbols: String = view
        .cells()
        .iter()
        .filter_map(|c| c.piece)
        .map(|p| game.rules().symbol(p))
        .collect();
    assert_eq!(symbols.len(), 4);
    assert!(symbols.contains('C') && symbols.contains('c'));
}
