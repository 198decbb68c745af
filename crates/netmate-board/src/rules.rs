//! The `Rules` trait — how a confirmed move transforms a position.
//!
//! This is the seam between "what the server said happened" and "what
//! the board now looks like". The trait is a *pure value transform*:
//! `apply` takes a position and returns a new one, it never mutates in
//! place. That keeps renders and updates from ever aliasing the same
//! position, and makes every transform trivially unit-testable.

use netmate_protocol::{MovePayload, Square};

use crate::{Board, Piece, PieceKind, RulesError, Side};

/// Turns positions into successor positions, one confirmed move at a
/// time.
///
/// The associated `Position` is the full game state as this rules
/// implementation tracks it. The methods are static, taking the
/// position explicitly — implementations hold no state of their own.
pub trait Rules: Send + Sync + 'static {
    /// The full position state (placement, side to move, whatever else
    /// the implementation needs to apply the next move).
    type Position: Send + Sync + Clone;

    /// The position before any move has been made.
    fn initial() -> Self::Position;

    /// Applies one confirmed move, returning the successor position.
    ///
    /// Pure: the input position is untouched regardless of outcome.
    fn apply(
        position: &Self::Position,
        mv: &MovePayload,
    ) -> Result<Self::Position, RulesError>;

    /// Projects the position to a renderable board.
    fn board(position: &Self::Position) -> Board;

    /// The side to move in this position.
    fn turn(position: &Self::Position) -> Side;
}

// ---------------------------------------------------------------------------
// RelayRules
// ---------------------------------------------------------------------------

/// The position tracked by [`RelayRules`]: placement plus side to move.
#[derive(Debug, Clone)]
pub struct RelayPosition {
    board: Board,
    turn: Side,
}

/// A [`Rules`] implementation that relays, never referees.
///
/// Legality is the server's job: by the time a move arrives here the
/// server has already accepted it, so `RelayRules` applies it verbatim.
/// What it must still get right is the *projection* — chess moves have
/// side effects the wire doesn't spell out:
///
/// - a pawn moving diagonally onto an empty square is an en passant
///   capture (the passed pawn disappears);
/// - a king moving two files is castling (the rook hops too);
/// - a `promotion` field replaces the pawn on arrival.
///
/// The only failure is a confirmed move from an empty square, which
/// can't be projected at all and signals desync.
pub struct RelayRules;

impl Rules for RelayRules {
    type Position = RelayPosition;

    fn initial() -> RelayPosition {
        RelayPosition {
            board: Board::initial(),
            turn: Side::White,
        }
    }

    fn apply(
        position: &RelayPosition,
        mv: &MovePayload,
    ) -> Result<RelayPosition, RulesError> {
        let piece = position
            .board
            .get(mv.from)
            .ok_or(RulesError::NoPieceAt(mv.from))?;

        let mut board = position.board.clone();
        board.set(mv.from, None);

        // En passant: a pawn capturing onto an empty square took the
        // pawn it passed, which sits on the destination file at the
        // origin rank.
        if piece.kind == PieceKind::Pawn
            && mv.from.file() != mv.to.file()
            && board.get(mv.to).is_none()
        {
            if let Some(passed) = Square::new(mv.to.file(), mv.from.rank()) {
                board.set(passed, None);
            }
        }

        // Castling: the king jumping two files brings its rook across.
        if piece.kind == PieceKind::King {
            let delta = mv.to.file() as i8 - mv.from.file() as i8;
            if delta.abs() == 2 {
                let rank = mv.from.rank();
                let (rook_file, rook_dest) =
                    if delta > 0 { (7, 5) } else { (0, 3) };
                if let (Some(from_sq), Some(to_sq)) = (
                    Square::new(rook_file, rank),
                    Square::new(rook_dest, rank),
                ) {
                    if let Some(rook) = board.get(from_sq) {
                        board.set(from_sq, None);
                        board.set(to_sq, Some(rook));
                    }
                }
            }
        }

        // Promotion only applies to pawns; a stray promotion field on
        // another piece is ignored rather than rejected.
        let kind = match (piece.kind, mv.promotion) {
            (PieceKind::Pawn, Some(p)) => PieceKind::from(p),
            (kind, _) => kind,
        };
        board.set(mv.to, Some(Piece { side: piece.side, kind }));

        Ok(RelayPosition {
            board,
            turn: position.turn.opposite(),
        })
    }

    fn board(position: &RelayPosition) -> Board {
        position.board.clone()
    }

    fn turn(position: &RelayPosition) -> Side {
        position.turn
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use netmate_protocol::Promotion;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    fn mv(from: &str, to: &str) -> MovePayload {
        MovePayload::new(sq(from), sq(to))
    }

    /// Applies a coordinate-move sequence from the initial position.
    fn play(moves: &[(&str, &str)]) -> RelayPosition {
        let mut pos = RelayRules::initial();
        for (from, to) in moves {
            pos = RelayRules::apply(&pos, &mv(from, to)).unwrap();
        }
        pos
    }

    #[test]
    fn test_initial_position() {
        let pos = RelayRules::initial();
        assert_eq!(RelayRules::turn(&pos), Side::White);
        assert_eq!(RelayRules::board(&pos), Board::initial());
    }

    #[test]
    fn test_pawn_advance_moves_piece_and_flips_turn() {
        let pos = play(&[("e2", "e4")]);
        let board = RelayRules::board(&pos);
        assert_eq!(board.get(sq("e2")), None);
        assert_eq!(
            board.get(sq("e4")),
            Some(Piece { side: Side::White, kind: PieceKind::Pawn })
        );
        assert_eq!(RelayRules::turn(&pos), Side::Black);
    }

    #[test]
    fn test_apply_is_pure() {
        let pos = RelayRules::initial();
        let _ = RelayRules::apply(&pos, &mv("e2", "e4")).unwrap();
        // The input position is untouched.
        assert_eq!(RelayRules::board(&pos), Board::initial());
        assert_eq!(RelayRules::turn(&pos), Side::White);
    }

    #[test]
    fn test_capture_replaces_piece() {
        let pos = play(&[("e2", "e4"), ("d7", "d5"), ("e4", "d5")]);
        let board = RelayRules::board(&pos);
        assert_eq!(
            board.get(sq("d5")),
            Some(Piece { side: Side::White, kind: PieceKind::Pawn })
        );
        assert_eq!(board.get(sq("e4")), None);
        assert_eq!(board.get(sq("d7")), None);
    }

    #[test]
    fn test_en_passant_removes_passed_pawn() {
        // White pawn reaches e5; Black's d7-d5 passes it; exd6 e.p.
        let pos = play(&[
            ("e2", "e4"),
            ("a7", "a6"),
            ("e4", "e5"),
            ("d7", "d5"),
            ("e5", "d6"),
        ]);
        let board = RelayRules::board(&pos);
        assert_eq!(
            board.get(sq("d6")),
            Some(Piece { side: Side::White, kind: PieceKind::Pawn })
        );
        assert_eq!(board.get(sq("d5")), None, "passed pawn is captured");
        assert_eq!(board.get(sq("e5")), None);
    }

    #[test]
    fn test_kingside_castle_hops_rook() {
        // Clear f1/g1, then e1-g1.
        let pos = play(&[
            ("e2", "e4"),
            ("e7", "e5"),
            ("g1", "f3"),
            ("b8", "c6"),
            ("f1", "c4"),
            ("g8", "f6"),
            ("e1", "g1"),
        ]);
        let board = RelayRules::board(&pos);
        assert_eq!(
            board.get(sq("g1")),
            Some(Piece { side: Side::White, kind: PieceKind::King })
        );
        assert_eq!(
            board.get(sq("f1")),
            Some(Piece { side: Side::White, kind: PieceKind::Rook })
        );
        assert_eq!(board.get(sq("h1")), None);
        assert_eq!(board.get(sq("e1")), None);
    }

    #[test]
    fn test_queenside_castle_hops_rook() {
        let pos = play(&[
            ("d2", "d4"),
            ("d7", "d5"),
            ("b1", "c3"),
            ("b8", "c6"),
            ("c1", "f4"),
            ("c8", "f5"),
            ("d1", "d2"),
            ("d8", "d7"),
            ("e1", "c1"),
        ]);
        let board = RelayRules::board(&pos);
        assert_eq!(
            board.get(sq("c1")),
            Some(Piece { side: Side::White, kind: PieceKind::King })
        );
        assert_eq!(
            board.get(sq("d1")),
            Some(Piece { side: Side::White, kind: PieceKind::Rook })
        );
        assert_eq!(board.get(sq("a1")), None);
    }

    #[test]
    fn test_promotion_replaces_pawn() {
        // The relay applies what the server confirmed without judging
        // it, so a promotion can be exercised directly from the start
        // position.
        let pos = RelayRules::initial();
        let promote = MovePayload::new(sq("b7"), sq("b8"))
            .promoting(Promotion::Queen);
        let pos = RelayRules::apply(&pos, &promote).unwrap();
        let board = RelayRules::board(&pos);
        assert_eq!(
            board.get(sq("b8")),
            Some(Piece { side: Side::Black, kind: PieceKind::Queen })
        );
        assert_eq!(board.get(sq("b7")), None);
    }

    #[test]
    fn test_promotion_on_non_pawn_is_ignored() {
        let pos = RelayRules::initial();
        let weird = MovePayload::new(sq("g1"), sq("f3"))
            .promoting(Promotion::Queen);
        let pos = RelayRules::apply(&pos, &weird).unwrap();
        assert_eq!(
            RelayRules::board(&pos).get(sq("f3")),
            Some(Piece { side: Side::White, kind: PieceKind::Knight })
        );
    }

    #[test]
    fn test_move_from_empty_square_fails() {
        let pos = RelayRules::initial();
        let result = RelayRules::apply(&pos, &mv("e4", "e5"));
        assert_eq!(result.unwrap_err(), RulesError::NoPieceAt(sq("e4")));
    }

    #[test]
    fn test_same_sequence_yields_identical_board() {
        let moves =
            [("e2", "e4"), ("c7", "c5"), ("g1", "f3"), ("d7", "d6")];
        let a = play(&moves);
        let b = play(&moves);
        assert_eq!(RelayRules::board(&a), RelayRules::board(&b));
        assert_eq!(RelayRules::turn(&a), RelayRules::turn(&b));
    }
}
