//! Board value types: sides, pieces, and the 8x8 grid.

use serde::{Deserialize, Serialize};

use std::fmt;

use netmate_protocol::{Promotion, Square};

// ---------------------------------------------------------------------------
// Side
// ---------------------------------------------------------------------------

/// One of the two sides of a chess game.
///
/// Serializes as `"w"`/`"b"` — the single-letter encoding the server's
/// rules engine uses for the side to move. `Display` gives the
/// presentation form ("White"/"Black").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    #[serde(rename = "w")]
    White,
    #[serde(rename = "b")]
    Black,
}

impl Side {
    /// The side that moves after this one.
    pub fn opposite(&self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Side::White => "White",
            Side::Black => "Black",
        };
        write!(f, "{s}")
    }
}

// ---------------------------------------------------------------------------
// Pieces
// ---------------------------------------------------------------------------

/// The six piece kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// The lowercase letter used in board rendering (`p n b r q k`).
    pub fn letter(&self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }
}

/// A confirmed promotion names the piece the pawn becomes.
impl From<Promotion> for PieceKind {
    fn from(p: Promotion) -> Self {
        match p {
            Promotion::Queen => PieceKind::Queen,
            Promotion::Rook => PieceKind::Rook,
            Promotion::Bishop => PieceKind::Bishop,
            Promotion::Knight => PieceKind::Knight,
        }
    }
}

/// A piece on the board: kind plus owning side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub side: Side,
    pub kind: PieceKind,
}

impl Piece {
    /// Rendering letter: uppercase for White, lowercase for Black.
    pub fn letter(&self) -> char {
        match self.side {
            Side::White => self.kind.letter().to_ascii_uppercase(),
            Side::Black => self.kind.letter(),
        }
    }
}

// ---------------------------------------------------------------------------
// Board
// ---------------------------------------------------------------------------

/// The 8x8 grid of squares.
///
/// Stored rank-major (`squares[rank][file]`), indexed by [`Square`],
/// whose construction already guarantees both indices are in range.
/// Only the rules layer mutates a board; everyone else gets clones of
/// completed positions, never a view into one mid-update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
}

impl Board {
    /// A board with no pieces on it.
    pub fn empty() -> Self {
        Self {
            squares: [[None; 8]; 8],
        }
    }

    /// The standard starting position.
    pub fn initial() -> Self {
        use PieceKind::*;

        let back = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];
        let mut board = Board::empty();
        for (file, &kind) in back.iter().enumerate() {
            board.squares[0][file] = Some(Piece { side: Side::White, kind });
            board.squares[7][file] = Some(Piece { side: Side::Black, kind });
        }
        for file in 0..8 {
            board.squares[1][file] =
                Some(Piece { side: Side::White, kind: Pawn });
            board.squares[6][file] =
                Some(Piece { side: Side::Black, kind: Pawn });
        }
        board
    }

    /// The piece on the given square, if any.
    pub fn get(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.rank() as usize][sq.file() as usize]
    }

    /// Places (or clears) a square. Restricted to the rules layer:
    /// boards leave this crate only as finished positions.
    pub(crate) fn set(&mut self, sq: Square, piece: Option<Piece>) {
        self.squares[sq.rank() as usize][sq.file() as usize] = piece;
    }
}

/// Terminal rendering, White's perspective:
///
/// ```text
/// 8  r n b q k b n r
/// 7  p p p p p p p p
/// ...
/// 1  R N B Q K B N R
///    a b c d e f g h
/// ```
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8 {
                let c = match self.squares[rank][file] {
                    Some(piece) => piece.letter(),
                    None => '.',
                };
                write!(f, " {c}")?;
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn test_side_opposite() {
        assert_eq!(Side::White.opposite(), Side::Black);
        assert_eq!(Side::Black.opposite(), Side::White);
    }

    #[test]
    fn test_side_display() {
        assert_eq!(Side::White.to_string(), "White");
        assert_eq!(Side::Black.to_string(), "Black");
    }

    #[test]
    fn test_side_serializes_as_single_letter() {
        assert_eq!(serde_json::to_string(&Side::White).unwrap(), "\"w\"");
        assert_eq!(serde_json::to_string(&Side::Black).unwrap(), "\"b\"");
    }

    #[test]
    fn test_piece_letters() {
        let wq = Piece { side: Side::White, kind: PieceKind::Queen };
        let bn = Piece { side: Side::Black, kind: PieceKind::Knight };
        assert_eq!(wq.letter(), 'Q');
        assert_eq!(bn.letter(), 'n');
    }

    #[test]
    fn test_promotion_maps_to_piece_kind() {
        assert_eq!(PieceKind::from(Promotion::Queen), PieceKind::Queen);
        assert_eq!(PieceKind::from(Promotion::Rook), PieceKind::Rook);
        assert_eq!(PieceKind::from(Promotion::Bishop), PieceKind::Bishop);
        assert_eq!(PieceKind::from(Promotion::Knight), PieceKind::Knight);
    }

    #[test]
    fn test_empty_board_has_no_pieces() {
        let board = Board::empty();
        assert_eq!(board.get(sq("e4")), None);
        assert_eq!(board.get(sq("a1")), None);
    }

    #[test]
    fn test_initial_board_placement() {
        let board = Board::initial();

        // Corners and royalty.
        assert_eq!(
            board.get(sq("a1")),
            Some(Piece { side: Side::White, kind: PieceKind::Rook })
        );
        assert_eq!(
            board.get(sq("d1")),
            Some(Piece { side: Side::White, kind: PieceKind::Queen })
        );
        assert_eq!(
            board.get(sq("e8")),
            Some(Piece { side: Side::Black, kind: PieceKind::King })
        );
        assert_eq!(
            board.get(sq("h8")),
            Some(Piece { side: Side::Black, kind: PieceKind::Rook })
        );

        // Pawn ranks.
        for file in b'a'..=b'h' {
            let white = format!("{}2", file as char);
            let black = format!("{}7", file as char);
            assert_eq!(
                board.get(sq(&white)),
                Some(Piece { side: Side::White, kind: PieceKind::Pawn })
            );
            assert_eq!(
                board.get(sq(&black)),
                Some(Piece { side: Side::Black, kind: PieceKind::Pawn })
            );
        }

        // Middle is empty.
        assert_eq!(board.get(sq("e4")), None);
        assert_eq!(board.get(sq("d5")), None);
    }

    #[test]
    fn test_board_display_initial() {
        let rendered = Board::initial().to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "8  r n b q k b n r");
        assert_eq!(lines[1], "7  p p p p p p p p");
        assert_eq!(lines[2], "6  . . . . . . . .");
        assert_eq!(lines[7], "1  R N B Q K B N R");
        assert_eq!(lines[8], "   a b c d e f g h");
    }
}
