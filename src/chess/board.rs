//! Square-centric (mailbox) storage of the pieces. The [`Board`] knows nothing
//! about the rules: legality lives in [`crate::chess::movement`].

use std::fmt::{self, Write};

use anyhow::bail;

use crate::chess::core::{Piece, PieceKind, Player, Position, BOARD_SIZE, BOARD_WIDTH};

/// 8x8 grid holding at most one piece per square.
///
/// Every piece stored on the board carries its own square in
/// [`Piece::position`]; [`Board::set`] is the only way to put a piece on the
/// board and it keeps the two in sync.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    squares: [Option<Piece>; BOARD_SIZE as usize],
}

const BACKRANK: [PieceKind; BOARD_WIDTH as usize] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

impl Board {
    /// Creates a board without any pieces.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            squares: [None; BOARD_SIZE as usize],
        }
    }

    /// Creates the board with the standard 32-piece starting layout.
    #[must_use]
    pub fn starting() -> Self {
        let mut board = Self::empty();
        board.reset_to_standard_layout();
        board
    }

    /// Clears the board and places the standard 32 pieces.
    pub fn reset_to_standard_layout(&mut self) {
        self.clear();
        for player in [Player::White, Player::Black] {
            for (col, kind) in (0..BOARD_WIDTH).zip(BACKRANK) {
                self.place(player, kind, player.backrank(), col);
                self.place(player, PieceKind::Pawn, player.pawns_starting(), col);
            }
        }
    }

    fn place(&mut self, owner: Player, kind: PieceKind, row: u8, col: u8) {
        let position = Position::from_index(row * BOARD_WIDTH + col);
        let _ = self.set(position, Piece::new(owner, kind, position));
    }

    /// Clears the board, then places given pieces on the requested squares.
    /// Used for tests and puzzle positions.
    ///
    /// # Errors
    ///
    /// If the same square is listed twice.
    pub fn load_custom(&mut self, pieces: &[(Piece, Position)]) -> anyhow::Result<()> {
        self.clear();
        for (piece, position) in pieces {
            if let Some(occupant) = self.set(*position, *piece) {
                bail!("square {position} is listed twice: {occupant} and {piece}");
            }
        }
        Ok(())
    }

    fn clear(&mut self) {
        self.squares = [None; BOARD_SIZE as usize];
    }

    /// Returns the piece standing on the square, if any.
    #[must_use]
    pub const fn get(&self, position: Position) -> Option<Piece> {
        self.squares[position.index()]
    }

    /// Returns true if nothing stands on the square.
    #[must_use]
    pub const fn is_empty(&self, position: Position) -> bool {
        self.get(position).is_none()
    }

    /// Puts the piece on the square and updates the piece's own position.
    /// Returns the previous occupant of the square (which is no longer on the
    /// board).
    pub fn set(&mut self, position: Position, mut piece: Piece) -> Option<Piece> {
        piece.position = position;
        self.squares[position.index()].replace(piece)
    }

    /// Puts the previous contents back into the square, whatever they were.
    pub(super) fn restore(&mut self, position: Position, occupant: Option<Piece>) {
        debug_assert!(occupant.map_or(true, |piece| piece.position == position));
        self.squares[position.index()] = occupant;
    }

    /// Takes the piece off the square.
    pub fn remove(&mut self, position: Position) -> Option<Piece> {
        self.squares[position.index()].take()
    }

    /// Finds the square of the given player's king.
    ///
    /// # Errors
    ///
    /// The board is expected to hold exactly one king of the given color.
    /// Anything else is a setup error, not a game situation.
    pub fn find_king(&self, player: Player) -> anyhow::Result<Position> {
        let mut kings = self
            .pieces(player)
            .filter(|piece| piece.kind == PieceKind::King)
            .map(|piece| piece.position);
        match (kings.next(), kings.count()) {
            (Some(king), 0) => Ok(king),
            (None, _) => bail!("expected 1 {} king, got 0", player_name(player)),
            (Some(_), extra) => bail!("expected 1 {} king, got {}", player_name(player), extra + 1),
        }
    }

    /// Iterates over every piece on the board.
    pub fn all_pieces(&self) -> impl Iterator<Item = Piece> + '_ {
        self.squares.iter().flatten().copied()
    }

    /// Iterates over the pieces of one player.
    pub fn pieces(&self, player: Player) -> impl Iterator<Item = Piece> + '_ {
        self.all_pieces().filter(move |piece| piece.owner == player)
    }
}

fn player_name(player: Player) -> &'static str {
    match player {
        Player::White => "white",
        Player::Black => "black",
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::starting()
    }
}

impl fmt::Display for Board {
    /// Draws the board from White's side: rank labels on the left, file
    /// labels below, FEN symbols for pieces and '.' for empty squares.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..BOARD_WIDTH {
            write!(f, "{} ", BOARD_WIDTH - row)?;
            for col in 0..BOARD_WIDTH {
                match self.get(Position::from_index(row * BOARD_WIDTH + col)) {
                    Some(piece) => write!(f, "{piece}"),
                    None => f.write_char('.'),
                }?;
                if col != BOARD_WIDTH - 1 {
                    f.write_str(SQUARE_SEPARATOR)?;
                }
            }
            f.write_str(LINE_SEPARATOR)?;
        }
        f.write_str("  a b c d e f g h")
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

const LINE_SEPARATOR: &str = "\n";
const SQUARE_SEPARATOR: &str = " ";
