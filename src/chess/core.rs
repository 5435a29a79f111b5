//! Chess primitives commonly used within [`crate::chess`].

use std::fmt::{self, Write};
use std::ops::Not;
use std::str::FromStr;

use anyhow::bail;
use itertools::Itertools;

#[allow(missing_docs)]
pub const BOARD_WIDTH: u8 = 8;
#[allow(missing_docs)]
pub const BOARD_SIZE: u8 = BOARD_WIDTH * BOARD_WIDTH;

/// A square of the board addressed by `(row, col)`, both in `0..BOARD_WIDTH`.
///
/// Row 0 is the eighth rank (Black's back rank) and row 7 is the first rank,
/// column 0 is the a-file:
///
/// ```
/// use chessmate::chess::core::Position;
///
/// let e2 = Position::try_from("e2").unwrap();
/// assert_eq!((e2.row(), e2.col()), (6, 4));
/// assert_eq!(e2.to_string(), "e2");
/// ```
///
/// A [`Position`] outside of the board can not be constructed: the
/// constructors reject such coordinates instead of clamping them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    row: u8,
    col: u8,
}

impl Position {
    /// Creates a position from board coordinates.
    ///
    /// # Errors
    ///
    /// If either coordinate is outside of `0..BOARD_WIDTH`.
    pub fn new(row: u8, col: u8) -> anyhow::Result<Self> {
        if row >= BOARD_WIDTH {
            bail!("row should be within 0..BOARD_WIDTH, got {row}");
        }
        if col >= BOARD_WIDTH {
            bail!("col should be within 0..BOARD_WIDTH, got {col}");
        }
        Ok(Self { row, col })
    }

    /// Index in `0..BOARD_SIZE` is guaranteed by the caller.
    pub(super) const fn from_index(index: u8) -> Self {
        debug_assert!(index < BOARD_SIZE);
        Self {
            row: index / BOARD_WIDTH,
            col: index % BOARD_WIDTH,
        }
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn row(self) -> u8 {
        self.row
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn col(self) -> u8 {
        self.col
    }

    /// Row-major index of the square: a8 is 0, h1 is 63.
    #[must_use]
    pub const fn index(self) -> usize {
        (self.row * BOARD_WIDTH + self.col) as usize
    }

    /// Shifts the position by given deltas, returns [`None`] if the result
    /// leaves the board.
    #[must_use]
    #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    pub fn offset(self, rows: i8, cols: i8) -> Option<Self> {
        let row = i16::from(self.row) + i16::from(rows);
        let col = i16::from(self.col) + i16::from(cols);
        let width = i16::from(BOARD_WIDTH);
        if (0..width).contains(&row) && (0..width).contains(&col) {
            Some(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// Signed `(row, col)` distance from `self` to `other`.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub const fn delta(self, other: Self) -> (i8, i8) {
        (
            other.row as i8 - self.row as i8,
            other.col as i8 - self.col as i8,
        )
    }

    /// Iterates over all squares of the board in row-major order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..BOARD_SIZE).map(Self::from_index)
    }

    /// File letter: `'a'..='h'`.
    #[must_use]
    pub const fn file(self) -> char {
        (b'a' + self.col) as char
    }

    /// Rank digit: `'1'..='8'`.
    #[must_use]
    pub const fn rank(self) -> char {
        (b'0' + BOARD_WIDTH - self.row) as char
    }
}

impl TryFrom<(i32, i32)> for Position {
    type Error = anyhow::Error;

    /// Accepts untrusted coordinates (e.g. coming from the UI layer).
    fn try_from((row, col): (i32, i32)) -> anyhow::Result<Self> {
        match (u8::try_from(row), u8::try_from(col)) {
            (Ok(row), Ok(col)) => Self::new(row, col),
            _ => bail!("coordinates should be within 0..BOARD_WIDTH, got ({row}, {col})"),
        }
    }
}

impl TryFrom<&str> for Position {
    type Error = anyhow::Error;

    /// Parses algebraic notation of a square, e.g. "e4".
    fn try_from(notation: &str) -> anyhow::Result<Self> {
        let Some((file, rank)) = notation.chars().collect_tuple() else {
            bail!(
                "square should be two-char, got {notation} with {} chars",
                notation.chars().count()
            )
        };
        let col = match file {
            'a'..='h' => file as u8 - b'a',
            _ => bail!("file should be within 'a'..='h', got '{file}'"),
        };
        let row = match rank {
            '1'..='8' => BOARD_WIDTH - (rank as u8 - b'0'),
            _ => bail!("rank should be within '1'..='8', got '{rank}'"),
        };
        Self::new(row, col)
    }
}

impl FromStr for Position {
    type Err = anyhow::Error;

    fn from_str(notation: &str) -> anyhow::Result<Self> {
        Self::try_from(notation)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

/// A standard game of chess is played between two players: White (having the
/// advantage of the first turn) and Black.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    White,
    Black,
}

impl Player {
    /// "Flips" the color.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// Row delta of a single pawn push.
    pub(super) const fn forward(self) -> i8 {
        match self {
            Self::White => -1,
            Self::Black => 1,
        }
    }

    pub(super) const fn backrank(self) -> u8 {
        match self {
            Self::White => BOARD_WIDTH - 1,
            Self::Black => 0,
        }
    }

    pub(super) const fn pawns_starting(self) -> u8 {
        match self {
            Self::White => BOARD_WIDTH - 2,
            Self::Black => 1,
        }
    }

    /// The rank on which pawns of this player are promoted.
    pub(super) const fn promotion_rank(self) -> u8 {
        self.opponent().backrank()
    }
}

impl Not for Player {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.opponent()
    }
}

impl TryFrom<&str> for Player {
    type Error = anyhow::Error;

    fn try_from(player: &str) -> anyhow::Result<Self> {
        match player {
            "White" | "white" | "w" => Ok(Self::White),
            "Black" | "black" | "b" => Ok(Self::Black),
            _ => bail!("player should be 'White' or 'Black', got '{player}'"),
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::White => "White",
            Self::Black => "Black",
        })
    }
}

/// Standard [chess pieces].
///
/// [chess pieces]: https://en.wikipedia.org/wiki/Chess_piece
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

impl PieceKind {
    /// Lowercase FEN symbol.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::King => 'k',
            Self::Queen => 'q',
            Self::Rook => 'r',
            Self::Bishop => 'b',
            Self::Knight => 'n',
            Self::Pawn => 'p',
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::King => "King",
            Self::Queen => "Queen",
            Self::Rook => "Rook",
            Self::Bishop => "Bishop",
            Self::Knight => "Knight",
            Self::Pawn => "Pawn",
        })
    }
}

/// A piece owned by a player.
///
/// `position` mirrors the board slot holding the piece: [`crate::chess::board::Board::set`]
/// keeps the two in sync. `moved` is set once the piece has been moved by a
/// committed move and is what forbids a second double pawn push.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Piece {
    #[allow(missing_docs)]
    pub owner: Player,
    #[allow(missing_docs)]
    pub kind: PieceKind,
    pub(super) position: Position,
    pub(super) moved: bool,
}

impl Piece {
    /// Creates a piece that has not moved yet.
    #[must_use]
    pub const fn new(owner: Player, kind: PieceKind, position: Position) -> Self {
        Self {
            owner,
            kind,
            position,
            moved: false,
        }
    }

    /// Square currently holding the piece.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Whether the piece has already made a move in this game.
    #[must_use]
    pub const fn has_moved(&self) -> bool {
        self.moved
    }

    /// Marks the piece as already moved. Useful for setting up positions where
    /// a pawn stands on its starting rank but can not double-push anymore.
    #[must_use]
    pub const fn moved(mut self) -> Self {
        self.moved = true;
        self
    }

    /// FEN symbol: uppercase for White, lowercase for Black.
    #[must_use]
    pub const fn symbol(&self) -> char {
        let symbol = self.kind.symbol();
        match self.owner {
            Player::White => symbol.to_ascii_uppercase(),
            Player::Black => symbol,
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(self.symbol())
    }
}

bitflags::bitflags! {
    /// Track the ability to [castle] each side (kingside is often referred to
    /// as O-O or h-side castle, queenside -- O-O-O or a-side castle). When the
    /// king moves, player loses ability to castle both sides. When the rook
    /// moves or is captured on its original square, player loses ability to
    /// castle its corresponding side.
    ///
    /// Castling itself is not executed by the rules engine: the rights are
    /// only tracked.
    ///
    /// [castle]: https://www.chessprogramming.org/Castling
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct CastleRights : u8 {
        #[allow(missing_docs)]
        const NONE = 0;
        #[allow(missing_docs)]
        const WHITE_SHORT = 0b1000;
        #[allow(missing_docs)]
        const WHITE_LONG = 0b0100;
        #[allow(missing_docs)]
        const WHITE_BOTH = Self::WHITE_SHORT.bits() | Self::WHITE_LONG.bits();
        #[allow(missing_docs)]
        const BLACK_SHORT = 0b0010;
        #[allow(missing_docs)]
        const BLACK_LONG = 0b0001;
        #[allow(missing_docs)]
        const BLACK_BOTH = Self::BLACK_SHORT.bits() | Self::BLACK_LONG.bits();
        #[allow(missing_docs)]
        const ALL = Self::WHITE_BOTH.bits() | Self::BLACK_BOTH.bits();
    }
}

impl CastleRights {
    /// Both rights of the given player.
    #[must_use]
    pub const fn both(player: Player) -> Self {
        match player {
            Player::White => Self::WHITE_BOTH,
            Player::Black => Self::BLACK_BOTH,
        }
    }

    /// The right tied to a rook standing on its original square, if any.
    #[must_use]
    pub fn for_rook_square(position: Position) -> Self {
        match (position.row(), position.col()) {
            (7, 7) => Self::WHITE_SHORT,
            (7, 0) => Self::WHITE_LONG,
            (0, 7) => Self::BLACK_SHORT,
            (0, 0) => Self::BLACK_LONG,
            _ => Self::NONE,
        }
    }
}

impl fmt::Display for CastleRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::NONE {
            return f.write_char('-');
        }
        if self.contains(Self::WHITE_SHORT) {
            f.write_char('K')?;
        }
        if self.contains(Self::WHITE_LONG) {
            f.write_char('Q')?;
        }
        if self.contains(Self::BLACK_SHORT) {
            f.write_char('k')?;
        }
        if self.contains(Self::BLACK_LONG) {
            f.write_char('q')?;
        }
        Ok(())
    }
}
