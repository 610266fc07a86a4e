//! Per-cell bit encoding of the minefield block
//!
//! The game packs several overlapping bit ranges into one byte per cell, so
//! decoding only works with an exact precedence order: the exploded pattern
//! subsumes the mine bit, the mine bit subsumes the marker nibble, and the
//! marker sentinels overlap each other.

/// The mine the player clicked on to lose the game
pub const EXPLODED_MINE: u8 = 0xCC;
/// A mine is present on this cell
pub const MINE: u8 = 0x80;
/// The cell has been clicked and holds a neighbour count
pub const REVEALED_TILE: u8 = 0x40;
/// An untouched cell
pub const UNCLICKED_SPACE: u8 = 0x0F;
/// A flag marker
pub const FLAG: u8 = 0x0E;
/// A question-mark marker
pub const QUESTION_MARK: u8 = 0x0D;
/// A flag placed over something that was not a mine
pub const WRONG_MINE: u8 = 0x0B;

/// A mine with no operator marking, used to normalize question-marked mines
/// before invoking the flag-toggle routine
pub const PLAIN_MINE: u8 = MINE | UNCLICKED_SPACE;

/// Decoded view of one minefield byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    UnclickedBlank,
    Flag,
    QuestionMark,
    RevealedNumber(u8),
    RevealedBlank,
    Mine,
    MineWithFlag,
    MineWithQuestionMark,
    ExplodedMine,
    WronglyFlagged,
    /// Border and padding bytes that match no known pattern
    Unknown(u8),
}

impl CellState {
    /// Decodes one raw cell byte. Total over all byte values; the rule order
    /// is load-bearing because the bit patterns overlap.
    pub fn decode(raw: u8) -> Self {
        if raw & EXPLODED_MINE == EXPLODED_MINE {
            return CellState::ExplodedMine;
        }
        if raw & MINE == MINE {
            // The xor guard rejects bytes carrying state beyond the marker
            // itself, which would otherwise alias as a marked mine.
            if raw & FLAG == FLAG && (raw ^ MINE) <= FLAG {
                return CellState::MineWithFlag;
            }
            if raw & QUESTION_MARK == QUESTION_MARK && (raw ^ MINE) <= QUESTION_MARK {
                return CellState::MineWithQuestionMark;
            }
            return CellState::Mine;
        }
        if raw & REVEALED_TILE == REVEALED_TILE {
            return if raw > REVEALED_TILE {
                CellState::RevealedNumber(raw ^ REVEALED_TILE)
            } else {
                CellState::RevealedBlank
            };
        }
        if raw & UNCLICKED_SPACE == UNCLICKED_SPACE {
            return CellState::UnclickedBlank;
        }
        if raw & FLAG == FLAG {
            return CellState::Flag;
        }
        if raw & QUESTION_MARK == QUESTION_MARK {
            return CellState::QuestionMark;
        }
        if raw & WRONG_MINE == WRONG_MINE {
            return CellState::WronglyFlagged;
        }
        CellState::Unknown(raw)
    }

    /// True for any unexploded mine, whatever marker sits on it
    pub fn is_mine(&self) -> bool {
        matches!(
            self,
            CellState::Mine | CellState::MineWithFlag | CellState::MineWithQuestionMark
        )
    }

    /// True for the mine that ended the game
    pub fn is_exploded(&self) -> bool {
        matches!(self, CellState::ExplodedMine)
    }
}
