//! Text rendering of a decoded minefield

use std::fmt::Write;

use super::cell::CellState;
use super::snapshot::{FieldSnapshot, MineLocation};

const LEGEND: &str = "Legend:\n\
                      ------\n\
                      B: Unexploded bomb\n\
                      _: Blank clicked tile\n\
                      *: exploded bomb\n\
                      ?: Question mark\n \
                      : (space) Blank unclicked tile\n\
                      F: Flag\n\
                      X: Incorrectly placed flag. Only shows up after you lose\n";

/// Renders the snapshot as a bordered grid with 1-based axes
pub fn render_minefield(snapshot: &FieldSnapshot) -> String {
    let width = snapshot.width() as u32;
    let height = snapshot.height() as u32;
    let mut out = String::new();

    out.push_str(LEGEND);
    out.push('\n');

    // X axis
    out.push_str("   ");
    for x in 1..=width {
        let _ = write!(out, " {:2}", x);
    }

    // Border
    out.push_str("\n   ");
    for _ in 1..=width {
        out.push_str("---");
    }
    out.push_str("--\n");

    for y in 1..=height {
        let _ = write!(out, "{:2} |", y);
        for x in 1..=width {
            let state = snapshot.cell(MineLocation { x, y });
            match state {
                CellState::ExplodedMine => out.push_str(" * "),
                CellState::MineWithFlag => out.push_str(" BF"),
                CellState::MineWithQuestionMark => out.push_str(" B?"),
                CellState::Mine => out.push_str(" B "),
                CellState::RevealedNumber(n) => {
                    let _ = write!(out, " {} ", n);
                }
                CellState::RevealedBlank => out.push_str(" _ "),
                CellState::Flag => out.push_str("  F"),
                CellState::QuestionMark => out.push_str("  ?"),
                CellState::WronglyFlagged => out.push_str(" X "),
                CellState::UnclickedBlank | CellState::Unknown(_) => out.push_str("   "),
            }
        }
        out.push('\n');
    }

    out
}
