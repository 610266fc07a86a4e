//! Integration tests for minefield decoding and rendering

use pretty_assertions::assert_eq;

use minefinder::field::cell::{
    EXPLODED_MINE, FLAG, MINE, PLAIN_MINE, QUESTION_MARK, REVEALED_TILE, UNCLICKED_SPACE,
};
use minefinder::field::{render_minefield, CellState, FieldSnapshot, MineLocation, ROW_STRIDE};

#[test]
fn decode_is_total_over_all_byte_values() {
    for raw in 0..=u8::MAX {
        // Must classify every byte without panicking
        let _ = CellState::decode(raw);
    }
}

#[test]
fn precedence_prefers_exploded_then_mine_then_revealed() {
    // Exploded pattern wins even though the mine bit is inside it
    assert_eq!(CellState::decode(EXPLODED_MINE), CellState::ExplodedMine);

    // Mine bit plus revealed bit is a mine, never a revealed number
    assert_eq!(CellState::decode(MINE | REVEALED_TILE), CellState::Mine);

    // Revealed bit alone is the revealed family
    assert_eq!(CellState::decode(REVEALED_TILE | 5), CellState::RevealedNumber(5));
}

#[test]
fn plain_mine_byte_round_trips_to_exactly_mine() {
    assert_eq!(CellState::decode(PLAIN_MINE), CellState::Mine);
}

#[test]
fn marker_states_decode_with_and_without_mines() {
    assert_eq!(CellState::decode(MINE | FLAG), CellState::MineWithFlag);
    assert_eq!(
        CellState::decode(MINE | QUESTION_MARK),
        CellState::MineWithQuestionMark
    );
    assert_eq!(CellState::decode(FLAG), CellState::Flag);
    assert_eq!(CellState::decode(QUESTION_MARK), CellState::QuestionMark);
    assert_eq!(CellState::decode(UNCLICKED_SPACE), CellState::UnclickedBlank);
}

#[test]
fn snapshot_locates_single_mine_in_first_row() {
    // width 3, height 1: the logical row lives at offsets 33..=35
    let mut raw = vec![0u8; 0x35F];
    raw[33] = UNCLICKED_SPACE;
    raw[34] = PLAIN_MINE;
    raw[35] = UNCLICKED_SPACE;

    let snapshot = FieldSnapshot::decode(raw, 3, 1, 1).unwrap();
    let mines: Vec<MineLocation> = snapshot
        .cells()
        .filter(|(_, state)| state.is_mine())
        .map(|(location, _)| location)
        .collect();

    assert_eq!(mines, vec![MineLocation { x: 2, y: 1 }]);
    assert_eq!(mines[0].field_offset(), ROW_STRIDE + 2);
}

#[test]
fn snapshot_rejects_block_smaller_than_grid() {
    let raw = vec![0u8; ROW_STRIDE];
    assert!(FieldSnapshot::decode(raw, 9, 9, 10).is_err());
}

#[test]
fn rendered_board_shows_each_state() {
    let mut raw = vec![0u8; 0x35F];
    raw[33] = PLAIN_MINE;
    raw[34] = MINE | FLAG;
    raw[35] = REVEALED_TILE | 2;
    raw[36] = UNCLICKED_SPACE;

    let snapshot = FieldSnapshot::decode(raw, 4, 1, 2).unwrap();
    let text = render_minefield(&snapshot);

    assert!(text.starts_with("Legend:"));
    let board_row = text.lines().last().unwrap();
    assert_eq!(board_row, " 1 | B  BF 2    ");
}
