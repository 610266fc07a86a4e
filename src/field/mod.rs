//! Minefield snapshot model: cell decoding, grid indexing, rendering

pub mod cell;
mod render;
mod snapshot;

pub use cell::CellState;
pub use render::render_minefield;
pub use snapshot::{FieldSnapshot, MineLocation, ROW_STRIDE};
