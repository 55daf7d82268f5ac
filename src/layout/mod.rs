//! Board layout: grid dimensions and card pixel size.

pub mod grid;
pub mod sizing;

pub use grid::GridSize;
pub use sizing::{gallery_thumb_size, CardSizer, Viewport, GALLERY_COLUMNS};
