//! Card data model: faces, cards and the dealt board.
//!
//! ## Key Types
//!
//! - `ImageId`: identity shared by the two cards of a pair
//! - `CardFace`: a picture and the file it came from
//! - `Card`: one card on the board, with its owner once matched
//! - `Board`: the shuffled, fixed-size card sequence

pub mod board;
pub mod card;

pub use board::Board;
pub use card::{Card, CardFace, ImageId};
