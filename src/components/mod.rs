//! The components module contains the view layer for the player board.

mod media_hook;
mod player_board;

pub use media_hook::*;
pub use player_board::*;
