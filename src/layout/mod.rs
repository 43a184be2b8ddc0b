//! Index assignment and coordinate mapping for scatter layouts.

pub mod coords;
pub mod index;

pub use coords::CoordinateMapper;
pub use index::{IndexedPlayer, PlayerIndex, select_players};
