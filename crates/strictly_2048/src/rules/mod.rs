//! Move rules for 2048.
//!
//! Pure functions over a [`Board`](crate::Board): line scanning, merge
//! search, slide search and status evaluation. Mutating passes are
//! crate-private and driven by [`MoveEngine`](crate::MoveEngine).

pub mod lines;
pub mod merge;
pub mod slide;
pub mod status;

pub use lines::{scan_line, scan_lines};
pub use merge::{can_merge_line, find_merge_target};
pub use slide::{can_slide_line, find_destination};
pub use status::{evaluate_status, has_valid_moves, is_valid_move};
