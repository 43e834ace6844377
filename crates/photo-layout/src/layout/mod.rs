//! Sheet layout calculation
//!
//! This module handles the print-sheet side of the engine:
//! - Page template (how many photos of a given size fit a page, and where)
//! - Pagination (which image lands in which slot on which sheet)
//! - Slot swaps and direct placement within a stable template

mod paginate;
mod slots;
mod template;
mod types;

pub use paginate::*;
pub use slots::*;
pub use template::*;
pub use types::*;
