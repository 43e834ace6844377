//! Collage composition
//!
//! This module handles the free-placement side of the engine:
//! - Photo records with rotation, zoom, pan, mirror and z-order
//! - Layout variants and their default arrangements
//! - Resize engines (grid adjacency, mosaic adjacency, free drag)
//! - The snapshot-based drag protocol

mod drag;
mod engine;
mod free_drag;
mod grid_resize;
mod layout_type;
mod mosaic_resize;
mod transform;
mod types;
mod zorder;

pub use drag::*;
pub use engine::{FixedLayout, ResizeEngine};
pub use free_drag::*;
pub use grid_resize::*;
pub use layout_type::*;
pub use mosaic_resize::*;
pub use transform::*;
pub use types::*;
pub use zorder::*;
