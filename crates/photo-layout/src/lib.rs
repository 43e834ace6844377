pub mod collage;
pub mod constants;
pub mod layout;
mod session;
mod state;
mod stats;
mod types;
pub mod units;

pub use collage::{CollageLayoutType, CollagePhoto, DragTarget, HandleId, TwoPhotoStyle};
pub use layout::{PageTemplate, PlacedPhoto, Sheet, SheetSet, compute_template, paginate};
pub use session::EditorSession;
pub use state::EditorState;
pub use stats::calculate_statistics;
pub use types::*;
pub use units::PhysicalUnit;
