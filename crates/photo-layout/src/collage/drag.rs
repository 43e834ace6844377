//! Pointer-capture protocol for collage drags
//!
//! On press, capture the target, the pointer position, the container size
//! and a snapshot of the photos. Every move recomputes the preview from the
//! snapshot plus the cumulative delta, so rounding never accumulates and
//! cancelling is just dropping the session.

use super::engine::ResizeEngine;
use super::{CollagePhoto, DragTarget, PercentDelta};

#[derive(Debug, Clone)]
pub struct DragSession {
    target: DragTarget,
    start: (f32, f32),
    parent_size: (f32, f32),
    snapshot: Vec<CollagePhoto>,
    preview: Vec<CollagePhoto>,
}

impl DragSession {
    /// Start a drag at `pointer` (pixels) over a container of `parent_size` pixels
    pub fn begin(
        target: DragTarget,
        pointer: (f32, f32),
        parent_size: (f32, f32),
        photos: &[CollagePhoto],
    ) -> Self {
        Self {
            target,
            start: pointer,
            parent_size,
            snapshot: photos.to_vec(),
            preview: photos.to_vec(),
        }
    }

    pub fn target(&self) -> &DragTarget {
        &self.target
    }

    /// Photo list as it was when the drag began
    pub fn snapshot(&self) -> &[CollagePhoto] {
        &self.snapshot
    }

    /// Photo list as it would be if the drag ended now
    pub fn preview(&self) -> &[CollagePhoto] {
        &self.preview
    }

    /// Cumulative pointer delta in percent of the container
    pub fn delta_for(&self, pointer: (f32, f32)) -> PercentDelta {
        PercentDelta::from_pixels(
            pointer.0 - self.start.0,
            pointer.1 - self.start.1,
            self.parent_size.0,
            self.parent_size.1,
        )
    }

    /// Recompute the preview for a new pointer position
    pub fn update(&mut self, engine: &dyn ResizeEngine, pointer: (f32, f32)) -> &[CollagePhoto] {
        let delta = self.delta_for(pointer);
        self.preview = engine.apply(&self.snapshot, &self.target, delta);
        &self.preview
    }

    /// Finish the drag, yielding the geometry to commit
    pub fn finish(self) -> Vec<CollagePhoto> {
        self.preview
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collage::{CollageLayoutType, HandleId};

    #[test]
    fn test_updates_are_relative_to_snapshot() {
        let sources = vec!["a".to_string(), "b".to_string()];
        let layout = CollageLayoutType::Grid { cols: 2, rows: 1 };
        let photos = layout.arrange(&sources);
        let engine = layout.resize_engine();

        let mut drag = DragSession::begin(
            DragTarget::Handle(HandleId::Vertical(0)),
            (100.0, 50.0),
            (400.0, 300.0),
            &photos,
        );

        // Many small moves ending at +40px equal one +40px move
        for x in [101.0, 110.0, 125.0, 133.3, 140.0] {
            drag.update(engine.as_ref(), (x, 50.0));
        }
        assert!((drag.preview()[0].width - 60.0).abs() < 1e-4);
        assert_eq!(drag.snapshot(), photos.as_slice());

        // Moving back to the start restores the original geometry
        drag.update(engine.as_ref(), (100.0, 50.0));
        assert_eq!(drag.finish(), photos);
    }
}
