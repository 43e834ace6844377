//! Editing session
//!
//! `EditorSession` owns the editable state plus everything derived from it.
//! Sizing changes go through [`EditorSession::recompute`], which rebuilds the
//! template and pagination and throws away manual placements. Swaps and
//! placements only touch the current SheetSet.

use crate::collage::{
    CollageLayoutType, CollagePhoto, DragSession, DragTarget, PanOffset, PanSession, PinchGesture,
    ResizeHandle, bring_forward, send_backward,
};
use crate::constants::{MAX_IMAGES, MIN_COLLAGE_IMAGES};
use crate::layout::{self, PageTemplate, Sheet, compute_template, paginate};
use crate::state::EditorState;
use crate::stats::calculate_statistics;
use crate::types::*;
use crate::units::PhysicalUnit;

#[derive(Debug, Clone)]
pub struct EditorSession {
    state: EditorState,
    template: PageTemplate,
    drag: Option<DragSession>,
    pinch: Option<(String, PinchGesture)>,
    pan: Option<PanSession>,
}

impl Default for EditorSession {
    fn default() -> Self {
        let state = EditorState::default();
        let template = compute_template(&state.template_input());
        Self {
            state,
            template,
            drag: None,
            pinch: None,
            pan: None,
        }
    }
}

impl EditorSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a session from a saved snapshot
    pub fn from_state(state: EditorState) -> Result<Self> {
        let mut session = Self::default();
        session.restore(state)?;
        Ok(session)
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn template(&self) -> &PageTemplate {
        &self.template
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.state.sheets
    }

    pub fn current_sheet_index(&self) -> usize {
        self.state.current_sheet
    }

    pub fn current_sheet(&self) -> Option<&Sheet> {
        self.state.sheets.get(self.state.current_sheet)
    }

    pub fn statistics(&self) -> Result<SheetStatistics> {
        calculate_statistics(&self.state)
    }

    // ========================================================================
    // Sheet inputs
    // ========================================================================

    /// Apply `change` to a copy of the state, validate it, then commit and
    /// recompute. A rejected change leaves the session untouched.
    fn update_inputs(&mut self, change: impl FnOnce(&mut EditorState)) -> Result<()> {
        let mut next = self.state.clone();
        change(&mut next);
        next.validate()?;
        self.state = next;
        self.recompute();
        Ok(())
    }

    pub fn set_photo_size(&mut self, size: PhotoSize) -> Result<()> {
        self.update_inputs(|s| s.photo_size = size)
    }

    /// Set the photo size from values in the current display unit
    pub fn set_photo_size_in_unit(&mut self, width: f32, height: f32) -> Result<()> {
        let unit = self.state.unit;
        self.set_photo_size(PhotoSize {
            width_mm: unit.to_mm(width),
            height_mm: unit.to_mm(height),
        })
    }

    pub fn set_spacing(&mut self, spacing_mm: f32) -> Result<()> {
        self.update_inputs(|s| s.spacing_mm = spacing_mm)
    }

    pub fn set_margins(&mut self, margins: Margins) -> Result<()> {
        self.update_inputs(|s| s.margins = margins)
    }

    pub fn set_paper_size(&mut self, paper: PaperSize) -> Result<()> {
        self.update_inputs(|s| s.paper_size = paper)
    }

    pub fn set_copies(&mut self, copies: usize) -> Result<()> {
        self.update_inputs(|s| s.copies = copies)
    }

    /// Change the display unit. Geometry is stored in millimetres, so nothing
    /// is recomputed.
    pub fn set_unit(&mut self, unit: PhysicalUnit) {
        self.state.unit = unit;
    }

    pub fn add_images<I, S>(&mut self, images: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let added: Vec<String> = images.into_iter().map(Into::into).collect();
        let count = self.state.images.len() + added.len();
        if count > MAX_IMAGES {
            return Err(LayoutError::TooManyImages {
                count,
                max: MAX_IMAGES,
            });
        }
        self.update_inputs(|s| s.images.extend(added))
    }

    /// Remove the image at `index`, returning it
    pub fn remove_image(&mut self, index: usize) -> Option<String> {
        if index >= self.state.images.len() {
            return None;
        }
        let removed = self.state.images.remove(index);
        self.recompute();
        Some(removed)
    }

    pub fn clear_images(&mut self) {
        self.state.images.clear();
        self.recompute();
    }

    /// Rebuild the template and pagination from the current inputs.
    ///
    /// Manual placements are discarded.
    pub fn recompute(&mut self) {
        self.template = compute_template(&self.state.template_input());
        self.state.sheets = paginate(&self.state.images, self.state.copies, &self.template);
        if self.state.current_sheet >= self.state.sheets.len() {
            self.state.current_sheet = 0;
        }
        log::debug!(
            "Recomputed layout: {}x{} grid, {} sheet(s)",
            self.template.cols,
            self.template.rows,
            self.state.sheets.len()
        );
    }

    // ========================================================================
    // Sheet editing
    // ========================================================================

    /// Swap two slots on the current sheet
    pub fn swap_slots(&mut self, index_a: usize, index_b: usize) -> bool {
        let sheet = self.state.current_sheet;
        layout::swap_slots(&mut self.state.sheets, sheet, index_a, index_b)
    }

    /// Put `image` (or nothing) into a slot on the current sheet
    pub fn place_image(&mut self, slot_id: usize, image: Option<String>) -> bool {
        let index = self.state.current_sheet;
        match self.state.sheets.get_mut(index) {
            Some(sheet) => layout::place_image(sheet, image, slot_id),
            None => false,
        }
    }

    pub fn select_sheet(&mut self, index: usize) -> bool {
        if index < self.state.sheets.len() {
            self.state.current_sheet = index;
            true
        } else {
            false
        }
    }

    // ========================================================================
    // Collage
    // ========================================================================

    /// Start a collage from `sources` using the default arrangement of `layout`
    pub fn load_collage(&mut self, sources: &[String], layout: CollageLayoutType) -> Result<()> {
        if sources.len() < MIN_COLLAGE_IMAGES {
            return Err(LayoutError::TooFewImages {
                count: sources.len(),
                min: MIN_COLLAGE_IMAGES,
            });
        }
        if sources.len() > MAX_IMAGES {
            return Err(LayoutError::TooManyImages {
                count: sources.len(),
                max: MAX_IMAGES,
            });
        }

        self.reset_gestures();
        self.state.collage_layout = layout;
        self.state.collage_sources = sources.to_vec();
        self.state.collage_photos = layout.arrange(sources);
        log::info!(
            "Loaded collage with {} photo(s) as {}",
            self.state.collage_photos.len(),
            layout.name()
        );
        Ok(())
    }

    /// Switch layout, re-deriving every non-overlay position.
    ///
    /// Photos are rebuilt from every loaded source, so sources a two-photo
    /// layout left out come back when switching to a larger layout. Rotation,
    /// mirror, zoom and pan carry over by position in the list; clip paths
    /// belong to the layout and are replaced.
    pub fn set_collage_layout(&mut self, layout: CollageLayoutType) {
        self.reset_gestures();

        let (overlays, previous): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.state.collage_photos)
                .into_iter()
                .partition(|p| p.is_overlay);
        if self.state.collage_sources.is_empty() {
            self.state.collage_sources = previous.iter().map(|p| p.src.clone()).collect();
        }

        let mut arranged = layout.arrange(&self.state.collage_sources);
        for (photo, old) in arranged.iter_mut().zip(&previous) {
            if photo.src == old.src {
                photo.copy_transform_from(old);
            }
        }
        arranged.extend(overlays);
        self.state.collage_layout = layout;
        self.state.collage_photos = arranged;
    }

    pub fn collage_layout(&self) -> CollageLayoutType {
        self.state.collage_layout
    }

    /// Photos as currently displayed, including an in-progress drag
    pub fn collage_photos(&self) -> &[CollagePhoto] {
        match &self.drag {
            Some(drag) => drag.preview(),
            None => &self.state.collage_photos,
        }
    }

    pub fn resize_handles(&self) -> Vec<ResizeHandle> {
        self.state
            .collage_layout
            .resize_engine()
            .handles(self.collage_photos())
    }

    fn photo_mut(&mut self, id: &str) -> Result<&mut CollagePhoto> {
        self.state
            .collage_photos
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| LayoutError::UnknownPhoto(id.to_string()))
    }

    fn reset_gestures(&mut self) {
        self.drag = None;
        self.pinch = None;
        self.pan = None;
    }

    // ------------------------------------------------------------------------
    // Drag
    // ------------------------------------------------------------------------

    /// Capture a drag. `pointer` and `parent_size` are in pixels.
    pub fn begin_drag(
        &mut self,
        target: DragTarget,
        pointer: (f32, f32),
        parent_size: (f32, f32),
    ) -> Result<()> {
        match &target {
            DragTarget::Photo(id) => {
                if !self.state.collage_photos.iter().any(|p| &p.id == id) {
                    return Err(LayoutError::UnknownPhoto(id.clone()));
                }
            }
            DragTarget::Handle(handle) => {
                if !self.resize_handles().iter().any(|h| &h.id == handle) {
                    return Err(LayoutError::Config(format!(
                        "No resize handle {} in the current layout",
                        handle
                    )));
                }
            }
        }

        self.drag = Some(DragSession::begin(
            target,
            pointer,
            parent_size,
            &self.state.collage_photos,
        ));
        Ok(())
    }

    /// Move the captured pointer. Returns `false` when no drag is active.
    pub fn update_drag(&mut self, pointer: (f32, f32)) -> bool {
        let engine = self.state.collage_layout.resize_engine();
        match self.drag.as_mut() {
            Some(drag) => {
                drag.update(engine.as_ref(), pointer);
                true
            }
            None => false,
        }
    }

    /// Release the pointer and commit the previewed geometry.
    ///
    /// Only position and size come from the drag; rotation, zoom, z-order and
    /// the rest keep whatever was set while the pointer was down.
    pub fn end_drag(&mut self) -> bool {
        let Some(drag) = self.drag.take() else {
            return false;
        };
        for moved in drag.finish() {
            if let Some(photo) = self
                .state
                .collage_photos
                .iter_mut()
                .find(|p| p.id == moved.id)
            {
                photo.copy_geometry_from(&moved);
            }
        }
        true
    }

    /// Abandon the drag, keeping the geometry from before it started
    pub fn cancel_drag(&mut self) -> bool {
        self.drag.take().is_some()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    // ------------------------------------------------------------------------
    // Transforms
    // ------------------------------------------------------------------------

    pub fn rotate(&mut self, id: &str) -> Result<u16> {
        let photo = self.photo_mut(id)?;
        photo.rotate();
        Ok(photo.rotation)
    }

    pub fn mirror(&mut self, id: &str) -> Result<bool> {
        let photo = self.photo_mut(id)?;
        photo.mirror();
        Ok(photo.is_mirrored())
    }

    /// Set the zoom factor, returning the clamped value
    pub fn set_scale(&mut self, id: &str, value: f32) -> Result<f32> {
        let photo = self.photo_mut(id)?;
        photo.set_scale(value);
        Ok(photo.scale)
    }

    pub fn begin_pinch(&mut self, id: &str, start_distance: f32) -> Result<()> {
        let photo = self.photo_mut(id)?;
        let gesture = PinchGesture::begin(start_distance, photo.scale);
        self.pinch = Some((id.to_string(), gesture));
        Ok(())
    }

    /// Apply the current finger distance. Returns the new scale, or `None`
    /// when no pinch is active.
    pub fn pinch(&mut self, distance: f32) -> Option<f32> {
        let (id, gesture) = self.pinch.clone()?;
        let scale = gesture.scale_for(distance);
        let photo = self.photo_mut(&id).ok()?;
        photo.scale = scale;
        Some(scale)
    }

    pub fn end_pinch(&mut self) -> bool {
        self.pinch.take().is_some()
    }

    pub fn begin_pan(&mut self, id: &str) -> Result<()> {
        let photo = self.photo_mut(id)?;
        self.pan = Some(PanSession::begin(photo));
        Ok(())
    }

    /// Accumulate a pan movement in pixels
    pub fn pan(&mut self, dx: f32, dy: f32) -> bool {
        match self.pan.as_mut() {
            Some(pan) => {
                pan.pan(dx, dy);
                true
            }
            None => false,
        }
    }

    /// Offset of the active pan, before commit
    pub fn pan_offset(&self) -> Option<PanOffset> {
        self.pan.as_ref().map(PanSession::offset)
    }

    /// Leave crop mode, baking the offset into the photo
    pub fn commit_pan(&mut self) -> Result<bool> {
        let Some(pan) = self.pan.take() else {
            return Ok(false);
        };
        let photo = self.photo_mut(pan.photo_id())?;
        pan.commit(photo);
        Ok(true)
    }

    pub fn cancel_pan(&mut self) -> bool {
        self.pan.take().is_some()
    }

    // ------------------------------------------------------------------------
    // Z-order
    // ------------------------------------------------------------------------

    pub fn bring_forward(&mut self, id: &str) -> Result<bool> {
        self.photo_mut(id)?;
        Ok(bring_forward(&mut self.state.collage_photos, id))
    }

    pub fn send_backward(&mut self, id: &str) -> Result<bool> {
        self.photo_mut(id)?;
        Ok(send_backward(&mut self.state.collage_photos, id))
    }

    // ========================================================================
    // Snapshots
    // ========================================================================

    /// Committed state, suitable for saving to history
    pub fn snapshot(&self) -> EditorState {
        self.state.clone()
    }

    /// Replace the session with a saved snapshot.
    ///
    /// Saved placements are kept when their slot geometry still matches the
    /// recomputed template; otherwise the sheets are paginated afresh.
    pub fn restore(&mut self, state: EditorState) -> Result<()> {
        state.validate()?;

        let template = compute_template(&state.template_input());
        let fresh = paginate(&state.images, state.copies, &template);
        let saved_matches = state.sheets.len() == fresh.len()
            && state.sheets.iter().zip(&fresh).all(|(saved, new)| {
                saved.photos.len() == new.photos.len()
                    && saved
                        .photos
                        .iter()
                        .zip(&new.photos)
                        .all(|(a, b)| a.slot == b.slot)
            });

        self.reset_gestures();
        self.template = template;
        self.state = state;
        if !saved_matches {
            log::warn!("Saved placements no longer match the layout, repaginating");
            self.state.sheets = fresh;
        }
        if self.state.current_sheet >= self.state.sheets.len() {
            self.state.current_sheet = 0;
        }
        Ok(())
    }
}
