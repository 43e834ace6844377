use crate::layout::{compute_template, sheet_count};
use crate::state::EditorState;
use crate::types::*;

/// Calculate statistics for the sheet layout
pub fn calculate_statistics(state: &EditorState) -> Result<SheetStatistics> {
    state.validate()?;

    let template = compute_template(&state.template_input());
    let slots_per_sheet = template.len();
    let source_photos = state.images.len().saturating_mul(state.copies);
    let sheets = sheet_count(state.images.len(), state.copies, slots_per_sheet);

    let empty_slots = if sheets == 0 {
        0
    } else {
        sheets
            .saturating_mul(slots_per_sheet)
            .saturating_sub(source_photos)
    };

    Ok(SheetStatistics {
        columns: template.cols,
        rows: template.rows,
        slots_per_sheet,
        source_photos,
        sheets,
        empty_slots,
        generatable: !template.is_empty(),
    })
}
