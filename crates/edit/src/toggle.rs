//! Batch toggle of highlighted checkbox/radio cells.

use gridedit_engine::cell::CellValue;
use gridedit_engine::cell_ref::CellRef;
use gridedit_engine::events::GridEvent;
use gridedit_engine::history::{EditRecord, HistoryEntry};

use crate::worksheet::Worksheet;

/// Highlighted cells that belong to toggle columns, in highlight order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleSelection {
    cells: Vec<CellRef>,
}

impl ToggleSelection {
    pub fn from_worksheet(worksheet: &Worksheet) -> Self {
        let mut cells: Vec<CellRef> = Vec::new();
        for &cell in worksheet.highlighted() {
            let toggles = worksheet.column(cell.x).is_some_and(|c| c.kind.is_toggle());
            if !toggles || cells.contains(&cell) {
                continue;
            }
            if worksheet.is_read_only(cell) {
                log::debug!("toggle: skipping read-only {}", cell);
                continue;
            }
            cells.push(cell);
        }
        Self { cells }
    }

    pub fn cells(&self) -> &[CellRef] {
        &self.cells
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

pub struct ToggleBatchCommitter;

impl ToggleBatchCommitter {
    /// Flip every selected cell. All flips are one history entry and one
    /// change notification; nothing is emitted when no cell qualifies.
    pub fn commit(worksheet: &mut Worksheet) -> Vec<EditRecord> {
        let selection = ToggleSelection::from_worksheet(worksheet);
        let records: Vec<EditRecord> = selection
            .cells()
            .iter()
            .map(|&cell| {
                let flipped = CellValue::Bool(!worksheet.value(cell).is_truthy());
                worksheet.update_cell(cell, flipped)
            })
            .collect();

        if records.is_empty() {
            return records;
        }
        let range = worksheet.selection();
        worksheet.history.record(HistoryEntry::set_value(records.clone(), range));
        worksheet.events.dispatch(GridEvent::AfterChanges { records: records.clone() });
        records
    }
}

impl Worksheet {
    /// Toggle the highlighted checkbox/radio cells as one change.
    pub fn toggle_highlighted(&mut self) -> Vec<EditRecord> {
        ToggleBatchCommitter::commit(self)
    }
}
