//! Undo/Redo history for cell value changes

use serde::{Deserialize, Serialize};

use crate::cell::CellValue;
use crate::cell_ref::{CellRange, CellRef};

/// One cell's before/after values, produced when a commit writes the matrix.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EditRecord {
    pub x: usize,
    pub y: usize,
    pub value: CellValue,
    pub old_value: CellValue,
}

impl EditRecord {
    pub fn cell(&self) -> CellRef {
        CellRef::new(self.x, self.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HistoryAction {
    SetValue,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub action: HistoryAction,
    pub records: Vec<EditRecord>,
    pub selection: Option<CellRange>,
}

impl HistoryEntry {
    pub fn set_value(records: Vec<EditRecord>, selection: Option<CellRange>) -> Self {
        Self { action: HistoryAction::SetValue, records, selection }
    }
}

/// Sink for undoable batches.
pub trait HistoryRecorder {
    fn record(&mut self, entry: HistoryEntry);
}

impl<H: HistoryRecorder> HistoryRecorder for std::rc::Rc<std::cell::RefCell<H>> {
    fn record(&mut self, entry: HistoryEntry) {
        self.borrow_mut().record(entry);
    }
}

pub struct History {
    undo_stack: Vec<HistoryEntry>,
    redo_stack: Vec<HistoryEntry>,
    max_entries: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    pub fn new() -> Self {
        Self::with_limit(100)
    }

    pub fn with_limit(max_entries: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_entries: max_entries.max(1),
        }
    }

    fn push_entry(&mut self, entry: HistoryEntry) {
        self.undo_stack.push(entry);
        self.redo_stack.clear();

        // Limit history size
        if self.undo_stack.len() > self.max_entries {
            self.undo_stack.remove(0);
        }
    }

    /// Pop the last entry for undo, returns the changes to revert
    pub fn undo(&mut self) -> Option<HistoryEntry> {
        let entry = self.undo_stack.pop()?;
        self.redo_stack.push(entry.clone());
        Some(entry)
    }

    /// Pop from redo stack, returns the changes to reapply
    pub fn redo(&mut self) -> Option<HistoryEntry> {
        let entry = self.redo_stack.pop()?;
        self.undo_stack.push(entry.clone());
        Some(entry)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Entries in recording order, oldest first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.undo_stack
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

impl HistoryRecorder for History {
    /// Empty batches are not undoable and are dropped.
    fn record(&mut self, entry: HistoryEntry) {
        if entry.records.is_empty() {
            return;
        }
        self.push_entry(entry);
    }
}

/// Source of entries to replay, implemented by stores that support undo.
pub trait HistoryReplay {
    fn undo(&mut self) -> Option<HistoryEntry>;
    fn redo(&mut self) -> Option<HistoryEntry>;
}

impl HistoryReplay for History {
    fn undo(&mut self) -> Option<HistoryEntry> {
        History::undo(self)
    }

    fn redo(&mut self) -> Option<HistoryEntry> {
        History::redo(self)
    }
}

impl<H: HistoryReplay> HistoryReplay for std::rc::Rc<std::cell::RefCell<H>> {
    fn undo(&mut self) -> Option<HistoryEntry> {
        self.borrow_mut().undo()
    }

    fn redo(&mut self) -> Option<HistoryEntry> {
        self.borrow_mut().redo()
    }
}

/// A history that can both record and replay.
pub trait HistoryStore: HistoryRecorder + HistoryReplay {}

impl<T: HistoryRecorder + HistoryReplay> HistoryStore for T {}
