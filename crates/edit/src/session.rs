//! The single open edit of a worksheet.

use gridedit_engine::cell::CellValue;
use gridedit_engine::cell_ref::CellRef;

use crate::auto_resize::AutoResizeController;
use crate::surface::EditorSurface;

/// What started the edit.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EditOrigin {
    /// Typing on a selected cell. `key` is the character that started it.
    Keyboard { key: Option<String> },
    Pointer,
    #[default]
    Programmatic,
}

impl EditOrigin {
    pub fn key(key: impl Into<String>) -> Self {
        EditOrigin::Keyboard { key: Some(key.into()) }
    }
}

/// Lifecycle of the session slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditState {
    #[default]
    Idle,
    Opening,
    Editing,
    Closing,
}

#[derive(Debug)]
pub struct EditSession {
    pub id: u64,
    pub cell: CellRef,
    /// Display html before the editor was mounted; restored when nothing changes.
    pub original_html: String,
    pub original_value: CellValue,
    pub surface: EditorSurface,
    pub auto_resize: Option<AutoResizeController>,
}

impl EditSession {
    pub fn new(id: u64, cell: CellRef, original_html: String, original_value: CellValue) -> Self {
        Self {
            id,
            cell,
            original_html,
            original_value,
            surface: EditorSurface::None,
            auto_resize: None,
        }
    }
}
