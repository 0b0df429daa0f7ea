//! Grows a multi-line text editor, and its row, with the content.

use crate::layout::Layout;
use crate::surface::TextEditor;

/// Tracks the last observed content height of one editor.
#[derive(Debug, Clone, PartialEq)]
pub struct AutoResizeController {
    row: usize,
    last_height: f32,
}

impl AutoResizeController {
    /// Start tracking from the editor's current height.
    pub fn attach(row: usize, editor: &TextEditor) -> Self {
        Self { row, last_height: editor.scroll_height }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn last_height(&self) -> f32 {
        self.last_height
    }

    /// Re-measure after an input. When the content height changed the editor
    /// is resized and the row is asked to recompute its height.
    ///
    /// Returns the new height if anything changed.
    pub fn adjust(&mut self, editor: &mut TextEditor, width: f32, layout: &mut dyn Layout) -> Option<f32> {
        let measured = layout.content_height(&editor.text, width);
        let measured = editor.style.min_height.map_or(measured, |min| measured.max(min));
        log::trace!("row {} editor measured {} (was {})", self.row, measured, self.last_height);

        if measured == self.last_height {
            return None;
        }
        editor.resize_to(measured);
        self.last_height = measured;
        layout.auto_adjust_row_height(self.row);
        Some(measured)
    }
}
