//! A grid instance: data matrix, rendered views, columns and collaborators.
//!
//! Handles:
//! - Opening and closing the single edit session
//! - Input routed to the open surface
//! - The commit path (`set_value`) and undo/redo replay
//! - Highlight/selection state used by batch toggles

use gridedit_config::GridSettings;
use gridedit_engine::cell::CellValue;
use gridedit_engine::cell_ref::{CellRange, CellRef};
use gridedit_engine::events::{EventBus, GridEvent};
use gridedit_engine::history::{EditRecord, History, HistoryEntry, HistoryStore};
use gridedit_engine::mask::{MaskCodec, NumberMaskCodec};
use gridedit_engine::sheet::Sheet;

use crate::column::{ColumnDefinition, EditorKind};
use crate::deferred::{DeferredQueue, DeferredTask};
use crate::format::{display_text, get_mask};
use crate::layout::{FixedLayout, Layout};
use crate::picker::{DefaultPickers, Picker, PickerFactory, PickerValue};
use crate::session::{EditOrigin, EditSession, EditState};
use crate::surface::{escape_html, CellView, EditorSurface, TextEditor};

pub struct Worksheet {
    pub(crate) sheet: Sheet,
    pub(crate) columns: Vec<ColumnDefinition>,
    /// Row-major rendered views, grown on demand.
    pub(crate) views: Vec<Vec<CellView>>,
    pub(crate) settings: GridSettings,
    pub(crate) events: EventBus,
    pub(crate) history: Box<dyn HistoryStore>,
    pub(crate) codec: Box<dyn MaskCodec>,
    pub(crate) layout: Box<dyn Layout>,
    pub(crate) pickers: Box<dyn PickerFactory>,
    pub(crate) edition: Option<EditSession>,
    pub(crate) state: EditState,
    pub(crate) deferred: DeferredQueue,
    pub(crate) highlighted: Vec<CellRef>,
    pub(crate) selection: Option<CellRange>,
    next_session: u64,
}

impl Worksheet {
    pub fn new(sheet: Sheet, columns: Vec<ColumnDefinition>, settings: GridSettings) -> Self {
        let mut worksheet = Self {
            history: Box::new(History::with_limit(settings.history_max_entries)),
            layout: Box::new(FixedLayout::from_settings(&settings)),
            codec: Box::new(NumberMaskCodec::new()),
            pickers: Box::new(DefaultPickers),
            sheet,
            columns,
            views: Vec::new(),
            settings,
            events: EventBus::new(),
            edition: None,
            state: EditState::Idle,
            deferred: DeferredQueue::new(),
            highlighted: Vec::new(),
            selection: None,
            next_session: 0,
        };
        worksheet.render_all();
        worksheet
    }

    pub fn with_history(mut self, history: impl HistoryStore + 'static) -> Self {
        self.history = Box::new(history);
        self
    }

    pub fn with_layout(mut self, layout: impl Layout + 'static) -> Self {
        self.layout = Box::new(layout);
        self
    }

    pub fn with_codec(mut self, codec: impl MaskCodec + 'static) -> Self {
        self.codec = Box::new(codec);
        self.render_all();
        self
    }

    pub fn with_pickers(mut self, pickers: impl PickerFactory + 'static) -> Self {
        self.pickers = Box::new(pickers);
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn sheet(&self) -> &Sheet {
        &self.sheet
    }

    pub fn value(&self, cell: CellRef) -> &CellValue {
        self.sheet.get(cell)
    }

    pub fn settings(&self) -> &GridSettings {
        &self.settings
    }

    pub fn events_mut(&mut self) -> &mut EventBus {
        &mut self.events
    }

    pub fn column(&self, x: usize) -> Option<&ColumnDefinition> {
        self.columns.get(x)
    }

    pub fn view(&self, cell: CellRef) -> Option<&CellView> {
        self.views.get(cell.y).and_then(|row| row.get(cell.x))
    }

    pub fn edition(&self) -> Option<&EditSession> {
        self.edition.as_ref()
    }

    pub fn state(&self) -> EditState {
        self.state
    }

    pub fn is_editing(&self) -> bool {
        self.edition.is_some()
    }

    pub fn pending_tasks(&self) -> usize {
        self.deferred.len()
    }

    /// Text editor of the open session, if it mounted one.
    pub fn text_editor(&self) -> Option<&TextEditor> {
        self.edition.as_ref().and_then(|s| s.surface.text())
    }

    pub fn picker_mut(&mut self) -> Option<&mut (dyn Picker + 'static)> {
        match &mut self.edition.as_mut()?.surface {
            EditorSurface::Picker { picker, .. } => Some(picker.as_mut()),
            _ => None,
        }
    }

    pub(crate) fn column_def(&self, x: usize) -> ColumnDefinition {
        self.columns.get(x).cloned().unwrap_or_default()
    }

    pub(crate) fn view_mut(&mut self, cell: CellRef) -> &mut CellView {
        if self.views.len() <= cell.y {
            self.views.resize_with(cell.y + 1, Vec::new);
        }
        let row = &mut self.views[cell.y];
        if row.len() <= cell.x {
            row.resize_with(cell.x + 1, CellView::default);
        }
        &mut row[cell.x]
    }

    pub fn is_read_only(&self, cell: CellRef) -> bool {
        self.columns.get(cell.x).is_some_and(|c| c.config.read_only)
            || self.sheet.is_read_only(cell)
            || self.view(cell).is_some_and(|v| v.readonly)
    }

    pub fn set_read_only(&mut self, cell: CellRef, read_only: bool) {
        self.sheet.set_read_only(cell, read_only);
        self.view_mut(cell).readonly = read_only;
    }

    // =========================================================================
    // Selection
    // =========================================================================

    pub fn set_highlighted(&mut self, cells: impl IntoIterator<Item = CellRef>) {
        self.highlighted = cells.into_iter().collect();
    }

    /// Select a range; every cell in it becomes highlighted.
    pub fn select_range(&mut self, range: CellRange) {
        self.highlighted = range.cells().collect();
        self.selection = Some(range);
    }

    pub fn highlighted(&self) -> &[CellRef] {
        &self.highlighted
    }

    pub fn selection(&self) -> Option<CellRange> {
        self.selection
    }

    // =========================================================================
    // Session lifecycle
    // =========================================================================

    /// Open an editor on `cell`. `empty` starts the text editor blank.
    pub fn open_editor(&mut self, cell: CellRef, empty: bool, origin: EditOrigin) {
        if !self.sheet.contains(cell) {
            log::debug!("open_editor: {} is outside the sheet", cell);
            return;
        }
        if self.is_read_only(cell) {
            log::debug!("open_editor: {} is read-only", cell);
            return;
        }
        if let Some(open) = self.edition.as_ref().map(|s| s.cell) {
            self.close_editor(open, true);
        }

        self.state = EditState::Opening;
        self.events.dispatch(GridEvent::EditionStart { x: cell.x, y: cell.y });

        if let Some(left) = cell.left() {
            self.view_mut(left).overflow_hidden = true;
        }

        self.next_session += 1;
        let original_html = self.view_mut(cell).html.clone();
        let original_value = self.sheet.get(cell).clone();
        log::debug!("session {} opened on {}", self.next_session, cell);
        self.edition = Some(EditSession::new(self.next_session, cell, original_html, original_value.clone()));
        self.state = EditState::Editing;

        let column = self.column_def(cell.x);
        self.open_surface(cell, &column, &original_value, empty, &origin);
    }

    /// Close the session on `cell`, committing when `save` is set.
    pub fn close_editor(&mut self, cell: CellRef, save: bool) {
        match self.edition.as_ref().map(|s| s.cell) {
            Some(open) if open == cell => {}
            Some(open) => {
                log::debug!("close_editor: {} is not being edited ({} is)", cell, open);
                return;
            }
            None => {
                log::debug!("close_editor: no edit open");
                return;
            }
        }
        let Some(mut session) = self.edition.take() else {
            return;
        };
        self.state = EditState::Closing;
        self.deferred.cancel_session(session.id);

        let column = self.column_def(cell.x);
        let value = if save {
            let value = self.close_surface(&mut session, &column, true);
            let stored = self.sheet.get(cell);
            if value == *stored || same_text(&value, stored) {
                let stored = stored.clone();
                self.view_mut(cell).html = session.original_html.clone();
                Some(stored)
            } else {
                self.set_value(cell, value.clone());
                Some(value)
            }
        } else {
            self.close_surface(&mut session, &column, false);
            self.view_mut(cell).html = session.original_html.clone();
            None
        };

        self.view_mut(cell).editor = false;
        self.state = EditState::Idle;
        log::debug!("session {} closed on {} (save: {})", session.id, cell, save);
        self.events.dispatch(GridEvent::EditionEnd { x: cell.x, y: cell.y, value, save });
    }

    /// Close whatever session is open.
    pub fn close_current(&mut self, save: bool) {
        if let Some(cell) = self.edition.as_ref().map(|s| s.cell) {
            self.close_editor(cell, save);
        }
    }

    // =========================================================================
    // Surface input
    // =========================================================================

    /// Replace the open text editor's content, as typing would.
    pub fn input_text(&mut self, text: &str) {
        let Some(session) = self.edition.as_mut() else {
            log::debug!("input_text: no edit open");
            return;
        };
        let cell = session.cell;
        let Some(editor) = session.surface.text_mut() else {
            log::debug!("input_text: {} has no text editor", cell);
            return;
        };
        editor.text = text.to_string();
        if let Some(controller) = session.auto_resize.as_mut() {
            let width = self.layout.cell_rect(cell).width;
            controller.adjust(editor, width, self.layout.as_mut());
        }
    }

    /// Pick a value on the open picker and commit it.
    pub fn choose(&mut self, value: PickerValue) {
        let Some(cell) = self.edition.as_ref().map(|s| s.cell) else {
            log::debug!("choose: no edit open");
            return;
        };
        match self.picker_mut() {
            Some(picker) => picker.select(value),
            None => {
                log::debug!("choose: {} has no picker", cell);
                return;
            }
        }
        self.close_editor(cell, true);
    }

    /// Run queued work. Tasks of sessions that already closed were dropped
    /// when they closed.
    pub fn run_deferred(&mut self) {
        while let Some(task) = self.deferred.pop() {
            match task {
                DeferredTask::MeasureEditor { session } => self.measure_editor(session),
            }
        }
    }

    fn measure_editor(&mut self, id: u64) {
        let Some(session) = self.edition.as_mut().filter(|s| s.id == id) else {
            return;
        };
        let cell = session.cell;
        if let (Some(editor), Some(controller)) = (session.surface.text_mut(), session.auto_resize.as_mut()) {
            let width = self.layout.cell_rect(cell).width;
            controller.adjust(editor, width, self.layout.as_mut());
        }
    }

    // =========================================================================
    // Commit path
    // =========================================================================

    /// Write a value, re-render the cell, and record it as one undoable change.
    pub fn set_value(&mut self, cell: CellRef, value: CellValue) -> EditRecord {
        let record = self.update_cell(cell, value);
        self.history.record(HistoryEntry::set_value(vec![record.clone()], self.selection));
        self.events.dispatch(GridEvent::AfterChanges { records: vec![record.clone()] });
        record
    }

    /// Write a value and re-render, without history or events.
    pub fn update_cell(&mut self, cell: CellRef, value: CellValue) -> EditRecord {
        let record = self.sheet.update(cell, value);
        self.render_cell(cell);
        record
    }

    pub fn undo(&mut self) -> bool {
        self.close_current(true);
        let Some(entry) = self.history.undo() else {
            return false;
        };
        let records = entry
            .records
            .iter()
            .rev()
            .map(|r| self.update_cell(r.cell(), r.old_value.clone()))
            .collect::<Vec<_>>();
        self.events.dispatch(GridEvent::AfterChanges { records });
        true
    }

    pub fn redo(&mut self) -> bool {
        self.close_current(true);
        let Some(entry) = self.history.redo() else {
            return false;
        };
        let records = entry
            .records
            .iter()
            .map(|r| self.update_cell(r.cell(), r.value.clone()))
            .collect::<Vec<_>>();
        self.events.dispatch(GridEvent::AfterChanges { records });
        true
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    fn render_all(&mut self) {
        for y in 0..self.sheet.rows {
            for x in 0..self.sheet.cols {
                self.render_cell(CellRef::new(x, y));
            }
        }
    }

    pub(crate) fn render_cell(&mut self, cell: CellRef) {
        let column = self.column_def(cell.x);
        let value = self.sheet.get(cell).clone();
        let readonly = column.config.read_only || self.sheet.is_read_only(cell);

        let (html, image_src) = match &column.kind {
            EditorKind::Checkbox | EditorKind::Radio => {
                let input = column.kind.name();
                let checked = if value.is_truthy() { " checked" } else { "" };
                (format!("<input type=\"{}\"{}>", input, checked), None)
            }
            EditorKind::Dropdown => {
                let names = self.dropdown_ids(&column, &value)
                    .into_iter()
                    .map(|id| {
                        column.config.source.iter()
                            .find(|item| item.id == id)
                            .map(|item| item.name.clone())
                            .unwrap_or(id)
                    })
                    .collect::<Vec<_>>();
                let separator = format!("{} ", self.settings.delimiter());
                (escape_html(&names.join(separator.as_str())), None)
            }
            EditorKind::Image => {
                let src = value.raw_display();
                if src.is_empty() {
                    (String::new(), None)
                } else {
                    (format!("<img src=\"{}\">", escape_html(&src)), Some(src))
                }
            }
            EditorKind::Html => (value.raw_display(), None),
            _ => {
                let text = display_text(&value, get_mask(&column).as_ref(), self.codec.as_ref());
                (escape_html(&text), None)
            }
        };

        let view = self.view_mut(cell);
        view.html = html;
        view.image_src = image_src;
        view.readonly = view.readonly || readonly;
    }

    /// Selected ids of a dropdown cell. Multi-select values are delimited.
    pub(crate) fn dropdown_ids(&self, column: &ColumnDefinition, value: &CellValue) -> Vec<String> {
        let raw = value.raw_display();
        if raw.is_empty() {
            return Vec::new();
        }
        if column.config.multiple {
            raw.split(self.settings.delimiter())
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        } else {
            vec![raw]
        }
    }
}

/// Raw text committed over a value that already displays as that text,
/// such as `"1"` over a seeded `Number(1)`.
fn same_text(committed: &CellValue, stored: &CellValue) -> bool {
    matches!(committed, CellValue::Text(_)) && !stored.is_empty() && committed.raw_display() == stored.raw_display()
}
