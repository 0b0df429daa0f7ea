//! Per-type editor strategies: what each column kind mounts on open and
//! what it hands back on close.

use std::rc::Rc;

use gridedit_config::WordWrap;
use gridedit_engine::cell::CellValue;
use gridedit_engine::cell_ref::CellRef;
use gridedit_engine::events::GridEvent;

use crate::auto_resize::AutoResizeController;
use crate::column::{ColumnDefinition, EditorKind};
use crate::deferred::DeferredTask;
use crate::format::{editor_text, value_from_editor};
use crate::picker::{DropdownOptions, PickerOptions, PickerValue};
use crate::placement::{anchored_below, floating_image, floating_rich_text};
use crate::session::{EditOrigin, EditSession, EditState};
use crate::surface::{Dimension, EditorStyle, EditorSurface, PickerKind, TextEditor};
use crate::worksheet::Worksheet;

impl Worksheet {
    // =========================================================================
    // Open
    // =========================================================================

    pub(crate) fn open_surface(
        &mut self,
        cell: CellRef,
        column: &ColumnDefinition,
        value: &CellValue,
        empty: bool,
        origin: &EditOrigin,
    ) {
        match &column.kind {
            EditorKind::Custom(editor) => {
                let editor = Rc::clone(editor);
                self.view_mut(cell).editor = true;
                editor.open_editor(self.view_mut(cell), value, cell, column, origin);
                self.events.dispatch(GridEvent::CreateEditor { x: cell.x, y: cell.y });
            }
            EditorKind::Hidden => {}
            EditorKind::Checkbox | EditorKind::Radio => self.toggle_in_place(cell, value),
            EditorKind::Dropdown => self.open_dropdown(cell, column, value),
            EditorKind::Calendar => self.open_value_picker(cell, column, value, PickerKind::Calendar),
            EditorKind::Color => self.open_value_picker(cell, column, value, PickerKind::Color),
            EditorKind::Html => self.open_rich_text(cell, value),
            EditorKind::Image => self.open_image(cell, column),
            EditorKind::Text | EditorKind::Numeric => self.open_text(cell, column, value, empty, origin),
        }
    }

    /// Mount a surface into the open session and announce it.
    fn mount(&mut self, cell: CellRef, surface: EditorSurface) {
        let view = self.view_mut(cell);
        view.editor = true;
        view.html.clear();
        if let Some(session) = self.edition.as_mut() {
            session.surface = surface;
        }
        self.events.dispatch(GridEvent::CreateEditor { x: cell.x, y: cell.y });
    }

    /// Checkbox and radio cells flip immediately; no surface stays open.
    fn toggle_in_place(&mut self, cell: CellRef, value: &CellValue) {
        let toggled = CellValue::Bool(!value.is_truthy());
        self.set_value(cell, toggled.clone());

        if let Some(session) = self.edition.take() {
            self.deferred.cancel_session(session.id);
        }
        self.state = EditState::Idle;
        self.events.dispatch(GridEvent::EditionEnd { x: cell.x, y: cell.y, value: Some(toggled), save: true });
    }

    fn open_dropdown(&mut self, cell: CellRef, column: &ColumnDefinition, value: &CellValue) {
        let rect = self.layout.cell_rect(cell);
        let options = DropdownOptions {
            items: column.dropdown_source(cell),
            multiple: column.config.multiple,
            autocomplete: column.config.autocomplete,
            opened: true,
            value: self.dropdown_ids(column, value),
            height: rect.height - 2.0,
            position: self.settings.anchored_pickers(),
            kind: column.config.option_str("type").map(str::to_string),
        };
        let picker = self.pickers.dropdown(options);
        self.mount(cell, EditorSurface::Picker { kind: PickerKind::Dropdown, picker, placement: None });
    }

    fn open_value_picker(&mut self, cell: CellRef, column: &ColumnDefinition, value: &CellValue, kind: PickerKind) {
        let mut options = PickerOptions {
            value: value.raw_display(),
            opened: true,
            position: self.settings.anchored_pickers(),
            format: None,
            extra: column.config.options.clone(),
        };

        let (picker, placement) = if kind == PickerKind::Calendar {
            let format = column
                .config
                .option_str("format")
                .map(str::to_string)
                .unwrap_or_else(|| self.settings.calendar_format.clone());
            options.format = Some(format);
            (self.pickers.calendar(options), None)
        } else {
            let placement = options.position.then(|| anchored_below(self.layout.cell_rect(cell)));
            (self.pickers.color(options), placement)
        };
        self.mount(cell, EditorSurface::Picker { kind, picker, placement });
    }

    fn open_rich_text(&mut self, cell: CellRef, value: &CellValue) {
        let picker = self.pickers.rich_text(&value.raw_display());
        let placement = floating_rich_text(self.layout.cell_rect(cell), picker.size(), self.layout.viewport());
        self.mount(cell, EditorSurface::Picker { kind: PickerKind::RichText, picker, placement: Some(placement) });
    }

    fn open_image(&mut self, cell: CellRef, column: &ColumnDefinition) {
        let src = self.view(cell).and_then(|v| v.image_src.clone());
        let options = PickerOptions {
            opened: true,
            extra: column.config.options.clone(),
            ..Default::default()
        };
        let picker = self.pickers.image(src.as_deref(), options);
        let placement = floating_image(self.layout.cell_rect(cell), picker.size(), self.layout.viewport());
        self.mount(cell, EditorSurface::Picker { kind: PickerKind::Image, picker, placement: Some(placement) });
    }

    fn open_text(&mut self, cell: CellRef, column: &ColumnDefinition, value: &CellValue, empty: bool, origin: &EditOrigin) {
        let wrap = column.word_wrap();
        let multiline = wrap != WordWrap::Off
            && (self.settings.word_wrap || self.settings.auto_wrap_rows || wrap == WordWrap::On);
        let auto_grow = multiline && self.settings.auto_wrap_rows;

        let start = if empty { CellValue::Empty } else { value.clone() };
        let (mut text, mask_attr) = editor_text(&start, column, self.codec.as_ref());
        if empty {
            if let EditOrigin::Keyboard { key: Some(key) } = origin {
                text = key.clone();
            }
        }

        let rect = self.layout.cell_rect(cell);
        let min_height = rect.height - 2.0;
        let mut editor = TextEditor::new(text, multiline);
        editor.mask_attr = mask_attr;
        editor.scroll_height = min_height;
        editor.style = if auto_grow {
            EditorStyle::auto_grow(min_height)
        } else {
            EditorStyle {
                width: Dimension::Px(rect.width),
                height: Dimension::Px(min_height),
                min_height: Some(min_height),
                ..Default::default()
            }
        };

        if auto_grow {
            let controller = AutoResizeController::attach(cell.y, &editor);
            if let Some(session) = self.edition.as_mut() {
                session.auto_resize = Some(controller);
                self.deferred.push(DeferredTask::MeasureEditor { session: session.id });
            }
        } else {
            editor.caret_at_end = true;
        }

        self.mount(cell, EditorSurface::Text(editor));
    }

    // =========================================================================
    // Close
    // =========================================================================

    /// Tear down the session's surface. With `save` the value to commit is
    /// returned; otherwise the stored value is.
    pub(crate) fn close_surface(&mut self, session: &mut EditSession, column: &ColumnDefinition, save: bool) -> CellValue {
        let cell = session.cell;
        let stored = self.sheet.get(cell).clone();
        let surface = std::mem::replace(&mut session.surface, EditorSurface::None);
        session.auto_resize = None;

        if let EditorKind::Custom(editor) = &column.kind {
            let editor = Rc::clone(editor);
            let value = editor.close_editor(self.view_mut(cell), save, cell, column);
            return if save { value.unwrap_or(stored) } else { stored };
        }

        match surface {
            EditorSurface::Text(editor) if save => value_from_editor(&editor.text, column, self.codec.as_ref()),
            EditorSurface::Picker { kind, mut picker, .. } => match picker.close(save) {
                Some(picked) if save => self.picked_value(kind, picked),
                _ => stored,
            },
            _ => stored,
        }
    }

    fn picked_value(&self, kind: PickerKind, picked: PickerValue) -> CellValue {
        match picked {
            PickerValue::Empty => CellValue::Empty,
            PickerValue::Single(s) => CellValue::from_raw(&s),
            PickerValue::Multiple(list) => {
                let separator = if kind == PickerKind::Dropdown { self.settings.delimiter() } else { " " };
                CellValue::from_raw(&list.join(separator))
            }
        }
    }
}
