//! Cell views and the editing surfaces mounted into them.

use std::fmt;

use crate::picker::Picker;
use crate::layout::Point;

/// Rendered state of one cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellView {
    pub html: String,
    /// An editing surface is mounted in this cell.
    pub editor: bool,
    pub readonly: bool,
    /// Content overflowing into the next cell is cut off.
    pub overflow_hidden: bool,
    pub image_src: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Dimension {
    Auto,
    Px(f32),
    Percent(f32),
}

/// Inline style of the text editor element.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorStyle {
    pub width: Dimension,
    pub height: Dimension,
    pub min_height: Option<f32>,
    pub resizable: bool,
    pub overflow_hidden: bool,
    pub pre_wrap: bool,
    pub break_word: bool,
    pub border_box: bool,
}

impl Default for EditorStyle {
    fn default() -> Self {
        Self {
            width: Dimension::Percent(100.0),
            height: Dimension::Auto,
            min_height: None,
            resizable: true,
            overflow_hidden: false,
            pre_wrap: false,
            break_word: false,
            border_box: false,
        }
    }
}

impl EditorStyle {
    /// Style for a text editor that grows with its content.
    pub fn auto_grow(min_height: f32) -> Self {
        Self {
            width: Dimension::Percent(100.0),
            height: Dimension::Auto,
            min_height: Some(min_height),
            resizable: false,
            overflow_hidden: true,
            pre_wrap: true,
            break_word: true,
            border_box: true,
        }
    }
}

/// Mask attribute set on the text editor element.
#[derive(Debug, Clone, PartialEq)]
pub enum MaskAttr {
    DataMask(String),
    DataLocale(String),
}

/// Text field or multi-line text area.
#[derive(Debug, Clone, PartialEq)]
pub struct TextEditor {
    pub multiline: bool,
    pub text: String,
    /// Mask carried on the element. Typed text stays raw until commit.
    pub mask_attr: Option<MaskAttr>,
    pub style: EditorStyle,
    /// Measured content height, updated by the auto-resize controller.
    pub scroll_height: f32,
    pub caret_at_end: bool,
}

impl TextEditor {
    pub fn new(text: impl Into<String>, multiline: bool) -> Self {
        Self {
            multiline,
            text: text.into(),
            mask_attr: None,
            style: EditorStyle::default(),
            scroll_height: 0.0,
            caret_at_end: false,
        }
    }

    /// Pin the editor to a measured content height.
    pub fn resize_to(&mut self, height: f32) {
        self.style.height = Dimension::Px(height);
        self.scroll_height = height;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerKind {
    Dropdown,
    Calendar,
    Color,
    RichText,
    Image,
}

/// Surface mounted by an open session.
pub enum EditorSurface {
    /// Nothing mounted (hidden columns, custom editors managing their own view).
    None,
    Text(TextEditor),
    Picker {
        kind: PickerKind,
        picker: Box<dyn Picker>,
        placement: Option<Point>,
    },
}

impl EditorSurface {
    pub fn text(&self) -> Option<&TextEditor> {
        match self {
            EditorSurface::Text(editor) => Some(editor),
            _ => None,
        }
    }

    pub fn text_mut(&mut self) -> Option<&mut TextEditor> {
        match self {
            EditorSurface::Text(editor) => Some(editor),
            _ => None,
        }
    }

    pub fn picker_kind(&self) -> Option<PickerKind> {
        match self {
            EditorSurface::Picker { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    pub fn placement(&self) -> Option<Point> {
        match self {
            EditorSurface::Picker { placement, .. } => *placement,
            _ => None,
        }
    }
}

impl fmt::Debug for EditorSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditorSurface::None => f.write_str("None"),
            EditorSurface::Text(editor) => f.debug_tuple("Text").field(editor).finish(),
            EditorSurface::Picker { kind, placement, picker } => f
                .debug_struct("Picker")
                .field("kind", kind)
                .field("placement", placement)
                .field("open", &picker.is_open())
                .finish(),
        }
    }
}

/// Escape text for display in a cell.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
