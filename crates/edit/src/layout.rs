//! Contract with the grid's layout engine.
//!
//! The editing core never computes layout itself. It asks where a cell is,
//! how tall some text would be, and requests row-height recomputation.

use std::collections::HashMap;

use gridedit_config::GridSettings;
use gridedit_engine::cell_ref::CellRef;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Screen rectangle of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self { left, top, width, height }
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }
}

pub trait Layout {
    fn cell_rect(&self, cell: CellRef) -> Rect;

    fn viewport(&self) -> Size;

    /// Natural height of `text` laid out in a wrapping box `width` wide.
    fn content_height(&self, text: &str, width: f32) -> f32;

    /// Ask the layout engine to recompute one row's height.
    fn auto_adjust_row_height(&mut self, row: usize);
}

/// Uniform-grid layout: fixed column widths, fixed glyph metrics.
///
/// Row-height requests are recorded rather than acted on; rendering belongs
/// to the host.
#[derive(Debug, Clone)]
pub struct FixedLayout {
    pub column_width: f32,
    pub row_height: f32,
    pub column_widths: HashMap<usize, f32>,
    pub row_heights: HashMap<usize, f32>,
    pub origin: Point,
    pub viewport: Size,
    pub char_width: f32,
    pub line_height: f32,
    pub vertical_padding: f32,
    adjust_requests: Vec<usize>,
}

impl Default for FixedLayout {
    fn default() -> Self {
        Self {
            column_width: 100.0,
            row_height: 24.0,
            column_widths: HashMap::new(),
            row_heights: HashMap::new(),
            origin: Point::new(50.0, 24.0),
            viewport: Size::new(1280.0, 800.0),
            char_width: 8.0,
            line_height: 18.0,
            vertical_padding: 6.0,
            adjust_requests: Vec::new(),
        }
    }
}

impl FixedLayout {
    pub fn from_settings(settings: &GridSettings) -> Self {
        Self {
            column_width: settings.default_column_width,
            row_height: settings.default_row_height,
            ..Default::default()
        }
    }

    pub fn with_viewport(mut self, width: f32, height: f32) -> Self {
        self.viewport = Size::new(width, height);
        self
    }

    pub fn with_metrics(mut self, char_width: f32, line_height: f32, vertical_padding: f32) -> Self {
        self.char_width = char_width;
        self.line_height = line_height;
        self.vertical_padding = vertical_padding;
        self
    }

    /// Rows passed to `auto_adjust_row_height`, in call order.
    pub fn adjust_requests(&self) -> &[usize] {
        &self.adjust_requests
    }

    fn width_of(&self, col: usize) -> f32 {
        self.column_widths.get(&col).copied().unwrap_or(self.column_width)
    }

    fn height_of(&self, row: usize) -> f32 {
        self.row_heights.get(&row).copied().unwrap_or(self.row_height)
    }
}

impl Layout for FixedLayout {
    fn cell_rect(&self, cell: CellRef) -> Rect {
        let left = self.origin.x + (0..cell.x).map(|c| self.width_of(c)).sum::<f32>();
        let top = self.origin.y + (0..cell.y).map(|r| self.height_of(r)).sum::<f32>();
        Rect::new(left, top, self.width_of(cell.x), self.height_of(cell.y))
    }

    fn viewport(&self) -> Size {
        self.viewport
    }

    fn content_height(&self, text: &str, width: f32) -> f32 {
        let per_line = ((width / self.char_width).floor() as usize).max(1);
        let lines: usize = text
            .split('\n')
            .map(|line| line.chars().count().div_ceil(per_line).max(1))
            .sum();
        lines as f32 * self.line_height + self.vertical_padding
    }

    fn auto_adjust_row_height(&mut self, row: usize) {
        self.adjust_requests.push(row);
    }
}

impl<L: Layout> Layout for std::rc::Rc<std::cell::RefCell<L>> {
    fn cell_rect(&self, cell: CellRef) -> Rect {
        self.borrow().cell_rect(cell)
    }

    fn viewport(&self) -> Size {
        self.borrow().viewport()
    }

    fn content_height(&self, text: &str, width: f32) -> f32 {
        self.borrow().content_height(text, width)
    }

    fn auto_adjust_row_height(&mut self, row: usize) {
        self.borrow_mut().auto_adjust_row_height(row);
    }
}
