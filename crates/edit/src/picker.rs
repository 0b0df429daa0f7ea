//! Picker capabilities: dropdown, calendar, color, rich text and image.
//!
//! The editing core only builds pickers through [`PickerFactory`] and talks
//! to them through [`Picker`]. `DefaultPickers` provides headless pickers
//! that hold their state in memory; a UI host supplies its own factory.

use gridedit_config::DropdownItem;

use crate::layout::Size;

/// What a picker hands back when it closes.
#[derive(Debug, Clone, PartialEq)]
pub enum PickerValue {
    Empty,
    Single(String),
    Multiple(Vec<String>),
}

impl PickerValue {
    pub fn from_text(text: &str) -> Self {
        if text.is_empty() {
            PickerValue::Empty
        } else {
            PickerValue::Single(text.to_string())
        }
    }

    /// Selected entries as a list; `Single` is a one-element list.
    pub fn into_list(self) -> Vec<String> {
        match self {
            PickerValue::Empty => Vec::new(),
            PickerValue::Single(s) => vec![s],
            PickerValue::Multiple(v) => v,
        }
    }
}

pub trait Picker {
    /// The value the picker would commit right now.
    fn value(&self) -> PickerValue;

    /// Apply a user choice.
    fn select(&mut self, value: PickerValue);

    fn is_open(&self) -> bool;

    /// Close the picker. Reads the value only when `save` is set.
    fn close(&mut self, save: bool) -> Option<PickerValue>;

    /// Rendered size, used to keep floating surfaces inside the viewport.
    fn size(&self) -> Size;
}

#[derive(Debug, Clone, PartialEq)]
pub struct DropdownOptions {
    pub items: Vec<DropdownItem>,
    pub multiple: bool,
    pub autocomplete: bool,
    pub opened: bool,
    /// Pre-selected item ids.
    pub value: Vec<String>,
    pub height: f32,
    /// Anchor relative to the table instead of the screen.
    pub position: bool,
    /// Presentation variant passed through from column options.
    pub kind: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PickerOptions {
    pub value: String,
    pub opened: bool,
    pub position: bool,
    /// Date format for calendars.
    pub format: Option<String>,
    /// Column options not interpreted by the core.
    pub extra: serde_json::Map<String, serde_json::Value>,
}

pub trait PickerFactory {
    fn dropdown(&self, options: DropdownOptions) -> Box<dyn Picker>;
    fn calendar(&self, options: PickerOptions) -> Box<dyn Picker>;
    fn color(&self, options: PickerOptions) -> Box<dyn Picker>;
    fn rich_text(&self, value: &str) -> Box<dyn Picker>;
    fn image(&self, src: Option<&str>, options: PickerOptions) -> Box<dyn Picker>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultPickers;

impl PickerFactory for DefaultPickers {
    fn dropdown(&self, options: DropdownOptions) -> Box<dyn Picker> {
        Box::new(DropdownPicker::new(options))
    }

    fn calendar(&self, options: PickerOptions) -> Box<dyn Picker> {
        Box::new(ValuePicker::new(options, Size::new(260.0, 280.0)))
    }

    fn color(&self, options: PickerOptions) -> Box<dyn Picker> {
        Box::new(ValuePicker::new(options, Size::new(200.0, 160.0)))
    }

    fn rich_text(&self, value: &str) -> Box<dyn Picker> {
        let options = PickerOptions { value: value.to_string(), opened: true, ..Default::default() };
        Box::new(ValuePicker::new(options, Size::new(300.0, 200.0)))
    }

    fn image(&self, src: Option<&str>, options: PickerOptions) -> Box<dyn Picker> {
        let options = PickerOptions { value: src.unwrap_or_default().to_string(), opened: true, ..options };
        Box::new(ValuePicker::new(options, Size::new(240.0, 240.0)))
    }
}

pub struct DropdownPicker {
    options: DropdownOptions,
    selected: Vec<String>,
    open: bool,
}

impl DropdownPicker {
    pub fn new(options: DropdownOptions) -> Self {
        let mut selected = options.value.clone();
        if !options.multiple {
            selected.truncate(1);
        }
        Self { open: options.opened, selected, options }
    }

    pub fn options(&self) -> &DropdownOptions {
        &self.options
    }

    /// Items whose name contains `filter`, case-insensitively (type-to-filter).
    pub fn matching(&self, filter: &str) -> Vec<&DropdownItem> {
        let filter = filter.to_lowercase();
        self.options
            .items
            .iter()
            .filter(|item| filter.is_empty() || item.name.to_lowercase().contains(&filter))
            .collect()
    }
}

impl Picker for DropdownPicker {
    fn value(&self) -> PickerValue {
        if self.options.multiple {
            PickerValue::Multiple(self.selected.clone())
        } else {
            self.selected.first().map(|s| PickerValue::Single(s.clone())).unwrap_or(PickerValue::Empty)
        }
    }

    fn select(&mut self, value: PickerValue) {
        let mut list = value.into_list();
        if !self.options.multiple {
            list.truncate(1);
        }
        self.selected = list;
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn close(&mut self, save: bool) -> Option<PickerValue> {
        self.open = false;
        save.then(|| self.value())
    }

    fn size(&self) -> Size {
        Size::new(200.0, self.options.height.max(0.0) + 24.0 * self.options.items.len().min(8) as f32)
    }
}

/// Picker over a single text value (date, color, html content, image source).
pub struct ValuePicker {
    options: PickerOptions,
    value: String,
    open: bool,
    size: Size,
}

impl ValuePicker {
    pub fn new(options: PickerOptions, size: Size) -> Self {
        Self { value: options.value.clone(), open: options.opened, options, size }
    }

    pub fn options(&self) -> &PickerOptions {
        &self.options
    }
}

impl Picker for ValuePicker {
    fn value(&self) -> PickerValue {
        PickerValue::from_text(&self.value)
    }

    fn select(&mut self, value: PickerValue) {
        self.value = value.into_list().join(" ");
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn close(&mut self, save: bool) -> Option<PickerValue> {
        self.open = false;
        save.then(|| self.value())
    }

    fn size(&self) -> Size {
        self.size
    }
}
