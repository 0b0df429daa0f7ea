//! Column definitions with their editor capabilities attached.

use std::fmt;
use std::rc::Rc;

use gridedit_config::{ColumnConfig, DropdownItem, WordWrap};
use gridedit_engine::cell::CellValue;
use gridedit_engine::cell_ref::CellRef;

use crate::session::EditOrigin;
use crate::surface::CellView;

/// Editor contract for column types the grid does not know about.
///
/// Implementations own whatever state their surface needs; both calls take
/// `&self` because the editor is shared by every cell of the column.
pub trait CustomEditor {
    fn open_editor(
        &self,
        view: &mut CellView,
        value: &CellValue,
        cell: CellRef,
        column: &ColumnDefinition,
        origin: &EditOrigin,
    );

    /// Tear down the surface. On `save` the returned value is committed;
    /// `None` keeps the stored value.
    fn close_editor(
        &self,
        view: &mut CellView,
        save: bool,
        cell: CellRef,
        column: &ColumnDefinition,
    ) -> Option<CellValue>;
}

/// Narrows a dropdown's source for one cell.
pub type DropdownFilter = Rc<dyn Fn(CellRef, &[DropdownItem]) -> Vec<DropdownItem>>;

/// Declared editor type of a column.
#[derive(Clone)]
pub enum EditorKind {
    Text,
    Numeric,
    Hidden,
    Checkbox,
    Radio,
    Dropdown,
    Calendar,
    Color,
    Html,
    Image,
    Custom(Rc<dyn CustomEditor>),
}

impl EditorKind {
    /// Resolve a built-in type name. Unknown names edit as text.
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "text" => EditorKind::Text,
            "numeric" | "number" => EditorKind::Numeric,
            "hidden" => EditorKind::Hidden,
            "checkbox" => EditorKind::Checkbox,
            "radio" => EditorKind::Radio,
            "dropdown" | "autocomplete" => EditorKind::Dropdown,
            "calendar" => EditorKind::Calendar,
            "color" => EditorKind::Color,
            "html" => EditorKind::Html,
            "image" => EditorKind::Image,
            other => {
                log::debug!("no editor for column type '{}', editing as text", other);
                EditorKind::Text
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            EditorKind::Text => "text",
            EditorKind::Numeric => "numeric",
            EditorKind::Hidden => "hidden",
            EditorKind::Checkbox => "checkbox",
            EditorKind::Radio => "radio",
            EditorKind::Dropdown => "dropdown",
            EditorKind::Calendar => "calendar",
            EditorKind::Color => "color",
            EditorKind::Html => "html",
            EditorKind::Image => "image",
            EditorKind::Custom(_) => "custom",
        }
    }

    /// Checkbox and radio columns toggle instead of opening a surface.
    pub fn is_toggle(&self) -> bool {
        matches!(self, EditorKind::Checkbox | EditorKind::Radio)
    }
}

impl fmt::Debug for EditorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone)]
pub struct ColumnDefinition {
    pub kind: EditorKind,
    pub config: ColumnConfig,
    pub filter: Option<DropdownFilter>,
}

impl ColumnDefinition {
    pub fn new(kind: EditorKind) -> Self {
        Self {
            config: ColumnConfig::of_kind(kind.name()),
            kind,
            filter: None,
        }
    }

    pub fn custom(editor: impl CustomEditor + 'static) -> Self {
        Self::new(EditorKind::Custom(Rc::new(editor)))
    }

    pub fn with_config(mut self, f: impl FnOnce(&mut ColumnConfig)) -> Self {
        f(&mut self.config);
        self
    }

    pub fn with_filter(
        mut self,
        filter: impl Fn(CellRef, &[DropdownItem]) -> Vec<DropdownItem> + 'static,
    ) -> Self {
        self.filter = Some(Rc::new(filter));
        self
    }

    pub fn word_wrap(&self) -> WordWrap {
        self.config.word_wrap
    }

    /// Dropdown entries for a cell, after the column filter if one is set.
    /// Always a fresh copy; the configured source is never handed out.
    pub fn dropdown_source(&self, cell: CellRef) -> Vec<DropdownItem> {
        match &self.filter {
            Some(filter) => filter(cell, &self.config.source),
            None => self.config.source.clone(),
        }
    }
}

impl Default for ColumnDefinition {
    fn default() -> Self {
        Self::new(EditorKind::Text)
    }
}

impl From<ColumnConfig> for ColumnDefinition {
    fn from(config: ColumnConfig) -> Self {
        Self {
            kind: EditorKind::from_name(&config.kind),
            config,
            filter: None,
        }
    }
}

impl fmt::Debug for ColumnDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDefinition")
            .field("kind", &self.kind)
            .field("config", &self.config)
            .field("filter", &self.filter.is_some())
            .finish()
    }
}
