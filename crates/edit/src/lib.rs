//! In-place cell editing for a tabular grid.
//!
//! A [`Worksheet`] hosts at most one [`EditSession`]. Opening an editor
//! resolves the column's [`EditorKind`], mounts a surface, and on close the
//! edited value is reconciled against the data matrix through
//! [`Worksheet::set_value`].

pub mod auto_resize;
pub mod column;
pub mod deferred;
pub mod format;
pub mod layout;
pub mod picker;
pub mod placement;
pub mod session;
mod strategy;
pub mod surface;
pub mod toggle;
pub mod worksheet;

pub use auto_resize::AutoResizeController;
pub use column::{ColumnDefinition, CustomEditor, EditorKind};
pub use layout::{FixedLayout, Layout, Rect, Size};
pub use picker::{DefaultPickers, Picker, PickerFactory, PickerValue};
pub use session::{EditOrigin, EditSession, EditState};
pub use surface::{CellView, EditorSurface};
pub use toggle::{ToggleBatchCommitter, ToggleSelection};
pub use worksheet::Worksheet;
