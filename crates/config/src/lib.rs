// Configuration loading

pub mod columns;
pub mod error;
pub mod settings;

pub use columns::{columns_from_json, ColumnConfig, DropdownItem, WordWrap};
pub use error::ConfigError;
pub use settings::GridSettings;
