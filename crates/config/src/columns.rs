//! Declarative column definitions, as they appear in a grid's JSON config.
//!
//! Capabilities that cannot be written in JSON (custom editors, dropdown
//! filters) are attached later by the editing crate.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::settings::strip_comments;

/// Per-column word-wrap override.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<bool>", into = "Option<bool>")]
pub enum WordWrap {
    /// Follow the grid-wide setting.
    #[default]
    Inherit,
    On,
    Off,
}

impl From<Option<bool>> for WordWrap {
    fn from(value: Option<bool>) -> Self {
        match value {
            None => WordWrap::Inherit,
            Some(true) => WordWrap::On,
            Some(false) => WordWrap::Off,
        }
    }
}

impl From<WordWrap> for Option<bool> {
    fn from(value: WordWrap) -> Self {
        match value {
            WordWrap::Inherit => None,
            WordWrap::On => Some(true),
            WordWrap::Off => Some(false),
        }
    }
}

/// One entry of a dropdown source. Plain strings use themselves as id and name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ItemRepr")]
pub struct DropdownItem {
    pub id: String,
    pub name: String,
}

impl DropdownItem {
    pub fn plain(value: impl Into<String>) -> Self {
        let value = value.into();
        Self { id: value.clone(), name: value }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ItemRepr {
    Plain(String),
    Full {
        id: serde_json::Value,
        #[serde(default)]
        name: Option<String>,
    },
}

impl From<ItemRepr> for DropdownItem {
    fn from(repr: ItemRepr) -> Self {
        match repr {
            ItemRepr::Plain(s) => DropdownItem::plain(s),
            ItemRepr::Full { id, name } => {
                let id = match id {
                    serde_json::Value::String(s) => s,
                    other => other.to_string(),
                };
                let name = name.unwrap_or_else(|| id.clone());
                DropdownItem { id, name }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ColumnConfig {
    /// Built-in editor name (`text`, `numeric`, `dropdown`, ...).
    #[serde(rename = "type")]
    pub kind: String,
    pub title: Option<String>,
    pub width: Option<f32>,
    pub word_wrap: WordWrap,

    // Format
    pub mask: Option<String>,
    pub locale: Option<String>,
    pub decimal: Option<char>,
    pub disabled_mask_on_edition: bool,

    pub allow_empty: bool,
    pub read_only: bool,

    // Dropdown
    pub source: Vec<DropdownItem>,
    pub multiple: bool,
    pub autocomplete: bool,

    /// Passed verbatim to pickers (`format`, `type`, `palette`, ...).
    pub options: serde_json::Map<String, serde_json::Value>,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            kind: String::from("text"),
            title: None,
            width: None,
            word_wrap: WordWrap::Inherit,
            mask: None,
            locale: None,
            decimal: None,
            disabled_mask_on_edition: false,
            allow_empty: false,
            read_only: false,
            source: Vec::new(),
            multiple: false,
            autocomplete: false,
            options: serde_json::Map::new(),
        }
    }
}

impl ColumnConfig {
    pub fn of_kind(kind: impl Into<String>) -> Self {
        Self { kind: kind.into(), ..Default::default() }
    }

    /// String option passed through to a picker.
    pub fn option_str(&self, key: &str) -> Option<&str> {
        self.options.get(key).and_then(|v| v.as_str())
    }

    fn validate(&self, index: usize) -> Result<(), ConfigError> {
        if let Some(decimal) = self.decimal {
            if decimal != '.' && decimal != ',' {
                return Err(ConfigError::InvalidColumn {
                    index,
                    reason: format!("decimal separator must be '.' or ',', got '{decimal}'"),
                });
            }
        }
        Ok(())
    }
}

/// Parse a JSON array of column definitions. `//` comment lines are allowed.
pub fn columns_from_json(contents: &str) -> Result<Vec<ColumnConfig>, ConfigError> {
    let columns: Vec<ColumnConfig> = serde_json::from_str(&strip_comments(contents))
        .map_err(|e| ConfigError::Parse(e.to_string()))?;
    for (index, column) in columns.iter().enumerate() {
        column.validate(index)?;
    }
    Ok(columns)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_text() {
        let columns = columns_from_json("[{}]").unwrap();
        assert_eq!(columns[0].kind, "text");
        assert_eq!(columns[0].word_wrap, WordWrap::Inherit);
    }

    #[test]
    fn test_word_wrap_tri_state() {
        let columns = columns_from_json(
            r#"[{"wordWrap": true}, {"wordWrap": false}, {"wordWrap": null}]"#,
        )
        .unwrap();
        let wraps: Vec<_> = columns.iter().map(|c| c.word_wrap).collect();
        assert_eq!(wraps, vec![WordWrap::On, WordWrap::Off, WordWrap::Inherit]);
    }

    #[test]
    fn test_dropdown_source_forms() {
        let columns = columns_from_json(
            r#"[{
                // mixed source entries
                "type": "dropdown",
                "multiple": true,
                "source": ["a", {"id": 2, "name": "Two"}, {"id": "c"}]
            }]"#,
        )
        .unwrap();
        let column = &columns[0];
        assert!(column.multiple);
        assert_eq!(
            column.source,
            vec![
                DropdownItem::plain("a"),
                DropdownItem { id: "2".into(), name: "Two".into() },
                DropdownItem::plain("c"),
            ]
        );
    }

    #[test]
    fn test_options_pass_through() {
        let columns = columns_from_json(
            r#"[{"type": "calendar", "options": {"format": "DD/MM/YYYY", "time": true}}]"#,
        )
        .unwrap();
        assert_eq!(columns[0].option_str("format"), Some("DD/MM/YYYY"));
        assert_eq!(columns[0].options.get("time"), Some(&serde_json::Value::Bool(true)));
    }

    #[test]
    fn test_mask_fields() {
        let columns = columns_from_json(
            r##"[{"type": "numeric", "mask": "#,##0.00", "disabledMaskOnEdition": true, "allowEmpty": true}]"##,
        )
        .unwrap();
        let column = &columns[0];
        assert_eq!(column.mask.as_deref(), Some("#,##0.00"));
        assert!(column.disabled_mask_on_edition);
        assert!(column.allow_empty);
    }

    #[test]
    fn test_invalid_decimal_rejected() {
        let err = columns_from_json(r#"[{}, {"decimal": "x"}]"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidColumn { index: 1, .. }));
    }
}
