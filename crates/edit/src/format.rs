//! Mask and format glue between columns and the mask codec.

use gridedit_engine::cell::{is_formula, CellValue};
use gridedit_engine::mask::{MaskCodec, MaskSpec};

use crate::column::{ColumnDefinition, EditorKind};
use crate::surface::MaskAttr;

/// Mask declared by a column: a pattern mask wins over a locale.
pub fn get_mask(column: &ColumnDefinition) -> Option<MaskSpec> {
    let config = &column.config;
    if let Some(mask) = config.mask.as_deref().filter(|m| !m.is_empty()) {
        return Some(MaskSpec::Pattern {
            mask: mask.to_string(),
            decimal: config.decimal.unwrap_or('.'),
        });
    }
    config.locale.as_deref().filter(|l| !l.is_empty()).map(|locale| MaskSpec::Locale {
        locale: locale.to_string(),
        fraction_digits: config
            .options
            .get("maximumFractionDigits")
            .and_then(|v| v.as_u64())
            .and_then(|d| u8::try_from(d).ok()),
    })
}

/// Attribute that carries the mask onto the editor element.
pub fn mask_attr(spec: &MaskSpec) -> Option<MaskAttr> {
    match spec {
        MaskSpec::Pattern { .. } => spec.primary_pattern().map(|p| MaskAttr::DataMask(p.to_string())),
        MaskSpec::Locale { locale, .. } => Some(MaskAttr::DataLocale(locale.clone())),
    }
}

/// Text shown in the cell when no editor is mounted.
pub fn display_text(value: &CellValue, mask: Option<&MaskSpec>, codec: &dyn MaskCodec) -> String {
    match mask {
        Some(spec) if !value.is_formula() => codec.render(value, spec, true),
        _ => value.raw_display(),
    }
}

/// Text a text editor opens with. Masks render without decimal padding.
pub fn editor_text(value: &CellValue, column: &ColumnDefinition, codec: &dyn MaskCodec) -> (String, Option<MaskAttr>) {
    if value.is_formula() || column.config.disabled_mask_on_edition {
        return (value.raw_display(), None);
    }
    match get_mask(column) {
        Some(spec) => (codec.render(value, &spec, false), mask_attr(&spec)),
        None => (value.raw_display(), None),
    }
}

/// Turn the text left in an editor into the value to commit. Only numeric
/// columns and masks produce numbers; everything else keeps the raw text.
pub fn value_from_editor(text: &str, column: &ColumnDefinition, codec: &dyn MaskCodec) -> CellValue {
    if is_formula(text) {
        return CellValue::from_raw(text);
    }

    let trimmed = text.trim();
    let numeric = matches!(column.kind, EditorKind::Numeric);
    if trimmed.is_empty() {
        return if numeric && !column.config.allow_empty { CellValue::Number(0.0) } else { CellValue::Empty };
    }

    let mask = get_mask(column);
    if numeric || mask.is_some() {
        if let Some(n) = trimmed.parse::<f64>().ok().filter(|n| n.is_finite()) {
            return CellValue::Number(n);
        }
    }
    if let Some(spec) = mask {
        match codec.extract(text, &spec, true) {
            Some(extracted) => return extracted.value,
            None => log::warn!("mask could not read '{}', keeping raw text", text),
        }
    }
    CellValue::from_raw(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridedit_engine::mask::NumberMaskCodec;

    fn numeric(mask: Option<&str>, allow_empty: bool) -> ColumnDefinition {
        ColumnDefinition::new(EditorKind::Numeric).with_config(|c| {
            c.mask = mask.map(str::to_string);
            c.allow_empty = allow_empty;
        })
    }

    #[test]
    fn test_get_mask_prefers_pattern() {
        let column = ColumnDefinition::default().with_config(|c| {
            c.mask = Some("#.##0,00".into());
            c.decimal = Some(',');
            c.locale = Some("de-DE".into());
        });
        assert_eq!(get_mask(&column), Some(MaskSpec::Pattern { mask: "#.##0,00".into(), decimal: ',' }));
    }

    #[test]
    fn test_get_mask_locale_fraction_digits() {
        let column = ColumnDefinition::default().with_config(|c| {
            c.locale = Some("de-DE".into());
            c.options.insert("maximumFractionDigits".into(), serde_json::json!(2));
        });
        assert_eq!(
            get_mask(&column),
            Some(MaskSpec::Locale { locale: "de-DE".into(), fraction_digits: Some(2) })
        );
        assert_eq!(get_mask(&ColumnDefinition::default()), None);
    }

    #[test]
    fn test_editor_text_skips_mask_for_formula_and_disabled() {
        let codec = NumberMaskCodec::new();
        let column = numeric(Some("#,##0.00"), false);
        let (text, attr) = editor_text(&CellValue::Number(1234.5), &column, &codec);
        assert_eq!(text, "1,234.5");
        assert_eq!(attr, Some(MaskAttr::DataMask("#,##0.00".into())));

        let (text, attr) = editor_text(&CellValue::Formula("=A1*2".into()), &column, &codec);
        assert_eq!((text.as_str(), attr), ("=A1*2", None));

        let disabled = column.with_config(|c| c.disabled_mask_on_edition = true);
        let (text, attr) = editor_text(&CellValue::Number(1234.5), &disabled, &codec);
        assert_eq!((text.as_str(), attr), ("1234.5", None));
    }

    #[test]
    fn test_numeric_empty_coercion() {
        let codec = NumberMaskCodec::new();
        assert_eq!(value_from_editor("  ", &numeric(None, false), &codec), CellValue::Number(0.0));
        assert_eq!(value_from_editor("", &numeric(None, true), &codec), CellValue::Empty);
        assert_eq!(value_from_editor("=", &numeric(None, false), &codec), CellValue::Formula("=".into()));
    }

    #[test]
    fn test_masked_extraction() {
        let codec = NumberMaskCodec::new();
        let column = numeric(Some("$ #,##0.00"), false);
        assert_eq!(value_from_editor("$ 1,234.50", &column, &codec), CellValue::Number(1234.5));
        assert_eq!(value_from_editor("42", &column, &codec), CellValue::Number(42.0));
        assert_eq!(value_from_editor("n/a", &column, &codec), CellValue::Text("n/a".into()));
    }

    #[test]
    fn test_text_is_kept_raw() {
        let codec = NumberMaskCodec::new();
        let column = ColumnDefinition::default();
        assert_eq!(value_from_editor("00123", &column, &codec), CellValue::Text("00123".into()));
        assert_eq!(value_from_editor("12", &column, &codec), CellValue::Text("12".into()));
        assert_eq!(value_from_editor("hello", &column, &codec), CellValue::Text("hello".into()));
        assert_eq!(value_from_editor("", &column, &codec), CellValue::Empty);
    }

    #[test]
    fn test_formula_needs_leading_equals() {
        let codec = NumberMaskCodec::new();
        let column = ColumnDefinition::default();
        assert_eq!(value_from_editor("=A1", &column, &codec), CellValue::Formula("=A1".into()));
        assert_eq!(value_from_editor(" =A1", &column, &codec), CellValue::Text(" =A1".into()));
        assert_eq!(value_from_editor(" 12", &numeric(None, false), &codec), CellValue::Number(12.0));
    }
}
