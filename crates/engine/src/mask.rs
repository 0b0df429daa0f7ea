//! Display masks for numeric columns.
//!
//! A mask converts between the raw stored value and the text a user sees.
//! `NumberMaskCodec` understands spreadsheet-style number patterns
//! (`#,##0.00`, `$ #,##0`, `0.0%`) and a handful of locale conventions.
//! Anything it cannot interpret renders verbatim and extracts to nothing,
//! which callers treat as "keep the raw text".

use serde::{Deserialize, Serialize};

use crate::cell::CellValue;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum MaskSpec {
    /// Pattern mask such as `#,##0.00`. Only the first `;` section is used.
    Pattern { mask: String, decimal: char },
    /// Locale number formatting (`en-US`, `de-DE`, ...).
    Locale { locale: String, fraction_digits: Option<u8> },
}

impl MaskSpec {
    pub fn pattern(mask: impl Into<String>) -> Self {
        MaskSpec::Pattern { mask: mask.into(), decimal: '.' }
    }

    /// The positive section of a pattern mask, used as the editor's mask attribute.
    pub fn primary_pattern(&self) -> Option<&str> {
        match self {
            MaskSpec::Pattern { mask, .. } => mask.split(';').next(),
            MaskSpec::Locale { .. } => None,
        }
    }
}

/// Result of reading a display string back through a mask.
#[derive(Debug, Clone, PartialEq)]
pub struct Extracted {
    pub value: CellValue,
}

pub trait MaskCodec {
    /// Render a stored value. `treat_decimals` pads and rounds the fraction
    /// to the mask's precision; without it the value keeps its own digits.
    fn render(&self, value: &CellValue, spec: &MaskSpec, treat_decimals: bool) -> String;

    /// Recover the value behind a display string. `keep_raw` yields a number
    /// instead of normalized text.
    fn extract(&self, display: &str, spec: &MaskSpec, keep_raw: bool) -> Option<Extracted>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NumberMaskCodec;

impl NumberMaskCodec {
    pub fn new() -> Self {
        Self
    }
}

impl MaskCodec for NumberMaskCodec {
    fn render(&self, value: &CellValue, spec: &MaskSpec, treat_decimals: bool) -> String {
        let pattern = match NumberPattern::from_spec(spec) {
            Some(p) => p,
            None => return value.raw_display(),
        };
        match value {
            CellValue::Empty => String::new(),
            CellValue::Formula(source) => source.clone(),
            _ => match value.as_number() {
                Some(n) => pattern.format(n, treat_decimals),
                None => value.raw_display(),
            },
        }
    }

    fn extract(&self, display: &str, spec: &MaskSpec, keep_raw: bool) -> Option<Extracted> {
        let pattern = NumberPattern::from_spec(spec)?;
        let n = pattern.parse(display)?;
        let value = if keep_raw {
            CellValue::Number(n)
        } else {
            CellValue::Text(n.to_string())
        };
        Some(Extracted { value })
    }
}

/// Compiled form of a number mask.
#[derive(Debug, Clone, PartialEq)]
struct NumberPattern {
    prefix: String,
    suffix: String,
    decimal: char,
    group: Option<char>,
    min_int: usize,
    min_frac: usize,
    max_frac: usize,
    percent: bool,
}

impl NumberPattern {
    fn from_spec(spec: &MaskSpec) -> Option<Self> {
        match spec {
            MaskSpec::Pattern { mask, decimal } => Self::parse_pattern(mask, *decimal),
            MaskSpec::Locale { locale, fraction_digits } => Some(Self::for_locale(locale, *fraction_digits)),
        }
    }

    fn parse_pattern(mask: &str, decimal: char) -> Option<Self> {
        let section = mask.split(';').next().unwrap_or_default();
        let is_digit = |c: char| c == '#' || c == '0';
        let first = section.find(is_digit)?;
        let last = section.rfind(is_digit)?;

        let prefix = section[..first].to_string();
        let body = &section[first..=last];
        let suffix = section[last + 1..].to_string();

        let group_char = if decimal == ',' { '.' } else { ',' };
        let (int_part, frac_part) = match body.split_once(decimal) {
            Some((i, f)) => (i, f),
            None => (body, ""),
        };

        Some(Self {
            percent: prefix.contains('%') || suffix.contains('%'),
            prefix,
            suffix,
            decimal,
            group: int_part.contains(group_char).then_some(group_char),
            min_int: int_part.chars().filter(|c| *c == '0').count(),
            min_frac: frac_part.chars().filter(|c| *c == '0').count(),
            max_frac: frac_part.chars().filter(|c| is_digit(*c)).count(),
        })
    }

    fn for_locale(locale: &str, fraction_digits: Option<u8>) -> Self {
        let lang = locale.split(['-', '_']).next().unwrap_or_default().to_ascii_lowercase();
        let (decimal, group) = match lang.as_str() {
            "de" | "es" | "it" | "pt" | "nl" | "da" | "id" | "tr" => (',', '.'),
            "fr" | "ru" | "pl" | "cs" | "sv" | "nb" | "fi" => (',', ' '),
            _ => ('.', ','),
        };
        let (min_frac, max_frac) = match fraction_digits {
            Some(d) => (d as usize, d as usize),
            None => (0, 3),
        };
        Self {
            prefix: String::new(),
            suffix: String::new(),
            decimal,
            group: Some(group),
            min_int: 1,
            min_frac,
            max_frac,
            percent: false,
        }
    }

    fn format(&self, n: f64, treat_decimals: bool) -> String {
        let scaled = if self.percent { n * 100.0 } else { n };
        let negative = scaled < 0.0;
        let abs = scaled.abs();

        let digits = if treat_decimals {
            self.max_frac
        } else {
            own_fraction_digits(abs).min(self.max_frac)
        };
        let fixed = format!("{:.*}", digits, abs);
        let (int_digits, frac_digits) = match fixed.split_once('.') {
            Some((i, f)) => (i.to_string(), f.to_string()),
            None => (fixed, String::new()),
        };

        let mut frac = frac_digits;
        if treat_decimals {
            while frac.len() > self.min_frac && frac.ends_with('0') {
                frac.pop();
            }
        }

        let mut int = int_digits.trim_start_matches('0').to_string();
        while int.len() < self.min_int {
            int.insert(0, '0');
        }

        let mut out = String::new();
        if negative && (int.chars().any(|c| c != '0') || frac.chars().any(|c| c != '0')) {
            out.push('-');
        }
        out.push_str(&self.prefix);
        out.push_str(&group_digits(&int, self.group));
        if !frac.is_empty() {
            out.push(self.decimal);
            out.push_str(&frac);
        }
        out.push_str(&self.suffix);
        out
    }

    fn parse(&self, display: &str) -> Option<f64> {
        let mut normalized = String::new();
        let mut seen_digit = false;
        for c in display.trim().chars() {
            if c.is_ascii_digit() {
                normalized.push(c);
                seen_digit = true;
            } else if c == self.decimal {
                normalized.push('.');
            } else if c == '-' && !seen_digit && !normalized.contains('-') {
                normalized.push('-');
            }
            // grouping, currency and other literals are dropped
        }
        if !seen_digit {
            return None;
        }
        let n: f64 = normalized.parse().ok()?;
        Some(if self.percent { n / 100.0 } else { n })
    }
}

fn own_fraction_digits(n: f64) -> usize {
    let repr = format!("{}", n);
    repr.split_once('.').map(|(_, f)| f.len()).unwrap_or(0)
}

fn group_digits(int: &str, group: Option<char>) -> String {
    let Some(sep) = group else {
        return int.to_string();
    };
    let len = int.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in int.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(sep);
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec() -> NumberMaskCodec {
        NumberMaskCodec::new()
    }

    #[test]
    fn test_render_pads_when_treating_decimals() {
        let spec = MaskSpec::pattern("#,##0.00");
        assert_eq!(codec().render(&CellValue::Number(1234.5), &spec, true), "1,234.50");
        assert_eq!(codec().render(&CellValue::Number(0.0), &spec, true), "0.00");
        assert_eq!(codec().render(&CellValue::Number(-1234567.891), &spec, true), "-1,234,567.89");
    }

    #[test]
    fn test_render_keeps_own_digits_without_treating_decimals() {
        let spec = MaskSpec::pattern("#,##0.00");
        assert_eq!(codec().render(&CellValue::Number(1234.5), &spec, false), "1,234.5");
        assert_eq!(codec().render(&CellValue::Number(1234.0), &spec, false), "1,234");
        assert_eq!(codec().render(&CellValue::Number(1.23456), &spec, false), "1.23");
    }

    #[test]
    fn test_render_prefix_suffix_percent() {
        assert_eq!(codec().render(&CellValue::Number(1500.0), &MaskSpec::pattern("$ #,##0"), true), "$ 1,500");
        assert_eq!(codec().render(&CellValue::Number(0.125), &MaskSpec::pattern("0.0%"), true), "12.5%");
    }

    #[test]
    fn test_render_passes_through_non_numbers() {
        let spec = MaskSpec::pattern("#,##0.00");
        assert_eq!(codec().render(&CellValue::Text("n/a".into()), &spec, true), "n/a");
        assert_eq!(codec().render(&CellValue::Formula("=A1".into()), &spec, true), "=A1");
        assert_eq!(codec().render(&CellValue::Empty, &spec, true), "");
    }

    #[test]
    fn test_extract_recovers_number() {
        let spec = MaskSpec::pattern("#,##0.00");
        let out = codec().extract("1,234.50", &spec, true).unwrap();
        assert_eq!(out.value, CellValue::Number(1234.5));
        let out = codec().extract("1234.5", &spec, true).unwrap();
        assert_eq!(out.value, CellValue::Number(1234.5));
        let out = codec().extract("-$ 12", &MaskSpec::pattern("$ #,##0"), false).unwrap();
        assert_eq!(out.value, CellValue::Text("-12".into()));
    }

    #[test]
    fn test_extract_percent_and_decimal_comma() {
        let out = codec().extract("12.5%", &MaskSpec::pattern("0.0%"), true).unwrap();
        assert_eq!(out.value, CellValue::Number(0.125));
        let spec = MaskSpec::Pattern { mask: "#.##0,00".into(), decimal: ',' };
        assert_eq!(codec().extract("1.234,50", &spec, true).unwrap().value, CellValue::Number(1234.5));
        assert_eq!(codec().render(&CellValue::Number(1234.5), &spec, true), "1.234,50");
    }

    #[test]
    fn test_extract_rejects_text_without_digits() {
        assert_eq!(codec().extract("abc", &MaskSpec::pattern("#,##0"), true), None);
    }

    #[test]
    fn test_non_numeric_mask_is_inert() {
        let spec = MaskSpec::pattern("AAA-aaa");
        assert_eq!(codec().render(&CellValue::Number(5.0), &spec, true), "5");
        assert_eq!(codec().extract("12", &spec, true), None);
    }

    #[test]
    fn test_locale_conventions() {
        let de = MaskSpec::Locale { locale: "de-DE".into(), fraction_digits: Some(2) };
        assert_eq!(codec().render(&CellValue::Number(1234.5), &de, true), "1.234,50");
        let us = MaskSpec::Locale { locale: "en-US".into(), fraction_digits: None };
        assert_eq!(codec().render(&CellValue::Number(1234.5), &us, true), "1,234.5");
    }

    #[test]
    fn test_primary_pattern() {
        assert_eq!(MaskSpec::pattern("#,##0.00;(#,##0.00)").primary_pattern(), Some("#,##0.00"));
    }
}
