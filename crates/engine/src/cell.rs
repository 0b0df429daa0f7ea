use serde::{Deserialize, Serialize};

/// Raw value stored in the data matrix.
///
/// Equality is value identity: `Number(5.0)` and `Text("5")` are different
/// values. Only numeric columns and masks turn typed text into numbers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Empty,
    Bool(bool),
    Number(f64),
    Text(String),
    Formula(String),
}

impl CellValue {
    /// Value for text stored as typed: empty is `Empty`, a leading `=` makes
    /// a formula, anything else is kept verbatim as text.
    pub fn from_raw(input: &str) -> Self {
        if input.is_empty() {
            CellValue::Empty
        } else if is_formula(input) {
            CellValue::Formula(input.to_string())
        } else {
            CellValue::Text(input.to_string())
        }
    }

    /// Convert a JSON scalar into a stored value.
    ///
    /// Strings go through [`CellValue::from_raw`], so `"=A1"` becomes a formula
    /// and `"00123"` stays text.
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => CellValue::Empty,
            serde_json::Value::Bool(b) => CellValue::Bool(*b),
            serde_json::Value::Number(n) => n.as_f64().map(CellValue::Number).unwrap_or_default(),
            serde_json::Value::String(s) => CellValue::from_raw(s),
            other => CellValue::Text(other.to_string()),
        }
    }

    /// Text as the user would type it back in.
    pub fn raw_display(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Number(n) => format_number(*n),
            CellValue::Text(s) => s.clone(),
            CellValue::Formula(source) => source.clone(),
        }
    }

    pub fn is_formula(&self) -> bool {
        matches!(self, CellValue::Formula(_))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Truthiness used by checkbox and radio columns.
    pub fn is_truthy(&self) -> bool {
        match self {
            CellValue::Empty => false,
            CellValue::Bool(b) => *b,
            CellValue::Number(n) => *n != 0.0,
            CellValue::Text(s) => {
                let s = s.trim();
                !(s.is_empty() || s == "0" || s.eq_ignore_ascii_case("false"))
            }
            CellValue::Formula(_) => false,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            CellValue::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::from_raw(s)
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::from_raw(&s)
    }
}

/// A value is a formula when its first character is `=`.
pub fn is_formula(text: &str) -> bool {
    text.starts_with('=')
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_keeps_text_verbatim() {
        assert_eq!(CellValue::from_raw(""), CellValue::Empty);
        assert_eq!(CellValue::from_raw("00123"), CellValue::Text("00123".into()));
        assert_eq!(CellValue::from_raw(" padded "), CellValue::Text(" padded ".into()));
        assert_eq!(CellValue::from_raw("=A1+A2"), CellValue::Formula("=A1+A2".into()));
        assert_eq!(CellValue::from_raw(" =A1"), CellValue::Text(" =A1".into()));
    }

    #[test]
    fn test_raw_display() {
        assert_eq!(CellValue::Number(3.0).raw_display(), "3");
        assert_eq!(CellValue::Number(1234.5).raw_display(), "1234.5");
        assert_eq!(CellValue::Bool(true).raw_display(), "true");
        assert_eq!(CellValue::Empty.raw_display(), "");
    }

    #[test]
    fn test_truthiness() {
        assert!(CellValue::Bool(true).is_truthy());
        assert!(!CellValue::Bool(false).is_truthy());
        assert!(!CellValue::Empty.is_truthy());
        assert!(CellValue::Number(1.0).is_truthy());
        assert!(!CellValue::Text("false".into()).is_truthy());
        assert!(CellValue::Text("yes".into()).is_truthy());
    }

    #[test]
    fn test_from_json() {
        assert_eq!(CellValue::from_json(&serde_json::json!(null)), CellValue::Empty);
        assert_eq!(CellValue::from_json(&serde_json::json!(true)), CellValue::Bool(true));
        assert_eq!(CellValue::from_json(&serde_json::json!(2.5)), CellValue::Number(2.5));
        assert_eq!(CellValue::from_json(&serde_json::json!("=SUM(A1:A3)")), CellValue::Formula("=SUM(A1:A3)".into()));
        assert_eq!(CellValue::from_json(&serde_json::json!("01")), CellValue::Text("01".into()));
    }
}
