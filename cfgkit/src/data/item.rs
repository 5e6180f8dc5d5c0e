use std::fmt;

/// Address of one option: section index and option index within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub section: usize,
    pub option: usize,
}

impl Coord {
    pub const fn new(section: usize, option: usize) -> Self {
        Self { section, option }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.section, self.option)
    }
}

/// Current or default value of an option.
///
/// Boolean, enumerated and numeric options hold integers (an enumerated
/// option holds the selected label index). Free-text and unknown options
/// hold the raw text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    Int(i64),
    Text(String),
}

impl Value {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            Value::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Int(_) => None,
            Value::Text(s) => Some(s),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(i) => write!(f, "{i}"),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Int(b as i64)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

/// Declared type of an option. Only enumerated options carry extra data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionKind {
    /// On/off switch stored as 0 or 1.
    Boolean,
    /// Choice among labels, stored as the label index.
    Enumerated { labels: Vec<String> },
    /// Integer without declared bounds (controller pads and the like).
    Numeric,
    /// Raw text.
    FreeText,
    /// Type tag missing or not understood.
    Unknown,
}

impl OptionKind {
    /// Map a document type tag to a kind; unrecognised tags give `None`.
    pub fn from_tag(tag: &str, labels: Vec<String>) -> Option<Self> {
        let kind = match tag.to_ascii_lowercase().as_str() {
            "check" | "bool" | "boolean" => OptionKind::Boolean,
            "list" | "enum" => OptionKind::Enumerated { labels },
            "pad" | "number" | "numeric" => OptionKind::Numeric,
            "text" | "string" => OptionKind::FreeText,
            _ => return None,
        };
        Some(kind)
    }

    /// Whether values of this kind are integer encoded.
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            OptionKind::Boolean | OptionKind::Enumerated { .. } | OptionKind::Numeric
        )
    }

    /// Label list of an enumerated option.
    pub fn labels(&self) -> &[String] {
        match self {
            OptionKind::Enumerated { labels } => labels,
            _ => &[],
        }
    }

    /// Whether `value` lies within the declared range.
    ///
    /// Numeric, free-text and unknown options declare no range and accept
    /// anything.
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            OptionKind::Boolean => matches!(value, Value::Int(0 | 1)),
            OptionKind::Enumerated { labels } => match value {
                Value::Int(i) => usize::try_from(*i).is_ok_and(|i| i < labels.len()),
                Value::Text(_) => false,
            },
            OptionKind::Numeric | OptionKind::FreeText | OptionKind::Unknown => true,
        }
    }

    /// Decode a settings-file value for this kind.
    ///
    /// Returns `None` when an integer kind receives something that is not a
    /// decimal integer.
    pub fn parse_value(&self, raw: &str) -> Option<Value> {
        if self.is_integer() {
            raw.trim().parse::<i64>().ok().map(Value::Int)
        } else {
            Some(Value::Text(raw.to_string()))
        }
    }

    /// Short tag used in logs and listings.
    pub fn tag(&self) -> &'static str {
        match self {
            OptionKind::Boolean => "check",
            OptionKind::Enumerated { .. } => "list",
            OptionKind::Numeric => "pad",
            OptionKind::FreeText => "text",
            OptionKind::Unknown => "unknown",
        }
    }
}

/// Schema definition of one option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionDef {
    /// Symbolic name, also the key in the settings file.
    pub name: String,
    /// String key of the display name.
    pub label: Option<String>,
    /// String key of the description.
    pub desc: Option<String>,
    pub kind: OptionKind,
    pub default: Value,
}

impl OptionDef {
    /// Whether `value` is acceptable as this option's current value.
    pub fn accepts(&self, value: &Value) -> bool {
        self.kind.accepts(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(n: usize) -> OptionKind {
        OptionKind::Enumerated {
            labels: (0..n).map(|i| format!("v{i}")).collect(),
        }
    }

    #[test]
    fn test_tags() {
        assert_eq!(OptionKind::from_tag("CHECK", vec![]), Some(OptionKind::Boolean));
        assert_eq!(OptionKind::from_tag("pad", vec![]), Some(OptionKind::Numeric));
        assert_eq!(OptionKind::from_tag("text", vec![]), Some(OptionKind::FreeText));
        assert_eq!(OptionKind::from_tag("slider", vec![]), None);
        assert_eq!(
            OptionKind::from_tag("list", vec!["a".into()]),
            Some(OptionKind::Enumerated {
                labels: vec!["a".into()]
            })
        );
    }

    #[test]
    fn test_accepts() {
        assert!(OptionKind::Boolean.accepts(&Value::Int(0)));
        assert!(OptionKind::Boolean.accepts(&Value::Int(1)));
        assert!(!OptionKind::Boolean.accepts(&Value::Int(2)));
        assert!(!OptionKind::Boolean.accepts(&Value::Text("1".into())));

        assert!(list(2).accepts(&Value::Int(1)));
        assert!(!list(2).accepts(&Value::Int(2)));
        assert!(!list(2).accepts(&Value::Int(-1)));

        assert!(OptionKind::Numeric.accepts(&Value::Int(-40_000)));
        assert!(OptionKind::FreeText.accepts(&Value::Int(3)));
        assert!(OptionKind::Unknown.accepts(&Value::Text(String::new())));
    }

    #[test]
    fn test_parse_value() {
        assert_eq!(OptionKind::Boolean.parse_value(" 1 "), Some(Value::Int(1)));
        assert_eq!(list(3).parse_value("-7"), Some(Value::Int(-7)));
        assert_eq!(OptionKind::Numeric.parse_value("abc"), None);
        assert_eq!(
            OptionKind::FreeText.parse_value("C:\\games"),
            Some(Value::Text("C:\\games".into()))
        );
    }
}
