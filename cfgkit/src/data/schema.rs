use std::{collections::BTreeMap, fs, path::Path};

use serde::Deserialize;

use crate::{
    data::item::{Coord, OptionDef, OptionKind, Value},
    error::{IndexError, ResolutionError, SchemaError},
    strings::StringTable,
};

/// Named, ordered collection of options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub name: String,
    pub options: Vec<OptionDef>,
}

/// Reference from the layout to an option, by symbolic names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct OptionRef {
    pub section: String,
    pub option: String,
}

/// Second level of the layout: a titled box of options.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Subgroup {
    /// String key of the box title.
    pub name: String,
    #[serde(default)]
    pub options: Vec<OptionRef>,
}

/// First level of the layout: one tab.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Group {
    /// String key of the tab title.
    pub name: String,
    #[serde(default)]
    pub subgroups: Vec<Subgroup>,
}

#[derive(Deserialize)]
struct Document {
    #[serde(default)]
    strings: BTreeMap<String, String>,
    sections: Vec<SectionDoc>,
    #[serde(default)]
    groups: Vec<Group>,
}

#[derive(Deserialize)]
struct SectionDoc {
    name: String,
    #[serde(default)]
    options: Vec<serde_json::Value>,
}

#[derive(Deserialize)]
struct OptionDoc {
    name: String,
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    values: Vec<String>,
    #[serde(default)]
    default: Option<serde_json::Value>,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    desc: Option<String>,
}

/// Option definitions, layout declaration and string table of one
/// schema document.
///
/// Section and option indices follow document order and never change after
/// load; they are the basis of every [`Coord`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    sections: Vec<Section>,
    groups: Vec<Group>,
    strings: StringTable,
}

impl Schema {
    /// Load a schema document, choosing JSON or TOML by file extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| SchemaError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        match path.extension().and_then(|s| s.to_str()).unwrap_or("") {
            "json" => Self::from_json_str(&content),
            "toml" => Self::from_toml_str(&content),
            ext => Err(SchemaError::UnsupportedFormat(ext.to_string())),
        }
    }

    pub fn from_json_str(s: &str) -> Result<Self, SchemaError> {
        let value: serde_json::Value = serde_json::from_str(s)?;
        Self::try_from(&value)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, SchemaError> {
        let value: toml::Value = toml::from_str(s)?;
        let json = serde_json::to_value(value)?;
        Self::try_from(&json)
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Number of options in a section.
    pub fn option_count(&self, section: usize) -> Result<usize, IndexError> {
        self.sections
            .get(section)
            .map(|s| s.options.len())
            .ok_or(IndexError { section, option: 0 })
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }

    /// Definition of the option at `coord`.
    pub fn option(&self, coord: Coord) -> Result<&OptionDef, IndexError> {
        self.sections
            .get(coord.section)
            .and_then(|s| s.options.get(coord.option))
            .ok_or(IndexError {
                section: coord.section,
                option: coord.option,
            })
    }

    /// Every coordinate, in section order then option order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        self.sections.iter().enumerate().flat_map(|(s, section)| {
            (0..section.options.len()).map(move |o| Coord::new(s, o))
        })
    }

    pub fn find_section(&self, name: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.name == name)
    }

    pub fn find_option(&self, section: usize, name: &str) -> Option<usize> {
        self.sections
            .get(section)?
            .options
            .iter()
            .position(|o| o.name == name)
    }

    /// Map symbolic section and option names to a coordinate.
    pub fn resolve(&self, section: &str, option: &str) -> Result<Coord, ResolutionError> {
        let s = self
            .find_section(section)
            .ok_or_else(|| ResolutionError::UnknownSection {
                section: section.to_string(),
            })?;
        let o = self
            .find_option(s, option)
            .ok_or_else(|| ResolutionError::UnknownOption {
                section: section.to_string(),
                option: option.to_string(),
            })?;
        Ok(Coord::new(s, o))
    }

    /// Declared layout groups, unresolved.
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn strings(&self) -> &StringTable {
        &self.strings
    }
}

impl TryFrom<&serde_json::Value> for Schema {
    type Error = SchemaError;

    fn try_from(value: &serde_json::Value) -> Result<Self, Self::Error> {
        let doc = Document::deserialize(value)?;

        let mut sections: Vec<Section> = Vec::with_capacity(doc.sections.len());
        for section in doc.sections {
            check_section_name(&section.name)?;
            // the settings file matches names ignoring ASCII case
            if let Some(first) = sections
                .iter()
                .position(|s| s.name.eq_ignore_ascii_case(&section.name))
            {
                return Err(SchemaError::DuplicateSection {
                    name: section.name,
                    first,
                });
            }

            let mut options: Vec<OptionDef> = Vec::with_capacity(section.options.len());
            for raw in &section.options {
                let Some(option) = parse_option(&section.name, raw) else {
                    continue;
                };
                if options
                    .iter()
                    .any(|o| o.name.eq_ignore_ascii_case(&option.name))
                {
                    warn!(
                        "[{}] duplicate option {:?} ignored, first declaration kept",
                        section.name, option.name
                    );
                    continue;
                }
                options.push(option);
            }

            sections.push(Section {
                name: section.name,
                options,
            });
        }

        Ok(Schema {
            sections,
            groups: doc.groups,
            strings: StringTable::from(doc.strings),
        })
    }
}

fn check_section_name(name: &str) -> Result<(), SchemaError> {
    let reason = if name.is_empty() {
        "empty name"
    } else if name.trim() != name {
        "leading or trailing whitespace"
    } else if name.contains([']', '\r', '\n']) {
        "contains `]` or a line break"
    } else {
        return Ok(());
    };
    Err(SchemaError::InvalidSectionName {
        name: name.to_string(),
        reason,
    })
}

fn option_name_problem(name: &str) -> Option<&'static str> {
    if name.is_empty() {
        Some("empty name")
    } else if name.trim() != name {
        Some("leading or trailing whitespace")
    } else if name.contains(['=', '\r', '\n']) {
        Some("contains `=` or a line break")
    } else if name.starts_with(['[', ';', '#']) {
        Some("starts with `[`, `;` or `#`")
    } else {
        None
    }
}

/// Build one option definition. Anything short of a usable name degrades
/// instead of failing: a bad type becomes `Unknown`, a bad default becomes
/// the type's zero value.
fn parse_option(section: &str, raw: &serde_json::Value) -> Option<OptionDef> {
    let doc = match OptionDoc::deserialize(raw) {
        Ok(doc) => doc,
        Err(e) => {
            let Some(name) = raw.get("name").and_then(|n| n.as_str()) else {
                warn!("[{section}] option without a name skipped: {e}");
                return None;
            };
            warn!("[{section}] option {name:?} is malformed ({e}), treated as unknown");
            OptionDoc {
                name: name.to_string(),
                kind: None,
                values: Vec::new(),
                default: None,
                label: raw.get("label").and_then(|v| v.as_str()).map(String::from),
                desc: raw.get("desc").and_then(|v| v.as_str()).map(String::from),
            }
        }
    };

    if let Some(reason) = option_name_problem(&doc.name) {
        warn!("[{section}] option {:?} skipped: {reason}", doc.name);
        return None;
    }

    let mut kind = match doc.kind.as_deref() {
        Some(tag) => OptionKind::from_tag(tag, doc.values).unwrap_or_else(|| {
            warn!("[{section}] {}: unknown type {tag:?}", doc.name);
            OptionKind::Unknown
        }),
        None => {
            warn!("[{section}] {}: no type declared", doc.name);
            OptionKind::Unknown
        }
    };

    if matches!(&kind, OptionKind::Enumerated { labels } if labels.is_empty()) {
        warn!("[{section}] {}: list without values, treated as unknown", doc.name);
        kind = OptionKind::Unknown;
    }

    let mut default = decode_default(&kind, doc.default.as_ref()).unwrap_or_else(|| {
        warn!("[{section}] {}: unusable default, using zero value", doc.name);
        zero_value(&kind)
    });

    if !kind.accepts(&default) {
        warn!(
            "[{section}] {}: default {default} out of range for {}, using 0",
            doc.name,
            kind.tag()
        );
        default = Value::Int(0);
    }

    Some(OptionDef {
        name: doc.name,
        label: doc.label,
        desc: doc.desc,
        kind,
        default,
    })
}

fn zero_value(kind: &OptionKind) -> Value {
    if kind.is_integer() {
        Value::Int(0)
    } else {
        Value::Text(String::new())
    }
}

fn decode_default(kind: &OptionKind, raw: Option<&serde_json::Value>) -> Option<Value> {
    use serde_json::Value as J;

    let Some(raw) = raw else {
        return Some(zero_value(kind));
    };

    if kind.is_integer() {
        match raw {
            J::Number(n) => n.as_i64().map(Value::Int),
            J::Bool(b) => Some(Value::from(*b)),
            J::String(s) => kind.parse_value(s),
            _ => None,
        }
    } else {
        match raw {
            J::String(s) => Some(Value::Text(s.clone())),
            J::Number(n) => Some(Value::Text(n.to_string())),
            J::Bool(b) => Some(Value::Text((*b as i64).to_string())),
            J::Null => Some(Value::Text(String::new())),
            _ => None,
        }
    }
}
