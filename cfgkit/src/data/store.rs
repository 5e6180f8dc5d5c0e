use std::path::Path;

use crate::{
    data::{
        item::{Coord, OptionDef, OptionKind, Value},
        schema::Schema,
    },
    error::{IndexError, SchemaError},
};

/// Current value of every option, indexed like the schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueStore {
    values: Vec<Vec<Value>>,
}

impl ValueStore {
    /// A store holding each option's declared default.
    pub fn from_defaults(schema: &Schema) -> Self {
        let values = schema
            .sections()
            .iter()
            .map(|s| s.options.iter().map(|o| o.default.clone()).collect())
            .collect();
        Self { values }
    }

    pub fn get(&self, coord: Coord) -> Option<&Value> {
        self.values.get(coord.section)?.get(coord.option)
    }

    /// Replace one value. Range checks are the validator's job; only the
    /// coordinate is checked here.
    pub fn apply_edit(&mut self, coord: Coord, value: Value) -> Result<(), IndexError> {
        let slot = self
            .values
            .get_mut(coord.section)
            .and_then(|s| s.get_mut(coord.option))
            .ok_or(IndexError {
                section: coord.section,
                option: coord.option,
            })?;
        *slot = value;
        Ok(())
    }
}

/// Read view of one option: its definition plus current value.
#[derive(Debug, Clone, Copy)]
pub struct OptionView<'a> {
    pub coord: Coord,
    pub def: &'a OptionDef,
    pub current: &'a Value,
}

impl OptionView<'_> {
    pub fn name(&self) -> &str {
        &self.def.name
    }

    pub fn kind(&self) -> &OptionKind {
        &self.def.kind
    }

    pub fn default(&self) -> &Value {
        &self.def.default
    }

    pub fn labels(&self) -> &[String] {
        self.def.kind.labels()
    }

    /// Whether the current value equals the default.
    pub fn is_default(&self) -> bool {
        self.current == &self.def.default
    }
}

/// A loaded schema together with the current values.
///
/// The schema is read-only after load; only values change during a session.
#[derive(Debug, Clone)]
pub struct Config {
    schema: Schema,
    values: ValueStore,
}

impl Config {
    /// Wrap a schema, starting from its declared defaults.
    pub fn new(schema: Schema) -> Self {
        let values = ValueStore::from_defaults(&schema);
        Self { schema, values }
    }

    pub fn load(schema_path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        Ok(Self::new(Schema::load(schema_path)?))
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn values(&self) -> &ValueStore {
        &self.values
    }

    pub fn section_count(&self) -> usize {
        self.schema.section_count()
    }

    pub fn option_count(&self, section: usize) -> Result<usize, IndexError> {
        self.schema.option_count(section)
    }

    pub fn option(&self, coord: Coord) -> Result<OptionView<'_>, IndexError> {
        let def = self.schema.option(coord)?;
        let current = self.values.get(coord).ok_or(IndexError {
            section: coord.section,
            option: coord.option,
        })?;
        Ok(OptionView {
            coord,
            def,
            current,
        })
    }

    /// Every option in section order then option order.
    pub fn options(&self) -> impl Iterator<Item = OptionView<'_>> + '_ {
        self.schema.coords().filter_map(move |c| self.option(c).ok())
    }

    pub fn set_current_value(&mut self, coord: Coord, value: Value) -> Result<(), IndexError> {
        self.values.apply_edit(coord, value)
    }
}
