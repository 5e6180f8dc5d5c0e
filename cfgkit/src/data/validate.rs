use crate::data::{item::Coord, store::Config};

/// Coerce every out-of-range value back to its default.
///
/// Boolean values must be 0 or 1 and enumerated values must index the label
/// list; other kinds declare no range. Returns the number of corrections.
pub fn validate_all(config: &mut Config) -> usize {
    let invalid: Vec<Coord> = config
        .options()
        .filter(|o| !o.def.accepts(o.current))
        .map(|o| {
            warn!(
                "[{}] {}={} is out of range for {}, reset to {}",
                config.schema().sections()[o.coord.section].name,
                o.name(),
                o.current,
                o.kind().tag(),
                o.default()
            );
            o.coord
        })
        .collect();

    for &coord in &invalid {
        if let Ok(def) = config.schema().option(coord) {
            let default = def.default.clone();
            // coordinates came from the schema itself
            let _ = config.set_current_value(coord, default);
        }
    }

    invalid.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{data::item::Value, test_support::scenario_config};

    #[test]
    fn test_defaults_are_valid() {
        let mut cfg = scenario_config();
        assert_eq!(validate_all(&mut cfg), 0);
    }

    #[test]
    fn test_corrects_boolean_and_list() {
        let mut cfg = scenario_config();
        cfg.set_current_value(Coord::new(0, 0), Value::Int(7)).unwrap();
        cfg.set_current_value(Coord::new(0, 1), Value::Int(5)).unwrap();
        cfg.set_current_value(Coord::new(1, 0), Value::Text("hard".into()))
            .unwrap();

        assert_eq!(validate_all(&mut cfg), 3);
        assert_eq!(cfg.option(Coord::new(0, 0)).unwrap().current, &Value::Int(0));
        assert_eq!(cfg.option(Coord::new(0, 1)).unwrap().current, &Value::Int(1));
        assert_eq!(cfg.option(Coord::new(1, 0)).unwrap().current, &Value::Int(1));
    }

    #[test]
    fn test_unbounded_kinds_untouched() {
        let mut cfg = scenario_config();
        cfg.set_current_value(Coord::new(1, 1), Value::Int(99)).unwrap();
        cfg.set_current_value(Coord::new(1, 2), Value::Int(-12345)).unwrap();
        assert_eq!(validate_all(&mut cfg), 0);
        assert_eq!(cfg.option(Coord::new(1, 2)).unwrap().current, &Value::Int(-12345));
    }

    #[test]
    fn test_idempotent() {
        let mut cfg = scenario_config();
        cfg.set_current_value(Coord::new(0, 1), Value::Int(-1)).unwrap();
        assert_eq!(validate_all(&mut cfg), 1);
        assert_eq!(validate_all(&mut cfg), 0);
    }
}
