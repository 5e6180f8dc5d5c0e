use crate::{
    data::{item::Coord, store::Config},
    error::IndexError,
};

/// Copy every option's declared default into its current value.
pub fn reset_all(config: &mut Config) {
    let coords: Vec<Coord> = config.schema().coords().collect();
    for coord in coords {
        // coordinates came from the schema itself
        let _ = reset_one(config, coord);
    }
    debug!("all options reset to defaults");
}

/// Reset only the given options, e.g. the ones shown on one tab.
///
/// Stops at the first coordinate outside the schema.
pub fn reset(
    config: &mut Config,
    coords: impl IntoIterator<Item = Coord>,
) -> Result<(), IndexError> {
    for coord in coords {
        reset_one(config, coord)?;
    }
    Ok(())
}

fn reset_one(config: &mut Config, coord: Coord) -> Result<(), IndexError> {
    let default = config.schema().option(coord)?.default.clone();
    config.set_current_value(coord, default)
}
