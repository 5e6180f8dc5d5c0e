//! Flat settings file.
//!
//! ```ini
//! [Video]
//! Vsync=0
//! Resolution=1
//! ```
//!
//! One header per schema section and one `name=value` line per option, both
//! in schema order. Boolean, enumerated and numeric values are decimal
//! integers, free text is written verbatim. Section and key lookup on load is
//! ASCII case-insensitive; lines starting with `;` or `#` are comments.

use std::{
    fs,
    io::{self, Write},
    path::Path,
};

use tempfile::NamedTempFile;

use crate::{
    data::{item::Coord, store::Config},
    error::SaveError,
};

/// Parsed settings file: sections in file order, keys in file order.
#[derive(Debug, Default)]
struct IniFile {
    sections: Vec<(String, Vec<(String, String)>)>,
}

impl IniFile {
    fn parse(text: &str) -> Self {
        let mut sections: Vec<(String, Vec<(String, String)>)> = Vec::new();

        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with([';', '#']) {
                continue;
            }

            if let Some(rest) = line.strip_prefix('[') {
                let name = rest.rsplit_once(']').map_or(rest, |(name, _)| name);
                sections.push((name.trim().to_string(), Vec::new()));
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                debug!("ignoring ini line without `=`: {line:?}");
                continue;
            };
            match sections.last_mut() {
                Some((_, keys)) => keys.push((key.trim().to_string(), value.trim().to_string())),
                None => debug!("ignoring ini line outside any section: {line:?}"),
            }
        }

        Self { sections }
    }

    /// First matching value, the way duplicate sections and keys resolve.
    fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .iter()
            .filter(|(name, _)| name.eq_ignore_ascii_case(section))
            .flat_map(|(_, keys)| keys)
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}

/// Overwrite current values from ini text. Keys that are absent leave the
/// current value untouched; integer keys that do not parse are skipped with
/// a warning. Returns the number of values applied.
pub fn apply_str(config: &mut Config, text: &str) -> usize {
    let file = IniFile::parse(text);
    let mut updates = Vec::new();

    for (s, section) in config.schema().sections().iter().enumerate() {
        for (o, option) in section.options.iter().enumerate() {
            let Some(raw) = file.get(&section.name, &option.name) else {
                continue;
            };
            match option.kind.parse_value(raw) {
                Some(value) => updates.push((Coord::new(s, o), value)),
                None => warn!(
                    "[{}] {}={raw:?} is not a number, keeping current value",
                    section.name, option.name
                ),
            }
        }
    }

    let applied = updates.len();
    for (coord, value) in updates {
        // coordinates came from the schema itself
        let _ = config.set_current_value(coord, value);
    }
    applied
}

/// Load current values from the settings file at `path`.
///
/// A missing or unreadable file is the first-run case: values stay as they
/// are and `0` is returned.
pub fn load(config: &mut Config, path: impl AsRef<Path>) -> usize {
    let path = path.as_ref();
    match fs::read_to_string(path) {
        Ok(text) => {
            let applied = apply_str(config, &text);
            debug!("loaded {applied} values from {}", path.display());
            applied
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("{} not found, using defaults", path.display());
            0
        }
        Err(e) => {
            warn!("cannot read {}: {e}, using defaults", path.display());
            0
        }
    }
}

/// Render the settings file for the current values.
///
/// Fails when a free-text value cannot survive a save/load cycle: line
/// breaks end the line, and surrounding whitespace is trimmed on load.
pub fn to_string(config: &Config) -> Result<String, SaveError> {
    let mut out = String::new();

    for (s, section) in config.schema().sections().iter().enumerate() {
        if s > 0 {
            out.push('\n');
        }
        out.push('[');
        out.push_str(&section.name);
        out.push_str("]\n");

        for o in 0..section.options.len() {
            let Ok(view) = config.option(Coord::new(s, o)) else {
                continue;
            };
            let value = view.current.to_string();
            if let Some(reason) = unrepresentable(&value) {
                return Err(SaveError::Unrepresentable {
                    section: section.name.clone(),
                    option: view.name().to_string(),
                    reason,
                });
            }
            out.push_str(view.name());
            out.push('=');
            out.push_str(&value);
            out.push('\n');
        }
    }

    Ok(out)
}

/// Flush the directory entry so the rename itself survives a crash.
#[cfg(unix)]
fn sync_dir(dir: &Path) -> io::Result<()> {
    fs::File::open(dir)?.sync_all()
}

#[cfg(not(unix))]
fn sync_dir(_dir: &Path) -> io::Result<()> {
    Ok(())
}

fn unrepresentable(value: &str) -> Option<&'static str> {
    if value.contains(['\r', '\n']) {
        Some("contains a line break")
    } else if value.trim() != value {
        Some("has leading or trailing whitespace")
    } else {
        None
    }
}

/// Write the settings file.
///
/// The content goes to a temporary file in the same directory, is flushed
/// to disk and then renamed over `path`, so a failure never leaves a
/// truncated file behind.
pub fn save(config: &Config, path: impl AsRef<Path>) -> Result<(), SaveError> {
    let path = path.as_ref();
    let content = to_string(config)?;
    let io_err = |source: io::Error| SaveError::Io {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(io_err)?;
    tmp.write_all(content.as_bytes()).map_err(io_err)?;
    tmp.as_file().sync_all().map_err(io_err)?;
    tmp.persist(path).map_err(|e| io_err(e.error))?;
    if let Err(e) = sync_dir(dir) {
        warn!("cannot sync {}: {e}", dir.display());
    }

    info!("settings saved to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        data::{defaults::reset_all, item::Value, validate::validate_all},
        test_support::scenario_config,
    };

    #[test]
    fn test_layout_of_output() {
        let cfg = scenario_config();
        assert_eq!(
            to_string(&cfg).unwrap(),
            "[Video]\nVsync=0\nResolution=1\n\n[Game]\nDifficulty=1\nName=Player\nPad=0\n"
        );
    }

    #[test]
    fn test_missing_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = scenario_config();
        assert_eq!(load(&mut cfg, dir.path().join("nope.ini")), 0);
        assert!(cfg.options().all(|o| o.is_default()));
        assert_eq!(validate_all(&mut cfg), 0);
        assert_eq!(cfg.option(Coord::new(0, 0)).unwrap().current, &Value::Int(0));
        assert_eq!(cfg.option(Coord::new(0, 1)).unwrap().current, &Value::Int(1));
    }

    #[test]
    fn test_out_of_range_value_is_corrected() {
        let mut cfg = scenario_config();
        assert_eq!(apply_str(&mut cfg, "[Video]\nResolution=5\n"), 1);
        assert_eq!(cfg.option(Coord::new(0, 1)).unwrap().current, &Value::Int(5));
        assert_eq!(validate_all(&mut cfg), 1);
        assert_eq!(cfg.option(Coord::new(0, 1)).unwrap().current, &Value::Int(1));
    }

    #[test]
    fn test_parsing_rules() {
        let mut cfg = scenario_config();
        let text = "\
            ; comment\n\
            orphan=1\n\
            [video]\n\
            VSYNC = 1\n\
            Resolution=abc\n\
            Unknown=3\n\
            [Game]\n\
            Name =  Jane Doe  \n\
            Pad=-3\n\
            [Game]\n\
            Name=Shadowed\n";
        assert_eq!(apply_str(&mut cfg, text), 3);
        assert_eq!(cfg.option(Coord::new(0, 0)).unwrap().current, &Value::Int(1));
        // unparseable integer keeps the previous value
        assert_eq!(cfg.option(Coord::new(0, 1)).unwrap().current, &Value::Int(1));
        assert_eq!(
            cfg.option(Coord::new(1, 1)).unwrap().current,
            &Value::Text("Jane Doe".into())
        );
        assert_eq!(cfg.option(Coord::new(1, 2)).unwrap().current, &Value::Int(-3));
    }

    #[test]
    fn test_byte_order_mark_is_ignored() {
        let mut cfg = scenario_config();
        assert_eq!(apply_str(&mut cfg, "\u{feff}[Video]\r\nVsync=1\r\n"), 1);
        assert_eq!(cfg.option(Coord::new(0, 0)).unwrap().current, &Value::Int(1));
    }

    #[test]
    fn test_sync_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(sync_dir(dir.path()).is_ok());
        #[cfg(unix)]
        assert!(sync_dir(&dir.path().join("missing")).is_err());
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.ini");

        let mut cfg = scenario_config();
        cfg.set_current_value(Coord::new(0, 0), Value::Int(1)).unwrap();
        cfg.set_current_value(Coord::new(1, 0), Value::Int(2)).unwrap();
        cfg.set_current_value(Coord::new(1, 1), Value::Text("a=b [c] ;d".into()))
            .unwrap();
        cfg.set_current_value(Coord::new(1, 2), Value::Int(17)).unwrap();
        save(&cfg, &path).unwrap();

        let mut fresh = scenario_config();
        load(&mut fresh, &path);
        assert_eq!(fresh.values(), cfg.values());
    }

    #[test]
    fn test_defaults_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.ini");

        let mut cfg = scenario_config();
        cfg.set_current_value(Coord::new(0, 1), Value::Int(0)).unwrap();
        reset_all(&mut cfg);
        save(&cfg, &path).unwrap();

        let mut fresh = scenario_config();
        fresh
            .set_current_value(Coord::new(0, 0), Value::Int(1))
            .unwrap();
        load(&mut fresh, &path);
        assert!(fresh.options().all(|o| o.is_default()));
    }

    #[test]
    fn test_reserved_text_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.ini");
        fs::write(&path, "[Video]\nVsync=1\n").unwrap();

        for bad in ["two\nlines", "cr\r", " padded"] {
            let mut cfg = scenario_config();
            cfg.set_current_value(Coord::new(1, 1), Value::Text(bad.into()))
                .unwrap();
            let err = save(&cfg, &path).unwrap_err();
            assert!(matches!(err, SaveError::Unrepresentable { ref option, .. } if option == "Name"));
        }

        // the destination is untouched
        assert_eq!(fs::read_to_string(&path).unwrap(), "[Video]\nVsync=1\n");
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no/such/dir/settings.ini");
        let err = save(&scenario_config(), &path).unwrap_err();
        assert!(matches!(err, SaveError::Io { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn test_save_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.ini");
        fs::write(&path, "garbage that is longer than the new content ".repeat(20)).unwrap();

        save(&scenario_config(), &path).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            to_string(&scenario_config()).unwrap()
        );
        // no temporary files left next to it
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
