use std::path::{Path, PathBuf};

use crate::{
    data::{
        defaults, item::Coord, item::Value, layout::Layout, schema::Schema, store::Config,
        validate,
    },
    error::{IndexError, ResolutionError, SaveError, SchemaError},
    ini,
    strings::ProgramString,
};

/// What the front end should do when the user asks to close.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseAction {
    /// Nothing to save; close right away.
    Close,
    /// Ask whether to save, discard or stay.
    Confirm,
}

/// Editing session: configuration, layout and settings file, plus the
/// unsaved-changes state the front end renders.
#[derive(Debug, Clone)]
pub struct Editor {
    pub config: Config,
    pub layout: Layout,
    /// Settings file read at startup and written on save.
    pub ini_path: PathBuf,
    needs_save: bool,
    corrections: usize,
    launch_request: Option<String>,
}

impl Editor {
    /// Load the schema, then the settings file, then validate.
    ///
    /// When `ini_path` is `None` the settings file is the `PRG_Ini_name`
    /// string, next to the schema document.
    pub fn open(
        schema_path: impl AsRef<Path>,
        ini_path: Option<impl AsRef<Path>>,
    ) -> Result<Self, SchemaError> {
        let schema_path = schema_path.as_ref();
        let schema = Schema::load(schema_path)?;
        let ini_path = match ini_path {
            Some(p) => p.as_ref().to_path_buf(),
            None => default_ini_path(schema_path, &schema),
        };
        Ok(Self::with_schema(schema, ini_path))
    }

    pub fn with_schema(schema: Schema, ini_path: PathBuf) -> Self {
        let layout = Layout::build(&schema);
        let mut config = Config::new(schema);
        ini::load(&mut config, &ini_path);
        let corrections = validate::validate_all(&mut config);
        if corrections > 0 {
            warn!("{corrections} settings were out of range and reset to defaults");
        }

        Self {
            config,
            layout,
            ini_path,
            needs_save: false,
            corrections,
            launch_request: None,
        }
    }

    pub fn string(&self, id: ProgramString) -> String {
        id.resolve(self.config.schema().strings())
    }

    /// Window title, marked while there are unsaved changes.
    pub fn title(&self) -> String {
        let mut title = self.string(ProgramString::Title);
        if self.needs_save {
            title.push_str(&self.string(ProgramString::Unsaved));
        }
        title
    }

    pub fn is_dirty(&self) -> bool {
        self.needs_save
    }

    /// Values corrected by validation at startup.
    pub fn corrections(&self) -> usize {
        self.corrections
    }

    pub fn resolution_failures(&self) -> &[ResolutionError] {
        self.layout.failures()
    }

    /// Store a value coming from a control and mark the session dirty.
    pub fn apply_edit(&mut self, coord: Coord, value: Value) -> Result<(), IndexError> {
        let unchanged = self.config.option(coord)?.current == &value;
        self.config.set_current_value(coord, value)?;
        if !unchanged {
            self.needs_save = true;
        }
        Ok(())
    }

    pub fn reset_defaults(&mut self) {
        defaults::reset_all(&mut self.config);
        self.needs_save = true;
    }

    /// Write the settings file. On failure nothing in memory changes.
    pub fn save(&mut self) -> Result<(), SaveError> {
        ini::save(&self.config, &self.ini_path)?;
        self.needs_save = false;
        Ok(())
    }

    pub fn request_close(&self) -> CloseAction {
        if self.needs_save {
            CloseAction::Confirm
        } else {
            CloseAction::Close
        }
    }

    /// Save, and only if that succeeded remember `target` for launch once
    /// the front end has shut down.
    pub fn save_and_launch(&mut self, target: &str) -> Result<(), SaveError> {
        self.save()?;
        self.launch_request = Some(target.to_string());
        Ok(())
    }

    pub fn take_launch_request(&mut self) -> Option<String> {
        self.launch_request.take()
    }
}

/// Settings file named by the schema's `PRG_Ini_name`, beside the schema.
pub fn default_ini_path(schema_path: &Path, schema: &Schema) -> PathBuf {
    let name = ProgramString::IniName.resolve(schema.strings());
    match schema_path.parent() {
        Some(parent) => parent.join(name),
        None => PathBuf::from(name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{SCENARIO_JSON, scenario_schema};
    use std::fs;

    fn editor_in(dir: &Path) -> Editor {
        Editor::with_schema(scenario_schema(), dir.join("settings.ini"))
    }

    #[test]
    fn test_default_ini_path() {
        let schema = scenario_schema();
        assert_eq!(
            default_ini_path(Path::new("conf/tool.json"), &schema),
            PathBuf::from("conf/game.ini")
        );
        assert_eq!(
            default_ini_path(Path::new("tool.json"), &schema),
            PathBuf::from("game.ini")
        );
    }

    #[test]
    fn test_open() {
        let dir = tempfile::tempdir().unwrap();
        let schema = dir.path().join("tool.json");
        fs::write(&schema, SCENARIO_JSON).unwrap();
        fs::write(dir.path().join("game.ini"), "[Video]\nResolution=5\nVsync=1\n").unwrap();

        let editor = Editor::open(&schema, None::<&Path>).unwrap();
        assert_eq!(editor.ini_path, dir.path().join("game.ini"));
        assert_eq!(editor.corrections(), 1);
        assert_eq!(editor.resolution_failures().len(), 1);
        assert_eq!(
            editor.config.option(Coord::new(0, 0)).unwrap().current,
            &Value::Int(1)
        );
        assert!(!editor.is_dirty());

        assert!(Editor::open(dir.path().join("none.json"), None::<&Path>).is_err());
    }

    #[test]
    fn test_dirty_tracking_and_title() {
        let dir = tempfile::tempdir().unwrap();
        let mut editor = editor_in(dir.path());
        assert_eq!(editor.title(), "Test Tool");
        assert_eq!(editor.request_close(), CloseAction::Close);

        // same value: still clean
        editor.apply_edit(Coord::new(0, 0), Value::Int(0)).unwrap();
        assert!(!editor.is_dirty());

        editor.apply_edit(Coord::new(0, 0), Value::Int(1)).unwrap();
        assert!(editor.is_dirty());
        assert_eq!(editor.title(), "Test Tool [unsaved changes]");
        assert_eq!(editor.request_close(), CloseAction::Confirm);

        editor.save().unwrap();
        assert!(!editor.is_dirty());
        assert_eq!(editor.title(), "Test Tool");
        assert!(
            fs::read_to_string(&editor.ini_path)
                .unwrap()
                .contains("Vsync=1\n")
        );
    }

    #[test]
    fn test_reset_marks_dirty() {
        let dir = tempfile::tempdir().unwrap();
        let mut editor = editor_in(dir.path());
        editor.reset_defaults();
        assert!(editor.is_dirty());
        assert!(editor.config.options().all(|o| o.is_default()));
    }

    #[test]
    fn test_failed_save_keeps_state() {
        let dir = tempfile::tempdir().unwrap();
        let mut editor = Editor::with_schema(scenario_schema(), dir.path().join("x/y.ini"));
        editor.apply_edit(Coord::new(0, 0), Value::Int(1)).unwrap();

        assert!(editor.save().is_err());
        assert!(editor.is_dirty());
        assert_eq!(
            editor.config.option(Coord::new(0, 0)).unwrap().current,
            &Value::Int(1)
        );

        // no launch without a successful save
        assert!(editor.save_and_launch("game.exe").is_err());
        assert_eq!(editor.take_launch_request(), None);
    }

    #[test]
    fn test_save_and_launch() {
        let dir = tempfile::tempdir().unwrap();
        let mut editor = editor_in(dir.path());
        editor.save_and_launch("game.exe").unwrap();
        assert!(editor.ini_path.exists());
        assert_eq!(editor.take_launch_request().as_deref(), Some("game.exe"));
        assert_eq!(editor.take_launch_request(), None);
    }

    #[test]
    fn test_bad_edit_coordinate() {
        let dir = tempfile::tempdir().unwrap();
        let mut editor = editor_in(dir.path());
        assert!(editor.apply_edit(Coord::new(5, 5), Value::Int(1)).is_err());
        assert!(!editor.is_dirty());
    }
}
