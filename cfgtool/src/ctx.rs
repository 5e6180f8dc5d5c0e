//! Application context.
//!
//! [`AppContext`] holds the paths and launch preferences resolved from the
//! command line and opens the editing session from them.

use std::path::PathBuf;

use anyhow::Context;
use cfgkit::{data::Editor, launch, strings::ProgramString};

/// Path configuration grouping all path-related fields.
#[derive(Default, Clone, Debug)]
pub struct PathConfig {
    /// Schema document.
    pub schema: PathBuf,
    /// Settings file; derived from the schema's `PRG_Ini_name` when unset.
    pub ini: Option<PathBuf>,
    /// Directory searched for launch targets; the schema's directory when unset.
    pub launch_dir: Option<PathBuf>,
}

impl PathConfig {
    /// Directory searched for launch targets.
    pub fn launch_dir(&self) -> PathBuf {
        self.launch_dir.clone().unwrap_or_else(|| {
            match self.schema.parent() {
                Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
                _ => PathBuf::from("."),
            }
        })
    }
}

/// The main application context holding all state.
#[derive(Default, Clone, Debug)]
pub struct AppContext {
    pub paths: PathConfig,
    /// Extension of launch targets, without the dot.
    pub extension: String,
    /// Launch target to preselect, overriding the schema's `PRG_Launch_exe`.
    pub preferred: Option<String>,
}

impl AppContext {
    /// Load the schema and settings into an editing session.
    ///
    /// # Errors
    ///
    /// Fails when the schema document is missing or cannot be parsed.
    pub fn open_editor(&self) -> anyhow::Result<Editor> {
        Editor::open(&self.paths.schema, self.paths.ini.as_ref()).with_context(|| {
            format!(
                "Could not initialize config from {}",
                self.paths.schema.display()
            )
        })
    }

    /// Launch candidates, excluding this tool's own executable.
    pub fn launch_targets(&self) -> Vec<String> {
        let own = std::env::current_exe()
            .ok()
            .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()));
        let exclude: Vec<&str> = own.as_deref().into_iter().collect();
        launch::discover(&self.paths.launch_dir(), &self.extension, &exclude)
    }

    /// Index of the target to preselect.
    pub fn default_target(&self, editor: &Editor, targets: &[String]) -> Option<usize> {
        let preferred = self
            .preferred
            .clone()
            .unwrap_or_else(|| editor.string(ProgramString::LaunchExe));
        launch::pick_default(targets, &preferred, None)
    }

    /// Start a launch target and detach from it.
    pub fn launch(&self, name: &str) -> Result<(), cfgkit::LaunchError> {
        let dir = self.paths.launch_dir();
        launch::launch(&dir, name)?;
        Ok(())
    }
}
