//! Programs that can be started after saving.

use std::{
    fs,
    path::Path,
    process::{Child, Command},
};

use crate::error::LaunchError;

/// File names in `dir` with the given extension, sorted.
///
/// An empty `extension` selects files without one. Names in `exclude` are
/// skipped; both comparisons ignore ASCII case. An unreadable directory
/// yields an empty list.
pub fn discover(dir: &Path, extension: &str, exclude: &[&str]) -> Vec<String> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("cannot list {}: {e}", dir.display());
            return Vec::new();
        }
    };

    let mut names: Vec<String> = entries
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_ok_and(|t| !t.is_dir()))
        .filter(|e| {
            let path = e.path();
            match path.extension().and_then(|x| x.to_str()) {
                Some(ext) => ext.eq_ignore_ascii_case(extension),
                None => extension.is_empty(),
            }
        })
        .filter_map(|e| e.file_name().into_string().ok())
        .filter(|name| !exclude.iter().any(|x| x.eq_ignore_ascii_case(name)))
        .collect();

    names.sort();
    names
}

/// Index of the entry to preselect: the most recently used one if it is
/// still present, otherwise `preferred`, otherwise the first.
pub fn pick_default(
    candidates: &[String],
    preferred: &str,
    most_recent: Option<&str>,
) -> Option<usize> {
    if candidates.is_empty() {
        return None;
    }
    let find = |name: &str| candidates.iter().position(|c| c.eq_ignore_ascii_case(name));

    most_recent
        .and_then(find)
        .or_else(|| find(preferred))
        .or(Some(0))
}

/// Start `name` from `dir`, with `dir` as working directory.
pub fn launch(dir: &Path, name: &str) -> Result<Child, LaunchError> {
    let program = dir.join(name);
    info!("launching {}", program.display());
    Command::new(&program)
        .current_dir(dir)
        .spawn()
        .map_err(|source| LaunchError { program, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discover() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["game.exe", "Tool.EXE", "readme.txt", "setup.exe", "noext"] {
            fs::write(dir.path().join(name), b"").unwrap();
        }
        fs::create_dir(dir.path().join("dir.exe")).unwrap();

        assert_eq!(
            discover(dir.path(), "exe", &["tool.exe"]),
            ["game.exe", "setup.exe"]
        );
        assert_eq!(discover(dir.path(), "", &[]), ["noext"]);
        assert!(discover(&dir.path().join("missing"), "exe", &[]).is_empty());
    }

    #[test]
    fn test_pick_default() {
        let list: Vec<String> = ["a.exe", "game.exe", "z.exe"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(pick_default(&list, "game.exe", None), Some(1));
        assert_eq!(pick_default(&list, "GAME.EXE", Some("z.exe")), Some(2));
        assert_eq!(pick_default(&list, "game.exe", Some("gone.exe")), Some(1));
        assert_eq!(pick_default(&list, "other.exe", None), Some(0));
        assert_eq!(pick_default(&[], "game.exe", None), None);
    }

    #[test]
    fn test_launch_missing_program() {
        let dir = tempfile::tempdir().unwrap();
        let err = launch(dir.path(), "missing-program").unwrap_err();
        assert_eq!(err.program, dir.path().join("missing-program"));
    }
}
