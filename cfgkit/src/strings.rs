//! User-facing strings.
//!
//! Every visible text is looked up by key in a [`Localizer`]. Program
//! strings fall back to compiled-in English text; option, value and group
//! strings fall back to their symbolic key.

use std::collections::BTreeMap;

use crate::data::item::OptionDef;

/// Source of translated strings.
pub trait Localizer {
    /// Text for `key`, or `None` when the key is not translated.
    fn lookup(&self, key: &str) -> Option<&str>;
}

/// The `strings` table of a schema document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringTable(BTreeMap<String, String>);

impl From<BTreeMap<String, String>> for StringTable {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self(map)
    }
}

impl Localizer for StringTable {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .map(String::as_str)
            .filter(|s| !s.is_empty())
    }
}

/// Strings used by the editor itself rather than by options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgramString {
    Title,
    ErrorCaption,
    WarningCaption,
    Close,
    Defaults,
    Save,
    Launch,
    LaunchLabel,
    LaunchError,
    LaunchExe,
    IniName,
    IniError,
    DefaultConfirm,
    Unsaved,
    UnsavedConfirm,
}

impl ProgramString {
    pub const ALL: [ProgramString; 15] = [
        ProgramString::Title,
        ProgramString::ErrorCaption,
        ProgramString::WarningCaption,
        ProgramString::Close,
        ProgramString::Defaults,
        ProgramString::Save,
        ProgramString::Launch,
        ProgramString::LaunchLabel,
        ProgramString::LaunchError,
        ProgramString::LaunchExe,
        ProgramString::IniName,
        ProgramString::IniError,
        ProgramString::DefaultConfirm,
        ProgramString::Unsaved,
        ProgramString::UnsavedConfirm,
    ];

    /// Key in the string table.
    pub fn key(self) -> &'static str {
        match self {
            ProgramString::Title => "PRG_Title",
            ProgramString::ErrorCaption => "PRG_Caption_error",
            ProgramString::WarningCaption => "PRG_Caption_warning",
            ProgramString::Close => "PRG_Close",
            ProgramString::Defaults => "PRG_Default",
            ProgramString::Save => "PRG_Save",
            ProgramString::Launch => "PRG_Launch",
            ProgramString::LaunchLabel => "PRG_Launch_label",
            ProgramString::LaunchError => "PRG_Launch_mess",
            ProgramString::LaunchExe => "PRG_Launch_exe",
            ProgramString::IniName => "PRG_Ini_name",
            ProgramString::IniError => "PRG_Ini_error",
            ProgramString::DefaultConfirm => "PRG_Default_confirm",
            ProgramString::Unsaved => "PRG_Unsaved",
            ProgramString::UnsavedConfirm => "PRG_Save_exit",
        }
    }

    /// Text used when the table has no entry.
    pub fn fallback(self) -> &'static str {
        match self {
            ProgramString::Title => "Configuration Tool",
            ProgramString::ErrorCaption => "ERROR",
            ProgramString::WarningCaption => "WARNING",
            ProgramString::Close => "Close",
            ProgramString::Defaults => "Defaults",
            ProgramString::Save => "Save",
            ProgramString::Launch => "Save & Launch",
            ProgramString::LaunchLabel => "Launch using:",
            ProgramString::LaunchError => "Could not launch the selected program.",
            ProgramString::LaunchExe => "game.exe",
            ProgramString::IniName => "settings.ini",
            ProgramString::IniError => "Could not save the configuration ini.",
            ProgramString::DefaultConfirm => {
                "Are you sure you want reset all settings to default?"
            }
            ProgramString::Unsaved => " [unsaved changes]",
            ProgramString::UnsavedConfirm => "There are unsaved changes. Save before closing?",
        }
    }

    pub fn resolve(self, loc: &impl Localizer) -> String {
        loc.lookup(self.key()).unwrap_or(self.fallback()).to_string()
    }
}

/// Display name of an option.
pub fn option_label(loc: &impl Localizer, def: &OptionDef) -> String {
    def.label
        .as_deref()
        .and_then(|k| loc.lookup(k))
        .unwrap_or(&def.name)
        .to_string()
}

/// Description of an option, empty when none is declared.
pub fn option_desc(loc: &impl Localizer, def: &OptionDef) -> String {
    def.desc
        .as_deref()
        .and_then(|k| loc.lookup(k))
        .unwrap_or_default()
        .to_string()
}

/// Display text of an enumerated value, group or sub-group key.
pub fn key_text(loc: &impl Localizer, key: &str) -> String {
    loc.lookup(key).unwrap_or(key).to_string()
}
