//! Subcommand handlers.
//!
//! - `edit` - interactive editor, then the optional launch
//! - `check` - load and validate, report what was corrected
//! - `defaults` - write every declared default to the settings file
//! - `show` - print current values

use anyhow::{Context, Result};
use cfgkit::{
    data::{OptionKind, defaults},
    strings::{self, ProgramString},
};
use clap::Subcommand;
use colored::Colorize;

use crate::ctx::AppContext;

#[derive(Subcommand, Clone, Debug)]
pub enum Command {
    /// Edit the settings interactively (default).
    Edit,
    /// Load and validate the settings, reporting corrections.
    Check,
    /// Reset every option to its default and save.
    Defaults,
    /// Print current values.
    Show,
}

/// Handler for the subcommands.
pub struct CommandHandler;

impl CommandHandler {
    /// Runs the selected command; `None` means `edit`.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema cannot be loaded or the settings file
    /// cannot be written.
    pub fn handle(ctx: &AppContext, command: Option<Command>) -> Result<()> {
        match command.unwrap_or(Command::Edit) {
            Command::Edit => Self::handle_edit(ctx),
            Command::Check => Self::handle_check(ctx),
            Command::Defaults => Self::handle_defaults(ctx),
            Command::Show => Self::handle_show(ctx),
        }
    }

    fn handle_edit(ctx: &AppContext) -> Result<()> {
        let editor = ctx.open_editor()?;
        let targets = ctx.launch_targets();
        let target = ctx.default_target(&editor, &targets);
        debug!("launch targets: {targets:?}, preselected {target:?}");

        let mut editor = cfgkit::run(editor, targets, target)?;

        // the settings file is already on disk when a request exists
        if let Some(name) = editor.take_launch_request() {
            if let Err(e) = ctx.launch(&name) {
                error!("{e}");
                eprintln!(
                    "{}: {}",
                    editor.string(ProgramString::ErrorCaption).red().bold(),
                    editor.string(ProgramString::LaunchError)
                );
            }
        }
        Ok(())
    }

    fn handle_check(ctx: &AppContext) -> Result<()> {
        let editor = ctx.open_editor()?;
        println!("Schema: {}", ctx.paths.schema.display());
        println!("Settings: {}", editor.ini_path.display());

        let corrections = editor.corrections();
        if corrections == 0 {
            println!("{}", "All values are valid".green());
        } else {
            println!(
                "{}",
                format!("{corrections} value(s) out of range, defaults used").yellow()
            );
        }

        for failure in editor.resolution_failures() {
            println!("{} {failure}", "layout:".yellow());
        }
        Ok(())
    }

    fn handle_defaults(ctx: &AppContext) -> Result<()> {
        let mut editor = ctx.open_editor()?;
        defaults::reset_all(&mut editor.config);
        editor
            .save()
            .with_context(|| editor.string(ProgramString::IniError))?;
        println!(
            "{} {}",
            "Defaults written to".green(),
            editor.ini_path.display()
        );
        Ok(())
    }

    fn handle_show(ctx: &AppContext) -> Result<()> {
        let editor = ctx.open_editor()?;
        let schema = editor.config.schema();
        let loc = schema.strings();

        for (s, section) in schema.sections().iter().enumerate() {
            println!("{}", format!("[{}]", section.name).bold());
            for option in editor.config.options().filter(|o| o.coord.section == s) {
                let shown = match option.kind() {
                    OptionKind::Enumerated { labels } => option
                        .current
                        .as_int()
                        .and_then(|i| usize::try_from(i).ok())
                        .and_then(|i| labels.get(i))
                        .map(|l| format!("{} ({})", option.current, strings::key_text(loc, l)))
                        .unwrap_or_else(|| option.current.to_string()),
                    _ => option.current.to_string(),
                };
                let line = format!(
                    "  {} = {shown}  {}",
                    option.name(),
                    strings::option_label(loc, option.def).dimmed()
                );
                if option.is_default() {
                    println!("{line}");
                } else {
                    println!("{}", line.cyan());
                }
            }
        }
        Ok(())
    }
}
