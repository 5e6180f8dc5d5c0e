use cursive::{
    Cursive, View,
    traits::{Nameable, Resizable, Scrollable},
    views::{Checkbox, Dialog, DummyView, LinearLayout, NamedView, Panel, SelectView, TextView},
};

use crate::{
    data::{Coord, Editor, OptionKind, Value, editor::CloseAction},
    error::SaveError,
    strings::{self, ProgramString},
};

const MAIN: &str = "main";
const OPTIONS: &str = "options";
const DESC: &str = "desc";

/// Position of the Save button among the dialog buttons.
const SAVE_BUTTON: usize = 2;

/// Width of the option label column.
const LABEL_WIDTH: usize = 30;

/// Cursive user data.
pub struct UiState {
    pub editor: Editor,
    /// Launch candidates shown in the target select.
    pub targets: Vec<String>,
    /// Selected launch candidate.
    pub target: Option<usize>,
    /// Index of the group (tab) on screen.
    pub group: usize,
}

/// Build the main dialog: tab list, option panels, description, launch
/// target select and the bottom buttons.
pub fn main_view(state: &UiState) -> NamedView<Dialog> {
    let editor = &state.editor;
    let loc = editor.config.schema().strings();

    let mut tabs = SelectView::<usize>::new();
    for (i, group) in editor.layout.groups().iter().enumerate() {
        tabs.add_item(strings::key_text(loc, &group.name), i);
    }
    tabs.set_on_select(|s: &mut Cursive, group: &usize| show_group(s, *group));

    let body = LinearLayout::horizontal()
        .child(Panel::new(tabs).min_width(20))
        .child(
            LinearLayout::vertical()
                .with_name(OPTIONS)
                .scrollable()
                .full_width(),
        );

    let mut root = LinearLayout::vertical()
        .child(body.full_height())
        .child(Panel::new(TextView::new("").with_name(DESC)).fixed_height(5));

    if state.targets.len() > 1 {
        let select = SelectView::<usize>::new()
            .popup()
            .with_all(state.targets.iter().cloned().zip(0..))
            .selected(state.target.unwrap_or(0))
            .on_submit(|s: &mut Cursive, i: &usize| {
                let i = *i;
                s.with_user_data(|st: &mut UiState| st.target = Some(i));
            });
        root.add_child(
            LinearLayout::horizontal()
                .child(TextView::new(editor.string(ProgramString::LaunchLabel)))
                .child(DummyView.fixed_width(1))
                .child(select),
        );
    }

    let mut dialog = Dialog::around(root)
        .title(editor.title())
        .button(editor.string(ProgramString::Close), on_close)
        .button(editor.string(ProgramString::Defaults), on_defaults)
        .button(editor.string(ProgramString::Save), on_save);
    if !state.targets.is_empty() {
        dialog.add_button(editor.string(ProgramString::Launch), on_launch);
    }
    sync_save_button(&mut dialog, editor.is_dirty());
    dialog.with_name(MAIN)
}

/// Replace the option panels with those of `group`.
pub fn show_group(s: &mut Cursive, group: usize) {
    let Some((view, caption)) = s.with_user_data(|st: &mut UiState| {
        st.group = group;
        let caption = st
            .editor
            .layout
            .group(group)
            .map(|g| strings::key_text(st.editor.config.schema().strings(), &g.name))
            .unwrap_or_default();
        (group_view(&st.editor, group), caption)
    }) else {
        return;
    };

    s.call_on_name(OPTIONS, |v: &mut LinearLayout| {
        v.clear();
        v.add_child(view);
    });
    set_desc(s, caption);
}

fn group_view(editor: &Editor, group: usize) -> LinearLayout {
    let mut column = LinearLayout::vertical();
    let Some(group) = editor.layout.group(group) else {
        return column;
    };
    let loc = editor.config.schema().strings();

    for sub in &group.subgroups {
        let mut rows = LinearLayout::vertical();
        for entry in &sub.entries {
            if let Some(row) = option_row(editor, entry.coord) {
                rows.add_child(row);
            }
        }
        column.add_child(Panel::new(rows).title(strings::key_text(loc, &sub.name)));
    }
    column
}

fn option_row(editor: &Editor, coord: Coord) -> Option<LinearLayout> {
    let option = editor.config.option(coord).ok()?;
    let loc = editor.config.schema().strings();

    let control: Box<dyn View> = match option.kind() {
        OptionKind::Boolean => Box::new(
            Checkbox::new()
                .with_checked(option.current == &Value::Int(1))
                .on_change(move |s: &mut Cursive, checked: bool| {
                    edit(s, coord, Value::from(checked))
                }),
        ),
        OptionKind::Enumerated { labels } => {
            let selected = option
                .current
                .as_int()
                .and_then(|i| usize::try_from(i).ok())
                .filter(|i| *i < labels.len())
                .unwrap_or(0);
            Box::new(
                SelectView::<i64>::new()
                    .popup()
                    .with_all(
                        labels
                            .iter()
                            .map(|l| strings::key_text(loc, l))
                            .zip(0..),
                    )
                    .selected(selected)
                    .on_submit(move |s: &mut Cursive, v: &i64| edit(s, coord, Value::Int(*v))),
            )
        }
        OptionKind::Numeric | OptionKind::FreeText | OptionKind::Unknown => {
            Box::new(TextView::new(option.current.to_string()))
        }
    };

    Some(
        LinearLayout::horizontal()
            .child(TextView::new(strings::option_label(loc, option.def)).fixed_width(LABEL_WIDTH))
            .child(control),
    )
}

fn edit(s: &mut Cursive, coord: Coord, value: Value) {
    let desc = s.with_user_data(|st: &mut UiState| {
        if let Err(e) = st.editor.apply_edit(coord, value) {
            error!("{e}");
        }
        st.editor
            .config
            .option(coord)
            .map(|o| strings::option_desc(st.editor.config.schema().strings(), o.def))
            .unwrap_or_default()
    });
    if let Some(desc) = desc {
        set_desc(s, desc);
    }
    refresh_state(s);
}

fn set_desc(s: &mut Cursive, text: String) {
    s.call_on_name(DESC, |v: &mut TextView| v.set_content(text));
}

/// Save is only offered while there are unsaved changes.
fn sync_save_button(dialog: &mut Dialog, dirty: bool) {
    if let Some(button) = dialog.buttons_mut().nth(SAVE_BUTTON) {
        button.set_enabled(dirty);
    }
}

/// Bring the title suffix and the Save button in line with the dirty flag.
fn refresh_state(s: &mut Cursive) {
    let Some((title, dirty)) =
        s.with_user_data(|st: &mut UiState| (st.editor.title(), st.editor.is_dirty()))
    else {
        return;
    };
    s.call_on_name(MAIN, |d: &mut Dialog| {
        d.set_title(title);
        sync_save_button(d, dirty);
    });
}

fn text(s: &mut Cursive, id: ProgramString) -> String {
    s.with_user_data(|st: &mut UiState| st.editor.string(id))
        .unwrap_or_else(|| id.fallback().to_string())
}

fn show_save_error(s: &mut Cursive, e: SaveError) {
    error!("{e}");
    let caption = text(s, ProgramString::ErrorCaption);
    let message = text(s, ProgramString::IniError);
    s.add_layer(
        Dialog::text(format!("{message}\n\n{e}"))
            .title(caption)
            .dismiss_button("OK"),
    );
}

/// Save the settings file.
pub fn on_save(s: &mut Cursive) {
    if let Some(Err(e)) = s.with_user_data(|st: &mut UiState| st.editor.save()) {
        show_save_error(s, e);
    }
    refresh_state(s);
}

/// Close, asking first when there are unsaved changes.
pub fn on_close(s: &mut Cursive) {
    let action = s.with_user_data(|st: &mut UiState| st.editor.request_close());
    if action != Some(CloseAction::Confirm) {
        s.quit();
        return;
    }

    let caption = text(s, ProgramString::WarningCaption);
    let message = text(s, ProgramString::UnsavedConfirm);
    s.add_layer(
        Dialog::text(message)
            .title(caption)
            .button("Yes", |s| {
                s.pop_layer();
                match s.with_user_data(|st: &mut UiState| st.editor.save()) {
                    Some(Err(e)) => show_save_error(s, e),
                    _ => s.quit(),
                }
            })
            .button("No", |s| s.quit())
            .button("Cancel", |s| {
                s.pop_layer();
            }),
    );
}

fn on_defaults(s: &mut Cursive) {
    let caption = text(s, ProgramString::WarningCaption);
    let message = text(s, ProgramString::DefaultConfirm);
    s.add_layer(
        Dialog::text(message)
            .title(caption)
            .button("Yes", |s| {
                s.pop_layer();
                let group = s.with_user_data(|st: &mut UiState| {
                    st.editor.reset_defaults();
                    st.group
                });
                show_group(s, group.unwrap_or(0));
                refresh_state(s);
            })
            .button("No", |s| {
                s.pop_layer();
            }),
    );
}

fn on_launch(s: &mut Cursive) {
    let result = s.with_user_data(|st: &mut UiState| {
        let target = st.target.and_then(|i| st.targets.get(i)).cloned()?;
        Some(st.editor.save_and_launch(&target))
    });
    match result.flatten() {
        Some(Ok(())) => s.quit(),
        Some(Err(e)) => show_save_error(s, e),
        None => warn!("no launch target selected"),
    }
}

/// Message about values corrected and layout entries dropped at startup.
pub fn startup_warning(editor: &Editor) -> Option<String> {
    let mut lines = Vec::new();
    if editor.corrections() > 0 {
        lines.push(format!(
            "{} setting(s) had invalid values and were reset to their defaults.",
            editor.corrections()
        ));
    }
    for failure in editor.resolution_failures() {
        lines.push(format!("Layout entry omitted: {failure}."));
    }
    (!lines.is_empty()).then(|| lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::scenario_schema;

    fn save_enabled(state: &UiState) -> bool {
        let mut view = main_view(state);
        let mut dialog = view.get_mut();
        dialog.buttons_mut().nth(SAVE_BUTTON).unwrap().is_enabled()
    }

    #[test]
    fn test_save_button_follows_dirty_flag() {
        let dir = tempfile::tempdir().unwrap();
        let editor = Editor::with_schema(scenario_schema(), dir.path().join("game.ini"));
        let mut state = UiState {
            editor,
            targets: Vec::new(),
            target: None,
            group: 0,
        };
        assert!(!state.editor.is_dirty());
        assert!(!save_enabled(&state));

        state
            .editor
            .apply_edit(Coord::new(0, 0), Value::Int(1))
            .unwrap();
        assert!(save_enabled(&state));

        state.editor.save().unwrap();
        assert!(!save_enabled(&state));
    }

    #[test]
    fn test_startup_warning() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.ini");
        std::fs::write(&path, "[Video]\nVsync=3\n").unwrap();

        let editor = Editor::with_schema(scenario_schema(), path);
        let warning = startup_warning(&editor).unwrap();
        assert!(warning.starts_with("1 setting(s)"));
        assert!(warning.contains("\"Audio\""));
    }
}
