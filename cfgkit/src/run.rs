use anyhow::Context;
pub use cursive;
use cursive::{Cursive, CursiveExt, views::Dialog};

use crate::{
    data::Editor,
    strings::ProgramString,
    ui::{UiState, main_view, on_close, on_save, show_group, startup_warning},
};

/// Run the terminal editor until the user closes it.
///
/// `targets` are the launch candidates and `target` the preselected one.
/// The returned editor carries the final state, including a pending launch
/// request when the user chose save & launch.
///
/// # Errors
///
/// Returns an error when the editor state cannot be recovered from the UI.
pub fn run(editor: Editor, targets: Vec<String>, target: Option<usize>) -> anyhow::Result<Editor> {
    let warning = startup_warning(&editor);
    let caption = editor.string(ProgramString::WarningCaption);

    let state = UiState {
        editor,
        targets,
        target,
        group: 0,
    };
    let view = main_view(&state);

    let mut siv = Cursive::default();
    siv.set_user_data(state);

    siv.add_global_callback('q', on_close);
    siv.add_global_callback('Q', on_close);
    siv.add_global_callback('s', on_save);
    siv.add_global_callback('S', on_save);
    siv.add_global_callback('~', Cursive::toggle_debug_console);

    siv.add_fullscreen_layer(view);
    show_group(&mut siv, 0);

    if let Some(warning) = warning {
        siv.add_layer(Dialog::text(warning).title(caption).dismiss_button("OK"));
    }

    siv.run();

    let state = siv
        .take_user_data::<UiState>()
        .context("editor state missing after UI exit")?;
    Ok(state.editor)
}
