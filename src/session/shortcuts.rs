use crate::session::messages::{EditorCommand, Key};

/// Map a key press to an editor command.
///
/// Delete only applies when something is selected; Escape always applies.
pub fn handle_key_event(key: &Key, has_selection: bool) -> Option<EditorCommand> {
    match key {
        Key::Delete | Key::Backspace if has_selection => Some(EditorCommand::DeleteSelected),
        Key::Escape => Some(EditorCommand::Cancel),
        _ => None,
    }
}
