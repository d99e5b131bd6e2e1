//! Session state and message handling

pub mod messages;
pub mod state;

pub use messages::{PointerMsg, SessionMsg};
pub use state::{EditorSession, Step};

/// Dispatch one session message
///
/// Runs to completion before the caller processes the next event; the UI
/// collaborator re-renders after each message it forwards.
pub fn handle_session_msg(session: &mut EditorSession, msg: SessionMsg) {
    match msg {
        SessionMsg::Pointer(pointer) => handle_pointer(session, pointer),
        SessionMsg::Select(id) => session.select(id),
        SessionMsg::Patch(id, patch) => session.update_layer(id, patch),
        SessionMsg::AddText {
            text,
            font_family,
            font_size,
            color,
        } => {
            session.add_text_layer(text, font_family, font_size, color);
        }
        SessionMsg::DeleteSelected => session.delete_selected(),
        SessionMsg::SetPreset(preset) => session.set_preset(preset),
        SessionMsg::EnterEdit => session.enter_edit(),
        SessionMsg::BackToCompose => session.back_to_compose(),
    }
}

fn handle_pointer(session: &mut EditorSession, msg: PointerMsg) {
    match msg {
        PointerMsg::Down(x, y) => session.pointer_down(x, y),
        PointerMsg::Move(x, y) => session.pointer_move(x, y),
        PointerMsg::Up => session.pointer_up(),
    }
}
