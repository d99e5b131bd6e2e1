//! Messages driving the editor session
//!
//! UI collaborators translate device events into these and feed them to
//! [`handle_session_msg`](super::handle_session_msg); each message runs to
//! completion before the next is processed.

use crate::config::{LayerColor, SizePreset};
use crate::domain::{LayerId, LayerPatch};

/// One pointer gesture step, coordinates in view space
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerMsg {
    /// Press: hit-test, select, and record the grab point
    Down(f32, f32),
    /// Drag: reposition the grabbed layer under the pointer
    Move(f32, f32),
    /// Release: end the drag
    Up,
}

/// Editor session message
#[derive(Clone, Debug)]
pub enum SessionMsg {
    Pointer(PointerMsg),
    Select(Option<LayerId>),
    Patch(LayerId, LayerPatch),
    AddText {
        text: String,
        font_family: String,
        font_size: f32,
        color: LayerColor,
    },
    DeleteSelected,
    SetPreset(SizePreset),
    EnterEdit,
    BackToCompose,
}
