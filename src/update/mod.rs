//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions.

mod editor;
mod host;
mod layout;
mod output;

use crate::commands::Cmd;
use crate::messages::Msg;
use crate::model::PlaygroundModel;

pub use editor::update_editor;
pub use host::update_host;
pub use layout::update_layout;
pub use output::{schedule_resolve, update_output};

/// Main update function - dispatches to sub-handlers
pub fn update(model: &mut PlaygroundModel, msg: Msg) -> Option<Cmd> {
    match msg {
        Msg::Editor(m) => editor::update_editor(model, m),
        Msg::Output(m) => output::update_output(model, m),
        Msg::Layout(m) => layout::update_layout(model, m),
        Msg::Host(event) => host::update_host(model, event),
    }
}
