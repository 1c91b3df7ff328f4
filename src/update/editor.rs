//! Editor input handlers
//!
//! Every edit recomputes the current view. There is no debouncing.

use crate::commands::Cmd;
use crate::messages::EditorMsg;
use crate::model::PlaygroundModel;

use super::output::schedule_resolve;

pub fn update_editor(model: &mut PlaygroundModel, msg: EditorMsg) -> Option<Cmd> {
    match msg {
        EditorMsg::SetTemplate(template) => {
            model.template = template;
        }
        EditorMsg::SetContext(context) => {
            model.context = context;
        }
        EditorMsg::SetSelection(selection) => {
            if model.selection == selection {
                return None;
            }
            tracing::trace!(
                "Template selection: {}",
                selection
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "none".to_string())
            );
            model.selection = selection;
        }
        EditorMsg::SetPyCompat(enabled) => {
            tracing::info!(
                "Python compatibility {}",
                if enabled { "enabled" } else { "disabled" }
            );
            model.py_compat = enabled;
        }
    }
    schedule_resolve(model)
}
