//! Preview frame message handlers

use crate::commands::Cmd;
use crate::model::{PlaygroundModel, PreviewSelection};
use crate::subscription::HostEvent;

pub fn update_host(model: &mut PlaygroundModel, event: HostEvent) -> Option<Cmd> {
    match event {
        HostEvent::Selection { text, rect } => {
            tracing::debug!(
                "Preview selection: {:?} at ({}, {}) {}x{}",
                text,
                rect.x,
                rect.y,
                rect.width,
                rect.height
            );
            model.preview_selection = Some(PreviewSelection { text, rect });
            Some(Cmd::Redraw)
        }
        HostEvent::Unknown => None,
    }
}
