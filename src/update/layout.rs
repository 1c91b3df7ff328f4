//! Pane resize handlers

use serde_json::json;

use crate::commands::Cmd;
use crate::messages::LayoutMsg;
use crate::model::PlaygroundModel;
use crate::settings::{CONTEXT_WIDTH_KEY, OUTPUT_HEIGHT_KEY};

pub fn update_layout(model: &mut PlaygroundModel, msg: LayoutMsg) -> Option<Cmd> {
    let (key, value) = match msg {
        LayoutMsg::ResizeOutput(height) => {
            if model.layout.output_height == height {
                return None;
            }
            model.layout.output_height = height;
            (OUTPUT_HEIGHT_KEY, height)
        }
        LayoutMsg::ResizeContext(width) => {
            if model.layout.context_width == width {
                return None;
            }
            model.layout.context_width = width;
            (CONTEXT_WIDTH_KEY, width)
        }
    };

    Some(Cmd::batch(vec![
        Cmd::SaveSetting {
            key,
            value: json!(value),
        },
        Cmd::Redraw,
    ]))
}
