//! Output pane update handlers

use crate::commands::Cmd;
use crate::dispatch::ResolveError;
use crate::messages::OutputMsg;
use crate::model::{OutputState, PlaygroundModel};

/// Start a new revision and request a dispatch for it
///
/// If the inputs can't even be prepared (a selection that no longer fits
/// the template) the error becomes the output right away.
pub fn schedule_resolve(model: &mut PlaygroundModel) -> Option<Cmd> {
    let revision = model.bump_revision();
    match model.resolve_request() {
        Ok(request) => Some(Cmd::Resolve { revision, request }),
        Err(err) => {
            tracing::debug!("Cannot prepare rev {}: {}", revision, err);
            model.output = Some(OutputState {
                revision,
                mode: model.mode,
                result: Err(ResolveError::from(err)),
            });
            Some(Cmd::Redraw)
        }
    }
}

pub fn update_output(model: &mut PlaygroundModel, msg: OutputMsg) -> Option<Cmd> {
    match msg {
        OutputMsg::SetMode(mode) => {
            tracing::info!("Output mode: {}", mode.label());
            model.mode = mode;
            schedule_resolve(model)
        }
        OutputMsg::Refresh => schedule_resolve(model),
        OutputMsg::Completed {
            revision,
            mode,
            result,
        } => {
            // A newer input arrived while this one was computing
            if !model.is_current(revision) {
                tracing::debug!(
                    "Discarding stale output: model revision {} != result revision {}",
                    model.revision,
                    revision
                );
                return None;
            }

            tracing::debug!(
                "Applied {} output for revision {} ({})",
                mode,
                revision,
                if result.is_ok() { "ok" } else { "error" }
            );
            model.output = Some(OutputState {
                revision,
                mode,
                result,
            });
            Some(Cmd::Redraw)
        }
    }
}
