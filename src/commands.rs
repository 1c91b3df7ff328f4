//! Command types for the Elm-style architecture
//!
//! Commands represent side effects that should be performed after an update.

use serde_json::Value;

use crate::model::ResolveRequest;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// Output or layout changed and should be shown again
    Redraw,
    /// Run the dispatcher for a snapshot of the inputs
    /// Sends Msg::Output(Completed) tagged with `revision` when done
    Resolve {
        revision: u64,
        request: ResolveRequest,
    },
    /// Persist a setting; failures are logged and otherwise ignored
    SaveSetting { key: &'static str, value: Value },
    /// Execute multiple commands
    Batch(Vec<Cmd>),
}

impl Cmd {
    /// Create a batch of commands
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        Cmd::Batch(cmds)
    }

    /// Check if this command requires a redraw
    pub fn needs_redraw(&self) -> bool {
        match self {
            Cmd::None => false,
            Cmd::Redraw => true,
            // Completed triggers the redraw once the result is in
            Cmd::Resolve { .. } => false,
            Cmd::SaveSetting { .. } => false,
            Cmd::Batch(cmds) => cmds.iter().any(|c| c.needs_redraw()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_batch_needs_redraw_if_any_does() {
        let save = Cmd::SaveSetting {
            key: "outputHeight",
            value: json!(240),
        };
        assert!(!Cmd::batch(vec![save.clone()]).needs_redraw());
        assert!(Cmd::batch(vec![save, Cmd::Redraw]).needs_redraw());
        assert!(!Cmd::default().needs_redraw());
    }
}
