//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types.

use crate::dispatch::{OutputRecord, ResolveError};
use crate::highlight::Selection;
use crate::mode::OutputMode;
use crate::subscription::HostEvent;

/// Input from the template and context editors
#[derive(Debug, Clone)]
pub enum EditorMsg {
    /// Template text replaced (every keystroke)
    SetTemplate(String),
    /// Context JSON text replaced
    SetContext(String),
    /// Template selection changed; `None` when collapsed to a cursor
    SetSelection(Option<Selection>),
    /// Toggle Python-compatible method calls
    SetPyCompat(bool),
}

/// Output pane messages
#[derive(Debug, Clone)]
pub enum OutputMsg {
    /// Switch the displayed view
    SetMode(OutputMode),
    /// Recompute the current view without any input change
    Refresh,
    /// A dispatch finished
    Completed {
        revision: u64,
        mode: OutputMode,
        result: Result<OutputRecord, ResolveError>,
    },
}

/// Pane size changes, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMsg {
    ResizeOutput(u32),
    ResizeContext(u32),
}

/// Top-level message type
#[derive(Debug, Clone)]
pub enum Msg {
    Editor(EditorMsg),
    Output(OutputMsg),
    Layout(LayoutMsg),
    /// Posted by the preview frame
    Host(HostEvent),
}
