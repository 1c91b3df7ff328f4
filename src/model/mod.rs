//! Application model - the complete state of the playground
//!
//! Everything here is owned by the coordinator and changed only through
//! `update`. Outputs are never patched in place: each input change produces
//! a new revision and a fresh dispatch.

mod samples;

pub use samples::{DEFAULT_CONTEXT, DEFAULT_TEMPLATE};

use crate::config::PlaygroundConfig;
use crate::dispatch::{OutputRecord, ResolveError};
use crate::highlight::{highlight_with, HighlightError, Selection};
use crate::mode::OutputMode;
use crate::settings::{DEFAULT_CONTEXT_WIDTH, DEFAULT_OUTPUT_HEIGHT};
use crate::subscription::SelectionRect;

/// Sizes of the resizable panes, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaneLayout {
    pub output_height: u32,
    pub context_width: u32,
}

impl Default for PaneLayout {
    fn default() -> Self {
        Self {
            output_height: DEFAULT_OUTPUT_HEIGHT,
            context_width: DEFAULT_CONTEXT_WIDTH,
        }
    }
}

/// The latest result shown in the output pane
#[derive(Debug, Clone, PartialEq)]
pub struct OutputState {
    pub revision: u64,
    pub mode: OutputMode,
    pub result: Result<OutputRecord, ResolveError>,
}

/// Text the user last selected inside the rendered preview
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewSelection {
    pub text: String,
    pub rect: SelectionRect,
}

/// Snapshot of the inputs for one dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveRequest {
    pub mode: OutputMode,
    /// Template as the engine should see it (highlighted in the HTML preview)
    pub template: String,
    pub context: String,
    pub py_compat: bool,
}

/// The complete application model
#[derive(Debug, Clone)]
pub struct PlaygroundModel {
    pub template: String,
    pub context: String,
    pub selection: Option<Selection>,
    pub py_compat: bool,
    pub mode: OutputMode,
    pub layout: PaneLayout,
    /// Bumped on every input change; results for older revisions are stale
    pub revision: u64,
    pub output: Option<OutputState>,
    pub preview_selection: Option<PreviewSelection>,
    pub highlight_open: String,
    pub highlight_close: String,
}

impl PlaygroundModel {
    /// Model with the sample template and context
    pub fn new(config: &PlaygroundConfig) -> Self {
        Self::with_inputs(config, DEFAULT_TEMPLATE, DEFAULT_CONTEXT)
    }

    pub fn with_inputs(
        config: &PlaygroundConfig,
        template: impl Into<String>,
        context: impl Into<String>,
    ) -> Self {
        Self {
            template: template.into(),
            context: context.into(),
            selection: None,
            py_compat: config.py_compat,
            mode: config.default_mode,
            layout: PaneLayout::default(),
            revision: 0,
            output: None,
            preview_selection: None,
            highlight_open: config.highlight_open.clone(),
            highlight_close: config.highlight_close.clone(),
        }
    }

    /// Start a new revision, invalidating any dispatch in flight
    pub fn bump_revision(&mut self) -> u64 {
        self.revision += 1;
        self.revision
    }

    pub fn is_current(&self, revision: u64) -> bool {
        self.revision == revision
    }

    /// Snapshot the inputs for the current mode
    ///
    /// Only the HTML preview sees the selection highlight; every other view
    /// works on the template exactly as typed.
    pub fn resolve_request(&self) -> Result<ResolveRequest, HighlightError> {
        let template = if self.mode.highlights_selection() {
            highlight_with(
                &self.template,
                self.selection.as_ref(),
                &self.highlight_open,
                &self.highlight_close,
            )?
        } else {
            self.template.clone()
        };

        Ok(ResolveRequest {
            mode: self.mode,
            template,
            context: self.context.clone(),
            py_compat: self.py_compat,
        })
    }

    /// The result for the current revision, if it has arrived
    pub fn current_output(&self) -> Option<&OutputState> {
        self.output
            .as_ref()
            .filter(|output| output.revision == self.revision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(template: &str) -> PlaygroundModel {
        PlaygroundModel::with_inputs(&PlaygroundConfig::default(), template, "{}")
    }

    #[test]
    fn test_revision_increments() {
        let mut m = model("x");
        assert_eq!(m.bump_revision(), 1);
        assert_eq!(m.bump_revision(), 2);
        assert!(m.is_current(2));
        assert!(!m.is_current(1));
    }

    #[test]
    fn test_request_highlights_only_in_html_preview() {
        let mut m = model("abcdef");
        m.selection = Some(Selection::new(0, 2, 0, 4));

        m.mode = OutputMode::RenderHtml;
        assert_eq!(m.resolve_request().unwrap().template, "ab<b>cd</b>ef");

        m.mode = OutputMode::Render;
        assert_eq!(m.resolve_request().unwrap().template, "abcdef");

        m.mode = OutputMode::Tokens;
        assert_eq!(m.resolve_request().unwrap().template, "abcdef");
    }

    #[test]
    fn test_request_uses_configured_highlight_tags() {
        let config = PlaygroundConfig {
            highlight_open: "<mark>".to_string(),
            highlight_close: "</mark>".to_string(),
            ..PlaygroundConfig::default()
        };
        let mut m = PlaygroundModel::with_inputs(&config, "abcdef", "{}");
        m.selection = Some(Selection::new(0, 0, 0, 1));
        assert_eq!(m.resolve_request().unwrap().template, "<mark>a</mark>bcdef");
    }

    #[test]
    fn test_stale_selection_is_reported() {
        let mut m = model("one line");
        m.selection = Some(Selection::new(3, 0, 3, 1));
        assert!(matches!(
            m.resolve_request(),
            Err(HighlightError::LineOutOfRange { line: 3, .. })
        ));
    }
}
