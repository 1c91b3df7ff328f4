//! Output mode dispatch
//!
//! Routes the current template/context pair to the engine operation the
//! selected [`OutputMode`] needs and turns every failure on the way into a
//! [`ResolveError`]. Nothing is cached: each call recomputes from scratch.

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde_json::Value;
use thiserror::Error;

use crate::config::PlaygroundConfig;
use crate::engine::{EngineError, Instruction, ParseTree, TemplateEngine, TokenStream};
use crate::extract::{extract_offsets, ExtractError};
use crate::highlight::HighlightError;
use crate::marker::{inject_with, MarkerError, DEFAULT_MARKER};
use crate::mode::OutputMode;

/// Prefix prepended to rendered output so the preview frame loads its
/// stylesheet and selection reporting script
pub const DEFAULT_BOILERPLATE: &str = "\
<link rel=\"stylesheet\" href=\"/style.css\" crossorigin=\"anonymous\">
<script src=\"/selection.js\"></script>
";

/// Everything a mode can produce
#[derive(Debug, Clone, PartialEq)]
pub enum OutputRecord {
    /// Engine output with the boilerplate prefix; `html` when shown in the frame
    Rendered { text: String, html: bool },
    /// The template source passed through unchanged
    Source(String),
    Tokens(TokenStream),
    Ast(ParseTree),
    /// Instructions per block, ordered by block name
    Instructions(Vec<(String, Vec<Instruction>)>),
}

/// Uniform failure of a dispatch, displayed verbatim in the output pane
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("{0}")]
    Engine(#[from] EngineError),
    #[error("invalid context: {0}")]
    Context(String),
    #[error("{0}")]
    Extract(#[from] ExtractError),
    #[error("{0}")]
    Marker(#[from] MarkerError),
    #[error("{0}")]
    Highlight(#[from] HighlightError),
}

impl ResolveError {
    /// Offsets from the engine and the source disagree. These point at a bug
    /// between engine and extractor rather than at the user's input.
    pub fn is_integration_error(&self) -> bool {
        matches!(self, ResolveError::Extract(_) | ResolveError::Marker(_))
    }
}

/// Knobs for the render modes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchOptions {
    /// Extension of the single template's name, which drives auto-escaping
    pub template_extension: String,
    pub boilerplate: String,
    /// Marker injected in the HTML preview; `None` disables injection
    pub marker: Option<String>,
}

impl Default for DispatchOptions {
    fn default() -> Self {
        Self {
            template_extension: "html".to_string(),
            boilerplate: DEFAULT_BOILERPLATE.to_string(),
            marker: Some(DEFAULT_MARKER.to_string()),
        }
    }
}

impl DispatchOptions {
    pub fn from_config(config: &PlaygroundConfig) -> Self {
        Self {
            template_extension: config.template_extension.clone(),
            boilerplate: config.boilerplate.clone(),
            marker: config.inject_markers.then(|| config.marker.clone()),
        }
    }

    pub fn template_name(&self) -> String {
        format!("template.{}", self.template_extension)
    }
}

/// Resolves one output view against an engine
pub struct Dispatcher<'a, E: TemplateEngine + ?Sized> {
    engine: &'a E,
    options: &'a DispatchOptions,
}

impl<'a, E: TemplateEngine + ?Sized> Dispatcher<'a, E> {
    pub fn new(engine: &'a E, options: &'a DispatchOptions) -> Self {
        Self { engine, options }
    }

    /// Compute the view for `mode`
    ///
    /// `context` is JSON text and is only parsed by the render modes, so an
    /// invalid context never affects the other views.
    pub fn resolve(
        &self,
        mode: OutputMode,
        template: &str,
        context: &str,
        py_compat: bool,
    ) -> Result<OutputRecord, ResolveError> {
        tracing::debug!(
            "resolve: mode={} template={}B context={}B py_compat={}",
            mode,
            template.len(),
            context.len(),
            py_compat
        );

        let result = self.resolve_inner(mode, template, context, py_compat);

        if let Err(ref err) = result {
            if err.is_integration_error() {
                tracing::warn!("resolve: offset mismatch in {} mode: {}", mode, err);
            } else {
                tracing::debug!("resolve: {} mode failed: {}", mode, err);
            }
        }
        result
    }

    fn resolve_inner(
        &self,
        mode: OutputMode,
        template: &str,
        context: &str,
        py_compat: bool,
    ) -> Result<OutputRecord, ResolveError> {
        match mode {
            OutputMode::RenderHtml | OutputMode::Render => {
                self.render(mode, template, context, py_compat)
            }
            OutputMode::RenderTemplate => Ok(OutputRecord::Source(template.to_string())),
            OutputMode::Tokens => Ok(OutputRecord::Tokens(self.engine.tokenize(template)?)),
            OutputMode::Ast => Ok(OutputRecord::Ast(self.engine.parse(template)?)),
            OutputMode::Instructions => {
                let mut blocks: Vec<_> = self.engine.instructions(template)?.into_iter().collect();
                blocks.sort_by(|a, b| a.0.cmp(&b.0));
                Ok(OutputRecord::Instructions(blocks))
            }
        }
    }

    fn render(
        &self,
        mode: OutputMode,
        template: &str,
        context: &str,
        py_compat: bool,
    ) -> Result<OutputRecord, ResolveError> {
        let source = if mode.injects_markers() {
            self.mark(template)?
        } else {
            Cow::Borrowed(template)
        };

        let context: Value =
            serde_json::from_str(context).map_err(|e| ResolveError::Context(e.to_string()))?;

        let name = self.options.template_name();
        let mut templates = BTreeMap::new();
        templates.insert(name.clone(), source.into_owned());

        let env = self.engine.create_environment(templates, py_compat)?;
        let rendered = env.render(&name, &context)?;

        Ok(OutputRecord::Rendered {
            text: format!("{}{}", self.options.boilerplate, rendered),
            html: mode.is_html(),
        })
    }

    /// Inject the marker at the start of every parse tree span
    fn mark<'t>(&self, template: &'t str) -> Result<Cow<'t, str>, ResolveError> {
        let Some(marker) = self.options.marker.as_deref() else {
            return Ok(Cow::Borrowed(template));
        };

        let tree = self.engine.parse(template)?;
        let offsets = extract_offsets(&tree)?;
        tracing::debug!("resolve: injecting {} markers", offsets.len());
        Ok(Cow::Owned(inject_with(template, marker, offsets)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_name_uses_extension() {
        let options = DispatchOptions {
            template_extension: "txt".to_string(),
            ..DispatchOptions::default()
        };
        assert_eq!(options.template_name(), "template.txt");
    }

    #[test]
    fn test_options_from_config_respects_marker_toggle() {
        let config = PlaygroundConfig {
            inject_markers: false,
            ..PlaygroundConfig::default()
        };
        assert_eq!(DispatchOptions::from_config(&config).marker, None);
        assert_eq!(
            DispatchOptions::from_config(&PlaygroundConfig::default()).marker,
            Some(DEFAULT_MARKER.to_string())
        );
    }

    #[test]
    fn test_integration_errors() {
        let marker = ResolveError::from(MarkerError::NotCharBoundary { offset: 1 });
        assert!(marker.is_integration_error());
        assert!(!ResolveError::Context("bad".into()).is_integration_error());
        assert!(!ResolveError::from(EngineError::syntax("bad")).is_integration_error());
    }
}
