//! Command-line argument parsing
//!
//! Supports:
//! - Rendering a template file (or stdin, or the sample template)
//! - Choosing the output view and Python compatibility
//! - Highlighting an editor-style selection in the HTML preview

use std::path::{Path, PathBuf};

use clap::Parser;

use crate::config::PlaygroundConfig;
use crate::highlight::Selection;
use crate::mode::OutputMode;

/// Template playground
#[derive(Parser, Debug)]
#[command(
    name = "jinja-playground",
    version,
    about = "Render a template and inspect its tokens, AST and instructions"
)]
pub struct CliArgs {
    /// Template file, `-` for stdin (default: sample template)
    #[arg(value_name = "TEMPLATE")]
    pub template: Option<PathBuf>,

    /// JSON context file, `-` for stdin (default: sample context)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub context: Option<PathBuf>,

    /// Output view
    #[arg(short = 'm', long, value_enum)]
    pub mode: Option<OutputMode>,

    /// Enable Python-compatible method calls
    #[arg(long)]
    pub py_compat: bool,

    /// Selection to highlight in the HTML preview, zero-based LINE:COL-LINE:COL
    #[arg(long, value_name = "RANGE")]
    pub select: Option<Selection>,

    /// Do not inject position markers into the HTML preview
    #[arg(long)]
    pub no_markers: bool,
}

/// Where an input text comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Sample,
    Stdin,
    File(PathBuf),
}

impl InputSource {
    fn from_arg(arg: Option<PathBuf>) -> Self {
        match arg {
            None => InputSource::Sample,
            Some(path) if path == Path::new("-") => InputSource::Stdin,
            Some(path) => InputSource::File(path),
        }
    }
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub template: InputSource,
    pub context: InputSource,
    pub mode: Option<OutputMode>,
    pub py_compat: bool,
    pub selection: Option<Selection>,
    pub inject_markers: bool,
}

impl CliArgs {
    /// Convert parsed CLI args into startup configuration
    pub fn into_config(self) -> Result<StartupConfig, String> {
        let template = InputSource::from_arg(self.template);
        let context = InputSource::from_arg(self.context);

        if template == InputSource::Stdin && context == InputSource::Stdin {
            return Err("Only one of TEMPLATE and --context can read stdin".to_string());
        }

        // A zero-width range is a cursor, not a selection
        let selection = self.select.and_then(|s| {
            Selection::from_anchor_cursor((s.start_line, s.start_col), (s.end_line, s.end_col))
        });

        Ok(StartupConfig {
            template,
            context,
            mode: self.mode,
            py_compat: self.py_compat,
            selection,
            inject_markers: !self.no_markers,
        })
    }
}

impl StartupConfig {
    /// Overlay command-line choices onto the loaded config
    pub fn apply(&self, config: &mut PlaygroundConfig) {
        if let Some(mode) = self.mode {
            config.default_mode = mode;
        }
        config.py_compat |= self.py_compat;
        config.inject_markers &= self.inject_markers;
    }
}
