//! Output display modes

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// What the output pane shows for the current template
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum OutputMode {
    /// Rendered output shown as HTML, with selection highlight and markers
    #[default]
    RenderHtml,
    /// The template source itself, untouched
    RenderTemplate,
    /// Rendered output shown as plain text
    Render,
    Tokens,
    Ast,
    Instructions,
}

impl OutputMode {
    /// All modes, in the order the mode picker lists them
    pub const ALL: [OutputMode; 6] = [
        OutputMode::RenderHtml,
        OutputMode::RenderTemplate,
        OutputMode::Render,
        OutputMode::Tokens,
        OutputMode::Ast,
        OutputMode::Instructions,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OutputMode::RenderHtml => "render-html",
            OutputMode::RenderTemplate => "render-template",
            OutputMode::Render => "render",
            OutputMode::Tokens => "tokens",
            OutputMode::Ast => "ast",
            OutputMode::Instructions => "instructions",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            OutputMode::RenderHtml => "Rendered HTML",
            OutputMode::RenderTemplate => "Render Template",
            OutputMode::Render => "Rendered Text",
            OutputMode::Tokens => "Tokens",
            OutputMode::Ast => "AST",
            OutputMode::Instructions => "Instructions",
        }
    }

    /// Modes whose output is meant for the HTML frame
    pub fn is_html(self) -> bool {
        matches!(self, OutputMode::RenderHtml | OutputMode::RenderTemplate)
    }

    /// The editor selection is only reflected in the HTML preview
    pub fn highlights_selection(self) -> bool {
        self == OutputMode::RenderHtml
    }

    pub fn injects_markers(self) -> bool {
        self == OutputMode::RenderHtml
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OutputMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| format!("unknown output mode: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_render_html() {
        assert_eq!(OutputMode::default(), OutputMode::RenderHtml);
    }

    #[test]
    fn test_names_round_trip() {
        for mode in OutputMode::ALL {
            assert_eq!(mode.as_str().parse::<OutputMode>().unwrap(), mode);
        }
        assert!("html".parse::<OutputMode>().is_err());
    }

    #[test]
    fn test_serde_uses_kebab_case() {
        let json = serde_json::to_string(&OutputMode::RenderTemplate).unwrap();
        assert_eq!(json, "\"render-template\"");
        let back: OutputMode = serde_yaml::from_str("render-html").unwrap();
        assert_eq!(back, OutputMode::RenderHtml);
    }

    #[test]
    fn test_only_html_preview_highlights() {
        let highlighting: Vec<_> = OutputMode::ALL
            .into_iter()
            .filter(|m| m.highlights_selection())
            .collect();
        assert_eq!(highlighting, vec![OutputMode::RenderHtml]);
    }
}
