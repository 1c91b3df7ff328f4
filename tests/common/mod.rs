//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::cell::Cell;
use std::collections::BTreeMap;

use serde_json::{json, Value};

use jinja_playground::engine::{
    BlockInstructions, EngineError, Environment, ParseTree, TemplateEngine, TokenStream,
};
use jinja_playground::settings::{SettingsError, SettingsStore};
use jinja_playground::PlaygroundConfig;

/// Byte span object as the engine serializes it
pub fn span(start: usize, end: usize) -> Value {
    json!({"start_offset": start, "end_offset": end})
}

/// A parse tree node covering `[start, end)` with the given children
pub fn node(start: usize, end: usize, children: Vec<Value>) -> Value {
    json!({"inner": [{"children": children}, span(start, end)]})
}

/// Engine with scripted analysis results
///
/// Rendering echoes the loaded template source unless `render_error` is
/// set, so tests can see exactly what reached the engine.
#[derive(Default)]
pub struct FakeEngine {
    pub tree: Option<ParseTree>,
    pub tokens: TokenStream,
    pub instructions: BlockInstructions,
    pub render_error: Option<EngineError>,
    pub parse_error: Option<EngineError>,
    pub parse_calls: Cell<usize>,
    pub tokenize_calls: Cell<usize>,
    pub instruction_calls: Cell<usize>,
    pub environments: Cell<usize>,
}

impl FakeEngine {
    pub fn with_tree(tree: Value) -> Self {
        Self {
            tree: Some(ParseTree::new(tree)),
            ..Self::default()
        }
    }
}

struct EchoEnvironment {
    templates: BTreeMap<String, String>,
    error: Option<EngineError>,
}

impl Environment for EchoEnvironment {
    fn render(&self, name: &str, _context: &Value) -> Result<String, EngineError> {
        if let Some(err) = &self.error {
            return Err(err.clone());
        }
        self.templates
            .get(name)
            .cloned()
            .ok_or_else(|| EngineError::render(format!("template {name:?} does not exist")))
    }
}

fn bump(counter: &Cell<usize>) {
    counter.set(counter.get() + 1);
}

impl TemplateEngine for FakeEngine {
    fn create_environment(
        &self,
        templates: BTreeMap<String, String>,
        _py_compat: bool,
    ) -> Result<Box<dyn Environment>, EngineError> {
        bump(&self.environments);
        Ok(Box::new(EchoEnvironment {
            templates,
            error: self.render_error.clone(),
        }))
    }

    fn parse(&self, _source: &str) -> Result<ParseTree, EngineError> {
        bump(&self.parse_calls);
        if let Some(err) = &self.parse_error {
            return Err(err.clone());
        }
        Ok(self
            .tree
            .clone()
            .unwrap_or_else(|| ParseTree::new(json!({"stmt": "Template"}))))
    }

    fn tokenize(&self, _source: &str) -> Result<TokenStream, EngineError> {
        bump(&self.tokenize_calls);
        Ok(self.tokens.clone())
    }

    fn instructions(&self, _source: &str) -> Result<BlockInstructions, EngineError> {
        bump(&self.instruction_calls);
        Ok(self.instructions.clone())
    }
}

/// Settings store whose writes always fail
#[derive(Debug, Default)]
pub struct FailingSettings {
    pub attempts: usize,
}

impl SettingsStore for FailingSettings {
    fn get(&self, _key: &str, default: Value) -> Value {
        default
    }

    fn set(&mut self, _key: &str, _value: Value) -> Result<(), SettingsError> {
        self.attempts += 1;
        Err(SettingsError::NoLocation)
    }
}

/// Config without markers or boilerplate, so rendered text equals the
/// template the engine received
pub fn plain_config() -> PlaygroundConfig {
    PlaygroundConfig {
        inject_markers: false,
        boilerplate: String::new(),
        ..PlaygroundConfig::default()
    }
}
