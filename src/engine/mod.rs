//! Template engine boundary
//!
//! The playground never implements template semantics itself. Everything it
//! shows comes from a [`TemplateEngine`]: rendered output, the token stream,
//! the parse tree and the compiled instructions. This module fixes the shape
//! of those values and the error every engine failure is converted into.

mod jinja;

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::span::LineSpan;

pub use jinja::MiniJinjaEngine;

/// Broad classification of an engine failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineErrorKind {
    /// The template source could not be lexed or parsed
    Syntax,
    /// Evaluation failed (undefined values, bad calls, type errors)
    Render,
}

/// Any failure raised by the engine, carrying its display text verbatim
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct EngineError {
    pub kind: EngineErrorKind,
    pub message: String,
}

impl EngineError {
    pub fn new(kind: EngineErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn syntax(message: impl Into<String>) -> Self {
        Self::new(EngineErrorKind::Syntax, message)
    }

    pub fn render(message: impl Into<String>) -> Self {
        Self::new(EngineErrorKind::Render, message)
    }
}

/// Parse tree as produced by the engine
///
/// Nodes are JSON objects. A node that takes part in span extraction has an
/// `inner` pair `[container, span]`; the container may expose `children`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParseTree(Value);

impl ParseTree {
    pub fn new(root: Value) -> Self {
        Self(root)
    }

    pub fn root(&self) -> &Value {
        &self.0
    }
}

/// One lexer token, with an optional payload (identifier name, literal, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
}

impl Token {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            payload: None,
        }
    }

    pub fn with_payload(name: impl Into<String>, payload: Value) -> Self {
        Self {
            name: name.into(),
            payload: Some(payload),
        }
    }
}

/// One compiled VM instruction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    pub op: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arg: Option<Value>,
}

impl Instruction {
    pub fn new(op: impl Into<String>, arg: Option<Value>) -> Self {
        Self {
            op: op.into(),
            arg,
        }
    }
}

/// Token stream in source order
pub type TokenStream = Vec<(Token, LineSpan)>;

/// Instructions keyed by block name, in whatever order the engine produced them
pub type BlockInstructions = HashMap<String, Vec<Instruction>>;

/// A set of loaded templates that can be rendered by name
pub trait Environment {
    fn render(&self, name: &str, context: &Value) -> Result<String, EngineError>;
}

/// The operations the playground consumes from a template engine
///
/// Implementations are expected to be stateless across calls: every call
/// works from the source it is given and nothing is cached between them.
pub trait TemplateEngine {
    /// Build an environment holding `templates`; `py_compat` enables
    /// Python-style method calls on values.
    fn create_environment(
        &self,
        templates: BTreeMap<String, String>,
        py_compat: bool,
    ) -> Result<Box<dyn Environment>, EngineError>;

    fn parse(&self, source: &str) -> Result<ParseTree, EngineError>;

    fn tokenize(&self, source: &str) -> Result<TokenStream, EngineError>;

    fn instructions(&self, source: &str) -> Result<BlockInstructions, EngineError>;
}
