//! MiniJinja-backed engine

use std::collections::BTreeMap;

use minijinja::machinery::{self as mj, WhitespaceConfig};
use minijinja::syntax::SyntaxConfig;
use minijinja::ErrorKind;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::{
    BlockInstructions, EngineError, EngineErrorKind, Environment, Instruction, ParseTree,
    TemplateEngine, Token, TokenStream,
};
use crate::span::LineSpan;

const FILENAME: &str = "<string>";
const ROOT_BLOCK: &str = "<root>";

/// Engine adapter over `minijinja` and its parser/compiler machinery
#[derive(Debug, Default, Clone, Copy)]
pub struct MiniJinjaEngine;

impl MiniJinjaEngine {
    pub fn new() -> Self {
        Self
    }
}

struct MiniJinjaEnvironment {
    env: minijinja::Environment<'static>,
}

impl Environment for MiniJinjaEnvironment {
    fn render(&self, name: &str, context: &Value) -> Result<String, EngineError> {
        let template = self.env.get_template(name)?;
        Ok(template.render(context)?)
    }
}

impl From<minijinja::Error> for EngineError {
    fn from(err: minijinja::Error) -> Self {
        let kind = match err.kind() {
            ErrorKind::SyntaxError => EngineErrorKind::Syntax,
            _ => EngineErrorKind::Render,
        };
        EngineError::new(kind, format!("{err:#}"))
    }
}

impl TemplateEngine for MiniJinjaEngine {
    fn create_environment(
        &self,
        templates: BTreeMap<String, String>,
        py_compat: bool,
    ) -> Result<Box<dyn Environment>, EngineError> {
        let mut env = minijinja::Environment::new();
        if py_compat {
            env.set_unknown_method_callback(minijinja_contrib::pycompat::unknown_method_callback);
        }
        for (name, source) in templates {
            env.add_template_owned(name, source)?;
        }
        Ok(Box::new(MiniJinjaEnvironment { env }))
    }

    fn parse(&self, source: &str) -> Result<ParseTree, EngineError> {
        let ast = mj::parse(
            source,
            FILENAME,
            SyntaxConfig::default(),
            WhitespaceConfig::default(),
        )?;
        Ok(ParseTree::new(to_json(&ast)?))
    }

    fn tokenize(&self, source: &str) -> Result<TokenStream, EngineError> {
        mj::tokenize(
            source,
            false,
            SyntaxConfig::default(),
            WhitespaceConfig::default(),
        )
        .map(|item| -> Result<(Token, LineSpan), EngineError> {
            let (token, span) = item?;
            let token: Token = convert(&token)?;
            let span: LineSpan = convert(&span)?;
            Ok((token, span))
        })
        .collect()
    }

    fn instructions(&self, source: &str) -> Result<BlockInstructions, EngineError> {
        let ast = mj::parse(
            source,
            FILENAME,
            SyntaxConfig::default(),
            WhitespaceConfig::default(),
        )?;
        let mut codegen = mj::CodeGenerator::new(FILENAME, source);
        codegen.compile_stmt(&ast);
        let (root, blocks) = codegen.finish();

        let mut all = BlockInstructions::new();
        all.insert(ROOT_BLOCK.to_string(), collect(&root)?);
        for (name, block) in blocks.iter() {
            all.insert(name.to_string(), collect(block)?);
        }
        Ok(all)
    }
}

fn collect(instructions: &mj::Instructions<'_>) -> Result<Vec<Instruction>, EngineError> {
    (0u32..)
        .map_while(|idx| instructions.get(idx))
        .map(|instr| convert(instr))
        .collect()
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<Value, EngineError> {
    serde_json::to_value(value).map_err(|e| EngineError::syntax(e.to_string()))
}

/// Re-read an engine value through its serde form (`{name, payload}` for
/// tokens, `{op, arg}` for instructions)
fn convert<S: Serialize + ?Sized, T: DeserializeOwned>(value: &S) -> Result<T, EngineError> {
    serde_json::from_value(to_json(value)?).map_err(|e| EngineError::syntax(e.to_string()))
}
