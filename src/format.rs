//! Text rendering of output records
//!
//! Produces what the output pane shows for each view: rendered text as is,
//! tokens and instructions as aligned tables, the parse tree as pretty JSON.

use std::fmt::Write;

use serde_json::Value;

use crate::dispatch::{OutputRecord, ResolveError};
use crate::engine::{Instruction, TokenStream};

/// Format a dispatch result for display
pub fn format_result(result: &Result<OutputRecord, ResolveError>) -> String {
    match result {
        Ok(record) => format_record(record),
        Err(err) => format_error(err),
    }
}

pub fn format_record(record: &OutputRecord) -> String {
    match record {
        OutputRecord::Rendered { text, .. } => text.clone(),
        OutputRecord::Source(text) => text.clone(),
        OutputRecord::Tokens(tokens) => format_tokens(tokens),
        OutputRecord::Ast(tree) => pretty_json(tree.root()),
        OutputRecord::Instructions(blocks) => format_instructions(blocks),
    }
}

pub fn format_error(err: &ResolveError) -> String {
    err.to_string()
}

/// One token per line: name, payload (if any), then its line/column span
pub fn format_tokens(tokens: &TokenStream) -> String {
    let name_width = tokens
        .iter()
        .map(|(token, _)| token.name.len())
        .max()
        .unwrap_or(0);
    let payloads: Vec<String> = tokens
        .iter()
        .map(|(token, _)| token.payload.as_ref().map(compact_json).unwrap_or_default())
        .collect();
    let payload_width = payloads.iter().map(|p| p.chars().count()).max().unwrap_or(0);

    let mut out = String::new();
    for ((token, span), payload) in tokens.iter().zip(&payloads) {
        let _ = writeln!(
            out,
            "{:<name_width$}  {:<payload_width$}  {}",
            token.name, payload, span
        );
    }
    out
}

/// Each block as a `name:` header followed by numbered instructions
pub fn format_instructions(blocks: &[(String, Vec<Instruction>)]) -> String {
    let mut out = String::new();
    for (name, instructions) in blocks {
        let _ = writeln!(out, "{name}:");
        let op_width = instructions.iter().map(|i| i.op.len()).max().unwrap_or(0);
        for (idx, instr) in instructions.iter().enumerate() {
            let arg = instr.arg.as_ref().map(compact_json).unwrap_or_default();
            let line = format!("{idx:>4}  {:<op_width$}  {arg}", instr.op);
            let _ = writeln!(out, "{}", line.trim_end());
        }
    }
    out
}

fn compact_json(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| value.to_string())
}

fn pretty_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{EngineError, ParseTree, Token};
    use crate::span::LineSpan;
    use serde_json::json;

    #[test]
    fn test_tokens_table() {
        let tokens = vec![
            (Token::new("VariableStart"), LineSpan::new(1, 0, 1, 2)),
            (
                Token::with_payload("Ident", json!("x")),
                LineSpan::new(1, 3, 1, 4),
            ),
        ];
        let out = format_tokens(&tokens);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "VariableStart       1:0-1:2");
        assert_eq!(lines[1], "Ident          \"x\"  1:3-1:4");
    }

    #[test]
    fn test_empty_tokens() {
        assert_eq!(format_tokens(&Vec::new()), "");
    }

    #[test]
    fn test_instructions_table() {
        let blocks = vec![(
            "<root>".to_string(),
            vec![
                Instruction::new("Lookup", Some(json!("x"))),
                Instruction::new("Emit", None),
            ],
        )];
        assert_eq!(
            format_instructions(&blocks),
            "<root>:\n   0  Lookup  \"x\"\n   1  Emit\n"
        );
    }

    #[test]
    fn test_ast_is_pretty_json() {
        let record = OutputRecord::Ast(ParseTree::new(json!({"stmt": "Template"})));
        assert_eq!(format_record(&record), "{\n  \"stmt\": \"Template\"\n}");
    }

    #[test]
    fn test_error_is_display_text() {
        let err = ResolveError::from(EngineError::syntax("unexpected end of input"));
        assert_eq!(format_result(&Err(err)), "unexpected end of input");
    }
}
