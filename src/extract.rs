//! Span extraction from engine parse trees
//!
//! Walks the tree in pre-order: a node contributes its own span, then the
//! spans of each child in order. Only nodes carrying an `inner` pair take
//! part; anything else is a leaf.

use serde_json::Value;
use thiserror::Error;

use crate::engine::ParseTree;
use crate::span::ByteSpan;

const INNER: &str = "inner";
const CHILDREN: &str = "children";

/// The tree did not have the shape the extractor relies on
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("malformed parse tree at {path}: `inner` must be a [node, span] pair")]
    MalformedInner { path: String },
    #[error("malformed parse tree at {path}: span lacks byte offsets ({reason})")]
    MalformedSpan { path: String, reason: String },
    #[error("malformed parse tree at {path}: `children` must be a list")]
    MalformedChildren { path: String },
}

/// Collect the byte spans of `tree` in pre-order
pub fn extract_spans(tree: &ParseTree) -> Result<Vec<ByteSpan>, ExtractError> {
    extract_node(tree.root(), "$")
}

/// Start offsets of [`extract_spans`], the positions markers are injected at
pub fn extract_offsets(tree: &ParseTree) -> Result<Vec<usize>, ExtractError> {
    Ok(extract_spans(tree)?
        .into_iter()
        .map(|span| span.start_offset)
        .collect())
}

fn extract_node(node: &Value, path: &str) -> Result<Vec<ByteSpan>, ExtractError> {
    let Some(inner) = node.as_object().and_then(|obj| obj.get(INNER)) else {
        return Ok(Vec::new());
    };

    let inner_path = format!("{path}.{INNER}");
    let (container, span) = match inner.as_array().map(Vec::as_slice) {
        Some([container, span]) => (container, span),
        _ => return Err(ExtractError::MalformedInner { path: inner_path }),
    };

    let span: ByteSpan =
        serde_json::from_value(span.clone()).map_err(|e| ExtractError::MalformedSpan {
            path: format!("{inner_path}[1]"),
            reason: e.to_string(),
        })?;

    let children = match container.as_object().and_then(|obj| obj.get(CHILDREN)) {
        None => &[][..],
        Some(Value::Array(children)) => children.as_slice(),
        Some(_) => {
            return Err(ExtractError::MalformedChildren {
                path: format!("{inner_path}[0].{CHILDREN}"),
            })
        }
    };

    children
        .iter()
        .enumerate()
        .try_fold(vec![span], |mut spans, (idx, child)| {
            let child_path = format!("{inner_path}[0].{CHILDREN}[{idx}]");
            spans.extend(extract_node(child, &child_path)?);
            Ok::<_, ExtractError>(spans)
        })
}
