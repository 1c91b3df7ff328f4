//! Benchmarks for the per-keystroke source transforms
//!
//! Run with: cargo bench injection

use serde_json::{json, Value};

use jinja_playground::engine::ParseTree;
use jinja_playground::extract::extract_offsets;
use jinja_playground::highlight::{highlight_selection, Selection};
use jinja_playground::marker::inject_markers;

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

fn main() {
    divan::main();
}

const LINE: &str = "<li>{{ item.name }} – {{ item.price }}</li>\n";

fn source(lines: usize) -> String {
    LINE.repeat(lines)
}

/// One node per line, each with a child at the first expression
fn tree(lines: usize) -> ParseTree {
    let children: Vec<Value> = (0..lines)
        .map(|i| {
            let start = i * LINE.len();
            json!({"inner": [
                {"children": [{"inner": [{}, {"start_offset": start + 4, "end_offset": start + 19}]}]},
                {"start_offset": start, "end_offset": start + LINE.len()}
            ]})
        })
        .collect();
    ParseTree::new(json!({"inner": [
        {"children": children},
        {"start_offset": 0, "end_offset": lines * LINE.len()}
    ]}))
}

// ============================================================================
// Span extraction
// ============================================================================

#[divan::bench(args = [10, 100, 1000])]
fn extract(bencher: divan::Bencher, lines: usize) {
    let tree = tree(lines);
    bencher.bench(|| extract_offsets(divan::black_box(&tree)));
}

// ============================================================================
// Marker injection
// ============================================================================

#[divan::bench(args = [10, 100, 1000])]
fn inject(bencher: divan::Bencher, lines: usize) {
    let text = source(lines);
    let offsets = extract_offsets(&tree(lines)).unwrap_or_default();
    bencher.bench(|| inject_markers(divan::black_box(&text), offsets.iter().copied()));
}

// ============================================================================
// Selection highlight
// ============================================================================

#[divan::bench(args = [10, 100, 1000])]
fn highlight_middle_line(bencher: divan::Bencher, lines: usize) {
    let text = source(lines);
    let sel = Selection::new(lines / 2, 4, lines / 2, 19);
    bencher.bench(|| highlight_selection(divan::black_box(&text), Some(&sel)));
}
