//! Template playground core
//!
//! Keeps several views of one template in sync: rendered output, token
//! stream, parse tree and compiled instructions. The engine producing them
//! sits behind [`engine::TemplateEngine`]; this crate maps positions between
//! source, selection and preview and dispatches each view, following the
//! Elm Architecture pattern for state changes.

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod dispatch;
pub mod engine;
pub mod extract;
pub mod format;
pub mod highlight;
pub mod marker;
pub mod messages;
pub mod mode;
pub mod model;
pub mod runtime;
pub mod settings;
pub mod span;
pub mod subscription;
pub mod tracing;
pub mod update;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::PlaygroundConfig;
pub use dispatch::{Dispatcher, OutputRecord, ResolveError};
pub use engine::{MiniJinjaEngine, TemplateEngine};
pub use messages::Msg;
pub use mode::OutputMode;
pub use model::PlaygroundModel;
pub use runtime::Playground;
