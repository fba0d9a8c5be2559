//! Natural-language solid-geometry problems in, validated figure descriptions out.
//!
//! ```text
//! problem text → preprocessing (prompt) → llm (completion API)
//!              → postprocessing (extract, repair, validate) → GeometrySchema
//! ```
//!
//! Rendering the resulting [`GeometrySchema`] is left to the caller.

pub mod config;
pub mod error;
pub mod geometry;
pub mod interpreter;
pub mod llm;
pub mod postprocessing;
pub mod preprocessing;

pub use config::{Config, ConfigError, Locale};
pub use error::{InterpretError, InterpretResult};
pub use geometry::{Dimensions, GeometrySchema, GeometryType, HelperLine, Point};
pub use interpreter::ProblemInterpreter;
pub use llm::{ChatMessagesClient, CompletionEndpoint};

/// Interprets one problem against the chat-messages API described by `config`.
pub async fn analyze_geometry_problem(
    config: &Config,
    problem: &str,
) -> InterpretResult<GeometrySchema> {
    ProblemInterpreter::from_config(config)?
        .interpret(problem)
        .await
}
