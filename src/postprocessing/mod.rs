//! Turns the model's free-form answer into a validated [`GeometrySchema`].
//!
//! ```text
//! answer → extractor (locate {...}) → repair (regex fixes) → serde_json → validator
//! ```

pub mod extractor;
pub mod repair;
pub mod validator;

pub use extractor::extract_json_object;
pub use repair::repair_json;
pub use validator::{validate, ValidationError};

use crate::error::{InterpretError, InterpretResult};
use crate::geometry::GeometrySchema;
use serde_json::Value;
use tracing::{debug, instrument, warn};

#[instrument(skip(answer), fields(answer_len = answer.len()))]
pub fn parse_answer(answer: &str) -> InterpretResult<GeometrySchema> {
    let extracted = extract_json_object(answer).ok_or_else(|| {
        warn!("No JSON object located in model answer");
        InterpretError::Extraction
    })?;

    let repaired = repair_json(extracted);
    if repaired != extracted {
        debug!(
            original_len = extracted.len(),
            repaired_len = repaired.len(),
            "Applied textual repairs to model answer"
        );
    }

    let value: Value = serde_json::from_str(&repaired).map_err(|source| {
        warn!(raw = answer, error = %source, "Model answer is not valid JSON after repair");
        InterpretError::RepairedParse {
            source,
            raw: answer.to_string(),
        }
    })?;

    let schema = validate(&value)?;
    debug!(
        geometry_type = %schema.geometry_type(),
        points = schema.points().len(),
        helper_lines = schema.helper_lines().len(),
        "Model answer validated"
    );
    Ok(schema)
}
