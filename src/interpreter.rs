//! One request, start to finish: clean the problem, build the prompt, ask
//! the completion endpoint, then repair, parse and validate its answer.
//!
//! Requests share nothing. Each call produces its own [`GeometrySchema`] and
//! any ordering or cancellation of concurrent calls is up to the caller.

use crate::config::{Config, Locale};
use crate::error::InterpretResult;
use crate::geometry::GeometrySchema;
use crate::llm::{ChatMessagesClient, CompletionEndpoint};
use crate::postprocessing::parse_answer;
use crate::preprocessing::Preprocessor;
use std::time::Instant;
use tracing::{info, instrument};

pub struct ProblemInterpreter<E: CompletionEndpoint> {
    endpoint: E,
    locale: Locale,
}

impl ProblemInterpreter<ChatMessagesClient> {
    /// Interpreter backed by the HTTP chat-messages client described by `config`.
    pub fn from_config(config: &Config) -> InterpretResult<Self> {
        let client = ChatMessagesClient::new(config)?;
        Ok(Self::new(client, config.locale))
    }
}

impl<E: CompletionEndpoint> ProblemInterpreter<E> {
    pub fn new(endpoint: E, locale: Locale) -> Self {
        Self { endpoint, locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn endpoint(&self) -> &E {
        &self.endpoint
    }

    #[instrument(skip(self, problem), fields(locale = %self.locale))]
    pub async fn interpret(&self, problem: &str) -> InterpretResult<GeometrySchema> {
        let start = Instant::now();

        let prompt = Preprocessor::process(problem, self.locale)?;
        let answer = self.endpoint.complete(&prompt).await?;
        let schema = parse_answer(&answer)?;

        info!(
            geometry_type = %schema.geometry_type(),
            points = schema.points().len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Geometry problem interpreted"
        );
        Ok(schema)
    }
}
