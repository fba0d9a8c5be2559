pub mod cleaner;
pub mod templates;

pub use cleaner::{Cleaner, CleanerError};
pub use templates::{geometry_prompt, EXAMPLE_SCHEMA};

use crate::config::Locale;

pub struct Preprocessor;

impl Preprocessor {
    /// Cleans the problem text and wraps it in the prompt template. Fails
    /// before anything touches the network when the text is blank.
    pub fn process(input: &str, locale: Locale) -> Result<String, CleanerError> {
        let cleaned = Cleaner::clean(input)?;
        Ok(geometry_prompt(&cleaned, locale))
    }
}
