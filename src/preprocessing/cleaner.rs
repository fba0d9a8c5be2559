use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CleanerError {
    #[error("Input is empty after cleaning")]
    EmptyInput,
    #[error("Input exceeds maximum length: {0}")]
    TooLong(usize),
}

pub struct Cleaner;

impl Cleaner {
    const MAX_LENGTH: usize = 10000;

    /// Trims every line and drops blank ones. Non-ASCII text is kept as-is,
    /// most problems arrive in Chinese.
    pub fn clean(input: &str) -> Result<String, CleanerError> {
        if input.trim().is_empty() {
            return Err(CleanerError::EmptyInput);
        }

        let cleaned = input
            .lines()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n");

        let length = cleaned.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(CleanerError::TooLong(length));
        }

        Ok(cleaned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_rejects_blank_input() {
        assert_eq!(Cleaner::clean(""), Err(CleanerError::EmptyInput));
        assert_eq!(Cleaner::clean("  \n\t "), Err(CleanerError::EmptyInput));
    }

    #[test]
    fn clean_keeps_chinese_text() {
        let cleaned = Cleaner::clean("  在正方体ABCD-A1B1C1D1中，\n\n  E是CC1的中点  ").unwrap();
        assert_eq!(cleaned, "在正方体ABCD-A1B1C1D1中，\nE是CC1的中点");
    }

    #[test]
    fn clean_rejects_oversized_input() {
        let input = "棱".repeat(10001);
        assert_eq!(Cleaner::clean(&input), Err(CleanerError::TooLong(10001)));
    }
}
