//! Pre-flight checks before starting a session.
//!
//! Validates that the required API credentials are present before any
//! request is made, so missing configuration fails up front with a clear
//! message instead of midway through a conversation.

use crate::error::{PrataError, Result};

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Chat needs the model, transcription, and search services.
    Chat,
    /// Direct search needs only the search service.
    Search,
    /// Transcription needs only the model service key.
    Transcribe,
}

/// Run pre-flight checks for the given operation.
///
/// Returns Ok(()) if all checks pass, or an error describing what's missing.
pub fn check(operation: Operation) -> Result<()> {
    match operation {
        Operation::Chat => {
            check_key("GROQ_API_KEY", "export GROQ_API_KEY='gsk_...'")?;
            check_key("TAVILY_API_KEY", "export TAVILY_API_KEY='tvly-...'")?;
        }
        Operation::Search => {
            check_key("TAVILY_API_KEY", "export TAVILY_API_KEY='tvly-...'")?;
        }
        Operation::Transcribe => {
            check_key("GROQ_API_KEY", "export GROQ_API_KEY='gsk_...'")?;
        }
    }
    Ok(())
}

/// Check that an API key environment variable is set and non-empty.
fn check_key(name: &str, hint: &str) -> Result<()> {
    match std::env::var(name) {
        Ok(key) if !key.is_empty() => Ok(()),
        Ok(_) => Err(PrataError::Config(format!(
            "{} is empty. Set it with: {}",
            name, hint
        ))),
        Err(_) => Err(PrataError::Config(format!(
            "{} not set. Set it with: {}",
            name, hint
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_is_a_config_error() {
        let err = check_key("PRATA_TEST_KEY_THAT_IS_NEVER_SET", "export ...").unwrap_err();
        assert!(matches!(err, PrataError::Config(_)));
        assert!(err.to_string().contains("PRATA_TEST_KEY_THAT_IS_NEVER_SET"));
    }
}
