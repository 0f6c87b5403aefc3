//! Config command implementation.

use crate::cli::{ConfigAction, Output};
use crate::config::Settings;
use crate::error::{PrataError, Result};

/// Run the config command.
pub fn run_config(action: &ConfigAction, mut settings: Settings) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let toml_str = toml::to_string_pretty(&settings)
                .map_err(|e| PrataError::Config(format!("Failed to serialize config: {}", e)))?;
            println!("{}", toml_str);
        }

        ConfigAction::Set { key, value } => {
            set_value(&mut settings, key, value)?;
            settings.save()?;
            Output::success(&format!("Set {} = {}", key, value));
            Output::info(&format!(
                "Saved to {}",
                Settings::default_config_path().display()
            ));
        }

        ConfigAction::Path => {
            let config_path = Settings::default_config_path();
            println!("{}", config_path.display());
        }
    }

    Ok(())
}

/// Apply a dotted-key assignment to the settings.
fn set_value(settings: &mut Settings, key: &str, value: &str) -> Result<()> {
    let parse_err = |e: &dyn std::fmt::Display| {
        PrataError::InvalidInput(format!("Invalid value for {}: {}", key, e))
    };

    match key {
        "general.log_level" => settings.general.log_level = value.to_string(),
        "llm.model" => settings.llm.model = value.to_string(),
        "llm.temperature" => {
            settings.llm.temperature = value.parse().map_err(|e| parse_err(&e))?
        }
        "transcription.model" => settings.transcription.model = value.to_string(),
        "search.max_results" => {
            settings.search.max_results = value.parse().map_err(|e| parse_err(&e))?
        }
        "agent.max_iterations" => {
            settings.agent.max_iterations = value.parse().map_err(|e| parse_err(&e))?
        }
        "agent.memory_window" => {
            settings.agent.memory_window = value.parse().map_err(|e| parse_err(&e))?
        }
        _ => {
            return Err(PrataError::InvalidInput(format!(
                "Unknown configuration key: {}",
                key
            )))
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_numeric_value() {
        let mut settings = Settings::default();
        set_value(&mut settings, "agent.max_iterations", "7").unwrap();
        assert_eq!(settings.agent.max_iterations, 7);
    }

    #[test]
    fn test_set_unknown_key() {
        let mut settings = Settings::default();
        let err = set_value(&mut settings, "agent.bogus", "1").unwrap_err();
        assert!(matches!(err, PrataError::InvalidInput(_)));
    }

    #[test]
    fn test_set_invalid_number() {
        let mut settings = Settings::default();
        let err = set_value(&mut settings, "search.max_results", "lots").unwrap_err();
        assert!(matches!(err, PrataError::InvalidInput(_)));
    }
}
