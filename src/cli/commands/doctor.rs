//! Doctor command - verify credentials and configuration.

use crate::cli::Output;
use crate::config::{LlmSettings, Settings, MODEL_CHOICES};
use console::style;

/// Check result for a single item.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
pub fn run_doctor(settings: &Settings) -> anyhow::Result<()> {
    Output::header("Prata Doctor");
    println!();
    println!("Checking credentials and configuration...\n");

    let mut checks = Vec::new();

    println!("{}", style("API Configuration").bold());
    let groq = check_api_key(
        "GROQ_API_KEY",
        "Get a key at https://console.groq.com and export GROQ_API_KEY='gsk_...'",
    );
    groq.print();
    checks.push(groq);

    let tavily = check_api_key(
        "TAVILY_API_KEY",
        "Get a key at https://tavily.com and export TAVILY_API_KEY='tvly-...'",
    );
    tavily.print();
    checks.push(tavily);

    println!();

    println!("{}", style("Configuration").bold());
    let config_check = check_config_file();
    config_check.print();
    checks.push(config_check);

    let model_check = check_model(settings);
    model_check.print();
    checks.push(model_check);

    println!();

    // Summary
    let errors = checks
        .iter()
        .filter(|c| c.status == CheckStatus::Error)
        .count();
    let warnings = checks
        .iter()
        .filter(|c| c.status == CheckStatus::Warning)
        .count();

    if errors > 0 {
        Output::error(&format!(
            "{} error(s) found. Please fix them before using Prata.",
            errors
        ));
        std::process::exit(1);
    } else if warnings > 0 {
        Output::warning(&format!("All checks passed with {} warning(s).", warnings));
    } else {
        Output::success("All checks passed! Prata is ready to use.");
    }

    Ok(())
}

/// Check if an API key is configured, printing a masked preview.
fn check_api_key(name: &str, hint: &str) -> CheckResult {
    match std::env::var(name) {
        Ok(key) if key.len() > 8 => {
            let masked = format!("{}...{}", &key[..4], &key[key.len() - 4..]);
            CheckResult::ok(name, &masked)
        }
        Ok(key) if !key.is_empty() => CheckResult::warning(name, "set but looks too short", hint),
        _ => CheckResult::error(name, "not set", hint),
    }
}

/// Check if config file exists.
fn check_config_file() -> CheckResult {
    let config_path = Settings::default_config_path();
    if config_path.exists() {
        CheckResult::ok("Config file", &format!("{}", config_path.display()))
    } else {
        CheckResult::warning(
            "Config file",
            "using defaults",
            "Create with: prata config set <key> <value>",
        )
    }
}

/// Check that the configured chat model is a supported choice.
fn check_model(settings: &Settings) -> CheckResult {
    if LlmSettings::is_supported(&settings.llm.model) {
        CheckResult::ok("Chat model", &settings.llm.model)
    } else {
        CheckResult::error(
            "Chat model",
            &format!("'{}' is not a supported choice", settings.llm.model),
            &format!("Pick one of: {}", MODEL_CHOICES.join(", ")),
        )
    }
}
