//! Configuration view and validation commands: `ideaforge config`.

use anyhow::Result;
use dialoguer::Confirm;
use ideaforge::config::{ModelConfig, SearchConfig};
use ideaforge::forge_config::{ForgeToml, resolve_config_path};
use std::path::Path;
use std::time::Duration;

use super::super::{Cli, ConfigCommands};

fn print_toml(toml: &ForgeToml) {
    println!("[defaults]");
    println!("  threshold = {}", toml.defaults.threshold);
    println!("  max_iterations = {}", toml.defaults.max_iterations);
    println!();
    println!("[server]");
    println!("  host = \"{}\"", toml.server.host);
    println!("  port = {}", toml.server.port);
    println!("  cors = {}", toml.server.cors);
    println!();
    println!("[model]");
    println!("  timeout_secs = {}", toml.model.timeout_secs);
    println!();
    println!("[search]");
    println!("  num_results = {}", toml.search.num_results);
    println!("  timeout_secs = {}", toml.search.timeout_secs);
    println!();
}

/// Provider and search status from the environment. Never fails; missing
/// settings are reported inline.
fn print_environment(toml: &ForgeToml) {
    println!("Environment:");
    match ModelConfig::from_env(Duration::from_secs(toml.model.timeout_secs)) {
        Ok(model) => println!("  model = {}/{}", model.provider, model.model_id),
        Err(e) => println!("  model = not configured ({})", e),
    }
    match SearchConfig::from_env(
        toml.search.num_results,
        Duration::from_secs(toml.search.timeout_secs),
    ) {
        Ok(_) => println!("  search = serper"),
        Err(e) => println!("  search = not configured ({})", e),
    }
    println!();
}

pub fn cmd_config(cli: &Cli, project_dir: &Path, command: Option<ConfigCommands>) -> Result<()> {
    let config_path = resolve_config_path(cli.config.as_deref(), project_dir);

    match command {
        None | Some(ConfigCommands::Show) => {
            let _ = dotenvy::dotenv();

            println!();
            println!("Idea Forge Configuration");
            println!("========================");
            println!();

            let toml = if config_path.exists() {
                println!("Config file: {}", config_path.display());
                ForgeToml::load(&config_path)?
            } else {
                println!("No ideaforge.toml found at {}", config_path.display());
                println!("Using default configuration.");
                ForgeToml::default()
            };
            println!();

            print_toml(&toml);
            print_environment(&toml);

            if !config_path.exists() {
                println!("Run 'ideaforge config init' to create an ideaforge.toml file.");
                println!();
            }
        }
        Some(ConfigCommands::Validate) => {
            println!();
            println!("Validating configuration...");
            println!();

            if !config_path.exists() {
                println!("No ideaforge.toml found. Using defaults (valid).");
                return Ok(());
            }

            let toml = ForgeToml::load(&config_path)?;
            let warnings = toml.validate();

            if warnings.is_empty() {
                println!("Configuration is valid.");
            } else {
                println!("Configuration warnings:");
                for warning in warnings {
                    println!("  - {}", warning);
                }
            }
            println!();
        }
        Some(ConfigCommands::Init { force }) => {
            if config_path.exists() && !force {
                let overwrite = console::user_attended()
                    && Confirm::new()
                        .with_prompt(format!(
                            "{} already exists. Overwrite it?",
                            config_path.display()
                        ))
                        .default(false)
                        .interact()?;
                if !overwrite {
                    println!("ideaforge.toml already exists at {}", config_path.display());
                    println!("Use --force to overwrite it.");
                    return Ok(());
                }
            }

            ForgeToml::default().save(&config_path)?;

            println!("Created ideaforge.toml at {}", config_path.display());
            println!();
            println!("You can now customize:");
            println!("  - [defaults] threshold, max_iterations");
            println!("  - [server] host, port, cors");
            println!("  - [model] timeout_secs");
            println!("  - [search] num_results, timeout_secs");
            println!();
            println!("Provider selection and API keys are read from the environment or .env:");
            println!("  USE_OPENAI / USE_GEMINI / USE_GROQ, the matching *_API_KEY, SERPER_API_KEY");
            println!();
        }
    }

    Ok(())
}
