//! Single-shot idea generation: `ideaforge independent`.

use anyhow::{Context, Result};
use console::style;
use ideaforge::agents::build_forge;
use ideaforge::ui::{discovery_spinner, idea_summary};
use std::path::Path;

use super::super::Cli;
use super::load_config;

pub async fn cmd_independent(
    cli: &Cli,
    project_dir: &Path,
    track: &str,
    requirements: &str,
) -> Result<()> {
    let config = load_config(cli, project_dir)?;
    let forge = build_forge(&config)?;

    println!(
        "Idea Forge {} {} ({})",
        style("independent").cyan(),
        style(track).bold(),
        config.model.model_id
    );

    let spinner = discovery_spinner(track);
    let result = forge.run_independent(track, requirements).await;
    spinner.finish_and_clear();
    let response = result?;

    if cli.verbose {
        for line in idea_summary(&response.idea) {
            eprintln!("{}", style(line).dim());
        }
    }

    let json = serde_json::to_string_pretty(&response.idea).context("Failed to format idea")?;
    println!("{}", json);
    Ok(())
}
