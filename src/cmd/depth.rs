//! Iterative idea refinement: `ideaforge depth`.

use anyhow::{Context, Result, bail};
use console::style;
use ideaforge::agents::build_forge;
use ideaforge::forge_config::{check_max_iterations, check_threshold};
use ideaforge::ui::ForgeUI;
use ideaforge_common::{ProgressEvent, Stage};
use std::path::Path;
use std::sync::Arc;

use super::super::Cli;
use super::load_config;

/// Exit status for a forced quit (128 + SIGINT).
const FORCED_EXIT_CODE: i32 = 130;

/// What a Ctrl-C press does while a depth run is streaming.
#[derive(Debug, PartialEq, Eq)]
enum CtrlC {
    Interrupt,
    ForceQuit,
}

/// The first press asks the run to stop at its next iteration; any later
/// press quits without waiting for in-flight model calls.
fn ctrl_c_action(press: u32) -> CtrlC {
    if press <= 1 {
        CtrlC::Interrupt
    } else {
        CtrlC::ForceQuit
    }
}

fn print_final(event: &ProgressEvent) -> Result<()> {
    let rule = "=".repeat(60);
    if let Some(idea) = &event.idea {
        println!("\n{}\nFINAL RESULT\n{}", rule, rule);
        println!(
            "{}",
            serde_json::to_string_pretty(idea).context("Failed to format idea")?
        );
    }
    if let Some(evaluation) = &event.evaluation {
        println!("\n{}\nEVALUATION\n{}", rule, rule);
        println!(
            "{}",
            serde_json::to_string_pretty(evaluation).context("Failed to format evaluation")?
        );
    }
    Ok(())
}

pub async fn cmd_depth(
    cli: &Cli,
    project_dir: &Path,
    track: &str,
    problem: &str,
    threshold: Option<u8>,
    max_iter: Option<u32>,
) -> Result<()> {
    // Argument bounds are checked before any environment is required.
    if let Some(t) = threshold {
        check_threshold(t).map_err(anyhow::Error::msg)?;
    }
    if let Some(m) = max_iter {
        check_max_iterations(m).map_err(anyhow::Error::msg)?;
    }

    let config = load_config(cli, project_dir)?;
    let threshold = threshold.unwrap_or(config.toml.defaults.threshold);
    let max_iterations = max_iter.unwrap_or(config.toml.defaults.max_iterations);
    check_threshold(threshold).map_err(anyhow::Error::msg)?;
    check_max_iterations(max_iterations).map_err(anyhow::Error::msg)?;

    let forge = Arc::new(build_forge(&config)?);

    println!(
        "Idea Forge {} {} | threshold {}/10 | up to {} iterations ({})",
        style("depth").cyan(),
        style(track).bold(),
        threshold,
        max_iterations,
        config.model.model_id
    );
    println!("{}", style("Press Ctrl-C to stop after the current iteration.").dim());

    let mut events = forge.run_depth(track, problem, threshold, max_iterations)?;

    let interrupter = {
        let forge = Arc::clone(&forge);
        tokio::spawn(async move {
            let mut presses = 0;
            while tokio::signal::ctrl_c().await.is_ok() {
                presses += 1;
                match ctrl_c_action(presses) {
                    CtrlC::Interrupt => {
                        if forge.interrupt() {
                            eprintln!(
                                "\nInterrupt requested; finishing the current iteration \
                                 (Ctrl-C again to quit now)..."
                            );
                        }
                    }
                    CtrlC::ForceQuit => {
                        eprintln!("\nAborted.");
                        std::process::exit(FORCED_EXIT_CODE);
                    }
                }
            }
        })
    };

    let ui = ForgeUI::new(max_iterations, cli.verbose);
    let mut last: Option<ProgressEvent> = None;
    while let Some(event) = events.next_event().await {
        ui.on_event(&event);
        last = Some(event);
    }
    ui.finish();
    interrupter.abort();

    let Some(last) = last else {
        bail!("Run ended without a result");
    };

    match last.stage {
        Stage::Complete | Stage::MaxIterations => print_final(&last)?,
        Stage::Interrupted => {
            let status = forge.status();
            if let Some(snapshot) = status.snapshot() {
                println!(
                    "\nStopped after {} evaluated idea(s).",
                    snapshot.evaluations_count
                );
            }
        }
        Stage::Error => {
            bail!(
                "{}",
                last.error.unwrap_or_else(|| "Run failed".to_string())
            );
        }
        other => bail!("Run ended unexpectedly at stage {}", other),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_ctrl_c_interrupts() {
        assert_eq!(ctrl_c_action(1), CtrlC::Interrupt);
    }

    #[test]
    fn test_repeated_ctrl_c_quits() {
        assert_eq!(ctrl_c_action(2), CtrlC::ForceQuit);
        assert_eq!(ctrl_c_action(5), CtrlC::ForceQuit);
    }
}
