use crate::ui::icons::{CHECK, CLOCK, CROSS, JUDGE, RETRY, SEARCH, SPARKLE, STOP, TROPHY};
use console::{Emoji, style};
use ideaforge_common::{Evaluation, IdeaRecord, ProgressEvent, Stage};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::time::Duration;

const WRAP_WIDTH: usize = 88;

/// `[Iteration n] STAGE` header printed for every event.
pub fn event_header(event: &ProgressEvent) -> String {
    format!(
        "[Iteration {}] {}",
        event.iteration,
        event.stage.as_str().to_uppercase()
    )
}

/// `Score: 7.5/10 | Verdict: PASS`
pub fn score_line(evaluation: &Evaluation) -> String {
    format!(
        "Score: {}/10 | Verdict: {}",
        evaluation.overall_score, evaluation.verdict
    )
}

/// Short human-readable description of an idea, wrapped for the terminal.
pub fn idea_summary(idea: &IdeaRecord) -> Vec<String> {
    match idea {
        IdeaRecord::Proposed(idea) => {
            let mut lines = vec![format!("Idea: {}", idea.title)];
            for (label, text) in [("Problem", &idea.problem), ("Solution", &idea.solution)] {
                let options = textwrap::Options::new(WRAP_WIDTH)
                    .initial_indent("  ")
                    .subsequent_indent("    ");
                lines.extend(
                    textwrap::wrap(&format!("{}: {}", label, text), options)
                        .into_iter()
                        .map(|l| l.into_owned()),
                );
            }
            if !idea.tech_stack.is_empty() {
                lines.push(format!("  Stack: {}", idea.tech_stack.join(", ")));
            }
            lines
        }
        IdeaRecord::Unparsed(unparsed) => vec![format!("Idea: {} ({})", unparsed.title, unparsed.reason)],
    }
}

fn stage_icon(stage: Stage) -> Emoji<'static, 'static> {
    match stage {
        Stage::Researching => SEARCH,
        Stage::Evaluating => JUDGE,
        Stage::Rejected => RETRY,
        Stage::Complete => TROPHY,
        Stage::MaxIterations => CLOCK,
        Stage::Interrupted => STOP,
        Stage::Error => CROSS,
    }
}

/// Terminal UI for a depth run, rendered via `indicatif`.
///
/// One bar tracks iterations against the cap; event lines are printed above
/// it so the bar stays at the bottom of the terminal.
pub struct ForgeUI {
    multi: MultiProgress,
    iteration_bar: ProgressBar,
    verbose: bool,
}

impl ForgeUI {
    pub fn new(max_iterations: u32, verbose: bool) -> Self {
        let multi = MultiProgress::new();

        let style = ProgressStyle::default_bar()
            .template("{prefix:.bold.dim} {spinner} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .expect("progress bar template is a valid static string")
            .progress_chars("█▓▒░");

        let iteration_bar = multi.add(ProgressBar::new(u64::from(max_iterations)));
        iteration_bar.set_style(style);
        iteration_bar.set_prefix("Iterations");
        iteration_bar.enable_steady_tick(Duration::from_millis(100));

        Self {
            multi,
            iteration_bar,
            verbose,
        }
    }

    /// Print a line via `MultiProgress`, falling back to `eprintln!`.
    fn print_line(&self, msg: impl AsRef<str>) {
        if self.multi.println(msg.as_ref()).is_err() {
            eprintln!("{}", msg.as_ref());
        }
    }

    pub fn on_event(&self, event: &ProgressEvent) {
        let icon = stage_icon(event.stage);
        self.print_line(format!(
            "\n{}{}",
            icon,
            style(event_header(event)).bold()
        ));
        self.print_line(format!("  {}", event.message));

        match event.stage {
            Stage::Researching => {
                self.iteration_bar.set_message("researching");
            }
            Stage::Evaluating => {
                self.iteration_bar.set_message("evaluating");
                if let Some(idea) = &event.idea {
                    for line in idea_summary(idea) {
                        self.print_line(format!("  {}", style(line).dim()));
                    }
                }
            }
            Stage::Rejected => {
                self.iteration_bar.inc(1);
                if let Some(eval) = &event.evaluation {
                    self.print_line(format!("  {}{}", CROSS, style(score_line(eval)).red()));
                    if self.verbose && !eval.weaknesses.is_empty() {
                        self.print_line(format!(
                            "    {}",
                            style(format!("Weaknesses: {}", eval.weaknesses.join("; "))).dim()
                        ));
                    }
                }
            }
            Stage::Complete => {
                self.iteration_bar.inc(1);
                if let Some(eval) = &event.evaluation {
                    self.print_line(format!("  {}{}", CHECK, style(score_line(eval)).green()));
                }
            }
            Stage::MaxIterations => {
                if let Some(eval) = &event.evaluation {
                    self.print_line(format!("  {}{}", SPARKLE, style(score_line(eval)).yellow()));
                }
            }
            Stage::Interrupted => {}
            Stage::Error => {
                if let Some(err) = &event.error {
                    self.print_line(format!("  {}", style(err).red()));
                }
            }
        }

        if event.is_terminal() {
            self.finish();
        }
    }

    pub fn finish(&self) {
        self.iteration_bar.finish_and_clear();
    }
}

/// Spinner shown while a single-shot independent run is in flight.
pub fn discovery_spinner(track: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner} {msg} {elapsed:.dim}")
            .expect("progress bar template is a valid static string"),
    );
    spinner.set_message(format!("{}Researching problems in {}...", SEARCH, track));
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
