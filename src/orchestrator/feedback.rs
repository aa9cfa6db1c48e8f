use ideaforge_common::Evaluation;

/// How many of the weakest dimensions are called out in feedback.
const FOCUS_DIMENSIONS: usize = 2;

/// Condense a rejected evaluation into guidance for the next proposal.
///
/// Parts appear in a fixed order and are joined with `" | "`. Empty lists and
/// a blank killer feature are skipped.
pub fn derive_feedback(evaluation: &Evaluation) -> String {
    let mut parts = Vec::new();

    if !evaluation.weaknesses.is_empty() {
        parts.push(format!(
            "Weaknesses to address: {}",
            evaluation.weaknesses.join(", ")
        ));
    }

    if !evaluation.improvement_suggestions.is_empty() {
        parts.push(format!(
            "Suggestions: {}",
            evaluation.improvement_suggestions.join(", ")
        ));
    }

    if let Some(killer) = evaluation.killer_feature_idea.as_deref()
        && !killer.trim().is_empty()
    {
        parts.push(format!("Killer feature idea: {}", killer));
    }

    let focus: Vec<String> = evaluation
        .scores
        .weakest(FOCUS_DIMENSIONS)
        .into_iter()
        .map(|(name, score)| format!("{} (scored {})", name, score))
        .collect();
    if !focus.is_empty() {
        parts.push(format!("Focus on improving: {}", focus.join(", ")));
    }

    parts.join(" | ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use ideaforge_common::{DimensionScores, Verdict};

    fn evaluation() -> Evaluation {
        Evaluation {
            scores: DimensionScores {
                innovation: 7.0,
                feasibility: 4.0,
                impact: 6.0,
                demo_potential: 8.0,
                technical_depth: 5.0,
                market_fit: 9.0,
            },
            overall_score: 6.0,
            verdict: Verdict::Fail,
            strengths: vec!["clear user".into()],
            weaknesses: vec!["vague data source".into(), "crowded space".into()],
            improvement_suggestions: vec!["narrow the audience".into()],
            killer_feature_idea: Some("offline mode".into()),
            reasoning: String::new(),
            parse_failed: false,
        }
    }

    #[test]
    fn test_all_parts_in_order() {
        let feedback = derive_feedback(&evaluation());
        assert_eq!(
            feedback,
            "Weaknesses to address: vague data source, crowded space | \
             Suggestions: narrow the audience | \
             Killer feature idea: offline mode | \
             Focus on improving: feasibility (scored 4), technical_depth (scored 5)"
        );
    }

    #[test]
    fn test_empty_parts_are_skipped() {
        let mut eval = evaluation();
        eval.weaknesses.clear();
        eval.killer_feature_idea = Some("   ".into());
        let feedback = derive_feedback(&eval);
        assert!(feedback.starts_with("Suggestions: narrow the audience | Focus on improving:"));
        assert!(!feedback.contains("Weaknesses"));
        assert!(!feedback.contains("Killer"));
    }

    #[test]
    fn test_ties_keep_declaration_order() {
        let eval = Evaluation::unparsed("garbage");
        let feedback = derive_feedback(&eval);
        assert!(feedback.ends_with(
            "Focus on improving: innovation (scored 0), feasibility (scored 0)"
        ));
        assert!(feedback.starts_with("Weaknesses to address: Failed to parse evaluation"));
    }

    #[test]
    fn test_fractional_scores_render() {
        let mut eval = evaluation();
        eval.scores.feasibility = 3.5;
        assert!(derive_feedback(&eval).contains("feasibility (scored 3.5)"));
    }
}
