use ideaforge_common::{Evaluation, Idea, IdeaRecord};
use regex::Regex;
use std::sync::LazyLock;

static JSON_OBJECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{.*\}").expect("valid regex"));

/// The widest `{ ... }` span in a model reply: first `{` to last `}`.
///
/// Models often wrap JSON in prose or code fences; this strips both.
pub fn extract_json_object(text: &str) -> Option<&str> {
    JSON_OBJECT.find(text).map(|m| m.as_str())
}

/// Parse a proposer reply. Anything that is not a complete idea object
/// becomes the unparsed sentinel.
pub fn parse_idea(reply: &str) -> IdeaRecord {
    extract_json_object(reply)
        .and_then(|json| serde_json::from_str::<Idea>(json).ok())
        .map(IdeaRecord::Proposed)
        .unwrap_or_else(|| IdeaRecord::unparsed(reply))
}

/// Parse a critic reply and re-derive its verdict from the score.
///
/// The reply's own verdict is ignored, so an unexpected verdict string does
/// not make an otherwise valid evaluation unusable.
pub fn parse_evaluation(reply: &str, threshold: u8) -> Evaluation {
    let parsed = extract_json_object(reply)
        .and_then(|json| serde_json::from_str::<serde_json::Value>(json).ok())
        .and_then(|mut value| {
            if let Some(obj) = value.as_object_mut() {
                obj.remove("verdict");
            }
            serde_json::from_value::<Evaluation>(value).ok()
        });

    match parsed {
        Some(evaluation) => evaluation.with_verdict_for(threshold),
        None => Evaluation::unparsed(reply),
    }
}
