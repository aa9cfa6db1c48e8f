//! Shared domain types for Idea Forge.
//!
//! Everything the orchestrator passes between itself, the agents and the
//! transports lives here:
//!
//! | Module       | Contents                                               |
//! |--------------|--------------------------------------------------------|
//! | `idea`       | `IdeaRecord`, `Idea`, `UnparsedIdea`                   |
//! | `evaluation` | `Evaluation`, `DimensionScores`, `Verdict`             |
//! | `event`      | `ProgressEvent`, `Stage`, `RunMode`                    |
//! | `agent`      | `IdeaProposer` / `IdeaCritic` trait seams              |

pub mod agent;
pub mod evaluation;
pub mod event;
pub mod idea;

pub use agent::{IdeaCritic, IdeaProposer, MAX_RECENT_IDEAS};
pub use evaluation::{DimensionScores, Evaluation, Verdict};
pub use event::{ProgressEvent, RunMode, Stage};
pub use idea::{Idea, IdeaRecord, UnparsedIdea};

/// Maximum number of characters of raw model output kept on sentinel records.
pub const RAW_EXCERPT_CHARS: usize = 500;

/// Truncate `text` to at most `max_chars` characters, respecting UTF-8 boundaries.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
