pub mod icons;
pub mod progress;

pub use progress::{ForgeUI, discovery_spinner, event_header, idea_summary, score_line};
