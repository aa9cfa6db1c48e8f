pub mod feedback;
pub mod runner;
pub mod state;

pub use feedback::derive_feedback;
pub use runner::{EVENT_CHANNEL_CAPACITY, EventStream, Forge};
pub use state::{ForgeStatus, IdeaResponse, RunSnapshot, RunState};
