pub mod agents;
pub mod config;
pub mod errors;
pub mod forge_config;
pub mod llm;
pub mod logging;
pub mod orchestrator;
pub mod search;
pub mod server;
pub mod ui;

pub use errors::{ConfigError, ForgeError};
pub use orchestrator::{EventStream, Forge, ForgeStatus, IdeaResponse};
