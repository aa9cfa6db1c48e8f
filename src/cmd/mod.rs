//! CLI command implementations.
//!
//! Each submodule owns one `Commands` variant:
//!
//! | Module          | Commands handled  |
//! |-----------------|-------------------|
//! | `independent`   | `Independent`     |
//! | `depth`         | `Depth`           |
//! | `serve`         | `Serve`           |
//! | `config`        | `Config`          |

pub mod config;
pub mod depth;
pub mod independent;
pub mod serve;

pub use config::cmd_config;
pub use depth::cmd_depth;
pub use independent::cmd_independent;
pub use serve::cmd_serve;

use anyhow::Result;
use ideaforge::config::Config;
use std::path::Path;

use super::Cli;

/// Load the full runtime configuration for commands that talk to models.
fn load_config(cli: &Cli, project_dir: &Path) -> Result<Config> {
    Config::load(cli.config.as_deref(), project_dir)
}
