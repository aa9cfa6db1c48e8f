//! Integration tests for the ideaforge CLI
//!
//! These run the real binary in a scratch directory with provider settings
//! scrubbed from the environment, so nothing here reaches the network.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const PROVIDER_VARS: &[&str] = &[
    "USE_OPENAI",
    "USE_GEMINI",
    "USE_GROQ",
    "OPENAI_API_KEY",
    "GEMINI_API_KEY",
    "GROQ_API_KEY",
    "OPENAI_MODEL",
    "GEMINI_MODEL",
    "GROQ_MODEL",
    "SERPER_API_KEY",
];

/// Helper to create an ideaforge Command with a clean provider environment
fn ideaforge(dir: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("ideaforge");
    cmd.current_dir(dir.path());
    for var in PROVIDER_VARS {
        cmd.env_remove(var);
    }
    cmd.env_remove("IDEAFORGE_LOG");
    cmd
}

fn create_temp_project() -> TempDir {
    TempDir::new().unwrap()
}

fn write_config(dir: &TempDir, contents: &str) {
    fs::write(dir.path().join("ideaforge.toml"), contents).unwrap();
}

// =============================================================================
// Basic CLI Tests
// =============================================================================

mod cli_basics {
    use super::*;

    #[test]
    fn test_ideaforge_help() {
        let dir = create_temp_project();
        ideaforge(&dir)
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("independent"))
            .stdout(predicate::str::contains("depth"))
            .stdout(predicate::str::contains("serve"));
    }

    #[test]
    fn test_ideaforge_version() {
        let dir = create_temp_project();
        ideaforge(&dir)
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("ideaforge"));
    }

    #[test]
    fn test_depth_requires_problem() {
        let dir = create_temp_project();
        ideaforge(&dir)
            .args(["depth", "-t", "health"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("--problem"));
    }

    #[test]
    fn test_serve_cors_flags_conflict() {
        let dir = create_temp_project();
        ideaforge(&dir)
            .args(["serve", "--cors", "--no-cors"])
            .assert()
            .failure();
    }
}

// =============================================================================
// Config Command Tests
// =============================================================================

mod config_command {
    use super::*;

    #[test]
    fn test_config_init_creates_file() {
        let dir = create_temp_project();

        ideaforge(&dir)
            .args(["config", "init"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Created ideaforge.toml"));

        let written = fs::read_to_string(dir.path().join("ideaforge.toml")).unwrap();
        assert!(written.contains("threshold = 7"));
        assert!(written.contains("max_iterations = 10"));
    }

    #[test]
    fn test_config_init_keeps_existing_without_force() {
        let dir = create_temp_project();
        write_config(&dir, "[defaults]\nthreshold = 5\n");

        ideaforge(&dir)
            .args(["config", "init"])
            .assert()
            .success()
            .stdout(predicate::str::contains("already exists"))
            .stdout(predicate::str::contains("--force"));

        let kept = fs::read_to_string(dir.path().join("ideaforge.toml")).unwrap();
        assert_eq!(kept, "[defaults]\nthreshold = 5\n");
    }

    #[test]
    fn test_config_init_force_overwrites() {
        let dir = create_temp_project();
        write_config(&dir, "[defaults]\nthreshold = 5\n");

        ideaforge(&dir)
            .args(["config", "init", "--force"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Created ideaforge.toml"));

        let written = fs::read_to_string(dir.path().join("ideaforge.toml")).unwrap();
        assert!(written.contains("threshold = 7"));
    }

    #[test]
    fn test_config_show_defaults() {
        let dir = create_temp_project();

        ideaforge(&dir)
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("No ideaforge.toml found"))
            .stdout(predicate::str::contains("threshold = 7"))
            .stdout(predicate::str::contains("port = 8000"))
            .stdout(predicate::str::contains("model = not configured"))
            .stdout(predicate::str::contains("search = not configured"));
    }

    #[test]
    fn test_config_show_reads_file() {
        let dir = create_temp_project();
        write_config(&dir, "[defaults]\nthreshold = 8\n\n[server]\nport = 9100\n");

        ideaforge(&dir)
            .arg("config")
            .assert()
            .success()
            .stdout(predicate::str::contains("threshold = 8"))
            .stdout(predicate::str::contains("port = 9100"))
            .stdout(predicate::str::contains("max_iterations = 10"));
    }

    #[test]
    fn test_config_show_explicit_path() {
        let dir = create_temp_project();
        let custom = dir.path().join("custom.toml");
        fs::write(&custom, "[defaults]\nmax_iterations = 4\n").unwrap();

        ideaforge(&dir)
            .args(["--config", custom.to_str().unwrap(), "config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("max_iterations = 4"));
    }

    #[test]
    fn test_config_show_reports_provider() {
        let dir = create_temp_project();

        ideaforge(&dir)
            .args(["config", "show"])
            .env("USE_GROQ", "true")
            .env("GROQ_API_KEY", "test-key")
            .env("SERPER_API_KEY", "test-key")
            .assert()
            .success()
            .stdout(predicate::str::contains("model = groq/"))
            .stdout(predicate::str::contains("search = serper"))
            .stdout(predicate::str::contains("test-key").not());
    }

    #[test]
    fn test_config_validate_without_file() {
        let dir = create_temp_project();

        ideaforge(&dir)
            .args(["config", "validate"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Using defaults (valid)"));
    }

    #[test]
    fn test_config_validate_reports_warnings() {
        let dir = create_temp_project();
        write_config(&dir, "[defaults]\nthreshold = 12\nmax_iterations = 0\n");

        ideaforge(&dir)
            .args(["config", "validate"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Configuration warnings"))
            .stdout(predicate::str::contains("threshold must be between 1 and 9"))
            .stdout(predicate::str::contains("max_iterations must be between 1 and 20"));
    }

    #[test]
    fn test_config_validate_valid_file() {
        let dir = create_temp_project();
        write_config(&dir, "[defaults]\nthreshold = 6\n");

        ideaforge(&dir)
            .args(["config", "validate"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Configuration is valid"));
    }

    #[test]
    fn test_config_malformed_file_fails() {
        let dir = create_temp_project();
        write_config(&dir, "[defaults\nthreshold = ");

        ideaforge(&dir)
            .args(["config", "show"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Failed to parse ideaforge.toml"));
    }
}

// =============================================================================
// Run Command Tests (no provider configured)
// =============================================================================

mod run_commands {
    use super::*;

    #[test]
    fn test_independent_without_provider() {
        let dir = create_temp_project();

        ideaforge(&dir)
            .args(["independent", "-t", "health"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("USE_OPENAI"));
    }

    #[test]
    fn test_independent_with_two_providers() {
        let dir = create_temp_project();

        ideaforge(&dir)
            .args(["independent", "-t", "health"])
            .env("USE_OPENAI", "true")
            .env("USE_GROQ", "true")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Multiple models enabled"));
    }

    #[test]
    fn test_independent_without_api_key() {
        let dir = create_temp_project();

        ideaforge(&dir)
            .args(["independent", "-t", "health"])
            .env("USE_GEMINI", "true")
            .assert()
            .failure()
            .stderr(predicate::str::contains("GEMINI_API_KEY not set"));
    }

    #[test]
    fn test_independent_without_search_key() {
        let dir = create_temp_project();

        ideaforge(&dir)
            .args(["independent", "-t", "health"])
            .env("USE_OPENAI", "true")
            .env("OPENAI_API_KEY", "test-key")
            .assert()
            .failure()
            .stderr(predicate::str::contains("SERPER_API_KEY"));
    }

    #[test]
    fn test_depth_threshold_out_of_range() {
        let dir = create_temp_project();

        ideaforge(&dir)
            .args(["depth", "-t", "health", "-p", "triage", "--threshold", "12"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("threshold must be between 1 and 9, got 12"));
    }

    #[test]
    fn test_depth_zero_iterations() {
        let dir = create_temp_project();

        ideaforge(&dir)
            .args(["depth", "-t", "health", "-p", "triage", "-m", "0"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("max_iterations must be between 1 and 20, got 0"));
    }

    #[test]
    fn test_depth_bounds_checked_before_environment() {
        let dir = create_temp_project();

        // No provider is configured, yet the bounds error wins.
        ideaforge(&dir)
            .args(["depth", "-t", "health", "-p", "triage", "-m", "21"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("max_iterations must be between"))
            .stderr(predicate::str::contains("USE_OPENAI").not());
    }

    #[test]
    fn test_depth_invalid_file_default_rejected() {
        let dir = create_temp_project();
        write_config(&dir, "[defaults]\nthreshold = 10\n");

        ideaforge(&dir)
            .args(["depth", "-t", "health", "-p", "triage"])
            .env("USE_OPENAI", "true")
            .env("OPENAI_API_KEY", "test-key")
            .env("SERPER_API_KEY", "test-key")
            .assert()
            .failure()
            .stderr(predicate::str::contains("threshold must be between 1 and 9, got 10"));
    }
}
