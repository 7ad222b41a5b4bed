/*!
 * Common test utilities for the stylecast test suite
 */

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

use stylecast::app_config::WatchConfig;
use stylecast::conversion::{CompletionClient, OutputCleaning};
use stylecast::providers::mock::MockProvider;
use stylecast::watch::SENTINEL;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Builds watched-file content with the given header values and body
pub fn watched_content(language: &str, style: &str, body: &str) -> String {
    format!(
        "LANGUAGE: {}\nSTYLE: {}\n\n{}\n{}\n{}\n\nSTYLED VERSION:",
        language, style, SENTINEL, body, SENTINEL
    )
}

/// Watch configuration pointing at `path` with a short interval
pub fn watch_config(path: &Path) -> WatchConfig {
    WatchConfig {
        file_path: path.to_path_buf(),
        check_interval_ms: 10,
        ..WatchConfig::default()
    }
}

/// Completion client backed by `provider`
pub fn client_for(provider: &MockProvider, cleaning: OutputCleaning) -> CompletionClient {
    CompletionClient::new(Arc::new(provider.clone())).with_cleaning(cleaning)
}
