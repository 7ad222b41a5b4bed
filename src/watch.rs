/*!
 * Watched-file conversion loop.
 *
 * The watched file has a small header naming the target language and style,
 * a user-editable region between two sentinel lines, and a trailer that
 * receives the converted text:
 *
 * ```text
 * LANGUAGE: english
 * STYLE: formal
 *
 * <WRITE IN BETWEEN THESE TAGS>
 * ...
 * <WRITE IN BETWEEN THESE TAGS>
 *
 * STYLED VERSION:
 * ...
 * ```
 *
 * The loop polls the file, and whenever the body, language or style changes
 * it asks the completion client for a new version and rewrites the trailer.
 */

use anyhow::{Context, Result};
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::app_config::WatchConfig;
use crate::conversion::CompletionClient;
use crate::errors::ParseFailure;

/// Line delimiting the user-editable region, identical at open and close
pub const SENTINEL: &str = "<WRITE IN BETWEEN THESE TAGS>";

/// Marker after which the converted text is written
pub const STYLED_MARKER: &str = "STYLED VERSION:";

const LANGUAGE_TAG: &str = "LANGUAGE:";
const STYLE_TAG: &str = "STYLE:";

/// Parsed content of the watched file
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WatchedFileState {
    pub language: String,
    pub style: String,
    pub body: String,
}

impl WatchedFileState {
    /// Parse the full file content
    ///
    /// Header values are trimmed and lowercased; the body is the trimmed text
    /// strictly between the first sentinel and the next one.
    pub fn parse(content: &str) -> Result<Self, ParseFailure> {
        let mut lines = content.lines();
        let language = header_value(lines.next(), LANGUAGE_TAG)
            .ok_or(ParseFailure::MissingLanguageHeader)?;
        let style = header_value(lines.next(), STYLE_TAG).ok_or(ParseFailure::MissingStyleHeader)?;

        let open = content
            .find(SENTINEL)
            .ok_or(ParseFailure::MissingOpeningSentinel)?;
        let after_open = &content[open + SENTINEL.len()..];
        let close = after_open
            .find(SENTINEL)
            .ok_or(ParseFailure::MissingClosingSentinel)?;

        Ok(Self {
            language,
            style,
            body: after_open[..close].trim().to_string(),
        })
    }

    /// Parse, falling back to `defaults` with an empty body on failure
    pub fn parse_or_default(content: &str, defaults: &WatchConfig) -> Self {
        Self::parse(content).unwrap_or_else(|failure| {
            debug!("Watched file not parsable ({}), using defaults", failure);
            Self {
                language: defaults.default_language.clone(),
                style: defaults.default_style.clone(),
                body: String::new(),
            }
        })
    }
}

fn header_value(line: Option<&str>, tag: &str) -> Option<String> {
    let value = line?.trim().strip_prefix(tag)?;
    Some(value.trim().to_lowercase())
}

/// Initial file content written when the loop starts
pub fn template(language: &str, style: &str) -> String {
    format!(
        "{} {}\n{} {}\n\n{}\n{}\n\n{}",
        LANGUAGE_TAG, language, STYLE_TAG, style, SENTINEL, SENTINEL, STYLED_MARKER
    )
}

/// Replace everything after the styled marker with `styled`
///
/// Content before the marker is kept byte for byte. A file without the marker
/// gets one appended.
pub fn replace_styled_version(content: &str, styled: &str) -> String {
    let head = match content.find(STYLED_MARKER) {
        Some(idx) => &content[..idx],
        None => content,
    };
    format!("{}{}\n{}", head, STYLED_MARKER, styled)
}

/// System message for a watched-file conversion
pub fn system_message(language: &str, style: &str) -> String {
    format!(
        "You are a precise translator that converts text to {} using {} style. \
         Maintain exact meaning - only change language and tone.",
        language, style
    )
}

/// Instruction placed before the body in the user message, blank line included
pub fn translation_instruction(language: &str, style: &str) -> String {
    format!(
        "Translate the following text into {} using {} style. \
         Preserve the exact meaning and content - only change the language and tone. \
         Do not add, remove, or modify any information:\n\n",
        language, style
    )
}

/// Last observed (body, language, style) triple
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchState {
    last: WatchedFileState,
}

impl WatchState {
    pub fn new(defaults: &WatchConfig) -> Self {
        Self {
            last: WatchedFileState {
                language: defaults.default_language.clone(),
                style: defaults.default_style.clone(),
                body: String::new(),
            },
        }
    }

    pub fn last(&self) -> &WatchedFileState {
        &self.last
    }

    fn has_changed(&self, current: &WatchedFileState) -> bool {
        self.last != *current
    }

    fn observe(&mut self, current: WatchedFileState) {
        self.last = current;
    }
}

/// What a single tick did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing changed since the last tick
    Unchanged,
    /// The body is empty, nothing to convert
    Empty,
    /// The styled section was rewritten
    Converted,
    /// The provider answered with nothing, file left as is
    NoOutput,
    /// The provider call failed, file left as is
    ConversionFailed(String),
}

/// Polls the watched file and republishes the converted text
#[derive(Debug)]
pub struct FileWatcher {
    path: PathBuf,
    config: WatchConfig,
    client: CompletionClient,
    state: WatchState,
}

impl FileWatcher {
    pub fn new(config: WatchConfig, client: CompletionClient) -> Self {
        let state = WatchState::new(&config);
        Self {
            path: config.file_path.clone(),
            config,
            client,
            state,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn state(&self) -> &WatchState {
        &self.state
    }

    /// Overwrite the watched file with the empty template
    pub async fn reset_file(&self) -> Result<()> {
        let content = template(&self.config.default_language, &self.config.default_style);
        tokio::fs::write(&self.path, content)
            .await
            .with_context(|| format!("Failed to reset watched file: {}", self.path.display()))?;
        info!("File {} cleared and reset to initial state", self.path.display());
        Ok(())
    }

    /// Run one poll cycle
    ///
    /// I/O errors are returned; provider failures are reported in the outcome.
    /// The observed triple is updated after every conversion attempt, so a
    /// failing conversion is not retried until the file changes again.
    pub async fn tick(&mut self) -> Result<TickOutcome> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read watched file: {}", self.path.display()))?;
        let current = WatchedFileState::parse_or_default(&content, &self.config);

        if !self.state.has_changed(&current) {
            return Ok(TickOutcome::Unchanged);
        }
        if current.body.trim().is_empty() {
            return Ok(TickOutcome::Empty);
        }

        info!("Converting to {} style in {}...", current.style, current.language);
        let result = self
            .client
            .complete(
                &system_message(&current.language, &current.style),
                &translation_instruction(&current.language, &current.style),
                &current.body,
            )
            .await;

        let outcome = match result {
            Ok(styled) if styled.is_empty() => {
                warn!("Conversion returned no text, leaving file untouched");
                TickOutcome::NoOutput
            }
            Ok(styled) => {
                self.write_styled(&styled).await?;
                info!(
                    "Successfully translated to {} style in {}",
                    current.style, current.language
                );
                TickOutcome::Converted
            }
            Err(e) => {
                error!("Error in translation: {}", e);
                TickOutcome::ConversionFailed(e.to_string())
            }
        };

        self.state.observe(current);
        Ok(outcome)
    }

    async fn write_styled(&self, styled: &str) -> Result<()> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to re-read watched file: {}", self.path.display()))?;
        tokio::fs::write(&self.path, replace_styled_version(&content, styled))
            .await
            .with_context(|| format!("Failed to update styled version: {}", self.path.display()))?;
        Ok(())
    }

    /// Reset the file and poll it forever
    ///
    /// Errors inside a tick are logged and the loop carries on.
    pub async fn run(mut self) -> Result<()> {
        info!("Starting style converter on {}", self.path.display());
        self.reset_file().await?;

        let interval = self.interval();
        loop {
            if let Err(e) = self.tick().await {
                error!("Error in watch loop: {:#}", e);
            }
            tokio::time::sleep(interval).await;
        }
    }

    fn interval(&self) -> Duration {
        self.config.check_interval()
    }
}
