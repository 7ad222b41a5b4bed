/*!
 * Completion client.
 *
 * Wraps a `Provider` with the rules every conversion shares: skip blank input,
 * send one system and one user message, and clean up the returned text.
 */

use log::{debug, error};
use std::sync::Arc;
use std::time::Instant;

use crate::errors::ProviderError;
use crate::providers::Provider;

/// How the completion text is cleaned before it is returned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputCleaning {
    /// Trim surrounding whitespace
    #[default]
    Trim,
    /// Trim and remove every `"` and `'`
    StripQuotes,
}

impl OutputCleaning {
    pub fn apply(self, text: &str) -> String {
        let trimmed = text.trim();
        match self {
            Self::Trim => trimmed.to_string(),
            Self::StripQuotes => trimmed.replace(['"', '\''], ""),
        }
    }
}

/// Client used by the HTTP handler and the watch loop
#[derive(Debug, Clone)]
pub struct CompletionClient {
    provider: Arc<dyn Provider>,
    cleaning: OutputCleaning,
}

impl CompletionClient {
    pub fn new(provider: Arc<dyn Provider>) -> Self {
        Self {
            provider,
            cleaning: OutputCleaning::default(),
        }
    }

    /// Set the cleaning applied to every completion
    pub fn with_cleaning(mut self, cleaning: OutputCleaning) -> Self {
        self.cleaning = cleaning;
        self
    }

    pub fn cleaning(&self) -> OutputCleaning {
        self.cleaning
    }

    /// Rewrite `text` following `instruction`
    ///
    /// # Arguments
    /// * `system` - Behavioural instruction sent as the system message
    /// * `instruction` - Conversion instruction placed before the text, ending
    ///   with its own separator
    /// * `text` - Text to transform
    ///
    /// # Returns
    /// * `Ok("")` without calling the provider when `text` is blank
    /// * the cleaned completion, or the provider error unchanged
    pub async fn complete(
        &self,
        system: &str,
        instruction: &str,
        text: &str,
    ) -> Result<String, ProviderError> {
        if text.trim().is_empty() {
            debug!("Skipping completion for blank text");
            return Ok(String::new());
        }

        let user = format!("{}{}", instruction, text);
        let started = Instant::now();
        let raw = self
            .provider
            .complete(system, &user)
            .await
            .inspect_err(|e| error!("Completion failed: {}", e))?;
        debug!("Completion returned {} chars in {:?}", raw.len(), started.elapsed());

        Ok(self.cleaning.apply(&raw))
    }
}
