/*!
 * Provider implementations for the completion service.
 *
 * This module contains the seam between the conversion logic and the
 * external chat completion API:
 * - OpenAI: OpenAI-compatible `/chat/completions` client
 * - Mock: deterministic provider for tests
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Common trait for completion providers
///
/// Both the HTTP handler and the watch loop only ever see this trait, so
/// either can be driven by a mock in tests.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// Send a system and a user message and return the raw text of the first choice
    ///
    /// # Arguments
    /// * `system` - Behavioural instruction
    /// * `user` - Instruction followed by the text to transform
    ///
    /// # Returns
    /// * `Result<String, ProviderError>` - The generated text or an error
    async fn complete(&self, system: &str, user: &str) -> Result<String, ProviderError>;

    /// Test the connection to the provider
    async fn test_connection(&self) -> Result<(), ProviderError> {
        self.complete("Reply with OK.", "Hello").await.map(|_| ())
    }
}

pub mod mock;
pub mod openai;
