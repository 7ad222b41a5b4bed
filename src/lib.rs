/*!
 * # stylecast - text style, voice and language conversion
 *
 * A Rust library and service that rewrites text in a chosen voice (historical
 * era, fictional character), formality register or target language by
 * delegating the rewriting to a chat completion API.
 *
 * ## Features
 *
 * - Voice prompt table with free-text custom voices
 * - Formality/language prompt assembly
 * - HTTP endpoint (`POST /convert`) with a small embedded front-end
 * - Watched-file mode that republishes a styled version of a text file
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `conversion`: Prompt building and the completion client:
 *   - `conversion::prompts`: Voice prompt table
 *   - `conversion::assembler`: Formality and language prompts
 *   - `conversion::client`: Completion client shared by both entry points
 * - `providers`: Completion provider seam:
 *   - `providers::openai`: OpenAI-compatible API client
 *   - `providers::mock`: Deterministic provider for tests
 * - `server`: axum router and HTTP handlers
 * - `watch`: Watched-file polling loop
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod conversion;
pub mod errors;
pub mod providers;
pub mod server;
pub mod watch;

// Re-export main types for easier usage
pub use app_config::Config;
pub use conversion::{CompletionClient, ConversionRequest, OutputCleaning};
pub use errors::{AppError, ConversionError, ParseFailure, ProviderError};
pub use watch::FileWatcher;
