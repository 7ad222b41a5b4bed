/*!
 * Text conversion.
 *
 * This module provides:
 * - The voice prompt table (`prompts`)
 * - The formality/language prompt assembler (`assembler`)
 * - The completion client that talks to a provider (`client`)
 * - `ConversionRequest`, the unified request model shared by both HTTP variants
 */

pub mod assembler;
pub mod client;
pub mod prompts;

use serde::Deserialize;

use crate::errors::ConversionError;

pub use assembler::{assemble, compose, language_directive, Formality, ModifierCategory, TargetLanguage};
pub use client::{CompletionClient, OutputCleaning};
pub use prompts::{lookup, normalize_key, StyleCategory};

/// Label placed between the instruction and the text in HTTP conversions
const TEXT_LABEL: &str = "Text to transform:";

const SYSTEM_ROLE: &str = "You are a precise voice and language translator.";
const SYSTEM_RULES: &str =
    "First apply the voice style, then translate if needed. Respond with plain text only, no quotation marks.";

const INVALID_VOICE: &str = "Invalid voice type or specific option selected";
const INVALID_STYLE: &str = "Invalid style or example option selected";

/// A conversion request as posted by the front-end
///
/// Carries the fields of both request variants; which prompt strategy applies
/// is decided by `strategy`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConversionRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub voice_type: Option<String>,
    #[serde(default)]
    pub specific: Option<String>,
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub example: Option<String>,
    #[serde(default)]
    pub target_language: Option<String>,
}

/// How the instruction for a request is built
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptStrategy {
    /// Historical or character voice from the prompt table
    Voice {
        category: StyleCategory,
        specific: String,
    },
    /// Formality register with a voice modifier
    Style {
        style: Formality,
        example: ModifierCategory,
        specific: String,
    },
}

/// A validated request ready to be sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedConversion {
    pub text: String,
    pub target_language: String,
    pub strategy: PromptStrategy,
}

fn present(field: &Option<String>) -> Option<String> {
    field
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

impl ConversionRequest {
    /// Check required fields and pick the prompt strategy
    ///
    /// A request carrying `voice_type` uses the voice strategy and needs
    /// `text`, `voice_type` and `specific`. Otherwise it needs `text`, `style`,
    /// `example` and `specific`, and `style` and `example` must name a known
    /// register and modifier family.
    pub fn prepare(&self) -> Result<PreparedConversion, ConversionError> {
        let text = present(&self.text);
        let target_language = present(&self.target_language).unwrap_or_else(|| "english".to_string());

        if self.voice_type.is_some() {
            let voice_type = present(&self.voice_type);
            let specific = present(&self.specific);
            let missing = missing_fields(&[
                ("text", text.is_some()),
                ("voice_type", voice_type.is_some()),
                ("specific", specific.is_some()),
            ]);
            let (Some(text), Some(voice_type), Some(specific)) = (text, voice_type, specific) else {
                return Err(missing);
            };
            let category = voice_type
                .parse::<StyleCategory>()
                .map_err(|_| ConversionError::validation(INVALID_VOICE))?;
            return Ok(PreparedConversion {
                text,
                target_language,
                strategy: PromptStrategy::Voice { category, specific },
            });
        }

        let style = present(&self.style);
        let example = present(&self.example);
        let specific = present(&self.specific);
        let missing = missing_fields(&[
            ("text", text.is_some()),
            ("style", style.is_some()),
            ("example", example.is_some()),
            ("specific", specific.is_some()),
        ]);
        let (Some(text), Some(style), Some(example), Some(specific)) = (text, style, example, specific)
        else {
            return Err(missing);
        };
        let (Some(style), Some(example)) = (Formality::from_name(&style), ModifierCategory::parse(&example))
        else {
            return Err(ConversionError::validation(INVALID_STYLE));
        };
        Ok(PreparedConversion {
            text,
            target_language,
            strategy: PromptStrategy::Style {
                style,
                example,
                specific,
            },
        })
    }
}

fn missing_fields(fields: &[(&str, bool)]) -> ConversionError {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, ok)| !ok)
        .map(|(name, _)| *name)
        .collect();
    ConversionError::validation(format!("Missing required fields: {}", missing.join(", ")))
}

impl PreparedConversion {
    /// The instruction placed before the text in the user message, ending
    /// with the text label and its line break
    pub fn instruction(&self) -> Result<String, ConversionError> {
        let prompt = match &self.strategy {
            PromptStrategy::Voice { category, specific } => {
                lookup(*category, specific).ok_or_else(|| ConversionError::validation(INVALID_VOICE))?
            }
            PromptStrategy::Style {
                style,
                example,
                specific,
            } => compose(
                *style,
                Some(*example),
                Some(specific.as_str()),
                TargetLanguage::parse(&self.target_language),
            ),
        };
        Ok(format!("{}\n\n{}\n", prompt, TEXT_LABEL))
    }

    /// The system message for this conversion
    ///
    /// Style instructions already end with the language directive, so it is
    /// only added here for voice conversions.
    pub fn system_message(&self) -> String {
        match self.strategy {
            PromptStrategy::Voice { .. } => format!(
                "{} {} {}",
                SYSTEM_ROLE,
                language_directive(&self.target_language),
                SYSTEM_RULES
            ),
            PromptStrategy::Style { .. } => format!("{} {}", SYSTEM_ROLE, SYSTEM_RULES),
        }
    }

    /// Run the conversion through `client`
    pub async fn run(&self, client: &CompletionClient) -> Result<String, ConversionError> {
        let instruction = self.instruction()?;
        let converted = client
            .complete(&self.system_message(), &instruction, &self.text)
            .await?;
        Ok(converted)
    }
}
