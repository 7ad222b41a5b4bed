/*!
 * Style prompt assembly.
 *
 * Builds the instruction for the formality-based conversion: a base register
 * instruction, an optional voice modifier and a target-language directive.
 * Nothing here can fail; unknown inputs fall back to defaults.
 */

use super::prompts::{self, StyleCategory};

/// Formality register selected by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Formality {
    Formal,
    Professional,
    Casual,
    Creative,
    /// Anything unrecognised
    Standard,
}

impl Formality {
    /// Unrecognised styles become `Standard`
    pub fn parse(style: &str) -> Self {
        Self::from_name(style).unwrap_or(Self::Standard)
    }

    /// Only the four named registers; `None` for anything else
    pub fn from_name(style: &str) -> Option<Self> {
        match style.trim().to_lowercase().as_str() {
            "formal" => Some(Self::Formal),
            "professional" => Some(Self::Professional),
            "casual" => Some(Self::Casual),
            "creative" => Some(Self::Creative),
            _ => None,
        }
    }

    pub fn instruction(self) -> &'static str {
        match self {
            Self::Formal => "Rewrite the text in a formal register: complete sentences, precise vocabulary, no contractions and no slang.",
            Self::Professional => "Rewrite the text in a professional business tone: clear, concise, courteous and focused on the point.",
            Self::Casual => "Rewrite the text in a casual, conversational tone: relaxed and friendly, contractions welcome.",
            Self::Creative => "Rewrite the text creatively with vivid imagery and expressive word choice while keeping it readable.",
            Self::Standard => "Rewrite the text in clear, standard language.",
        }
    }
}

/// Voice modifier family named by the `example` field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModifierCategory {
    HistoricalVoice,
    CharacterVoice,
    Storytelling,
}

impl ModifierCategory {
    pub fn parse(example: &str) -> Option<Self> {
        match prompts::normalize_key(example).as_str() {
            "historical-voice" => Some(Self::HistoricalVoice),
            "character-voice" => Some(Self::CharacterVoice),
            "storytelling" => Some(Self::Storytelling),
            _ => None,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::HistoricalVoice => "historical era",
            Self::CharacterVoice => "character",
            Self::Storytelling => "storytelling style",
        }
    }

    fn table(self) -> Option<StyleCategory> {
        match self {
            Self::HistoricalVoice => Some(StyleCategory::Historical),
            Self::CharacterVoice => Some(StyleCategory::Character),
            Self::Storytelling => None,
        }
    }
}

/// Target language of the output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetLanguage {
    English,
    French,
    Spanish,
}

impl TargetLanguage {
    /// Unknown languages keep the text in English
    pub fn parse(language: &str) -> Self {
        match language.trim().to_lowercase().as_str() {
            "french" => Self::French,
            "spanish" => Self::Spanish,
            _ => Self::English,
        }
    }

    pub fn directive(self) -> &'static str {
        match self {
            Self::English => "Keep the text in English.",
            Self::French => {
                "Translate the final result to French. \
                 Make sure to use proper French grammar and accents. \
                 Keep the same style and tone as the original. \
                 Example: 'Where is the bathroom?' in caveman style should become 'Ugh! Où être grotte d'eau?'"
            }
            Self::Spanish => {
                "Translate the final result to Spanish. \
                 Make sure to use proper Spanish grammar and accents. \
                 Keep the same style and tone as the original. \
                 Example: 'Where is the bathroom?' in caveman style should become '¡Ugh! ¿Dónde estar cueva de agua?'"
            }
        }
    }
}

/// Language directive for a free-form language name
pub fn language_directive(target_language: &str) -> &'static str {
    TargetLanguage::parse(target_language).directive()
}

/// Assemble the full instruction for a style conversion
///
/// The modifier clause is only added when `example` names a known modifier
/// family and `specific` is non-empty.
pub fn assemble(
    style: &str,
    example: Option<&str>,
    specific: Option<&str>,
    target_language: &str,
) -> String {
    compose(
        Formality::parse(style),
        example.and_then(ModifierCategory::parse),
        specific,
        TargetLanguage::parse(target_language),
    )
}

/// `assemble` over already parsed selectors
pub fn compose(
    formality: Formality,
    modifier: Option<ModifierCategory>,
    specific: Option<&str>,
    language: TargetLanguage,
) -> String {
    let mut parts = vec![formality.instruction().to_string()];

    let specific = specific.map(str::trim).filter(|s| !s.is_empty());
    if let (Some(category), Some(specific)) = (modifier, specific) {
        parts.push(format!(
            "Additionally, use language typical of the {} {} while preserving meaning.",
            specific,
            category.label()
        ));
        if let Some(voice) = category.table().and_then(|t| prompts::lookup(t, specific)) {
            parts.push(voice);
        }
    }

    parts.push(language.directive().to_string());
    parts.join(" ")
}
