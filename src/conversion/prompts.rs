/*!
 * Voice prompt table.
 *
 * Maps a (category, key) pair to the instruction that describes a historical
 * era or a character voice. Keys coming from callers are display labels such
 * as "Cave Person Era (Prehistoric)" and are normalised before lookup.
 */

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Placeholder labels the front-end puts in front of free-text voices
const CUSTOM_PLACEHOLDERS: [&str; 2] = ["Custom Historical...", "Custom Character..."];

static PARENTHESES: Lazy<Regex> = Lazy::new(|| Regex::new(r"[()]").expect("static regex"));

static HISTORICAL_PROMPTS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("cave-person-era", "Transform text into primitive caveman speech: drop articles, use 'me' instead of 'I', add grunts (Ugg!), and keep very short with basic words."),
        ("ancient-egyptian", "Use formal, hieroglyphic-inspired language with references to Egyptian deities, pharaohs, and the Nile. Include references to Ra, Horus, and ancient Egyptian customs."),
        ("classical-greek", "Use philosophical and poetic language with references to Greek mythology, the Agora, and democratic ideals. Include references to Zeus, Apollo, and the Greek virtues."),
        ("roman-empire", "Use imperial Roman terminology with Latin phrases. Reference the Senate, legions, and Roman virtues. Use phrases like 'By Jupiter' and reference Roman customs."),
        ("medieval-times", "Use medieval terminology with feudal references. Include mentions of lords, knights, and kingdoms. Use archaic terms like 'thee', 'thou', and period-appropriate expressions."),
        ("renaissance", "Use eloquent Renaissance language with references to art, science, and humanism. Include references to great thinkers and artists of the period."),
        ("victorian-era", "Use formal Victorian English with proper etiquette. Include references to propriety, social customs, and industrial progress. Use elaborate, proper language."),
        ("roaring-20s", "Use Jazz Age slang and speakeasy terminology. Include references to prohibition, flappers, and jazz. Use phrases like 'bee's knees' and 'cat's pajamas'."),
        ("1950s-america", "Use post-war Americana language. Reference suburbia, rock'n'roll, and optimistic prosperity. Include phrases like 'gee whiz' and 'swell'."),
        ("1960s-counterculture", "Use peace-and-love terminology and protest language. Include references to flower power, civil rights, and psychedelic culture. Use phrases like 'far out' and 'groovy'."),
        ("1980s-pop-culture", "Use Valley Girl slang and MTV-era references. Include mentions of malls, video games, and pop culture. Use words like 'totally', 'radical', and 'awesome'."),
        ("1990s-valley-girl", "Use heavy Valley Girl speech patterns. Include 'like', 'totally', 'whatever', and 'as if'. Reference 90s pop culture, fashion, and technology."),
        ("y2k-era", "Use early internet slang and millennium buzz words. Reference dial-up internet, early social media, and Y2K concerns. Use 'lol', 'brb', and early texting language."),
        ("modern-gen-z", "Use current Gen Z slang and internet terminology. Include references to TikTok, memes, and social media culture. Use terms like 'no cap', 'based', and current internet slang."),
    ])
});

static CHARACTER_PROMPTS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("shakespearean", "Speak in theatrical Elizabethan English with poetic flourishes and iambic rhythm."),
        ("yoda", "Speak in Object-Subject-Verb order with 'Hmm' and 'Yes' for emphasis, using wisdom and Force references."),
        ("pirate-captain", "Use pirate slang ('arr', 'matey') with nautical terms and seafaring expressions ('shiver me timbers')."),
        ("royal-decree", "Use formal, regal language with royal pronouns (we/our) and ceremonial terminology."),
        ("mystical-wizard", "Use arcane terminology, magical references, and mysterious, cryptic phrasing."),
    ])
});

/// Labels whose normalised form differs from the table key
static KEY_ALIASES: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| HashMap::from([("cave-person-era-prehistoric", "cave-person-era")]));

/// Which voice table a key belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleCategory {
    Historical,
    Character,
}

impl StyleCategory {
    fn table(self) -> &'static HashMap<&'static str, &'static str> {
        match self {
            Self::Historical => &HISTORICAL_PROMPTS,
            Self::Character => &CHARACTER_PROMPTS,
        }
    }
}

impl fmt::Display for StyleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Historical => write!(f, "historical"),
            Self::Character => write!(f, "character"),
        }
    }
}

impl FromStr for StyleCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_key(s).as_str() {
            "historical" | "historical-voice" => Ok(Self::Historical),
            "character" | "character-voice" => Ok(Self::Character),
            _ => Err(format!("Unknown voice category: {}", s)),
        }
    }
}

/// Normalise a display label into a table key
///
/// Trims, lowercases, turns spaces into hyphens and drops parentheses. Other
/// whitespace is kept, so such keys miss the table.
pub fn normalize_key(key: &str) -> String {
    let hyphenated = key.trim().to_lowercase().replace(' ', "-");
    PARENTHESES.replace_all(&hyphenated, "").into_owned()
}

/// Look up the instruction for `key` in the `category` table
///
/// Keys containing "custom" are treated as free-text voice descriptions and
/// turned into an instruction directly. Unknown keys yield `None`.
pub fn lookup(category: StyleCategory, key: &str) -> Option<String> {
    let normalized = normalize_key(key);
    if normalized.is_empty() {
        return None;
    }

    if normalized.contains("custom") {
        return custom_instruction(key);
    }

    let key = KEY_ALIASES
        .get(normalized.as_str())
        .copied()
        .unwrap_or(normalized.as_str());
    category.table().get(key).map(|s| s.to_string())
}

fn custom_instruction(raw: &str) -> Option<String> {
    let description = CUSTOM_PLACEHOLDERS
        .iter()
        .fold(raw.to_string(), |acc, placeholder| acc.replace(placeholder, ""));
    let description = description.trim();

    if description.is_empty() {
        None
    } else {
        Some(format!("Transform the text using this voice style: {}", description))
    }
}

/// All keys of a category, sorted
pub fn keys(category: StyleCategory) -> Vec<&'static str> {
    let mut keys: Vec<_> = category.table().keys().copied().collect();
    keys.sort_unstable();
    keys
}
