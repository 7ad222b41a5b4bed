/*!
 * Tests for watched file parsing and rendering
 */

use stylecast::app_config::WatchConfig;
use stylecast::errors::ParseFailure;
use stylecast::watch::{
    replace_styled_version, system_message, template, translation_instruction, WatchedFileState,
    SENTINEL,
};

use crate::common::watched_content;

#[test]
fn test_template_withDefaults_shouldMatchExpectedLayout() {
    let expected = "LANGUAGE: english\nSTYLE: formal\n\n<WRITE IN BETWEEN THESE TAGS>\n<WRITE IN BETWEEN THESE TAGS>\n\nSTYLED VERSION:";
    assert_eq!(template("english", "formal"), expected);
}

#[test]
fn test_parse_withValidContent_shouldExtractFields() {
    let content = watched_content("Spanish", " CASUAL ", "Hello, friend");
    let state = WatchedFileState::parse(&content).unwrap();

    assert_eq!(state.language, "spanish");
    assert_eq!(state.style, "casual");
    assert_eq!(state.body, "Hello, friend");
}

#[test]
fn test_parse_withMultilineBody_shouldKeepInnerLines() {
    let content = watched_content("french", "formal", "line one\n\nline two");
    let state = WatchedFileState::parse(&content).unwrap();
    assert_eq!(state.body, "line one\n\nline two");
}

#[test]
fn test_parse_withStyledSection_shouldIgnoreIt() {
    let content = format!("{}\nsome earlier output", watched_content("english", "formal", "Hi"));
    assert_eq!(WatchedFileState::parse(&content).unwrap().body, "Hi");
}

#[test]
fn test_parse_withMissingHeaders_shouldReturnTypedFailure() {
    let no_style = format!("LANGUAGE: english\n\n{}\nHi\n{}", SENTINEL, SENTINEL);
    assert_eq!(WatchedFileState::parse(&no_style), Err(ParseFailure::MissingStyleHeader));

    assert_eq!(WatchedFileState::parse(""), Err(ParseFailure::MissingLanguageHeader));
}

#[test]
fn test_parse_withoutSentinels_shouldReturnTypedFailure() {
    let content = "LANGUAGE: english\nSTYLE: formal\n\nHello\n";
    assert_eq!(
        WatchedFileState::parse(content),
        Err(ParseFailure::MissingOpeningSentinel)
    );
}

#[test]
fn test_parseOrDefault_withGarbage_shouldUseDefaultsAndEmptyBody() {
    let config = WatchConfig::default();
    let state = WatchedFileState::parse_or_default("garbage", &config);

    assert_eq!(state.language, "english");
    assert_eq!(state.style, "formal");
    assert!(state.body.is_empty());
}

#[test]
fn test_replaceStyledVersion_shouldKeepHeadVerbatim() {
    let content = format!("{}\nold output", watched_content("spanish", "casual", "Hello, friend"));
    let head = content.split("STYLED VERSION:").next().unwrap().to_string();

    let updated = replace_styled_version(&content, "¡Hola, amigo!");

    assert!(updated.starts_with(&head));
    assert!(updated.ends_with("STYLED VERSION:\n¡Hola, amigo!"));
    assert!(!updated.contains("old output"));
}

#[test]
fn test_prompts_shouldEmbedLanguageAndStyle() {
    let system = system_message("spanish", "casual");
    let instruction = translation_instruction("spanish", "casual");

    assert!(system.contains("converts text to spanish using casual style"));
    assert!(instruction.starts_with("Translate the following text into spanish using casual style."));
    assert!(instruction.ends_with("Do not add, remove, or modify any information:\n\n"));
}
