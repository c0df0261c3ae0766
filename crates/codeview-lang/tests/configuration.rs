use codeview_lang::{CommentConfig, LanguageConfigError, LanguageConfiguration};
use pretty_assertions::assert_eq;

#[test]
fn test_presets_describe_comments() {
    let swift = LanguageConfiguration::swift();
    assert_eq!(swift.comments, CommentConfig::line_and_block("//", "/*", "*/"));
    assert!(swift.comments.has_line());
    assert!(swift.comments.has_block());

    let haskell = LanguageConfiguration::haskell();
    assert_eq!(haskell.comments.block_start.as_deref(), Some("{-"));
    assert!(haskell.reserved_identifiers.iter().any(|w| w == "where"));

    let none = LanguageConfiguration::none();
    assert!(!none.comments.has_line());
    assert!(!none.comments.has_block());
    assert_eq!(none.identifier_regex, None);
}

#[test]
fn test_yaml_round_trip_of_preset() {
    let haskell = LanguageConfiguration::haskell();
    let yaml = haskell.to_yaml_string().unwrap();
    assert_eq!(LanguageConfiguration::from_yaml_str(&yaml).unwrap(), haskell);
}

#[test]
fn test_yaml_missing_fields_default() {
    let config = LanguageConfiguration::from_yaml_str("name: Bare\n").unwrap();
    assert_eq!(config.name, "Bare");
    assert_eq!(config.comments, CommentConfig::default());
    assert!(config.reserved_identifiers.is_empty());
}

#[test]
fn test_yaml_block_only_comments() {
    let yaml = "name: Pascal\ncomments:\n  block_start: \"(*\"\n  block_end: \"*)\"\n";
    let config = LanguageConfiguration::from_yaml_str(yaml).unwrap();
    assert_eq!(config.comments, CommentConfig::block("(*", "*)"));
}

#[test]
fn test_yaml_errors_are_reported() {
    let err = LanguageConfiguration::from_yaml_str("reserved_identifiers: 7").unwrap_err();
    assert!(matches!(err, LanguageConfigError::Yaml(_)));

    let err = LanguageConfiguration::from_path("/definitely/not/here.yaml").unwrap_err();
    assert!(matches!(err, LanguageConfigError::Io(_)));
    assert!(err.to_string().starts_with("I/O error"));
}
