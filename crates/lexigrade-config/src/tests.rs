//! Tests for Lexigrade configuration.

use std::collections::HashMap;

use super::*;

#[test]
fn test_defaults_match_calibrated_constants() {
    let config = LexigradeConfig::default();

    assert_eq!(config.lexical.cost_budget(CefrLevel::A1), 0.0);
    assert_eq!(config.lexical.cost_budget(CefrLevel::C2), 999.0);
    assert_eq!(config.lexical.difficult_word_threshold(CefrLevel::A2), 0.15);
    assert_eq!(config.lexical.morphology_threshold(CefrLevel::B2), 0.30);
    assert_eq!(config.syntactic.clause_limit(CefrLevel::B1), 2);
    assert_eq!(config.syntactic.word_length_limit(CefrLevel::C1), 6.5);
    assert_eq!(config.rarity.top_k, 5);
    assert_eq!(config.classifier.window_size, 2);
    assert_eq!(config.flow.max_retries, 2);
    assert_eq!(config.flow.soft_min_pass_ratio, 0.6);
    assert_eq!(config.services.generator_model, "lexigrade-generator");
    assert!(config.validate().is_ok());
}

#[test]
fn test_toml_parsing() {
    let toml = r#"
        [resources]
        datasets_path = "/srv/lexigrade"
        excluded_entities = ["PERSON"]

        [syntactic.clause_limits]
        A1 = 2

        [classifier]
        window_size = 3

        [classifier.strategies]
        english = "metric"

        [services]
        classifier_url = "http://classifier:8000/logits"
    "#;

    let config = LexigradeConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.resources.datasets_path, PathBuf::from("/srv/lexigrade"));
    assert_eq!(config.resources.excluded_entities.types(), ["PERSON".to_string()]);
    assert_eq!(config.syntactic.clause_limit(CefrLevel::A1), 2);
    assert_eq!(config.classifier.window_size, 3);
    assert_eq!(
        config.classifier.strategies.for_language(Language::English),
        ClassifierStrategy::Metric
    );
    assert_eq!(
        config.services.classifier_url.as_deref(),
        Some("http://classifier:8000/logits")
    );
}

#[test]
fn test_partial_level_table_falls_back_to_loosest_limit() {
    let config = LexigradeConfig::from_toml_str(
        r#"
        [lexical.difficult_word_thresholds]
        A1 = 0.1
        B1 = 0.3
        "#,
    )
    .unwrap();

    assert_eq!(config.lexical.difficult_word_threshold(CefrLevel::A1), 0.1);
    assert_eq!(config.lexical.difficult_word_threshold(CefrLevel::A2), 0.3);
    assert_eq!(config.lexical.difficult_word_threshold(CefrLevel::C2), 0.3);
}

#[test]
fn test_unknown_level_key_is_rejected() {
    let result = LexigradeConfig::from_toml_str(
        r#"
        [lexical.cost_budgets]
        D1 = 4.0
        "#,
    );
    assert!(matches!(result, Err(ConfigError::Toml(_))));
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        flow:
          max_retries: 3
          chunk_max_words: 60
        classifier:
          weights:
            english:
              rarity: 0.5
              syntax: 0.3
              morphology: 0.1
              difficult_words: 0.1
    "#;

    let config = LexigradeConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.flow.max_retries, 3);
    assert_eq!(config.flow.chunk_max_words, 60);
    assert_eq!(config.classifier.weights.english.rarity, 0.5);
    assert_eq!(config.classifier.weights.other.syntax, 0.45);
}

#[test]
fn test_validation_rejects_bad_values() {
    let result = LexigradeConfig::from_toml_str("[flow]\nsoft_min_pass_ratio = 1.5\n");
    assert!(matches!(result, Err(ConfigError::Invalid(_))));

    let result = LexigradeConfig::from_toml_str("[classifier]\nwindow_size = 0\n");
    assert!(matches!(result, Err(ConfigError::Invalid(_))));
}

#[test]
fn test_overrides_from_lookup() {
    let vars: HashMap<&str, &str> = [
        (ENV_MODELS_SERVICE_URL, "http://models:11434/api/generate"),
        (ENV_DATASETS_BASE_PATH, "/data"),
        (ENV_ANNOTATOR_SERVICE_URL, ""),
    ]
    .into_iter()
    .collect();

    let config = LexigradeConfig::new()
        .with_overrides(|key| vars.get(key).map(|value| value.to_string()));

    assert_eq!(config.services.models_url, "http://models:11434/api/generate");
    assert_eq!(config.resources.datasets_path, PathBuf::from("/data"));
    assert_eq!(config.services.annotator_url, None);
}

#[test]
fn test_builder() {
    let config = LexigradeConfig::new()
        .with_datasets_path("/tmp/datasets")
        .with_max_retries(5)
        .with_soft_min_pass_ratio(0.75)
        .with_classifier_strategy(Language::Spanish, ClassifierStrategy::Neural);

    assert_eq!(config.flow.max_retries, 5);
    assert_eq!(config.flow.soft_min_pass_ratio, 0.75);
    assert_eq!(
        config.classifier.strategies.for_language(Language::Spanish),
        ClassifierStrategy::Neural
    );
}

#[test]
fn test_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lexigrade.toml");
    std::fs::write(&path, "[rarity]\ntop_k = 8\n").unwrap();

    let config = LexigradeConfig::load(&path).unwrap();
    assert_eq!(config.rarity.top_k, 8);

    assert!(matches!(
        LexigradeConfig::load(dir.path().join("missing.toml")),
        Err(ConfigError::Io(_))
    ));
}

#[test]
fn test_weights_and_frequency_bands() {
    let config = LexigradeConfig::default();
    assert_eq!(config.classifier.weights.for_language(Language::Spanish).syntax, 0.45);
    assert_eq!(config.lexical.frequency_weight(5.5), 0.25);
    assert_eq!(config.lexical.frequency_weight(5.2), 0.4);
    assert_eq!(config.lexical.abstractness_weight("happiness"), 1.4);
    assert_eq!(config.lexical.abstractness_weight("house"), 0.8);
}
