//! Integration tests for alias-forge

use alias_forge::{
    batch::{BatchDriver, CancelToken},
    export::{render, ExportFormat},
    stats::GenerationStats,
    store::{HistoryItem, VariantStore},
    types::{GenerationConfig, Mode, Separator},
    variant::{expected_distribution, MAX_DOT_USERNAME_LENGTH},
    AddressValidator, AliasForgeError,
};
use std::collections::HashSet;

#[test]
fn test_normalize_examples() {
    let normalized = alias_forge::normalize("not-an-address");
    assert_eq!(normalized.username, "");
    assert_eq!(normalized.domain, "");

    let normalized = alias_forge::normalize("a.b.c@gmail.com");
    assert_eq!(normalized.username, "abc");
    assert_eq!(normalized.domain, "gmail.com");
}

#[test]
fn test_dot_variation_examples() {
    let emails: Vec<String> = alias_forge::generate_dot_variations("ab@gmail.com")
        .unwrap()
        .into_iter()
        .map(|r| r.email)
        .collect();
    assert_eq!(emails, vec!["ab@gmail.com", "a.b@gmail.com"]);

    let emails: Vec<String> = alias_forge::generate_dot_variations("a.b.c@gmail.com")
        .unwrap()
        .into_iter()
        .map(|r| r.email)
        .collect();
    assert_eq!(
        emails,
        vec!["abc@gmail.com", "a.bc@gmail.com", "ab.c@gmail.com", "a.b.c@gmail.com"]
    );
}

#[test]
fn test_dot_counts_for_every_length() {
    for n in 0..=12usize {
        let username: String = "abcdefghijkl".chars().take(n).collect();
        let address = format!("{}@gmail.com", username);
        let results = alias_forge::generate_dot_variations(&address).unwrap();

        let expected = if n <= 1 { 1 } else { 1usize << (n - 1) };
        assert_eq!(results.len(), expected, "length {}", n);

        let unique: HashSet<&str> = results.iter().map(|r| r.email.as_str()).collect();
        assert_eq!(unique.len(), expected);

        for result in &results {
            let local = result.email.split('@').next().unwrap();
            assert_eq!(local.replace('.', ""), username);
        }

        if n <= 1 {
            assert_eq!(results[0].email, address);
        }
    }
}

#[test]
fn test_hard_ceiling() {
    let at_limit = format!("{}@gmail.com", "a".repeat(MAX_DOT_USERNAME_LENGTH));
    assert!(alias_forge::generate_dot_variations_chunked(&at_limit, 500).is_ok());

    let over = format!("{}@gmail.com", "a".repeat(MAX_DOT_USERNAME_LENGTH + 1));
    assert!(matches!(
        alias_forge::generate_dot_variations(&over),
        Err(AliasForgeError::InputTooLarge { length: 21, max: 20 })
    ));
}

#[test]
fn test_chunked_equals_eager() {
    let address = "john.smith@gmail.com";
    let eager = alias_forge::generate_dot_variations(address).unwrap();

    for chunk_size in [1, 2, 64, 255, 256, 257, 500] {
        let mut generator = alias_forge::generate_dot_variations_chunked(address, chunk_size).unwrap();
        let mut collected = Vec::new();
        while let Some(chunk) = generator.next_chunk() {
            assert!(!chunk.is_empty() && chunk.len() <= chunk_size);
            collected.extend(chunk);
        }
        assert!(generator.is_done());
        assert_eq!(collected, eager);
    }
}

#[test]
fn test_plus_variation_examples() {
    let results = alias_forge::generate_plus_variations("john@gmail.com", "work", Separator::Underscore);
    let emails: Vec<&str> = results.iter().map(|r| r.email.as_str()).collect();
    assert_eq!(emails, vec!["john_work@gmail.com"]);

    let results = alias_forge::generate_plus_variations("john@gmail.com", "x,x,x", Separator::Plus);
    assert_eq!(results.len(), 1);
}

#[tokio::test]
async fn test_batch_stats_and_export() {
    let addresses = vec!["abcd@gmail.com".to_string(), "efgh@gmail.com".to_string()];
    let outcome = BatchDriver::new(GenerationConfig {
        chunk_size: 3,
        ..Default::default()
    })
    .run(&addresses, &CancelToken::new(), |_| {})
    .await
    .unwrap();

    assert_eq!(outcome.results.len(), 16);
    let stats = GenerationStats::from_variations(&outcome.results, "Batch");
    let doubled: Vec<u64> = expected_distribution(4).into_iter().map(|c| c * 2).collect();
    let counts: Vec<u64> = stats.distribution.values().map(|c| *c as u64).collect();
    assert_eq!(counts, doubled);

    let emails: Vec<String> = outcome.results.iter().map(|r| r.email.clone()).collect();
    let csv = render(&emails, ExportFormat::Csv).unwrap();
    assert_eq!(csv.lines().count(), 17);
    assert!(csv.starts_with("Email\nabcd@gmail.com\n"));
}

#[tokio::test]
async fn test_validated_batch_with_store() {
    let validator = AddressValidator::new().unwrap();
    let validated = validator.validate_input("ab@gmail.com\ncd@googlemail.com").unwrap();
    let addresses: Vec<String> = validated.into_iter().map(|v| v.address).collect();

    let config = GenerationConfig {
        mode: Mode::Plus,
        tags: "news,bank".to_string(),
        ..Default::default()
    };
    let mut outcome = BatchDriver::new(config.clone())
        .run(&addresses, &CancelToken::new(), |_| {})
        .await
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let mut store = VariantStore::open(dir.path().join("store.json")).unwrap();
    store.toggle_favorite("cd+bank@googlemail.com").unwrap();
    store.apply_favorites(&mut outcome.results);
    store
        .record(HistoryItem::new("ab@gmail.com\ncd@googlemail.com", &config, outcome.results.len(), true))
        .unwrap();

    let favorites: Vec<&str> = outcome
        .results
        .iter()
        .filter(|r| r.is_favorite)
        .map(|r| r.email.as_str())
        .collect();
    assert_eq!(favorites, vec!["cd+bank@googlemail.com"]);
    assert_eq!(store.history()[0].count, 4);
    assert_eq!(store.history()[0].tags.as_deref(), Some("news,bank"));
}

#[test]
fn test_error_handling() {
    let error = AliasForgeError::validation("test error");
    assert!(error.to_string().contains("test error"));

    let error = AliasForgeError::malformed_address("nope");
    assert!(error.to_string().contains("nope"));
}

#[test]
fn test_library_initialization() {
    let result = alias_forge::init();
    assert!(result.is_ok());
}
