//! Tag-append variation generator

use std::collections::HashSet;

use super::split_list;
use crate::types::{Separator, VariationResult};

/// Extract the distinct tags from free text, in order of first appearance
pub fn parse_tags(tags_input: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    split_list(tags_input)
        .into_iter()
        .filter(|tag| seen.insert(tag.clone()))
        .collect()
}

/// One `local + separator + tag @ domain` address per distinct tag.
///
/// The local-part is used as typed (dots included). An address that does not
/// split into two non-empty parts, or a tag list with no usable tags, gives an empty
/// result.
pub fn generate_plus_variations(
    address: &str,
    tags_input: &str,
    separator: Separator,
) -> Vec<VariationResult> {
    let parts: Vec<&str> = address.split('@').collect();
    let (local, domain) = match parts.as_slice() {
        [local, domain] if !local.is_empty() && !domain.is_empty() => (*local, *domain),
        _ => return Vec::new(),
    };

    parse_tags(tags_input)
        .into_iter()
        .map(|tag| {
            let email = format!("{}{}{}@{}", local, separator.as_char(), tag, domain);
            VariationResult::new(email, address)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_separator_preserved() {
        let results = generate_plus_variations("john@gmail.com", "work", Separator::Underscore);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].email, "john_work@gmail.com");
        assert_eq!(results[0].source_email.as_deref(), Some("john@gmail.com"));
    }

    #[test]
    fn test_duplicate_tags_collapse() {
        let results = generate_plus_variations("a@gmail.com", "x,x,x", Separator::Plus);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].email, "a+x@gmail.com");
    }

    #[test]
    fn test_tag_order_and_trimming() {
        let tags = parse_tags(" shopping ,\nwork\r\n,,social\nwork\n");
        assert_eq!(tags, vec!["shopping", "work", "social"]);
    }

    #[test]
    fn test_local_part_kept_verbatim() {
        let results = generate_plus_variations("j.doe@gmail.com", "news\nbank", Separator::Hyphen);
        let emails: Vec<_> = results.iter().map(|r| r.email.as_str()).collect();
        assert_eq!(emails, vec!["j.doe-news@gmail.com", "j.doe-bank@gmail.com"]);
    }

    #[test]
    fn test_empty_tags() {
        assert!(generate_plus_variations("a@gmail.com", " , \n ", Separator::Plus).is_empty());
    }

    #[test]
    fn test_malformed_address() {
        assert!(generate_plus_variations("nope", "work", Separator::Plus).is_empty());
        assert!(generate_plus_variations("a@b@c", "work", Separator::Plus).is_empty());
        assert!(generate_plus_variations("@gmail.com", "work", Separator::Plus).is_empty());
    }
}
