//! Gmail address validation

use regex::Regex;

use super::normalize::normalize;
use super::{dot_variation_count, split_list, MAX_DOT_USERNAME_LENGTH, RECOMMENDED_MAX_USERNAME_LENGTH};
use crate::error::{AliasForgeError, Result};

/// Addresses the variation tricks are known to work for
pub const GMAIL_PATTERN: &str = r"^[a-zA-Z0-9._%+-]+@(gmail\.com|googlemail\.com)$";

/// Gmail address validator
pub struct AddressValidator {
    pattern: Regex,
    warn_length: usize,
}

impl AddressValidator {
    /// Create a new address validator
    pub fn new() -> Result<Self> {
        let pattern = Regex::new(GMAIL_PATTERN)
            .map_err(|e| AliasForgeError::internal(e.to_string()))?;

        Ok(Self {
            pattern,
            warn_length: RECOMMENDED_MAX_USERNAME_LENGTH,
        })
    }

    /// Create validator with a custom soft warning threshold
    pub fn with_warn_length(mut self, warn_length: usize) -> Self {
        self.warn_length = warn_length;
        self
    }

    /// Validate a single address
    pub fn validate(&self, address: &str) -> Result<ValidatedAddress> {
        let address = address.trim();

        if address.is_empty() {
            return Err(crate::validation_error!("Address cannot be empty"));
        }

        if !self.pattern.is_match(address) {
            return Err(crate::validation_error!(
                "'{}' is not a valid Gmail address (expected name@gmail.com or name@googlemail.com)",
                address
            ));
        }

        let normalized = normalize(address);
        if !normalized.is_valid() {
            return Err(AliasForgeError::malformed_address(address));
        }

        let username_length = normalized.len();
        let variation_count = dot_variation_count(username_length);
        let warning = (username_length > self.warn_length).then(|| {
            let count = match variation_count {
                Some(count) => count.to_string(),
                None => "more than 2^63".to_string(),
            };
            format!(
                "Username length ({}) creates {} dot variations. We recommend shortening it.",
                username_length, count
            )
        });

        if let Some(message) = &warning {
            tracing::warn!(address = %address, username_length, "{}", message);
        }

        Ok(ValidatedAddress {
            address: address.to_string(),
            username: normalized.username,
            domain: normalized.domain,
            username_length,
            variation_count,
            warning,
        })
    }

    /// Split batch input and validate every entry, failing on the first bad one
    pub fn validate_input(&self, input: &str) -> Result<Vec<ValidatedAddress>> {
        let addresses = split_list(input);
        if addresses.is_empty() {
            return Err(crate::validation_error!("Please enter at least one email"));
        }

        addresses.iter().map(|address| self.validate(address)).collect()
    }
}

/// Address that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedAddress {
    pub address: String,
    pub username: String,
    pub domain: String,
    pub username_length: usize,
    /// Predicted number of dot variations, `None` when it overflows `u64`
    pub variation_count: Option<u64>,
    /// Soft warning for long usernames
    pub warning: Option<String>,
}

impl ValidatedAddress {
    /// Whether dot generation will refuse this address
    pub fn exceeds_hard_limit(&self) -> bool {
        self.username_length > MAX_DOT_USERNAME_LENGTH
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> AddressValidator {
        AddressValidator::new().unwrap()
    }

    #[test]
    fn test_valid_addresses() {
        let v = validator();
        let validated = v.validate("  john.doe@gmail.com ").unwrap();
        assert_eq!(validated.address, "john.doe@gmail.com");
        assert_eq!(validated.username, "johndoe");
        assert_eq!(validated.username_length, 7);
        assert_eq!(validated.variation_count, Some(64));
        assert!(validated.warning.is_none());

        assert!(v.validate("jane+news@googlemail.com").is_ok());
    }

    #[test]
    fn test_invalid_addresses() {
        let v = validator();
        assert!(v.validate("").is_err());
        assert!(v.validate("john@yahoo.com").is_err());
        assert!(v.validate("john@gmail.com.evil").is_err());
        assert!(v.validate("jo hn@gmail.com").is_err());
        assert!(v.validate("not-an-address").is_err());
    }

    #[test]
    fn test_dots_only_local_part() {
        let err = validator().validate("...@gmail.com").unwrap_err();
        assert!(matches!(err, AliasForgeError::MalformedAddress { .. }));
    }

    #[test]
    fn test_soft_warning_and_hard_limit() {
        let v = validator();
        let long = v.validate("abcdefghijklmnop@gmail.com").unwrap();
        assert_eq!(long.username_length, 16);
        assert!(long.warning.as_deref().unwrap().contains("32768"));
        assert!(!long.exceeds_hard_limit());

        let huge = v.validate(&format!("{}@gmail.com", "a".repeat(21))).unwrap();
        assert!(huge.exceeds_hard_limit());

        let enormous = v.validate(&format!("{}@gmail.com", "a".repeat(70))).unwrap();
        assert_eq!(enormous.variation_count, None);
        assert!(enormous.warning.as_deref().unwrap().contains("more than 2^63"));

        let strict = validator().with_warn_length(3);
        assert!(strict.validate("abcd@gmail.com").unwrap().warning.is_some());
    }

    #[test]
    fn test_batch_validation() {
        let v = validator();
        let all = v.validate_input("a@gmail.com,\nb.c@googlemail.com").unwrap();
        assert_eq!(all.len(), 2);
        assert!(v.validate_input("a@gmail.com, bad").is_err());
        assert!(v.validate_input(" , ").is_err());
    }
}
